//! # Report Rendering
//!
//! Turns verification results into the lines shown to the user:
//!
//! ```text
//! ✘ web:    Ping www.example.com failed
//! ✘ web:    93.184.216.34 port closed: 80, 443
//! ✔ db:     10.0.0.9 is healthy
//! ```
//!
//! A failed target gets one line per kind of problem, not one per port. The
//! service label is padded to the next tab stop so messages line up.

use std::fmt;

use hcheck_common::network::ports::join_ports;

use crate::runner::BatchReport;
use crate::service::{ServiceReport, TargetReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Pass,
    Fail,
}

impl Status {
    pub fn glyph(self) -> char {
        match self {
            Status::Pass => '\u{2714}',
            Status::Fail => '\u{2718}',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    pub status: Status,
    /// `"<service>:"` padded to the tab stop.
    pub label: String,
    pub message: String,
}

impl fmt::Display for ReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}{}", self.status.glyph(), self.label, self.message)
    }
}

/// `"<name>:"` left-aligned to the next multiple of eight columns, with at
/// least one space after the colon.
pub fn label(service_name: &str) -> String {
    let width = (service_name.chars().count() + 9) / 8 * 8;
    format!("{:<width$}", format!("{service_name}:"))
}

pub fn render_target(report: &TargetReport) -> Vec<ReportLine> {
    let label = label(&report.target.service_name);
    let ip = report.target.ip;
    let result = &report.result;

    if result.success() {
        return vec![ReportLine {
            status: Status::Pass,
            label,
            message: format!("{ip} is healthy"),
        }];
    }

    let mut messages: Vec<String> = result.failures().iter().map(ToString::to_string).collect();
    if !result.wrong_state_allowed().is_empty() {
        messages.push(format!("{ip} port closed: {}", join_ports(result.wrong_state_allowed())));
    }
    if !result.wrong_state_blocked().is_empty() {
        messages.push(format!("{ip} port open: {}", join_ports(result.wrong_state_blocked())));
    }
    if !result.open_but_unexpected().is_empty() {
        messages.push(format!(
            "{ip} unexpected open port: {}",
            join_ports(result.open_but_unexpected())
        ));
    }

    messages
        .into_iter()
        .map(|message| ReportLine {
            status: Status::Fail,
            label: label.clone(),
            message,
        })
        .collect()
}

/// Lines for every present target, Public first.
pub fn render_service(report: &ServiceReport) -> Vec<ReportLine> {
    report.targets().flat_map(render_target).collect()
}

pub fn render_batch(report: &BatchReport) -> Vec<ReportLine> {
    report.services.iter().flat_map(render_service).collect()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::fake::FakeNetwork;
    use crate::verifier::EndpointVerifier;
    use hcheck_common::network::target::{Role, Target};
    use std::net::{IpAddr, Ipv4Addr};

    fn ip(a: u8, b: u8, c: u8, d: u8) -> IpAddr {
        IpAddr::V4(Ipv4Addr::new(a, b, c, d))
    }

    async fn report_for(net: FakeNetwork, target: Target, exhaustive: bool) -> TargetReport {
        let (probes, _) = net.into_probes();
        let result = EndpointVerifier::new(probes, exhaustive).verify(&target).await;
        TargetReport { target, result }
    }

    fn text(lines: &[ReportLine]) -> Vec<String> {
        lines.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn label_pads_to_tab_stops() {
        assert_eq!(label("db"), "db:     ");
        assert_eq!(label("web"), "web:    ");
        assert_eq!(label("abcdef"), "abcdef: ");
        assert_eq!(label("abcdefg"), "abcdefg:        ");
        assert_eq!(label(""), ":       ");
    }

    #[test]
    fn label_width_is_always_a_multiple_of_eight() {
        for len in 0..40 {
            let name = "x".repeat(len);
            let width = label(&name).chars().count();
            assert_eq!(width % 8, 0, "name length {len}");
            assert!(width > len + 1, "name length {len}");
        }
    }

    #[tokio::test]
    async fn healthy_target_renders_single_line() {
        let target = Target::new("db", Role::Internal, ip(10, 0, 0, 9));
        let report = report_for(FakeNetwork::new(), target, false).await;

        assert_eq!(text(&render_target(&report)), vec!["✔ db:     10.0.0.9 is healthy"]);
    }

    #[tokio::test]
    async fn one_line_per_failure_category() {
        let addr = ip(93, 184, 216, 34);
        let net = FakeNetwork::new()
            .unreachable("www.example.com")
            .open(addr, &[22, 3389, 8080])
            .resolves("www.example.com", &[ip(93, 184, 216, 35)]);
        let target = Target::new("web", Role::Public, addr)
            .with_hostname("www.example.com")
            .with_allowed([443, 80])
            .with_blocked([3389, 22]);

        let report = report_for(net, target, true).await;

        assert_eq!(
            text(&render_target(&report)),
            vec![
                "✘ web:    Ping www.example.com failed",
                "✘ web:    IP of DNS query mismatch (93.184.216.35 != 93.184.216.34)",
                "✘ web:    93.184.216.34 port closed: 80, 443",
                "✘ web:    93.184.216.34 port open: 22, 3389",
                "✘ web:    93.184.216.34 unexpected open port: 8080",
            ]
        );
    }

    #[tokio::test]
    async fn service_renders_public_before_internal() {
        let service_report = ServiceReport::from_reports(
            "web",
            vec![
                report_for(
                    FakeNetwork::new(),
                    Target::new("web", Role::Internal, ip(10, 0, 0, 2)),
                    false,
                )
                .await,
                report_for(
                    FakeNetwork::new(),
                    Target::new("web", Role::Public, ip(10, 0, 0, 1)),
                    false,
                )
                .await,
            ],
        );

        assert_eq!(
            text(&render_service(&service_report)),
            vec!["✔ web:    10.0.0.1 is healthy", "✔ web:    10.0.0.2 is healthy"]
        );
    }

    #[tokio::test]
    async fn batch_keeps_service_order() {
        let a = ServiceReport::from_reports(
            "zeta",
            vec![report_for(FakeNetwork::new(), Target::new("zeta", Role::Public, ip(10, 0, 0, 3)), false).await],
        );
        let b = ServiceReport::from_reports("empty", Vec::new());
        let c = ServiceReport::from_reports(
            "alpha",
            vec![report_for(FakeNetwork::new(), Target::new("alpha", Role::Public, ip(10, 0, 0, 4)), false).await],
        );
        let batch = BatchReport { services: vec![a, b, c] };

        assert_eq!(
            text(&render_batch(&batch)),
            vec!["✔ zeta:   10.0.0.3 is healthy", "✔ alpha:  10.0.0.4 is healthy"]
        );
    }
}
