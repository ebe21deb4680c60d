#![cfg(test)]
use std::io::Write;

use hcheck_common::ConfigError;
use hcheck_common::checklist::Checklist;
use hcheck_common::config::Config;
use hcheck_core::report::{self, ReportLine, Status};
use hcheck_core::run_batch;

use crate::support::Scenario;

const CHECKLIST: &str = r#"
web:
  Public:
    hostname: www.example.com
    IP: 93.184.216.34
    valid-port: 80,443
    block-port: 22
  Private:
    IP: 10.0.0.5
    valid-port: 22
mail:
  Public:
    hostname: mail.example.com
    IP: 93.184.216.40
    valid-port: 25,587
    block-port: 110-111
db:
  Internal:
    IP: 10.0.0.9
    valid-port: "5432"
    block-port: 3306
"#;

fn text(lines: &[ReportLine]) -> Vec<String> {
    lines.iter().map(ToString::to_string).collect()
}

fn healthy_network() -> Scenario {
    Scenario::new()
        .open("93.184.216.34", &[80, 443])
        .open("10.0.0.5", &[22])
        .open("93.184.216.40", &[25, 587])
        .open("10.0.0.9", &[5432])
        .name("www.example.com", &["93.184.216.34"])
        .name("mail.example.com", &["93.184.216.40"])
}

#[tokio::test]
async fn healthy_checklist_passes_end_to_end() {
    let services = Checklist::from_yaml(CHECKLIST).unwrap().into_services();

    let batch = run_batch(services, healthy_network().probes(), &Config::default(), None)
        .await
        .unwrap();

    assert!(batch.passed());
    assert_eq!(
        text(&report::render_batch(&batch)),
        vec![
            "✔ web:    93.184.216.34 is healthy",
            "✔ web:    10.0.0.5 is healthy",
            "✔ mail:   93.184.216.40 is healthy",
            "✔ db:     10.0.0.9 is healthy",
        ]
    );
}

#[tokio::test]
async fn failures_are_itemized_and_the_batch_continues() {
    let services = Checklist::from_yaml(CHECKLIST).unwrap().into_services();
    let network = Scenario::new()
        .open("93.184.216.34", &[80, 22])
        .open("10.0.0.5", &[22])
        .open("93.184.216.40", &[25, 587, 111])
        .down("10.0.0.9")
        .name("www.example.com", &["93.184.216.35"]);

    let batch = run_batch(services, network.probes(), &Config::default(), None)
        .await
        .unwrap();

    assert!(!batch.passed());
    assert_eq!(batch.healthy_count(), 0);
    assert_eq!(
        text(&report::render_batch(&batch)),
        vec![
            "✘ web:    IP of DNS query mismatch (93.184.216.35 != 93.184.216.34)",
            "✘ web:    93.184.216.34 port closed: 443",
            "✘ web:    93.184.216.34 port open: 22",
            "✔ web:    10.0.0.5 is healthy",
            "✘ mail:   The DNS query name does not exist: mail.example.com",
            "✘ mail:   93.184.216.40 port open: 111",
            "✘ db:     Ping 10.0.0.9 failed",
            "✘ db:     10.0.0.9 port closed: 5432",
        ]
    );
}

#[tokio::test]
async fn popular_port_scan_reports_undeclared_ports() {
    let services = Checklist::from_yaml(CHECKLIST).unwrap().select("db").unwrap();
    let network = Scenario::new().open("10.0.0.9", &[5432, 22, 6379]);
    let cfg = Config {
        exhaustive: true,
        ..Config::default()
    };

    let batch = run_batch(services, network.probes(), &cfg, None).await.unwrap();

    let lines = report::render_batch(&batch);
    assert!(lines.iter().all(|l| l.status == Status::Fail));
    assert_eq!(
        text(&lines),
        vec!["✘ db:     10.0.0.9 unexpected open port: 22, 6379"]
    );
}

#[tokio::test]
async fn selection_limits_and_orders_the_run() {
    let services = Checklist::from_yaml(CHECKLIST)
        .unwrap()
        .select("db,web")
        .unwrap();

    let batch = run_batch(services, healthy_network().probes(), &Config::default(), None)
        .await
        .unwrap();

    let names: Vec<&str> = batch.services.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["db", "web"]);
}

#[tokio::test]
async fn same_network_same_report() {
    let network = Scenario::new()
        .open("93.184.216.34", &[80, 22, 8080])
        .name("www.example.com", &["93.184.216.34"]);
    let cfg = Config {
        exhaustive: true,
        concurrency: 3,
        ..Config::default()
    };

    let mut renders = Vec::new();
    for _ in 0..2 {
        let services = Checklist::from_yaml(CHECKLIST).unwrap().into_services();
        let batch = run_batch(services, network.probes(), &cfg, None).await.unwrap();
        renders.push(text(&report::render_batch(&batch)));
    }

    assert_eq!(renders[0], renders[1]);
}

#[test]
fn unknown_service_is_rejected_before_probing() {
    let checklist = Checklist::from_yaml(CHECKLIST).unwrap();
    assert!(matches!(
        checklist.select("web,ftp"),
        Err(ConfigError::UnknownService(name)) if name == "ftp"
    ));
}

#[test]
fn checklist_file_round_trip() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CHECKLIST.as_bytes()).unwrap();

    let checklist = Checklist::load(file.path()).unwrap();
    let names: Vec<&str> = checklist.services().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["web", "mail", "db"]);
}
