//! # Endpoint Verifier
//!
//! Runs the full battery of checks against one [`Target`]:
//!
//! 1. **Reachability**: ping the hostname (if any), then the IP.
//! 2. **Declared ports**: allowed ports must be open, blocked ports must not be.
//! 3. **Unexpected ports** (exhaustive mode only): nothing outside the
//!    declared sets may be open among the well-known ports.
//! 4. **DNS consistency**: the hostname must resolve to the declared IP.
//!
//! Every step runs regardless of what earlier steps found. Problems are
//! accumulated in a [`VerificationResult`] instead of being raised, so one bad
//! port never hides the state of the rest.

use std::fmt;
use std::net::IpAddr;

use hcheck_common::network::target::Target;
use tracing::{debug, info};

use crate::probe::{AddressFamily, Probes, ResolveError};

/// A ping or DNS problem found on a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    PingHostname { hostname: String },
    PingIp { ip: IpAddr },
    NameNotFound { hostname: String },
    DnsMismatch { resolved: IpAddr, declared: IpAddr },
    DnsLookup { hostname: String, reason: String },
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::PingHostname { hostname } => write!(f, "Ping {hostname} failed"),
            Failure::PingIp { ip } => write!(f, "Ping {ip} failed"),
            Failure::NameNotFound { hostname } => {
                write!(f, "The DNS query name does not exist: {hostname}")
            }
            Failure::DnsMismatch { resolved, declared } => {
                write!(f, "IP of DNS query mismatch ({resolved} != {declared})")
            }
            Failure::DnsLookup { hostname, reason } => {
                write!(f, "DNS lookup of {hostname} failed: {reason}")
            }
        }
    }
}

/// Everything that went wrong on one target.
///
/// `success` starts out true and flips to false on the first recorded
/// problem. It never flips back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationResult {
    success: bool,
    failures: Vec<Failure>,
    open_but_unexpected: Vec<u16>,
    wrong_state_allowed: Vec<u16>,
    wrong_state_blocked: Vec<u16>,
}

impl Default for VerificationResult {
    fn default() -> Self {
        Self {
            success: true,
            failures: Vec::new(),
            open_but_unexpected: Vec::new(),
            wrong_state_allowed: Vec::new(),
            wrong_state_blocked: Vec::new(),
        }
    }
}

impl VerificationResult {
    pub fn success(&self) -> bool {
        self.success
    }

    /// Ping and DNS failures, in the order they were found.
    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    /// Open ports outside both declared sets, ascending.
    pub fn open_but_unexpected(&self) -> &[u16] {
        &self.open_but_unexpected
    }

    /// Allowed ports that were not open, ascending.
    pub fn wrong_state_allowed(&self) -> &[u16] {
        &self.wrong_state_allowed
    }

    /// Blocked ports that were open, ascending.
    pub fn wrong_state_blocked(&self) -> &[u16] {
        &self.wrong_state_blocked
    }

    pub(crate) fn record(&mut self, failure: Failure) {
        self.failures.push(failure);
        self.success = false;
    }

    pub(crate) fn record_allowed_closed(&mut self, port: u16) {
        self.wrong_state_allowed.push(port);
        self.success = false;
    }

    pub(crate) fn record_blocked_open(&mut self, port: u16) {
        self.wrong_state_blocked.push(port);
        self.success = false;
    }

    pub(crate) fn record_unexpected_open(&mut self, port: u16) {
        self.open_but_unexpected.push(port);
        self.success = false;
    }

    fn finish(mut self) -> Self {
        for ports in [
            &mut self.open_but_unexpected,
            &mut self.wrong_state_allowed,
            &mut self.wrong_state_blocked,
        ] {
            ports.sort_unstable();
            ports.dedup();
        }
        self
    }
}

/// Stateless driver for the four checks. Cheap to share between tasks.
#[derive(Debug, Clone)]
pub struct EndpointVerifier {
    probes: Probes,
    exhaustive: bool,
}

impl EndpointVerifier {
    pub fn new(probes: Probes, exhaustive: bool) -> Self {
        Self { probes, exhaustive }
    }

    pub fn is_exhaustive(&self) -> bool {
        self.exhaustive
    }

    pub async fn verify(&self, target: &Target) -> VerificationResult {
        let mut result = VerificationResult::default();

        self.check_reachability(target, &mut result).await;
        self.check_declared_ports(target, &mut result).await;
        if self.exhaustive {
            self.check_unexpected_ports(target, &mut result).await;
        }
        self.check_dns(target, &mut result).await;

        let result = result.finish();
        info!(
            service = %target.service_name,
            role = %target.role,
            ip = %target.ip,
            success = result.success(),
            "Verified target"
        );
        result
    }

    async fn check_reachability(&self, target: &Target, result: &mut VerificationResult) {
        if let Some(hostname) = target.hostname.as_deref() {
            let reachable = self.probes.pinger.ping(hostname).await;
            debug!("ping {hostname}: {reachable}");
            if !reachable {
                result.record(Failure::PingHostname {
                    hostname: hostname.to_string(),
                });
            }
        }

        let ip = target.ip.to_string();
        let reachable = self.probes.pinger.ping(&ip).await;
        debug!("ping {ip}: {reachable}");
        if !reachable {
            result.record(Failure::PingIp { ip: target.ip });
        }
    }

    async fn check_declared_ports(&self, target: &Target, result: &mut VerificationResult) {
        let scanner = &self.probes.scanner;

        for &port in &target.allowed_ports {
            let state = scanner.scan_port(target.ip, port).await;
            debug!("{}:{port} is {state}, expected open", target.ip);
            if !state.is_open() {
                result.record_allowed_closed(port);
            }
        }

        for &port in &target.blocked_ports {
            let state = scanner.scan_port(target.ip, port).await;
            debug!("{}:{port} is {state}, expected closed", target.ip);
            if state.is_open() {
                result.record_blocked_open(port);
            }
        }
    }

    async fn check_unexpected_ports(&self, target: &Target, result: &mut VerificationResult) {
        let open = self.probes.scanner.scan_all_open(target.ip).await;
        debug!("{} has {} open well-known ports", target.ip, open.len());
        for port in open {
            if !target.is_declared(port) {
                result.record_unexpected_open(port);
            }
        }
    }

    async fn check_dns(&self, target: &Target, result: &mut VerificationResult) {
        let Some(hostname) = target.hostname.as_deref() else {
            return;
        };

        let family = AddressFamily::of(target.ip);
        match self.probes.resolver.resolve_host(hostname, family).await {
            Err(ResolveError::NameNotFound) => result.record(Failure::NameNotFound {
                hostname: hostname.to_string(),
            }),
            Err(ResolveError::Lookup(reason)) => result.record(Failure::DnsLookup {
                hostname: hostname.to_string(),
                reason,
            }),
            // Only the first record of the declared IP's family is compared.
            // Hosts with several records are not reconciled against the declared IP.
            Ok(answers) => match answers.first() {
                Some(&resolved) if resolved != target.ip => {
                    debug!("{hostname} resolved to {resolved}, declared {}", target.ip);
                    result.record(Failure::DnsMismatch {
                        resolved,
                        declared: target.ip,
                    });
                }
                Some(_) => debug!("{hostname} resolved to {}", target.ip),
                None => result.record(Failure::NameNotFound {
                    hostname: hostname.to_string(),
                }),
            },
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
