use std::collections::{BTreeSet, HashMap, HashSet};
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use hcheck_common::network::ports::PortState;

use super::{AddressFamily, Pinger, PortScanner, Probes, ResolveError, Resolver};

/// A scripted network. Everything answers ping, every port is closed and no
/// name resolves unless configured otherwise.
#[derive(Default)]
pub(crate) struct FakeNetwork {
    unreachable: HashSet<String>,
    open: HashMap<IpAddr, BTreeSet<u16>>,
    dns: HashMap<String, Result<Vec<IpAddr>, ResolveError>>,
    delays: HashMap<IpAddr, Duration>,
    calls: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl FakeNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unreachable(mut self, target: &str) -> Self {
        self.unreachable.insert(target.to_string());
        self
    }

    pub fn open(mut self, ip: IpAddr, ports: &[u16]) -> Self {
        self.open.entry(ip).or_default().extend(ports.iter().copied());
        self
    }

    pub fn resolves(mut self, hostname: &str, ips: &[IpAddr]) -> Self {
        self.dns.insert(hostname.to_string(), Ok(ips.to_vec()));
        self
    }

    pub fn dns_error(mut self, hostname: &str, err: ResolveError) -> Self {
        self.dns.insert(hostname.to_string(), Err(err));
        self
    }

    /// Holds every port scan against `ip` for `delay`.
    pub fn slow(mut self, ip: IpAddr, delay: Duration) -> Self {
        self.delays.insert(ip, delay);
        self
    }

    pub fn into_probes(self) -> (Probes, Arc<FakeNetwork>) {
        let net = Arc::new(self);
        let probes = Probes {
            pinger: net.clone(),
            scanner: net.clone(),
            resolver: net.clone(),
        };
        (probes, net)
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Highest number of delayed scans that were running at the same time.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    fn log(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    async fn delay(&self, ip: IpAddr) {
        if let Some(delay) = self.delays.get(&ip) {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(*delay).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
        }
    }
}

#[async_trait]
impl Pinger for FakeNetwork {
    async fn ping(&self, target: &str) -> bool {
        self.log(format!("ping {target}"));
        !self.unreachable.contains(target)
    }
}

#[async_trait]
impl PortScanner for FakeNetwork {
    async fn scan_port(&self, ip: IpAddr, port: u16) -> PortState {
        self.log(format!("scan {ip}:{port}"));
        self.delay(ip).await;
        match self.open.get(&ip) {
            Some(ports) if ports.contains(&port) => PortState::Open,
            _ => PortState::Closed,
        }
    }

    async fn scan_all_open(&self, ip: IpAddr) -> BTreeSet<u16> {
        self.log(format!("scan-all {ip}"));
        self.delay(ip).await;
        self.open.get(&ip).cloned().unwrap_or_default()
    }
}

#[async_trait]
impl Resolver for FakeNetwork {
    async fn resolve_host(
        &self,
        hostname: &str,
        family: AddressFamily,
    ) -> Result<Vec<IpAddr>, ResolveError> {
        self.log(format!("resolve {hostname}"));
        let answers = self
            .dns
            .get(hostname)
            .cloned()
            .unwrap_or(Err(ResolveError::NameNotFound))?;
        Ok(answers.into_iter().filter(|ip| family.matches(*ip)).collect())
    }
}
