use std::collections::{BTreeSet, HashMap, HashSet};
use std::net::IpAddr;

use async_trait::async_trait;
use hcheck_common::network::ports::PortState;
use hcheck_core::probe::{AddressFamily, Pinger, PortScanner, Probes, ResolveError, Resolver};

/// Answers ping for everything not marked down.
#[derive(Default, Clone)]
pub struct ScriptedPinger {
    pub down: HashSet<String>,
}

#[async_trait]
impl Pinger for ScriptedPinger {
    async fn ping(&self, target: &str) -> bool {
        !self.down.contains(target)
    }
}

/// Unknown names do not exist. Answers are filtered to the requested family.
#[derive(Default, Clone)]
pub struct ScriptedResolver {
    pub names: HashMap<String, Vec<IpAddr>>,
}

#[async_trait]
impl Resolver for ScriptedResolver {
    async fn resolve_host(
        &self,
        hostname: &str,
        family: AddressFamily,
    ) -> Result<Vec<IpAddr>, ResolveError> {
        let ips = self.names.get(hostname).ok_or(ResolveError::NameNotFound)?;
        Ok(ips.iter().copied().filter(|ip| family.matches(*ip)).collect())
    }
}

/// Ports listed as open answer, everything else is filtered.
#[derive(Default, Clone)]
pub struct ScriptedScanner {
    pub open: HashMap<IpAddr, BTreeSet<u16>>,
}

#[async_trait]
impl PortScanner for ScriptedScanner {
    async fn scan_port(&self, ip: IpAddr, port: u16) -> PortState {
        match self.open.get(&ip) {
            Some(ports) if ports.contains(&port) => PortState::Open,
            _ => PortState::Filtered,
        }
    }

    async fn scan_all_open(&self, ip: IpAddr) -> BTreeSet<u16> {
        self.open.get(&ip).cloned().unwrap_or_default()
    }
}

#[derive(Default)]
pub struct Scenario {
    pinger: ScriptedPinger,
    scanner: ScriptedScanner,
    resolver: ScriptedResolver,
}

impl Scenario {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn down(mut self, target: &str) -> Self {
        self.pinger.down.insert(target.to_string());
        self
    }

    pub fn open(mut self, ip: &str, ports: &[u16]) -> Self {
        let ip: IpAddr = ip.parse().unwrap();
        self.scanner.open.entry(ip).or_default().extend(ports.iter().copied());
        self
    }

    pub fn name(mut self, hostname: &str, ips: &[&str]) -> Self {
        let ips = ips.iter().map(|ip| ip.parse().unwrap()).collect();
        self.resolver.names.insert(hostname.to_string(), ips);
        self
    }

    pub fn probes(&self) -> Probes {
        Probes::new(
            self.pinger.clone(),
            self.scanner.clone(),
            self.resolver.clone(),
        )
    }
}
