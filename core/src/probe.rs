//! The **abstraction** over everything that touches the network.
//!
//! The verifier never pings, connects or resolves on its own. It asks the
//! capabilities bundled in [`Probes`], which the caller injects. The system
//! implementations live in [`crate::network`]; tests substitute fakes.
//!
//! Probe outcomes are plain data. An unreachable host is `false`, a silent
//! port is [`PortState::Filtered`]. Only name resolution can fail, and even
//! then the failure is a value the verifier records.

use std::collections::BTreeSet;
use std::fmt;
use std::net::IpAddr;
use std::sync::Arc;

use async_trait::async_trait;
use hcheck_common::network::ports::PortState;

#[cfg(test)]
pub(crate) mod fake;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// NXDOMAIN, or the name has no record of the requested family.
    #[error("name does not exist")]
    NameNotFound,
    #[error("{0}")]
    Lookup(String),
}

/// Sends a single echo request.
#[async_trait]
pub trait Pinger: Send + Sync {
    /// True iff one round trip completed within the pinger's own deadline.
    async fn ping(&self, target: &str) -> bool;
}

/// Determines the state of TCP ports on a host.
#[async_trait]
pub trait PortScanner: Send + Sync {
    async fn scan_port(&self, ip: IpAddr, port: u16) -> PortState;

    /// Every open port among the scanner's well-known port list.
    async fn scan_all_open(&self, ip: IpAddr) -> BTreeSet<u16>;
}

/// The record type a lookup asks for: A for IPv4, AAAA for IPv6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressFamily {
    V4,
    V6,
}

impl AddressFamily {
    pub fn of(ip: IpAddr) -> Self {
        match ip {
            IpAddr::V4(_) => AddressFamily::V4,
            IpAddr::V6(_) => AddressFamily::V6,
        }
    }

    pub fn matches(self, ip: IpAddr) -> bool {
        Self::of(ip) == self
    }
}

/// Turns a hostname into addresses.
#[async_trait]
pub trait Resolver: Send + Sync {
    /// Addresses of `family` in the order the resolver returned them.
    async fn resolve_host(
        &self,
        hostname: &str,
        family: AddressFamily,
    ) -> Result<Vec<IpAddr>, ResolveError>;
}

/// The capabilities a verification run needs, shareable across tasks.
#[derive(Clone)]
pub struct Probes {
    pub pinger: Arc<dyn Pinger>,
    pub scanner: Arc<dyn PortScanner>,
    pub resolver: Arc<dyn Resolver>,
}

impl Probes {
    pub fn new(
        pinger: impl Pinger + 'static,
        scanner: impl PortScanner + 'static,
        resolver: impl Resolver + 'static,
    ) -> Self {
        Self {
            pinger: Arc::new(pinger),
            scanner: Arc::new(scanner),
            resolver: Arc::new(resolver),
        }
    }
}

impl fmt::Debug for Probes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Probes").finish_non_exhaustive()
    }
}
