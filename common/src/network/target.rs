//! # Verification Target Model
//!
//! Defines what gets checked.
//!
//! * A [`Target`] is one network endpoint: an IP address, an optional hostname
//!   and the ports expected to be open or closed on it.
//! * A [`Service`] groups at most two targets under a name, one per [`Role`].

use std::collections::BTreeSet;
use std::fmt;
use std::net::IpAddr;

/// Which side of a service an endpoint represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    Public,
    /// Written as `Private` or `Internal` in the checklist.
    Internal,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Public => f.write_str("Public"),
            Role::Internal => f.write_str("Internal"),
        }
    }
}

/// One network endpoint to verify.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub service_name: String,
    pub role: Role,
    pub hostname: Option<String>,
    pub ip: IpAddr,
    /// Ports expected to be open.
    pub allowed_ports: BTreeSet<u16>,
    /// Ports expected to be closed.
    pub blocked_ports: BTreeSet<u16>,
}

impl Target {
    pub fn new(service_name: impl Into<String>, role: Role, ip: IpAddr) -> Self {
        Self {
            service_name: service_name.into(),
            role,
            hostname: None,
            ip,
            allowed_ports: BTreeSet::new(),
            blocked_ports: BTreeSet::new(),
        }
    }

    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    pub fn with_allowed(mut self, ports: impl IntoIterator<Item = u16>) -> Self {
        self.allowed_ports.extend(ports);
        self
    }

    pub fn with_blocked(mut self, ports: impl IntoIterator<Item = u16>) -> Self {
        self.blocked_ports.extend(ports);
        self
    }

    /// True if the port appears in either declared set.
    pub fn is_declared(&self, port: u16) -> bool {
        self.allowed_ports.contains(&port) || self.blocked_ports.contains(&port)
    }
}

/// A named group of up to two endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    pub name: String,
    pub public: Option<Target>,
    pub internal: Option<Target>,
}

impl Service {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            public: None,
            internal: None,
        }
    }

    /// Places the target in the slot matching its role, replacing any previous one.
    pub fn with_target(mut self, target: Target) -> Self {
        match target.role {
            Role::Public => self.public = Some(target),
            Role::Internal => self.internal = Some(target),
        }
        self
    }

    /// Present targets, Public before Internal.
    pub fn targets(&self) -> impl Iterator<Item = &Target> {
        self.public.iter().chain(self.internal.iter())
    }

    pub fn into_targets(self) -> impl Iterator<Item = Target> {
        self.public.into_iter().chain(self.internal)
    }

    pub fn is_empty(&self) -> bool {
        self.public.is_none() && self.internal.is_none()
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
