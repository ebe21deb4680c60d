//! # Port Specifications
//!
//! Turns human-written port lists such as `"22,80,8000-8010"` into concrete
//! port sets, and defines the state a single probed port can be in.

use std::collections::BTreeSet;
use std::fmt;

use crate::error::ConfigError;

/// Observed state of a single TCP port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortState {
    Open,
    Closed,
    /// No answer within the probe timeout.
    Filtered,
}

impl PortState {
    pub fn is_open(self) -> bool {
        matches!(self, PortState::Open)
    }
}

impl fmt::Display for PortState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PortState::Open => "open",
            PortState::Closed => "closed",
            PortState::Filtered => "filtered",
        };
        f.write_str(s)
    }
}

/// Parses a comma-separated port specification into the set of ports it covers.
///
/// Supported tokens:
/// * **Single**: `"80"`.
/// * **Range**: `"8000-8010"`, both ends inclusive.
///
/// Blank input and empty tokens (`"80,,443"`) are skipped. Anything else that
/// does not describe ports, including reversed ranges, is rejected.
pub fn parse_ports(spec: &str) -> Result<BTreeSet<u16>, ConfigError> {
    let mut ports = BTreeSet::new();

    for token in spec.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }

        let invalid = || ConfigError::InvalidPortSpec {
            spec: spec.to_string(),
            token: token.to_string(),
        };

        match token.split_once('-') {
            Some((start, end)) => {
                let start: u16 = start.trim().parse().map_err(|_| invalid())?;
                let end: u16 = end.trim().parse().map_err(|_| invalid())?;
                if start > end {
                    return Err(invalid());
                }
                ports.extend(start..=end);
            }
            None => {
                let port: u16 = token.parse().map_err(|_| invalid())?;
                ports.insert(port);
            }
        }
    }

    Ok(ports)
}

/// Joins ports as `"22, 80, 443"`, in the order given.
pub fn join_ports(ports: &[u16]) -> String {
    ports
        .iter()
        .map(|port| port.to_string())
        .collect::<Vec<String>>()
        .join(", ")
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
