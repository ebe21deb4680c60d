//! System implementations of the probe traits.
//!
//! * [`ping::SystemPinger`]: the `ping` binary.
//! * [`tcp::TcpConnectScanner`]: unprivileged TCP handshakes.
//! * [`dns::SystemResolver`]: the operating system's resolver.

use std::time::Duration;

use hcheck_common::config::Config;

use crate::probe::Probes;

pub mod dns;
pub mod ping;
pub mod tcp;

/// Name lookups often take longer than a connect, so they never get less than this.
const MIN_LOOKUP_TIMEOUT: Duration = Duration::from_secs(3);

/// Probes backed by the local machine, with deadlines taken from `cfg`.
pub fn system_probes(cfg: &Config) -> Probes {
    Probes::new(
        ping::SystemPinger::new(cfg.probe_timeout),
        tcp::TcpConnectScanner::new(cfg.probe_timeout),
        dns::SystemResolver::new(cfg.probe_timeout.max(MIN_LOOKUP_TIMEOUT)),
    )
}
