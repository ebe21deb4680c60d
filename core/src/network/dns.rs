use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use hickory_resolver::TokioAsyncResolver;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::error::ResolveErrorKind;
use hickory_resolver::system_conf::read_system_conf;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::probe::{AddressFamily, ResolveError, Resolver};

/// Resolves through the name servers and hosts file the system is configured
/// with, asking only for the record type of the declared address.
#[derive(Clone)]
pub struct SystemResolver {
    resolver: TokioAsyncResolver,
    timeout: Duration,
}

impl SystemResolver {
    /// Falls back to the resolver's public defaults when the system
    /// configuration cannot be read.
    pub fn new(timeout: Duration) -> Self {
        let (config, opts) = read_system_conf().unwrap_or_else(|e| {
            warn!("Could not read the system resolver configuration, using defaults: {e}");
            (ResolverConfig::default(), ResolverOpts::default())
        });
        Self::with_config(config, opts, timeout)
    }

    pub fn with_config(config: ResolverConfig, mut opts: ResolverOpts, timeout: Duration) -> Self {
        opts.timeout = timeout;
        opts.attempts = 1;
        Self {
            resolver: TokioAsyncResolver::tokio(config, opts),
            timeout,
        }
    }

    async fn lookup(
        &self,
        hostname: &str,
        family: AddressFamily,
    ) -> Result<Vec<IpAddr>, ResolveError> {
        let answers: Vec<IpAddr> = match family {
            AddressFamily::V4 => self
                .resolver
                .ipv4_lookup(hostname)
                .await
                .map_err(|e| classify(e.kind()))?
                .iter()
                .map(|a| IpAddr::V4(a.0))
                .collect(),
            AddressFamily::V6 => self
                .resolver
                .ipv6_lookup(hostname)
                .await
                .map_err(|e| classify(e.kind()))?
                .iter()
                .map(|aaaa| IpAddr::V6(aaaa.0))
                .collect(),
        };

        let mut ips: Vec<IpAddr> = Vec::with_capacity(answers.len());
        for ip in answers {
            if !ips.contains(&ip) {
                ips.push(ip);
            }
        }
        Ok(ips)
    }
}

#[async_trait]
impl Resolver for SystemResolver {
    async fn resolve_host(
        &self,
        hostname: &str,
        family: AddressFamily,
    ) -> Result<Vec<IpAddr>, ResolveError> {
        if let Ok(literal) = hostname.parse::<IpAddr>() {
            return Ok(vec![literal]);
        }

        let ips = match timeout(self.timeout, self.lookup(hostname, family)).await {
            Ok(answer) => answer?,
            Err(_elapsed) => {
                return Err(ResolveError::Lookup(format!(
                    "no answer within {}ms",
                    self.timeout.as_millis()
                )));
            }
        };
        debug!("{hostname} resolved to {ips:?} ({family:?})");

        if ips.is_empty() {
            return Err(ResolveError::NameNotFound);
        }
        Ok(ips)
    }
}

impl std::fmt::Debug for SystemResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemResolver")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// NXDOMAIN and an empty answer for the requested type both mean the name
/// does not exist as far as the check is concerned.
fn classify(kind: &ResolveErrorKind) -> ResolveError {
    match kind {
        ResolveErrorKind::NoRecordsFound { .. } => ResolveError::NameNotFound,
        other => ResolveError::Lookup(other.to_string()),
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
