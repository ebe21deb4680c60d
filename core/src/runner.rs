//! # Batch Runner
//!
//! Verifies a whole list of services. Targets run as independent tasks with a
//! bound on how many are in flight; results are collected in declaration
//! order (service order, Public before Internal) no matter which task
//! finishes first, so the report never depends on network timing.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::stream::{self, StreamExt};
use hcheck_common::config::Config;
use hcheck_common::network::target::{Service, Target};
use tokio::task::JoinError;
use tracing::debug;

use crate::probe::Probes;
use crate::service::{ServiceReport, TargetReport};
use crate::verifier::EndpointVerifier;

pub type ProgressCallback = Box<dyn Fn(usize) + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("verification of {service} ({role}) aborted: {source}")]
    TaskFailed {
        service: String,
        role: String,
        #[source]
        source: JoinError,
    },
}

/// Outcome of a batch, services in the order they were given.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BatchReport {
    pub services: Vec<ServiceReport>,
}

impl BatchReport {
    /// True when every service passed. An empty batch passes.
    pub fn passed(&self) -> bool {
        self.services.iter().all(ServiceReport::passed)
    }

    pub fn healthy_count(&self) -> usize {
        self.services.iter().filter(|s| s.passed()).count()
    }

    pub fn target_count(&self) -> usize {
        self.services.iter().map(|s| s.targets().count()).sum()
    }
}

/// Number of targets a batch over `services` will verify.
pub fn count_targets(services: &[Service]) -> usize {
    services.iter().map(|s| s.targets().count()).sum()
}

/// Verifies every target of every service.
///
/// At most `cfg.concurrency` targets are verified at the same time. The
/// optional callback receives the number of finished targets after each one
/// completes.
pub async fn run_batch(
    services: Vec<Service>,
    probes: Probes,
    cfg: &Config,
    on_target_done: Option<ProgressCallback>,
) -> Result<BatchReport, BatchError> {
    let verifier = Arc::new(EndpointVerifier::new(probes, cfg.exhaustive));
    let callback: Option<Arc<dyn Fn(usize) + Send + Sync>> = on_target_done.map(Arc::from);
    let finished = Arc::new(AtomicUsize::new(0));

    let mut layout: Vec<(String, usize)> = Vec::with_capacity(services.len());
    let mut slots: Vec<Target> = Vec::new();
    for service in services {
        let name = service.name.clone();
        let before = slots.len();
        slots.extend(service.into_targets());
        layout.push((name, slots.len() - before));
    }

    debug!(
        "Verifying {} targets across {} services, {} at a time",
        slots.len(),
        layout.len(),
        cfg.effective_concurrency()
    );

    let handles = slots.into_iter().map(|target| {
        let verifier = verifier.clone();
        let finished = finished.clone();
        let callback = callback.clone();
        let service = target.service_name.clone();
        let role = target.role.to_string();

        let handle = tokio::spawn(async move {
            let result = verifier.verify(&target).await;
            let count = finished.fetch_add(1, Ordering::Relaxed) + 1;
            if let Some(cb) = &callback {
                cb(count);
            }
            TargetReport { target, result }
        });

        async move {
            handle
                .await
                .map_err(|source| BatchError::TaskFailed { service, role, source })
        }
    });

    let reports: Vec<Result<TargetReport, BatchError>> = stream::iter(handles)
        .buffered(cfg.effective_concurrency())
        .collect()
        .await;

    let mut reports = reports.into_iter();
    let mut services = Vec::with_capacity(layout.len());
    for (name, count) in layout {
        let owned = reports.by_ref().take(count).collect::<Result<Vec<_>, _>>()?;
        services.push(ServiceReport::from_reports(name, owned));
    }

    Ok(BatchReport { services })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
