//! # Service Aggregation
//!
//! A service is healthy when every endpoint it declares is healthy. A role
//! that is not declared does not count against it, so a service without any
//! endpoint is trivially healthy.

use hcheck_common::network::target::{Role, Service, Target};

use crate::verifier::{EndpointVerifier, VerificationResult};

/// A target together with what verifying it found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetReport {
    pub target: Target,
    pub result: VerificationResult,
}

impl TargetReport {
    pub fn passed(&self) -> bool {
        self.result.success()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceReport {
    pub name: String,
    pub public: Option<TargetReport>,
    pub internal: Option<TargetReport>,
}

impl ServiceReport {
    /// Files each report under its target's role. A later report for the same
    /// role replaces the earlier one.
    pub fn from_reports(name: impl Into<String>, reports: impl IntoIterator<Item = TargetReport>) -> Self {
        let mut service = Self {
            name: name.into(),
            public: None,
            internal: None,
        };
        for report in reports {
            match report.target.role {
                Role::Public => service.public = Some(report),
                Role::Internal => service.internal = Some(report),
            }
        }
        service
    }

    pub fn passed(&self) -> bool {
        self.targets().all(TargetReport::passed)
    }

    /// Present reports, Public before Internal.
    pub fn targets(&self) -> impl Iterator<Item = &TargetReport> {
        self.public.iter().chain(self.internal.iter())
    }
}

/// Verifies every endpoint of `service`, Public first.
///
/// Nothing is cached: every call probes the live network again.
pub async fn verify_service(service: &Service, verifier: &EndpointVerifier) -> ServiceReport {
    let mut reports = Vec::with_capacity(2);
    for target in service.targets() {
        let result = verifier.verify(target).await;
        reports.push(TargetReport {
            target: target.clone(),
            result,
        });
    }
    ServiceReport::from_reports(service.name.clone(), reports)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
