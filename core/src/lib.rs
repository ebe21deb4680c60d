//! # hcheck core
//!
//! The endpoint verification engine.
//!
//! * **[`probe`]**: traits for ping, port and DNS probes. The engine only talks
//!   to the network through these.
//! * **[`network`]**: the system implementations of those traits.
//! * **[`verifier`]**: checks one target and accumulates what went wrong.
//! * **[`service`]**: folds target verdicts into a service verdict.
//! * **[`runner`]**: verifies many services concurrently, in declaration order.
//! * **[`report`]**: renders results as report lines.

pub mod network;
pub mod probe;
pub mod report;
pub mod runner;
pub mod service;
pub mod verifier;

pub use probe::Probes;
pub use runner::{BatchReport, run_batch};
pub use verifier::{EndpointVerifier, VerificationResult};
