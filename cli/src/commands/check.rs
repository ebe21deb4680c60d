use std::time::{Duration, Instant};

use colored::*;
use hcheck_common::checklist::Checklist;
use hcheck_common::config::Config;
use hcheck_common::network::target::Service;
use hcheck_common::ConfigError;
use hcheck_core::network;
use hcheck_core::report;
use hcheck_core::runner::{self, BatchReport};
use tracing::{Instrument, debug, info_span};

use crate::commands::CommandLine;
use crate::terminal::{colors, format, print, spinner};

/// Loads the checklist and narrows it down to the requested services.
///
/// Runs before anything is printed or probed.
pub fn load_services(commands: &CommandLine) -> Result<Vec<Service>, ConfigError> {
    let checklist = Checklist::load(&commands.file)?;
    match commands.selection() {
        Some(names) => checklist.select(names),
        None => Ok(checklist.into_services()),
    }
}

/// Verifies `services` and prints the report. Returns whether every service passed.
pub async fn check(services: Vec<Service>, cfg: &Config) -> anyhow::Result<bool> {
    if services.is_empty() {
        print::no_services();
        return Ok(true);
    }

    let total_targets = runner::count_targets(&services);
    let span = info_span!("check", services = services.len(), endpoints = total_targets);
    debug!("{} services, {total_targets} endpoints", services.len());

    let progress = spinner::start(total_targets);
    let start_time = Instant::now();
    let outcome = runner::run_batch(
        services,
        network::system_probes(cfg),
        cfg,
        Some(progress.callback()),
    )
    .instrument(span)
    .await;
    progress.finish();
    let report: BatchReport = outcome?;

    check_ends(&report, start_time.elapsed());
    Ok(report.passed())
}

fn check_ends(report: &BatchReport, total_time: Duration) {
    for line in report::render_batch(report) {
        print::print(&format::report_line(&line));
    }
    print_summary(report, total_time);
}

fn print_summary(report: &BatchReport, total_time: Duration) {
    let healthy = report.healthy_count();
    let total = report.services.len();
    let counts: ColoredString = if healthy == total {
        format!("{healthy}/{total} services healthy").bold().green()
    } else {
        format!("{healthy}/{total} services healthy").bold().red()
    };
    let elapsed: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();

    print::separator();
    print::print(&format!(
        "{} {}",
        counts,
        format!("in {elapsed}").color(colors::TEXT_DEFAULT)
    ));
}
