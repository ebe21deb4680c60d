use std::time::Duration;

use colored::*;
use console::Term;
use hcheck_core::runner::ProgressCallback;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

const TICK: Duration = Duration::from_millis(100);

/// Spinner shown on stderr while endpoints are being checked.
pub struct CheckSpinner {
    spinner: ProgressBar,
    total: usize,
}

impl CheckSpinner {
    /// Hands out a callback that advances the spinner as endpoints finish.
    pub fn callback(&self) -> ProgressCallback {
        let spinner = self.spinner.clone();
        let total = self.total;
        Box::new(move |done| spinner.set_message(progress_message(done, total)))
    }

    pub fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

pub fn start(total: usize) -> CheckSpinner {
    let target = if Term::stderr().is_term() {
        ProgressDrawTarget::stderr()
    } else {
        ProgressDrawTarget::hidden()
    };
    let spinner = ProgressBar::with_draw_target(None, target);

    let style = ProgressStyle::with_template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&[
            "▁▁▁▁▁",
            "▁▂▂▂▁",
            "▁▄▂▄▁",
            "▂▄▆▄▂",
            "▄▆█▆▄",
            "▂▄▆▄▂",
            "▁▄▂▄▁",
            "▁▂▂▂▁",
        ]);

    spinner.set_style(style);
    spinner.set_message(progress_message(0, total));
    spinner.enable_steady_tick(TICK);

    CheckSpinner { spinner, total }
}

fn progress_message(done: usize, total: usize) -> String {
    format!(
        "Checked {}/{} endpoints...",
        done.to_string().green().bold(),
        total
    )
}
