pub mod check;

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser};
use hcheck_common::checklist::DEFAULT_CHECKLIST;
use hcheck_common::config::{Config, DEFAULT_CONCURRENCY};

#[derive(Parser, Debug)]
#[command(name = "hcheck")]
#[command(version)]
#[command(about = "Health checks for machines listed in a checklist.")]
#[command(after_help = "Checks DNS lookups, host and IP reachability, and port states.")]
pub struct CommandLine {
    /// Path of the checklist file
    #[arg(short = 'f', long = "file", value_name = "FILE", default_value = DEFAULT_CHECKLIST)]
    pub file: PathBuf,

    /// Check only these services from the checklist
    #[arg(long, value_name = "s1,s2,...")]
    pub service: Option<String>,

    /// Also scan the 1000 most popular TCP ports for unexpected open ones
    #[arg(long)]
    pub scan_popular: bool,

    /// Maximum number of endpoints checked at the same time
    #[arg(short = 'j', long, value_name = "N", default_value_t = DEFAULT_CONCURRENCY)]
    pub jobs: usize,

    /// Deadline for a single probe, in milliseconds
    #[arg(long = "timeout", value_name = "MS", default_value_t = 1_000)]
    pub timeout_ms: u64,

    /// More log output (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn config(&self) -> Config {
        Config {
            exhaustive: self.scan_popular,
            concurrency: self.jobs,
            probe_timeout: Duration::from_millis(self.timeout_ms),
        }
    }

    /// The `--service` list, unless it was left empty.
    pub fn selection(&self) -> Option<&str> {
        self.service.as_deref().filter(|names| !names.trim().is_empty())
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
