mod commands;
mod terminal;

use std::process::ExitCode;

use commands::{CommandLine, check};
use terminal::{logging, print};

const TITLE: &str = "Diagnosis";

const EXIT_HEALTHY: u8 = 0;
/// Some service failed a check, or the run itself broke.
const EXIT_UNHEALTHY: u8 = 1;
/// The checklist or the service selection is unusable; nothing was probed.
const EXIT_CONFIG: u8 = 2;

/// How a run ended, as far as the exit status is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Healthy,
    Unhealthy,
    Failed,
    BadConfig,
}

impl Outcome {
    fn of_check(result: &anyhow::Result<bool>) -> Self {
        match result {
            Ok(true) => Outcome::Healthy,
            Ok(false) => Outcome::Unhealthy,
            Err(_) => Outcome::Failed,
        }
    }
}

fn exit_code(outcome: Outcome) -> u8 {
    match outcome {
        Outcome::Healthy => EXIT_HEALTHY,
        Outcome::Unhealthy | Outcome::Failed => EXIT_UNHEALTHY,
        Outcome::BadConfig => EXIT_CONFIG,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let commands = CommandLine::parse_args();

    if commands.no_color {
        colored::control::set_override(false);
    }
    if let Err(e) = logging::init_logging(commands.verbose) {
        print::error(&e);
    }

    let services = match check::load_services(&commands) {
        Ok(services) => services,
        Err(e) => {
            print::error(&e);
            return ExitCode::from(exit_code(Outcome::BadConfig));
        }
    };

    print::title(TITLE);

    let result = check::check(services, &commands.config()).await;
    if let Err(e) = &result {
        print::error(&format!("{e:#}"));
    }
    ExitCode::from(exit_code(Outcome::of_check(&result)))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
