use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::warn;

use crate::probe::Pinger;

/// Extra time granted to the `ping` process beyond its own wait.
const PROCESS_GRACE: Duration = Duration::from_millis(500);

/// Pings through the system `ping` binary, one echo request per call.
#[derive(Debug, Clone)]
pub struct SystemPinger {
    timeout: Duration,
}

impl SystemPinger {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    fn wait_secs(&self) -> u64 {
        self.timeout.as_secs_f64().ceil().max(1.0) as u64
    }
}

#[async_trait]
impl Pinger for SystemPinger {
    async fn ping(&self, target: &str) -> bool {
        let wait = self.wait_secs();
        let mut command = Command::new("ping");
        command
            .args(ping_args(target, wait))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        match timeout(Duration::from_secs(wait) + PROCESS_GRACE, command.status()).await {
            Ok(Ok(status)) => status.success(),
            Ok(Err(e)) => {
                warn!("Could not run ping for {target}: {e}");
                false
            }
            Err(_elapsed) => false,
        }
    }
}

fn ping_args(target: &str, wait_secs: u64) -> Vec<String> {
    // BSD ping takes the overall deadline as -t, iputils takes the reply wait as -W.
    let wait_flag = if cfg!(target_os = "macos") { "-t" } else { "-W" };
    vec![
        "-c".to_string(),
        "1".to_string(),
        wait_flag.to_string(),
        wait_secs.to_string(),
        target.to_string(),
    ]
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
