// chromedriver process management
//
// Spawns and reaps the chromedriver binary the WebDriver session talks to,
// so one process invocation is fully self-contained.

use std::process::Stdio;
use std::time::Duration;

use tokio::net::TcpStream;
use tokio::process::{Child, Command};

use crate::error::{Error, Result};

/// Port the managed chromedriver listens on (its own default).
pub const CHROMEDRIVER_PORT: u16 = 9515;

const READY_PROBE_ATTEMPTS: u32 = 50;
const READY_PROBE_INTERVAL: Duration = Duration::from_millis(100);

/// Manages the chromedriver child process lifecycle.
///
/// The child is spawned with `kill_on_drop`, so an early return cannot leak
/// the process; [`Chromedriver::shutdown`] is still the orderly path since
/// it reaps the child instead of leaving a zombie behind.
#[derive(Debug)]
pub struct Chromedriver {
    process: Child,
    url: String,
}

impl Chromedriver {
    /// Spawns `chromedriver` and waits until it accepts connections.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SessionStart`] if the binary cannot be spawned (not
    /// on the PATH), exits immediately (port already bound, incompatible
    /// Chrome), or never starts listening within the probe budget.
    pub async fn launch() -> Result<Self> {
        let mut process = Command::new("chromedriver")
            .arg(format!("--port={CHROMEDRIVER_PORT}"))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| Error::SessionStart(format!("failed to spawn chromedriver: {e}")))?;

        // Give it a moment to potentially fail
        tokio::time::sleep(Duration::from_millis(100)).await;
        match process.try_wait() {
            Ok(Some(status)) => {
                return Err(Error::SessionStart(format!(
                    "chromedriver exited immediately with status: {status}"
                )));
            }
            Ok(None) => {}
            Err(e) => {
                return Err(Error::SessionStart(format!(
                    "failed to check chromedriver status: {e}"
                )));
            }
        }

        wait_until_listening().await?;

        let url = format!("http://localhost:{CHROMEDRIVER_PORT}");
        tracing::debug!("chromedriver ready on {url}");
        Ok(Self { process, url })
    }

    /// WebDriver endpoint of the managed process.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Kills the child process and reaps it.
    pub async fn shutdown(mut self) -> Result<()> {
        tracing::debug!("shutting down chromedriver");
        self.process
            .kill()
            .await
            .map_err(|e| Error::Driver(format!("failed to kill chromedriver: {e}")))?;
        Ok(())
    }
}

async fn wait_until_listening() -> Result<()> {
    for _ in 0..READY_PROBE_ATTEMPTS {
        if TcpStream::connect(("127.0.0.1", CHROMEDRIVER_PORT))
            .await
            .is_ok()
        {
            return Ok(());
        }
        tokio::time::sleep(READY_PROBE_INTERVAL).await;
    }
    Err(Error::SessionStart(format!(
        "chromedriver did not start listening on port {CHROMEDRIVER_PORT}"
    )))
}
