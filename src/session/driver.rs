use std::net::TcpListener;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::{Child, Command};
use tracing::debug;

use super::error::SessionError;

const READY_ATTEMPTS: u32 = 40;
const READY_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// A chromedriver child process bound to a free loopback port.
///
/// The child is spawned with kill-on-drop so an early failure anywhere in the
/// run cannot leak the process; the happy path still calls [`shutdown`] to
/// reap it explicitly.
///
/// [`shutdown`]: DriverProcess::shutdown
pub struct DriverProcess {
    child: Child,
    port: u16,
}

impl DriverProcess {
    pub async fn spawn(binary: &Path) -> Result<Self, SessionError> {
        let port = free_port()?;

        let child = Command::new(binary)
            .arg(format!("--port={}", port))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| SessionError::DriverSpawn {
                path: binary.to_path_buf(),
                source,
            })?;

        let process = Self { child, port };
        process.wait_ready().await?;
        debug!("webdriver ready on port {}", port);
        Ok(process)
    }

    pub fn endpoint(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    async fn wait_ready(&self) -> Result<(), SessionError> {
        let status_url = format!("{}/status", self.endpoint());
        for _ in 0..READY_ATTEMPTS {
            if let Ok(resp) = reqwest::get(&status_url).await {
                if resp.status().is_success() {
                    return Ok(());
                }
            }
            tokio::time::sleep(READY_POLL_INTERVAL).await;
        }
        Err(SessionError::DriverUnresponsive(self.port))
    }

    pub async fn shutdown(mut self) {
        if let Err(e) = self.child.kill().await {
            debug!("webdriver already gone: {}", e);
        }
    }
}

fn free_port() -> std::io::Result<u16> {
    // Port 0 lets the OS pick; the listener must be gone before chromedriver binds.
    let listener = TcpListener::bind(("127.0.0.1", 0))?;
    Ok(listener.local_addr()?.port())
}
