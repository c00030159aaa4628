use std::path::PathBuf;

use cookie::Cookie;
use fantoccini::{Client, ClientBuilder};
use serde_json::json;
use tracing::{debug, warn};

use driver::DriverProcess;
use logs::{GetLog, LogEntry};

pub mod driver;
pub mod error;
pub mod login;
pub mod logs;

pub use error::SessionError;
pub use login::{LoginWait, wait_for_login};

pub struct SessionConfig {
    pub driver_path: PathBuf,
    pub headless: bool,
    /// Enable the Chrome performance log so network traffic can be inspected.
    pub capture_network: bool,
}

/// An automated browser plus the webdriver process that controls it.
///
/// The session is the one long-lived external resource of a run; call
/// [`close`] on every exit path. The driver child is additionally
/// kill-on-drop, so failures before `close` do not leak it.
///
/// [`close`]: BrowserSession::close
pub struct BrowserSession {
    client: Client,
    driver: DriverProcess,
}

impl BrowserSession {
    pub async fn launch(config: &SessionConfig) -> Result<Self, SessionError> {
        let driver = DriverProcess::spawn(&config.driver_path).await?;

        let mut chrome_args = vec!["--disable-gpu", "--no-first-run", "--autoplay-policy=no-user-gesture-required"];
        if config.headless {
            chrome_args.push("--headless=new");
        }

        let mut caps = serde_json::map::Map::new();
        caps.insert("goog:chromeOptions".to_string(), json!({ "args": chrome_args }));
        if config.capture_network {
            caps.insert("goog:loggingPrefs".to_string(), json!({ "performance": "ALL" }));
        }

        let client = ClientBuilder::native()
            .capabilities(caps)
            .connect(&driver.endpoint())
            .await?;

        debug!("browser session established at {}", driver.endpoint());
        Ok(Self { client, driver })
    }

    pub async fn goto(&self, url: &str) -> Result<(), SessionError> {
        Ok(self.client.goto(url).await?)
    }

    /// All cookies of the current browsing context.
    pub async fn cookies(&self) -> Result<Vec<Cookie<'static>>, SessionError> {
        Ok(self.client.get_all_cookies().await?)
    }

    /// Drain the performance log and return the resource URLs seen since the
    /// last call. Requires `capture_network`.
    pub async fn drain_resource_urls(&self) -> Result<Vec<String>, SessionError> {
        let value = self.client.issue_cmd(GetLog::performance()).await?;
        let entries: Vec<LogEntry> =
            serde_json::from_value(value).map_err(|e| SessionError::LogParse(e.to_string()))?;
        Ok(logs::resource_urls(&entries))
    }

    /// Quit the browser and reap the webdriver process.
    pub async fn close(self) -> Result<(), SessionError> {
        let result = self.client.close().await;
        self.driver.shutdown().await;
        if let Err(ref e) = result {
            warn!("browser did not close cleanly: {}", e);
        }
        Ok(result?)
    }
}
