use fantoccini::wd::WebDriverCompatibleCommand;
use serde::Deserialize;

/// WebDriver `Get Log` command. Not part of the W3C standard, but chromedriver
/// serves it on the Selenium-compatible `/se/log` endpoint, and it is the only
/// way to read the performance log that `goog:loggingPrefs` enables.
#[derive(Debug, Clone)]
pub struct GetLog {
    log_type: &'static str,
}

impl GetLog {
    pub fn performance() -> Self {
        Self {
            log_type: "performance",
        }
    }
}

impl WebDriverCompatibleCommand for GetLog {
    fn endpoint(
        &self,
        base_url: &url::Url,
        session_id: Option<&str>,
    ) -> Result<url::Url, url::ParseError> {
        base_url.join(&format!("session/{}/se/log", session_id.unwrap_or_default()))
    }

    fn method_and_body(&self, _request_url: &url::Url) -> (http::Method, Option<String>) {
        (
            http::Method::POST,
            Some(serde_json::json!({ "type": self.log_type }).to_string()),
        )
    }
}

/// One entry of the browser log; `message` is a JSON-encoded DevTools event.
#[derive(Debug, Deserialize)]
pub struct LogEntry {
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct DevtoolsEnvelope {
    message: DevtoolsMessage,
}

#[derive(Debug, Deserialize)]
struct DevtoolsMessage {
    method: String,
    #[serde(default)]
    params: serde_json::Value,
}

/// Resource URLs seen by the network tracker, in log order.
pub fn resource_urls(entries: &[LogEntry]) -> Vec<String> {
    entries
        .iter()
        .filter_map(|entry| resource_url(&entry.message))
        .collect()
}

pub fn resource_url(message: &str) -> Option<String> {
    let envelope: DevtoolsEnvelope = serde_json::from_str(message).ok()?;
    let inner = envelope.message;

    let url = match inner.method.as_str() {
        "Network.responseReceived" => inner.params.get("response")?.get("url")?,
        "Network.requestWillBeSent" => inner.params.get("request")?.get("url")?,
        _ => return None,
    };
    url.as_str().map(str::to_string)
}
