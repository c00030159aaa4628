use std::io::Read;
use std::sync::Arc;
use std::time::Duration;

use cookie::Cookie;
use cookie_store::CookieStore;
use flate2::read::GzDecoder;
use reqwest::header::{ACCEPT, ACCEPT_ENCODING, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::{Client, ClientBuilder, Response, Url};
use reqwest_cookie_store::CookieStoreMutex;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::error::ApiError;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/135.0.0.0 Safari/537.36";

/// HTTP client that carries the session cookies exported from the browser.
#[derive(Debug, Clone)]
pub struct EchoClient {
    pub inner: Client,
    pub cookie_store: Arc<CookieStoreMutex>,
}

impl EchoClient {
    pub fn new() -> Result<Self, ApiError> {
        let cookie_store = Arc::new(CookieStoreMutex::new(CookieStore::default()));

        let inner = ClientBuilder::new()
            .connect_timeout(Duration::from_secs(10))
            .cookie_provider(Arc::clone(&cookie_store))
            .default_headers(Self::default_headers())
            .build()?;

        Ok(Self {
            inner,
            cookie_store,
        })
    }

    fn default_headers() -> reqwest::header::HeaderMap {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json, text/html;q=0.9, */*;q=0.8"),
        );
        headers.insert(
            ACCEPT_LANGUAGE,
            reqwest::header::HeaderValue::from_static("en-US,en;q=0.9"),
        );
        headers.insert(
            ACCEPT_ENCODING,
            reqwest::header::HeaderValue::from_static("gzip, deflate"),
        );
        headers.insert(
            USER_AGENT,
            reqwest::header::HeaderValue::from_static(BROWSER_USER_AGENT),
        );
        headers
    }

    /// Rebuild cookies captured by the browser session into the local store so
    /// that every subsequent request carries the authenticated session.
    pub fn import_browser_cookies(
        &self,
        cookies: &[Cookie<'static>],
        base_url: &Url,
    ) -> Result<usize, ApiError> {
        let host = base_url
            .host_str()
            .ok_or_else(|| ApiError::CookieStore("base URL has no host".into()))?
            .to_string();

        let mut store = self
            .cookie_store
            .lock()
            .map_err(|e| ApiError::CookieStore(e.to_string()))?;

        let mut imported = 0;
        for cookie in cookies {
            let raw = Cookie::build((cookie.name().to_string(), cookie.value().to_string()))
                .domain(cookie.domain().unwrap_or(&host).trim_start_matches('.').to_string())
                .path(cookie.path().unwrap_or("/").to_string())
                .build();

            match store.insert_raw(&raw, base_url) {
                Ok(_) => imported += 1,
                Err(e) => warn!("skipping cookie {}: {}", cookie.name(), e),
            }
        }

        debug!("imported {} browser cookies for {}", imported, host);
        Ok(imported)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let resp = self.inner.get(url).send().await?;
        Self::handle_response(resp).await
    }

    pub async fn get_raw_response(&self, url: &str) -> Result<Response, ApiError> {
        Ok(self.inner.get(url).send().await?)
    }

    async fn handle_response<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
        let status = resp.status();
        let url = resp.url().to_string();

        match status.as_u16() {
            401 | 403 => return Err(ApiError::AuthRequired(status.as_u16())),
            code if !status.is_success() => return Err(ApiError::HttpStatus(code, url)),
            _ => {}
        }

        let raw_body = resp.bytes().await?;

        // The Accept-Encoding header is set by hand, so a gzip body reaches us
        // compressed and has to be inflated here.
        if let Ok(text) = std::str::from_utf8(&raw_body) {
            serde_json::from_str(text).map_err(|e| {
                ApiError::InvalidResponse(format!("{} (body: {:.200})", e, text))
            })
        } else {
            let mut gz = GzDecoder::new(&raw_body[..]);
            let mut decompressed = Vec::new();
            gz.read_to_end(&mut decompressed)
                .map_err(|e| ApiError::InvalidResponse(format!("gzip decode failed: {}", e)))?;
            Ok(serde_json::from_slice(&decompressed)?)
        }
    }
}
