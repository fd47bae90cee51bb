//! Fetch a page's HTML through an ordered list of CORS relays.
//!
//! Each relay gets one attempt bounded by a timeout. Non-success statuses,
//! transport errors and timeouts all fall through to the next relay.

use std::time::Duration;

use ahorro_core::PromoError;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::ACCEPT;
use tracing::{debug, warn};

pub const DEFAULT_RELAYS: [&str; 2] = ["https://corsproxy.io/?", "https://api.allorigins.win/raw?url="];

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Raw response from a single HTTP GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One HTTP GET. The seam tests use to stand in for the network.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpResponse>;
}

/// Anything that can produce a page's text for a URL.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_text(&self, url: &str) -> Result<String, PromoError>;
}

pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("appahorro/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse> {
        let resp = self.client.get(url).header(ACCEPT, "text/html").send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        Ok(HttpResponse { status, body })
    }
}

/// Relay wrapping: the escaped target goes last, after the relay's own prefix.
pub fn relay_url(relay: &str, target: &str) -> String {
    format!("{relay}{}", urlencoding::encode(target))
}

pub struct ProxyFetcher<T: Transport = ReqwestTransport> {
    transport: T,
    relays: Vec<String>,
    timeout: Duration,
}

impl<T: Transport> ProxyFetcher<T> {
    pub fn new(transport: T, relays: Vec<String>, timeout: Duration) -> Self {
        Self {
            transport,
            relays,
            timeout,
        }
    }

    async fn attempt(&self, request_url: &str) -> Result<String> {
        let resp = tokio::time::timeout(self.timeout, self.transport.get(request_url))
            .await
            .map_err(|_| anyhow::anyhow!("timed out after {:?}", self.timeout))??;
        if !resp.is_success() {
            anyhow::bail!("HTTP {}", resp.status);
        }
        Ok(resp.body)
    }
}

#[async_trait]
impl<T: Transport> PageSource for ProxyFetcher<T> {
    async fn fetch_text(&self, url: &str) -> Result<String, PromoError> {
        for relay in &self.relays {
            let request_url = relay_url(relay, url);
            match self.attempt(&request_url).await {
                Ok(body) => {
                    debug!("fetched {url} via {relay} ({} bytes)", body.len());
                    return Ok(body);
                }
                Err(e) => warn!("proxy {relay} failed for {url}: {e}"),
            }
        }
        Err(PromoError::FetchUnavailable {
            url: url.to_string(),
        })
    }
}
