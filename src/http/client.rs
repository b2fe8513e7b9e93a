//! `reqwest` backed HTTP GET.

use std::error::Error as StdError;
use std::sync::Arc;

use async_trait::async_trait;

use super::{HttpGet, HttpResponse};
use crate::config::MAX_RESPONSE_BODY_SIZE;
use crate::error_handling::ProbeError;

/// HTTP client used for service probes and discovery fetches.
#[derive(Clone)]
pub struct ReqwestHttpClient {
    client: Arc<reqwest::Client>,
    max_body_size: usize,
}

impl ReqwestHttpClient {
    /// Wraps a configured client; bodies are cut at `MAX_RESPONSE_BODY_SIZE`.
    pub fn new(client: Arc<reqwest::Client>) -> Self {
        Self {
            client,
            max_body_size: MAX_RESPONSE_BODY_SIZE,
        }
    }

    /// Overrides the body size limit.
    pub fn with_max_body_size(mut self, max_body_size: usize) -> Self {
        self.max_body_size = max_body_size;
        self
    }
}

/// Whether the error chain shows that the host name did not resolve.
///
/// hyper reports resolver failures as "dns error", the system resolver as
/// "failed to lookup address information".
fn is_dns_failure(error: &reqwest::Error) -> bool {
    let mut source: Option<&(dyn StdError + 'static)> = error.source();
    while let Some(cause) = source {
        let msg = cause.to_string().to_lowercase();
        if msg.contains("dns error")
            || msg.contains("failed to lookup address")
            || msg.contains("name or service not known")
            || msg.contains("no such host")
        {
            return true;
        }
        source = cause.source();
    }
    false
}

/// Maps a reqwest failure onto the probe error taxonomy.
pub(crate) fn classify_reqwest_error(error: &reqwest::Error) -> ProbeError {
    if error.is_timeout() {
        ProbeError::Timeout
    } else if is_dns_failure(error) {
        ProbeError::DnsResolution(error.to_string())
    } else {
        ProbeError::Transport(error.to_string())
    }
}

#[async_trait]
impl HttpGet for ReqwestHttpClient {
    async fn get(&self, url: &str) -> Result<HttpResponse, ProbeError> {
        let mut response = self.client.get(url).send().await.map_err(|e| {
            let classified = classify_reqwest_error(&e);
            log::debug!("GET {url} failed: {classified}");
            classified
        })?;
        let status = response.status().as_u16();

        let mut body: Vec<u8> = Vec::new();
        loop {
            match response.chunk().await {
                Ok(Some(chunk)) => {
                    let remaining = self.max_body_size.saturating_sub(body.len());
                    if chunk.len() >= remaining {
                        body.extend_from_slice(&chunk[..remaining]);
                        log::debug!("Body of {url} truncated at {} bytes", self.max_body_size);
                        break;
                    }
                    body.extend_from_slice(&chunk);
                }
                Ok(None) => break,
                Err(e) => return Err(classify_reqwest_error(&e)),
            }
        }

        Ok(HttpResponse {
            status,
            body: String::from_utf8_lossy(&body).into_owned(),
        })
    }
}
