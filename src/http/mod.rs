//! HTTP GET capability.
//!
//! Probes and discovery fetches go through [`HttpGet`], so checks can be run
//! against a deterministic fake. The status code of a response is data and
//! never an error.

mod client;

use async_trait::async_trait;

use crate::error_handling::ProbeError;

pub use client::ReqwestHttpClient;

/// Status and (possibly truncated) body of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Body decoded as UTF-8 (lossy)
    pub body: String,
}

/// Issues GET requests.
#[async_trait]
pub trait HttpGet: Send + Sync {
    /// Fetches `url`. Fails only when no response was received.
    async fn get(&self, url: &str) -> Result<HttpResponse, ProbeError>;
}
