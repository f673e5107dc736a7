//! random.org JSON-RPC client

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use sheetroll_domain::DrawRange;

use crate::infrastructure::ports::{RandomSourceError, RemoteRandomPort};

/// Default random.org JSON-RPC endpoint.
pub const DEFAULT_RANDOM_ORG_URL: &str = "https://api.random.org/json-rpc/4/invoke";

/// Default request timeout in milliseconds.
pub const DEFAULT_RANDOM_ORG_TIMEOUT_MS: u64 = 5000;

/// Client for random.org's `generateIntegers` method.
pub struct RandomOrgClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    next_id: AtomicU64,
}

impl RandomOrgClient {
    pub fn new(endpoint: &str, api_key: Option<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            endpoint: endpoint.to_string(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Create client from environment variables.
    ///
    /// Uses `RANDOM_ORG_KEY`, `RANDOM_ORG_URL` and `RANDOM_ORG_TIMEOUT_MS`.
    /// Without a key every call fails with `MissingCredential`.
    pub fn from_env() -> Self {
        let endpoint = std::env::var("RANDOM_ORG_URL")
            .unwrap_or_else(|_| DEFAULT_RANDOM_ORG_URL.to_string());
        let api_key = std::env::var("RANDOM_ORG_KEY").ok();
        let timeout_ms = std::env::var("RANDOM_ORG_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_RANDOM_ORG_TIMEOUT_MS);
        Self::new(&endpoint, api_key, Duration::from_millis(timeout_ms))
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl RemoteRandomPort for RandomOrgClient {
    async fn generate(
        &self,
        range: DrawRange,
        count: u32,
    ) -> Result<Vec<i64>, RandomSourceError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(RandomSourceError::MissingCredential)?;

        let request = RpcRequest {
            jsonrpc: "2.0",
            method: "generateIntegers",
            params: GenerateIntegersParams {
                api_key,
                n: count,
                min: range.min(),
                max: range.max(),
                replacement: true,
            },
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| RandomSourceError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|e| e.to_string());
            return Err(RandomSourceError::Service {
                code: i64::from(status.as_u16()),
                message,
            });
        }

        let body: RpcResponse = response
            .json()
            .await
            .map_err(|e| RandomSourceError::InvalidResponse(e.to_string()))?;

        if let Some(error) = body.error {
            return Err(RandomSourceError::Service {
                code: error.code,
                message: error.message,
            });
        }

        let values = body
            .result
            .map(|result| result.random.data)
            .ok_or_else(|| RandomSourceError::InvalidResponse("missing result".into()))?;

        tracing::debug!(count, min = range.min(), max = range.max(), "random.org draw");
        Ok(values)
    }
}

// =============================================================================
// JSON-RPC wire types
// =============================================================================

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    method: &'static str,
    params: GenerateIntegersParams<'a>,
    id: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateIntegersParams<'a> {
    api_key: &'a str,
    n: u32,
    min: i64,
    max: i64,
    replacement: bool,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<GenerateIntegersResult>,
    #[serde(default)]
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct GenerateIntegersResult {
    random: RandomData,
}

#[derive(Debug, Deserialize)]
struct RandomData {
    data: Vec<i64>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}
