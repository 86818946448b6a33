use std::fmt::Display;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use super::RpcTransport;
use crate::errors::LookupError;
use crate::models::rpc::{JsonRpcRequest, RawResponse};

/// Posts JSON-RPC envelopes to a single endpoint over HTTP(S).
///
/// The client is used with reqwest's defaults, so there is no request timeout
/// beyond what the OS and TLS stack impose.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: Url,
}

impl HttpTransport {
    pub fn new(endpoint: Url) -> Self {
        Self {
            client: Client::new(),
            endpoint,
        }
    }
}

#[async_trait]
impl RpcTransport for HttpTransport {
    async fn post(&self, request: &JsonRpcRequest) -> Result<RawResponse, LookupError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Transport error calling {}: {e}", self.endpoint);
                LookupError::Transport(e.to_string())
            })?;

        let status = response.status();
        let body = response.text().await;

        raw_response(status, body)
    }
}

/// Pairs a status with its body. A body that fails to read only matters when
/// the status was a success; otherwise the status itself is the failure.
fn raw_response<E: Display>(
    status: StatusCode,
    body: Result<String, E>,
) -> Result<RawResponse, LookupError> {
    let body = match body {
        Ok(body) => body,
        Err(e) if status.is_success() => return Err(LookupError::Transport(e.to_string())),
        Err(e) => {
            tracing::debug!("Ignoring unreadable body of a {status} response: {e}");
            String::new()
        }
    };

    Ok(RawResponse {
        status: status.as_u16(),
        status_text: status.canonical_reason().unwrap_or_default().to_string(),
        body,
    })
}
