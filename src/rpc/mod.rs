//! Execution-layer JSON-RPC access.
//!
//! [`RpcTransport`] moves one request over the wire and hands back the raw
//! status and body. [`RpcClient`] builds the `eth_getTransactionCount`
//! envelope and turns whatever comes back into a count or a [`LookupError`].

pub mod http;

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::LookupError;
use crate::models::lookup::LookupResult;
use crate::models::rpc::{JsonRpcRequest, JsonRpcResponse, RawResponse};

pub use http::HttpTransport;

#[async_trait]
pub trait RpcTransport: Send + Sync {
    /// Sends exactly one request. Transport-level failures map to [`LookupError::Transport`].
    async fn post(&self, request: &JsonRpcRequest) -> Result<RawResponse, LookupError>;
}

/// Anything that can answer "how many transactions has this address sent".
#[async_trait]
pub trait TransactionCountSource: Send + Sync {
    async fn transaction_count(&self, address: &str) -> Result<u64, LookupError>;

    /// Same as [`transaction_count`](Self::transaction_count), folded into a [`LookupResult`].
    async fn lookup(&self, address: &str) -> LookupResult {
        LookupResult::from_outcome(address, self.transaction_count(address).await)
    }
}

#[derive(Debug, Clone)]
pub struct RpcClient<T = HttpTransport> {
    transport: T,
}

impl<T: RpcTransport> RpcClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

#[async_trait]
impl<T: RpcTransport> TransactionCountSource for RpcClient<T> {
    /// The address is assumed to be well-formed already and is sent as-is.
    #[tracing::instrument(skip(self))]
    async fn transaction_count(&self, address: &str) -> Result<u64, LookupError> {
        let request = JsonRpcRequest::transaction_count(address);
        let raw = self.transport.post(&request).await?;

        match interpret_transaction_count(&raw) {
            Ok(count) => {
                tracing::debug!("Transaction count is {count}");
                Ok(count)
            }
            Err(e) => {
                tracing::warn!("Lookup failed with status {}: {e}", raw.status);
                Err(e)
            }
        }
    }
}

/// Turns a raw `eth_getTransactionCount` response into a count.
///
/// Checks happen in order: HTTP status, JSON syntax, a truthy top-level
/// `error`, then the hex `result`.
pub fn interpret_transaction_count(raw: &RawResponse) -> Result<u64, LookupError> {
    if !raw.is_success() {
        return Err(LookupError::Http {
            status: raw.status,
            status_text: raw.status_text.clone(),
        });
    }

    let response: JsonRpcResponse =
        serde_json::from_str(&raw.body).map_err(LookupError::invalid_json)?;

    if let Some(error) = response.error.as_ref().filter(|e| is_truthy(e)) {
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default();
        return Err(LookupError::Rpc(message.to_string()));
    }

    match response.result {
        Some(Value::String(quantity)) => parse_quantity(&quantity),
        Some(other) => Err(LookupError::invalid_count(format!(
            "expected a hex string, got {other}"
        ))),
        None => Err(LookupError::invalid_count("missing result")),
    }
}

/// Parses a JSON-RPC quantity such as `0x2a`. The `0x` prefix is optional.
pub fn parse_quantity(quantity: &str) -> Result<u64, LookupError> {
    let digits = quantity
        .strip_prefix("0x")
        .or_else(|| quantity.strip_prefix("0X"))
        .unwrap_or(quantity);

    if digits.is_empty() {
        return Err(LookupError::invalid_count(format!("{quantity:?}")));
    }

    u64::from_str_radix(digits, 16)
        .map_err(|e| LookupError::invalid_count(format!("{quantity:?} ({e})")))
}

// `false`, `0`, `""` and `null` in the error slot do not count as an error.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(body: &str) -> RawResponse {
        RawResponse {
            status: 200,
            status_text: "OK".to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("0x2a").unwrap(), 42);
        assert_eq!(parse_quantity("0x0").unwrap(), 0);
        assert_eq!(parse_quantity("0XFF").unwrap(), 255);
        assert_eq!(parse_quantity("ff").unwrap(), 255);
        assert_eq!(parse_quantity("0xffffffffffffffff").unwrap(), u64::MAX);

        assert!(matches!(parse_quantity("0x"), Err(LookupError::Parse(_))));
        assert!(matches!(parse_quantity("0xzz"), Err(LookupError::Parse(_))));
        assert!(matches!(
            parse_quantity("0x10000000000000000"),
            Err(LookupError::Parse(_))
        ));
    }

    #[test]
    fn test_success() {
        let raw = ok(r#"{"jsonrpc":"2.0","id":1,"result":"0x2a"}"#);
        assert_eq!(interpret_transaction_count(&raw), Ok(42));
    }

    #[test]
    fn test_http_failure() {
        let raw = RawResponse {
            status: 503,
            status_text: "Service Unavailable".to_string(),
            body: r#"{"result":"0x1"}"#.to_string(),
        };
        let err = interpret_transaction_count(&raw).unwrap_err();
        assert_eq!(err.to_string(), "Network error: 503 Service Unavailable");
    }

    #[test]
    fn test_rpc_error() {
        let raw = ok(
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32000,"message":"address malformed"}}"#,
        );
        assert_eq!(
            interpret_transaction_count(&raw),
            Err(LookupError::Rpc("address malformed".to_string()))
        );

        let raw = ok(r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32000}}"#);
        assert_eq!(
            interpret_transaction_count(&raw).unwrap_err().to_string(),
            "RPC error occurred"
        );
    }

    #[test]
    fn test_falsy_error_is_ignored() {
        let raw = ok(r#"{"jsonrpc":"2.0","id":1,"error":null,"result":"0x3"}"#);
        assert_eq!(interpret_transaction_count(&raw), Ok(3));

        let raw = ok(r#"{"jsonrpc":"2.0","id":1,"error":false,"result":"0x3"}"#);
        assert_eq!(interpret_transaction_count(&raw), Ok(3));
    }

    #[test]
    fn test_bad_bodies() {
        let err = interpret_transaction_count(&ok("<html>gateway</html>")).unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse RPC response"));

        let err = interpret_transaction_count(&ok(r#"{"jsonrpc":"2.0","id":1}"#)).unwrap_err();
        assert!(
            err.to_string()
                .starts_with("Invalid transaction count in RPC response")
        );

        let err =
            interpret_transaction_count(&ok(r#"{"jsonrpc":"2.0","id":1,"result":42}"#)).unwrap_err();
        assert!(matches!(err, LookupError::Parse(_)));
    }
}
