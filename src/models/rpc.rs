use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const JSONRPC_VERSION: &str = "2.0";
pub const GET_TRANSACTION_COUNT: &str = "eth_getTransactionCount";
pub const LATEST_BLOCK: &str = "latest";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    pub params: Vec<Value>,
    pub id: u64,
}

impl JsonRpcRequest {
    /// `eth_getTransactionCount` for `address` at the latest block, always with id 1.
    pub fn transaction_count(address: &str) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: GET_TRANSACTION_COUNT.to_string(),
            params: vec![
                Value::String(address.to_string()),
                Value::String(LATEST_BLOCK.to_string()),
            ],
            id: 1,
        }
    }
}

/// Only the fields the checker reads. `error: null` deserializes to `None`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<Value>,
}

/// A raw HTTP exchange, before any JSON-RPC interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
