use serde::Serialize;

use crate::errors::LookupError;

/// Outcome of one submit attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum LookupResult {
    Success { address: String, count: u64 },
    Failure { address: String, reason: String },
}

impl LookupResult {
    pub fn failure(address: impl Into<String>, error: &LookupError) -> Self {
        LookupResult::Failure {
            address: address.into(),
            reason: error.to_string(),
        }
    }

    pub fn from_outcome(address: impl Into<String>, outcome: Result<u64, LookupError>) -> Self {
        let address = address.into();
        match outcome {
            Ok(count) => LookupResult::Success { address, count },
            Err(e) => LookupResult::failure(address, &e),
        }
    }

    pub fn address(&self) -> &str {
        match self {
            LookupResult::Success { address, .. } | LookupResult::Failure { address, .. } => {
                address
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, LookupResult::Success { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionCountJson {
    pub address: String,
    pub count: u64,
    #[serde(rename = "explorerUrl")]
    pub explorer_url: String,
    #[serde(rename = "checkedAt")]
    pub checked_at: chrono::DateTime<chrono::Utc>,
}
