use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

use crate::models::responses::{ApiError, ApiResponse, None};

pub const UNKNOWN_ERROR: &str = "Unknown error occurred";
pub const RPC_ERROR_FALLBACK: &str = "RPC error occurred";

/// Everything that can stop a lookup from producing a transaction count.
///
/// The `Display` output of each variant is the reason shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("Please enter a wallet address")]
    InputEmpty,

    #[error("Invalid Ethereum address format")]
    InputMalformed,

    #[error("{}", non_empty_or(.0, UNKNOWN_ERROR))]
    Transport(String),

    #[error("Network error: {status} {status_text}")]
    Http { status: u16, status_text: String },

    #[error("{0}")]
    Parse(String),

    #[error("{}", non_empty_or(.0, RPC_ERROR_FALLBACK))]
    Rpc(String),

    #[error("Failed to fetch transaction data")]
    Unexpected,
}

fn non_empty_or<'a>(message: &'a str, fallback: &'a str) -> &'a str {
    if message.is_empty() { fallback } else { message }
}

impl LookupError {
    pub fn invalid_json(detail: impl std::fmt::Display) -> Self {
        LookupError::Parse(format!("Failed to parse RPC response: {detail}"))
    }

    pub fn invalid_count(detail: impl std::fmt::Display) -> Self {
        LookupError::Parse(format!(
            "Invalid transaction count in RPC response: {detail}"
        ))
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            LookupError::InputEmpty => "missing_address",
            LookupError::InputMalformed => "invalid_address",
            LookupError::Transport(_) => "transport_error",
            LookupError::Http { .. } => "upstream_http_error",
            LookupError::Parse(_) => "upstream_parse_error",
            LookupError::Rpc(_) => "rpc_error",
            LookupError::Unexpected => "internal_server_error",
        }
    }
}

impl ResponseError for LookupError {
    fn status_code(&self) -> StatusCode {
        match self {
            LookupError::InputEmpty | LookupError::InputMalformed => StatusCode::BAD_REQUEST,
            LookupError::Transport(_)
            | LookupError::Http { .. }
            | LookupError::Parse(_)
            | LookupError::Rpc(_) => StatusCode::BAD_GATEWAY,
            LookupError::Unexpected => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = self.to_string();

        let error = ApiError {
            code: self.error_type(),
            message: &message,
        };

        let response: ApiResponse<'_, None> = ApiResponse {
            ok: false,
            error: Some(error),
            ..Default::default()
        };

        HttpResponse::build(self.status_code()).json(response)
    }
}
