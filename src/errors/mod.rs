pub mod config;
pub mod lookup;

use actix_web::{HttpResponse, ResponseError, body::BoxBody, http::StatusCode};

use crate::models::responses::{ApiError, ApiResponse, None};

pub use config::ConfigError;
pub use lookup::LookupError;

#[derive(Debug, thiserror::Error)]
pub enum CheckerError {
    #[error("Resource not found")]
    NotFound,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    IO(#[from] std::io::Error),
}

impl ResponseError for CheckerError {
    fn status_code(&self) -> StatusCode {
        match self {
            CheckerError::NotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        let message = self.to_string();

        let error = ApiError {
            code: match self {
                CheckerError::NotFound => "resource_not_found_error",
                CheckerError::Config(..) => "configuration_error",
                _ => "internal_server_error",
            },
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
