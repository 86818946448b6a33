use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse<'a, T: Serialize> {
    pub ok: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError<'a>>,
}

/// A struct with nothing, used as a default placeholder
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct None {}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiError<'a> {
    pub code: &'a str,
    pub message: &'a str,
}

impl<'a, T: Serialize> Default for ApiResponse<'a, T> {
    fn default() -> Self {
        Self {
            ok: true,
            data: None,
            error: None,
        }
    }
}
