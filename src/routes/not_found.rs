use crate::errors::CheckerError;

pub async fn not_found() -> Result<actix_web::HttpResponse, CheckerError> {
    Err(CheckerError::NotFound)
}
