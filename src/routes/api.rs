use actix_web::{HttpResponse, get, web};

use crate::AppState;
use crate::errors::LookupError;
use crate::lookup::guarded_count;
use crate::models::lookup::TransactionCountJson;
use crate::models::responses::ApiResponse;
use crate::utils::validation::is_well_formed_address;

#[get("/lookup/{address}")]
async fn lookup_get(
    state: web::Data<AppState>,
    address: web::Path<String>,
) -> Result<HttpResponse, LookupError> {
    let address = address.into_inner();
    let address = address.trim();

    if address.is_empty() {
        return Err(LookupError::InputEmpty);
    }
    if !is_well_formed_address(address) {
        return Err(LookupError::InputMalformed);
    }

    let count = guarded_count(state.source.as_ref(), address).await?;

    let response = ApiResponse {
        data: Some(TransactionCountJson {
            address: address.to_string(),
            count,
            explorer_url: state.config.explorer_address_url(address),
            checked_at: chrono::Utc::now(),
        }),
        ..Default::default()
    };

    Ok(HttpResponse::Ok().json(response))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(lookup_get);
}
