pub mod api;
mod not_found;
pub mod page;

use actix_cors::Cors;
use actix_web::{HttpResponse, get, web};

#[get("/health")]
pub async fn health_get() -> HttpResponse {
    HttpResponse::Ok().body("ok")
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .wrap(Cors::default().allow_any_origin().allowed_methods(["GET"]))
            .configure(api::config),
    );
    cfg.service(health_get);
    cfg.configure(page::config);
    cfg.default_service(web::route().to(not_found::not_found));
}
