pub mod health;
pub mod location;

use actix_web::{HttpResponse, web};
use serde_json::json;

pub use health::{AppStartTime, HealthService, health_routes};
pub use location::{LocationService, location_routes};

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({ "error": "Not found" }))
}

/// 注册全部路由；需要 `web::Data<LookupService>` 与 `web::Data<AppStartTime>`
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health_routes())
        .service(location_routes())
        .default_service(web::to(not_found));
}
