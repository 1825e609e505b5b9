//! `GET /ip/location?ip=a.b.c.d`
//!
//! - 200 `{countryCode, region, city}`
//! - 400 `{error: "Missing ip" | "Invalid ip"}`
//! - 404 `{error: "Not found"}`
//! - 500 `{error: "Internal error"}`

use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error};

use crate::services::{LookupError, LookupService};

#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    pub ip: Option<String>,
}

pub struct LocationService;

impl LocationService {
    pub async fn lookup(
        query: web::Query<LocationQuery>,
        lookup: web::Data<LookupService>,
    ) -> impl Responder {
        match lookup.lookup(query.ip.as_deref()).await {
            Ok(Some(location)) => HttpResponse::Ok().json(location),
            Ok(None) => {
                debug!("No location for {:?}", query.ip);
                HttpResponse::NotFound().json(json!({ "error": "Not found" }))
            }
            Err(LookupError::InvalidInput(reason)) => {
                HttpResponse::BadRequest().json(json!({ "error": reason }))
            }
            Err(LookupError::Internal(e)) => {
                error!("Location lookup failed: {}", e);
                HttpResponse::InternalServerError().json(json!({ "error": "Internal error" }))
            }
        }
    }
}

pub fn location_routes() -> actix_web::Scope {
    web::scope("/ip").route("/location", web::get().to(LocationService::lookup))
}
