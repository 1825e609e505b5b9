use actix_web::{HttpResponse, Responder, web};
use serde_json::json;
use std::time::{Duration, Instant};
use tracing::{error, trace};

use crate::services::LookupService;

const STORAGE_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

// 应用启动时间
#[derive(Clone, Debug)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

pub struct HealthService;

impl HealthService {
    /// 存储可达时返回 200 `{ok: true, ...}`，否则 503
    pub async fn health_check(
        lookup: web::Data<LookupService>,
        app_start_time: web::Data<AppStartTime>,
    ) -> impl Responder {
        let started = Instant::now();
        let store = lookup.store();

        // 一次 floor 查询即可验证连接与表结构
        let storage_error =
            match tokio::time::timeout(STORAGE_CHECK_TIMEOUT, store.floor(0)).await {
                Ok(Ok(_)) => None,
                Ok(Err(e)) => {
                    error!("Storage health check failed: {}", e);
                    Some(e.to_string())
                }
                Err(_) => {
                    error!("Storage health check timeout");
                    Some("timeout".to_string())
                }
            };

        let now = chrono::Utc::now();
        let uptime_seconds = (now - app_start_time.start_datetime).num_seconds().max(0);
        let ok = storage_error.is_none();

        let body = json!({
            "ok": ok,
            "backend": store.backend_name(),
            "uptime": uptime_seconds,
            "timestamp": now.to_rfc3339(),
            "response_time_ms": started.elapsed().as_millis() as u64,
            "error": storage_error,
        });
        trace!("Health check finished: ok={}", ok);

        if ok {
            HttpResponse::Ok().json(body)
        } else {
            HttpResponse::ServiceUnavailable().json(body)
        }
    }

    /// 进程存活即可
    pub async fn liveness_check() -> impl Responder {
        HttpResponse::Ok().json(json!({ "ok": true }))
    }
}

pub fn health_routes() -> actix_web::Scope {
    web::scope("/health")
        .route("", web::get().to(HealthService::health_check))
        .route("", web::head().to(HealthService::health_check))
        .route("/live", web::get().to(HealthService::liveness_check))
}
