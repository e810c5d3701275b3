/// Send-notification HTTP handlers
use actix_web::{middleware::DefaultHeaders, web, HttpResponse, ResponseError};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, warn};

use crate::error::AppError;
use crate::services::NotificationDispatcher;

pub const CORS_ALLOW_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

/// Permissive CORS headers attached to every response
pub fn cors_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("Access-Control-Allow-Origin", "*"))
        .add(("Access-Control-Allow-Methods", "POST"))
        .add(("Access-Control-Allow-Headers", CORS_ALLOW_HEADERS))
}

/// Dispatch a push notification
///
/// POST /send-notification
pub async fn send_notification(
    dispatcher: web::Data<Arc<NotificationDispatcher>>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    match dispatcher.parse_and_dispatch(&body).await {
        Ok(fcm_response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "fcmResponse": fcm_response,
        }))),
        Err(e) => {
            log_failure(&e);
            Err(e)
        }
    }
}

/// CORS preflight; never inspects the body
///
/// OPTIONS /send-notification
pub async fn preflight() -> HttpResponse {
    HttpResponse::Ok().body("ok")
}

fn log_failure(err: &AppError) {
    match err {
        AppError::Backend { status, details } => {
            warn!(status, details = %details, "FCM error")
        }
        _ if err.status_code().is_server_error() => {
            error!(error = %err, "Failed to dispatch notification")
        }
        _ => warn!(error = %err, "Rejected notification request"),
    }
}

/// Register routes
pub fn register_routes(cfg: &mut web::ServiceConfig) {
    for path in ["/send-notification", "/"] {
        cfg.service(
            web::resource(path)
                .route(web::post().to(send_notification))
                .route(web::method(actix_web::http::Method::OPTIONS).to(preflight)),
        );
    }
}
