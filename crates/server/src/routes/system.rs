use actix_web::{get, web, HttpResponse};
use std::sync::Arc;
use tracing::warn;

use crate::state::AppState;
use crate::types::{HealthResponse, LlmHealthResponse};

/// GET /api/health
#[get("/health")]
pub async fn health(state: web::Data<Arc<AppState>>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        model: state.config.llm_model.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/health/llm - probe the completion API
#[get("/health/llm")]
pub async fn llm_health(state: web::Data<Arc<AppState>>) -> HttpResponse {
    match state.summarizer.client().test_connection().await {
        Ok(true) => HttpResponse::Ok().json(LlmHealthResponse {
            reachable: true,
            error: None,
        }),
        Ok(false) => HttpResponse::ServiceUnavailable().json(LlmHealthResponse {
            reachable: false,
            error: Some("Completion API rejected the request".to_string()),
        }),
        Err(e) => {
            warn!("Completion API unreachable: {}", e);
            HttpResponse::ServiceUnavailable().json(LlmHealthResponse {
                reachable: false,
                error: Some(e.to_string()),
            })
        }
    }
}
