use actix_web::{get, web, HttpResponse};
use std::sync::Arc;

use crate::state::AppState;
use crate::types::{StyleInfo, StylesResponse};

/// GET /api/styles - styles with a loaded manifesto
#[get("/styles")]
pub async fn list_styles(state: web::Data<Arc<AppState>>) -> HttpResponse {
    let manifestos = state.summarizer.manifestos();
    let styles = manifestos
        .styles()
        .into_iter()
        .map(|style| StyleInfo {
            key: style.key().to_string(),
            label: style.label().to_string(),
        })
        .collect();

    HttpResponse::Ok().json(StylesResponse {
        styles,
        default: manifestos.default_style().key().to_string(),
    })
}
