use actix_web::{post, web, HttpResponse};
use std::sync::Arc;
use tracing::{info_span, Instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;
use crate::types::{CompileResponse, SummarizeRequest, SummarizeResponse};

/// POST /api/summarize - compile, generate and review
#[post("/summarize")]
pub async fn summarize(
    req: web::Json<SummarizeRequest>,
    state: web::Data<Arc<AppState>>,
) -> Result<HttpResponse, ApiError> {
    let request = req.to_summary_request(state.summarizer.manifestos())?;
    let request_id = Uuid::new_v4().to_string();

    let run = state
        .summarizer
        .summarize(&request)
        .instrument(info_span!("summarize", request_id = %request_id, style = request.style.key()))
        .await;

    Ok(HttpResponse::Ok().json(SummarizeResponse::from_run(request_id, run)))
}

/// POST /api/compile - prompt preview without calling the model
#[post("/compile")]
pub async fn compile(
    req: web::Json<SummarizeRequest>,
    state: web::Data<Arc<AppState>>,
) -> Result<HttpResponse, ApiError> {
    let request = req.to_summary_request(state.summarizer.manifestos())?;
    let prompt = state.summarizer.compile(&request);

    Ok(HttpResponse::Ok().json(CompileResponse {
        style: request.style,
        prompt,
    }))
}
