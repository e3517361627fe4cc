use actix_web::{post, web, HttpResponse};
use cyons_llm::review;

use crate::types::{ReviewRequest, ReviewResponse};

/// POST /api/review - heuristic review of any text
#[post("/review")]
pub async fn review_summary(req: web::Json<ReviewRequest>) -> HttpResponse {
    let report = review(&req.summary);
    let text = report.to_string();

    HttpResponse::Ok().json(ReviewResponse { report, text })
}
