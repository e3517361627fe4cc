pub mod review;
pub mod styles;
pub mod summarize;
pub mod system;

use actix_web::web;

/// Register all API routes under `/api`
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(summarize::summarize)
            .service(summarize::compile)
            .service(review::review_summary)
            .service(styles::list_styles)
            .service(system::health)
            .service(system::llm_health),
    );
}
