//! cyons HTTP server
//!
//! Actix-web JSON API over the controlled summarizer

pub mod error;
pub mod routes;
pub mod state;
pub mod types;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use cyons_common::{AppConfig, Result};
use cyons_llm::Summarizer;
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::TracingLogger;

use crate::error::ApiError;
use crate::state::AppState;

/// Start the HTTP server and run until shutdown
pub async fn start_server(config: AppConfig, summarizer: Arc<Summarizer>) -> Result<()> {
    let bind_addr = config.server_bind_address();
    let state = Arc::new(AppState::new(config, summarizer));

    info!("Starting HTTP server on {}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            .app_data(web::Data::new(state.clone()))
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                ApiError::from(cyons_common::CyonsError::invalid_input(err.to_string())).into()
            }))
            .configure(routes::configure)
    })
    .bind(&bind_addr)?
    .run()
    .await?;

    info!("HTTP server stopped");
    Ok(())
}
