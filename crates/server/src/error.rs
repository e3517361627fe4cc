use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use cyons_common::CyonsError;
use std::fmt;

use crate::types::ErrorResponse;

/// HTTP-facing wrapper around `CyonsError`
#[derive(Debug)]
pub struct ApiError(pub CyonsError);

impl From<CyonsError> for ApiError {
    fn from(err: CyonsError) -> Self {
        Self(err)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        }

        let error = match &self.0 {
            CyonsError::InvalidInput(msg) => msg.clone(),
            _ => status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string(),
        };

        HttpResponse::build(status).json(ErrorResponse {
            error,
            details: Some(self.0.to_string()),
        })
    }
}
