//! Status-coded JSON responses produced by the pipeline.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// Collection envelope: `{ "items": [...] }`.
#[derive(Debug, Serialize)]
pub struct Items<T> {
    pub items: Vec<T>,
}

impl ApiResponse {
    pub fn json<T: Serialize>(status: StatusCode, body: &T) -> Result<Self, AppError> {
        let body = serde_json::to_value(body).map_err(AppError::internal)?;
        Ok(Self { status, body })
    }

    pub fn from_error(err: &AppError) -> Self {
        let body = serde_json::to_value(err.body())
            .unwrap_or_else(|_| json!({ "message": err.to_string() }));

        Self {
            status: err.status(),
            body,
        }
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
