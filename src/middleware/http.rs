//! HTTP-level middleware applied to every route.
//!
//! Responsibility:
//! - Request-Id generation + propagation (X-Request-Id)
//! - Access logging / request tracing (TraceLayer)
//! - Body size limit for member-create payloads (checked by the extractor)
//! - Request-level timeout; the pipeline itself never times out, in-flight work
//!   is simply dropped when this fires

use std::time::Duration;

use axum::error_handling::HandleErrorLayer;
use axum::extract::DefaultBodyLimit;
use axum::http::{StatusCode, header::HeaderName};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use tower::timeout::TimeoutLayer;
use tower::{BoxError, ServiceBuilder};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::error::{ErrorBody, ErrorDetails};

pub const REQUEST_ID_HEADER: &str = "x-request-id";
pub const BODY_LIMIT_BYTES: usize = 1024 * 1024;
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// Keep the `{ message, details }` shape even for failures outside the pipeline.
async fn handle_layer_error(err: BoxError) -> Response {
    let (status, message, details) = if err.is::<tower::timeout::error::Elapsed>() {
        (
            StatusCode::REQUEST_TIMEOUT,
            "Request Timeout",
            "The request took too long to complete",
        )
    } else {
        tracing::error!(error = %err, "middleware failure");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error",
            "Unexpected middleware failure",
        )
    };

    let body = ErrorBody {
        message: message.to_string(),
        details: Some(ErrorDetails::Text(details.to_string())),
    };
    (status, Json(body)).into_response()
}

/// Apply HTTP-level middleware to the given Router.
pub fn apply(router: Router) -> Router {
    let request_id_header = HeaderName::from_static(REQUEST_ID_HEADER);

    let layers = ServiceBuilder::new()
        // Make the service error `Infallible` by converting errors into responses.
        .layer(HandleErrorLayer::new(handle_layer_error))
        .layer(SetRequestIdLayer::new(
            request_id_header.clone(),
            MakeRequestUuid,
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header))
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(TraceLayer::new_for_http());

    // Enforced by the body extractor, so an oversized body still reaches the
    // pipeline as a rejection instead of a plain-text 413 from the layer.
    router
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(layers)
}
