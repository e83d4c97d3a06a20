//! Uniform failure → response mapping.
use std::cell::Cell;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::error::AppError;
use crate::pipeline::response::ApiResponse;

thread_local! {
    static CAPTURING: Cell<bool> = const { Cell::new(false) };
}

/// `true` while an [`ErrorCapture`] runs on the current thread.
///
/// A panic raised there is caught by [`ErrorResponder::respond`]; process-wide
/// panic hooks use this to leave it alone.
pub fn capture_in_progress() -> bool {
    CAPTURING.with(Cell::get)
}

/// Receives every failure the pipeline answers with an error response.
///
/// Fire-and-forget: implementations must not block, and a panic inside
/// `capture` is swallowed by the responder.
pub trait ErrorCapture: Send + Sync {
    fn capture(&self, err: &AppError);
}

/// Default capture: structured log line per failure.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingErrorCapture;

impl ErrorCapture for TracingErrorCapture {
    fn capture(&self, err: &AppError) {
        let status = err.status();
        if status.is_server_error() {
            tracing::error!(error = ?err, status = status.as_u16(), "request failed");
        } else {
            tracing::info!(error = %err, status = status.as_u16(), "request rejected");
        }
    }
}

#[derive(Clone)]
pub struct ErrorResponder {
    capture: Arc<dyn ErrorCapture>,
}

impl fmt::Debug for ErrorResponder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorResponder").finish_non_exhaustive()
    }
}

impl ErrorResponder {
    pub fn new(capture: Arc<dyn ErrorCapture>) -> Self {
        Self { capture }
    }

    /// Captures `err` (best-effort), then builds `{ message, details }` with
    /// the error's status. Never panics on account of the capture.
    pub fn respond(&self, err: AppError) -> ApiResponse {
        CAPTURING.with(|c| c.set(true));
        let captured = panic::catch_unwind(AssertUnwindSafe(|| self.capture.capture(&err)));
        CAPTURING.with(|c| c.set(false));
        if captured.is_err() {
            tracing::warn!("error capture panicked; sending response anyway");
        }

        ApiResponse::from_error(&err)
    }
}

impl Default for ErrorResponder {
    fn default() -> Self {
        Self::new(Arc::new(TracingErrorCapture))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recording(Mutex<Vec<String>>);

    impl ErrorCapture for Recording {
        fn capture(&self, err: &AppError) {
            self.0.lock().unwrap().push(err.to_string());
        }
    }

    struct Exploding;

    impl ErrorCapture for Exploding {
        fn capture(&self, _err: &AppError) {
            panic!("capture backend down");
        }
    }

    #[test]
    fn captures_then_responds_with_status_and_body() {
        let recording = Arc::new(Recording::default());
        let responder = ErrorResponder::new(recording.clone());

        let res = responder.respond(AppError::NotFound);

        assert_eq!(res.status, StatusCode::NOT_FOUND);
        assert_eq!(
            res.body,
            json!({
                "message": "Not Found",
                "details": "You might not have access to this workspace, or it doesn't exist."
            })
        );
        assert_eq!(*recording.0.lock().unwrap(), vec!["Not Found".to_string()]);
    }

    #[test]
    fn failing_capture_does_not_prevent_response() {
        let responder = ErrorResponder::new(Arc::new(Exploding));

        let res = responder.respond(AppError::forbidden("read:workspace"));

        assert_eq!(res.status, StatusCode::FORBIDDEN);
        assert_eq!(res.body["details"], "You need scope \"read:workspace\"");
        assert!(!capture_in_progress());
    }

    #[test]
    fn unclassified_failures_are_500_without_internals() {
        let responder = ErrorResponder::new(Arc::new(Recording::default()));

        let res = responder.respond(AppError::internal("pool timed out after 30s"));

        assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(res.body["message"], "Internal Server Error");
        assert!(!res.body.to_string().contains("pool timed out"));
    }
}
