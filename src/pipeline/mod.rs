/*
 * Responsibility
 * - Authorization / validation pipeline every request passes through
 * - scope, authorizer, schema: checks (no I/O)
 * - controller: RequestPipeline (orchestration + single catch point)
 * - responder / response: failure → status-coded JSON
 */
pub mod authorizer;
pub mod controller;
pub mod responder;
pub mod response;
pub mod schema;
pub mod scope;

pub use controller::{MemberCreate, RequestPipeline, WorkspaceRead};
pub use responder::{ErrorCapture, ErrorResponder, TracingErrorCapture};
pub use response::ApiResponse;
