/*!
 * Authorizer context extractor
 *
 * Responsibility:
 * - 認可コンテキスト（AuthorizerContext）を handler に提供する
 * - axum 依存は core に閉じ込め、型定義は types に分離する
 *
 * Public API:
 * - AuthorizerContext
 * - Authorizer
 */

mod core;
mod types;

pub use core::Authorizer;
pub use types::AuthorizerContext;
