pub mod authorizer_ctx;

pub use authorizer_ctx::{Authorizer, AuthorizerContext};
