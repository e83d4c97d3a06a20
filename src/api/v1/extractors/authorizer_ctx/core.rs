use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::AuthorizerContext;

/// Handler で AuthorizerContext を受け取るための extractor
///
/// Never rejects: a request without a context yields `None`, and the
/// pipeline decides what that means for the operation (500 for user-scoped
/// reads, 403 for the machine-scoped create).
pub struct Authorizer(pub Option<AuthorizerContext>);

impl<S> FromRequestParts<S> for Authorizer
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Authorizer(parts.extensions.get::<AuthorizerContext>().cloned()))
    }
}
