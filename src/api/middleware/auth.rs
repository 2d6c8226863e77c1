//! JWT authentication middleware.
//!
//! `identify` runs on every API request and attaches the caller when a
//! valid bearer token is presented. `require_auth` guards route groups that
//! need a signed-in caller.

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::errors::AppError;
use crate::services::Claims;

/// Authenticated user extracted from JWT token
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: i32,
    pub email: String,
    pub claims: Claims,
}

impl CurrentUser {
    pub fn from_claims(claims: Claims) -> Result<Self, AppError> {
        Ok(Self {
            id: claims.user_id()?,
            email: claims.email.clone(),
            claims,
        })
    }
}

fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix(BEARER_TOKEN_PREFIX))
}

/// Attach `CurrentUser` when the request carries a valid, unrevoked token.
/// Never rejects; invalid tokens leave the request anonymous.
pub async fn identify(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    if let Some(token) = bearer_token(&request) {
        let user = match state.auth_service.authenticate(token).await {
            Ok(claims) => CurrentUser::from_claims(claims),
            Err(e) => Err(e),
        };
        match user {
            Ok(user) => {
                request.extensions_mut().insert(user);
            }
            Err(e) => tracing::debug!(error = %e, "Bearer token rejected"),
        }
    }

    next.run(request).await
}

/// Reject requests that `identify` left anonymous.
pub async fn require_auth(request: Request, next: Next) -> Result<Response, AppError> {
    if request.extensions().get::<CurrentUser>().is_none() {
        return Err(AppError::Unauthorized);
    }
    Ok(next.run(request).await)
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(sub: &str) -> Claims {
        Claims {
            sub: sub.to_string(),
            email: "ana@example.com".to_string(),
            jti: "jti-1".to_string(),
            iat: 0,
            exp: 0,
        }
    }

    #[test]
    fn test_current_user_from_claims() {
        let user = CurrentUser::from_claims(claims("42")).unwrap();
        assert_eq!(user.id, 42);
        assert_eq!(user.email, "ana@example.com");
    }

    #[test]
    fn test_non_numeric_subject_is_unauthorized() {
        let err = CurrentUser::from_claims(claims("abc")).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
    }
}
