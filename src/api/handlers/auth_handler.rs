//! Authentication handlers.

use axum::{
    extract::State,
    middleware,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{require_auth, CurrentUser};
use crate::api::AppState;
use crate::config::MIN_PASSWORD_LENGTH;
use crate::domain::UserResponse;
use crate::errors::{AppError, AppResult};
use crate::services::AuthPayload;
use crate::types::{ApiResponse, Created};

/// User registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(email(message = "Enter a valid email address."))]
    #[schema(example = "user@example.com")]
    pub email: String,
    #[validate(length(min = MIN_PASSWORD_LENGTH, message = "Ensure this field has at least 6 characters."))]
    #[schema(example = "secret123", min_length = 6)]
    pub password: String,
    #[validate(length(min = 1, message = "This field may not be blank."))]
    #[schema(example = "Ana Lima")]
    pub name: String,
}

/// User login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Enter a valid email address."))]
    #[schema(example = "user@example.com")]
    pub email: String,
    #[validate(length(min = 1, message = "This field may not be blank."))]
    #[schema(example = "secret123")]
    pub password: String,
}

/// Session probe result
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthStatus {
    pub authenticated: bool,
    pub user: Option<UserResponse>,
}

/// Create account routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route(
            "/logout",
            post(logout).route_layer(middleware::from_fn(require_auth)),
        )
        .route("/check-auth", get(check_auth))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/register",
    tag = "Accounts",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = AuthPayload),
        (status = 400, description = "Validation error"),
        (status = 409, description = "User already exists")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<Created<AuthPayload>> {
    let auth = state
        .auth_service
        .register(payload.email, payload.password, payload.name)
        .await?;

    Ok(Created(ApiResponse::with_message(
        auth,
        "User registered successfully",
    )))
}

/// Sign in and get a JWT token
#[utoipa::path(
    post,
    path = "/api/login",
    tag = "Accounts",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthPayload),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<ApiResponse<AuthPayload>> {
    let auth = state
        .auth_service
        .login(payload.email, payload.password)
        .await?;

    Ok(ApiResponse::with_message(auth, "Login successful"))
}

/// Revoke the presented token
#[utoipa::path(
    post,
    path = "/api/logout",
    tag = "Accounts",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Logout successful"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn logout(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<ApiResponse<()>> {
    state.auth_service.logout(&user.claims).await?;
    Ok(ApiResponse::message("Logout successful"))
}

/// Report whether the caller is signed in
#[utoipa::path(
    get,
    path = "/api/check-auth",
    tag = "Accounts",
    responses(
        (status = 200, description = "Authentication status", body = AuthStatus)
    )
)]
pub async fn check_auth(
    State(state): State<AppState>,
    user: Option<CurrentUser>,
) -> AppResult<ApiResponse<AuthStatus>> {
    let user = match user {
        Some(user) => match state.auth_service.current_user(&user.claims).await {
            Ok(account) => Some(UserResponse::from(account)),
            Err(AppError::Unauthorized) => None,
            Err(e) => return Err(e),
        },
        None => None,
    };

    Ok(ApiResponse::success(AuthStatus {
        authenticated: user.is_some(),
        user,
    }))
}
