//! Authentication service - Accounts, bearer tokens and revocation.
//!
//! DDD: Uses domain Password value object for hashing.
//! DDD: Uses Unit of Work for repository access.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{Config, CACHE_PREFIX_REVOKED_TOKEN};
use crate::domain::{Password, User, UserResponse};
use crate::errors::{AppError, AppResult};
use crate::infra::{Cache, NewUser, UnitOfWork};

/// JWT claims payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub email: String,
    /// Token id, used for revocation
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn user_id(&self) -> AppResult<i32> {
        self.sub.parse().map_err(|_| AppError::Unauthorized)
    }
}

/// Account plus a fresh token, returned by register and login
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthPayload {
    pub user: UserResponse,
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create an account and sign the caller in
    async fn register(&self, email: String, password: String, name: String)
        -> AppResult<AuthPayload>;

    async fn login(&self, email: String, password: String) -> AppResult<AuthPayload>;

    /// Revoke the token the claims came from until it expires
    async fn logout(&self, claims: &Claims) -> AppResult<()>;

    /// Decode a token and reject it if revoked
    async fn authenticate(&self, token: &str) -> AppResult<Claims>;

    /// Account behind valid claims
    async fn current_user(&self, claims: &Claims) -> AppResult<User>;
}

/// Verified against when the email is unknown so both paths cost one hash check.
static TIMING_EQUALIZER: Lazy<Option<Password>> =
    Lazy::new(|| Password::new("timing-equalizer-password").ok());

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
    cache: Cache,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, config: Config, cache: Cache) -> Self {
        Self { uow, config, cache }
    }

    fn issue_token(&self, user: &User) -> AppResult<String> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(self.config.jwt_expiration_hours);

        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret_bytes()),
        )?)
    }

    fn decode_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    fn payload(&self, user: User) -> AppResult<AuthPayload> {
        let token = self.issue_token(&user)?;
        Ok(AuthPayload {
            user: UserResponse::from(user),
            token,
        })
    }
}

fn revoked_key(jti: &str) -> String {
    format!("{}{}", CACHE_PREFIX_REVOKED_TOKEN, jti)
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn register(
        &self,
        email: String,
        password: String,
        name: String,
    ) -> AppResult<AuthPayload> {
        let email = email.trim().to_lowercase();

        if self.uow.users().find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("A user with this email already exists."));
        }

        let password_hash = Password::new(&password)?.into_string();
        let user = self
            .uow
            .users()
            .create(NewUser {
                email,
                name: name.trim().to_string(),
                password_hash,
                last_login: Some(Utc::now()),
            })
            .await?;

        tracing::info!(user_id = user.id, "User registered");
        self.payload(user)
    }

    async fn login(&self, email: String, password: String) -> AppResult<AuthPayload> {
        let email = email.trim().to_lowercase();
        let found = self.uow.users().find_by_email(&email).await?;

        // SECURITY: verify even for unknown emails so response time does not reveal them
        let user = match found {
            Some(user) => {
                if !Password::from_hash(user.password_hash.clone()).verify(&password) {
                    return Err(AppError::InvalidCredentials);
                }
                user
            }
            None => {
                if let Some(equalizer) = TIMING_EQUALIZER.as_ref() {
                    equalizer.verify(&password);
                }
                return Err(AppError::InvalidCredentials);
            }
        };

        let user = self.uow.users().record_login(user.id, Utc::now()).await?;
        tracing::debug!(user_id = user.id, "User logged in");
        self.payload(user)
    }

    async fn logout(&self, claims: &Claims) -> AppResult<()> {
        let remaining = (claims.exp - Utc::now().timestamp()).max(1);
        self.cache
            .set_with_ttl(&revoked_key(&claims.jti), &true, remaining as u64)
            .await?;
        tracing::debug!(user_id = %claims.sub, "Token revoked");
        Ok(())
    }

    async fn authenticate(&self, token: &str) -> AppResult<Claims> {
        let claims = self.decode_token(token)?;
        if self.cache.exists(&revoked_key(&claims.jti)).await? {
            return Err(AppError::Unauthorized);
        }
        Ok(claims)
    }

    async fn current_user(&self, claims: &Claims) -> AppResult<User> {
        self.uow
            .users()
            .find_by_id(claims.user_id()?)
            .await?
            .ok_or(AppError::Unauthorized)
    }
}
