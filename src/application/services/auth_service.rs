//! Authentication Service
//!
//! Handles account registration, login, and JWT access tokens.

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::JwtSettings;
use crate::domain::{NewUser, SessionUser, User, UserRepository};
use crate::shared::error::AppError;

/// Authentication service trait for dependency injection
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new account.
    ///
    /// `admin` is only honoured for the very first account.
    async fn register(
        &self,
        username: &str,
        password: &str,
        admin: bool,
    ) -> Result<(User, AuthTokens), AuthError>;

    /// Authenticate with username and password
    async fn login(&self, username: &str, password: &str) -> Result<AuthTokens, AuthError>;

    /// Resolve an access token to the account it was issued for.
    ///
    /// The token must name an account that still exists under the same
    /// username; the returned identity comes from the store.
    async fn authenticate(&self, access_token: &str) -> Result<SessionUser, AuthError>;
}

/// Issued access token
#[derive(Debug, Clone, Serialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub expires_in: i64,
    pub token_type: String,
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    pub username: String,
    pub admin: bool,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
    /// JWT ID
    pub jti: String,
}

/// Authentication errors
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Username already exists")]
    UsernameExists,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InvalidCredentials => {
                AppError::Unauthorized("Invalid username or password".into())
            }
            AuthError::TokenExpired | AuthError::InvalidToken => {
                AppError::Unauthorized(e.to_string())
            }
            AuthError::UsernameExists => AppError::Conflict("Username already exists".into()),
            AuthError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// Signs and verifies HS256 access tokens.
#[derive(Clone)]
pub struct TokenCodec {
    settings: JwtSettings,
}

impl TokenCodec {
    pub fn new(settings: JwtSettings) -> Self {
        Self { settings }
    }

    /// Issue an access token for a user.
    pub fn issue(&self, user: &User) -> Result<AuthTokens, AuthError> {
        let now = Utc::now();
        let expiry = now + Duration::minutes(self.settings.access_token_expiry_minutes);

        let claims = Claims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            admin: user.admin,
            exp: expiry.timestamp(),
            iat: now.timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
        };

        let access_token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.settings.secret.as_bytes()),
        )
        .map_err(|e| AuthError::Internal(format!("Token generation failed: {}", e)))?;

        Ok(AuthTokens {
            access_token,
            expires_in: self.settings.access_token_expiry_minutes * 60,
            token_type: "Bearer".to_string(),
        })
    }

    /// Decode and validate an access token
    pub fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.settings.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        })?;

        Ok(token_data.claims)
    }

}

/// AuthService implementation
pub struct AuthServiceImpl {
    user_repo: Arc<dyn UserRepository>,
    codec: TokenCodec,
}

impl AuthServiceImpl {
    pub fn new(user_repo: Arc<dyn UserRepository>, jwt_settings: JwtSettings) -> Self {
        Self {
            user_repo,
            codec: TokenCodec::new(jwt_settings),
        }
    }

    /// Hash a password using Argon2id
    fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::Internal(format!("Password hashing failed: {}", e)))
    }

    /// Verify a password against its hash
    fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AuthError::Internal(format!("Invalid password hash: {}", e)))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

#[async_trait]
impl AuthService for AuthServiceImpl {
    async fn register(
        &self,
        username: &str,
        password: &str,
        admin: bool,
    ) -> Result<(User, AuthTokens), AuthError> {
        if self
            .user_repo
            .find_by_username(username)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?
            .is_some()
        {
            return Err(AuthError::UsernameExists);
        }

        let password_hash = self.hash_password(password)?;

        let user = self
            .user_repo
            .create(&NewUser {
                username: username.to_string(),
                password_hash,
                wants_admin: admin,
            })
            .await
            .map_err(|e| match e {
                AppError::Conflict(_) => AuthError::UsernameExists,
                e => AuthError::Internal(e.to_string()),
            })?;

        let tokens = self.codec.issue(&user)?;

        tracing::info!(user_id = user.id, username = %user.username, admin = user.admin, "User registered");

        Ok((user, tokens))
    }

    async fn login(&self, username: &str, password: &str) -> Result<AuthTokens, AuthError> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self.verify_password(password, &user.password_hash)? {
            tracing::debug!(username = %username, "Login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        self.codec.issue(&user)
    }

    async fn authenticate(&self, access_token: &str) -> Result<SessionUser, AuthError> {
        let claims = self.codec.decode(access_token)?;
        let user_id = claims.sub.parse::<i64>().map_err(|_| AuthError::InvalidToken)?;

        let user = self
            .user_repo
            .find_by_id(user_id)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?
            .filter(|user| user.username == claims.username)
            .ok_or(AuthError::InvalidToken)?;

        Ok(SessionUser {
            user_id: user.id,
            username: user.username,
            admin: user.admin,
        })
    }
}
