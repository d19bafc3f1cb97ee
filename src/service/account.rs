//! Account service
//!
//! Registration, credential checks and profile lookup.

use std::sync::Arc;

use chrono::Utc;

use crate::auth::password::{hash_password, verify_password};
use crate::data::{Database, EntityId, User};
use crate::error::AppError;

const MIN_PASSWORD_LENGTH: usize = 6;

/// Registration input
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub password: String,
    pub username: String,
    pub bio: String,
}

fn normalize_email(email: &str) -> Result<String, AppError> {
    let email = email.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(email),
        _ => Err(AppError::Validation("Invalid email address".to_string())),
    }
}

/// Account service
pub struct AccountService {
    db: Arc<Database>,
}

impl AccountService {
    /// Create new account service
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Register a new user
    ///
    /// # Errors
    /// - `Validation` for a malformed email, short password or empty username
    /// - `EmailTaken` if the email is already registered
    pub async fn register(&self, input: NewAccount) -> Result<User, AppError> {
        let email = normalize_email(&input.email)?;

        let username = input.username.trim().to_string();
        if username.is_empty() {
            return Err(AppError::Validation("Username cannot be empty".to_string()));
        }
        if input.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AppError::Validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        if self.db.get_user_by_email(&email).await?.is_some() {
            return Err(AppError::EmailTaken);
        }

        let user = User {
            id: EntityId::new().0,
            email,
            password_hash: hash_password(&input.password)?,
            username,
            bio: input.bio.trim().to_string(),
            avatar: None,
            created_at: Utc::now(),
        };
        // a concurrent registration can still lose on the unique index
        self.db.insert_user(&user).await?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");

        Ok(user)
    }

    /// Check credentials
    ///
    /// # Errors
    /// `InvalidCredentials` for an unknown email or a wrong password
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AppError> {
        let email = email.trim().to_lowercase();

        let user = self
            .db
            .get_user_by_email(&email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash) {
            tracing::debug!(user_id = %user.id, "Password mismatch");
            return Err(AppError::InvalidCredentials);
        }

        Ok(user)
    }

    pub async fn get(&self, user_id: &str) -> Result<User, AppError> {
        self.db.get_user(user_id).await?.ok_or(AppError::NotFound)
    }
}
