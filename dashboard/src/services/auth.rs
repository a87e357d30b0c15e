//! Login and registration flows

use shared::models::User;
use shared::validation::{validate_email, validate_password};

use crate::api::ApiClient;
use crate::error::{AppError, AppResult};
use crate::session::SessionStore;

/// Authentication service: exchanges credentials for a session and stores
/// it for subsequent requests
#[derive(Clone)]
pub struct AuthService {
    api: ApiClient,
    session: SessionStore,
}

impl AuthService {
    pub fn new(api: ApiClient, session: SessionStore) -> Self {
        Self { api, session }
    }

    pub async fn login(&self, email: &str, password: &str) -> AppResult<User> {
        let email = email.trim();
        validate_email(email).map_err(|m| AppError::Validation {
            field: "email".to_string(),
            message: m.to_string(),
        })?;
        if password.is_empty() {
            return Err(AppError::Validation {
                field: "password".to_string(),
                message: "Password is required".to_string(),
            });
        }

        let auth = self.api.login(email, password).await?;
        let user = auth.user.clone();
        self.session.set(auth);
        tracing::info!(user = %user.email, "logged in");
        Ok(user)
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> AppResult<User> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Name is required".to_string(),
            });
        }
        let email = email.trim();
        validate_email(email).map_err(|m| AppError::Validation {
            field: "email".to_string(),
            message: m.to_string(),
        })?;
        validate_password(password).map_err(|m| AppError::Validation {
            field: "password".to_string(),
            message: m.to_string(),
        })?;

        let auth = self.api.register(name, email, password).await?;
        let user = auth.user.clone();
        self.session.set(auth);
        tracing::info!(user = %user.email, "registered");
        Ok(user)
    }

    /// Clear the stored session. Requests already dispatched keep the token
    /// snapshot they took; new ones fail fast.
    pub fn logout(&self) {
        self.session.clear();
        tracing::info!("logged out");
    }

    pub fn current_user(&self) -> Option<User> {
        self.session.user()
    }
}
