use std::sync::Arc;

use literacy_core::ValidationError;
use literacy_core::model::Session;
use storage::repository::AuthApi;
use tracing::{info, warn};

use crate::error::AuthError;
use crate::session_context::SessionContext;

/// Login and logout against the backend.
#[derive(Clone)]
pub struct AuthService {
    session: Arc<SessionContext>,
    auth: Arc<dyn AuthApi>,
}

impl AuthService {
    #[must_use]
    pub fn new(session: Arc<SessionContext>, auth: Arc<dyn AuthApi>) -> Self {
        Self { session, auth }
    }

    /// Exchange credentials for a session and persist it.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` for blank fields (no request is sent),
    /// `AuthError::Gateway` when the backend refuses, or
    /// `AuthError::MalformedLogin` when the response lacks a token or role.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(ValidationError::missing("Email").into());
        }
        if password.is_empty() {
            return Err(ValidationError::missing("Password").into());
        }

        let response = self.auth.login(email, password).await.map_err(|err| {
            warn!(error = %err, "login rejected");
            err
        })?;
        let session = response.into_session().ok_or(AuthError::MalformedLogin)?;
        self.session.establish(session.clone()).await?;
        info!(role = %session.role, "logged in");
        Ok(session)
    }

    /// Drop the local session. The backend keeps no server-side session state.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Session` if the persisted record cannot be removed.
    pub async fn logout(&self) -> Result<(), AuthError> {
        self.session.clear().await?;
        Ok(())
    }

    #[must_use]
    pub fn current(&self) -> Option<Session> {
        self.session.current()
    }
}
