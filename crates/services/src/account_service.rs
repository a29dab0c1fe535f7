use std::sync::Arc;

use literacy_core::model::{RegistrationDraft, Role, UserAccount};
use storage::repository::{AuthApi, UserApi};
use tracing::info;

use crate::error::AccountError;
use crate::session_context::SessionContext;

/// Account administration: registering volunteers and admins, listing users.
pub struct AccountService {
    session: Arc<SessionContext>,
    auth: Arc<dyn AuthApi>,
    users: Arc<dyn UserApi>,
}

impl AccountService {
    #[must_use]
    pub fn new(
        session: Arc<SessionContext>,
        auth: Arc<dyn AuthApi>,
        users: Arc<dyn UserApi>,
    ) -> Self {
        Self {
            session,
            auth,
            users,
        }
    }

    /// Register a volunteer account. The backend assigns the default role.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::Validation` for blank fields, or a session/gateway error.
    pub async fn create_volunteer(&self, draft: &RegistrationDraft) -> Result<(), AccountError> {
        self.register(draft, None).await
    }

    /// Register an admin account.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::Validation` for blank fields, or a session/gateway error.
    pub async fn create_admin(&self, draft: &RegistrationDraft) -> Result<(), AccountError> {
        self.register(draft, Some(Role::Admin)).await
    }

    async fn register(
        &self,
        draft: &RegistrationDraft,
        role: Option<Role>,
    ) -> Result<(), AccountError> {
        let registration = draft.validate(role)?;
        let token = self.session.token()?;
        self.auth.register(&token, &registration).await?;
        info!(role = ?role, "account registered");
        Ok(())
    }

    /// All accounts, for the management view.
    ///
    /// # Errors
    ///
    /// Returns `AccountError` if there is no session or the request fails.
    pub async fn list(&self) -> Result<Vec<UserAccount>, AccountError> {
        let token = self.session.token()?;
        Ok(self.users.list_users(&token).await?)
    }
}
