use std::sync::Arc;

use literacy_core::model::{AvatarUpload, PasswordForm, ProfileDraft, UserProfile};
use storage::repository::ProfileApi;
use tracing::{info, warn};

use crate::error::ProfileError;
use crate::session_context::SessionContext;

/// Own-profile reads and edits for the signed-in account.
pub struct ProfileService {
    session: Arc<SessionContext>,
    profiles: Arc<dyn ProfileApi>,
}

impl ProfileService {
    #[must_use]
    pub fn new(session: Arc<SessionContext>, profiles: Arc<dyn ProfileApi>) -> Self {
        Self { session, profiles }
    }

    /// Fetch the profile and merge it into the stored session.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError` if there is no session or the request fails.
    pub async fn load(&self) -> Result<UserProfile, ProfileError> {
        let token = self.session.token()?;
        let profile = self.profiles.get_profile(&token).await?;
        self.session.merge_profile(profile.clone()).await?;
        Ok(profile)
    }

    /// Whether the volunteer may create assessments yet.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError` if the profile cannot be fetched.
    pub async fn is_complete(&self) -> Result<bool, ProfileError> {
        Ok(self.load().await?.is_complete())
    }

    /// Send every editable field plus an optional new avatar, then refresh.
    ///
    /// Returns the profile as the backend now holds it.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::Validation` without sending anything when the
    /// draft blanks a required field, or a session/gateway error.
    pub async fn save(
        &self,
        draft: &ProfileDraft,
        avatar: Option<AvatarUpload>,
    ) -> Result<UserProfile, ProfileError> {
        let update = draft.validate(avatar)?;
        let token = self.session.token()?;
        self.profiles.update_profile(&token, &update).await?;
        info!(fields = update.fields.len(), avatar = update.avatar.is_some(), "profile saved");

        match self.load().await {
            Ok(profile) => Ok(profile),
            Err(err) => {
                warn!(error = %err, "profile refresh after save failed");
                let fallback = draft.values().clone();
                self.session.merge_profile(fallback.clone()).await?;
                Ok(fallback)
            }
        }
    }

    /// Validate and submit a password change. The form is cleared on success.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::Validation` for a mismatch or blank field (no
    /// request is sent), or a session/gateway error.
    pub async fn change_password(&self, form: &mut PasswordForm) -> Result<(), ProfileError> {
        let change = form.validate()?;
        let token = self.session.token()?;
        self.profiles.change_password(&token, &change).await?;
        form.clear();
        info!("password changed");
        Ok(())
    }
}
