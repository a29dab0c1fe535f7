use std::sync::Arc;

use literacy_core::model::{Assessment, AssessmentId, Roster};
use storage::repository::AssessmentApi;
use tracing::info;

use crate::error::RosterError;
use crate::session_context::SessionContext;

/// Assessment lists for the dashboards.
pub struct RosterService {
    session: Arc<SessionContext>,
    assessments: Arc<dyn AssessmentApi>,
}

impl RosterService {
    #[must_use]
    pub fn new(session: Arc<SessionContext>, assessments: Arc<dyn AssessmentApi>) -> Self {
        Self {
            session,
            assessments,
        }
    }

    /// Every assessment visible to the signed-in account, sorted by id.
    ///
    /// # Errors
    ///
    /// Returns `RosterError` if there is no session or the request fails.
    pub async fn load(&self) -> Result<Roster, RosterError> {
        let token = self.session.token()?;
        let records = self.assessments.list_assessments(&token).await?;
        info!(count = records.len(), "roster loaded");
        Ok(Roster::new(records))
    }

    /// Full record for the detail dialog.
    ///
    /// # Errors
    ///
    /// Returns `RosterError` if there is no session or the request fails.
    pub async fn detail(&self, id: AssessmentId) -> Result<Assessment, RosterError> {
        let token = self.session.token()?;
        Ok(self.assessments.get_assessment(&token, id).await?)
    }

    /// Delete the selected records and drop them from the roster.
    ///
    /// With nothing selected no request is sent. On failure the roster keeps
    /// its records and its selection.
    ///
    /// # Errors
    ///
    /// Returns `RosterError` if there is no session or the request fails.
    pub async fn delete_selected(&self, roster: &mut Roster) -> Result<usize, RosterError> {
        let ids = roster.selected();
        if ids.is_empty() {
            return Ok(0);
        }
        let token = self.session.token()?;
        self.assessments.delete_assessments(&token, &ids).await?;
        roster.remove(&ids);
        info!(count = ids.len(), "assessments deleted");
        Ok(ids.len())
    }
}
