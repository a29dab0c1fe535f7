use std::sync::Arc;

use literacy_core::model::NewAssessmentDraft;
use storage::repository::AssessmentApi;
use tracing::info;

use crate::error::AssessmentFormError;
use crate::session_context::SessionContext;

/// Creates assessments from the volunteer's form.
pub struct AssessmentFormService {
    session: Arc<SessionContext>,
    assessments: Arc<dyn AssessmentApi>,
}

impl AssessmentFormService {
    #[must_use]
    pub fn new(session: Arc<SessionContext>, assessments: Arc<dyn AssessmentApi>) -> Self {
        Self {
            session,
            assessments,
        }
    }

    /// # Errors
    ///
    /// Returns `AssessmentFormError::Validation` for missing fields or a bad
    /// age (no request is sent), or a session/gateway error.
    pub async fn create(&self, draft: &NewAssessmentDraft) -> Result<(), AssessmentFormError> {
        let record = draft.validate()?;
        let token = self.session.token()?;
        self.assessments.create_assessment(&token, &record).await?;
        info!(region = %record.student_region, "assessment created");
        Ok(())
    }
}
