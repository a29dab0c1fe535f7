use std::sync::Arc;

use literacy_core::model::{
    Assessment, AssessmentId, DeckShuffle, Level, Progress, Transition,
};
use storage::repository::AssessmentApi;
use tracing::{debug, error, info, warn};

use crate::error::AssessmentSessionError;
use crate::session_context::SessionContext;

use super::session::{AssessmentSession, PendingCommit};

/// What a settled commit did, for the page to react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    Started,
    /// Moved up one level and the test continues.
    Advanced { level: Level },
    /// Advanced into the final level; the record is now completed.
    ReachedFinal { level: Level },
    /// Stopped early and marked completed at `level`.
    Stopped { level: Level },
}

impl CommitOutcome {
    fn of(transition: Transition, level_now: Level) -> Self {
        match transition {
            Transition::Start => CommitOutcome::Started,
            Transition::Advance { level, .. } if level.is_final() => {
                CommitOutcome::ReachedFinal { level }
            }
            Transition::Advance { level, .. } => CommitOutcome::Advanced { level },
            Transition::Terminate => CommitOutcome::Stopped { level: level_now },
        }
    }
}

/// Drives the start/advance/stop flow for one assessment against the backend.
pub struct AssessmentSessionService {
    session: Arc<SessionContext>,
    assessments: Arc<dyn AssessmentApi>,
    shuffle: Arc<dyn DeckShuffle>,
}

impl AssessmentSessionService {
    #[must_use]
    pub fn new(
        session: Arc<SessionContext>,
        assessments: Arc<dyn AssessmentApi>,
        shuffle: Arc<dyn DeckShuffle>,
    ) -> Self {
        Self {
            session,
            assessments,
            shuffle,
        }
    }

    /// Fetch an assessment and build its test-page state.
    ///
    /// A record whose status lags its level (a lost status write) is repaired
    /// here with one status write.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentSessionError` if there is no session, the fetch
    /// fails, or the repair write fails.
    pub async fn open(&self, id: AssessmentId) -> Result<AssessmentSession, AssessmentSessionError> {
        let token = self.session.token()?;
        let mut assessment = self.assessments.get_assessment(&token, id).await?;

        if let Some(status) = Progress::of(&assessment).reconcile_status() {
            self.assessments
                .update_status(&token, id, status)
                .await
                .map_err(|err| {
                    warn!(id = id.value(), error = %err, "status reconciliation failed");
                    err
                })?;
            info!(id = id.value(), %status, "reconciled lagging status");
            assessment.reconcile(status);
        }

        debug!(id = id.value(), level = %assessment.level(), "assessment opened");
        Ok(AssessmentSession::new(assessment, self.shuffle.as_ref()))
    }

    /// Start a not-yet-started assessment from a list view.
    ///
    /// Returns the updated record, or `None` when the record is already past
    /// `NotStarted`.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentSessionError` if there is no session or the write fails.
    pub async fn start(
        &self,
        assessment: &Assessment,
    ) -> Result<Option<Assessment>, AssessmentSessionError> {
        let Some(transition) = Progress::of(assessment).plan_start() else {
            return Ok(None);
        };
        let token = self.session.token()?;
        self.assessments
            .update_status(&token, assessment.id(), transition.status_write())
            .await?;
        let mut updated = assessment.clone();
        updated.apply(transition);
        info!(id = updated.id().value(), "assessment started");
        Ok(Some(updated))
    }

    /// Issue the writes for a commit: level first, then status.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentSessionError::StatusWriteFailed` when the level
    /// landed but the status did not, or `Gateway` when nothing was written.
    pub async fn persist(&self, commit: PendingCommit) -> Result<(), AssessmentSessionError> {
        let token = self.session.token()?;
        let id = commit.id();
        let transition = commit.transition();

        if let Some(level) = transition.level_write() {
            self.assessments
                .update_level(&token, id, level)
                .await
                .map_err(|err| {
                    error!(id = id.value(), error = %err, "level write failed");
                    err
                })?;
        }

        let status = transition.status_write();
        if let Err(err) = self.assessments.update_status(&token, id, status).await {
            error!(id = id.value(), error = %err, "status write failed");
            return Err(match transition.level_write() {
                Some(level) => AssessmentSessionError::StatusWriteFailed { level, source: err },
                None => err.into(),
            });
        }
        Ok(())
    }

    /// Release the session after `persist` and apply the transition if it landed.
    ///
    /// # Errors
    ///
    /// Passes `result`'s error through; the session is unchanged in that case.
    pub fn settle(
        &self,
        session: &mut AssessmentSession,
        commit: PendingCommit,
        result: Result<(), AssessmentSessionError>,
    ) -> Result<CommitOutcome, AssessmentSessionError> {
        session.settle(commit, result.is_ok(), self.shuffle.as_ref());
        result?;
        let outcome = CommitOutcome::of(commit.transition(), session.assessment().level());
        info!(id = commit.id().value(), ?outcome, "assessment updated");
        Ok(outcome)
    }

    /// Run the confirmed request end to end.
    ///
    /// Returns `Ok(None)` when nothing was pending or the request was a no-op.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentSessionError::Busy` if a commit is already in flight,
    /// or the persistence error otherwise.
    pub async fn confirm(
        &self,
        session: &mut AssessmentSession,
    ) -> Result<Option<CommitOutcome>, AssessmentSessionError> {
        let Some(commit) = session.begin_commit()? else {
            return Ok(None);
        };
        let result = self.persist(commit).await;
        self.settle(session, commit, result).map(Some)
    }
}
