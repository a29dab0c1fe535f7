use std::sync::Arc;

use literacy_core::model::DeckShuffle;
use storage::repository::{Gateway, LocalStore};
use storage::{ApiConfig, HttpGateway};

use crate::account_service::AccountService;
use crate::assessment_form_service::AssessmentFormService;
use crate::assessments::{AssessmentSessionService, RandomShuffle};
use crate::auth_service::AuthService;
use crate::error::AppServicesError;
use crate::profile_service::ProfileService;
use crate::roster_service::RosterService;
use crate::session_context::SessionContext;
use crate::statistics_service::StatisticsService;

/// Assembles app-facing services over one gateway and one local store.
#[derive(Clone)]
pub struct AppServices {
    session: Arc<SessionContext>,
    auth: Arc<AuthService>,
    assessment_sessions: Arc<AssessmentSessionService>,
    roster: Arc<RosterService>,
    statistics: Arc<StatisticsService>,
    profile: Arc<ProfileService>,
    accounts: Arc<AccountService>,
    assessment_form: Arc<AssessmentFormService>,
}

impl AppServices {
    /// Build services that talk to the REST backend and keep the session in `SQLite`.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails or the
    /// stored session cannot be read.
    pub async fn new_sqlite(db_url: &str, api: ApiConfig) -> Result<Self, AppServicesError> {
        let store = LocalStore::sqlite(db_url).await?;
        let gateway = HttpGateway::new(api).into_gateway();
        Self::assemble(gateway, store, Arc::new(RandomShuffle)).await
    }

    /// Build services over any gateway with an in-memory session store.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the session store cannot be read.
    pub async fn in_memory(
        gateway: Gateway,
        shuffle: Arc<dyn DeckShuffle>,
    ) -> Result<Self, AppServicesError> {
        Self::assemble(gateway, LocalStore::in_memory(), shuffle).await
    }

    /// Wire services together and restore any persisted session.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Session` if the session record cannot be read.
    pub async fn assemble(
        gateway: Gateway,
        store: LocalStore,
        shuffle: Arc<dyn DeckShuffle>,
    ) -> Result<Self, AppServicesError> {
        let session = Arc::new(SessionContext::new(Arc::clone(&store.records)));
        session.load().await?;

        let auth = Arc::new(AuthService::new(
            Arc::clone(&session),
            Arc::clone(&gateway.auth),
        ));
        let assessment_sessions = Arc::new(AssessmentSessionService::new(
            Arc::clone(&session),
            Arc::clone(&gateway.assessments),
            shuffle,
        ));
        let roster = Arc::new(RosterService::new(
            Arc::clone(&session),
            Arc::clone(&gateway.assessments),
        ));
        let statistics = Arc::new(StatisticsService::new(
            Arc::clone(&session),
            Arc::clone(&gateway.statistics),
        ));
        let profile = Arc::new(ProfileService::new(
            Arc::clone(&session),
            Arc::clone(&gateway.profiles),
        ));
        let accounts = Arc::new(AccountService::new(
            Arc::clone(&session),
            Arc::clone(&gateway.auth),
            Arc::clone(&gateway.users),
        ));
        let assessment_form = Arc::new(AssessmentFormService::new(
            Arc::clone(&session),
            Arc::clone(&gateway.assessments),
        ));

        Ok(Self {
            session,
            auth,
            assessment_sessions,
            roster,
            statistics,
            profile,
            accounts,
            assessment_form,
        })
    }

    #[must_use]
    pub fn session(&self) -> Arc<SessionContext> {
        Arc::clone(&self.session)
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn assessment_sessions(&self) -> Arc<AssessmentSessionService> {
        Arc::clone(&self.assessment_sessions)
    }

    #[must_use]
    pub fn roster(&self) -> Arc<RosterService> {
        Arc::clone(&self.roster)
    }

    #[must_use]
    pub fn statistics(&self) -> Arc<StatisticsService> {
        Arc::clone(&self.statistics)
    }

    #[must_use]
    pub fn profile(&self) -> Arc<ProfileService> {
        Arc::clone(&self.profile)
    }

    #[must_use]
    pub fn accounts(&self) -> Arc<AccountService> {
        Arc::clone(&self.accounts)
    }

    #[must_use]
    pub fn assessment_form(&self) -> Arc<AssessmentFormService> {
        Arc::clone(&self.assessment_form)
    }
}
