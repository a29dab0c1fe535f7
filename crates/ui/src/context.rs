use std::sync::Arc;

use services::{
    AccountService, AssessmentFormService, AssessmentSessionService, AuthService, ProfileService,
    RosterService, SessionContext, StatisticsService,
};

/// What the composition root hands the UI.
pub trait UiApp: Send + Sync {
    fn session(&self) -> Arc<SessionContext>;
    fn auth(&self) -> Arc<AuthService>;
    fn assessment_sessions(&self) -> Arc<AssessmentSessionService>;
    fn roster(&self) -> Arc<RosterService>;
    fn statistics(&self) -> Arc<StatisticsService>;
    fn profile(&self) -> Arc<ProfileService>;
    fn accounts(&self) -> Arc<AccountService>;
    fn assessment_form(&self) -> Arc<AssessmentFormService>;

    /// URL prefix the deck images are served under, without a trailing slash.
    fn image_base(&self) -> String;
}

#[derive(Clone)]
pub struct AppContext {
    session: Arc<SessionContext>,
    auth: Arc<AuthService>,
    assessment_sessions: Arc<AssessmentSessionService>,
    roster: Arc<RosterService>,
    statistics: Arc<StatisticsService>,
    profile: Arc<ProfileService>,
    accounts: Arc<AccountService>,
    assessment_form: Arc<AssessmentFormService>,
    image_base: Arc<str>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            session: app.session(),
            auth: app.auth(),
            assessment_sessions: app.assessment_sessions(),
            roster: app.roster(),
            statistics: app.statistics(),
            profile: app.profile(),
            accounts: app.accounts(),
            assessment_form: app.assessment_form(),
            image_base: Arc::from(app.image_base().trim_end_matches('/')),
        }
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

    /// Source URL for a deck image file name.
    #[must_use]
    pub fn image_src(&self, name: &str) -> String {
        format!("{}/{name}", self.image_base)
    }
}

// Provided by the composition root (`crates/app`) or the view test harness.

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
