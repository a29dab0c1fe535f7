#![forbid(unsafe_code)]

pub mod account_service;
pub mod app_services;
pub mod assessment_form_service;
pub mod assessments;
pub mod auth_service;
pub mod error;
pub mod profile_service;
pub mod roster_service;
pub mod session_context;
pub mod statistics_service;

pub use account_service::AccountService;
pub use app_services::AppServices;
pub use assessment_form_service::AssessmentFormService;
pub use assessments::{
    AssessmentSession, AssessmentSessionService, CommitOutcome, PendingCommit, RandomShuffle,
};
pub use auth_service::AuthService;
pub use error::{
    AccountError, AppServicesError, AssessmentFormError, AssessmentSessionError, AuthError,
    ErrorKind, ProfileError, RosterError, SessionContextError, StatisticsError,
};
pub use profile_service::ProfileService;
pub use roster_service::RosterService;
pub use session_context::SessionContext;
pub use statistics_service::{StatisticsReport, StatisticsService};
