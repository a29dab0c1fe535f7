//! Shared error types for the services crate.

use thiserror::Error;

use literacy_core::ValidationError;
use literacy_core::model::Level;
use storage::repository::{GatewayError, StorageError};
use storage::sqlite::SqliteInitError;

/// Client-side failure taxonomy every service error maps onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No usable session, or the backend rejected the token. Send the user to login.
    AuthenticationMissing,
    /// A request was issued and failed.
    NetworkFailure,
    /// Blocked locally before any request.
    ValidationFailure,
}

fn gateway_kind(err: &GatewayError) -> ErrorKind {
    match err {
        GatewayError::Unauthorized => ErrorKind::AuthenticationMissing,
        _ => ErrorKind::NetworkFailure,
    }
}

/// Errors emitted by `SessionContext`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionContextError {
    #[error("not signed in")]
    NotSignedIn,
    #[error("could not encode session record: {0}")]
    Encode(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl SessionContextError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            SessionContextError::NotSignedIn => ErrorKind::AuthenticationMissing,
            SessionContextError::Encode(_) | SessionContextError::Storage(_) => {
                ErrorKind::NetworkFailure
            }
        }
    }
}

/// Errors emitted by `AuthService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("login response did not include a usable token and role")]
    MalformedLogin,
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    Session(#[from] SessionContextError),
}

impl AuthError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) => ErrorKind::ValidationFailure,
            AuthError::MalformedLogin => ErrorKind::NetworkFailure,
            AuthError::Gateway(err) => gateway_kind(err),
            AuthError::Session(err) => err.kind(),
        }
    }
}

/// Errors emitted by `AssessmentSessionService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AssessmentSessionError {
    #[error("an update for this assessment is still in progress")]
    Busy,
    /// The level write landed but the status write did not.
    #[error("level was saved as {level} but the status update failed: {source}")]
    StatusWriteFailed { level: Level, source: GatewayError },
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    Session(#[from] SessionContextError),
}

impl AssessmentSessionError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            AssessmentSessionError::Busy => ErrorKind::ValidationFailure,
            AssessmentSessionError::StatusWriteFailed { source, .. } => gateway_kind(source),
            AssessmentSessionError::Gateway(err) => gateway_kind(err),
            AssessmentSessionError::Session(err) => err.kind(),
        }
    }
}

/// Errors emitted by `StatisticsService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StatisticsError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    Session(#[from] SessionContextError),
}

impl StatisticsError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            StatisticsError::Validation(_) => ErrorKind::ValidationFailure,
            StatisticsError::Gateway(err) => gateway_kind(err),
            StatisticsError::Session(err) => err.kind(),
        }
    }
}

/// Errors emitted by `RosterService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RosterError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    Session(#[from] SessionContextError),
}

impl RosterError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            RosterError::Gateway(err) => gateway_kind(err),
            RosterError::Session(err) => err.kind(),
        }
    }
}

/// Errors emitted by `ProfileService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProfileError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    Session(#[from] SessionContextError),
}

impl ProfileError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProfileError::Validation(_) => ErrorKind::ValidationFailure,
            ProfileError::Gateway(err) => gateway_kind(err),
            ProfileError::Session(err) => err.kind(),
        }
    }
}

/// Errors emitted by `AccountService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AccountError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    Session(#[from] SessionContextError),
}

impl AccountError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccountError::Validation(_) => ErrorKind::ValidationFailure,
            AccountError::Gateway(err) => gateway_kind(err),
            AccountError::Session(err) => err.kind(),
        }
    }
}

/// Errors emitted by `AssessmentFormService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AssessmentFormError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    Session(#[from] SessionContextError),
}

impl AssessmentFormError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            AssessmentFormError::Validation(_) => ErrorKind::ValidationFailure,
            AssessmentFormError::Gateway(err) => gateway_kind(err),
            AssessmentFormError::Session(err) => err.kind(),
        }
    }
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Session(#[from] SessionContextError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_maps_to_authentication_missing() {
        let err = RosterError::from(GatewayError::Unauthorized);
        assert_eq!(err.kind(), ErrorKind::AuthenticationMissing);

        let err = AssessmentSessionError::StatusWriteFailed {
            level: Level::Word,
            source: GatewayError::Transport("reset".into()),
        };
        assert_eq!(err.kind(), ErrorKind::NetworkFailure);
        assert!(err.to_string().contains("Word Level"));
    }

    #[test]
    fn local_rejections_are_validation_failures() {
        assert_eq!(
            StatisticsError::from(ValidationError::ReversedAgeRange { min: 9, max: 3 }).kind(),
            ErrorKind::ValidationFailure
        );
        assert_eq!(
            AssessmentSessionError::Busy.kind(),
            ErrorKind::ValidationFailure
        );
        assert_eq!(
            ProfileError::from(SessionContextError::NotSignedIn).kind(),
            ErrorKind::AuthenticationMissing
        );
    }
}
