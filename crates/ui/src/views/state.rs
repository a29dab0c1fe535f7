use dioxus::prelude::*;
use services::{
    AccountError, AssessmentFormError, AssessmentSessionError, AuthError, ErrorKind, ProfileError,
    RosterError, StatisticsError,
};

/// A service failure as the views present it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewError {
    kind: ErrorKind,
    message: String,
}

impl ViewError {
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The session is gone or was rejected.
    #[must_use]
    pub fn needs_login(&self) -> bool {
        self.kind == ErrorKind::AuthenticationMissing
    }

    fn from_service(kind: ErrorKind, detail: String) -> Self {
        let message = match kind {
            ErrorKind::AuthenticationMissing => {
                "Your session has ended. Please log in again.".to_owned()
            }
            ErrorKind::NetworkFailure => "Something went wrong. Please try again.".to_owned(),
            ErrorKind::ValidationFailure => capitalize(&detail),
        };
        Self { kind, message }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

macro_rules! view_error_from {
    ($($err:ty),+ $(,)?) => {
        $(
            impl From<$err> for ViewError {
                fn from(err: $err) -> Self {
                    Self::from_service(err.kind(), err.to_string())
                }
            }
        )+
    };
}

view_error_from!(
    AuthError,
    AssessmentSessionError,
    StatisticsError,
    RosterError,
    ProfileError,
    AccountError,
    AssessmentFormError,
);

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(err.clone()),
            None => ViewState::Error(ViewError::new(
                ErrorKind::NetworkFailure,
                "Something went wrong. Please try again.",
            )),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use literacy_core::ValidationError;
    use storage::GatewayError;

    #[test]
    fn validation_errors_keep_their_detail() {
        let err = ViewError::from(AccountError::from(ValidationError::missing("Email")));
        assert_eq!(err.kind(), ErrorKind::ValidationFailure);
        assert_eq!(err.message(), "Please fill in the Email");
    }

    #[test]
    fn network_errors_are_generic_and_401_needs_login() {
        let err = ViewError::from(RosterError::from(GatewayError::Transport("boom".into())));
        assert_eq!(err.message(), "Something went wrong. Please try again.");
        assert!(!err.needs_login());

        let err = ViewError::from(RosterError::from(GatewayError::Unauthorized));
        assert!(err.needs_login());
    }
}
