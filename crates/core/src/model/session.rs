use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::ids::UserId;
use crate::model::profile::UserProfile;

/// Account role as labelled by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Volunteer running assessments.
    User,
    Admin,
    /// Management.
    Mngt,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::User, Role::Admin, Role::Mngt];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
            Role::Mngt => "mngt",
        }
    }

    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.label() == label)
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Role::User => "Volunteer",
            Role::Admin => "Admin",
            Role::Mngt => "Management",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Bearer token issued at login. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(..)")
    }
}

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: Option<UserId>,
    pub role: Role,
    pub token: AuthToken,
    pub profile: UserProfile,
}

impl Session {
    #[must_use]
    pub fn new(user_id: Option<UserId>, role: Role, token: AuthToken) -> Self {
        Self {
            user_id,
            role,
            token,
            profile: UserProfile::default(),
        }
    }

    /// Overlay freshly fetched profile fields, keeping identity and token.
    pub fn merge_profile(&mut self, profile: UserProfile) {
        self.profile = profile;
    }

    #[must_use]
    pub fn to_stored(&self) -> StoredSession {
        StoredSession {
            token: Some(self.token.as_str().to_owned()),
            role: Some(self.role.label().to_owned()),
            id: self.user_id,
            profile: self.profile.clone(),
        }
    }
}

/// The session record exactly as persisted under the `user` key.
///
/// Every field is optional so that stale or hand-edited records still decode;
/// [`StoredSession::into_session`] decides whether it represents a login.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, alias = "userId", skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    #[serde(flatten)]
    pub profile: UserProfile,
}

impl fmt::Debug for StoredSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredSession")
            .field("has_token", &self.token.is_some())
            .field("role", &self.role)
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl StoredSession {
    /// A record without a non-empty token or with an unknown role is a
    /// logged-out state.
    #[must_use]
    pub fn into_session(self) -> Option<Session> {
        let token = AuthToken::new(self.token?);
        if token.is_empty() {
            return None;
        }
        let role = Role::from_label(self.role.as_deref()?)?;
        Some(Session {
            user_id: self.id,
            role,
            token,
            profile: self.profile,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_labels_match_backend() {
        assert_eq!(serde_json::to_string(&Role::Mngt).unwrap(), "\"mngt\"");
        assert_eq!(Role::from_label("admin"), Some(Role::Admin));
        assert_eq!(Role::from_label("root"), None);
    }

    #[test]
    fn token_is_redacted_in_debug() {
        let session = Session::new(None, Role::User, AuthToken::new("abc.def"));
        assert!(!format!("{session:?}").contains("abc.def"));
        assert!(!format!("{:?}", session.to_stored()).contains("abc.def"));
    }

    #[test]
    fn stored_record_round_trips_into_session() {
        let mut session = Session::new(Some(UserId::new(4)), Role::Admin, AuthToken::new("t"));
        session.merge_profile(UserProfile {
            full_name: "Ana".into(),
            ..UserProfile::default()
        });
        let json = serde_json::to_string(&session.to_stored()).unwrap();
        let restored: StoredSession = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.into_session(), Some(session));
    }

    #[test]
    fn incomplete_records_are_logged_out() {
        let no_token: StoredSession = serde_json::from_str(r#"{"role":"user"}"#).unwrap();
        assert_eq!(no_token.into_session(), None);

        let blank_token: StoredSession =
            serde_json::from_str(r#"{"token":" ","role":"user"}"#).unwrap();
        assert_eq!(blank_token.into_session(), None);

        let bad_role: StoredSession =
            serde_json::from_str(r#"{"token":"t","role":"guest"}"#).unwrap();
        assert_eq!(bad_role.into_session(), None);
    }

    #[test]
    fn accepts_user_id_alias() {
        let record: StoredSession =
            serde_json::from_str(r#"{"token":"t","role":"user","userId":9}"#).unwrap();
        let session = record.into_session().unwrap();
        assert_eq!(session.user_id, Some(UserId::new(9)));
    }
}
