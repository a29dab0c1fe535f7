use async_trait::async_trait;
use literacy_core::model::{
    Assessment, AssessmentId, AuthToken, Level, NewAssessment, PasswordChange, ProfileUpdate,
    Registration, Session, StatisticsFilter, StatisticsRecord, Status, StoredSession, UserAccount,
    UserId, UserProfile,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by the local record store.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Errors surfaced by the remote data gateway.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GatewayError {
    /// The backend rejected the bearer token (or none was sent).
    #[error("not authorized")]
    Unauthorized,

    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("could not decode response: {0}")]
    Decode(String),

    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

//
// ─── LOGIN ─────────────────────────────────────────────────────────────────────
//

/// Nested user object some backends return beside the token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoginUser {
    #[serde(default)]
    pub id: Option<UserId>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Body of a successful `auth/login`.
///
/// Role and id are accepted either at the top level or under `user`.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default, alias = "userId")]
    pub id: Option<UserId>,
    #[serde(default)]
    pub user: Option<LoginUser>,
    #[serde(flatten)]
    pub profile: UserProfile,
}

impl fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginResponse")
            .field("role", &self.role)
            .field("id", &self.id)
            .field("user", &self.user)
            .finish_non_exhaustive()
    }
}

impl LoginResponse {
    #[must_use]
    pub fn new(token: impl Into<String>, role: &str, id: Option<UserId>) -> Self {
        Self {
            token: token.into(),
            role: Some(role.to_owned()),
            id,
            user: None,
            profile: UserProfile::default(),
        }
    }

    /// The record to persist after login.
    #[must_use]
    pub fn into_stored(self) -> StoredSession {
        let nested = self.user.unwrap_or_default();
        StoredSession {
            token: Some(self.token),
            role: self.role.or(nested.role),
            id: self.id.or(nested.id),
            profile: self.profile,
        }
    }

    /// `None` when the response lacks a usable token or a known role.
    #[must_use]
    pub fn into_session(self) -> Option<Session> {
        self.into_stored().into_session()
    }
}

//
// ─── REMOTE GATEWAY CONTRACTS ──────────────────────────────────────────────────
//

#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for a token.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Unauthorized` for bad credentials, or other
    /// gateway errors.
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, GatewayError>;

    /// Create a volunteer or admin account.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` if the backend rejects the registration.
    async fn register(
        &self,
        token: &AuthToken,
        registration: &Registration,
    ) -> Result<(), GatewayError>;
}

#[async_trait]
pub trait ProfileApi: Send + Sync {
    /// # Errors
    ///
    /// Returns `GatewayError` on request failure.
    async fn get_profile(&self, token: &AuthToken) -> Result<UserProfile, GatewayError>;

    /// Send all profile fields and an optional avatar in one multipart request.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` on request failure.
    async fn update_profile(
        &self,
        token: &AuthToken,
        update: &ProfileUpdate,
    ) -> Result<(), GatewayError>;

    /// # Errors
    ///
    /// Returns `GatewayError` on request failure, including a wrong current
    /// password.
    async fn change_password(
        &self,
        token: &AuthToken,
        change: &PasswordChange,
    ) -> Result<(), GatewayError>;
}

#[async_trait]
pub trait AssessmentApi: Send + Sync {
    /// All assessments the caller's role may see.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` on request failure.
    async fn list_assessments(&self, token: &AuthToken) -> Result<Vec<Assessment>, GatewayError>;

    /// # Errors
    ///
    /// Returns `GatewayError` on request failure.
    async fn get_assessment(
        &self,
        token: &AuthToken,
        id: AssessmentId,
    ) -> Result<Assessment, GatewayError>;

    /// # Errors
    ///
    /// Returns `GatewayError` on request failure.
    async fn create_assessment(
        &self,
        token: &AuthToken,
        assessment: &NewAssessment,
    ) -> Result<(), GatewayError>;

    /// # Errors
    ///
    /// Returns `GatewayError` on request failure.
    async fn update_status(
        &self,
        token: &AuthToken,
        id: AssessmentId,
        status: Status,
    ) -> Result<(), GatewayError>;

    /// # Errors
    ///
    /// Returns `GatewayError` on request failure.
    async fn update_level(
        &self,
        token: &AuthToken,
        id: AssessmentId,
        level: Level,
    ) -> Result<(), GatewayError>;

    /// Delete every listed assessment in one call.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` on request failure.
    async fn delete_assessments(
        &self,
        token: &AuthToken,
        ids: &[AssessmentId],
    ) -> Result<(), GatewayError>;
}

#[async_trait]
pub trait StatisticsApi: Send + Sync {
    /// Records matching `filter`; only their levels are used client-side.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` on request failure.
    async fn fetch_statistics(
        &self,
        token: &AuthToken,
        filter: &StatisticsFilter,
    ) -> Result<Vec<StatisticsRecord>, GatewayError>;
}

#[async_trait]
pub trait UserApi: Send + Sync {
    /// # Errors
    ///
    /// Returns `GatewayError` on request failure.
    async fn list_users(&self, token: &AuthToken) -> Result<Vec<UserAccount>, GatewayError>;
}

/// Aggregates the gateway contracts behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Gateway {
    pub auth: Arc<dyn AuthApi>,
    pub profiles: Arc<dyn ProfileApi>,
    pub assessments: Arc<dyn AssessmentApi>,
    pub statistics: Arc<dyn StatisticsApi>,
    pub users: Arc<dyn UserApi>,
}

impl Gateway {
    /// Use one backend value for every contract.
    #[must_use]
    pub fn from_backend<B>(backend: B) -> Self
    where
        B: AuthApi + ProfileApi + AssessmentApi + StatisticsApi + UserApi + Clone + 'static,
    {
        Self {
            auth: Arc::new(backend.clone()),
            profiles: Arc::new(backend.clone()),
            assessments: Arc::new(backend.clone()),
            statistics: Arc::new(backend.clone()),
            users: Arc::new(backend),
        }
    }
}

//
// ─── LOCAL RECORD STORE ────────────────────────────────────────────────────────
//

/// Key of the persisted session record.
pub const SESSION_KEY: &str = "user";

/// Opaque key/value records kept on this machine between runs.
#[async_trait]
pub trait SessionRecordRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    async fn get_record(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Insert or replace the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be stored.
    async fn put_record(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be written.
    async fn delete_record(&self, key: &str) -> Result<(), StorageError>;
}

/// Simple in-memory record store for tests and prototyping.
#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    records: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRecordRepository for InMemorySessionStore {
    async fn get_record(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .records
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    async fn put_record(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn delete_record(&self, key: &str) -> Result<(), StorageError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(key);
        Ok(())
    }
}

/// Local persistence behind a trait object.
#[derive(Clone)]
pub struct LocalStore {
    pub records: Arc<dyn SessionRecordRepository>,
}

impl LocalStore {
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            records: Arc::new(InMemorySessionStore::new()),
        }
    }
}
