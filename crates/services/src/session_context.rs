use std::sync::{Arc, PoisonError, RwLock};

use literacy_core::model::{AuthToken, Role, Session, StoredSession, UserProfile};
use storage::repository::{SESSION_KEY, SessionRecordRepository};
use tracing::{debug, info, warn};

use crate::error::SessionContextError;

/// Sole owner of the signed-in session.
///
/// Holds the persisted record and an in-memory copy. Only login, logout and
/// profile merges write it; everything else reads.
pub struct SessionContext {
    records: Arc<dyn SessionRecordRepository>,
    current: RwLock<Option<Session>>,
}

impl SessionContext {
    #[must_use]
    pub fn new(records: Arc<dyn SessionRecordRepository>) -> Self {
        Self {
            records,
            current: RwLock::new(None),
        }
    }

    /// Read the persisted record into memory.
    ///
    /// A record that is missing, undecodable, or lacks a token or known role
    /// counts as logged out.
    ///
    /// # Errors
    ///
    /// Returns `SessionContextError::Storage` if the store cannot be read.
    pub async fn load(&self) -> Result<Option<Session>, SessionContextError> {
        let raw = self.records.get_record(SESSION_KEY).await?;
        let session = raw.and_then(|raw| match serde_json::from_str::<StoredSession>(&raw) {
            Ok(stored) => stored.into_session(),
            Err(err) => {
                warn!(error = %err, "ignoring unreadable session record");
                None
            }
        });
        debug!(signed_in = session.is_some(), "session record loaded");
        self.set(session.clone());
        Ok(session)
    }

    #[must_use]
    pub fn current(&self) -> Option<Session> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|session| session.role)
    }

    /// The bearer token for the next request.
    ///
    /// # Errors
    ///
    /// Returns `SessionContextError::NotSignedIn` when there is no session.
    pub fn token(&self) -> Result<AuthToken, SessionContextError> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|session| session.token.clone())
            .ok_or(SessionContextError::NotSignedIn)
    }

    /// Persist a fresh login and make it current.
    ///
    /// # Errors
    ///
    /// Returns `SessionContextError` if the record cannot be written; the
    /// in-memory session is left unchanged in that case.
    pub async fn establish(&self, session: Session) -> Result<(), SessionContextError> {
        self.persist(&session).await?;
        info!(role = %session.role, "session established");
        self.set(Some(session));
        Ok(())
    }

    /// Overlay a fetched profile onto the current session and persist it.
    ///
    /// # Errors
    ///
    /// Returns `SessionContextError::NotSignedIn` without a session, or a
    /// storage error if the record cannot be written.
    pub async fn merge_profile(&self, profile: UserProfile) -> Result<Session, SessionContextError> {
        let mut session = self.current().ok_or(SessionContextError::NotSignedIn)?;
        session.merge_profile(profile);
        self.persist(&session).await?;
        self.set(Some(session.clone()));
        Ok(session)
    }

    /// Forget the session locally and on disk.
    ///
    /// # Errors
    ///
    /// Returns `SessionContextError::Storage` if the record cannot be removed.
    /// The in-memory session is cleared regardless.
    pub async fn clear(&self) -> Result<(), SessionContextError> {
        self.set(None);
        self.records.delete_record(SESSION_KEY).await?;
        info!("session cleared");
        Ok(())
    }

    async fn persist(&self, session: &Session) -> Result<(), SessionContextError> {
        let json = serde_json::to_string(&session.to_stored())
            .map_err(|err| SessionContextError::Encode(err.to_string()))?;
        self.records.put_record(SESSION_KEY, &json).await?;
        Ok(())
    }

    fn set(&self, session: Option<Session>) {
        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = session;
    }
}
