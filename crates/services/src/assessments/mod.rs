mod session;
mod shuffle;
mod workflow;

// Public API of the assessment-session subsystem.
pub use crate::error::AssessmentSessionError;
pub use session::{AssessmentSession, PendingCommit};
pub use shuffle::RandomShuffle;
pub use workflow::{AssessmentSessionService, CommitOutcome};
