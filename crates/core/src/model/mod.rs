mod account;
mod assessment;
mod deck;
mod ids;
mod level;
pub mod location;
mod profile;
mod progression;
mod roster;
mod session;
mod statistics;

pub use ids::{AssessmentId, ParseIdError, UserId};
pub use level::{Level, Status};

pub use account::{Registration, RegistrationDraft, UserAccount};
pub use assessment::{Assessment, NewAssessment, NewAssessmentDraft, StudentDetails};
pub use deck::{DeckShuffle, ImageDeck, KeepOrder, level_images};
pub use profile::{
    AvatarUpload, EditMode, PasswordChange, PasswordForm, ProfileDraft, ProfileField,
    ProfileUpdate, UserProfile,
};
pub use progression::{Progress, Transition, TransitionKind};
pub use roster::{Roster, RosterFilter};
pub use session::{AuthToken, Role, Session, StoredSession};
pub use statistics::{AgeFilter, LevelTallies, StatisticsFilter, StatisticsForm, StatisticsRecord};
