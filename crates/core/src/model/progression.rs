//! Level/status state machine for a single assessment.
//!
//! Planning is pure: callers ask for a [`Transition`], persist its writes, and
//! only then apply it locally. Requests that make no sense in the current
//! state (advancing past the final level, touching a completed record) plan to
//! `None` and are treated as no-ops.

use crate::model::assessment::Assessment;
use crate::model::level::{Level, Status};

/// What the user asked for, before confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionKind {
    Start,
    Advance,
    Terminate,
}

/// A confirmed, persistable change of level and/or status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// `NotStarted` → `Started`, level unchanged.
    Start,
    /// Move to `level`, then set `status`. Two independent writes.
    Advance { level: Level, status: Status },
    /// Mark as `Completed` without changing level.
    Terminate,
}

impl Transition {
    /// The level write this transition needs, if any. Always issued first.
    #[must_use]
    pub const fn level_write(self) -> Option<Level> {
        match self {
            Transition::Advance { level, .. } => Some(level),
            Transition::Start | Transition::Terminate => None,
        }
    }

    /// The status write this transition needs.
    #[must_use]
    pub const fn status_write(self) -> Status {
        match self {
            Transition::Start => Status::Started,
            Transition::Advance { status, .. } => status,
            Transition::Terminate => Status::Completed,
        }
    }

    #[must_use]
    pub const fn kind(self) -> TransitionKind {
        match self {
            Transition::Start => TransitionKind::Start,
            Transition::Advance { .. } => TransitionKind::Advance,
            Transition::Terminate => TransitionKind::Terminate,
        }
    }
}

/// Snapshot of where an assessment stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    level: Level,
    status: Status,
}

impl Progress {
    #[must_use]
    pub const fn new(level: Level, status: Status) -> Self {
        Self { level, status }
    }

    #[must_use]
    pub fn of(assessment: &Assessment) -> Self {
        Self::new(assessment.level(), assessment.status())
    }

    #[must_use]
    pub const fn level(self) -> Level {
        self.level
    }

    #[must_use]
    pub const fn status(self) -> Status {
        self.status
    }

    /// No advance is possible at the final level and no terminate once completed;
    /// either condition ends the session.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self.level.is_final() || self.status == Status::Completed
    }

    #[must_use]
    pub fn plan(self, kind: TransitionKind) -> Option<Transition> {
        match kind {
            TransitionKind::Start => self.plan_start(),
            TransitionKind::Advance => self.plan_advance(),
            TransitionKind::Terminate => self.plan_terminate(),
        }
    }

    #[must_use]
    pub fn plan_start(self) -> Option<Transition> {
        (self.status == Status::NotStarted && !self.is_terminal()).then_some(Transition::Start)
    }

    #[must_use]
    pub fn plan_advance(self) -> Option<Transition> {
        if self.is_terminal() {
            return None;
        }
        let level = self.level.next()?;
        let status = if level.is_final() {
            Status::Completed
        } else {
            Status::Started
        };
        Some(Transition::Advance { level, status })
    }

    #[must_use]
    pub fn plan_terminate(self) -> Option<Transition> {
        (!self.is_terminal()).then_some(Transition::Terminate)
    }

    /// Progress after `transition` has been persisted.
    #[must_use]
    pub fn apply(self, transition: Transition) -> Self {
        match transition {
            Transition::Advance { level, status } => Self::new(level.max(self.level), status),
            Transition::Start | Transition::Terminate => {
                Self::new(self.level, transition.status_write())
            }
        }
    }

    /// Status a record should carry given its level, when the stored one lags.
    ///
    /// An advance writes level before status; if the second write was lost the
    /// record shows a level its status does not agree with.
    #[must_use]
    pub fn reconcile_status(self) -> Option<Status> {
        match (self.level, self.status) {
            (Level::Comprehension, Status::NotStarted | Status::Started) => Some(Status::Completed),
            (level, Status::NotStarted) if level != Level::Nothing => Some(Status::Started),
            _ => None,
        }
    }
}

impl Assessment {
    /// Apply a persisted transition to the local record.
    pub fn apply(&mut self, transition: Transition) {
        let next = Progress::of(self).apply(transition);
        self.set_progress(next.level(), next.status());
    }

    /// Overwrite the status after a reconciliation write.
    pub fn reconcile(&mut self, status: Status) {
        self.set_progress(self.level(), status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AssessmentId, StudentDetails};

    fn record(level: Level, status: Status) -> Assessment {
        Assessment::new(AssessmentId::new(1), level, status, StudentDetails::default())
    }

    #[test]
    fn advance_from_word_level_stays_started() {
        let mut assessment = record(Level::Word, Status::Started);
        let transition = Progress::of(&assessment).plan_advance().unwrap();
        assert_eq!(transition.level_write(), Some(Level::Paragraph));
        assert_eq!(transition.status_write(), Status::Started);

        assessment.apply(transition);
        assert_eq!(assessment.level(), Level::Paragraph);
        assert_eq!(assessment.status(), Status::Started);
    }

    #[test]
    fn advance_into_comprehension_completes() {
        let mut assessment = record(Level::Paragraph, Status::Started);
        let transition = Progress::of(&assessment).plan_advance().unwrap();
        assessment.apply(transition);
        assert_eq!(assessment.level(), Level::Comprehension);
        assert_eq!(assessment.status(), Status::Completed);
    }

    #[test]
    fn advance_at_final_level_is_noop() {
        let progress = Progress::new(Level::Comprehension, Status::Completed);
        assert_eq!(progress.plan_advance(), None);
        assert_eq!(progress.plan_terminate(), None);
    }

    #[test]
    fn terminate_keeps_level() {
        let mut assessment = record(Level::Letter, Status::Started);
        let transition = Progress::of(&assessment).plan_terminate().unwrap();
        assert_eq!(transition.level_write(), None);
        assessment.apply(transition);
        assert_eq!(assessment.level(), Level::Letter);
        assert_eq!(assessment.status(), Status::Completed);
    }

    #[test]
    fn completed_record_is_terminal() {
        let progress = Progress::new(Level::Word, Status::Completed);
        assert!(progress.is_terminal());
        assert_eq!(progress.plan(TransitionKind::Advance), None);
        assert_eq!(progress.plan(TransitionKind::Terminate), None);
        assert_eq!(progress.plan(TransitionKind::Start), None);
    }

    #[test]
    fn every_advance_chain_is_monotonic() {
        for start in Level::ALL {
            let mut progress = Progress::new(start, Status::Started);
            let mut previous = progress.level();
            while let Some(transition) = progress.plan_advance() {
                progress = progress.apply(transition);
                assert!(progress.level() > previous);
                let expected = if progress.level().is_final() {
                    Status::Completed
                } else {
                    Status::Started
                };
                assert_eq!(progress.status(), expected);
                previous = progress.level();
            }
            assert!(progress.is_terminal());
        }
    }

    #[test]
    fn start_only_from_not_started() {
        assert_eq!(
            Progress::new(Level::Nothing, Status::NotStarted).plan_start(),
            Some(Transition::Start)
        );
        assert_eq!(Progress::new(Level::Nothing, Status::Started).plan_start(), None);
    }

    #[test]
    fn reconcile_detects_lagging_status() {
        assert_eq!(
            Progress::new(Level::Comprehension, Status::Started).reconcile_status(),
            Some(Status::Completed)
        );
        assert_eq!(
            Progress::new(Level::Word, Status::NotStarted).reconcile_status(),
            Some(Status::Started)
        );
        assert_eq!(
            Progress::new(Level::Nothing, Status::NotStarted).reconcile_status(),
            None
        );
        assert_eq!(
            Progress::new(Level::Word, Status::Completed).reconcile_status(),
            None
        );
    }
}
