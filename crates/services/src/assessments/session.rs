use literacy_core::model::{
    Assessment, AssessmentId, DeckShuffle, ImageDeck, Progress, Transition, TransitionKind,
};

use crate::error::AssessmentSessionError;

/// A confirmed transition handed to the backend. Holding one means the
/// session is busy until it is settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingCommit {
    id: AssessmentId,
    transition: Transition,
}

impl PendingCommit {
    #[must_use]
    pub fn id(&self) -> AssessmentId {
        self.id
    }

    #[must_use]
    pub fn transition(&self) -> Transition {
        self.transition
    }
}

/// Test-page state for one assessment: the record, its image deck, the
/// confirmation prompt and the in-flight guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentSession {
    assessment: Assessment,
    deck: ImageDeck,
    pending: Option<TransitionKind>,
    in_flight: bool,
}

impl AssessmentSession {
    pub(crate) fn new(assessment: Assessment, shuffle: &dyn DeckShuffle) -> Self {
        let deck = ImageDeck::for_level(assessment.level(), shuffle);
        Self {
            assessment,
            deck,
            pending: None,
            in_flight: false,
        }
    }

    #[must_use]
    pub fn assessment(&self) -> &Assessment {
        &self.assessment
    }

    #[must_use]
    pub fn deck(&self) -> &ImageDeck {
        &self.deck
    }

    #[must_use]
    pub fn progress(&self) -> Progress {
        Progress::of(&self.assessment)
    }

    /// The transition awaiting confirmation, if a prompt is open.
    #[must_use]
    pub fn pending(&self) -> Option<TransitionKind> {
        self.pending
    }

    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Nothing further can be requested.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.progress().is_terminal()
    }

    pub fn next_image(&mut self) {
        self.deck.next();
    }

    pub fn prev_image(&mut self) {
        self.deck.prev();
    }

    /// Open the confirmation prompt for `kind`.
    ///
    /// Returns `false`, leaving no prompt open, when the request has no
    /// effect in the current state or a write is still in flight.
    pub fn request(&mut self, kind: TransitionKind) -> bool {
        if self.in_flight || self.progress().plan(kind).is_none() {
            self.pending = None;
            return false;
        }
        self.pending = Some(kind);
        true
    }

    /// Dismiss the prompt without writing anything.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Take the confirmed request and mark the session busy.
    ///
    /// Returns `Ok(None)` when no prompt is open or the request planned to a
    /// no-op.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentSessionError::Busy` while a previous commit is unsettled.
    pub fn begin_commit(&mut self) -> Result<Option<PendingCommit>, AssessmentSessionError> {
        if self.in_flight {
            return Err(AssessmentSessionError::Busy);
        }
        let Some(kind) = self.pending.take() else {
            return Ok(None);
        };
        let Some(transition) = self.progress().plan(kind) else {
            return Ok(None);
        };
        self.in_flight = true;
        Ok(Some(PendingCommit {
            id: self.assessment.id(),
            transition,
        }))
    }

    /// Release the guard and, if the backend acknowledged every write, apply
    /// the transition locally. Any failure leaves the record as it was.
    pub(crate) fn settle(
        &mut self,
        commit: PendingCommit,
        acknowledged: bool,
        shuffle: &dyn DeckShuffle,
    ) {
        self.in_flight = false;
        if !acknowledged {
            return;
        }
        let before = self.assessment.level();
        self.assessment.apply(commit.transition);
        if self.assessment.level() != before {
            self.deck = ImageDeck::for_level(self.assessment.level(), shuffle);
        }
    }
}
