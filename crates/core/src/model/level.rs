use serde::{Deserialize, Serialize};
use std::fmt;

//
// ─── LEVEL ─────────────────────────────────────────────────────────────────────
//

/// Ordered reading stage reached by a student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Level {
    #[serde(rename = "Nothing")]
    Nothing,
    #[serde(rename = "Letter Level")]
    Letter,
    #[serde(rename = "Word Level")]
    Word,
    #[serde(rename = "Paragraph Level")]
    Paragraph,
    #[serde(rename = "Comprehension Level")]
    Comprehension,
}

impl Level {
    /// All levels in progression order.
    pub const ALL: [Level; 5] = [
        Level::Nothing,
        Level::Letter,
        Level::Word,
        Level::Paragraph,
        Level::Comprehension,
    ];

    /// Label used on the wire and in the UI.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Level::Nothing => "Nothing",
            Level::Letter => "Letter Level",
            Level::Word => "Word Level",
            Level::Paragraph => "Paragraph Level",
            Level::Comprehension => "Comprehension Level",
        }
    }

    /// Parse a wire label. Unknown labels yield `None`.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.label() == label)
    }

    /// The next level in the fixed ordering, if any.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Level::Nothing => Some(Level::Letter),
            Level::Letter => Some(Level::Word),
            Level::Word => Some(Level::Paragraph),
            Level::Paragraph => Some(Level::Comprehension),
            Level::Comprehension => None,
        }
    }

    #[must_use]
    pub const fn is_final(self) -> bool {
        matches!(self, Level::Comprehension)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

//
// ─── STATUS ────────────────────────────────────────────────────────────────────
//

/// Coarse progress flag of an assessment record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "Started")]
    Started,
    #[serde(rename = "Completed")]
    Completed,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::NotStarted, Status::Started, Status::Completed];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Status::NotStarted => "Not Started",
            Status::Started => "Started",
            Status::Completed => "Completed",
        }
    }

    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.label() == label)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_advance_in_fixed_order() {
        let mut walked = vec![Level::Nothing];
        while let Some(next) = walked.last().and_then(|level| level.next()) {
            walked.push(next);
        }
        assert_eq!(walked, Level::ALL.to_vec());
        assert!(walked.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn wire_labels_round_trip() {
        for level in Level::ALL {
            let json = serde_json::to_string(&level).unwrap();
            assert_eq!(json, format!("\"{}\"", level.label()));
            assert_eq!(Level::from_label(level.label()), Some(level));
        }
        assert_eq!(
            serde_json::from_str::<Status>("\"Not Started\"").unwrap(),
            Status::NotStarted
        );
        assert_eq!(Level::from_label("Sentence Level"), None);
    }
}
