use thiserror::Error;

/// Input rejected on the client before any request is issued.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    #[error("please fill in the {field}")]
    MissingField { field: &'static str },

    #[error("age must be a whole number, got {raw:?}")]
    InvalidAge { raw: String },

    #[error("age range {min}-{max} is reversed")]
    ReversedAgeRange { min: u32, max: u32 },

    #[error("passwords do not match")]
    PasswordMismatch,
}

impl ValidationError {
    #[must_use]
    pub fn missing(field: &'static str) -> Self {
        Self::MissingField { field }
    }
}
