use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::model::ids::AssessmentId;
use crate::model::level::{Level, Status};

/// Student demographics captured when an assessment is created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentDetails {
    #[serde(rename = "student_age", default)]
    pub age: Option<u32>,
    #[serde(rename = "student_gender", default)]
    pub gender: String,
    #[serde(rename = "student_grade_level", default)]
    pub grade_level: String,
    #[serde(rename = "student_region", default)]
    pub region: String,
    #[serde(rename = "student_city", default)]
    pub city: String,
    #[serde(rename = "student_barangay", default)]
    pub barangay: String,
    #[serde(rename = "student_school", default)]
    pub school: String,
}

/// One literacy assessment record as served by the backend.
///
/// `level` and `status` only change through [`crate::model::Progress`]
/// transitions, which keep the level monotonic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    id: AssessmentId,
    level: Level,
    status: Status,
    #[serde(flatten)]
    student: StudentDetails,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    volunteer_name: Option<String>,
}

impl Assessment {
    #[must_use]
    pub fn new(id: AssessmentId, level: Level, status: Status, student: StudentDetails) -> Self {
        Self {
            id,
            level,
            status,
            student,
            volunteer_name: None,
        }
    }

    #[must_use]
    pub fn with_volunteer_name(mut self, name: impl Into<String>) -> Self {
        self.volunteer_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn id(&self) -> AssessmentId {
        self.id
    }

    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    #[must_use]
    pub fn student(&self) -> &StudentDetails {
        &self.student
    }

    #[must_use]
    pub fn volunteer_name(&self) -> Option<&str> {
        self.volunteer_name.as_deref()
    }

    pub(crate) fn set_progress(&mut self, level: Level, status: Status) {
        debug_assert!(level >= self.level, "level must not move backwards");
        self.level = level;
        self.status = status;
    }
}

//
// ─── CREATION ──────────────────────────────────────────────────────────────────
//

/// Raw form input for a new assessment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewAssessmentDraft {
    pub age: String,
    pub gender: String,
    pub grade_level: String,
    pub region: String,
    pub city: String,
    pub barangay: String,
    pub school: String,
}

/// Validated payload for `POST assessments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewAssessment {
    pub student_age: u32,
    pub student_gender: String,
    pub student_grade_level: String,
    pub student_region: String,
    pub student_city: String,
    pub student_barangay: String,
    pub student_school: String,
}

impl NewAssessmentDraft {
    /// Select a region, clearing every dependent location field.
    pub fn select_region(&mut self, region: impl Into<String>) {
        self.region = region.into();
        self.city.clear();
        self.barangay.clear();
        self.school.clear();
    }

    pub fn select_city(&mut self, city: impl Into<String>) {
        self.city = city.into();
        self.barangay.clear();
        self.school.clear();
    }

    pub fn select_barangay(&mut self, barangay: impl Into<String>) {
        self.barangay = barangay.into();
        self.school.clear();
    }

    /// Validate the draft into a request payload.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingField` for the first empty field, in
    /// form order, or `ValidationError::InvalidAge` when age is not a positive
    /// whole number.
    pub fn validate(&self) -> Result<NewAssessment, ValidationError> {
        let fields: [(&'static str, &str); 7] = [
            ("Age", &self.age),
            ("Gender", &self.gender),
            ("Grade Level", &self.grade_level),
            ("Region", &self.region),
            ("City", &self.city),
            ("Barangay", &self.barangay),
            ("School", &self.school),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(ValidationError::missing(*name));
        }

        let age = self
            .age
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|age| *age > 0)
            .ok_or_else(|| ValidationError::InvalidAge {
                raw: self.age.clone(),
            })?;

        Ok(NewAssessment {
            student_age: age,
            student_gender: self.gender.trim().to_owned(),
            student_grade_level: self.grade_level.trim().to_owned(),
            student_region: self.region.trim().to_owned(),
            student_city: self.city.trim().to_owned(),
            student_barangay: self.barangay.trim().to_owned(),
            student_school: self.school.trim().to_owned(),
        })
    }
}
