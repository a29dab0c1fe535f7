use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::model::level::Level;

//
// ─── AGE ───────────────────────────────────────────────────────────────────────
//

/// Age constraint for a statistics query: one age or an inclusive range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeFilter {
    Exact(u32),
    Range { min: u32, max: u32 },
}

impl AgeFilter {
    /// Parse user input such as `"9"`, `"8-10"` or `"8,10"`.
    ///
    /// Characters other than digits, `-` and `,` are dropped first. Empty input
    /// means "no age filter".
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidAge` for malformed input and
    /// `ValidationError::ReversedAgeRange` when `min > max`.
    pub fn parse(input: &str) -> Result<Option<Self>, ValidationError> {
        let cleaned: String = input
            .chars()
            .filter(|ch| ch.is_ascii_digit() || *ch == '-' || *ch == ',')
            .collect();
        if cleaned.is_empty() {
            return Ok(None);
        }

        let invalid = || ValidationError::InvalidAge {
            raw: input.to_owned(),
        };
        let parts: Vec<&str> = cleaned.split(['-', ',']).collect();
        match parts.as_slice() {
            [single] => single.parse().map(|age| Some(Self::Exact(age))).map_err(|_| invalid()),
            [min, max] => {
                let min: u32 = min.parse().map_err(|_| invalid())?;
                let max: u32 = max.parse().map_err(|_| invalid())?;
                if min > max {
                    return Err(ValidationError::ReversedAgeRange { min, max });
                }
                Ok(Some(Self::Range { min, max }))
            }
            _ => Err(invalid()),
        }
    }

    /// Normalized query-string value.
    #[must_use]
    pub fn query_value(self) -> String {
        match self {
            AgeFilter::Exact(age) => age.to_string(),
            AgeFilter::Range { min, max } => format!("{min}-{max}"),
        }
    }

    #[must_use]
    pub fn contains(self, age: u32) -> bool {
        match self {
            AgeFilter::Exact(exact) => age == exact,
            AgeFilter::Range { min, max } => (min..=max).contains(&age),
        }
    }
}

//
// ─── FILTER ────────────────────────────────────────────────────────────────────
//

/// Validated parameters of a statistics read. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatisticsFilter {
    pub region: String,
    pub city: String,
    pub barangay: String,
    pub school: String,
    pub age: Option<AgeFilter>,
    pub gender: String,
}

impl StatisticsFilter {
    /// Query parameters for the non-empty fields, in a stable order.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let text_fields = [
            ("region", &self.region),
            ("city", &self.city),
            ("barangay", &self.barangay),
            ("school", &self.school),
        ];
        let mut pairs: Vec<(&'static str, String)> = text_fields
            .into_iter()
            .filter(|(_, value)| !value.trim().is_empty())
            .map(|(key, value)| (key, value.trim().to_owned()))
            .collect();
        if let Some(age) = self.age {
            pairs.push(("age", age.query_value()));
        }
        if !self.gender.trim().is_empty() {
            pairs.push(("gender", self.gender.trim().to_owned()));
        }
        pairs
    }

    /// "Region, City, ..." for the selected location, or the country when unset.
    #[must_use]
    pub fn location_caption(&self) -> String {
        let parts: Vec<&str> = [&self.region, &self.city, &self.barangay, &self.school]
            .into_iter()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect();
        if parts.is_empty() {
            "Philippines".to_owned()
        } else {
            parts.join(", ")
        }
    }
}

/// Raw statistics filter controls as edited in the view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatisticsForm {
    pub region: String,
    pub city: String,
    pub barangay: String,
    pub school: String,
    pub age: String,
    pub gender: String,
}

impl StatisticsForm {
    /// Picking a region starts the filter over.
    pub fn select_region(&mut self, region: impl Into<String>) {
        *self = Self {
            region: region.into(),
            ..Self::default()
        };
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

    /// # Errors
    ///
    /// Returns `ValidationError` when the age input cannot be parsed.
    pub fn to_filter(&self) -> Result<StatisticsFilter, ValidationError> {
        Ok(StatisticsFilter {
            region: self.region.clone(),
            city: self.city.clone(),
            barangay: self.barangay.clone(),
            school: self.school.clone(),
            age: AgeFilter::parse(&self.age)?,
            gender: self.gender.clone(),
        })
    }
}

//
// ─── TALLIES ───────────────────────────────────────────────────────────────────
//

/// Minimal shape of a statistics row; only the level matters for tallies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticsRecord {
    #[serde(default)]
    pub level: String,
}

impl StatisticsRecord {
    #[must_use]
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
        }
    }
}

/// Per-level counts over a fetched record set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevelTallies {
    pub nothing: u32,
    pub letter: u32,
    pub word: u32,
    pub paragraph: u32,
    pub comprehension: u32,
    pub total: u32,
}

impl LevelTallies {
    /// Count records by level label. Unknown labels only add to `total`.
    #[must_use]
    pub fn from_labels<'a>(labels: impl IntoIterator<Item = &'a str>) -> Self {
        let mut tallies = Self::default();
        for label in labels {
            tallies.total = tallies.total.saturating_add(1);
            let Some(level) = Level::from_label(label) else {
                continue;
            };
            let bucket = match level {
                Level::Nothing => &mut tallies.nothing,
                Level::Letter => &mut tallies.letter,
                Level::Word => &mut tallies.word,
                Level::Paragraph => &mut tallies.paragraph,
                Level::Comprehension => &mut tallies.comprehension,
            };
            *bucket = bucket.saturating_add(1);
        }
        tallies
    }

    #[must_use]
    pub fn from_records(records: &[StatisticsRecord]) -> Self {
        Self::from_labels(records.iter().map(|record| record.level.as_str()))
    }

    #[must_use]
    pub fn count(&self, level: Level) -> u32 {
        match level {
            Level::Nothing => self.nothing,
            Level::Letter => self.letter,
            Level::Word => self.word,
            Level::Paragraph => self.paragraph,
            Level::Comprehension => self.comprehension,
        }
    }

    /// Sum of the five level buckets.
    #[must_use]
    pub fn bucketed(&self) -> u32 {
        Level::ALL.into_iter().map(|level| self.count(level)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tallies_scenario_from_statistics_response() {
        let records = vec![
            StatisticsRecord::new("Nothing"),
            StatisticsRecord::new("Nothing"),
            StatisticsRecord::new("Word Level"),
        ];
        let tallies = LevelTallies::from_records(&records);
        assert_eq!(
            tallies,
            LevelTallies {
                nothing: 2,
                letter: 0,
                word: 1,
                paragraph: 0,
                comprehension: 0,
                total: 3,
            }
        );
    }

    #[test]
    fn unknown_levels_count_only_in_total() {
        let tallies = LevelTallies::from_labels(["Letter Level", "Sentence Level", ""]);
        assert_eq!(tallies.total, 3);
        assert_eq!(tallies.letter, 1);
        assert_eq!(tallies.bucketed(), 1);
    }

    #[test]
    fn bucket_sum_matches_total_for_known_levels() {
        let labels: Vec<&str> = Level::ALL
            .iter()
            .cycle()
            .take(17)
            .map(|level| level.label())
            .collect();
        let tallies = LevelTallies::from_labels(labels);
        assert_eq!(tallies.bucketed(), tallies.total);
        assert_eq!(tallies.total, 17);
    }

    #[test]
    fn empty_response_tallies_zero() {
        assert_eq!(LevelTallies::from_records(&[]), LevelTallies::default());
    }

    #[test]
    fn age_parses_single_and_ranges() {
        assert_eq!(AgeFilter::parse("").unwrap(), None);
        assert_eq!(AgeFilter::parse(" 9 yrs").unwrap(), Some(AgeFilter::Exact(9)));
        assert_eq!(
            AgeFilter::parse("8 - 10").unwrap(),
            Some(AgeFilter::Range { min: 8, max: 10 })
        );
        assert_eq!(
            AgeFilter::parse("8, 10").unwrap().map(AgeFilter::query_value),
            Some("8-10".to_owned())
        );
    }

    #[test]
    fn age_rejects_malformed_input() {
        assert!(matches!(
            AgeFilter::parse("12-10"),
            Err(ValidationError::ReversedAgeRange { min: 12, max: 10 })
        ));
        assert!(matches!(
            AgeFilter::parse("8-"),
            Err(ValidationError::InvalidAge { .. })
        ));
        assert!(matches!(
            AgeFilter::parse("1-2-3"),
            Err(ValidationError::InvalidAge { .. })
        ));
    }

    #[test]
    fn range_is_inclusive() {
        let range = AgeFilter::Range { min: 8, max: 10 };
        assert!(range.contains(8));
        assert!(range.contains(10));
        assert!(!range.contains(11));
    }

    #[test]
    fn query_pairs_skip_empty_fields() {
        let filter = StatisticsFilter {
            region: "NCR".into(),
            city: " ".into(),
            age: Some(AgeFilter::Range { min: 7, max: 9 }),
            gender: "Female".into(),
            ..StatisticsFilter::default()
        };
        assert_eq!(
            filter.query_pairs(),
            vec![
                ("region", "NCR".to_owned()),
                ("age", "7-9".to_owned()),
                ("gender", "Female".to_owned()),
            ]
        );
    }

    #[test]
    fn region_change_resets_form() {
        let mut form = StatisticsForm {
            region: "NCR".into(),
            city: "Manila".into(),
            barangay: "Barangay 650".into(),
            school: "Manila High School".into(),
            age: "9".into(),
            gender: "Male".into(),
        };
        form.select_city("Quezon City");
        assert!(form.barangay.is_empty() && form.school.is_empty());
        assert_eq!(form.age, "9");

        form.select_region("Region IV-A");
        assert_eq!(
            form,
            StatisticsForm {
                region: "Region IV-A".into(),
                ..StatisticsForm::default()
            }
        );
    }

    #[test]
    fn location_caption_defaults_to_country() {
        assert_eq!(StatisticsFilter::default().location_caption(), "Philippines");
        let filter = StatisticsFilter {
            region: "NCR".into(),
            city: "Manila".into(),
            ..StatisticsFilter::default()
        };
        assert_eq!(filter.location_caption(), "NCR, Manila");
    }
}
