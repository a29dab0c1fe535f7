use std::collections::BTreeSet;

use crate::model::assessment::Assessment;
use crate::model::ids::AssessmentId;
use crate::model::level::{Level, Status};

/// Client-side roster filter. Empty text fields and `None` selectors match all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterFilter {
    pub region: String,
    pub city: String,
    pub barangay: String,
    pub school: String,
    pub level: Option<Level>,
    pub status: Option<Status>,
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim();
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl RosterFilter {
    #[must_use]
    pub fn matches(&self, assessment: &Assessment) -> bool {
        let student = assessment.student();
        contains_ci(&student.region, &self.region)
            && contains_ci(&student.city, &self.city)
            && contains_ci(&student.barangay, &self.barangay)
            && contains_ci(&student.school, &self.school)
            && self.level.is_none_or(|level| level == assessment.level())
            && self.status.is_none_or(|status| status == assessment.status())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Loaded roster plus delete-mode selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    records: Vec<Assessment>,
    delete_mode: bool,
    selected: BTreeSet<AssessmentId>,
}

impl Roster {
    /// Build a roster sorted by id.
    #[must_use]
    pub fn new(mut records: Vec<Assessment>) -> Self {
        records.sort_by_key(Assessment::id);
        Self {
            records,
            delete_mode: false,
            selected: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn records(&self) -> &[Assessment] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn filtered<'a>(&'a self, filter: &'a RosterFilter) -> impl Iterator<Item = &'a Assessment> {
        self.records.iter().filter(move |record| filter.matches(record))
    }

    #[must_use]
    pub fn delete_mode(&self) -> bool {
        self.delete_mode
    }

    /// Flip delete mode. The selection is cleared either way.
    pub fn toggle_delete_mode(&mut self) {
        self.delete_mode = !self.delete_mode;
        self.selected.clear();
    }

    /// Add or remove `id` from the selection. Ignored outside delete mode.
    pub fn toggle_selected(&mut self, id: AssessmentId) {
        if !self.delete_mode {
            return;
        }
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    #[must_use]
    pub fn is_selected(&self, id: AssessmentId) -> bool {
        self.selected.contains(&id)
    }

    #[must_use]
    pub fn selected(&self) -> Vec<AssessmentId> {
        self.selected.iter().copied().collect()
    }

    /// Drop acknowledged deletions from local state and leave delete mode.
    pub fn remove(&mut self, ids: &[AssessmentId]) {
        let gone: BTreeSet<AssessmentId> = ids.iter().copied().collect();
        self.records.retain(|record| !gone.contains(&record.id()));
        self.selected.clear();
        self.delete_mode = false;
    }

    /// Replace one record in place after it changed elsewhere.
    pub fn replace(&mut self, updated: Assessment) {
        if let Some(slot) = self.records.iter_mut().find(|r| r.id() == updated.id()) {
            *slot = updated;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StudentDetails;

    fn record(id: i64, region: &str, city: &str, level: Level, status: Status) -> Assessment {
        let student = StudentDetails {
            region: region.into(),
            city: city.into(),
            barangay: "Bagbag".into(),
            school: "Commonwealth High School".into(),
            ..StudentDetails::default()
        };
        Assessment::new(AssessmentId::new(id), level, status, student)
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = RosterFilter::default();
        assert!(filter.is_empty());
        assert!(filter.matches(&record(1, "", "", Level::Nothing, Status::NotStarted)));
    }

    #[test]
    fn text_predicates_are_case_insensitive_substrings() {
        let assessment = record(1, "NCR", "Quezon City", Level::Word, Status::Started);
        let filter = RosterFilter {
            city: "quezon".into(),
            school: "COMMON".into(),
            ..RosterFilter::default()
        };
        assert!(filter.matches(&assessment));

        let miss = RosterFilter {
            region: "Region IV-A".into(),
            ..RosterFilter::default()
        };
        assert!(!miss.matches(&assessment));
    }

    #[test]
    fn level_and_status_must_match_exactly() {
        let assessment = record(1, "NCR", "Manila", Level::Letter, Status::Started);
        let level_hit = RosterFilter {
            level: Some(Level::Letter),
            ..RosterFilter::default()
        };
        let status_miss = RosterFilter {
            status: Some(Status::Completed),
            ..level_hit.clone()
        };
        assert!(level_hit.matches(&assessment));
        assert!(!status_miss.matches(&assessment));
    }

    #[test]
    fn roster_sorts_by_id_and_filters() {
        let roster = Roster::new(vec![
            record(3, "NCR", "Manila", Level::Word, Status::Started),
            record(1, "NCR", "Quezon City", Level::Nothing, Status::NotStarted),
            record(2, "Region IV-A", "Tagaytay", Level::Word, Status::Completed),
        ]);
        let ids: Vec<i64> = roster.records().iter().map(|r| r.id().value()).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let filter = RosterFilter {
            level: Some(Level::Word),
            ..RosterFilter::default()
        };
        assert_eq!(roster.filtered(&filter).count(), 2);
    }

    #[test]
    fn toggling_delete_mode_clears_selection() {
        let mut roster = Roster::new(vec![record(1, "NCR", "Manila", Level::Nothing, Status::Started)]);
        roster.toggle_selected(AssessmentId::new(1));
        assert!(roster.selected().is_empty());

        roster.toggle_delete_mode();
        roster.toggle_selected(AssessmentId::new(1));
        assert!(roster.is_selected(AssessmentId::new(1)));
        roster.toggle_delete_mode();
        assert!(roster.selected().is_empty());
    }

    #[test]
    fn remove_drops_only_acknowledged_ids() {
        let mut roster = Roster::new(vec![
            record(1, "NCR", "Manila", Level::Nothing, Status::Started),
            record(2, "NCR", "Manila", Level::Nothing, Status::Started),
        ]);
        roster.toggle_delete_mode();
        roster.toggle_selected(AssessmentId::new(2));
        roster.remove(&roster.selected());
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.records()[0].id(), AssessmentId::new(1));
        assert!(!roster.delete_mode());
    }

    #[test]
    fn replace_swaps_matching_record_and_ignores_unknown_ids() {
        let mut roster = Roster::new(vec![
            record(1, "NCR", "Manila", Level::Nothing, Status::NotStarted),
            record(2, "NCR", "Manila", Level::Nothing, Status::NotStarted),
        ]);
        roster.replace(record(2, "NCR", "Manila", Level::Nothing, Status::Started));
        roster.replace(record(9, "NCR", "Manila", Level::Word, Status::Started));

        let statuses: Vec<Status> = roster.records().iter().map(Assessment::status).collect();
        assert_eq!(statuses, vec![Status::NotStarted, Status::Started]);
        assert_eq!(roster.len(), 2);
    }
}
