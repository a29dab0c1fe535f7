use literacy_core::model::{Assessment, Status, TransitionKind};

/// What clicking a row does on the volunteer dashboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowAction {
    /// Completed records open the detail dialog.
    ViewDetail,
    /// Not-started records ask to start first.
    Start,
    /// Started records go straight to the test page.
    Continue,
}

/// UI-ready row of an assessment table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssessmentRowVm {
    pub id: i64,
    pub level: &'static str,
    pub status: &'static str,
    pub student: String,
    pub location: String,
    pub volunteer: String,
    pub action: RowAction,
}

#[must_use]
pub fn map_assessment_rows<'a>(
    records: impl IntoIterator<Item = &'a Assessment>,
) -> Vec<AssessmentRowVm> {
    records.into_iter().map(map_assessment_row).collect()
}

fn map_assessment_row(record: &Assessment) -> AssessmentRowVm {
    let student = record.student();
    let age = student
        .age
        .map_or_else(|| "Age ?".to_owned(), |age| format!("Age {age}"));
    let summary = [age, student.gender.clone(), grade_label(&student.grade_level)]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" · ");

    AssessmentRowVm {
        id: record.id().value(),
        level: record.level().label(),
        status: record.status().label(),
        student: summary,
        location: join_non_empty(&[
            &student.school,
            &student.barangay,
            &student.city,
            &student.region,
        ]),
        volunteer: record.volunteer_name().unwrap_or("-").to_owned(),
        action: match record.status() {
            Status::Completed => RowAction::ViewDetail,
            Status::NotStarted => RowAction::Start,
            Status::Started => RowAction::Continue,
        },
    }
}

fn grade_label(grade: &str) -> String {
    if grade.trim().is_empty() {
        String::new()
    } else {
        format!("Grade {}", grade.trim())
    }
}

fn join_non_empty(parts: &[&String]) -> String {
    parts
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Label/value pairs for the detail dialog.
#[must_use]
pub fn map_assessment_detail(record: &Assessment) -> Vec<(&'static str, String)> {
    let student = record.student();
    vec![
        ("Assessment", format!("#{}", record.id())),
        ("Level", record.level().label().to_owned()),
        ("Status", record.status().label().to_owned()),
        (
            "Age",
            student.age.map(|age| age.to_string()).unwrap_or_default(),
        ),
        ("Gender", student.gender.clone()),
        ("Grade Level", student.grade_level.clone()),
        ("Region", student.region.clone()),
        ("City", student.city.clone()),
        ("Barangay", student.barangay.clone()),
        ("School", student.school.clone()),
        (
            "Volunteer",
            record.volunteer_name().unwrap_or_default().to_owned(),
        ),
    ]
}

/// Confirmation question shown before a transition is committed.
#[must_use]
pub const fn confirm_prompt(kind: TransitionKind) -> &'static str {
    match kind {
        TransitionKind::Start => "Are you ready to start this assessment?",
        TransitionKind::Advance => "Are you sure you want to continue?",
        TransitionKind::Terminate => {
            "Are you sure you want to stop? This will mark the assessment as Completed."
        }
    }
}
