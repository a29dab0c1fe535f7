use literacy_core::model::{
    Assessment, AssessmentId, Level, Role, StatisticsRecord, Status, StudentDetails,
};
use storage::memory::Operation;

use super::test_harness::{ViewKind, backend_with, setup_view_harness};

fn record(id: i64, level: Level, status: Status) -> Assessment {
    Assessment::new(
        AssessmentId::new(id),
        level,
        status,
        StudentDetails {
            age: Some(9),
            gender: "Female".into(),
            grade_level: "3".into(),
            region: "NCR".into(),
            city: "Manila".into(),
            barangay: "Barangay 650".into(),
            school: "Manila High School".into(),
        },
    )
    .with_volunteer_name("Ana Cruz")
}

#[tokio::test(flavor = "current_thread")]
async fn login_view_renders_form_when_signed_out() {
    let (backend, _) = backend_with(Role::User);
    let mut harness = setup_view_harness(ViewKind::Login, backend, None).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Sign in to continue"), "missing subtitle in {html}");
    assert!(html.contains("Login"), "missing button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_lists_own_assessments_with_add_button() {
    let (backend, user) = backend_with(Role::User);
    backend
        .insert_assessment(Some(user), record(1, Level::Word, Status::Started))
        .unwrap();
    backend
        .insert_assessment(None, record(2, Level::Letter, Status::Started))
        .unwrap();

    let mut harness = setup_view_harness(ViewKind::Dashboard, backend, Some(Role::User)).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Word Level"), "missing own record in {html}");
    assert!(!html.contains("Letter Level"), "foreign record leaked into {html}");
    assert!(html.contains("Manila High School"), "missing school in {html}");
    assert!(html.contains(">+<"), "missing add button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_shows_generic_message_when_listing_fails() {
    let (backend, _) = backend_with(Role::User);
    backend.fail_on(Operation::ListAssessments).unwrap();

    let mut harness = setup_view_harness(ViewKind::Dashboard, backend, Some(Role::User)).await;
    harness.settle().await;
    let html = harness.render();
    assert!(
        html.contains("Something went wrong. Please try again."),
        "missing error in {html}"
    );
    assert!(html.contains("Retry"), "missing retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn admin_dashboard_shows_every_record_with_volunteer() {
    let (backend, _) = backend_with(Role::Admin);
    backend
        .insert_assessment(None, record(1, Level::Word, Status::Started))
        .unwrap();
    backend
        .insert_assessment(None, record(2, Level::Paragraph, Status::Completed))
        .unwrap();

    let mut harness =
        setup_view_harness(ViewKind::AdminDashboard, backend, Some(Role::Admin)).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Word Level"), "missing first record in {html}");
    assert!(html.contains("Paragraph Level"), "missing second record in {html}");
    assert!(html.contains("Ana Cruz"), "missing volunteer in {html}");
    assert!(html.contains("Delete Assessments"), "missing delete toggle in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn statistics_view_renders_caption_and_total() {
    let (backend, _) = backend_with(Role::Admin);
    backend
        .insert_assessment(None, record(1, Level::Word, Status::Completed))
        .unwrap();
    backend
        .push_statistics_rows(vec![StatisticsRecord::new("Nothing")])
        .unwrap();

    let mut harness = setup_view_harness(ViewKind::Statistics, backend, Some(Role::Admin)).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Philippines"), "missing caption in {html}");
    assert!(html.contains("Total assessments: 2"), "missing total in {html}");
    assert!(html.contains("Comprehension Level"), "missing level bar in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn accounts_view_lists_users_for_management() {
    let (backend, _) = backend_with(Role::Mngt);
    let mut harness = setup_view_harness(ViewKind::Accounts, backend, Some(Role::Mngt)).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("mngt@example.org"), "missing account in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn assessment_test_shows_level_and_first_image() {
    let (backend, user) = backend_with(Role::User);
    backend
        .insert_assessment(Some(user), record(7, Level::Word, Status::Started))
        .unwrap();

    let mut harness =
        setup_view_harness(ViewKind::AssessmentTest(7), backend, Some(Role::User)).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Assessment #7"), "missing heading in {html}");
    assert!(html.contains("/images/sentence1.jpg"), "missing image in {html}");
    assert!(html.contains("1 / 10"), "missing position in {html}");
    assert!(html.contains("Next Level"), "missing advance button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn assessment_test_at_final_level_shows_completion_instead_of_deck() {
    let (backend, user) = backend_with(Role::User);
    backend
        .insert_assessment(Some(user), record(8, Level::Comprehension, Status::Completed))
        .unwrap();

    let mut harness =
        setup_view_harness(ViewKind::AssessmentTest(8), backend, Some(Role::User)).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Assessment Completed!"), "missing completion in {html}");
    assert!(!html.contains("No images for this level."), "deck still shown in {html}");
    assert!(!html.contains("Next Level"), "actions still shown in {html}");
}
