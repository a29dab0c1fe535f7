use std::sync::Arc;

use literacy_core::model::{
    Assessment, AssessmentId, AvatarUpload, KeepOrder, Level, PasswordForm, ProfileDraft,
    ProfileField, RegistrationDraft, Role, StatisticsForm, StatisticsRecord, Status,
    StudentDetails, UserProfile,
};
use services::{AppServices, AuthError, ErrorKind, ProfileError};
use storage::memory::Call;
use storage::repository::LocalStore;
use storage::{GatewayError, InMemoryGateway};

fn record(id: i64, level: Level, region: &str, age: u32) -> Assessment {
    Assessment::new(
        AssessmentId::new(id),
        level,
        Status::Completed,
        StudentDetails {
            age: Some(age),
            region: region.into(),
            ..StudentDetails::default()
        },
    )
}

async fn signed_in(role: Role) -> (AppServices, InMemoryGateway) {
    let backend = InMemoryGateway::new();
    backend
        .add_account("boss@example.org", "pw", role, UserProfile::default())
        .unwrap();
    let app = AppServices::in_memory(backend.clone().into_gateway(), Arc::new(KeepOrder))
        .await
        .unwrap();
    app.auth().login("boss@example.org", "pw").await.unwrap();
    (app, backend)
}

#[tokio::test]
async fn login_validates_and_maps_rejections() {
    let (app, _) = signed_in(Role::Admin).await;
    let auth = app.auth();

    let blank = auth.login("  ", "pw").await.unwrap_err();
    assert_eq!(blank.kind(), ErrorKind::ValidationFailure);

    let wrong = auth.login("boss@example.org", "nope").await.unwrap_err();
    assert!(matches!(wrong, AuthError::Gateway(GatewayError::Unauthorized)));

    assert_eq!(auth.current().map(|session| session.role), Some(Role::Admin));
}

#[tokio::test]
async fn session_survives_restart_and_logout_clears_it() {
    let backend = InMemoryGateway::new();
    backend
        .add_account("ana@example.org", "pw", Role::User, UserProfile::default())
        .unwrap();
    let store = LocalStore::in_memory();

    let first = AppServices::assemble(
        backend.clone().into_gateway(),
        store.clone(),
        Arc::new(KeepOrder),
    )
    .await
    .unwrap();
    first.auth().login("ana@example.org", "pw").await.unwrap();

    let second = AppServices::assemble(
        backend.clone().into_gateway(),
        store.clone(),
        Arc::new(KeepOrder),
    )
    .await
    .unwrap();
    assert_eq!(second.session().role(), Some(Role::User));
    assert!(second.roster().load().await.is_ok());

    second.auth().logout().await.unwrap();
    let third = AppServices::assemble(backend.into_gateway(), store, Arc::new(KeepOrder))
        .await
        .unwrap();
    assert_eq!(third.session().current(), None);
}

#[tokio::test]
async fn statistics_tally_filtered_records() {
    let (app, backend) = signed_in(Role::Admin).await;
    backend.insert_assessment(None, record(1, Level::Word, "NCR", 8)).unwrap();
    backend.insert_assessment(None, record(2, Level::Word, "NCR", 12)).unwrap();
    backend.insert_assessment(None, record(3, Level::Letter, "CAR", 9)).unwrap();
    backend
        .push_statistics_rows(vec![StatisticsRecord::new("Sentence Level")])
        .unwrap();

    let mut form = StatisticsForm::default();
    form.select_region("NCR");
    form.age = "7-10".into();
    let report = app.statistics().load(&form).await.unwrap();

    assert_eq!(report.tallies.word, 1);
    assert_eq!(report.tallies.total, 2);
    assert_eq!(report.tallies.bucketed(), 1);
    assert_eq!(report.caption(), "NCR");
}

#[tokio::test]
async fn reversed_age_range_is_rejected_locally() {
    let (app, backend) = signed_in(Role::Admin).await;
    let before = backend.calls().unwrap().len();

    let form = StatisticsForm {
        age: "10-5".into(),
        ..StatisticsForm::default()
    };
    let err = app.statistics().load(&form).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValidationFailure);
    assert_eq!(backend.calls().unwrap().len(), before);
}

#[tokio::test]
async fn delete_selected_removes_only_after_ack() {
    let (app, backend) = signed_in(Role::Admin).await;
    for id in 1..=3 {
        backend.insert_assessment(None, record(id, Level::Nothing, "NCR", 8)).unwrap();
    }
    let roster_svc = app.roster();
    let mut roster = roster_svc.load().await.unwrap();

    assert_eq!(roster_svc.delete_selected(&mut roster).await.unwrap(), 0);

    roster.toggle_delete_mode();
    roster.toggle_selected(AssessmentId::new(1));
    roster.toggle_selected(AssessmentId::new(3));

    backend.fail_on(storage::memory::Operation::DeleteAssessments).unwrap();
    assert!(roster_svc.delete_selected(&mut roster).await.is_err());
    assert_eq!(roster.len(), 3);
    assert!(roster.is_selected(AssessmentId::new(1)));

    backend.recover(storage::memory::Operation::DeleteAssessments).unwrap();
    assert_eq!(roster_svc.delete_selected(&mut roster).await.unwrap(), 2);
    let left: Vec<i64> = roster.records().iter().map(|r| r.id().value()).collect();
    assert_eq!(left, vec![2]);
    assert!(!roster.delete_mode());
    assert!(backend.calls().unwrap().contains(&Call::DeleteAssessments(vec![
        AssessmentId::new(1),
        AssessmentId::new(3)
    ])));
}

#[tokio::test]
async fn admin_registers_volunteers_and_admins() {
    let (app, backend) = signed_in(Role::Admin).await;
    let accounts = app.accounts();

    let mut draft = RegistrationDraft {
        full_name: "Vic".into(),
        email: "vic@example.org".into(),
        password: "pw".into(),
    };
    accounts.create_volunteer(&draft).await.unwrap();
    draft.email = "ada@example.org".into();
    accounts.create_admin(&draft).await.unwrap();

    let registered: Vec<Call> = backend
        .calls()
        .unwrap()
        .into_iter()
        .filter(|call| matches!(call, Call::Register { .. }))
        .collect();
    assert_eq!(
        registered,
        vec![
            Call::Register {
                email: "vic@example.org".into(),
                role: None
            },
            Call::Register {
                email: "ada@example.org".into(),
                role: Some(Role::Admin)
            },
        ]
    );

    draft.clear();
    let err = accounts.create_volunteer(&draft).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValidationFailure);
}

#[tokio::test]
async fn only_management_lists_users() {
    let (admin, _) = signed_in(Role::Admin).await;
    let err = admin.accounts().list().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NetworkFailure);

    let (mngt, _) = signed_in(Role::Mngt).await;
    let users = mngt.accounts().list().await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].role(), Some(Role::Mngt));
}

#[tokio::test]
async fn profile_edit_saves_and_merges_into_session() {
    let (app, _) = signed_in(Role::User).await;
    let profile_svc = app.profile();

    let loaded = profile_svc.load().await.unwrap();
    assert!(!loaded.is_complete());

    let mut draft = ProfileDraft::from_profile(loaded);
    for (field, value) in [
        (ProfileField::FullName, "Ana Cruz"),
        (ProfileField::PhoneNumber, "0917"),
        (ProfileField::Skills, "Phonics"),
        (ProfileField::Location, "Manila"),
        (ProfileField::Bio, "Tutor"),
    ] {
        draft.toggle(field);
        draft.set(field, value);
    }
    let avatar = AvatarUpload {
        file_name: "me.png".into(),
        mime: "image/png".into(),
        bytes: vec![1, 2, 3],
    };

    let saved = profile_svc.save(&draft, Some(avatar)).await.unwrap();
    assert!(saved.is_complete());
    assert_eq!(saved.avatar_url.as_deref(), Some("/uploads/me.png"));

    let session = app.session().current().unwrap();
    assert_eq!(session.profile.full_name, "Ana Cruz");
    assert!(profile_svc.is_complete().await.unwrap());
}

#[tokio::test]
async fn password_change_checks_confirmation_first() {
    let (app, _) = signed_in(Role::User).await;
    let profile_svc = app.profile();

    let mut form = PasswordForm {
        current: "pw".into(),
        new: "next".into(),
        confirm: "nxet".into(),
    };
    let err = profile_svc.change_password(&mut form).await.unwrap_err();
    assert!(matches!(err, ProfileError::Validation(_)));

    form.confirm = "next".into();
    profile_svc.change_password(&mut form).await.unwrap();
    assert!(form.current.is_empty());

    app.auth().logout().await.unwrap();
    app.auth().login("boss@example.org", "next").await.unwrap();
}

#[tokio::test]
async fn profile_save_with_blank_name_sends_nothing() {
    let (app, backend) = signed_in(Role::User).await;
    let profile_svc = app.profile();

    let mut draft = ProfileDraft::from_profile(profile_svc.load().await.unwrap());
    draft.toggle(ProfileField::Bio);
    draft.set(ProfileField::Bio, "Tutor");
    let before = backend.calls().unwrap().len();

    let err = profile_svc.save(&draft, None).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValidationFailure);
    assert_eq!(backend.calls().unwrap().len(), before);
}
