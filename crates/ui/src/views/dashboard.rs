use dioxus::prelude::*;
use dioxus_router::use_navigator;
use literacy_core::model::{Assessment, Role, Roster, TransitionKind};
use tracing::{error, warn};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::components::{ConfirmDialog, DetailDialog, ErrorPanel, open_detail};
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{RowAction, confirm_prompt, map_assessment_rows};

#[derive(Clone, Debug, PartialEq)]
struct DashboardData {
    roster: Roster,
    /// Volunteers may only add assessments once their profile is complete.
    can_create: bool,
}

#[component]
pub fn DashboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let nav = use_navigator();
    let role = ctx.session().role();
    let mut detail = use_signal(|| None::<Vec<(&'static str, String)>>);
    let mut pending_start = use_signal(|| None::<Assessment>);
    let mut starting = use_signal(|| false);
    let mut notice = use_signal(|| None::<ViewError>);
    let mut show_profile_hint = use_signal(|| false);
    let mut roster = use_signal(Roster::default);

    let roster_service = ctx.roster();
    let profile_service = ctx.profile();
    let mut resource = use_resource(move || {
        let roster_service = roster_service.clone();
        let profile_service = profile_service.clone();
        async move {
            let roster = roster_service.load().await.map_err(|err| {
                warn!(error = %err, "could not load assessments");
                ViewError::from(err)
            })?;
            let can_create = match role {
                Some(Role::User) => profile_service.is_complete().await.unwrap_or_else(|err| {
                    warn!(error = %err, "could not check profile completeness");
                    false
                }),
                _ => false,
            };
            Ok::<_, ViewError>(DashboardData { roster, can_create })
        }
    });
    let state = view_state_from_resource(&resource);

    use_effect(move || {
        if let Some(Ok(data)) = resource.value().read().as_ref() {
            roster.set(data.roster.clone());
        }
    });

    let on_confirm_start = {
        let sessions = ctx.assessment_sessions();
        use_callback(move |_| {
            let Some(record) = pending_start() else {
                return;
            };
            let sessions = sessions.clone();
            starting.set(true);
            spawn(async move {
                match sessions.start(&record).await {
                    Ok(updated) => {
                        if let Some(updated) = updated {
                            roster.write().replace(updated);
                        }
                        pending_start.set(None);
                        nav.push(Route::AssessmentTest {
                            id: record.id().value(),
                        });
                    }
                    Err(err) => {
                        error!(id = record.id().value(), error = %err, "could not start assessment");
                        pending_start.set(None);
                        notice.set(Some(err.into()));
                    }
                }
                starting.set(false);
            });
        })
    };

    let show_detail = {
        let roster = ctx.roster();
        use_callback(move |id: i64| open_detail(roster.clone(), id, detail, notice))
    };

    let on_create = move |_: Event<MouseData>| {
        let can_create = matches!(
            resource.value().read().as_ref(),
            Some(Ok(data)) if data.can_create
        );
        if can_create {
            nav.push(Route::CreateAssessment {});
        } else {
            show_profile_hint.set(true);
        }
    };

    rsx! {
        div { class: "page dashboard-page",
            div { class: "page-header",
                h2 { "Assessments" }
                if role == Some(Role::User) {
                    button {
                        class: "btn btn-primary btn-add",
                        r#type: "button",
                        title: "New assessment",
                        onclick: on_create,
                        "+"
                    }
                }
            }
            if show_profile_hint() {
                p { class: "notice", "Complete your profile to proceed." }
            }
            if let Some(err) = notice() {
                ErrorPanel { error: err }
            }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(_) => {
                    let records = roster.read().records().to_vec();
                    let rows = map_assessment_rows(&records);
                    rsx! {
                        if rows.is_empty() {
                            p { class: "empty", "No assessments yet." }
                        } else {
                            table { class: "assessment-table",
                                thead {
                                    tr {
                                        th { "#" }
                                        th { "Student" }
                                        th { "School" }
                                        th { "Level" }
                                        th { "Status" }
                                    }
                                }
                                tbody {
                                    for (row, record) in rows.into_iter().zip(records) {
                                        tr {
                                            key: "{row.id}",
                                            class: "clickable",
                                            onclick: move |_| match row.action {
                                                RowAction::ViewDetail => show_detail.call(row.id),
                                                RowAction::Start => pending_start.set(Some(record.clone())),
                                                RowAction::Continue => {
                                                    nav.push(Route::AssessmentTest { id: row.id });
                                                }
                                            },
                                            td { "{row.id}" }
                                            td { "{row.student}" }
                                            td { "{row.location}" }
                                            td { "{row.level}" }
                                            td { "{row.status}" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
                ViewState::Error(err) => rsx! {
                    ErrorPanel { error: err, on_retry: move |_| resource.restart() }
                },
            }

            if let Some(rows) = detail() {
                DetailDialog { rows, on_close: move |_| detail.set(None) }
            }
            if pending_start().is_some() {
                ConfirmDialog {
                    title: "Start Assessment",
                    body: confirm_prompt(TransitionKind::Start).to_owned(),
                    busy: starting(),
                    on_cancel: move |_| pending_start.set(None),
                    on_confirm: on_confirm_start,
                }
            }
        }
    }
}
