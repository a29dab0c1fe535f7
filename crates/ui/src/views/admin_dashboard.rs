use dioxus::prelude::*;
use literacy_core::model::{AssessmentId, Level, Roster, RosterFilter, Status};
use tracing::{error, warn};

use crate::context::AppContext;
use crate::views::components::{DetailDialog, ErrorPanel, SelectField, TextField, open_detail};
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::map_assessment_rows;

#[component]
pub fn AdminDashboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut roster = use_signal(Roster::default);
    let mut filter = use_signal(RosterFilter::default);
    let mut detail = use_signal(|| None::<Vec<(&'static str, String)>>);
    let mut notice = use_signal(|| None::<ViewError>);
    let mut deleting = use_signal(|| false);

    let roster_service = ctx.roster();
    let mut resource = use_resource(move || {
        let roster_service = roster_service.clone();
        async move {
            roster_service.load().await.map_err(|err| {
                warn!(error = %err, "could not load assessments");
                ViewError::from(err)
            })
        }
    });
    let state = view_state_from_resource(&resource);

    use_effect(move || {
        if let Some(Ok(loaded)) = resource.value().read().as_ref() {
            roster.set(loaded.clone());
        }
    });

    let show_detail = {
        let roster_service = ctx.roster();
        use_callback(move |id: i64| open_detail(roster_service.clone(), id, detail, notice))
    };

    let on_delete = {
        let roster_service = ctx.roster();
        use_callback(move |_| {
            let roster_service = roster_service.clone();
            deleting.set(true);
            notice.set(None);
            spawn(async move {
                let mut next = roster();
                match roster_service.delete_selected(&mut next).await {
                    Ok(_) => roster.set(next),
                    Err(err) => {
                        error!(error = %err, "bulk delete failed");
                        notice.set(Some(err.into()));
                    }
                }
                deleting.set(false);
            });
        })
    };

    let current = roster();
    let active_filter = filter();
    let rows = map_assessment_rows(current.filtered(&active_filter));
    let delete_mode = current.delete_mode();
    let selected_count = current.selected().len();
    let level_value = active_filter.level.map(|l| l.label().to_owned()).unwrap_or_default();
    let status_value = active_filter.status.map(|s| s.label().to_owned()).unwrap_or_default();

    rsx! {
        div { class: "page admin-dashboard-page",
            div { class: "page-header",
                h2 { "Assessments" }
                div { class: "page-actions",
                    if delete_mode {
                        button {
                            class: "btn btn-danger",
                            r#type: "button",
                            disabled: deleting() || selected_count == 0,
                            onclick: move |_| on_delete.call(()),
                            if deleting() { "Deleting..." } else { "Delete Selected ({selected_count})" }
                        }
                    }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        disabled: deleting(),
                        onclick: move |_| roster.write().toggle_delete_mode(),
                        if delete_mode { "Cancel" } else { "Delete Assessments" }
                    }
                }
            }

            div { class: "filters",
                TextField {
                    label: "Region",
                    value: active_filter.region.clone(),
                    on_input: move |value: String| filter.write().region = value,
                }
                TextField {
                    label: "City",
                    value: active_filter.city.clone(),
                    on_input: move |value: String| filter.write().city = value,
                }
                TextField {
                    label: "Barangay",
                    value: active_filter.barangay.clone(),
                    on_input: move |value: String| filter.write().barangay = value,
                }
                TextField {
                    label: "School",
                    value: active_filter.school.clone(),
                    on_input: move |value: String| filter.write().school = value,
                }
                SelectField {
                    label: "Level",
                    value: level_value,
                    options: Level::ALL.iter().map(|l| l.label().to_owned()).collect::<Vec<_>>(),
                    placeholder: "All levels",
                    on_change: move |value: String| filter.write().level = Level::from_label(&value),
                }
                SelectField {
                    label: "Status",
                    value: status_value,
                    options: Status::ALL.iter().map(|s| s.label().to_owned()).collect::<Vec<_>>(),
                    placeholder: "All statuses",
                    on_change: move |value: String| filter.write().status = Status::from_label(&value),
                }
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
                ViewState::Ready(_) if rows.is_empty() => rsx! {
                    p { class: "empty", "No assessments match these filters." }
                },
                ViewState::Ready(_) => rsx! {
                    table { class: "assessment-table",
                        thead {
                            tr {
                                if delete_mode {
                                    th { "" }
                                }
                                th { "#" }
                                th { "Student" }
                                th { "School" }
                                th { "Volunteer" }
                                th { "Level" }
                                th { "Status" }
                            }
                        }
                        tbody {
                            for row in rows {
                                tr {
                                    key: "{row.id}",
                                    class: "clickable",
                                    onclick: move |_| {
                                        if delete_mode {
                                            roster.write().toggle_selected(AssessmentId::new(row.id));
                                        } else {
                                            show_detail.call(row.id);
                                        }
                                    },
                                    if delete_mode {
                                        td {
                                            input {
                                                r#type: "checkbox",
                                                checked: current.is_selected(AssessmentId::new(row.id)),
                                                onclick: move |evt| evt.stop_propagation(),
                                                onchange: move |_| {
                                                    roster.write().toggle_selected(AssessmentId::new(row.id));
                                                },
                                            }
                                        }
                                    }
                                    td { "{row.id}" }
                                    td { "{row.student}" }
                                    td { "{row.location}" }
                                    td { "{row.volunteer}" }
                                    td { "{row.level}" }
                                    td { "{row.status}" }
                                }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    ErrorPanel { error: err, on_retry: move |_| resource.restart() }
                },
            }

            if let Some(rows) = detail() {
                DetailDialog {
                    rows,
                    on_close: move |_| detail.set(None),
                }
            }
        }
    }
}
