use dioxus::prelude::*;
use dioxus_router::use_navigator;
use literacy_core::model::{AssessmentId, Level, Status, TransitionKind};
use services::{AssessmentSession, CommitOutcome};
use tracing::{debug, warn};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::components::{ConfirmDialog, ErrorPanel};
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::confirm_prompt;

fn prompt_title(kind: TransitionKind) -> &'static str {
    match kind {
        TransitionKind::Start => "Start Assessment",
        TransitionKind::Advance => "Next Level",
        TransitionKind::Terminate => "Stop Assessment",
    }
}

#[component]
pub fn AssessmentTestView(id: i64) -> Element {
    let ctx = use_context::<AppContext>();
    let nav = use_navigator();
    let mut session = use_signal(|| None::<AssessmentSession>);
    let mut notice = use_signal(|| None::<ViewError>);
    let mut finished_at = use_signal(|| None::<Level>);

    let sessions = ctx.assessment_sessions();
    let mut resource = use_resource(move || {
        let sessions = sessions.clone();
        async move {
            sessions
                .open(AssessmentId::new(id))
                .await
                .map_err(|err| {
                    warn!(id, error = %err, "could not open assessment");
                    ViewError::from(err)
                })
        }
    });
    let state = view_state_from_resource(&resource);

    use_effect(move || {
        if let Some(Ok(opened)) = resource.value().read().as_ref() {
            session.set(Some(opened.clone()));
        }
    });

    let request = use_callback(move |kind: TransitionKind| {
        notice.set(None);
        if let Some(current) = session.write().as_mut() {
            if !current.request(kind) {
                debug!(id, ?kind, "request ignored");
            }
        }
    });

    let on_confirm = {
        let sessions = ctx.assessment_sessions();
        use_callback(move |_| {
            let begun = session.write().as_mut().map(AssessmentSession::begin_commit);
            let commit = match begun {
                Some(Ok(Some(commit))) => commit,
                Some(Ok(None)) | None => return,
                Some(Err(err)) => {
                    notice.set(Some(err.into()));
                    return;
                }
            };
            let sessions = sessions.clone();
            spawn(async move {
                let result = sessions.persist(commit).await;
                let settled = {
                    let mut guard = session.write();
                    guard
                        .as_mut()
                        .map(|current| sessions.settle(current, commit, result))
                };
                match settled {
                    Some(Ok(CommitOutcome::ReachedFinal { .. })) => {
                        nav.push(Route::Dashboard {});
                    }
                    Some(Ok(CommitOutcome::Stopped { level })) => finished_at.set(Some(level)),
                    Some(Ok(CommitOutcome::Started | CommitOutcome::Advanced { .. })) | None => {}
                    Some(Err(err)) => notice.set(Some(err.into())),
                }
            });
        })
    };

    rsx! {
        div { class: "page assessment-test-page",
            match (state, session()) {
                (ViewState::Error(err), _) => rsx! {
                    ErrorPanel { error: err, on_retry: move |_| resource.restart() }
                },
                (ViewState::Ready(_), Some(current)) => {
                    let record = current.assessment();
                    let level = record.level();
                    let status = record.status();
                    let deck = current.deck();
                    let busy = current.is_in_flight();
                    let terminal = current.is_terminal();
                    let image = deck.current().map(|name| ctx.image_src(name));
                    let position = format!("{} / {}", deck.index() + 1, deck.len());
                    rsx! {
                        div { class: "test-header",
                            h2 { "Assessment #{id}" }
                            p { class: "test-level", "{level}" }
                            p { class: "test-status", "{status}" }
                        }
                        if level.is_final() {
                            div { class: "test-complete",
                                h3 { "Assessment Completed!" }
                                p { "The student reached {level}." }
                            }
                        } else {
                            div { class: "test-deck",
                                button {
                                    class: "btn btn-secondary deck-prev",
                                    r#type: "button",
                                    disabled: deck.is_empty(),
                                    onclick: move |_| {
                                        if let Some(current) = session.write().as_mut() {
                                            current.prev_image();
                                        }
                                    },
                                    "<"
                                }
                                if let Some(src) = image {
                                    img { class: "deck-image", src: "{src}", alt: "{level}" }
                                } else {
                                    p { class: "deck-empty", "No images for this level." }
                                }
                                button {
                                    class: "btn btn-secondary deck-next",
                                    r#type: "button",
                                    disabled: deck.is_empty(),
                                    onclick: move |_| {
                                        if let Some(current) = session.write().as_mut() {
                                            current.next_image();
                                        }
                                    },
                                    ">"
                                }
                            }
                            if !deck.is_empty() {
                                p { class: "deck-position", "{position}" }
                            }
                            div { class: "test-actions",
                                if status == Status::NotStarted {
                                    button {
                                        class: "btn btn-primary",
                                        r#type: "button",
                                        disabled: busy,
                                        onclick: move |_| request.call(TransitionKind::Start),
                                        "Start"
                                    }
                                } else {
                                    button {
                                        class: "btn btn-primary",
                                        r#type: "button",
                                        disabled: busy || terminal,
                                        onclick: move |_| request.call(TransitionKind::Advance),
                                        "Next Level"
                                    }
                                    button {
                                        class: "btn btn-danger",
                                        r#type: "button",
                                        disabled: busy || terminal,
                                        onclick: move |_| request.call(TransitionKind::Terminate),
                                        "Stop"
                                    }
                                }
                                if busy {
                                    span { class: "saving", "Saving..." }
                                }
                            }
                        }
                        if let Some(kind) = current.pending() {
                            ConfirmDialog {
                                title: prompt_title(kind).to_owned(),
                                body: confirm_prompt(kind).to_owned(),
                                busy,
                                on_cancel: move |_| {
                                    if let Some(current) = session.write().as_mut() {
                                        current.cancel();
                                    }
                                },
                                on_confirm,
                            }
                        }
                    }
                }
                _ => rsx! {
                    p { "Loading..." }
                },
            }

            if let Some(err) = notice() {
                ErrorPanel { error: err }
            }

            if let Some(level) = finished_at() {
                div { class: "modal-overlay",
                    div { class: "modal",
                        h3 { class: "modal-title", "Congratulations!" }
                        p { class: "modal-body", "The assessment was completed at {level}." }
                        div { class: "modal-actions",
                            button {
                                class: "btn btn-primary",
                                r#type: "button",
                                onclick: move |_| {
                                    nav.push(Route::Dashboard {});
                                },
                                "OK"
                            }
                        }
                    }
                }
            }
        }
    }
}
