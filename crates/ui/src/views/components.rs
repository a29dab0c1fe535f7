use std::sync::Arc;

use dioxus::prelude::*;
use dioxus_router::use_navigator;
use literacy_core::model::AssessmentId;
use services::RosterService;
use tracing::{error, warn};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::ViewError;
use crate::vm::map_assessment_detail;

#[component]
pub fn ConfirmDialog(
    title: String,
    body: String,
    busy: bool,
    on_cancel: Callback<()>,
    on_confirm: Callback<()>,
) -> Element {
    rsx! {
        div {
            class: "modal-overlay",
            onclick: move |_| on_cancel.call(()),
            div {
                class: "modal",
                onclick: move |evt| evt.stop_propagation(),
                h3 { class: "modal-title", "{title}" }
                p { class: "modal-body", "{body}" }
                div { class: "modal-actions",
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        disabled: busy,
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        disabled: busy,
                        onclick: move |_| on_confirm.call(()),
                        if busy { "Saving..." } else { "Confirm" }
                    }
                }
            }
        }
    }
}

#[component]
pub fn DetailDialog(rows: Vec<(&'static str, String)>, on_close: Callback<()>) -> Element {
    rsx! {
        div {
            class: "modal-overlay",
            onclick: move |_| on_close.call(()),
            div {
                class: "modal",
                onclick: move |evt| evt.stop_propagation(),
                h3 { class: "modal-title", "Assessment Details" }
                dl { class: "detail-list",
                    for (label, value) in rows {
                        dt { "{label}" }
                        dd { "{value}" }
                    }
                }
                div { class: "modal-actions",
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| on_close.call(()),
                        "Close"
                    }
                }
            }
        }
    }
}

/// Error message with a retry button, or a trip back to login when the
/// session is gone.
#[component]
pub fn ErrorPanel(error: ViewError, on_retry: Option<Callback<()>>) -> Element {
    let ctx = use_context::<AppContext>();
    let nav = use_navigator();
    let needs_login = error.needs_login();

    use_effect(move || {
        if !needs_login {
            return;
        }
        let auth = ctx.auth();
        spawn(async move {
            if let Err(err) = auth.logout().await {
                warn!(error = %err, "could not clear rejected session");
            }
            nav.replace(Route::Login {});
        });
    });

    rsx! {
        div { class: "error-panel",
            p { "{error.message()}" }
            if let Some(on_retry) = on_retry.filter(|_| !needs_login) {
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| on_retry.call(()),
                    "Retry"
                }
            }
        }
    }
}

/// Inline message under a form.
#[component]
pub fn Notice(text: String, is_error: bool) -> Element {
    let class = if is_error { "notice notice-error" } else { "notice" };
    rsx! {
        p { class, "{text}" }
    }
}

pub(crate) fn owned_options(options: &[&'static str]) -> Vec<String> {
    options.iter().map(|s| (*s).to_owned()).collect()
}

/// `<select>` over fixed options with a leading placeholder.
#[component]
pub fn SelectField(
    label: &'static str,
    value: String,
    options: Vec<String>,
    placeholder: &'static str,
    #[props(default)] disabled: bool,
    on_change: Callback<String>,
) -> Element {
    rsx! {
        label { class: "field",
            span { class: "field-label", "{label}" }
            select {
                value: "{value}",
                disabled,
                onchange: move |evt| on_change.call(evt.value()),
                option { value: "", selected: value.is_empty(), "{placeholder}" }
                for opt in options {
                    option {
                        key: "{opt}",
                        value: "{opt}",
                        selected: opt == value,
                        "{opt}"
                    }
                }
            }
        }
    }
}

#[component]
pub fn TextField(
    label: &'static str,
    value: String,
    #[props(default = "text")] kind: &'static str,
    on_input: Callback<String>,
) -> Element {
    rsx! {
        label { class: "field",
            span { class: "field-label", "{label}" }
            input {
                r#type: kind,
                value: "{value}",
                oninput: move |evt| on_input.call(evt.value()),
            }
        }
    }
}

/// Fetch one record's full detail into `detail`, or an error into `notice`.
pub(crate) fn open_detail(
    roster: Arc<RosterService>,
    id: i64,
    mut detail: Signal<Option<Vec<(&'static str, String)>>>,
    mut notice: Signal<Option<ViewError>>,
) {
    spawn(async move {
        match roster.detail(AssessmentId::new(id)).await {
            Ok(record) => detail.set(Some(map_assessment_detail(&record))),
            Err(err) => {
                error!(id, error = %err, "could not load assessment detail");
                notice.set(Some(err.into()));
            }
        }
    });
}
