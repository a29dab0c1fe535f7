use dioxus::prelude::*;
use dioxus_router::use_navigator;
use literacy_core::model::RegistrationDraft;
use tracing::error;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::ViewError;
use crate::views::components::{ErrorPanel, Notice, TextField};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AccountKind {
    Volunteer,
    Admin,
}

impl AccountKind {
    fn title(self) -> &'static str {
        match self {
            AccountKind::Volunteer => "Add Volunteer",
            AccountKind::Admin => "Add Admin",
        }
    }

    fn created(self) -> &'static str {
        match self {
            AccountKind::Volunteer => "Volunteer account created.",
            AccountKind::Admin => "Admin account created.",
        }
    }
}

#[component]
pub fn CreateVolunteerView() -> Element {
    rsx! { RegistrationForm { kind: AccountKind::Volunteer } }
}

#[component]
pub fn CreateAdminView() -> Element {
    rsx! { RegistrationForm { kind: AccountKind::Admin } }
}

#[component]
fn RegistrationForm(kind: AccountKind) -> Element {
    let ctx = use_context::<AppContext>();
    let nav = use_navigator();
    let mut draft = use_signal(RegistrationDraft::default);
    let mut submitting = use_signal(|| false);
    let mut outcome = use_signal(|| None::<Result<(), ViewError>>);

    let on_submit = {
        let accounts = ctx.accounts();
        use_callback(move |_| {
            let accounts = accounts.clone();
            submitting.set(true);
            outcome.set(None);
            spawn(async move {
                let current = draft();
                let result = match kind {
                    AccountKind::Volunteer => accounts.create_volunteer(&current).await,
                    AccountKind::Admin => accounts.create_admin(&current).await,
                };
                match result {
                    Ok(()) => {
                        draft.write().clear();
                        outcome.set(Some(Ok(())));
                    }
                    Err(err) => {
                        error!(?kind, error = %err, "account creation failed");
                        outcome.set(Some(Err(err.into())));
                    }
                }
                submitting.set(false);
            });
        })
    };

    let current = draft();

    rsx! {
        div { class: "page form-page",
            h2 { "{kind.title()}" }
            div { class: "form-card",
                TextField {
                    label: "Full Name",
                    value: current.full_name.clone(),
                    on_input: move |value: String| draft.write().full_name = value,
                }
                TextField {
                    label: "Email",
                    kind: "email",
                    value: current.email.clone(),
                    on_input: move |value: String| draft.write().email = value,
                }
                TextField {
                    label: "Password",
                    kind: "password",
                    value: current.password.clone(),
                    on_input: move |value: String| draft.write().password = value,
                }
                match outcome() {
                    Some(Ok(())) => rsx! {
                        Notice { text: kind.created().to_owned(), is_error: false }
                    },
                    Some(Err(err)) => rsx! {
                        ErrorPanel { error: err }
                    },
                    None => rsx! {},
                }
                div { class: "form-actions",
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            nav.push(Route::AdminDashboard {});
                        },
                        "Cancel"
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        disabled: submitting(),
                        onclick: move |_| on_submit.call(()),
                        if submitting() { "Creating..." } else { "Create" }
                    }
                }
            }
        }
    }
}
