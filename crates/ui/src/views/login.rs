use dioxus::prelude::*;
use dioxus_router::use_navigator;
use services::ErrorKind;
use tracing::error;

use crate::context::AppContext;
use crate::routes::{Redirect, Route};
use crate::views::ViewError;

#[component]
pub fn LoginView() -> Element {
    let ctx = use_context::<AppContext>();
    let nav = use_navigator();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut submitting = use_signal(|| false);
    let mut failure = use_signal(|| None::<String>);

    let on_submit = {
        let auth = ctx.auth();
        use_callback(move |_| {
            if submitting() {
                return;
            }
            let auth = auth.clone();
            submitting.set(true);
            failure.set(None);
            spawn(async move {
                match auth.login(&email(), &password()).await {
                    Ok(session) => {
                        password.set(String::new());
                        nav.replace(Route::home(session.role));
                    }
                    Err(err) => {
                        error!(error = %err, "login failed");
                        let view = ViewError::from(err);
                        let message = match view.kind() {
                            ErrorKind::AuthenticationMissing => {
                                "Invalid email or password.".to_owned()
                            }
                            _ => view.message().to_owned(),
                        };
                        failure.set(Some(message));
                    }
                }
                submitting.set(false);
            });
        })
    };

    if let Some(session) = ctx.session().current() {
        return rsx! { Redirect { to: Route::home(session.role) } };
    }

    rsx! {
        div { class: "login-page",
            div { class: "login-card",
                h2 { "Literacy Assessment" }
                p { class: "login-subtitle", "Sign in to continue" }
                label { class: "field",
                    span { class: "field-label", "Email" }
                    input {
                        r#type: "email",
                        value: "{email}",
                        oninput: move |evt| email.set(evt.value()),
                    }
                }
                label { class: "field",
                    span { class: "field-label", "Password" }
                    input {
                        r#type: "password",
                        value: "{password}",
                        oninput: move |evt| password.set(evt.value()),
                        onkeydown: move |evt| {
                            if evt.key() == Key::Enter {
                                on_submit.call(());
                            }
                        },
                    }
                }
                if let Some(message) = failure() {
                    p { class: "notice notice-error", "{message}" }
                }
                button {
                    class: "btn btn-primary login-submit",
                    r#type: "button",
                    disabled: submitting(),
                    onclick: move |_| on_submit.call(()),
                    if submitting() { "Signing in..." } else { "Login" }
                }
            }
        }
    }
}
