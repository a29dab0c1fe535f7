use dioxus::prelude::*;
use literacy_core::model::UserAccount;
use tracing::warn;

use crate::context::AppContext;
use crate::views::components::ErrorPanel;
use crate::views::{ViewError, ViewState, view_state_from_resource};

fn role_label(account: &UserAccount) -> String {
    account
        .role()
        .map_or_else(|| account.role.clone(), |role| role.display_name().to_owned())
}

#[component]
pub fn AccountsView() -> Element {
    let ctx = use_context::<AppContext>();
    let accounts = ctx.accounts();
    let mut resource = use_resource(move || {
        let accounts = accounts.clone();
        async move {
            accounts.list().await.map_err(|err| {
                warn!(error = %err, "could not load accounts");
                ViewError::from(err)
            })
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page accounts-page",
            h2 { "Accounts" }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(users) => rsx! {
                    if users.is_empty() {
                        p { class: "empty", "No accounts yet." }
                    } else {
                        table { class: "accounts-table",
                            thead {
                                tr {
                                    th { "#" }
                                    th { "Name" }
                                    th { "Email" }
                                    th { "Role" }
                                }
                            }
                            tbody {
                                for user in users {
                                    tr { key: "{user.id.value()}",
                                        td { "{user.id.value()}" }
                                        td { "{user.full_name}" }
                                        td { "{user.email}" }
                                        td { "{role_label(&user)}" }
                                    }
                                }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    ErrorPanel { error: err, on_retry: move |_| resource.restart() }
                },
            }
        }
    }
}
