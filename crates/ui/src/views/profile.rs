use std::path::Path;

use dioxus::prelude::*;
use literacy_core::model::{AvatarUpload, PasswordForm, ProfileDraft, ProfileField};
use tracing::{error, info, warn};

use crate::context::AppContext;
use crate::views::components::{ErrorPanel, Notice};
use crate::views::{ViewError, ViewState, view_state_from_resource};

#[derive(Clone, Debug, PartialEq)]
enum SaveState {
    Idle,
    Saving,
    Saved(&'static str),
    Error(ViewError),
}

fn mime_for(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("jpg" | "jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}

async fn pick_avatar() -> Option<AvatarUpload> {
    let handle = rfd::AsyncFileDialog::new()
        .set_title("Choose a profile picture")
        .add_filter("Image", &["png", "jpg", "jpeg", "gif", "webp"])
        .pick_file()
        .await?;
    let file_name = handle.file_name();
    let bytes = handle.read().await;
    Some(AvatarUpload {
        mime: mime_for(&file_name).to_owned(),
        file_name,
        bytes,
    })
}

#[component]
pub fn ProfileView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut draft = use_signal(|| None::<ProfileDraft>);
    let mut avatar = use_signal(|| None::<AvatarUpload>);
    let mut passwords = use_signal(PasswordForm::default);
    let mut save_state = use_signal(|| SaveState::Idle);

    let profile_service = ctx.profile();
    let mut resource = use_resource(move || {
        let profile_service = profile_service.clone();
        async move {
            profile_service.load().await.map_err(|err| {
                warn!(error = %err, "could not load profile");
                ViewError::from(err)
            })
        }
    });
    let state = view_state_from_resource(&resource);

    use_effect(move || {
        if let Some(Ok(profile)) = resource.value().read().as_ref() {
            draft.set(Some(ProfileDraft::from_profile(profile.clone())));
        }
    });

    let on_save = {
        let profile_service = ctx.profile();
        use_callback(move |_| {
            let Some(current) = draft() else {
                return;
            };
            let profile_service = profile_service.clone();
            save_state.set(SaveState::Saving);
            spawn(async move {
                match profile_service.save(&current, avatar()).await {
                    Ok(profile) => {
                        draft.set(Some(ProfileDraft::from_profile(profile)));
                        avatar.set(None);
                        save_state.set(SaveState::Saved("Profile saved"));
                    }
                    Err(err) => {
                        error!(error = %err, "profile save failed");
                        save_state.set(SaveState::Error(err.into()));
                    }
                }
            });
        })
    };

    let on_change_password = {
        let profile_service = ctx.profile();
        use_callback(move |_| {
            let profile_service = profile_service.clone();
            save_state.set(SaveState::Saving);
            spawn(async move {
                let mut form = passwords();
                let result = profile_service.change_password(&mut form).await;
                passwords.set(form);
                match result {
                    Ok(()) => {
                        if let Some(current) = draft.write().as_mut() {
                            current.close(ProfileField::Password);
                        }
                        save_state.set(SaveState::Saved("Password changed"));
                    }
                    Err(err) => {
                        error!(error = %err, "password change failed");
                        save_state.set(SaveState::Error(err.into()));
                    }
                }
            });
        })
    };

    let on_pick_avatar = move |_: Event<MouseData>| {
        spawn(async move {
            if let Some(upload) = pick_avatar().await {
                info!(file = %upload.file_name, size = upload.bytes.len(), "avatar picked");
                avatar.set(Some(upload));
            }
        });
    };

    let saving = save_state() == SaveState::Saving;

    rsx! {
        div { class: "page profile-page",
            h2 { "Profile" }

            match (state, draft()) {
                (ViewState::Error(err), _) => rsx! {
                    ErrorPanel { error: err, on_retry: move |_| resource.restart() }
                },
                (ViewState::Ready(_), Some(current)) => {
                    let values = current.values().clone();
                    let editing_password = current.is_editing(ProfileField::Password);
                    let pw = passwords();
                    rsx! {
                        div { class: "profile-avatar",
                            if let Some(url) = values.avatar_url.clone() {
                                img { class: "avatar", src: "{url}", alt: "Profile picture" }
                            }
                            button {
                                class: "btn btn-secondary",
                                r#type: "button",
                                disabled: saving,
                                onclick: on_pick_avatar,
                                "Change Picture"
                            }
                            if let Some(upload) = avatar() {
                                span { class: "avatar-pending", "{upload.file_name}" }
                            }
                        }
                        div { class: "profile-field",
                            span { class: "field-label", "Email" }
                            span { class: "field-value", "{values.email}" }
                        }
                        for field in ProfileField::EDITABLE {
                            ProfileRow {
                                key: "{field.label()}",
                                field,
                                value: current.value(field).to_owned(),
                                editing: current.is_editing(field),
                                on_toggle: move |_| {
                                    if let Some(d) = draft.write().as_mut() {
                                        d.toggle(field);
                                    }
                                },
                                on_input: move |value: String| {
                                    if let Some(d) = draft.write().as_mut() {
                                        d.set(field, value);
                                    }
                                },
                            }
                        }
                        button {
                            class: "btn btn-primary",
                            r#type: "button",
                            disabled: saving,
                            onclick: move |_| on_save.call(()),
                            "Save"
                        }

                        div { class: "password-section",
                            div { class: "profile-field",
                                span { class: "field-label", "Password" }
                                button {
                                    class: "btn btn-link",
                                    r#type: "button",
                                    onclick: move |_| {
                                        if let Some(d) = draft.write().as_mut() {
                                            d.toggle(ProfileField::Password);
                                        }
                                        passwords.write().clear();
                                    },
                                    if editing_password { "Cancel" } else { "Change Password" }
                                }
                            }
                            if editing_password {
                                label { class: "field",
                                    span { class: "field-label", "Current Password" }
                                    input {
                                        r#type: "password",
                                        value: "{pw.current}",
                                        oninput: move |evt| passwords.write().current = evt.value(),
                                    }
                                }
                                label { class: "field",
                                    span { class: "field-label", "New Password" }
                                    input {
                                        r#type: "password",
                                        value: "{pw.new}",
                                        oninput: move |evt| passwords.write().new = evt.value(),
                                    }
                                }
                                label { class: "field",
                                    span { class: "field-label", "Confirm Password" }
                                    input {
                                        r#type: "password",
                                        value: "{pw.confirm}",
                                        oninput: move |evt| passwords.write().confirm = evt.value(),
                                    }
                                }
                                button {
                                    class: "btn btn-primary",
                                    r#type: "button",
                                    disabled: saving,
                                    onclick: move |_| on_change_password.call(()),
                                    "Update Password"
                                }
                            }
                        }
                    }
                }
                _ => rsx! {
                    p { "Loading..." }
                },
            }

            match save_state() {
                SaveState::Saved(text) => rsx! {
                    Notice { text: text.to_owned(), is_error: false }
                },
                SaveState::Error(err) => rsx! {
                    ErrorPanel { error: err }
                },
                SaveState::Idle | SaveState::Saving => rsx! {},
            }
        }
    }
}

#[component]
fn ProfileRow(
    field: ProfileField,
    value: String,
    editing: bool,
    on_toggle: Callback<()>,
    on_input: Callback<String>,
) -> Element {
    rsx! {
        div { class: "profile-field",
            span { class: "field-label", "{field.label()}" }
            if editing {
                if field == ProfileField::Bio {
                    textarea {
                        value: "{value}",
                        oninput: move |evt| on_input.call(evt.value()),
                    }
                } else {
                    input {
                        r#type: "text",
                        value: "{value}",
                        oninput: move |evt| on_input.call(evt.value()),
                    }
                }
            } else {
                span { class: "field-value", "{value}" }
            }
            button {
                class: "btn btn-link",
                r#type: "button",
                onclick: move |_| on_toggle.call(()),
                if editing { "Done" } else { "Edit" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn avatar_mime_follows_extension() {
        assert_eq!(mime_for("me.PNG"), "image/png");
        assert_eq!(mime_for("photo.jpeg"), "image/jpeg");
        assert_eq!(mime_for("noext"), "application/octet-stream");
    }
}
