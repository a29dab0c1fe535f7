use dioxus::prelude::*;
use dioxus_router::use_navigator;
use literacy_core::model::NewAssessmentDraft;
use literacy_core::model::location::{GENDERS, barangays, city_names, region_names, schools};
use tracing::error;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::ViewError;
use crate::views::components::{ErrorPanel, SelectField, TextField, owned_options};

#[component]
pub fn CreateAssessmentView() -> Element {
    let ctx = use_context::<AppContext>();
    let nav = use_navigator();
    let mut draft = use_signal(NewAssessmentDraft::default);
    let mut saving = use_signal(|| false);
    let mut failure = use_signal(|| None::<ViewError>);

    let on_create = {
        let form_service = ctx.assessment_form();
        use_callback(move |_| {
            let form_service = form_service.clone();
            saving.set(true);
            failure.set(None);
            spawn(async move {
                match form_service.create(&draft()).await {
                    Ok(()) => {
                        nav.push(Route::Dashboard {});
                    }
                    Err(err) => {
                        error!(error = %err, "could not create assessment");
                        failure.set(Some(err.into()));
                    }
                }
                saving.set(false);
            });
        })
    };

    let current = draft();
    let cities = city_names(&current.region);

    rsx! {
        div { class: "page form-page",
            h2 { "Create Assessment" }
            div { class: "form-card",
                TextField {
                    label: "Age",
                    kind: "number",
                    value: current.age.clone(),
                    on_input: move |value: String| draft.write().age = value,
                }
                SelectField {
                    label: "Gender",
                    value: current.gender.clone(),
                    options: owned_options(&GENDERS),
                    placeholder: "Select",
                    on_change: move |value: String| draft.write().gender = value,
                }
                TextField {
                    label: "Grade Level",
                    value: current.grade_level.clone(),
                    on_input: move |value: String| draft.write().grade_level = value,
                }
                SelectField {
                    label: "Region",
                    value: current.region.clone(),
                    options: owned_options(&region_names()),
                    placeholder: "Select Region",
                    on_change: move |value: String| draft.write().select_region(value),
                }
                SelectField {
                    label: "City",
                    value: current.city.clone(),
                    options: owned_options(&cities),
                    placeholder: "Select City",
                    disabled: current.region.is_empty(),
                    on_change: move |value: String| draft.write().select_city(value),
                }
                SelectField {
                    label: "Barangay",
                    value: current.barangay.clone(),
                    options: owned_options(barangays(&current.region, &current.city)),
                    placeholder: "Select Barangay",
                    disabled: current.city.is_empty(),
                    on_change: move |value: String| draft.write().select_barangay(value),
                }
                SelectField {
                    label: "School",
                    value: current.school.clone(),
                    options: owned_options(schools(&current.region, &current.city)),
                    placeholder: "Select School",
                    disabled: current.barangay.is_empty(),
                    on_change: move |value: String| draft.write().school = value,
                }
                if let Some(err) = failure() {
                    ErrorPanel { error: err }
                }
                div { class: "form-actions",
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            nav.push(Route::Dashboard {});
                        },
                        "Cancel"
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        disabled: saving(),
                        onclick: move |_| on_create.call(()),
                        if saving() { "Saving..." } else { "Create" }
                    }
                }
            }
        }
    }
}
