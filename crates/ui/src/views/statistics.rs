use dioxus::prelude::*;
use literacy_core::model::StatisticsForm;
use literacy_core::model::location::{GENDERS, barangays, city_names, region_names, schools};
use services::{ErrorKind, StatisticsReport};
use tracing::warn;

use crate::context::AppContext;
use crate::views::components::{ErrorPanel, SelectField, owned_options};
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::map_level_bars;

#[component]
pub fn StatisticsView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut form = use_signal(StatisticsForm::default);

    let statistics = ctx.statistics();
    let mut resource = use_resource(move || {
        let statistics = statistics.clone();
        let form = form();
        async move {
            statistics.load(&form).await.map_err(|err| {
                if err.kind() != ErrorKind::ValidationFailure {
                    warn!(error = %err, "could not load statistics");
                }
                ViewError::from(err)
            })
        }
    });
    let state: ViewState<StatisticsReport> = view_state_from_resource(&resource);

    let current = form();
    let cities = city_names(&current.region);
    let barangay_options = barangays(&current.region, &current.city);
    let school_options = schools(&current.region, &current.city);

    rsx! {
        div { class: "page statistics-page",
            h2 { "Student Statistics" }

            div { class: "filters",
                SelectField {
                    label: "Region",
                    value: current.region.clone(),
                    options: owned_options(&region_names()),
                    placeholder: "All regions",
                    on_change: move |value: String| form.write().select_region(value),
                }
                SelectField {
                    label: "City",
                    value: current.city.clone(),
                    options: owned_options(&cities),
                    placeholder: "All cities",
                    on_change: move |value: String| form.write().select_city(value),
                }
                SelectField {
                    label: "Barangay",
                    value: current.barangay.clone(),
                    options: owned_options(barangay_options),
                    placeholder: "All barangays",
                    on_change: move |value: String| form.write().select_barangay(value),
                }
                SelectField {
                    label: "School",
                    value: current.school.clone(),
                    options: owned_options(school_options),
                    placeholder: "All schools",
                    on_change: move |value: String| form.write().school = value,
                }
                label { class: "field",
                    span { class: "field-label", "Age" }
                    input {
                        r#type: "text",
                        placeholder: "e.g. 8 or 7-10",
                        value: "{current.age}",
                        onchange: move |evt| form.write().age = evt.value(),
                    }
                }
                SelectField {
                    label: "Gender",
                    value: current.gender.clone(),
                    options: owned_options(&GENDERS),
                    placeholder: "All genders",
                    on_change: move |value: String| form.write().gender = value,
                }
            }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(report) => {
                    let bars = map_level_bars(&report.tallies);
                    rsx! {
                        div { class: "statistics-report",
                            h3 { class: "statistics-caption", "{report.caption()}" }
                            p { class: "statistics-total", "Total assessments: {report.tallies.total}" }
                            ul { class: "level-bars",
                                for bar in bars {
                                    li { key: "{bar.label}", class: "level-bar",
                                        span { class: "level-bar-label", "{bar.label}" }
                                        div { class: "level-bar-track",
                                            div {
                                                class: "level-bar-fill",
                                                style: "width: {bar.percent}%",
                                            }
                                        }
                                        span { class: "level-bar-count", "{bar.count}" }
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
        }
    }
}
