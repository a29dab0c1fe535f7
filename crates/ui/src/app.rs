use dioxus::prelude::*;
use dioxus_router::Router;
use tracing::error;

use crate::routes::Route;

#[component]
pub fn App() -> Element {
    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }
        document::Title { "Literacy Assessment" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| {
                    error!(?errors, "view failed to render");
                    rsx! {
                        div { class: "fatal",
                            h1 { "The assessment client stopped unexpectedly" }
                            p { "Restart the application to continue. Saved assessments are not affected." }
                            pre { "{errors:?}" }
                        }
                    }
                },
                Router::<Route> {}
            }
        }
    }
}
