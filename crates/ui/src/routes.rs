use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable, use_navigator, use_route};
use literacy_core::access::{Access, Page, authorize, home_page, menu_for};
use literacy_core::model::Role;
use tracing::{debug, warn};

use crate::context::AppContext;
use crate::views::{
    AccountsView, AdminDashboardView, AssessmentTestView, CreateAdminView, CreateAssessmentView,
    CreateVolunteerView, DashboardView, LoginView, ProfileView, StatisticsView,
};

#[derive(Clone, Debug, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[route("/", LoginView)] Login {},
    #[layout(Guard)]
        #[route("/dashboard", DashboardView)] Dashboard {},
        #[route("/admin-dashboard", AdminDashboardView)] AdminDashboard {},
        #[route("/statistics", StatisticsView)] Statistics {},
        #[route("/profile", ProfileView)] Profile {},
        #[route("/assessments", CreateAssessmentView)] CreateAssessment {},
        #[route("/assessments/:id", AssessmentTestView)] AssessmentTest { id: i64 },
        #[route("/createVolunteer", CreateVolunteerView)] CreateVolunteer {},
        #[route("/createAdmin", CreateAdminView)] CreateAdmin {},
        #[route("/accounts", AccountsView)] Accounts {},
    #[end_layout]
    #[route("/:..segments", NotFound)] NotFound { segments: Vec<String> },
}

impl Route {
    /// The access-controlled page this route shows.
    #[must_use]
    pub fn page(&self) -> Page {
        match self {
            Route::Login {} | Route::NotFound { .. } => Page::Login,
            Route::Dashboard {} => Page::Dashboard,
            Route::AdminDashboard {} => Page::AdminDashboard,
            Route::Statistics {} => Page::Statistics,
            Route::Profile {} => Page::Profile,
            Route::CreateAssessment {} => Page::CreateAssessment,
            Route::AssessmentTest { .. } => Page::AssessmentTest,
            Route::CreateVolunteer {} => Page::CreateVolunteer,
            Route::CreateAdmin {} => Page::CreateAdmin,
            Route::Accounts {} => Page::Accounts,
        }
    }

    /// Route for a parameterless page. The assessment test page needs an id
    /// and has no menu entry, so it maps to `None`.
    #[must_use]
    pub fn for_page(page: Page) -> Option<Self> {
        Some(match page {
            Page::Login => Route::Login {},
            Page::Dashboard => Route::Dashboard {},
            Page::AdminDashboard => Route::AdminDashboard {},
            Page::Statistics => Route::Statistics {},
            Page::Profile => Route::Profile {},
            Page::CreateAssessment => Route::CreateAssessment {},
            Page::CreateVolunteer => Route::CreateVolunteer {},
            Page::CreateAdmin => Route::CreateAdmin {},
            Page::Accounts => Route::Accounts {},
            Page::AssessmentTest => return None,
        })
    }

    /// Landing route after login.
    #[must_use]
    pub fn home(role: Role) -> Self {
        Self::for_page(home_page(role)).unwrap_or(Route::Login {})
    }
}

/// Replaces the current route once mounted.
#[component]
pub fn Redirect(to: Route) -> Element {
    let nav = use_navigator();
    use_effect(move || {
        nav.replace(to.clone());
    });
    rsx! {}
}

#[component]
fn NotFound(segments: Vec<String>) -> Element {
    debug!(path = %segments.join("/"), "unknown route");
    rsx! { Redirect { to: Route::Login {} } }
}

#[component]
fn Guard() -> Element {
    let ctx = use_context::<AppContext>();
    let route = use_route::<Route>();
    let session = ctx.session().current();

    match (authorize(route.page(), session.as_ref()), session) {
        (Access::Granted, Some(session)) => rsx! {
            div { class: "app",
                Sidebar { role: session.role }
                main { class: "content",
                    Outlet::<Route> {}
                }
            }
        },
        _ => {
            debug!(page = ?route.page(), "access denied, redirecting to login");
            rsx! { Redirect { to: Route::Login {} } }
        }
    }
}

#[component]
fn Sidebar(role: Role) -> Element {
    let ctx = use_context::<AppContext>();
    let nav = use_navigator();

    let items = menu_for(role).into_iter().map(|item| {
        match item.page.and_then(Route::for_page) {
            Some(route) => rsx! {
                li { key: "{item.title}", Link { to: route, "{item.title}" } }
            },
            None => {
                let auth = ctx.auth();
                rsx! {
                    li { key: "{item.title}",
                        button {
                            class: "sidebar-logout",
                            r#type: "button",
                            onclick: move |_| {
                                let auth = auth.clone();
                                spawn(async move {
                                    if let Err(err) = auth.logout().await {
                                        warn!(error = %err, "logout could not clear stored session");
                                    }
                                    nav.replace(Route::Login {});
                                });
                            },
                            "{item.title}"
                        }
                    }
                }
            }
        }
    });

    rsx! {
        nav { class: "sidebar",
            h1 { "Literacy" }
            p { class: "sidebar-role", "{role.display_name()}" }
            ul { {items} }
        }
    }
}
