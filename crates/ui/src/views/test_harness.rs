use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use literacy_core::model::{KeepOrder, Role, UserId, UserProfile};
use services::{
    AccountService, AppServices, AssessmentFormService, AssessmentSessionService, AuthService,
    ProfileService, RosterService, SessionContext, StatisticsService,
};
use storage::InMemoryGateway;

use crate::context::{UiApp, build_app_context};
use crate::views::{
    AccountsView, AdminDashboardView, AssessmentTestView, DashboardView, LoginView,
    StatisticsView,
};

pub const PASSWORD: &str = "pw";

struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn session(&self) -> Arc<SessionContext> {
        self.services.session()
    }

    fn auth(&self) -> Arc<AuthService> {
        self.services.auth()
    }

    fn assessment_sessions(&self) -> Arc<AssessmentSessionService> {
        self.services.assessment_sessions()
    }

    fn roster(&self) -> Arc<RosterService> {
        self.services.roster()
    }

    fn statistics(&self) -> Arc<StatisticsService> {
        self.services.statistics()
    }

    fn profile(&self) -> Arc<ProfileService> {
        self.services.profile()
    }

    fn accounts(&self) -> Arc<AccountService> {
        self.services.accounts()
    }

    fn assessment_form(&self) -> Arc<AssessmentFormService> {
        self.services.assessment_form()
    }

    fn image_base(&self) -> String {
        "/images/".to_owned()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewKind {
    Login,
    Dashboard,
    AdminDashboard,
    Statistics,
    Accounts,
    AssessmentTest(i64),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    match use_context::<ViewKind>() {
        ViewKind::Login => rsx! { LoginView {} },
        ViewKind::Dashboard => rsx! { DashboardView {} },
        ViewKind::AdminDashboard => rsx! { AdminDashboardView {} },
        ViewKind::Statistics => rsx! { StatisticsView {} },
        ViewKind::Accounts => rsx! { AccountsView {} },
        ViewKind::AssessmentTest(id) => rsx! { AssessmentTestView { id } },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub backend: InMemoryGateway,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Rebuild and let resources settle.
    pub async fn settle(&mut self) {
        self.rebuild();
        for _ in 0..4 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// A backend with one account of `role` (email `<role>@example.org`).
pub fn backend_with(role: Role) -> (InMemoryGateway, UserId) {
    let backend = InMemoryGateway::new();
    let id = backend
        .add_account(
            &format!("{}@example.org", role.label()),
            PASSWORD,
            role,
            UserProfile {
                full_name: "Ana Cruz".into(),
                ..UserProfile::default()
            },
        )
        .expect("add account");
    (backend, id)
}

/// Mount `view` over `backend`, signed in as `login` when given.
pub async fn setup_view_harness(
    view: ViewKind,
    backend: InMemoryGateway,
    login: Option<Role>,
) -> ViewHarness {
    let services = AppServices::in_memory(backend.clone().into_gateway(), Arc::new(KeepOrder))
        .await
        .expect("assemble services");
    if let Some(role) = login {
        services
            .auth()
            .login(&format!("{}@example.org", role.label()), PASSWORD)
            .await
            .expect("login");
    }

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app: Arc::new(TestApp { services }),
            view,
        },
    );
    ViewHarness { dom, backend }
}
