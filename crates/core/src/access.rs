//! Which screens a session may reach.

use crate::model::{Role, Session};

/// Every navigable screen of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Login,
    Dashboard,
    AdminDashboard,
    Statistics,
    Profile,
    CreateAssessment,
    AssessmentTest,
    CreateVolunteer,
    CreateAdmin,
    Accounts,
}

const ALL_ROLES: &[Role] = &[Role::User, Role::Admin, Role::Mngt];
const STAFF: &[Role] = &[Role::Admin, Role::Mngt];
const VOLUNTEER: &[Role] = &[Role::User];
const MANAGEMENT: &[Role] = &[Role::Mngt];

impl Page {
    /// Roles allowed to open this page; `None` for public pages.
    #[must_use]
    pub const fn allowed_roles(self) -> Option<&'static [Role]> {
        match self {
            Page::Login => None,
            Page::Dashboard | Page::Profile => Some(ALL_ROLES),
            Page::AdminDashboard | Page::Statistics | Page::CreateVolunteer => Some(STAFF),
            Page::CreateAssessment | Page::AssessmentTest => Some(VOLUNTEER),
            Page::CreateAdmin | Page::Accounts => Some(MANAGEMENT),
        }
    }

    #[must_use]
    pub fn allows(self, role: Role) -> bool {
        self.allowed_roles()
            .is_none_or(|roles| roles.contains(&role))
    }
}

/// Outcome of a guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    /// Missing session or a role outside the page's allowed set.
    RedirectToLogin,
}

#[must_use]
pub fn authorize(page: Page, session: Option<&Session>) -> Access {
    match (page.allowed_roles(), session) {
        (None, _) => Access::Granted,
        (Some(_), None) => Access::RedirectToLogin,
        (Some(roles), Some(session)) if roles.contains(&session.role) => Access::Granted,
        (Some(_), Some(_)) => Access::RedirectToLogin,
    }
}

/// Landing page after login.
#[must_use]
pub const fn home_page(role: Role) -> Page {
    match role {
        Role::User => Page::Dashboard,
        Role::Admin | Role::Mngt => Page::AdminDashboard,
    }
}

/// Entry in the role-specific sidebar. `page == None` means logout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub title: &'static str,
    pub page: Option<Page>,
}

const fn item(title: &'static str, page: Page) -> MenuItem {
    MenuItem {
        title,
        page: Some(page),
    }
}

const LOGOUT: MenuItem = MenuItem {
    title: "Logout",
    page: None,
};

#[must_use]
pub fn menu_for(role: Role) -> Vec<MenuItem> {
    let mut items = match role {
        Role::User => vec![
            item("Dashboard", Page::Dashboard),
            item("Profile", Page::Profile),
        ],
        Role::Admin => vec![
            item("Student Statistics", Page::Statistics),
            item("View Assessments", Page::AdminDashboard),
            item("Add Volunteer", Page::CreateVolunteer),
            item("Profile", Page::Profile),
        ],
        Role::Mngt => vec![
            item("Student Statistics", Page::Statistics),
            item("View Assessments", Page::AdminDashboard),
            item("View Accounts", Page::Accounts),
            item("Add Volunteer", Page::CreateVolunteer),
            item("Add Admin", Page::CreateAdmin),
            item("Profile", Page::Profile),
        ],
    };
    items.push(LOGOUT);
    items
}
