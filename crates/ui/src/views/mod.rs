mod accounts;
mod admin_dashboard;
mod assessment_test;
mod components;
mod create_account;
mod create_assessment;
mod dashboard;
mod login;
mod profile;
mod state;
mod statistics;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use accounts::AccountsView;
pub use admin_dashboard::AdminDashboardView;
pub use assessment_test::AssessmentTestView;
pub use create_account::{CreateAdminView, CreateVolunteerView};
pub use create_assessment::CreateAssessmentView;
pub use dashboard::DashboardView;
pub use login::LoginView;
pub use profile::ProfileView;
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use statistics::StatisticsView;
