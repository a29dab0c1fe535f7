//! In-memory stand-in for the REST backend, used by tests and demos.

use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use literacy_core::model::{
    Assessment, AssessmentId, AuthToken, Level, NewAssessment, PasswordChange, ProfileUpdate,
    Registration, Role, StatisticsFilter, StatisticsRecord, Status, StudentDetails, UserAccount,
    UserId, UserProfile,
};

use crate::repository::{
    AssessmentApi, AuthApi, Gateway, GatewayError, LoginResponse, ProfileApi, StatisticsApi,
    UserApi,
};

/// Gateway operations that can be told to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Login,
    Register,
    GetProfile,
    UpdateProfile,
    ChangePassword,
    ListAssessments,
    GetAssessment,
    CreateAssessment,
    UpdateStatus,
    UpdateLevel,
    DeleteAssessments,
    Statistics,
    ListUsers,
}

/// A request the fake backend accepted, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Login { email: String },
    Register { email: String, role: Option<Role> },
    GetProfile,
    UpdateProfile { fields: Vec<(&'static str, String)>, avatar: bool },
    ChangePassword,
    ListAssessments,
    GetAssessment(AssessmentId),
    CreateAssessment,
    UpdateStatus(AssessmentId, Status),
    UpdateLevel(AssessmentId, Level),
    DeleteAssessments(Vec<AssessmentId>),
    Statistics(Vec<(&'static str, String)>),
    ListUsers,
}

#[derive(Debug, Clone)]
struct Account {
    id: UserId,
    email: String,
    password: String,
    role: Role,
    profile: UserProfile,
}

#[derive(Debug, Clone)]
struct StoredAssessment {
    owner: Option<UserId>,
    record: Assessment,
}

#[derive(Default)]
struct Backend {
    accounts: Vec<Account>,
    tokens: BTreeMap<String, UserId>,
    assessments: BTreeMap<AssessmentId, StoredAssessment>,
    extra_statistics: Vec<StatisticsRecord>,
    failing: HashSet<Operation>,
    calls: Vec<Call>,
    next_user: i64,
    next_assessment: i64,
    next_token: u64,
}

/// Backend double: accounts, tokens and assessments held in memory.
///
/// Tokens are issued by `login` and checked on every other call, so a stale
/// token yields `GatewayError::Unauthorized` like the real server.
#[derive(Clone, Default)]
pub struct InMemoryGateway {
    inner: Arc<Mutex<Backend>>,
}

fn injected_failure(op: Operation) -> GatewayError {
    GatewayError::Status {
        status: 500,
        message: format!("injected failure: {op:?}"),
    }
}

impl InMemoryGateway {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn into_gateway(self) -> Gateway {
        Gateway::from_backend(self)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Backend>, GatewayError> {
        self.inner
            .lock()
            .map_err(|err| GatewayError::Transport(err.to_string()))
    }

    /// Add an account and return its id.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Transport` if the backend lock is poisoned.
    pub fn add_account(
        &self,
        email: &str,
        password: &str,
        role: Role,
        profile: UserProfile,
    ) -> Result<UserId, GatewayError> {
        let mut backend = self.lock()?;
        backend.next_user += 1;
        let id = UserId::new(backend.next_user);
        let profile = UserProfile {
            email: email.to_owned(),
            ..profile
        };
        backend.accounts.push(Account {
            id,
            email: email.to_owned(),
            password: password.to_owned(),
            role,
            profile,
        });
        Ok(id)
    }

    /// Store an assessment as-is, optionally owned by a volunteer.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Transport` if the backend lock is poisoned.
    pub fn insert_assessment(
        &self,
        owner: Option<UserId>,
        record: Assessment,
    ) -> Result<(), GatewayError> {
        let mut backend = self.lock()?;
        backend.next_assessment = backend.next_assessment.max(record.id().value());
        backend
            .assessments
            .insert(record.id(), StoredAssessment { owner, record });
        Ok(())
    }

    /// Extra raw rows appended to every statistics response.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Transport` if the backend lock is poisoned.
    pub fn push_statistics_rows(&self, rows: Vec<StatisticsRecord>) -> Result<(), GatewayError> {
        self.lock()?.extra_statistics.extend(rows);
        Ok(())
    }

    /// Make every later call of `op` fail until [`Self::recover`].
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Transport` if the backend lock is poisoned.
    pub fn fail_on(&self, op: Operation) -> Result<(), GatewayError> {
        self.lock()?.failing.insert(op);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `GatewayError::Transport` if the backend lock is poisoned.
    pub fn recover(&self, op: Operation) -> Result<(), GatewayError> {
        self.lock()?.failing.remove(&op);
        Ok(())
    }

    /// Accepted calls so far.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Transport` if the backend lock is poisoned.
    pub fn calls(&self) -> Result<Vec<Call>, GatewayError> {
        Ok(self.lock()?.calls.clone())
    }

    /// Current stored copy of an assessment.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Status` with 404 if the id is unknown.
    pub fn assessment(&self, id: AssessmentId) -> Result<Assessment, GatewayError> {
        let backend = self.lock()?;
        backend
            .assessments
            .get(&id)
            .map(|stored| stored.record.clone())
            .ok_or_else(not_found)
    }
}

fn not_found() -> GatewayError {
    GatewayError::Status {
        status: 404,
        message: "not found".into(),
    }
}

impl Backend {
    fn begin(&mut self, op: Operation) -> Result<(), GatewayError> {
        if self.failing.contains(&op) {
            return Err(injected_failure(op));
        }
        Ok(())
    }

    fn caller(&self, token: &AuthToken) -> Result<&Account, GatewayError> {
        let id = self
            .tokens
            .get(token.as_str())
            .ok_or(GatewayError::Unauthorized)?;
        self.accounts
            .iter()
            .find(|account| account.id == *id)
            .ok_or(GatewayError::Unauthorized)
    }

    fn caller_mut(&mut self, token: &AuthToken) -> Result<&mut Account, GatewayError> {
        let id = *self
            .tokens
            .get(token.as_str())
            .ok_or(GatewayError::Unauthorized)?;
        self.accounts
            .iter_mut()
            .find(|account| account.id == id)
            .ok_or(GatewayError::Unauthorized)
    }

    fn visible(&self, caller: &Account, stored: &StoredAssessment) -> bool {
        caller.role != Role::User || stored.owner == Some(caller.id)
    }

    fn record_mut(
        &mut self,
        token: &AuthToken,
        id: AssessmentId,
    ) -> Result<&mut Assessment, GatewayError> {
        let caller = self.caller(token)?.clone();
        let stored = self.assessments.get(&id).ok_or_else(not_found)?;
        if !self.visible(&caller, stored) {
            return Err(not_found());
        }
        self.assessments
            .get_mut(&id)
            .map(|stored| &mut stored.record)
            .ok_or_else(not_found)
    }
}

fn matches_statistics(filter: &StatisticsFilter, student: &StudentDetails) -> bool {
    let text = |wanted: &str, actual: &str| wanted.trim().is_empty() || wanted.trim() == actual;
    text(&filter.region, &student.region)
        && text(&filter.city, &student.city)
        && text(&filter.barangay, &student.barangay)
        && text(&filter.school, &student.school)
        && text(&filter.gender, &student.gender)
        && filter
            .age
            .is_none_or(|age| student.age.is_some_and(|value| age.contains(value)))
}

#[async_trait]
impl AuthApi for InMemoryGateway {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, GatewayError> {
        let mut backend = self.lock()?;
        backend.begin(Operation::Login)?;
        let account = backend
            .accounts
            .iter()
            .find(|account| account.email == email && account.password == password)
            .cloned()
            .ok_or(GatewayError::Unauthorized)?;
        backend.next_token += 1;
        let token = format!("token-{}", backend.next_token);
        backend.tokens.insert(token.clone(), account.id);
        backend.calls.push(Call::Login {
            email: email.to_owned(),
        });
        Ok(LoginResponse::new(token, account.role.label(), Some(account.id)))
    }

    async fn register(
        &self,
        token: &AuthToken,
        registration: &Registration,
    ) -> Result<(), GatewayError> {
        let mut backend = self.lock()?;
        backend.begin(Operation::Register)?;
        backend.caller(token)?;
        if backend
            .accounts
            .iter()
            .any(|account| account.email == registration.email)
        {
            return Err(GatewayError::Status {
                status: 409,
                message: "email already registered".into(),
            });
        }
        backend.next_user += 1;
        let id = UserId::new(backend.next_user);
        backend.accounts.push(Account {
            id,
            email: registration.email.clone(),
            password: registration.password.clone(),
            role: registration.role.unwrap_or(Role::User),
            profile: UserProfile {
                full_name: registration.full_name.clone(),
                email: registration.email.clone(),
                ..UserProfile::default()
            },
        });
        backend.calls.push(Call::Register {
            email: registration.email.clone(),
            role: registration.role,
        });
        Ok(())
    }
}

#[async_trait]
impl ProfileApi for InMemoryGateway {
    async fn get_profile(&self, token: &AuthToken) -> Result<UserProfile, GatewayError> {
        let mut backend = self.lock()?;
        backend.begin(Operation::GetProfile)?;
        let profile = backend.caller(token)?.profile.clone();
        backend.calls.push(Call::GetProfile);
        Ok(profile)
    }

    async fn update_profile(
        &self,
        token: &AuthToken,
        update: &ProfileUpdate,
    ) -> Result<(), GatewayError> {
        let mut backend = self.lock()?;
        backend.begin(Operation::UpdateProfile)?;
        let account = backend.caller_mut(token)?;
        for (key, value) in &update.fields {
            let slot = match *key {
                "full_name" => &mut account.profile.full_name,
                "phone_number" => &mut account.profile.phone_number,
                "skills" => &mut account.profile.skills,
                "location" => &mut account.profile.location,
                "bio" => &mut account.profile.bio,
                _ => continue,
            };
            slot.clone_from(value);
        }
        if let Some(avatar) = &update.avatar {
            account.profile.avatar_url = Some(format!("/uploads/{}", avatar.file_name));
        }
        backend.calls.push(Call::UpdateProfile {
            fields: update.fields.clone(),
            avatar: update.avatar.is_some(),
        });
        Ok(())
    }

    async fn change_password(
        &self,
        token: &AuthToken,
        change: &PasswordChange,
    ) -> Result<(), GatewayError> {
        let mut backend = self.lock()?;
        backend.begin(Operation::ChangePassword)?;
        let account = backend.caller_mut(token)?;
        if account.password != change.current_password {
            return Err(GatewayError::Status {
                status: 400,
                message: "current password is incorrect".into(),
            });
        }
        account.password.clone_from(&change.new_password);
        backend.calls.push(Call::ChangePassword);
        Ok(())
    }
}

#[async_trait]
impl AssessmentApi for InMemoryGateway {
    async fn list_assessments(&self, token: &AuthToken) -> Result<Vec<Assessment>, GatewayError> {
        let mut backend = self.lock()?;
        backend.begin(Operation::ListAssessments)?;
        let caller = backend.caller(token)?.clone();
        let records = backend
            .assessments
            .values()
            .filter(|stored| backend.visible(&caller, stored))
            .map(|stored| stored.record.clone())
            .collect();
        backend.calls.push(Call::ListAssessments);
        Ok(records)
    }

    async fn get_assessment(
        &self,
        token: &AuthToken,
        id: AssessmentId,
    ) -> Result<Assessment, GatewayError> {
        let mut backend = self.lock()?;
        backend.begin(Operation::GetAssessment)?;
        let record = backend.record_mut(token, id)?.clone();
        backend.calls.push(Call::GetAssessment(id));
        Ok(record)
    }

    async fn create_assessment(
        &self,
        token: &AuthToken,
        assessment: &NewAssessment,
    ) -> Result<(), GatewayError> {
        let mut backend = self.lock()?;
        backend.begin(Operation::CreateAssessment)?;
        let caller = backend.caller(token)?.clone();
        backend.next_assessment += 1;
        let id = AssessmentId::new(backend.next_assessment);
        let student = StudentDetails {
            age: Some(assessment.student_age),
            gender: assessment.student_gender.clone(),
            grade_level: assessment.student_grade_level.clone(),
            region: assessment.student_region.clone(),
            city: assessment.student_city.clone(),
            barangay: assessment.student_barangay.clone(),
            school: assessment.student_school.clone(),
        };
        let record = Assessment::new(id, Level::Nothing, Status::NotStarted, student)
            .with_volunteer_name(caller.profile.full_name.clone());
        backend.assessments.insert(
            id,
            StoredAssessment {
                owner: Some(caller.id),
                record,
            },
        );
        backend.calls.push(Call::CreateAssessment);
        Ok(())
    }

    async fn update_status(
        &self,
        token: &AuthToken,
        id: AssessmentId,
        status: Status,
    ) -> Result<(), GatewayError> {
        let mut backend = self.lock()?;
        backend.begin(Operation::UpdateStatus)?;
        let record = backend.record_mut(token, id)?;
        let updated = Assessment::new(id, record.level(), status, record.student().clone());
        *record = match record.volunteer_name() {
            Some(name) => updated.with_volunteer_name(name),
            None => updated,
        };
        backend.calls.push(Call::UpdateStatus(id, status));
        Ok(())
    }

    async fn update_level(
        &self,
        token: &AuthToken,
        id: AssessmentId,
        level: Level,
    ) -> Result<(), GatewayError> {
        let mut backend = self.lock()?;
        backend.begin(Operation::UpdateLevel)?;
        let record = backend.record_mut(token, id)?;
        let updated = Assessment::new(id, level, record.status(), record.student().clone());
        *record = match record.volunteer_name() {
            Some(name) => updated.with_volunteer_name(name),
            None => updated,
        };
        backend.calls.push(Call::UpdateLevel(id, level));
        Ok(())
    }

    async fn delete_assessments(
        &self,
        token: &AuthToken,
        ids: &[AssessmentId],
    ) -> Result<(), GatewayError> {
        let mut backend = self.lock()?;
        backend.begin(Operation::DeleteAssessments)?;
        backend.caller(token)?;
        for id in ids {
            backend.assessments.remove(id);
        }
        backend.calls.push(Call::DeleteAssessments(ids.to_vec()));
        Ok(())
    }
}

#[async_trait]
impl StatisticsApi for InMemoryGateway {
    async fn fetch_statistics(
        &self,
        token: &AuthToken,
        filter: &StatisticsFilter,
    ) -> Result<Vec<StatisticsRecord>, GatewayError> {
        let mut backend = self.lock()?;
        backend.begin(Operation::Statistics)?;
        backend.caller(token)?;
        let mut rows: Vec<StatisticsRecord> = backend
            .assessments
            .values()
            .filter(|stored| matches_statistics(filter, stored.record.student()))
            .map(|stored| StatisticsRecord::new(stored.record.level().label()))
            .collect();
        rows.extend(backend.extra_statistics.iter().cloned());
        backend.calls.push(Call::Statistics(filter.query_pairs()));
        Ok(rows)
    }
}

#[async_trait]
impl UserApi for InMemoryGateway {
    async fn list_users(&self, token: &AuthToken) -> Result<Vec<UserAccount>, GatewayError> {
        let mut backend = self.lock()?;
        backend.begin(Operation::ListUsers)?;
        let caller = backend.caller(token)?;
        if caller.role != Role::Mngt {
            return Err(GatewayError::Status {
                status: 403,
                message: "forbidden".into(),
            });
        }
        let accounts = backend
            .accounts
            .iter()
            .map(|account| UserAccount {
                id: account.id,
                full_name: account.profile.full_name.clone(),
                email: account.email.clone(),
                role: account.role.label().to_owned(),
            })
            .collect();
        backend.calls.push(Call::ListUsers);
        Ok(accounts)
    }
}
