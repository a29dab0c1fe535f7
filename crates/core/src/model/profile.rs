use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Volunteer/admin profile as served by `user/profile`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub skills: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl UserProfile {
    /// Whether every field required before creating assessments is filled in.
    ///
    /// Email and avatar do not count.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        ProfileField::EDITABLE
            .iter()
            .all(|field| !field.get(self).trim().is_empty())
    }

    /// Required fields that are still blank, in form order.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<ProfileField> {
        ProfileField::EDITABLE
            .into_iter()
            .filter(|field| field.get(self).trim().is_empty())
            .collect()
    }
}

//
// ─── EDIT STATE ────────────────────────────────────────────────────────────────
//

/// Profile controls that can be toggled into edit mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProfileField {
    FullName,
    PhoneNumber,
    Skills,
    Location,
    Bio,
    Password,
}

impl ProfileField {
    /// Text fields carried in the profile save, in form order.
    pub const EDITABLE: [ProfileField; 5] = [
        ProfileField::FullName,
        ProfileField::PhoneNumber,
        ProfileField::Skills,
        ProfileField::Location,
        ProfileField::Bio,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            ProfileField::FullName => "Full Name",
            ProfileField::PhoneNumber => "Phone Number",
            ProfileField::Skills => "Skills",
            ProfileField::Location => "Location",
            ProfileField::Bio => "Bio",
            ProfileField::Password => "Password",
        }
    }

    /// Multipart form key. The password toggle has none.
    #[must_use]
    pub const fn form_key(self) -> Option<&'static str> {
        match self {
            ProfileField::FullName => Some("full_name"),
            ProfileField::PhoneNumber => Some("phone_number"),
            ProfileField::Skills => Some("skills"),
            ProfileField::Location => Some("location"),
            ProfileField::Bio => Some("bio"),
            ProfileField::Password => None,
        }
    }

    fn get(self, profile: &UserProfile) -> &str {
        match self {
            ProfileField::FullName => &profile.full_name,
            ProfileField::PhoneNumber => &profile.phone_number,
            ProfileField::Skills => &profile.skills,
            ProfileField::Location => &profile.location,
            ProfileField::Bio => &profile.bio,
            ProfileField::Password => "",
        }
    }

    fn get_mut(self, profile: &mut UserProfile) -> Option<&mut String> {
        match self {
            ProfileField::FullName => Some(&mut profile.full_name),
            ProfileField::PhoneNumber => Some(&mut profile.phone_number),
            ProfileField::Skills => Some(&mut profile.skills),
            ProfileField::Location => Some(&mut profile.location),
            ProfileField::Bio => Some(&mut profile.bio),
            ProfileField::Password => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    #[default]
    Viewing,
    Editing,
}

impl EditMode {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            EditMode::Viewing => EditMode::Editing,
            EditMode::Editing => EditMode::Viewing,
        }
    }
}

/// An avatar image picked for upload.
#[derive(Clone, PartialEq, Eq)]
pub struct AvatarUpload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for AvatarUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AvatarUpload")
            .field("file_name", &self.file_name)
            .field("mime", &self.mime)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// Everything `PUT user/profile` sends in one multipart request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub fields: Vec<(&'static str, String)>,
    pub avatar: Option<AvatarUpload>,
}

/// Working copy of the profile form with its per-field edit toggles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileDraft {
    values: UserProfile,
    saved: UserProfile,
    modes: BTreeMap<ProfileField, EditMode>,
}

impl ProfileDraft {
    #[must_use]
    pub fn from_profile(profile: UserProfile) -> Self {
        let modes = ProfileField::EDITABLE
            .into_iter()
            .chain([ProfileField::Password])
            .map(|field| (field, EditMode::Viewing))
            .collect();
        Self {
            saved: profile.clone(),
            values: profile,
            modes,
        }
    }

    #[must_use]
    pub fn values(&self) -> &UserProfile {
        &self.values
    }

    #[must_use]
    pub fn value(&self, field: ProfileField) -> &str {
        field.get(&self.values)
    }

    #[must_use]
    pub fn mode(&self, field: ProfileField) -> EditMode {
        self.modes.get(&field).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn is_editing(&self, field: ProfileField) -> bool {
        self.mode(field) == EditMode::Editing
    }

    pub fn toggle(&mut self, field: ProfileField) {
        let next = self.mode(field).toggled();
        self.modes.insert(field, next);
    }

    pub fn close(&mut self, field: ProfileField) {
        self.modes.insert(field, EditMode::Viewing);
    }

    /// Update a field's text. Ignored unless that field is being edited.
    pub fn set(&mut self, field: ProfileField, value: impl Into<String>) {
        if !self.is_editing(field) {
            return;
        }
        if let Some(slot) = field.get_mut(&mut self.values) {
            *slot = value.into();
        }
    }

    /// Bundle every text field plus an optional avatar into one update.
    ///
    /// # Errors
    ///
    /// Returns `MissingField` when the full name is blank or a field that
    /// held a value when the profile was loaded has been cleared.
    pub fn validate(&self, avatar: Option<AvatarUpload>) -> Result<ProfileUpdate, ValidationError> {
        if let Some(field) = ProfileField::EDITABLE.into_iter().find(|field| {
            let blank = field.get(&self.values).trim().is_empty();
            let was_set = !field.get(&self.saved).trim().is_empty();
            blank && (*field == ProfileField::FullName || was_set)
        }) {
            return Err(ValidationError::missing(field.label()));
        }
        let fields = ProfileField::EDITABLE
            .into_iter()
            .filter_map(|field| {
                field
                    .form_key()
                    .map(|key| (key, field.get(&self.values).to_owned()))
            })
            .collect();
        Ok(ProfileUpdate { fields, avatar })
    }

    /// Return every text field to view mode after a successful save.
    pub fn mark_saved(&mut self) {
        for field in ProfileField::EDITABLE {
            self.close(field);
        }
    }
}

//
// ─── PASSWORD ──────────────────────────────────────────────────────────────────
//

/// The three password inputs of the profile screen.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct PasswordForm {
    pub current: String,
    pub new: String,
    pub confirm: String,
}

impl std::fmt::Debug for PasswordForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordForm { .. }")
    }
}

/// Body of `POST user/profile/change-password`.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
}

impl std::fmt::Debug for PasswordChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordChange { .. }")
    }
}

impl PasswordForm {
    /// # Errors
    ///
    /// Returns `ValidationError::PasswordMismatch` when the new password and its
    /// confirmation differ, and `MissingField` for blank inputs.
    pub fn validate(&self) -> Result<PasswordChange, ValidationError> {
        if self.new != self.confirm {
            return Err(ValidationError::PasswordMismatch);
        }
        if self.current.is_empty() {
            return Err(ValidationError::missing("Current Password"));
        }
        if self.new.is_empty() {
            return Err(ValidationError::missing("New Password"));
        }
        Ok(PasswordChange {
            current_password: self.current.clone(),
            new_password: self.new.clone(),
        })
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
