use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::model::ids::UserId;
use crate::model::session::Role;

/// Row of the management accounts listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: UserId,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
}

impl UserAccount {
    /// Parsed role; `None` for labels this client does not know.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        Role::from_label(&self.role)
    }
}

/// Raw input of the create-volunteer / create-admin forms.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RegistrationDraft {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for RegistrationDraft {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationDraft")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Body of `POST auth/register`. `role` is only sent for admin accounts.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub full_name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

impl RegistrationDraft {
    /// # Errors
    ///
    /// Returns `ValidationError::MissingField` for the first blank field.
    pub fn validate(&self, role: Option<Role>) -> Result<Registration, ValidationError> {
        let fields: [(&'static str, &str); 3] = [
            ("Full Name", &self.full_name),
            ("Email", &self.email),
            ("Password", &self.password),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(ValidationError::missing(*name));
        }
        Ok(Registration {
            full_name: self.full_name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            password: self.password.clone(),
            role,
        })
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> RegistrationDraft {
        RegistrationDraft {
            full_name: " Ben Reyes ".into(),
            email: "ben@example.org".into(),
            password: "pw".into(),
        }
    }

    #[test]
    fn volunteer_registration_omits_role() {
        let body = serde_json::to_value(draft().validate(None).unwrap()).unwrap();
        assert_eq!(body["full_name"], "Ben Reyes");
        assert!(body.get("role").is_none());
    }

    #[test]
    fn admin_registration_sends_role() {
        let body = serde_json::to_value(draft().validate(Some(Role::Admin)).unwrap()).unwrap();
        assert_eq!(body["role"], "admin");
    }

    #[test]
    fn blank_fields_are_rejected() {
        let mut form = draft();
        form.email = " ".into();
        assert_eq!(form.validate(None), Err(ValidationError::missing("Email")));
    }

    #[test]
    fn decodes_account_rows() {
        let account: UserAccount =
            serde_json::from_str(r#"{"id":2,"full_name":"Ana","email":"a@b.c","role":"mngt"}"#)
                .unwrap();
        assert_eq!(account.role(), Some(Role::Mngt));
    }
}
