//! Admin users: accounts that can sign in to the back office.

use serde::{Deserialize, Serialize};

use super::{Draft, Entity, EntityId, Unsortable, text};
use crate::lookup::Lookups;
use crate::validation::{self, FieldError, ValidationErrors};

pub const ROLES: &[&str] = &["admin", "manager", "user"];
pub const STATUSES: &[&str] = &["active", "suspended", "pending"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: EntityId,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub status: String,
}

impl Entity for User {
    type Draft = UserDraft;
    type SortKey = Unsortable;

    const RESOURCE: &'static str = "users";
    const NOUN: &'static str = "user";
    const PLURAL: &'static str = "users";
    const COLUMNS: &'static [&'static str] = &["ID", "Username", "Email", "Role", "Status"];

    fn id(&self) -> EntityId {
        self.user_id
    }

    fn label(&self) -> &str {
        &self.username
    }

    fn search_fields<'a>(&'a self, _lookups: &'a Lookups) -> Vec<Option<&'a str>> {
        vec![Some(self.username.as_str()), Some(self.email.as_str())]
    }

    fn cells(&self, _lookups: &Lookups) -> Vec<String> {
        vec![
            self.user_id.to_string(),
            self.username.clone(),
            self.email.clone(),
            self.role.clone(),
            self.status.clone(),
        ]
    }

    fn to_draft(&self) -> UserDraft {
        UserDraft {
            username: self.username.clone(),
            email: self.email.clone(),
            role: self.role.clone(),
            status: self.status.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserDraft {
    pub username: String,
    pub email: String,
    pub role: String,
    pub status: String,
}

impl Default for UserDraft {
    fn default() -> Self {
        Self {
            username: String::new(),
            email: String::new(),
            role: "user".to_string(),
            status: "active".to_string(),
        }
    }
}

impl Draft for UserDraft {
    type Payload = UserDraft;

    const FIELDS: &'static [&'static str] = &["username", "email", "role", "status"];

    fn set_field(&mut self, field: &str, value: &str) -> Result<(), FieldError> {
        let slot = match field {
            "username" => &mut self.username,
            "email" => &mut self.email,
            "role" => &mut self.role,
            "status" => &mut self.status,
            _ => return Err(FieldError::Unknown(field.to_string())),
        };
        *slot = value.to_string();
        Ok(())
    }

    fn field(&self, field: &str) -> Option<String> {
        match field {
            "username" => text(&self.username),
            "email" => text(&self.email),
            "role" => text(&self.role),
            "status" => text(&self.status),
            _ => None,
        }
    }

    fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.require(&self.username, "Username is required");
        if validation::is_blank(&self.email) {
            errors.push("Email is required");
        } else if !validation::looks_like_email(&self.email) {
            errors.push("Email must be a valid address");
        }
        errors.one_of(&self.role, ROLES, "Role must be one of admin, manager, user");
        errors.one_of(&self.status, STATUSES, "Status must be one of active, suspended, pending");
        errors
    }

    fn payload(&self) -> Result<UserDraft, ValidationErrors> {
        self.validate().into_result()?;
        Ok(UserDraft {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            role: self.role.trim().to_string(),
            status: self.status.trim().to_string(),
        })
    }
}

#[cfg(test)]
#[path = "user_test.rs"]
mod tests;
