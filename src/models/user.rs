use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StoreError;
use crate::store::Entity;

const REQUIRED_FIELDS: &str = "Name, Email, and Role are required";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Instructor,
    Student,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Instructor => "instructor",
            UserRole::Student => "student",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Blocked,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Blocked => "blocked",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub status: UserStatus,
}

impl User {
    fn validate(&self) -> Result<(), StoreError> {
        if self.name.trim().is_empty() || self.email.trim().is_empty() {
            return Err(StoreError::Validation(REQUIRED_FIELDS.to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewUserRequest {
    pub name: String,
    pub email: String,
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
}

impl Entity for User {
    type Draft = NewUserRequest;
    type Patch = UpdateUserRequest;

    const KEY: &'static str = "users";
    const KIND: &'static str = "user";

    fn id(&self) -> &str {
        &self.id
    }

    fn build(draft: NewUserRequest) -> Result<Self, StoreError> {
        let Some(role) = draft.role else {
            return Err(StoreError::Validation(REQUIRED_FIELDS.to_string()));
        };

        let user = User {
            id: Uuid::new_v4().to_string(),
            name: draft.name,
            email: draft.email,
            role,
            status: draft.status.unwrap_or(UserStatus::Active),
        };
        user.validate()?;
        Ok(user)
    }

    fn merge(&self, patch: UpdateUserRequest) -> Result<Self, StoreError> {
        let mut merged = self.clone();
        if let Some(name) = patch.name {
            merged.name = name;
        }
        if let Some(email) = patch.email {
            merged.email = email;
        }
        if let Some(role) = patch.role {
            merged.role = role;
        }
        if let Some(status) = patch.status {
            merged.status = status;
        }
        merged.validate()?;
        Ok(merged)
    }

    fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query)
            || self.email.to_lowercase().contains(&query)
            || self.role.as_str().contains(&query)
    }

    fn seed() -> Vec<Self> {
        vec![
            User {
                id: "u1".to_string(),
                name: "Alice Johnson".to_string(),
                email: "alice@example.com".to_string(),
                role: UserRole::Student,
                status: UserStatus::Active,
            },
            User {
                id: "u2".to_string(),
                name: "Bob Williams".to_string(),
                email: "bob@example.com".to_string(),
                role: UserRole::Instructor,
                status: UserStatus::Active,
            },
            User {
                id: "u3".to_string(),
                name: "Charlie Brown".to_string(),
                email: "charlie@example.com".to_string(),
                role: UserRole::Student,
                status: UserStatus::Blocked,
            },
        ]
    }
}
