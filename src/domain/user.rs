//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{ROLE_ADMIN, ROLE_NURSE, ROLE_PATIENT};

/// User roles enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Nurse,
    Patient,
}

impl UserRole {
    /// Staff members (admins and nurses) must carry a staff id
    pub fn is_staff(&self) -> bool {
        matches!(self, UserRole::Admin | UserRole::Nurse)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => ROLE_ADMIN,
            UserRole::Nurse => ROLE_NURSE,
            UserRole::Patient => ROLE_PATIENT,
        }
    }
}

/// Unknown stored values get the least privileged role.
impl From<&str> for UserRole {
    fn from(s: &str) -> Self {
        match s {
            ROLE_ADMIN => UserRole::Admin,
            ROLE_NURSE => UserRole::Nurse,
            _ => UserRole::Patient,
        }
    }
}

impl From<UserRole> for String {
    fn from(role: UserRole) -> Self {
        role.as_str().to_string()
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub staff_id: Option<String>,
    pub gender: Option<String>,
    /// National identity card number
    pub ic_number: Option<String>,
    pub contact_number: Option<String>,
    pub address: Option<String>,
    pub blood_type: Option<String>,
    pub emergency_contact: Option<String>,
    pub relation: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_patient(&self) -> bool {
        self.role == UserRole::Patient
    }

    pub fn is_nurse(&self) -> bool {
        self.role == UserRole::Nurse
    }
}

/// User creation input
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: Option<UserRole>,
    pub staff_id: Option<String>,
    pub gender: Option<String>,
    pub ic_number: Option<String>,
    pub contact_number: Option<String>,
    pub address: Option<String>,
    pub blood_type: Option<String>,
    pub emergency_contact: Option<String>,
    pub relation: Option<String>,
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    #[schema(example = "Siti Aminah")]
    pub name: String,
    #[schema(example = "siti@example.com")]
    pub email: String,
    #[schema(example = "nurse")]
    pub role: UserRole,
    pub staff_id: Option<String>,
    pub gender: Option<String>,
    pub ic_number: Option<String>,
    pub contact_number: Option<String>,
    pub address: Option<String>,
    pub blood_type: Option<String>,
    pub emergency_contact: Option<String>,
    pub relation: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            staff_id: user.staff_id,
            gender: user.gender,
            ic_number: user.ic_number,
            contact_number: user.contact_number,
            address: user.address,
            blood_type: user.blood_type,
            emergency_contact: user.emergency_contact,
            relation: user.relation,
            created_at: user.created_at,
        }
    }
}

/// Compact patient row used by the bed assignment pickers
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PatientSummary {
    pub id: Uuid,
    #[schema(example = "Ahmad Faiz")]
    pub name: String,
    pub email: String,
    pub ic_number: Option<String>,
    pub contact_number: Option<String>,
    pub gender: Option<String>,
    pub blood_type: Option<String>,
}

impl From<User> for PatientSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            ic_number: user.ic_number,
            contact_number: user.contact_number,
            gender: user.gender,
            blood_type: user.blood_type,
        }
    }
}
