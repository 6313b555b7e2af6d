use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use std::fmt;

/// Stable identity of an authenticated caller.
#[derive(
    Debug,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Hash,
    Ord,
    PartialOrd,
    Serialize,
    Deserialize,
    sqlx::Type,
)]
#[sqlx(transparent)]
#[serde(transparent)]
pub struct Principal(pub Uuid);

#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize, FromRow)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
}

#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Hash,
    Serialize,
    Deserialize,
    sqlx::Type,
)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    User,
    #[default]
    Guest,
}

/// Login record for an identity.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, FromRow)]
pub struct UserAccount {
    pub id: Principal,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Identifies the entity an error refers to.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum EntityRef {
    ContentBlock(String),
    Staff(i64),
    Notice(i64),
    Gallery(i64),
    ContactSubmission(i64),
    Profile(Principal),
    Account(String),
}

impl Principal {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for Principal {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Principal {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

impl From<Uuid> for Principal {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
            Self::Guest => "guest",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl PartialEq<&str> for UserRole {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            "guest" => Ok(Self::Guest),
            _ => Err(format!("invalid user role: {}", s)),
        }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityRef::ContentBlock(key) => write!(f, "content block '{}'", key),
            EntityRef::Staff(id) => write!(f, "staff member ID {}", id),
            EntityRef::Notice(id) => write!(f, "notice ID {}", id),
            EntityRef::Gallery(id) => write!(f, "gallery item ID {}", id),
            EntityRef::ContactSubmission(id) => {
                write!(f, "contact submission ID {}", id)
            }
            EntityRef::Profile(principal) => {
                write!(f, "profile of {}", principal)
            }
            EntityRef::Account(email) => write!(f, "account '{}'", email),
        }
    }
}
