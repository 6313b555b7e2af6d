use thiserror::Error;

use crate::models::EntityRef;

#[derive(Error, Debug)]
pub enum GeneralError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures reported by a content service backend.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{0} not found")]
    NotFound(EntityRef),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Admin access could not be verified with the supplied secret")]
    InvalidSecret,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Content service is not connected")]
    NotConnected,

    #[error(transparent)]
    Service(#[from] ServiceError),
}

#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("{0} already exists")]
    AlreadyExists(EntityRef),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Error, Debug)]
pub enum PanelError {
    #[error("Please fill in all required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Nothing is selected for this action")]
    InvalidState,

    #[error(transparent)]
    Client(#[from] ClientError),
}

impl ServiceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Service(e) if e.is_not_found())
    }
}

impl From<argon2::password_hash::Error> for IdentityError {
    fn from(err: argon2::password_hash::Error) -> Self {
        Self::Hashing(err.to_string())
    }
}
