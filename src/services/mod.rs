pub use auth::PasswordManager;
pub use content::{ContentService, ServiceResult};
pub use identity::IdentityStore;
pub use memory::MemoryBackend;
pub use postgres::PgBackend;

pub mod auth;
pub mod content;
pub mod identity;
pub mod memory;
pub mod postgres;
