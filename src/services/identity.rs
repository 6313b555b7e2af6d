use async_trait::async_trait;

use std::sync::OnceLock;

use crate::common::IdentityError;
use crate::models::{EntityRef, Principal, UserAccount};
use crate::services::PasswordManager;

/// Persistence for login accounts.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Fails with [`IdentityError::AlreadyExists`] when the email is taken.
    async fn create_account(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<UserAccount, IdentityError>;

    async fn find_account_by_email(&self, email: &str)
    -> Result<Option<UserAccount>, IdentityError>;
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub async fn register(
    store: &dyn IdentityStore,
    email: &str,
    password: &str,
) -> Result<UserAccount, IdentityError> {
    let email = normalize_email(email);

    if store.find_account_by_email(&email).await?.is_some() {
        return Err(IdentityError::AlreadyExists(EntityRef::Account(email)));
    }

    let hash = PasswordManager::hash_password(password)?;
    store.create_account(&email, &hash).await
}

/// Verifies an email/password pair and returns the account's principal.
pub async fn authenticate(
    store: &dyn IdentityStore,
    email: &str,
    password: &str,
) -> Result<Principal, IdentityError> {
    let email = normalize_email(email);

    let Some(account) = store.find_account_by_email(&email).await? else {
        // Same hashing cost as a real check.
        let _ = PasswordManager::verify_password(password, dummy_hash());
        return Err(IdentityError::InvalidCredentials);
    };

    if PasswordManager::verify_password(password, &account.password_hash)? {
        Ok(account.id)
    } else {
        Err(IdentityError::InvalidCredentials)
    }
}

fn dummy_hash() -> &'static str {
    static DUMMY: OnceLock<String> = OnceLock::new();
    DUMMY.get_or_init(|| {
        PasswordManager::hash_password("schoolpress-dummy-password").unwrap_or_default()
    })
}
