//! Data-access layer between pages and the content service.
//!
//! A [`ServiceClient`] is created per request. Until it is connected, reads
//! resolve to empty values and mutations fail with
//! [`ClientError::NotConnected`](crate::common::ClientError::NotConnected).

pub use cache::{Cached, QueryCache, QueryData, QueryKey, Topic};
pub use mutations::Mutation;

mod cache;
mod mutations;
mod queries;

use std::sync::Arc;

use crate::models::{Principal, UserRole};
use crate::services::ContentService;

/// Who is calling, as recovered from the session.
#[derive(Debug, Clone, Default)]
pub struct Caller {
    pub principal: Option<Principal>,
    pub unlock_token: Option<String>,
}

/// Outcome of forwarding the unlock token on connect.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum AccessState {
    /// No identity.
    Anonymous,
    /// Identity present but no unlock token was supplied.
    Unverified,
    Verified(UserRole),
    /// The service refused the unlock token.
    Rejected,
}

struct Connection {
    service: Arc<dyn ContentService>,
    access: AccessState,
}

pub struct ServiceClient {
    cache: Arc<QueryCache>,
    caller: Caller,
    connection: Option<Connection>,
}

impl Caller {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn new(principal: Option<Principal>, unlock_token: Option<String>) -> Self {
        Self {
            principal,
            unlock_token,
        }
    }
}

impl ServiceClient {
    /// A client whose reads are disabled.
    pub fn disconnected(cache: Arc<QueryCache>) -> Self {
        Self {
            cache,
            caller: Caller::anonymous(),
            connection: None,
        }
    }

    /// Connects on behalf of `caller`, forwarding the unlock token when both an
    /// identity and a token are present.
    pub async fn connect(
        service: Arc<dyn ContentService>,
        cache: Arc<QueryCache>,
        caller: Caller,
    ) -> Self {
        let access = match (caller.principal, caller.unlock_token.as_deref()) {
            (None, _) => AccessState::Anonymous,
            (Some(_), None) => AccessState::Unverified,
            (Some(principal), Some(token)) => {
                match service.initialize_access(principal, token).await {
                    Ok(role) => {
                        cache.forget(&[
                            QueryKey::CallerRole(principal),
                            QueryKey::IsAdmin(principal),
                        ]);
                        AccessState::Verified(role)
                    }
                    Err(e) => {
                        log::warn!("Access initialization failed for {}: {}", principal, e);
                        AccessState::Rejected
                    }
                }
            }
        };

        Self {
            cache,
            caller,
            connection: Some(Connection { service, access }),
        }
    }

    pub fn disconnect(&mut self) {
        self.connection = None;
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    pub fn caller(&self) -> &Caller {
        &self.caller
    }

    pub fn principal(&self) -> Option<Principal> {
        self.caller.principal
    }

    pub fn access(&self) -> Option<AccessState> {
        self.connection.as_ref().map(|c| c.access)
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }
}
