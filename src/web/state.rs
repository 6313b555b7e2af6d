use actix_web::HttpRequest;
use actix_web::cookie::Key;

use std::sync::Arc;

use crate::client::{QueryCache, ServiceClient};
use crate::common::GeneralError;
use crate::config::SiteConfig;
use crate::db::Database;
use crate::services::{ContentService, IdentityStore, MemoryBackend, PgBackend};
use crate::web::security::RateLimiter;
use crate::web::session::SessionParams;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<dyn ContentService>,
    pub identity: Arc<dyn IdentityStore>,
    pub cache: Arc<QueryCache>,
    pub rate_limiter: Arc<RateLimiter>,
    pub config: Arc<SiteConfig>,
    pub cookie_key: Key,
}

impl AppState {
    /// Connects to PostgreSQL when `DATABASE_URL` is set, otherwise keeps
    /// everything in memory.
    pub async fn from_config(config: SiteConfig) -> Result<Self, GeneralError> {
        match config.database_url.clone() {
            Some(url) => {
                let db = Database::new(&url).await?;
                log::info!("Connected to PostgreSQL and applied migrations");
                let backend = Arc::new(PgBackend::new(db.pool, config.admin_secret.clone()));
                Ok(Self::with_backends(config, backend.clone(), backend))
            }
            None => {
                log::warn!("DATABASE_URL is not set; content is kept in memory and lost on restart");
                Ok(Self::in_memory(config))
            }
        }
    }

    pub fn in_memory(config: SiteConfig) -> Self {
        let backend = Arc::new(MemoryBackend::new(config.admin_secret.clone()));
        Self::with_backends(config, backend.clone(), backend)
    }

    pub fn with_backends(
        config: SiteConfig,
        service: Arc<dyn ContentService>,
        identity: Arc<dyn IdentityStore>,
    ) -> Self {
        if config.admin_secret.is_none() {
            log::warn!("ADMIN_SECRET is not set; no caller can be granted admin access");
        }

        let cookie_key = match config.session_key.as_deref() {
            Some(secret) => Key::derive_from(secret.as_bytes()),
            None => Key::generate(),
        };

        Self {
            service,
            identity,
            cache: Arc::new(QueryCache::new()),
            rate_limiter: Arc::new(RateLimiter::new()),
            config: Arc::new(config),
            cookie_key,
        }
    }

    pub fn session<'a>(&'a self, req: &'a HttpRequest) -> SessionParams<'a> {
        SessionParams::new(req, &self.cookie_key, self.config.secure_cookies)
    }

    /// A client connected on behalf of the request's caller.
    pub async fn client_for(&self, req: &HttpRequest) -> ServiceClient {
        let caller = self.session(req).caller();
        ServiceClient::connect(self.service.clone(), self.cache.clone(), caller).await
    }

    /// A client that only performs public reads.
    pub async fn public_client(&self) -> ServiceClient {
        ServiceClient::connect(self.service.clone(), self.cache.clone(), Default::default()).await
    }
}
