use std::env;

use crate::common::GeneralError;

/// Runtime settings read from the environment (and `.env` via dotenvy).
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub bind_addr: String,
    /// In-memory store when unset.
    pub database_url: Option<String>,
    pub admin_secret: Option<String>,
    pub static_dir: String,
    pub school_name: String,
    pub secure_cookies: bool,
    /// At least 64 bytes; a random key is generated when unset.
    pub session_key: Option<String>,
}

pub const MIN_SESSION_KEY_LEN: usize = 64;

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            database_url: None,
            admin_secret: None,
            static_dir: "./static".to_string(),
            school_name: "Government School".to_string(),
            secure_cookies: false,
            session_key: None,
        }
    }
}

fn var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl SiteConfig {
    pub fn from_env() -> Result<Self, GeneralError> {
        let defaults = Self::default();

        let secure_cookies = match var("SECURE_COOKIES") {
            Some(v) => parse_flag(&v).ok_or_else(|| {
                GeneralError::Config(format!("SECURE_COOKIES must be true or false, got '{}'", v))
            })?,
            None => defaults.secure_cookies,
        };

        let session_key = var("SESSION_KEY");
        if session_key
            .as_ref()
            .is_some_and(|k| k.len() < MIN_SESSION_KEY_LEN)
        {
            return Err(GeneralError::Config(format!(
                "SESSION_KEY must be at least {} bytes",
                MIN_SESSION_KEY_LEN
            )));
        }

        Ok(Self {
            bind_addr: var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            database_url: var("DATABASE_URL"),
            admin_secret: var("ADMIN_SECRET"),
            static_dir: var("STATIC_DIR").unwrap_or(defaults.static_dir),
            school_name: var("SCHOOL_NAME").unwrap_or(defaults.school_name),
            secure_cookies,
            session_key,
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
