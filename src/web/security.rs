use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, SystemTime};

/// Attempts allowed per window for a rate-limited action.
#[derive(Debug, Clone, Copy)]
pub struct Limit {
    pub max_requests: usize,
    pub window: Duration,
}

pub const LOGIN_LIMIT: Limit = Limit {
    max_requests: 5,
    window: Duration::from_secs(300),
};

pub const REGISTER_LIMIT: Limit = Limit {
    max_requests: 3,
    window: Duration::from_secs(3600),
};

pub const UNLOCK_LIMIT: Limit = Limit {
    max_requests: 10,
    window: Duration::from_secs(300),
};

pub const CONTACT_LIMIT: Limit = Limit {
    max_requests: 5,
    window: Duration::from_secs(600),
};

/// Sliding-window request counter keyed by action and client address.
pub struct RateLimiter {
    requests: Mutex<HashMap<String, Vec<SystemTime>>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            requests: Mutex::new(HashMap::new()),
        }
    }

    /// Records an attempt. Returns false once `limit` is exhausted.
    pub fn allow(&self, key: &str, limit: Limit) -> bool {
        let now = SystemTime::now();
        let mut requests = self
            .requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let entry = requests.entry(key.to_string()).or_default();
        entry.retain(|&time| {
            now.duration_since(time).unwrap_or(Duration::ZERO) < limit.window
        });

        if entry.len() >= limit.max_requests {
            return false;
        }

        entry.push(now);
        requests.retain(|_, times| !times.is_empty());

        true
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

pub fn validate_email(email: &str) -> bool {
    let email = email.trim();

    if email.is_empty() || email.len() > 254 {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || local.len() > 64 || domain.is_empty() || domain.contains('@') {
        return false;
    }

    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

pub const MIN_PASSWORD_LEN: usize = 10;

pub fn validate_password(password: &str) -> Result<(), String> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        ));
    }

    let has_letter = password.chars().any(char::is_alphabetic);
    let has_other = password.chars().any(|c| !c.is_alphabetic());
    if !(has_letter && has_other) {
        return Err("Password must mix letters with digits or symbols".to_string());
    }

    Ok(())
}
