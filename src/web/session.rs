//! Signed session cookies.
//!
//! The admin unlock token is a session cookie (no max-age), so it is dropped
//! when the browser closes. The identity cookie lasts a week.

use actix_web::HttpRequest;
use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, CookieJar, Key, SameSite};

use crate::client::Caller;
use crate::models::Principal;

pub const UNLOCK_COOKIE: &str = "sp_admin_token";
pub const IDENTITY_COOKIE: &str = "sp_uid";

pub struct SessionParams<'a> {
    req: &'a HttpRequest,
    key: &'a Key,
    secure: bool,
}

impl<'a> SessionParams<'a> {
    pub fn new(req: &'a HttpRequest, key: &'a Key, secure: bool) -> Self {
        Self { req, key, secure }
    }

    pub fn unlock_token(&self) -> Option<String> {
        self.read(UNLOCK_COOKIE).filter(|token| !token.is_empty())
    }

    pub fn principal(&self) -> Option<Principal> {
        self.read(IDENTITY_COOKIE)?.parse().ok()
    }

    pub fn caller(&self) -> Caller {
        Caller::new(self.principal(), self.unlock_token())
    }

    pub fn store_unlock_token(&self, token: &str) -> Cookie<'static> {
        let cookie = self.build(UNLOCK_COOKIE, token.to_string());
        self.sign(cookie)
    }

    pub fn store_principal(&self, principal: Principal) -> Cookie<'static> {
        let mut cookie = self.build(IDENTITY_COOKIE, principal.to_string());
        cookie.set_max_age(Duration::days(7));
        self.sign(cookie)
    }

    /// Removal cookies for both the unlock token and the identity.
    pub fn clear(&self) -> Vec<Cookie<'static>> {
        [UNLOCK_COOKIE, IDENTITY_COOKIE]
            .into_iter()
            .map(|name| {
                let mut cookie = self.build(name, String::new());
                cookie.make_removal();
                cookie
            })
            .collect()
    }

    fn build(&self, name: &'static str, value: String) -> Cookie<'static> {
        Cookie::build(name, value)
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .finish()
    }

    fn sign(&self, cookie: Cookie<'static>) -> Cookie<'static> {
        let name = cookie.name().to_string();
        let mut jar = CookieJar::new();
        jar.signed_mut(self.key).add(cookie.clone());
        jar.get(&name).cloned().unwrap_or(cookie)
    }

    fn read(&self, name: &str) -> Option<String> {
        let cookie = self.req.cookie(name)?;
        let mut jar = CookieJar::new();
        jar.add_original(cookie);
        jar.signed(self.key)
            .get(name)
            .map(|verified| verified.value().to_string())
    }
}
