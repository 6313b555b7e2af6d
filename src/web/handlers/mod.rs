pub mod admin;
pub mod auth;
pub mod contact;
pub mod panels;
pub mod public;

use actix_web::web;

/// Registers every route except the not-found fallback, which `main` installs
/// as the default service.
pub fn configure(cfg: &mut web::ServiceConfig) {
    public::configure(cfg);
    contact::configure(cfg);
    auth::configure(cfg);
    admin::configure(cfg);
    panels::configure(cfg);
}
