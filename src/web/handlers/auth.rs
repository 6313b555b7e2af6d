use actix_web::{HttpRequest, Responder, get, post, web};

use crate::common::IdentityError;
use crate::services::identity;
use crate::web::forms::{AuthQuery, LoginForm, RegisterForm};
use crate::web::helpers::{client_ip, redirect, render};
use crate::web::security::{LOGIN_LIMIT, REGISTER_LIMIT, validate_email, validate_password};
use crate::web::state::AppState;
use crate::web::templates::{AdminLoginTemplate, AdminRegisterTemplate, Shell};

fn error_message(code: &str) -> String {
    match code {
        "missing" => "Email and password are required".to_string(),
        "invalid" => "Invalid email or password".to_string(),
        "email" => "Please enter a valid email address".to_string(),
        "mismatch" => "Passwords do not match".to_string(),
        "exists" => "An account with this email already exists".to_string(),
        "rate_limit" => "Too many attempts. Please try again later.".to_string(),
        "internal" => "An internal error occurred. Please try again.".to_string(),
        other => other.to_string(),
    }
}

#[get("/admin/login")]
pub async fn login_form(
    state: web::Data<AppState>,
    query: web::Query<AuthQuery>,
) -> impl Responder {
    render(AdminLoginTemplate {
        shell: Shell::new(&state.config, "/admin"),
        error: query.error.as_deref().map(error_message),
    })
}

#[post("/admin/login")]
pub async fn login_submit(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<LoginForm>,
) -> impl Responder {
    let ip = client_ip(&req);
    if !state.rate_limiter.allow(&format!("login:{}", ip), LOGIN_LIMIT) {
        log::warn!("Login rate limit hit for {}", ip);
        return redirect(&req, "/admin/login?error=rate_limit");
    }

    if form.email.trim().is_empty() || form.password.is_empty() {
        return redirect(&req, "/admin/login?error=missing");
    }

    match identity::authenticate(state.identity.as_ref(), &form.email, &form.password).await {
        Ok(principal) => {
            log::info!("Signed in {}", principal);
            let cookie = state.session(&req).store_principal(principal);
            let mut res = redirect(&req, "/admin");
            if let Err(e) = res.add_cookie(&cookie) {
                log::error!("Failed to set identity cookie: {}", e);
            }
            res
        }
        Err(IdentityError::InvalidCredentials) => {
            redirect(&req, "/admin/login?error=invalid")
        }
        Err(e) => {
            log::error!("Login failed: {}", e);
            redirect(&req, "/admin/login?error=internal")
        }
    }
}

#[get("/admin/register")]
pub async fn register_form(
    state: web::Data<AppState>,
    query: web::Query<AuthQuery>,
) -> impl Responder {
    render(AdminRegisterTemplate {
        shell: Shell::new(&state.config, "/admin"),
        error: query.error.as_deref().map(error_message),
    })
}

#[post("/admin/register")]
pub async fn register_submit(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<RegisterForm>,
) -> impl Responder {
    if form.email.trim().is_empty() || form.password.is_empty() {
        return redirect(&req, "/admin/register?error=missing");
    }
    if !validate_email(&form.email) {
        return redirect(&req, "/admin/register?error=email");
    }
    if let Err(message) = validate_password(&form.password) {
        let location = format!("/admin/register?error={}", urlencoding::encode(&message));
        return redirect(&req, &location);
    }
    if form.password != form.confirm_password {
        return redirect(&req, "/admin/register?error=mismatch");
    }

    let ip = client_ip(&req);
    if !state.rate_limiter.allow(&format!("register:{}", ip), REGISTER_LIMIT) {
        log::warn!("Registration rate limit hit for {}", ip);
        return redirect(&req, "/admin/register?error=rate_limit");
    }

    match identity::register(state.identity.as_ref(), &form.email, &form.password).await {
        Ok(account) => {
            log::info!("Registered account {}", account.id);
            let cookie = state.session(&req).store_principal(account.id);
            let mut res = redirect(&req, "/admin");
            if let Err(e) = res.add_cookie(&cookie) {
                log::error!("Failed to set identity cookie: {}", e);
            }
            res
        }
        Err(IdentityError::AlreadyExists(_)) => redirect(&req, "/admin/register?error=exists"),
        Err(e) => {
            log::error!("Registration failed: {}", e);
            redirect(&req, "/admin/register?error=internal")
        }
    }
}

/// Drops both the unlock token and the identity.
#[post("/admin/logout")]
pub async fn logout(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let mut res = redirect(&req, "/admin");
    for cookie in state.session(&req).clear() {
        if let Err(e) = res.add_cookie(&cookie) {
            log::error!("Failed to clear session cookie: {}", e);
        }
    }
    res
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(login_form)
        .service(login_submit)
        .service(register_form)
        .service(register_submit)
        .service(logout);
}
