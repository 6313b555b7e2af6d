use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};

use crate::admin::{AdminGate, PanelState};
use crate::client::ServiceClient;
use crate::models::{
    ContactSubmission, GalleryItem, KeyedContentBlock, Notice, Principal, StaffMember,
    UserProfile, UserRole,
};
use crate::web::forms::{AdminQuery, ProfileForm, RoleForm, UnlockForm};
use crate::web::handlers::panels::{Flash, PanelPage};
use crate::web::helpers::{client_ip, redirect, render, render_with_status, require_admin, with_query};
use crate::web::security::{UNLOCK_LIMIT, validate_email};
use crate::web::state::AppState;
use crate::web::templates::{
    AdminChrome, AdminDeniedTemplate, AdminLoginTemplate, AdminProfileTemplate,
    AdminUnlockTemplate, Shell,
};

const ASSIGNABLE_ROLES: &[&str] = &["admin", "user", "guest"];

async fn show_panel<E: PanelPage>(
    state: &AppState,
    client: &ServiceClient,
    flash: Flash,
) -> HttpResponse {
    E::render(state, client, &PanelState::<E>::Viewing, flash, StatusCode::OK).await
}

/// Gate plus dashboard. Each gate step renders its own prompt.
#[get("/admin")]
pub async fn dashboard(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<AdminQuery>,
) -> impl Responder {
    let shell = Shell::new(&state.config, "/admin");
    let client = state.client_for(&req).await;

    let principal = match AdminGate::evaluate(&client).await {
        AdminGate::PasswordRequired => {
            return render(AdminUnlockTemplate {
                shell,
                error: query.error.clone(),
            });
        }
        AdminGate::LoginRequired => {
            return render(AdminLoginTemplate { shell, error: None });
        }
        AdminGate::Denied(reason) => {
            return render_with_status(
                AdminDeniedTemplate {
                    shell,
                    message: reason.message(),
                    principal: client.principal().map(|p| p.to_string()).unwrap_or_default(),
                },
                HttpResponse::Forbidden(),
            );
        }
        AdminGate::Granted(principal) => principal,
    };

    let query = query.into_inner();
    let flash = Flash {
        status: query.status,
        error: None,
    };

    match query.tab.as_deref().unwrap_or("content") {
        "staff" => show_panel::<StaffMember>(&state, &client, flash).await,
        "notices" => show_panel::<Notice>(&state, &client, flash).await,
        "gallery" => show_panel::<GalleryItem>(&state, &client, flash).await,
        "inquiries" => show_panel::<ContactSubmission>(&state, &client, flash).await,
        "profile" => {
            profile_page(&state, &client, principal, flash.status, query.error, query.user).await
        }
        _ => show_panel::<KeyedContentBlock>(&state, &client, flash).await,
    }
}

async fn profile_page(
    state: &AppState,
    client: &ServiceClient,
    principal: Principal,
    status: Option<String>,
    error: Option<String>,
    lookup_user: Option<String>,
) -> HttpResponse {
    let (profile, role) = futures_util::join!(client.caller_profile(), client.caller_role());
    let profile = profile.ok().flatten().unwrap_or_default();
    let role = role.unwrap_or_default();

    let lookup_user = lookup_user.map(|u| u.trim().to_string()).unwrap_or_default();
    let (lookup, lookup_message) = if lookup_user.is_empty() {
        (None, None)
    } else {
        match lookup_user.parse::<Principal>() {
            Ok(user) => match client.user_profile(user).await {
                Ok(Some(found)) => (Some(found), None),
                Ok(None) => (None, Some("No profile saved for that user".to_string())),
                Err(e) => {
                    log::warn!("Profile lookup for {} failed: {}", user, e);
                    (None, Some("Failed to load profile".to_string()))
                }
            },
            Err(_) => (None, Some("Not a valid user id".to_string())),
        }
    };

    render(AdminProfileTemplate {
        shell: Shell::new(&state.config, "/admin"),
        chrome: AdminChrome::new("profile", status),
        profile,
        principal: principal.to_string(),
        role: role.to_string(),
        error,
        lookup_user,
        lookup,
        lookup_message,
        roles: ASSIGNABLE_ROLES,
    })
}

/// Stores the admin password for this browser session.
#[post("/admin/unlock")]
pub async fn unlock(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<UnlockForm>,
) -> impl Responder {
    let ip = client_ip(&req);
    if !state.rate_limiter.allow(&format!("unlock:{}", ip), UNLOCK_LIMIT) {
        log::warn!("Unlock rate limit hit for {}", ip);
        return redirect(
            &req,
            &with_query("/admin", "error", "Too many attempts. Please try again later."),
        );
    }

    let token = form.token.trim();
    if token.is_empty() {
        return redirect(
            &req,
            &with_query("/admin", "error", "Please enter the admin password"),
        );
    }

    let cookie = state.session(&req).store_unlock_token(token);
    let mut res = redirect(&req, "/admin");
    if let Err(e) = res.add_cookie(&cookie) {
        log::error!("Failed to set unlock cookie: {}", e);
    }
    res
}

#[post("/admin/profile")]
pub async fn save_profile(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<ProfileForm>,
) -> impl Responder {
    let client = match require_admin(&state, &req).await {
        Ok(client) => client,
        Err(res) => return res,
    };

    let profile = UserProfile::from(form.into_inner());
    if !profile.email.is_empty() && !validate_email(&profile.email) {
        return redirect(
            &req,
            &with_query("/admin?tab=profile", "error", "Please enter a valid email address"),
        );
    }

    match client.save_caller_profile(&profile).await {
        Ok(()) => redirect(&req, &with_query("/admin?tab=profile", "status", "Profile saved")),
        Err(_) => redirect(
            &req,
            &with_query("/admin?tab=profile", "error", "Failed to save profile"),
        ),
    }
}

#[post("/admin/roles")]
pub async fn assign_role(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<RoleForm>,
) -> impl Responder {
    let client = match require_admin(&state, &req).await {
        Ok(client) => client,
        Err(res) => return res,
    };

    let (Ok(user), Ok(role)) = (
        form.principal.trim().parse::<Principal>(),
        form.role.parse::<UserRole>(),
    ) else {
        return redirect(
            &req,
            &with_query("/admin?tab=profile", "error", "Enter a valid user id and role"),
        );
    };

    match client.assign_role(user, role).await {
        Ok(()) => {
            log::info!("Assigned role {} to {}", role, user);
            redirect(&req, &with_query("/admin?tab=profile", "status", "Role updated"))
        }
        Err(_) => redirect(
            &req,
            &with_query("/admin?tab=profile", "error", "Failed to assign role"),
        ),
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(dashboard)
        .service(unlock)
        .service(save_profile)
        .service(assign_role);
}
