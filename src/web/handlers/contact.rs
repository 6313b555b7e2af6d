use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};

use crate::models::{ContactDraft, RequiredFields};
use crate::pages::{self, ResolvedBlock, load_slot};
use crate::web::forms::{ContactForm, ContactQuery};
use crate::web::helpers::{client_ip, redirect, render, render_with_status};
use crate::web::security::{CONTACT_LIMIT, validate_email};
use crate::web::state::AppState;
use crate::web::templates::{ContactTemplate, Shell};

const SUBMIT_FAILED: &str = "Failed to submit your message. Please try again later.";

async fn contact_details(state: &AppState) -> ResolvedBlock {
    let client = state.public_client().await;
    match load_slot(&client, pages::CONTACT_DETAILS).await {
        Some(block) => block,
        None => ResolvedBlock {
            key: pages::CONTACT_DETAILS.key.to_string(),
            title: String::new(),
            content: String::new(),
            steps: Vec::new(),
            stored: false,
        },
    }
}

async fn contact_page(
    state: &AppState,
    form: ContactDraft,
    submitted: bool,
    error: Option<String>,
) -> ContactTemplate {
    ContactTemplate {
        shell: Shell::new(&state.config, "/contact"),
        details: contact_details(state).await,
        form,
        submitted,
        error,
    }
}

#[get("/contact")]
pub async fn contact_form(
    state: web::Data<AppState>,
    query: web::Query<ContactQuery>,
) -> impl Responder {
    let submitted = query.sent.is_some();
    render(contact_page(&state, ContactDraft::default(), submitted, None).await)
}

#[post("/contact")]
pub async fn contact_submit(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<ContactForm>,
) -> HttpResponse {
    let draft = ContactDraft::from(form.into_inner());

    if !draft.is_complete() {
        let error = "Please fill in all required fields".to_string();
        let page = contact_page(&state, draft, false, Some(error)).await;
        return render_with_status(page, HttpResponse::UnprocessableEntity());
    }

    if !validate_email(&draft.email) {
        let error = "Please enter a valid email address".to_string();
        let page = contact_page(&state, draft, false, Some(error)).await;
        return render_with_status(page, HttpResponse::UnprocessableEntity());
    }

    let ip = client_ip(&req);
    if !state.rate_limiter.allow(&format!("contact:{}", ip), CONTACT_LIMIT) {
        log::warn!("Contact form rate limit hit for {}", ip);
        let error = "Too many messages sent. Please try again later.".to_string();
        let page = contact_page(&state, draft, false, Some(error)).await;
        return render_with_status(page, HttpResponse::TooManyRequests());
    }

    let client = state.client_for(&req).await;
    match client.submit_contact_form(&draft).await {
        Ok(id) => {
            log::info!("Contact submission {} received", id);
            redirect(&req, "/contact?sent=1")
        }
        Err(_) => {
            let page = contact_page(&state, draft, false, Some(SUBMIT_FAILED.to_string())).await;
            render_with_status(page, HttpResponse::InternalServerError())
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(contact_form).service(contact_submit);
}
