//! CRUD routes shared by every dashboard panel.
//!
//! Each request rebuilds a [`PanelState`] from its path and form, runs at most
//! one transition against the service, then either redirects back to the
//! dashboard tab or re-renders the panel with the draft intact.

#![allow(async_fn_in_trait)]

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Scope, web};
use serde::de::DeserializeOwned;

use crate::admin::{Editable, Managed, PanelState};
use crate::client::ServiceClient;
use crate::common::PanelError;
use crate::models::{
    ContactSubmission, ContentBlockDraft, GalleryDraft, GalleryItem, KeyedContentBlock, Notice,
    NoticeDraft, StaffDraft, StaffMember,
};
use crate::web::forms::{ContentBlockForm, GalleryForm, NoticeForm, StaffForm};
use crate::web::helpers::{redirect, render_with_status, require_admin, with_query};
use crate::web::state::AppState;
use crate::web::templates::{
    AdminChrome, AdminContentBlocksTemplate, AdminGalleryTemplate, AdminInquiriesTemplate,
    AdminNoticesTemplate, AdminStaffTemplate, ContentBlockRow, InquiryRow, NoticeRow, PanelView,
    StaffRow,
    Shell,
};

/// Messages shown above a panel.
#[derive(Debug, Default)]
pub struct Flash {
    pub status: Option<String>,
    pub error: Option<String>,
}

impl Flash {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: None,
            error: Some(message.into()),
        }
    }
}

/// A panel that can be rendered as a dashboard tab.
pub trait PanelPage: Managed + 'static {
    /// Tab name and URL segment, e.g. `notices`.
    const SLUG: &'static str;

    async fn render(
        state: &AppState,
        client: &ServiceClient,
        panel: &PanelState<Self>,
        flash: Flash,
        code: StatusCode,
    ) -> HttpResponse;
}

/// A panel with create and edit forms.
pub trait EditablePage: PanelPage + Editable {
    type Form: DeserializeOwned + Into<Self::Draft> + 'static;

    /// Adjusts a submitted draft before an update of `id`.
    fn prepare_update(_id: &Self::Id, _draft: &mut Self::Draft) {}
}

async fn list_or_empty<E: Managed>(client: &ServiceClient) -> Vec<E> {
    E::list(client).await.unwrap_or_else(|e| {
        log::warn!("Could not list {} entries: {}", E::NOUN, e);
        Vec::new()
    })
}

fn chrome<E: PanelPage>(flash: &Flash) -> AdminChrome {
    AdminChrome::new(E::SLUG, flash.status.clone())
}

impl PanelPage for KeyedContentBlock {
    const SLUG: &'static str = "content";

    async fn render(
        state: &AppState,
        client: &ServiceClient,
        panel: &PanelState<Self>,
        flash: Flash,
        code: StatusCode,
    ) -> HttpResponse {
        let rows = list_or_empty::<Self>(client).await;
        let template = AdminContentBlocksTemplate {
            shell: Shell::new(&state.config, "/admin"),
            chrome: chrome::<Self>(&flash),
            rows: rows.into_iter().map(ContentBlockRow::from).collect(),
            panel: PanelView::from_state(Self::SLUG, panel, flash.error),
        };
        render_with_status(template, HttpResponse::build(code))
    }
}

impl EditablePage for KeyedContentBlock {
    type Form = ContentBlockForm;

    fn prepare_update(id: &String, draft: &mut ContentBlockDraft) {
        draft.key = id.clone();
    }
}

impl PanelPage for StaffMember {
    const SLUG: &'static str = "staff";

    async fn render(
        state: &AppState,
        client: &ServiceClient,
        panel: &PanelState<Self>,
        flash: Flash,
        code: StatusCode,
    ) -> HttpResponse {
        let template = AdminStaffTemplate {
            shell: Shell::new(&state.config, "/admin"),
            chrome: chrome::<Self>(&flash),
            rows: list_or_empty::<Self>(client)
                .await
                .iter()
                .map(StaffRow::from)
                .collect(),
            panel: PanelView::<StaffDraft>::from_state(Self::SLUG, panel, flash.error),
        };
        render_with_status(template, HttpResponse::build(code))
    }
}

impl EditablePage for StaffMember {
    type Form = StaffForm;
}

impl PanelPage for Notice {
    const SLUG: &'static str = "notices";

    async fn render(
        state: &AppState,
        client: &ServiceClient,
        panel: &PanelState<Self>,
        flash: Flash,
        code: StatusCode,
    ) -> HttpResponse {
        let notices = list_or_empty::<Self>(client).await;
        let template = AdminNoticesTemplate {
            shell: Shell::new(&state.config, "/admin"),
            chrome: chrome::<Self>(&flash),
            rows: notices.iter().map(NoticeRow::admin).collect(),
            panel: PanelView::<NoticeDraft>::from_state(Self::SLUG, panel, flash.error),
        };
        render_with_status(template, HttpResponse::build(code))
    }
}

impl EditablePage for Notice {
    type Form = NoticeForm;
}

impl PanelPage for GalleryItem {
    const SLUG: &'static str = "gallery";

    async fn render(
        state: &AppState,
        client: &ServiceClient,
        panel: &PanelState<Self>,
        flash: Flash,
        code: StatusCode,
    ) -> HttpResponse {
        let template = AdminGalleryTemplate {
            shell: Shell::new(&state.config, "/admin"),
            chrome: chrome::<Self>(&flash),
            items: list_or_empty::<Self>(client).await,
            panel: PanelView::<GalleryDraft>::from_state(Self::SLUG, panel, flash.error),
        };
        render_with_status(template, HttpResponse::build(code))
    }
}

impl EditablePage for GalleryItem {
    type Form = GalleryForm;
}

impl PanelPage for ContactSubmission {
    const SLUG: &'static str = "inquiries";

    async fn render(
        state: &AppState,
        client: &ServiceClient,
        panel: &PanelState<Self>,
        flash: Flash,
        code: StatusCode,
    ) -> HttpResponse {
        let submissions = list_or_empty::<Self>(client).await;
        let inspecting = match panel {
            PanelState::Inspecting(submission) => Some(submission.clone()),
            _ => None,
        };
        let template = AdminInquiriesTemplate {
            shell: Shell::new(&state.config, "/admin"),
            chrome: chrome::<Self>(&flash),
            rows: submissions.iter().map(InquiryRow::from).collect(),
            inspecting,
            panel: PanelView::from_state(Self::SLUG, panel, flash.error),
        };
        render_with_status(template, HttpResponse::build(code))
    }
}

fn sentence(noun: &str, verb: &str) -> String {
    let mut chars = noun.chars();
    match chars.next() {
        Some(first) => format!("{}{} {}", first.to_uppercase(), chars.as_str(), verb),
        None => verb.to_string(),
    }
}

fn back_to_tab<E: PanelPage>(req: &HttpRequest, status: &str) -> HttpResponse {
    let location = with_query(&format!("/admin?tab={}", E::SLUG), "status", status);
    redirect(req, &location)
}

fn parse_id<E: PanelPage>(req: &HttpRequest, raw: &str) -> Result<E::Id, HttpResponse> {
    raw.parse::<E::Id>()
        .map_err(|_| back_to_tab::<E>(req, &sentence(E::NOUN, "not found")))
}

async fn find_or_redirect<E: PanelPage>(
    client: &ServiceClient,
    req: &HttpRequest,
    id: &E::Id,
) -> Result<E, HttpResponse> {
    match E::find(client, id).await {
        Ok(Some(entity)) => Ok(entity),
        Ok(None) => Err(back_to_tab::<E>(req, &sentence(E::NOUN, "not found"))),
        Err(e) => {
            log::error!("Loading {} {} failed: {}", E::NOUN, id, e);
            Err(back_to_tab::<E>(req, &format!("Failed to load {}", E::NOUN)))
        }
    }
}

/// Runs `save` and picks the response for its outcome.
async fn save_panel<E: EditablePage>(
    state: &AppState,
    client: &ServiceClient,
    req: &HttpRequest,
    mut panel: PanelState<E>,
) -> HttpResponse {
    match panel.save(client).await {
        Ok(outcome) => {
            log::info!("{} {} {}", E::NOUN, outcome.verb(), req.path());
            back_to_tab::<E>(req, &sentence(E::NOUN, outcome.verb()))
        }
        Err(e @ PanelError::MissingFields(_)) => {
            E::render(
                state,
                client,
                &panel,
                Flash::error(e.to_string()),
                StatusCode::UNPROCESSABLE_ENTITY,
            )
            .await
        }
        Err(e) => {
            log::error!("Saving {} failed: {}", E::NOUN, e);
            E::render(
                state,
                client,
                &panel,
                Flash::error(format!("Failed to save {}", E::NOUN)),
                StatusCode::INTERNAL_SERVER_ERROR,
            )
            .await
        }
    }
}

pub async fn new_form<E: EditablePage>(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> HttpResponse {
    let client = match require_admin(&state, &req).await {
        Ok(client) => client,
        Err(res) => return res,
    };

    let panel = PanelState::<E>::open_create();
    E::render(&state, &client, &panel, Flash::default(), StatusCode::OK).await
}

pub async fn create<E: EditablePage>(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<E::Form>,
) -> HttpResponse {
    let client = match require_admin(&state, &req).await {
        Ok(client) => client,
        Err(res) => return res,
    };

    let panel = PanelState::<E>::open_create().with_draft(form.into_inner().into());
    save_panel(&state, &client, &req, panel).await
}

pub async fn edit_form<E: EditablePage>(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> HttpResponse {
    let client = match require_admin(&state, &req).await {
        Ok(client) => client,
        Err(res) => return res,
    };
    let id = match parse_id::<E>(&req, &path) {
        Ok(id) => id,
        Err(res) => return res,
    };
    let entity = match find_or_redirect::<E>(&client, &req, &id).await {
        Ok(entity) => entity,
        Err(res) => return res,
    };

    let panel = PanelState::open_edit(&entity);
    E::render(&state, &client, &panel, Flash::default(), StatusCode::OK).await
}

pub async fn update<E: EditablePage>(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    form: web::Form<E::Form>,
) -> HttpResponse {
    let client = match require_admin(&state, &req).await {
        Ok(client) => client,
        Err(res) => return res,
    };
    let id = match parse_id::<E>(&req, &path) {
        Ok(id) => id,
        Err(res) => return res,
    };

    let mut draft: E::Draft = form.into_inner().into();
    E::prepare_update(&id, &mut draft);

    let panel = PanelState::<E>::Editing {
        current: Some(id),
        draft,
    };
    save_panel(&state, &client, &req, panel).await
}

pub async fn confirm_delete<E: PanelPage>(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> HttpResponse {
    let client = match require_admin(&state, &req).await {
        Ok(client) => client,
        Err(res) => return res,
    };
    let id = match parse_id::<E>(&req, &path) {
        Ok(id) => id,
        Err(res) => return res,
    };

    let panel = PanelState::<E>::request_delete(id);
    E::render(&state, &client, &panel, Flash::default(), StatusCode::OK).await
}

pub async fn delete<E: PanelPage>(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> HttpResponse {
    let client = match require_admin(&state, &req).await {
        Ok(client) => client,
        Err(res) => return res,
    };
    let id = match parse_id::<E>(&req, &path) {
        Ok(id) => id,
        Err(res) => return res,
    };

    let mut panel = PanelState::<E>::request_delete(id);
    match panel.confirm_delete(&client).await {
        Ok(id) => {
            log::info!("Deleted {} {}", E::NOUN, id);
            back_to_tab::<E>(&req, &sentence(E::NOUN, "deleted"))
        }
        Err(e) => {
            log::error!("Deleting {} failed: {}", E::NOUN, e);
            back_to_tab::<E>(&req, &format!("Failed to delete {}", E::NOUN))
        }
    }
}

pub async fn inspect<E: PanelPage>(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> HttpResponse {
    let client = match require_admin(&state, &req).await {
        Ok(client) => client,
        Err(res) => return res,
    };
    let id = match parse_id::<E>(&req, &path) {
        Ok(id) => id,
        Err(res) => return res,
    };
    let entity = match find_or_redirect::<E>(&client, &req, &id).await {
        Ok(entity) => entity,
        Err(res) => return res,
    };

    let panel = PanelState::inspect(entity);
    E::render(&state, &client, &panel, Flash::default(), StatusCode::OK).await
}

/// `/admin/{slug}` routes for a panel with forms.
pub fn editable_scope<E: EditablePage>() -> Scope {
    web::scope(&format!("/admin/{}", E::SLUG))
        .route("/new", web::get().to(new_form::<E>))
        .route("/new", web::post().to(create::<E>))
        .route("/{id}/edit", web::get().to(edit_form::<E>))
        .route("/{id}/edit", web::post().to(update::<E>))
        .route("/{id}/delete", web::get().to(confirm_delete::<E>))
        .route("/{id}/delete", web::post().to(delete::<E>))
}

/// `/admin/{slug}` routes for a read-only panel.
pub fn inspect_scope<E: PanelPage>() -> Scope {
    web::scope(&format!("/admin/{}", E::SLUG))
        .route("/{id}", web::get().to(inspect::<E>))
        .route("/{id}/delete", web::get().to(confirm_delete::<E>))
        .route("/{id}/delete", web::post().to(delete::<E>))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(editable_scope::<KeyedContentBlock>())
        .service(editable_scope::<StaffMember>())
        .service(editable_scope::<Notice>())
        .service(editable_scope::<GalleryItem>())
        .service(inspect_scope::<ContactSubmission>());
}
