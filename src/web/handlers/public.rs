use actix_web::{HttpRequest, HttpResponse, Responder, get, web};

use crate::pages::{self, BlockPage, load_hero, load_slot, load_slots};
use crate::web::helpers::{render, render_with_status};
use crate::web::state::AppState;
use crate::web::templates::{
    BlocksPageTemplate, GalleryTemplate, HomeTemplate, NotFoundTemplate, NoticeRow,
    NoticeTemplate, NoticesTemplate, Shell, StaffTemplate,
};

#[get("/")]
pub async fn home(state: web::Data<AppState>) -> impl Responder {
    let client = state.public_client().await;
    let (welcome, mission) = futures_util::join!(
        load_hero(&client, pages::HOME_WELCOME),
        load_slot(&client, pages::HOME_MISSION),
    );

    render(HomeTemplate {
        shell: Shell::new(&state.config, "/"),
        welcome,
        mission,
    })
}

async fn block_page(state: &AppState, page: BlockPage) -> HttpResponse {
    let client = state.public_client().await;
    let blocks = load_slots(&client, page.slots).await;

    render(BlocksPageTemplate {
        shell: Shell::new(&state.config, page.path),
        heading: page.heading,
        intro: page.intro,
        blocks,
    })
}

#[get("/about")]
pub async fn about(state: web::Data<AppState>) -> impl Responder {
    block_page(&state, pages::ABOUT).await
}

#[get("/admissions")]
pub async fn admissions(state: web::Data<AppState>) -> impl Responder {
    block_page(&state, pages::ADMISSIONS).await
}

#[get("/academics")]
pub async fn academics(state: web::Data<AppState>) -> impl Responder {
    block_page(&state, pages::ACADEMICS).await
}

#[get("/staff")]
pub async fn staff(state: web::Data<AppState>) -> impl Responder {
    let client = state.public_client().await;
    let staff = client.staff_list().await.unwrap_or_else(|e| {
        log::warn!("Staff directory unavailable: {}", e);
        Vec::new()
    });

    render(StaffTemplate {
        shell: Shell::new(&state.config, "/staff"),
        staff,
    })
}

#[get("/notices")]
pub async fn notices(state: web::Data<AppState>) -> impl Responder {
    let client = state.public_client().await;
    let notices = client.notices().await.unwrap_or_else(|e| {
        log::warn!("Notices unavailable: {}", e);
        Vec::new()
    });

    render(NoticesTemplate {
        shell: Shell::new(&state.config, "/notices"),
        notices: notices.iter().map(NoticeRow::public).collect(),
    })
}

#[get("/notices/{id}")]
pub async fn notice_detail(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let shell = Shell::new(&state.config, "/notices");

    // A malformed id reads the same as a missing notice.
    let notice = match path.into_inner().parse::<i64>() {
        Ok(id) => {
            let client = state.public_client().await;
            client.notice(id).await.unwrap_or_else(|e| {
                log::warn!("Notice {} unavailable: {}", id, e);
                None
            })
        }
        Err(_) => None,
    };

    match notice {
        Some(notice) => render(NoticeTemplate {
            shell,
            notice: Some(notice),
        }),
        None => render_with_status(
            NoticeTemplate {
                shell,
                notice: None,
            },
            HttpResponse::NotFound(),
        ),
    }
}

#[get("/gallery")]
pub async fn gallery(state: web::Data<AppState>) -> impl Responder {
    let client = state.public_client().await;
    let items = client.gallery_items().await.unwrap_or_else(|e| {
        log::warn!("Gallery unavailable: {}", e);
        Vec::new()
    });

    render(GalleryTemplate {
        shell: Shell::new(&state.config, "/gallery"),
        items,
    })
}

pub async fn not_found(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    render_with_status(
        NotFoundTemplate {
            shell: Shell::new(&state.config, req.path()),
        },
        HttpResponse::NotFound(),
    )
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(home)
        .service(about)
        .service(admissions)
        .service(academics)
        .service(staff)
        .service(notices)
        .service(notice_detail)
        .service(gallery);
}
