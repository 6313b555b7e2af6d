use askama::Template;
use chrono::{Datelike, Utc};

use crate::admin::{Managed, PanelState};
use crate::config::SiteConfig;
use crate::models::{
    ContactDraft, ContactSubmission, ContentBlockDraft, GalleryDraft, GalleryItem,
    KeyedContentBlock, Notice, NoticeDraft, StaffDraft, StaffMember, UserProfile, timestamp,
};
use crate::pages::{
    ADMIN_PREVIEW_CHARS, INQUIRY_PREVIEW_CHARS, NAV_LINKS, NOTICE_EXCERPT_CHARS, ResolvedBlock,
    STAFF_BIO_PREVIEW_CHARS, excerpt, is_active,
};

pub struct NavLink {
    pub href: &'static str,
    pub label: &'static str,
    pub active: bool,
}

/// Header and footer data shared by every page.
pub struct Shell {
    pub school_name: String,
    pub year: i32,
    pub nav: Vec<NavLink>,
}

impl Shell {
    pub fn new(config: &SiteConfig, current_path: &str) -> Self {
        Self {
            school_name: config.school_name.clone(),
            year: Utc::now().year(),
            nav: NAV_LINKS
                .iter()
                .map(|&(href, label)| NavLink {
                    href,
                    label,
                    active: is_active(current_path, href),
                })
                .collect(),
        }
    }
}

pub const ADMIN_TABS: &[(&str, &str)] = &[
    ("content", "Content"),
    ("staff", "Staff"),
    ("notices", "Notices"),
    ("gallery", "Gallery"),
    ("inquiries", "Inquiries"),
    ("profile", "Profile"),
];

pub struct TabLink {
    pub href: String,
    pub label: &'static str,
    pub active: bool,
}

/// Dashboard tabs plus the one-shot status line.
pub struct AdminChrome {
    pub tabs: Vec<TabLink>,
    pub status: Option<String>,
}

impl AdminChrome {
    pub fn new(active_tab: &str, status: Option<String>) -> Self {
        Self {
            tabs: ADMIN_TABS
                .iter()
                .map(|&(slug, label)| TabLink {
                    href: format!("/admin?tab={}", slug),
                    label,
                    active: slug == active_tab,
                })
                .collect(),
            status: status.filter(|s| !s.trim().is_empty()),
        }
    }
}

/// A panel state flattened for a template.
pub struct PanelView<D> {
    pub show_form: bool,
    pub form_heading: String,
    pub form_action: String,
    pub draft: D,
    /// Content block keys cannot change after creation.
    pub key_locked: bool,
    pub show_confirm: bool,
    pub confirm_action: String,
    pub cancel_href: String,
    pub error: Option<String>,
}

impl<D: Clone + Default> PanelView<D> {
    pub fn from_state<E>(slug: &str, state: &PanelState<E>, error: Option<String>) -> Self
    where
        E: Managed<Draft = D>,
    {
        let mut view = Self {
            show_form: false,
            form_heading: String::new(),
            form_action: String::new(),
            draft: D::default(),
            key_locked: false,
            show_confirm: false,
            confirm_action: String::new(),
            cancel_href: format!("/admin?tab={}", slug),
            error,
        };

        match state {
            PanelState::Editing { current, draft } => {
                view.show_form = true;
                view.draft = draft.clone();
                match current {
                    Some(id) => {
                        view.form_heading = format!("Edit {}", title_case(E::NOUN));
                        view.form_action = format!("/admin/{}/{}/edit", slug, encode_id(id));
                        view.key_locked = true;
                    }
                    None => {
                        view.form_heading = format!("Add {}", title_case(E::NOUN));
                        view.form_action = format!("/admin/{}/new", slug);
                    }
                }
            }
            PanelState::ConfirmingDelete(id) => {
                view.show_confirm = true;
                view.confirm_action = format!("/admin/{}/{}/delete", slug, encode_id(id));
            }
            PanelState::Viewing | PanelState::Inspecting(_) => {}
        }

        view
    }
}

pub fn encode_id(id: &impl std::fmt::Display) -> String {
    urlencoding::encode(&id.to_string()).into_owned()
}

fn title_case(noun: &str) -> String {
    noun.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

pub struct ContentBlockRow {
    pub key: String,
    pub link: String,
    pub title: String,
    pub preview: String,
}

impl From<KeyedContentBlock> for ContentBlockRow {
    fn from(block: KeyedContentBlock) -> Self {
        Self {
            link: encode_id(&block.key),
            preview: excerpt(&block.content, ADMIN_PREVIEW_CHARS),
            key: block.key,
            title: block.title,
        }
    }
}

pub struct NoticeRow {
    pub id: i64,
    pub title: String,
    pub date: String,
    pub preview: String,
}

impl NoticeRow {
    pub fn admin(notice: &Notice) -> Self {
        Self {
            id: notice.id,
            title: notice.title.clone(),
            date: notice.short_date(),
            preview: excerpt(&notice.body, ADMIN_PREVIEW_CHARS),
        }
    }

    pub fn public(notice: &Notice) -> Self {
        Self {
            id: notice.id,
            title: notice.title.clone(),
            date: notice.long_date(),
            preview: excerpt(&notice.body, NOTICE_EXCERPT_CHARS),
        }
    }
}

pub struct InquiryRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub date: String,
    pub preview: String,
}

impl From<&ContactSubmission> for InquiryRow {
    fn from(submission: &ContactSubmission) -> Self {
        Self {
            id: submission.id,
            name: submission.name.clone(),
            email: submission.email.clone(),
            date: timestamp::format_short_date(submission.timestamp),
            preview: excerpt(&submission.message, INQUIRY_PREVIEW_CHARS),
        }
    }
}

pub struct StaffRow {
    pub id: i64,
    pub name: String,
    pub position: String,
    pub photo_url: String,
    pub has_photo: bool,
    pub initials: String,
    pub bio_preview: String,
}

impl From<&StaffMember> for StaffRow {
    fn from(member: &StaffMember) -> Self {
        Self {
            id: member.id,
            name: member.name.clone(),
            position: member.position.clone(),
            photo_url: member.photo_url.clone(),
            has_photo: member.has_photo(),
            initials: member.initials(),
            bio_preview: excerpt(member.biography.trim(), STAFF_BIO_PREVIEW_CHARS),
        }
    }
}

// Public pages

#[derive(Template)]
#[template(path = "public/home.html")]
pub struct HomeTemplate {
    pub shell: Shell,
    pub welcome: ResolvedBlock,
    pub mission: Option<ResolvedBlock>,
}

#[derive(Template)]
#[template(path = "public/blocks_page.html")]
pub struct BlocksPageTemplate {
    pub shell: Shell,
    pub heading: &'static str,
    pub intro: &'static str,
    pub blocks: Vec<ResolvedBlock>,
}

#[derive(Template)]
#[template(path = "public/staff.html")]
pub struct StaffTemplate {
    pub shell: Shell,
    pub staff: Vec<StaffMember>,
}

#[derive(Template)]
#[template(path = "public/notices.html")]
pub struct NoticesTemplate {
    pub shell: Shell,
    pub notices: Vec<NoticeRow>,
}

#[derive(Template)]
#[template(path = "public/notice.html")]
pub struct NoticeTemplate {
    pub shell: Shell,
    pub notice: Option<Notice>,
}

#[derive(Template)]
#[template(path = "public/gallery.html")]
pub struct GalleryTemplate {
    pub shell: Shell,
    pub items: Vec<GalleryItem>,
}

#[derive(Template)]
#[template(path = "public/contact.html")]
pub struct ContactTemplate {
    pub shell: Shell,
    pub details: ResolvedBlock,
    pub form: ContactDraft,
    pub submitted: bool,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub shell: Shell,
}

// Admin gate

#[derive(Template)]
#[template(path = "admin/unlock.html")]
pub struct AdminUnlockTemplate {
    pub shell: Shell,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "admin/login.html")]
pub struct AdminLoginTemplate {
    pub shell: Shell,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "admin/register.html")]
pub struct AdminRegisterTemplate {
    pub shell: Shell,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "admin/denied.html")]
pub struct AdminDeniedTemplate {
    pub shell: Shell,
    pub message: &'static str,
    pub principal: String,
}

// Admin panels

#[derive(Template)]
#[template(path = "admin/content_blocks.html")]
pub struct AdminContentBlocksTemplate {
    pub shell: Shell,
    pub chrome: AdminChrome,
    pub rows: Vec<ContentBlockRow>,
    pub panel: PanelView<ContentBlockDraft>,
}

#[derive(Template)]
#[template(path = "admin/staff.html")]
pub struct AdminStaffTemplate {
    pub shell: Shell,
    pub chrome: AdminChrome,
    pub rows: Vec<StaffRow>,
    pub panel: PanelView<StaffDraft>,
}

#[derive(Template)]
#[template(path = "admin/notices.html")]
pub struct AdminNoticesTemplate {
    pub shell: Shell,
    pub chrome: AdminChrome,
    pub rows: Vec<NoticeRow>,
    pub panel: PanelView<NoticeDraft>,
}

#[derive(Template)]
#[template(path = "admin/gallery.html")]
pub struct AdminGalleryTemplate {
    pub shell: Shell,
    pub chrome: AdminChrome,
    pub items: Vec<GalleryItem>,
    pub panel: PanelView<GalleryDraft>,
}

#[derive(Template)]
#[template(path = "admin/inquiries.html")]
pub struct AdminInquiriesTemplate {
    pub shell: Shell,
    pub chrome: AdminChrome,
    pub rows: Vec<InquiryRow>,
    pub inspecting: Option<ContactSubmission>,
    pub panel: PanelView<ContactDraft>,
}

#[derive(Template)]
#[template(path = "admin/profile.html")]
pub struct AdminProfileTemplate {
    pub shell: Shell,
    pub chrome: AdminChrome,
    pub profile: UserProfile,
    pub principal: String,
    pub role: String,
    pub error: Option<String>,
    pub lookup_user: String,
    pub lookup: Option<UserProfile>,
    pub lookup_message: Option<String>,
    pub roles: &'static [&'static str],
}
