use serde::Deserialize;

use crate::models::{
    ContactDraft, ContentBlockDraft, GalleryDraft, NoticeDraft, StaffDraft, UserProfile,
    timestamp,
};

#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Deserialize)]
pub struct AuthQuery {
    pub error: Option<String>,
}

#[derive(Deserialize)]
pub struct UnlockForm {
    pub token: String,
}

#[derive(Deserialize)]
pub struct AdminQuery {
    pub tab: Option<String>,
    pub status: Option<String>,
    pub error: Option<String>,
    /// Principal to look up on the profile tab.
    pub user: Option<String>,
}

#[derive(Deserialize)]
pub struct ContactQuery {
    pub sent: Option<String>,
}

#[derive(Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Deserialize)]
pub struct ProfileForm {
    pub name: String,
    pub email: String,
}

#[derive(Deserialize)]
pub struct RoleForm {
    pub principal: String,
    pub role: String,
}

#[derive(Deserialize)]
pub struct ContentBlockForm {
    #[serde(default)]
    pub key: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Deserialize)]
pub struct StaffForm {
    pub name: String,
    pub position: String,
    #[serde(default)]
    pub biography: String,
    #[serde(default)]
    pub photo_url: String,
}

#[derive(Deserialize)]
pub struct NoticeForm {
    pub title: String,
    pub body: String,
    /// `YYYY-MM-DD` from a date input.
    #[serde(default)]
    pub date: String,
}

#[derive(Deserialize)]
pub struct GalleryForm {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub image_url: String,
}

impl From<ContactForm> for ContactDraft {
    fn from(form: ContactForm) -> Self {
        Self {
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            message: form.message,
        }
    }
}

impl From<ProfileForm> for UserProfile {
    fn from(form: ProfileForm) -> Self {
        Self {
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
        }
    }
}

impl From<ContentBlockForm> for ContentBlockDraft {
    fn from(form: ContentBlockForm) -> Self {
        Self {
            key: form.key.trim().to_string(),
            title: form.title,
            content: form.content,
        }
    }
}

impl From<StaffForm> for StaffDraft {
    fn from(form: StaffForm) -> Self {
        Self {
            name: form.name.trim().to_string(),
            position: form.position.trim().to_string(),
            biography: form.biography,
            photo_url: form.photo_url.trim().to_string(),
        }
    }
}

impl From<NoticeForm> for NoticeDraft {
    fn from(form: NoticeForm) -> Self {
        Self {
            title: form.title.trim().to_string(),
            body: form.body,
            date: timestamp::parse_date_input(&form.date),
        }
    }
}

impl From<GalleryForm> for GalleryDraft {
    fn from(form: GalleryForm) -> Self {
        Self {
            title: form.title.trim().to_string(),
            description: form.description,
            image_url: form.image_url.trim().to_string(),
        }
    }
}
