use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::required::{RequiredFields, blank, collect_missing};
use super::timestamp::Nanos;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, FromRow)]
pub struct GalleryItem {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub image_url: String,
    /// Assigned by the content service.
    pub date_added: Nanos,
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct GalleryDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub image_url: String,
}

impl GalleryItem {
    pub fn has_description(&self) -> bool {
        !blank(&self.description)
    }

    pub fn to_draft(&self) -> GalleryDraft {
        GalleryDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            image_url: self.image_url.clone(),
        }
    }
}

impl RequiredFields for GalleryDraft {
    fn missing_fields(&self) -> Vec<&'static str> {
        collect_missing(&[
            ("Title", blank(&self.title)),
            ("Image URL", blank(&self.image_url)),
        ])
    }
}
