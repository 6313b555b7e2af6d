use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::required::{RequiredFields, blank, collect_missing};

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, FromRow)]
pub struct StaffMember {
    pub id: i64,
    pub name: String,
    pub position: String,
    pub biography: String,
    pub photo_url: String,
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct StaffDraft {
    pub name: String,
    pub position: String,
    #[serde(default)]
    pub biography: String,
    #[serde(default)]
    pub photo_url: String,
}

impl StaffMember {
    pub fn from_draft(id: i64, draft: &StaffDraft) -> Self {
        Self {
            id,
            name: draft.name.clone(),
            position: draft.position.clone(),
            biography: draft.biography.clone(),
            photo_url: draft.photo_url.clone(),
        }
    }

    /// Avatar fallback: first letter of each name part, uppercased.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }

    pub fn has_photo(&self) -> bool {
        !blank(&self.photo_url)
    }

    pub fn to_draft(&self) -> StaffDraft {
        StaffDraft {
            name: self.name.clone(),
            position: self.position.clone(),
            biography: self.biography.clone(),
            photo_url: self.photo_url.clone(),
        }
    }
}

impl RequiredFields for StaffDraft {
    fn missing_fields(&self) -> Vec<&'static str> {
        collect_missing(&[
            ("Name", blank(&self.name)),
            ("Position", blank(&self.position)),
        ])
    }
}
