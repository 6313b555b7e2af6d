use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::required::{RequiredFields, blank, collect_missing};
use super::timestamp::{self, Nanos};

/// A public contact form submission. Never edited; only deletable.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ContactSubmission {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub message: String,
    pub timestamp: Nanos,
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactSubmission {
    pub fn received_at(&self) -> String {
        timestamp::format_date_time(self.timestamp)
    }
}

impl RequiredFields for ContactDraft {
    fn missing_fields(&self) -> Vec<&'static str> {
        collect_missing(&[
            ("Name", blank(&self.name)),
            ("Email", blank(&self.email)),
            ("Message", blank(&self.message)),
        ])
    }
}
