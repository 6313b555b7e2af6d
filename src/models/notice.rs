use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::required::{RequiredFields, blank, collect_missing};
use super::timestamp::{self, Nanos};

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Notice {
    pub id: i64,
    pub title: String,
    pub body: String,
    /// Client-chosen publication date.
    pub date: Nanos,
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct NoticeDraft {
    pub title: String,
    pub body: String,
    pub date: Option<Nanos>,
}

impl Notice {
    pub fn long_date(&self) -> String {
        timestamp::format_long_date(self.date)
    }

    pub fn short_date(&self) -> String {
        timestamp::format_short_date(self.date)
    }

    pub fn to_draft(&self) -> NoticeDraft {
        NoticeDraft {
            title: self.title.clone(),
            body: self.body.clone(),
            date: Some(self.date),
        }
    }
}

impl NoticeDraft {
    pub fn new(title: impl Into<String>, body: impl Into<String>, date: Nanos) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            date: Some(date),
        }
    }

    pub fn date_input(&self) -> String {
        self.date.map(timestamp::date_input_value).unwrap_or_default()
    }
}

impl RequiredFields for NoticeDraft {
    fn missing_fields(&self) -> Vec<&'static str> {
        collect_missing(&[
            ("Title", blank(&self.title)),
            ("Content", blank(&self.body)),
            ("Date", self.date.is_none()),
        ])
    }
}
