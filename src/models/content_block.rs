use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::required::{RequiredFields, blank, collect_missing};

/// A named, freely editable text fragment shown on a public page.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ContentBlock {
    pub title: String,
    pub content: String,
}

/// A content block together with the key it is stored under.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, FromRow)]
pub struct KeyedContentBlock {
    pub key: String,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ContentBlockDraft {
    pub key: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl ContentBlock {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

impl KeyedContentBlock {
    pub fn block(&self) -> ContentBlock {
        ContentBlock::new(self.title.clone(), self.content.clone())
    }
}

impl From<(String, ContentBlock)> for KeyedContentBlock {
    fn from((key, block): (String, ContentBlock)) -> Self {
        Self {
            key,
            title: block.title,
            content: block.content,
        }
    }
}

impl ContentBlockDraft {
    pub fn block(&self) -> ContentBlock {
        ContentBlock::new(self.title.trim(), self.content.clone())
    }
}

impl RequiredFields for ContentBlockDraft {
    fn missing_fields(&self) -> Vec<&'static str> {
        collect_missing(&[("Key", blank(&self.key)), ("Title", blank(&self.title))])
    }
}
