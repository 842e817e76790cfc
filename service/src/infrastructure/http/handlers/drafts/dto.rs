use chrono::NaiveDate;
use scriptorium_common::{Draft, PostInput};
use serde::{Deserialize, Serialize};

/// Editor form sent to save a draft
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveDraftRequest {
    #[serde(flatten)]
    pub input: PostInput,
    pub draft_id: Option<String>,
}

/// Response for list and one draft routes
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftResponse {
    id: u64,
    title: String,
    excerpt: String,
    content: String,
    author: String,
    date: NaiveDate,
    tags: Vec<String>,
    last_saved: String,
}

impl From<Draft> for DraftResponse {
    fn from(value: Draft) -> Self {
        Self {
            id: value.id.into(),
            tags: value.tags.to_strings(),
            title: value.title,
            excerpt: value.excerpt,
            content: value.content,
            author: value.author,
            date: value.date,
            last_saved: value.last_saved,
        }
    }
}
