use chrono::NaiveDate;
use scriptorium_common::{Article, PostInput};
use serde::{Deserialize, Serialize};

/// Editor form sent to publish or update an article
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishRequest {
    #[serde(flatten)]
    pub input: PostInput,
    pub post_id: Option<String>,
    pub draft_id: Option<String>,
}

/// Response for list articles route
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleSummaryResponse {
    id: u64,
    title: String,
    excerpt: String,
    author: String,
    date: NaiveDate,
    tags: Vec<String>,
}

impl From<&Article> for ArticleSummaryResponse {
    fn from(value: &Article) -> Self {
        Self {
            id: value.id.into(),
            title: value.title.clone(),
            excerpt: value.excerpt.clone(),
            author: value.author.clone(),
            date: value.date,
            tags: value.tags.to_strings(),
        }
    }
}

/// Response for one article route, including the markup for re-editing
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleResponse {
    id: u64,
    title: String,
    excerpt: String,
    content: String,
    raw_content: String,
    author: String,
    date: NaiveDate,
    tags: Vec<String>,
}

impl From<Article> for ArticleResponse {
    fn from(value: Article) -> Self {
        Self {
            id: value.id.into(),
            tags: value.tags.to_strings(),
            title: value.title,
            excerpt: value.excerpt,
            content: value.content,
            raw_content: value.raw_content,
            author: value.author,
            date: value.date,
        }
    }
}

/// Where the caller should go after a save
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavedResponse {
    pub id: u64,
    pub location: String,
}
