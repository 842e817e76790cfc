use std::collections::HashSet;
use std::fmt::{Debug, Display};

use chrono::{Local, NaiveDate, Utc};
use nutype::nutype;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::domain::input::PostInput;
use crate::{DEFAULT_AUTHOR, DEFAULT_DRAFT_TITLE, DEFAULT_TAG};

/// Content kept in one durable collection.
pub trait Entity: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    type Id: Copy + Eq + Ord + Debug + Display + From<u64> + Into<u64> + Send + Sync;

    /// Which collection entities of this type live in
    const KIND: CollectionKind;

    fn id(&self) -> Self::Id;
}

/// The two independent collections of the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    Drafts,
    Articles,
}

impl CollectionKind {
    pub fn name(&self) -> &'static str {
        match self {
            CollectionKind::Drafts => "drafts",
            CollectionKind::Articles => "articles",
        }
    }
}

impl Display for CollectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Next free id of a collection: one past the largest id, or 1 for an empty collection.
/// When the largest id is already `u64::MAX`, the smallest unused positive id is taken.
pub fn next_id<E: Entity>(entities: &[E]) -> E::Id {
    let ids = entities
        .iter()
        .map(|entity| -> u64 { entity.id().into() })
        .collect::<HashSet<_>>();
    let max = ids.iter().copied().max().unwrap_or(0);
    let id = max
        .checked_add(1)
        .unwrap_or_else(|| (1..).find(|id| !ids.contains(id)).unwrap_or(max));
    E::Id::from(id)
}

/// Wrapper to prevent ID confusion between drafts and articles
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DraftId(pub u64);

/// Wrapper to prevent ID confusion between drafts and articles
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleId(pub u64);

impl From<u64> for DraftId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<DraftId> for u64 {
    fn from(value: DraftId) -> Self {
        value.0
    }
}

impl Display for DraftId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl From<u64> for ArticleId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<ArticleId> for u64 {
    fn from(value: ArticleId) -> Self {
        value.0
    }
}

impl Display for ArticleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

#[nutype(
    sanitize(trim),
    validate(not_empty),
    derive(
        Clone,
        Debug,
        Display,
        AsRef,
        PartialEq,
        Eq,
        Hash,
        Serialize,
        Deserialize
    )
)]
pub struct Tag(String);

/// Ordered, never empty list of tags.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Tag>", into = "Vec<Tag>")]
pub struct Tags(Vec<Tag>);

impl Tags {
    /// Parses a comma separated list. Blank entries are dropped; an absent or blank
    /// list collapses to the default tag.
    pub fn parse(raw: Option<&str>) -> Self {
        let tags = raw
            .unwrap_or_default()
            .split(',')
            .filter_map(|tag| Tag::try_new(tag).ok())
            .collect::<Vec<_>>();
        Self::from(tags)
    }

    pub fn to_strings(&self) -> Vec<String> {
        self.0.iter().map(|tag| tag.as_ref().to_owned()).collect()
    }
}

impl Default for Tags {
    fn default() -> Self {
        let tag = Tag::try_new(DEFAULT_TAG).expect("DEFAULT_TAG must be a valid tag");
        Self(vec![tag])
    }
}

impl From<Vec<Tag>> for Tags {
    fn from(value: Vec<Tag>) -> Self {
        if value.is_empty() {
            Self::default()
        } else {
            Self(value)
        }
    }
}

impl From<Tags> for Vec<Tag> {
    fn from(value: Tags) -> Self {
        value.0
    }
}

/// Unpublished, editable content record
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    pub id: DraftId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    /// raw markup
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub tags: Tags,
    #[serde(default)]
    pub last_saved: String,
}

impl Draft {
    /// Builds the full replacement record for a save, filling placeholders for
    /// every field the input leaves empty.
    pub fn new(id: DraftId, input: &PostInput, tags: Tags, stamp: &SaveStamp) -> Self {
        Self {
            id,
            title: input.title().unwrap_or(DEFAULT_DRAFT_TITLE).to_owned(),
            excerpt: input.excerpt().unwrap_or_default().to_owned(),
            content: input.content().unwrap_or_default().to_owned(),
            author: input.author().unwrap_or(DEFAULT_AUTHOR).to_owned(),
            date: stamp.date,
            tags,
            last_saved: stamp.last_saved.clone(),
        }
    }
}

impl Entity for Draft {
    type Id = DraftId;
    const KIND: CollectionKind = CollectionKind::Drafts;

    fn id(&self) -> DraftId {
        self.id
    }
}

/// Published content record, keeping both the markup and its rendered HTML
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: ArticleId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    /// rendered HTML of `raw_content`
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub raw_content: String,
    #[serde(default)]
    pub author: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub tags: Tags,
}

impl Article {
    /// A fresh article takes the input as given, without placeholders.
    pub fn new(
        id: ArticleId,
        input: &PostInput,
        rendered: Option<String>,
        tags: Tags,
        date: NaiveDate,
    ) -> Self {
        Self {
            id,
            title: input.title().unwrap_or_default().to_owned(),
            excerpt: input.excerpt().unwrap_or_default().to_owned(),
            content: rendered.unwrap_or_default(),
            raw_content: input.content().unwrap_or_default().to_owned(),
            author: input.author().unwrap_or_default().to_owned(),
            date,
            tags,
        }
    }

    /// Field by field update: supplied values win, empty ones keep the prior value.
    /// Markup and HTML are replaced together or not at all; tags always replace.
    pub fn merge(&mut self, input: &PostInput, rendered: Option<String>, tags: Tags, date: NaiveDate) {
        if let Some(title) = input.title() {
            self.title = title.to_owned();
        }
        if let Some(excerpt) = input.excerpt() {
            self.excerpt = excerpt.to_owned();
        }
        if let Some(author) = input.author() {
            self.author = author.to_owned();
        }
        if let (Some(raw), Some(html)) = (input.content(), rendered) {
            self.raw_content = raw.to_owned();
            self.content = html;
        }
        self.date = date;
        self.tags = tags;
    }
}

impl Entity for Article {
    type Id = ArticleId;
    const KIND: CollectionKind = CollectionKind::Articles;

    fn id(&self) -> ArticleId {
        self.id
    }
}

/// Time fields written by one save.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveStamp {
    /// UTC calendar date
    pub date: NaiveDate,
    /// local time, e.g. `10/17/2026, 3:04:05 PM`
    pub last_saved: String,
}

impl SaveStamp {
    pub fn now() -> Self {
        Self {
            date: Utc::now().date_naive(),
            last_saved: Local::now().format("%-m/%-d/%Y, %-I:%M:%S %p").to_string(),
        }
    }
}
