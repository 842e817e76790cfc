use serde::Deserialize;

use crate::MAX_ID;
use crate::domain::entities::Tags;

/// Inbound field map of an editor form.
///
/// Absent fields and empty strings are treated the same: "no value supplied".
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct PostInput {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    /// comma separated
    pub tags: Option<String>,
}

impl PostInput {
    pub fn title(&self) -> Option<&str> {
        supplied(&self.title)
    }

    pub fn excerpt(&self) -> Option<&str> {
        supplied(&self.excerpt)
    }

    pub fn content(&self) -> Option<&str> {
        supplied(&self.content)
    }

    pub fn author(&self) -> Option<&str> {
        supplied(&self.author)
    }

    pub fn tags(&self) -> Tags {
        Tags::parse(supplied(&self.tags))
    }
}

fn supplied(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

/// Parses an entity id sent as text. Empty, non numeric, zero and ids above [`MAX_ID`]
/// count as absent.
pub fn parse_id<I: From<u64>>(raw: Option<&str>) -> Option<I> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<u64>() {
        Ok(0) => None,
        Ok(id) if id > MAX_ID => {
            tracing::debug!("ignoring id '{}': out of range", raw);
            None
        }
        Ok(id) => Some(I::from(id)),
        Err(err) => {
            tracing::debug!("ignoring id '{}': {}", raw, err);
            None
        }
    }
}
