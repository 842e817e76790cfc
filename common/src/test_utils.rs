use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::domain::entities::{CollectionKind, Entity};
use crate::domain::repository::{ContentRepository, RepositoryError};

/// Repository keeping the serialized collections in memory.
///
/// Public so that other crates can reuse it for their own tests.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    stores: Mutex<HashMap<CollectionKind, String>>,
    failing_writes: Mutex<HashSet<CollectionKind>>,
}

impl InMemoryRepository {
    /// Replace a store with arbitrary text, e.g. to simulate corruption.
    pub fn put_raw(&self, kind: CollectionKind, content: &str) {
        self.stores
            .lock()
            .unwrap()
            .insert(kind, content.to_owned());
    }

    pub fn raw(&self, kind: CollectionKind) -> Option<String> {
        self.stores.lock().unwrap().get(&kind).cloned()
    }

    /// Make every following save of `kind` fail with a write error.
    pub fn fail_writes(&self, kind: CollectionKind, fail: bool) {
        let mut failing = self.failing_writes.lock().unwrap();
        if fail {
            failing.insert(kind);
        } else {
            failing.remove(&kind);
        }
    }

    fn writes_fail(&self, kind: CollectionKind) -> bool {
        self.failing_writes.lock().unwrap().contains(&kind)
    }
}

impl ContentRepository for InMemoryRepository {
    async fn try_load_all<E: Entity>(&self) -> Result<Vec<E>, RepositoryError> {
        let kind = E::KIND;
        match self.raw(kind) {
            Some(content) => serde_json::from_str(&content)
                .map_err(|source| RepositoryError::Parse { kind, source }),
            None => Ok(Vec::new()),
        }
    }

    async fn save_all<E: Entity>(&self, entities: &[E]) -> Result<(), RepositoryError> {
        let kind = E::KIND;
        if self.writes_fail(kind) {
            return Err(RepositoryError::Write {
                kind,
                source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            });
        }
        let content = serde_json::to_string_pretty(entities)
            .map_err(|source| RepositoryError::Serialize { kind, source })?;
        self.put_raw(kind, &content);
        Ok(())
    }
}
