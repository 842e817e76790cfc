use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::entities::{CollectionKind, Entity};
use crate::domain::repository::{ContentRepository, RepositoryError};

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub drafts_path: PathBuf,
    pub articles_path: PathBuf,
}

/// Keeps every collection as one pretty printed JSON array on disk.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    settings: StorageSettings,
}

impl JsonFileRepository {
    pub fn new(settings: StorageSettings) -> Self {
        Self { settings }
    }

    fn path(&self, kind: CollectionKind) -> &Path {
        match kind {
            CollectionKind::Drafts => &self.settings.drafts_path,
            CollectionKind::Articles => &self.settings.articles_path,
        }
    }
}

impl ContentRepository for JsonFileRepository {
    async fn try_load_all<E: Entity>(&self) -> Result<Vec<E>, RepositoryError> {
        let kind = E::KIND;
        let path = self.path(kind);
        tracing::debug!("loading {} from {}", kind, path.display());

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| RepositoryError::Read { kind, source })?;

        serde_json::from_str(&content).map_err(|source| RepositoryError::Parse { kind, source })
    }

    async fn save_all<E: Entity>(&self, entities: &[E]) -> Result<(), RepositoryError> {
        let kind = E::KIND;
        let path = self.path(kind);

        let content = serde_json::to_string_pretty(entities)
            .map_err(|source| RepositoryError::Serialize { kind, source })?;

        tokio::fs::write(path, content)
            .await
            .map_err(|source| RepositoryError::Write { kind, source })?;

        tracing::debug!("saved {} {} to {}", entities.len(), kind, path.display());
        Ok(())
    }
}
