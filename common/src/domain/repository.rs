use std::future::Future;

use thiserror::Error;

use crate::domain::entities::{CollectionKind, Entity};

/// Load/save boundary of the two durable collections.
///
/// Every save replaces the whole collection. There is no locking: callers that
/// load, modify and save concurrently can lose each other's updates.
pub trait ContentRepository: Send + Sync + 'static {
    /// Read the full collection of `E`
    fn try_load_all<E: Entity>(
        &self,
    ) -> impl Future<Output = Result<Vec<E>, RepositoryError>> + Send;

    /// Overwrite the full collection of `E`
    fn save_all<E: Entity>(
        &self,
        entities: &[E],
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;

    /// Read the full collection of `E`, substituting an empty collection when the
    /// store cannot be read or parsed. The failure is logged, never returned.
    fn load_all<E: Entity>(&self) -> impl Future<Output = Vec<E>> + Send {
        async move {
            match self.try_load_all::<E>().await {
                Ok(entities) => entities,
                Err(err) if err.is_missing() => {
                    tracing::warn!("{}, starting with an empty collection", err);
                    Vec::new()
                }
                Err(err) => {
                    tracing::error!("{}, falling back to an empty collection", err);
                    Vec::new()
                }
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("failed to read {kind} store: {source}")]
    Read {
        kind: CollectionKind,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {kind} store: {source}")]
    Parse {
        kind: CollectionKind,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize {kind}: {source}")]
    Serialize {
        kind: CollectionKind,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write {kind} store: {source}")]
    Write {
        kind: CollectionKind,
        #[source]
        source: std::io::Error,
    },
}

impl RepositoryError {
    pub fn kind(&self) -> CollectionKind {
        match self {
            RepositoryError::Read { kind, .. }
            | RepositoryError::Parse { kind, .. }
            | RepositoryError::Serialize { kind, .. }
            | RepositoryError::Write { kind, .. } => *kind,
        }
    }

    /// The store has not been created yet
    pub fn is_missing(&self) -> bool {
        matches!(self, RepositoryError::Read { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}
