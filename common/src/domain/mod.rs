pub mod entities;
pub mod input;
pub mod markup;
pub mod repository;
pub mod session;
pub mod workflow;

pub use entities::{Article, ArticleId, CollectionKind, Draft, DraftId, Entity, Tag, Tags};
pub use input::{PostInput, parse_id};
pub use repository::{ContentRepository, RepositoryError};
pub use session::{EditorSession, PasswordGate, SessionRegistry, SessionToken};
pub use workflow::PublishingWorkflow;
