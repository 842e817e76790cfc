use scriptorium_common::{ContentRepository, PasswordGate, PublishingWorkflow, SessionRegistry};

/// The global application state shared between all request handlers.
pub trait AppState: Clone + Send + Sync + 'static {
    type R: ContentRepository;
    fn workflow(&self) -> &PublishingWorkflow<Self::R>;
    fn password_gate(&self) -> &PasswordGate;
    fn sessions(&self) -> &SessionRegistry;
}
