use std::sync::Arc;

use scriptorium_common::{ContentRepository, PasswordGate, PublishingWorkflow, SessionRegistry};

use crate::domain::AppState;

pub mod http;
pub mod settings;

pub struct AppStateImpl<R: ContentRepository> {
    workflow: Arc<PublishingWorkflow<R>>,
    password_gate: PasswordGate,
    sessions: Arc<SessionRegistry>,
}

impl<R: ContentRepository> AppStateImpl<R> {
    pub fn new(repository: R, password_gate: PasswordGate) -> Self {
        Self {
            workflow: Arc::new(PublishingWorkflow::new(repository)),
            password_gate,
            sessions: Arc::new(SessionRegistry::default()),
        }
    }
}

impl<R: ContentRepository> Clone for AppStateImpl<R> {
    fn clone(&self) -> Self {
        Self {
            workflow: Arc::clone(&self.workflow),
            password_gate: self.password_gate.clone(),
            sessions: Arc::clone(&self.sessions),
        }
    }
}

impl<R: ContentRepository> AppState for AppStateImpl<R> {
    type R = R;

    fn workflow(&self) -> &PublishingWorkflow<R> {
        &self.workflow
    }

    fn password_gate(&self) -> &PasswordGate {
        &self.password_gate
    }

    fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }
}
