use scriptorium_common::{JsonFileRepository, PasswordGate};
use crate::infrastructure::AppStateImpl;
use crate::infrastructure::http::{HttpServer, HttpServerConfig};
use crate::infrastructure::settings::Settings;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod domain;
mod infrastructure;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "storing drafts in {} and articles in {}",
        settings.storage.drafts_path.display(),
        settings.storage.articles_path.display()
    );
    let repository = JsonFileRepository::new(settings.storage.clone());
    let password_gate = PasswordGate::new(settings.auth.password.clone());

    let state = AppStateImpl::new(repository, password_gate);

    let server_config = HttpServerConfig {
        port: &settings.server_port,
    };
    let http_server = HttpServer::new(state, server_config).await?;
    http_server.run().await
}
