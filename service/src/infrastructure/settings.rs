use std::env;

use anyhow::Context;
use config::{Config, Environment, File};
use dotenvy::dotenv;
use scriptorium_common::StorageSettings;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server_port: String,
    pub storage: StorageSettings,
    pub auth: AuthSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub password: String,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv().ok();
        let run_mode = load_env("RUN_MODE", "development");

        let s = Config::builder()
            .set_default("server_port", "3000")?
            .set_default("storage.drafts_path", "drafts.json")?
            .set_default("storage.articles_path", "articles.json")?
            .set_default("auth.password", "change-in-production")?
            .add_source(File::with_name("./config/default").required(false))
            .add_source(File::with_name(&format!("./config/{run_mode}")).required(false))
            .add_source(Environment::with_prefix("app").separator("__"))
            .set_override_option("server_port", env::var("PORT").ok())?
            .set_override_option("auth.password", env::var("BLOG_PASSWORD").ok())?
            .build()?;

        s.try_deserialize().with_context(|| "failed to read config")
    }
}

fn load_env(key: &str, default_value: &'static str) -> String {
    env::var(key).unwrap_or_else(|_| default_value.into())
}
