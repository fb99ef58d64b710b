//! Handles settings for the application. Configuration is read from
//! `settings.toml` (or the file named by `SPENDVIEW_SETTINGS`), then
//! overridden by `SPENDVIEW__SECTION__KEY` environment variables.
//!
//! Every key has a default, so the file is optional.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

const SETTINGS_FILE_VAR: &str = "SPENDVIEW_SETTINGS";
const DEFAULT_SETTINGS_FILE: &str = "settings";

#[derive(Debug, Deserialize)]
pub struct App {
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct Seed {
    pub dir: String,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
    pub seed: Seed,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let file = std::env::var(SETTINGS_FILE_VAR)
            .unwrap_or_else(|_| DEFAULT_SETTINGS_FILE.to_string());
        Self::from_file(&file)
    }

    fn from_file(file: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("app.level", "info")?
            .set_default("server.bind", "127.0.0.1")?
            .set_default("server.port", 5080)?
            .set_default("seed.dir", "seed")?
            .add_source(File::with_name(file).required(false))
            .add_source(Environment::with_prefix("SPENDVIEW").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.server.bind, self.server.port)
    }
}
