//! Application settings, read from `settings.toml`.
//!
//! Every key has a default so the binary runs without a settings file.

use config::{Config, ConfigError, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct App {
    /// Log level for the env filter (`info`, `debug`, ...).
    pub level: String,
    /// Seed a small demo inventory at startup.
    pub demo: bool,
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("settings").required(false))
            .set_default("app.level", "info")?
            .set_default("app.demo", false)?
            .set_default("server.port", 3000)?
            .build()?;

        settings.try_deserialize()
    }
}
