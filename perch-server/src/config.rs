use config::{Config, ConfigError, File};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct Database {
    pub path: String,
    pub seed_demo: bool,
}

#[derive(Debug, Deserialize)]
pub struct Identity {
    /// Base URL of the external identity service that resolves tokens.
    pub base_url: String,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub server: Server,
    pub database: Database,
    pub identity: Identity,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        // settings.toml is optional; defaults plus env vars are enough to
        // boot a dev server.
        let config_file_name = "settings.toml";
        let current_dir_path = PathBuf::from(config_file_name);
        if current_dir_path.exists() {
            builder = builder.add_source(File::from(current_dir_path).required(false));
        }
        let dev_path = PathBuf::from("perch-server").join(config_file_name);
        if dev_path.exists() {
            builder = builder.add_source(File::from(dev_path).required(false));
        }

        builder = builder
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("database.path", "perch.db")?
            .set_default("database.seed_demo", false)?
            .set_default("identity.base_url", "http://localhost:8000")?;

        // Environment variables take priority over the file.
        if let Ok(db_path) = std::env::var("DATABASE_PATH") {
            builder = builder.set_override("database.path", db_path)?;
        }
        if let Ok(port) = std::env::var("PORT") {
            builder = builder.set_override("server.port", port)?;
        }
        if let Ok(host) = std::env::var("HOST") {
            builder = builder.set_override("server.host", host)?;
        }
        if let Ok(identity_url) = std::env::var("IDENTITY_URL") {
            builder = builder.set_override("identity.base_url", identity_url)?;
        }
        if let Ok(seed) = std::env::var("SEED_DEMO_DATA") {
            builder = builder.set_override("database.seed_demo", seed == "1" || seed == "true")?;
        }

        let s = builder.build()?;
        s.try_deserialize()
    }
}
