use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub session: SessionSettings,
    pub cors: CorsSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
    #[serde(default)]
    pub production: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    /// Key material for signing the session cookie; must be at least
    /// 32 bytes.
    pub secret: String,
    #[serde(default = "default_session_max_age")]
    pub max_age_secs: i64,
}

fn default_session_max_age() -> i64 {
    24 * 60 * 60
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsSettings {
    pub frontend_origin: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "full".to_string()
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Configuration file (config/default.toml)
    /// 2. Local overrides (config/local.toml)
    /// 3. Environment variables (prefixed with SWIPEBITES__)
    /// 4. Conventional bare variables (DATABASE_URL, SESSION_SECRET, PORT,
    ///    FRONTEND_ORIGIN, APP_ENV)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g. SWIPEBITES__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("SWIPEBITES")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = apply_env_overrides(settings)?;

        settings.try_deserialize()
    }
}

/// Fold the conventional deployment variables over the layered config.
fn apply_env_overrides(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(url) = env::var("DATABASE_URL") {
        builder = builder.set_override("database.url", url)?;
    }
    if let Ok(secret) = env::var("SESSION_SECRET") {
        builder = builder.set_override("session.secret", secret)?;
    }
    if let Ok(port) = env::var("PORT") {
        builder = builder.set_override("server.port", port)?;
    }
    if let Ok(origin) = env::var("FRONTEND_ORIGIN") {
        builder = builder.set_override("cors.frontend_origin", origin)?;
    }
    if let Ok(app_env) = env::var("APP_ENV") {
        builder = builder.set_override("server.production", app_env == "production")?;
    }

    builder.build()
}
