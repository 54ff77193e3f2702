use config::{Config, ConfigError, Environment, Map};
use serde::Deserialize;

/// Runtime settings, read from the environment (and `.env`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    /// `None` runs the service on the in-memory store.
    #[serde(default)]
    pub database_url: Option<String>,
    pub database_pool_size: u32,
}

impl Settings {
    pub fn from_env() -> Result<Settings, ConfigError> {
        Settings::load(Environment::default())
    }

    /// Same as `from_env`, with `vars` standing in for the process environment.
    pub fn from_vars(vars: Map<String, String>) -> Result<Settings, ConfigError> {
        Settings::load(Environment::default().source(Some(vars)))
    }

    fn load(environment: Environment) -> Result<Settings, ConfigError> {
        let config = Config::builder()
            .set_default("host", "127.0.0.1")?
            .set_default("port", 8080_i64)?
            .set_default("database_pool_size", 10_i64)?
            .add_source(environment.try_parsing(true))
            .build()?;

        let mut settings: Settings = config.try_deserialize()?;
        settings.database_url = settings
            .database_url
            .filter(|url| !url.trim().is_empty());

        if settings.database_pool_size == 0 {
            return Err(ConfigError::Message(
                "DATABASE_POOL_SIZE must be greater than zero".to_string(),
            ));
        }

        Ok(settings)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
