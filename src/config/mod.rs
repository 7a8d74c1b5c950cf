//! Typed configuration loaded from the environment.
//!
//! All settings arrive through `FLIGHTDECK`-prefixed environment variables
//! (a `.env` file is honored in development). The double underscore
//! separates sections: `FLIGHTDECK__SERVER__PORT=8080` sets `server.port`.
//! Only `FLIGHTDECK__DATABASE__URL` is required.

mod database;
mod error;
mod server;
mod trial;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};
pub use trial::TrialConfig;

use serde::Deserialize;

/// Root configuration for the Flightdeck backend.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// PostgreSQL pool settings.
    pub database: DatabaseConfig,

    /// Trial window granted to first-time users.
    #[serde(default)]
    pub trial: TrialConfig,
}

impl AppConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Fails when a required variable is missing or a value does not
    /// parse into its typed field.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("FLIGHTDECK")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Checks every section's invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.trial.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Environment variables are process-global; serialize the tests.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn load_with(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var(
            "FLIGHTDECK__DATABASE__URL",
            "postgresql://test@localhost/flightdeck",
        );
        for (key, value) in vars {
            env::set_var(key, value);
        }

        let result = AppConfig::load();

        env::remove_var("FLIGHTDECK__DATABASE__URL");
        for (key, _) in vars {
            env::remove_var(key);
        }
        result
    }

    #[test]
    fn minimal_environment_loads_and_validates() {
        let config = load_with(&[]).unwrap();
        assert_eq!(config.database.url, "postgresql://test@localhost/flightdeck");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn optional_sections_fall_back_to_defaults() {
        let config = load_with(&[]).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.trial.days, 7);
    }

    #[test]
    fn nested_overrides_reach_their_section() {
        let config = load_with(&[
            ("FLIGHTDECK__SERVER__PORT", "9090"),
            ("FLIGHTDECK__TRIAL__DAYS", "14"),
        ])
        .unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.trial.days, 14);
    }

    #[test]
    fn production_environment_switches_the_flag() {
        let config = load_with(&[("FLIGHTDECK__SERVER__ENVIRONMENT", "production")]).unwrap();
        assert!(config.is_production());
    }
}
