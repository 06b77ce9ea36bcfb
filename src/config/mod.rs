use crate::config::app::{ApplicationSettings, ApplicationSettingsModel, NAME_PORT};
use crate::config::database::{PostgresSettings, PostgresSettingsModel, NAME_POSTGRES};
use crate::config::environment::Environment;
use crate::config::tokens::{
    JwtSettings, JwtSettingsModel, NAME_ACCESS_SECRET, NAME_REFRESH_SECRET,
};
use config::{Config, ConfigError};
use secrecy::Secret;
use serde::Deserialize;
use std::env;
use tracing::{error, warn};

pub mod app;
pub mod database;
pub mod environment;
pub mod tokens;

const CONFIG_DIR: &str = "configuration";
const CONFIG_FILE_NAME: &str = "settings.toml";

#[derive(Deserialize)]
pub struct SettingsModel {
    pub app: Option<ApplicationSettingsModel>,
    pub jwt: Option<JwtSettingsModel>,
    pub postgres: Option<PostgresSettingsModel>,
}

impl SettingsModel {
    fn parse() -> Result<Self, ConfigError> {
        let base_path = env::current_dir().expect("Failed to determine the current directory");
        let config_dir = base_path.join(CONFIG_DIR);
        let settings = Config::builder()
            .add_source(config::File::from(config_dir.join(CONFIG_FILE_NAME)))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            );
        settings.build()?.try_deserialize()
    }
}

#[derive(Clone)]
pub struct Settings {
    pub app: ApplicationSettings,
    pub jwt: JwtSettings,
    /// `None` selects the in-memory store.
    pub postgres: Option<PostgresSettings>,
    pub environment: Environment,
}

impl Settings {
    fn dev(model: SettingsModel) -> Self {
        let app = model.app.map_or_else(
            || {
                warn!("Using default `app` settings!");
                ApplicationSettings::default()
            },
            |x| x.to_settings(),
        );

        let jwt = model.jwt.map_or_else(
            || {
                warn!("Using default `jwt` settings!");
                JwtSettings::default()
            },
            |x| x.to_settings(),
        );

        let postgres = model.postgres.map_or_else(
            || {
                warn!("Using default `postgres` settings (env url)!");
                PostgresSettings::try_from_env()
            },
            |x| x.to_settings(),
        );
        if postgres.is_none() {
            warn!("No database url provided, falling back to the in-memory store!");
        }

        Self {
            app,
            jwt,
            postgres,
            environment: Environment::Development,
        }
    }

    fn prod() -> Self {
        Self {
            app: ApplicationSettings::from_env(),
            jwt: JwtSettings::from_env(),
            postgres: Some(PostgresSettings::from_env()),
            environment: Environment::Production,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app: ApplicationSettings::default(),
            jwt: JwtSettings::default(),
            postgres: PostgresSettings::try_from_env(),
            environment: Environment::default(),
        }
    }
}

pub fn get_config() -> Result<Settings, anyhow::Error> {
    let environment: Environment = env::var("APP_ENVIRONMENT")
        .map_or(Ok(Environment::Development), Environment::try_from)
        .map_err(anyhow::Error::msg)?;

    match environment {
        Environment::Development => {
            let res = SettingsModel::parse().map_err(|e| {
                error!("{e}\n - check {CONFIG_DIR}/{CONFIG_FILE_NAME}, reference at README.md")
            });
            if let Ok(model) = res {
                return Ok(Settings::dev(model));
            }
            warn!("Using default configuration!");
            Ok(Settings::default())
        }

        Environment::Production => {
            let missing = missing_env();
            if !missing.is_empty() {
                anyhow::bail!("Provide missing environment variables {missing:?}");
            }
            Ok(Settings::prod())
        }
    }
}

pub fn try_get_env(name: &str) -> Option<String> {
    env::var(name).ok()
}

pub fn get_env(name: &str) -> String {
    env::var(name).unwrap_or_else(|_| panic!("Missing {name}"))
}

pub fn get_secret_env(name: &str) -> Secret<String> {
    Secret::from(get_env(name))
}

fn missing_env() -> Vec<&'static str> {
    let required_variables = [
        NAME_PORT,
        NAME_POSTGRES,
        NAME_ACCESS_SECRET,
        NAME_REFRESH_SECRET,
    ];
    required_variables
        .into_iter()
        .filter(|name| try_get_env(name).is_none())
        .collect()
}
