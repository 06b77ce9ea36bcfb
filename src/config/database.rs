use crate::config::{get_env, try_get_env};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use tracing::info;

pub const NAME_POSTGRES: &str = "DATABASE_URL";

#[derive(Deserialize, Clone)]
pub struct DatabaseFieldsModel {
    username: Option<String>,
    password: Option<String>,
    port: Option<u16>,
    host: Option<String>,
    database_name: Option<String>,
}

impl DatabaseFieldsModel {
    fn to_fields(self) -> DatabaseFields {
        let username = self.username.unwrap_or("postgres".to_string());
        let password = self.password.unwrap_or("".to_string());
        let port = self.port.unwrap_or(5432);
        let host = self.host.unwrap_or("localhost".to_string());
        let database_name = self.database_name.unwrap_or("wishlist".to_string());

        DatabaseFields::new(username, password, port, host, database_name)
    }
}

#[derive(Clone)]
pub struct DatabaseFields {
    username: String,
    password: Secret<String>,
    port: u16,
    host: String,
    database_name: String,
}

impl DatabaseFields {
    fn new(
        username: String,
        password: String,
        port: u16,
        host: String,
        database_name: String,
    ) -> Self {
        Self {
            username,
            password: Secret::new(password),
            port,
            host,
            database_name,
        }
    }

    fn compose(&self, scheme: &str) -> String {
        format!(
            "{scheme}://{}:{}@{}:{}/{}",
            self.username,
            self.password.expose_secret(),
            self.host,
            self.port,
            self.database_name
        )
    }
}

pub trait ConnectionPrep {
    const SCHEME: &'static str;

    fn compose_database_url(&self) -> Option<String>;
    fn get_database_url(&self) -> Option<String>;
    fn env_database_url() -> Option<String>;

    /// Composed fields win over an explicit url, which wins over the environment.
    fn get_connection_string(&self) -> Option<String> {
        let info = format!("url for {}", Self::SCHEME);
        if let Some(url) = self.compose_database_url() {
            info!("Using composed {info}");
            return Some(url);
        }
        if let Some(url) = self.get_database_url() {
            info!("Using field {info}");
            return Some(url);
        }
        let url = Self::env_database_url()?;
        info!("Using env {info}");
        Some(url)
    }
}

#[derive(Deserialize, Clone)]
pub struct PostgresSettingsModel {
    database_url: Option<String>,
    fields: Option<DatabaseFieldsModel>,
    is_migrating: Option<bool>,
}

impl ConnectionPrep for PostgresSettingsModel {
    const SCHEME: &'static str = "postgresql";

    fn compose_database_url(&self) -> Option<String> {
        let fields = self.fields.clone()?;
        Some(fields.to_fields().compose(Self::SCHEME))
    }

    fn get_database_url(&self) -> Option<String> {
        self.database_url.clone()
    }

    fn env_database_url() -> Option<String> {
        try_get_env(NAME_POSTGRES)
    }
}

impl PostgresSettingsModel {
    /// `None` when no connection info is available at all.
    pub fn to_settings(self) -> Option<PostgresSettings> {
        let database_url = self.get_connection_string()?;
        Some(PostgresSettings {
            database_url: Secret::new(database_url),
            is_migrating: self.is_migrating.unwrap_or(false),
        })
    }
}

#[derive(Clone)]
pub struct PostgresSettings {
    pub database_url: Secret<String>,
    pub is_migrating: bool,
}

impl PostgresSettings {
    pub fn from_env() -> Self {
        Self {
            database_url: Secret::new(get_env(NAME_POSTGRES)),
            is_migrating: true,
        }
    }

    /// Settings taken purely from `DATABASE_URL`, if set.
    pub fn try_from_env() -> Option<Self> {
        Some(Self {
            database_url: Secret::new(try_get_env(NAME_POSTGRES)?),
            is_migrating: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composes_url_from_fields() {
        let model = PostgresSettingsModel {
            database_url: Some("postgresql://ignored".to_string()),
            fields: Some(DatabaseFieldsModel {
                username: Some("wish".to_string()),
                password: Some("list".to_string()),
                port: None,
                host: Some("db".to_string()),
                database_name: None,
            }),
            is_migrating: Some(true),
        };

        let settings = model.to_settings().unwrap();
        assert_eq!(
            settings.database_url.expose_secret(),
            "postgresql://wish:list@db:5432/wishlist"
        );
        assert!(settings.is_migrating);
    }

    #[test]
    fn explicit_url_is_used_without_fields() {
        let model = PostgresSettingsModel {
            database_url: Some("postgresql://localhost/wishes".to_string()),
            fields: None,
            is_migrating: None,
        };

        let settings = model.to_settings().unwrap();
        assert_eq!(
            settings.database_url.expose_secret(),
            "postgresql://localhost/wishes"
        );
        assert!(!settings.is_migrating);
    }
}
