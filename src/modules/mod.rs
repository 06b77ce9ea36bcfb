use self::database::get_postgres_pool;
use self::store::{DynStore, MemoryStore, PgStore};
use crate::config::app::ApplicationSettings;
use crate::config::environment::Environment;
use crate::config::get_config;
use crate::config::tokens::JwtSettings;
use crate::utils::auth::models::CookieSecurity;
use axum::extract::FromRef;
use core::fmt::Display;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

pub mod database;
pub mod store;

pub struct Modules {
    pub app: ApplicationSettings,
    store: DynStore,
    store_kind: &'static str,
    jwt: JwtSettings,
    environment: Environment,
}

impl Modules {
    pub async fn load_from_settings() -> anyhow::Result<Self> {
        let settings = get_config()?;
        info!("Settings loaded");
        info!("Loading modules");
        let (store, store_kind): (DynStore, _) = match &settings.postgres {
            Some(postgres) => {
                let pool = get_postgres_pool(postgres).await?;
                (Arc::new(PgStore::new(pool)), "postgres store")
            }
            None => (Arc::new(MemoryStore::new()), "in-memory store"),
        };
        info!("Modules loaded");
        Ok(Self {
            store,
            store_kind,
            app: settings.app,
            jwt: settings.jwt,
            environment: settings.environment,
        })
    }

    pub fn use_custom(
        store: DynStore,
        addr: SocketAddr,
        access: &str,
        refresh: &str,
        environment: Environment,
    ) -> Self {
        Self {
            store,
            store_kind: "custom store",
            app: ApplicationSettings::new(addr),
            jwt: JwtSettings::new(access, refresh),
            environment,
        }
    }

    pub fn state(&self) -> AppState {
        AppState::new(self)
    }
}

#[derive(Clone, FromRef)]
pub struct AppState {
    pub environment: Environment,
    pub store: DynStore,
    pub jwt: JwtSettings,
    pub cookie_security: CookieSecurity,
}

impl AppState {
    fn new(modules: &Modules) -> Self {
        Self {
            environment: modules.environment.clone(),
            store: modules.store.clone(),
            jwt: modules.jwt.clone(),
            cookie_security: CookieSecurity(!modules.environment.is_dev()),
        }
    }
}

impl Display for Modules {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}, token secrets", self.store_kind)
    }
}
