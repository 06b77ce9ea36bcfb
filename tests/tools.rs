#![allow(dead_code)]

use nanoid::nanoid;
use reqwest::Client;
use secrecy::SecretString;
use serde_json::json;
use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;
use uuid::Uuid;
use wishlist::app;
use wishlist::config::environment::Environment;
use wishlist::modules::store::{DynStore, MemoryStore};
use wishlist::modules::Modules;
use wishlist::utils::auth::try_register_user;

pub const PASSWORD: &str = "#very#_#strong#_#pass#";

async fn spawn_app(store: DynStore) -> SocketAddr {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).unwrap();
    let addr = listener.local_addr().unwrap();

    let modules = Modules::use_custom(store, addr, "SECRET", "VERY_SECRET", Environment::Development);
    let router = app(&modules);

    tokio::spawn(async move {
        axum::Server::from_tcp(listener)
            .unwrap()
            .serve(router.into_make_service())
            .await
            .unwrap()
    });

    addr
}

pub struct AppData {
    pub addr: SocketAddr,
    pub store: DynStore,
}

impl AppData {
    pub async fn new() -> Self {
        let store: DynStore = Arc::new(MemoryStore::new());
        Self {
            addr: spawn_app(store.clone()).await,
            store,
        }
    }

    pub fn client(&self) -> Client {
        Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to build reqwest client")
    }

    pub fn api(&self, uri: &str) -> String {
        format!("http://{}{uri}", self.addr)
    }

    /// Registers a fresh account and returns a client signed in as it.
    pub async fn signed_in(&self, email: &str) -> (Client, Uuid) {
        let client = self.client();
        let res = client
            .post(self.api("/auth/register"))
            .json(&json!({ "email": email, "password": PASSWORD }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = res.json().await.unwrap();
        let user_id = body["user_id"].as_str().unwrap().parse().unwrap();
        (client, user_id)
    }
}

pub fn memory_store() -> DynStore {
    Arc::new(MemoryStore::new())
}

pub fn random_email() -> String {
    format!("{}@x.com", nanoid!(10).to_lowercase())
}

pub async fn register(store: &DynStore, email: &str) -> Uuid {
    try_register_user(&**store, email, SecretString::new(PASSWORD.to_string()))
        .await
        .unwrap()
}
