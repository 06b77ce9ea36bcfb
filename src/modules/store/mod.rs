//! Table storage behind the services.
//!
//! Every method is a single atomic operation against the backend. Services
//! compose them into bounded read-then-write sequences.

pub mod memory;
pub mod postgres;

use crate::utils::auth::models::{User, UserCredentials};
use crate::utils::invitations::models::{Invitation, InvitationStatus};
use crate::utils::wishes::models::Wish;
use axum::async_trait;
use std::sync::Arc;
use time::OffsetDateTime;
use uuid::Uuid;

pub use memory::MemoryStore;
pub use postgres::PgStore;

pub type DynStore = Arc<dyn Store>;

#[async_trait]
pub trait Store: Send + Sync {
    // Users

    /// Returns `None` when the email is already taken.
    async fn create_user(
        &self,
        email: Option<&str>,
        password_hash: Option<&str>,
    ) -> anyhow::Result<Option<Uuid>>;

    async fn get_user(&self, user_id: Uuid) -> anyhow::Result<Option<User>>;

    async fn get_credentials(&self, email: &str) -> anyhow::Result<Option<UserCredentials>>;

    // Revoked tokens

    async fn blacklist_token(&self, jti: Uuid, expires_at: OffsetDateTime) -> anyhow::Result<()>;

    async fn is_token_blacklisted(&self, jti: Uuid) -> anyhow::Result<bool>;

    // Wishes

    async fn insert_wish(&self, owner_id: Uuid, description: &str, link: &str)
        -> anyhow::Result<Wish>;

    async fn get_wish(&self, wish_id: Uuid) -> anyhow::Result<Option<Wish>>;

    /// Non-archived wishes of `owner_id` in insertion order.
    async fn list_wishes(&self, owner_id: Uuid) -> anyhow::Result<Vec<Wish>>;

    async fn archive_wish(&self, wish_id: Uuid) -> anyhow::Result<()>;

    // Invitations
    //
    // Listings are in insertion order.

    async fn insert_invitation(&self, from_user_id: Uuid, email: &str)
        -> anyhow::Result<Invitation>;

    async fn invitations_from(&self, from_user_id: Uuid) -> anyhow::Result<Vec<Invitation>>;

    async fn invitations_to(&self, email: &str) -> anyhow::Result<Vec<Invitation>>;

    async fn invitations_between(
        &self,
        from_user_id: Uuid,
        email: &str,
    ) -> anyhow::Result<Vec<Invitation>>;

    /// Moves the invitation to `to` if it is currently in `from` or already in `to`.
    /// Returns `false` when the row is missing or has moved to another status.
    async fn set_invitation_status(
        &self,
        invitation_id: Uuid,
        from: InvitationStatus,
        to: InvitationStatus,
    ) -> anyhow::Result<bool>;
}
