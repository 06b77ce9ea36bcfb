use crate::modules::store::Store;
use crate::utils::auth::models::{User, UserCredentials};
use crate::utils::invitations::models::{Invitation, InvitationStatus};
use crate::utils::wishes::models::Wish;
use axum::async_trait;
use std::collections::HashMap;
use time::{Duration, OffsetDateTime};
use tokio::sync::RwLock;
use tracing::trace;
use uuid::Uuid;

struct QUser {
    id: Uuid,
    email: Option<String>,
    password: Option<String>,
}

#[derive(Default)]
struct Tables {
    users: Vec<QUser>,
    wishes: Vec<Wish>,
    invitations: Vec<Invitation>,
    blacklist: HashMap<Uuid, OffsetDateTime>,
    last_created_at: Option<OffsetDateTime>,
}

impl Tables {
    /// Strictly increasing across inserts, at the microsecond precision Postgres keeps.
    fn next_timestamp(&mut self) -> OffsetDateTime {
        let now = OffsetDateTime::now_utc();
        let now = now - Duration::nanoseconds((now.nanosecond() % 1_000) as i64);
        let created_at = match self.last_created_at {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_created_at = Some(created_at);
        created_at
    }
}

/// Process-local store. Every call holds the table lock for its whole duration.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn filter_invitations(
    invitations: &[Invitation],
    predicate: impl Fn(&Invitation) -> bool,
) -> Vec<Invitation> {
    invitations.iter().filter(|i| predicate(i)).cloned().collect()
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_user(
        &self,
        email: Option<&str>,
        password_hash: Option<&str>,
    ) -> anyhow::Result<Option<Uuid>> {
        let mut tables = self.tables.write().await;
        if let Some(email) = email {
            if tables.users.iter().any(|u| u.email.as_deref() == Some(email)) {
                return Ok(None);
            }
        }
        let id = Uuid::new_v4();
        tables.users.push(QUser {
            id,
            email: email.map(str::to_owned),
            password: password_hash.map(str::to_owned),
        });
        Ok(Some(id))
    }

    async fn get_user(&self, user_id: Uuid) -> anyhow::Result<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|u| u.id == user_id)
            .map(|u| User {
                id: u.id,
                email: u.email.clone(),
            }))
    }

    async fn get_credentials(&self, email: &str) -> anyhow::Result<Option<UserCredentials>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find_map(|u| {
            if u.email.as_deref() != Some(email) {
                return None;
            }
            Some(UserCredentials {
                user_id: u.id,
                password: u.password.clone()?,
            })
        }))
    }

    async fn blacklist_token(&self, jti: Uuid, expires_at: OffsetDateTime) -> anyhow::Result<()> {
        let mut tables = self.tables.write().await;
        let now = OffsetDateTime::now_utc();
        tables.blacklist.retain(|_, expiry| *expiry >= now);
        tables.blacklist.insert(jti, expires_at);
        Ok(())
    }

    async fn is_token_blacklisted(&self, jti: Uuid) -> anyhow::Result<bool> {
        Ok(self.tables.read().await.blacklist.contains_key(&jti))
    }

    async fn insert_wish(
        &self,
        owner_id: Uuid,
        description: &str,
        link: &str,
    ) -> anyhow::Result<Wish> {
        let mut tables = self.tables.write().await;
        let wish = Wish {
            id: Uuid::new_v4(),
            owner_id,
            description: description.to_owned(),
            link: link.to_owned(),
            is_archived: false,
            created_at: tables.next_timestamp(),
        };
        tables.wishes.push(wish.clone());
        trace!("Created wish {}", wish.id);
        Ok(wish)
    }

    async fn get_wish(&self, wish_id: Uuid) -> anyhow::Result<Option<Wish>> {
        let tables = self.tables.read().await;
        Ok(tables.wishes.iter().find(|w| w.id == wish_id).cloned())
    }

    async fn list_wishes(&self, owner_id: Uuid) -> anyhow::Result<Vec<Wish>> {
        let tables = self.tables.read().await;
        Ok(tables
            .wishes
            .iter()
            .filter(|w| w.owner_id == owner_id && !w.is_archived)
            .cloned()
            .collect())
    }

    async fn archive_wish(&self, wish_id: Uuid) -> anyhow::Result<()> {
        let mut tables = self.tables.write().await;
        if let Some(wish) = tables.wishes.iter_mut().find(|w| w.id == wish_id) {
            wish.is_archived = true;
        }
        Ok(())
    }

    async fn insert_invitation(
        &self,
        from_user_id: Uuid,
        email: &str,
    ) -> anyhow::Result<Invitation> {
        let mut tables = self.tables.write().await;
        let invitation = Invitation {
            id: Uuid::new_v4(),
            from_user_id,
            email: email.to_owned(),
            status: InvitationStatus::Pending,
            created_at: tables.next_timestamp(),
        };
        tables.invitations.push(invitation.clone());
        trace!("Created invitation {} from {from_user_id}", invitation.id);
        Ok(invitation)
    }

    async fn invitations_from(&self, from_user_id: Uuid) -> anyhow::Result<Vec<Invitation>> {
        let tables = self.tables.read().await;
        Ok(filter_invitations(&tables.invitations, |i| {
            i.from_user_id == from_user_id
        }))
    }

    async fn invitations_to(&self, email: &str) -> anyhow::Result<Vec<Invitation>> {
        let tables = self.tables.read().await;
        Ok(filter_invitations(&tables.invitations, |i| i.email == email))
    }

    async fn invitations_between(
        &self,
        from_user_id: Uuid,
        email: &str,
    ) -> anyhow::Result<Vec<Invitation>> {
        let tables = self.tables.read().await;
        Ok(filter_invitations(&tables.invitations, |i| {
            i.from_user_id == from_user_id && i.email == email
        }))
    }

    async fn set_invitation_status(
        &self,
        invitation_id: Uuid,
        from: InvitationStatus,
        to: InvitationStatus,
    ) -> anyhow::Result<bool> {
        let mut tables = self.tables.write().await;
        let Some(invitation) = tables.invitations.iter_mut().find(|i| i.id == invitation_id) else {
            return Ok(false);
        };
        if invitation.status != from && invitation.status != to {
            return Ok(false);
        }
        invitation.status = to;
        trace!("Invitation {invitation_id}: {from} -> {to}");
        Ok(true)
    }
}
