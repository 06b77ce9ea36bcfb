use crate::modules::store::Store;
use crate::utils::auth::models::{User, UserCredentials};
use crate::utils::invitations::models::{Invitation, InvitationStatus};
use crate::utils::wishes::models::Wish;
use anyhow::Context;
use axum::async_trait;
use sqlx::{query, query_as, query_scalar, FromRow, PgPool};
use time::OffsetDateTime;
use tracing::trace;
use uuid::Uuid;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct QInvitation {
    id: Uuid,
    from_user_id: Uuid,
    email: String,
    status: String,
    created_at: OffsetDateTime,
}

impl TryFrom<QInvitation> for Invitation {
    type Error = anyhow::Error;

    fn try_from(row: QInvitation) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            from_user_id: row.from_user_id,
            email: row.email,
            status: row.status.parse()?,
            created_at: row.created_at,
        })
    }
}

fn into_invitations(rows: Vec<QInvitation>) -> anyhow::Result<Vec<Invitation>> {
    rows.into_iter().map(Invitation::try_from).collect()
}

#[async_trait]
impl Store for PgStore {
    async fn create_user(
        &self,
        email: Option<&str>,
        password_hash: Option<&str>,
    ) -> anyhow::Result<Option<Uuid>> {
        let user_id = query_scalar::<_, Uuid>(
            r#"
                INSERT INTO users (email, password)
                VALUES ($1, $2)
                ON CONFLICT (email) DO NOTHING
                RETURNING id
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to create user")?;

        Ok(user_id)
    }

    async fn get_user(&self, user_id: Uuid) -> anyhow::Result<Option<User>> {
        let user = query_as::<_, User>(
            r#"
                SELECT id, email FROM users
                WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch user")?;

        Ok(user)
    }

    async fn get_credentials(&self, email: &str) -> anyhow::Result<Option<UserCredentials>> {
        let credentials = query_as::<_, UserCredentials>(
            r#"
                SELECT id AS user_id, password FROM users
                WHERE email = $1 AND password IS NOT NULL
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch credentials")?;

        Ok(credentials)
    }

    async fn blacklist_token(&self, jti: Uuid, expires_at: OffsetDateTime) -> anyhow::Result<()> {
        let pruned = query(
            r#"
                DELETE FROM jwt_blacklist
                WHERE expiry < now()
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to prune token blacklist")?
        .rows_affected();
        trace!("Pruned {pruned} expired blacklisted tokens");

        query(
            r#"
                INSERT INTO jwt_blacklist (token_id, expiry)
                VALUES ($1, $2)
                ON CONFLICT (token_id) DO NOTHING
            "#,
        )
        .bind(jti)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .context("Failed to blacklist token")?;

        Ok(())
    }

    async fn is_token_blacklisted(&self, jti: Uuid) -> anyhow::Result<bool> {
        let is_blacklisted = query(
            r#"
                SELECT token_id FROM jwt_blacklist
                WHERE token_id = $1
            "#,
        )
        .bind(jti)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to check token blacklist")?
        .is_some();

        Ok(is_blacklisted)
    }

    async fn insert_wish(
        &self,
        owner_id: Uuid,
        description: &str,
        link: &str,
    ) -> anyhow::Result<Wish> {
        let wish = query_as::<_, Wish>(
            r#"
                INSERT INTO wishes (owner_id, description, link)
                VALUES ($1, $2, $3)
                RETURNING id, owner_id, description, link, is_archived, created_at
            "#,
        )
        .bind(owner_id)
        .bind(description)
        .bind(link)
        .fetch_one(&self.pool)
        .await
        .context("Failed to insert wish")?;

        trace!("Created wish {}", wish.id);
        Ok(wish)
    }

    async fn get_wish(&self, wish_id: Uuid) -> anyhow::Result<Option<Wish>> {
        let wish = query_as::<_, Wish>(
            r#"
                SELECT id, owner_id, description, link, is_archived, created_at FROM wishes
                WHERE id = $1
            "#,
        )
        .bind(wish_id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch wish")?;

        Ok(wish)
    }

    async fn list_wishes(&self, owner_id: Uuid) -> anyhow::Result<Vec<Wish>> {
        let wishes = query_as::<_, Wish>(
            r#"
                SELECT id, owner_id, description, link, is_archived, created_at FROM wishes
                WHERE owner_id = $1 AND is_archived = FALSE
                ORDER BY seq
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list wishes")?;

        trace!("Got {} wishes of {owner_id}", wishes.len());
        Ok(wishes)
    }

    async fn archive_wish(&self, wish_id: Uuid) -> anyhow::Result<()> {
        query(
            r#"
                UPDATE wishes SET is_archived = TRUE
                WHERE id = $1
            "#,
        )
        .bind(wish_id)
        .execute(&self.pool)
        .await
        .context("Failed to archive wish")?;

        Ok(())
    }

    async fn insert_invitation(
        &self,
        from_user_id: Uuid,
        email: &str,
    ) -> anyhow::Result<Invitation> {
        let row = query_as::<_, QInvitation>(
            r#"
                INSERT INTO invitations (from_user_id, email, status)
                VALUES ($1, $2, $3)
                RETURNING id, from_user_id, email, status, created_at
            "#,
        )
        .bind(from_user_id)
        .bind(email)
        .bind(InvitationStatus::Pending.as_str())
        .fetch_one(&self.pool)
        .await
        .context("Failed to insert invitation")?;

        trace!("Created invitation {} from {from_user_id}", row.id);
        row.try_into()
    }

    async fn invitations_from(&self, from_user_id: Uuid) -> anyhow::Result<Vec<Invitation>> {
        let rows = query_as::<_, QInvitation>(
            r#"
                SELECT id, from_user_id, email, status, created_at FROM invitations
                WHERE from_user_id = $1
                ORDER BY seq
            "#,
        )
        .bind(from_user_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list sent invitations")?;

        trace!("Got {} invitations sent by {from_user_id}", rows.len());
        into_invitations(rows)
    }

    async fn invitations_to(&self, email: &str) -> anyhow::Result<Vec<Invitation>> {
        let rows = query_as::<_, QInvitation>(
            r#"
                SELECT id, from_user_id, email, status, created_at FROM invitations
                WHERE email = $1
                ORDER BY seq
            "#,
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list received invitations")?;

        trace!("Got {} invitations sent to {email}", rows.len());
        into_invitations(rows)
    }

    async fn invitations_between(
        &self,
        from_user_id: Uuid,
        email: &str,
    ) -> anyhow::Result<Vec<Invitation>> {
        let rows = query_as::<_, QInvitation>(
            r#"
                SELECT id, from_user_id, email, status, created_at FROM invitations
                WHERE from_user_id = $1 AND email = $2
                ORDER BY seq
            "#,
        )
        .bind(from_user_id)
        .bind(email)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list invitation history")?;

        into_invitations(rows)
    }

    async fn set_invitation_status(
        &self,
        invitation_id: Uuid,
        from: InvitationStatus,
        to: InvitationStatus,
    ) -> anyhow::Result<bool> {
        let affected = query(
            r#"
                UPDATE invitations SET status = $3
                WHERE id = $1 AND (status = $2 OR status = $3)
            "#,
        )
        .bind(invitation_id)
        .bind(from.as_str())
        .bind(to.as_str())
        .execute(&self.pool)
        .await
        .context("Failed to update invitation status")?
        .rows_affected();

        trace!("Invitation {invitation_id}: {from} -> {to} ({affected} rows)");
        Ok(affected == 1)
    }
}
