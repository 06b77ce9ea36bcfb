use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::serde::timestamp;
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, FromRow)]
pub struct Wish {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub description: String,
    pub link: String,
    pub is_archived: bool,
    #[serde(with = "timestamp")]
    #[schema(value_type = i64)]
    pub created_at: OffsetDateTime,
}
