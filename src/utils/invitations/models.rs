use anyhow::anyhow;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use time::serde::timestamp;
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Removed,
}

impl InvitationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvitationStatus::Pending => "pending",
            InvitationStatus::Accepted => "accepted",
            InvitationStatus::Removed => "removed",
        }
    }
}

impl Display for InvitationStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InvitationStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "removed" => Ok(Self::Removed),
            other => Err(anyhow!("Unknown invitation status `{other}`")),
        }
    }
}

/// One row of the invitation history between a sender and a recipient email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Invitation {
    pub id: Uuid,
    pub from_user_id: Uuid,
    pub email: String,
    pub status: InvitationStatus,
    #[serde(with = "timestamp")]
    #[schema(value_type = i64)]
    pub created_at: OffsetDateTime,
}

/// Sender email shown next to an incoming invitation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SenderEmail {
    Known(String),
    Unknown,
}

impl SenderEmail {
    pub const UNKNOWN: &'static str = "Unknown";

    pub fn as_str(&self) -> &str {
        match self {
            SenderEmail::Known(email) => email,
            SenderEmail::Unknown => Self::UNKNOWN,
        }
    }
}

impl From<Option<String>> for SenderEmail {
    fn from(email: Option<String>) -> Self {
        email.map_or(SenderEmail::Unknown, SenderEmail::Known)
    }
}

impl Serialize for SenderEmail {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SenderEmail {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let email = String::deserialize(deserializer)?;
        if email == Self::UNKNOWN {
            return Ok(SenderEmail::Unknown);
        }
        Ok(SenderEmail::Known(email))
    }
}

/// Latest invitation from one sender, with the sender's email attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct IncomingInvitation {
    #[serde(flatten)]
    pub invitation: Invitation,
    #[schema(value_type = String)]
    pub from_user_email: SenderEmail,
}
