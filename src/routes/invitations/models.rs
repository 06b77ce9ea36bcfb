use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Deserialize, Serialize, Debug, ToSchema)]
pub struct CreateInvitation {
    pub email: String,
}

#[derive(Deserialize, Serialize, Debug, ToSchema)]
pub struct CreateInvitationResult {
    pub invitation_id: Uuid,
}

#[derive(Deserialize, Serialize, Debug, ToSchema)]
pub struct AcceptInvitation {
    pub from_user_id: Uuid,
}

#[derive(Deserialize, Serialize, Debug, ToSchema)]
pub struct RemoveFriend {
    pub friend_user_id: Uuid,
}

#[derive(Deserialize, Serialize, Debug, ToSchema)]
pub struct RemoveSentInvitation {
    pub email: String,
}
