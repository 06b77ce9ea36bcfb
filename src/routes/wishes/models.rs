use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct AddWish {
    pub description: String,
    pub link: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct AddWishResult {
    pub wish_id: Uuid,
}

#[derive(Serialize, Deserialize, IntoParams, Debug, Default)]
#[into_params(parameter_in = Query)]
pub struct GetWishesQuery {
    /// Owner of the wishlist, the caller when omitted
    pub user_id: Option<Uuid>,
}
