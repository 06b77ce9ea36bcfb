use crate::utils::auth::models::User;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

impl LoginCredentials {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct RegisterCredentials {
    pub email: String,
    pub password: String,
}

impl RegisterCredentials {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// The signed-in user as seen by the client.
#[derive(Serialize, Deserialize, ToSchema, Debug, PartialEq)]
pub struct LoggedInUser {
    pub user_id: Uuid,
    pub email: Option<String>,
}

impl From<User> for LoggedInUser {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            email: user.email,
        }
    }
}
