use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Error, Debug)]
pub enum InvitationError {
    #[error("Not authenticated")]
    Unauthenticated,
    #[error("No email associated with account")]
    NoEmailOnAccount,
    #[error("No pending invitation")]
    NoPendingInvitation,
    #[error("No accepted invitation")]
    NoAcceptedInvitation,
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationErrors),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl IntoResponse for InvitationError {
    fn into_response(self) -> axum::response::Response {
        let status_code = match &self {
            InvitationError::Unauthenticated => StatusCode::UNAUTHORIZED,
            InvitationError::NoEmailOnAccount => StatusCode::BAD_REQUEST,
            InvitationError::NoPendingInvitation => StatusCode::NOT_FOUND,
            InvitationError::NoAcceptedInvitation => StatusCode::NOT_FOUND,
            InvitationError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            InvitationError::Unexpected(e) => {
                tracing::error!("Internal server error: {e:?}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let info = match self {
            InvitationError::Unexpected(_) => "Unexpected server error".to_string(),
            _ => self.to_string(),
        };

        (status_code, Json(json!({ "error_info": info }))).into_response()
    }
}
