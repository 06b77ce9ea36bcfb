use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Error, Debug)]
pub enum WishError {
    #[error("Not authenticated")]
    Unauthenticated,
    #[error("Wish not found")]
    NotFound,
    #[error("Not authorized")]
    NotAuthorized,
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationErrors),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl IntoResponse for WishError {
    fn into_response(self) -> axum::response::Response {
        let status_code = match &self {
            WishError::Unauthenticated => StatusCode::UNAUTHORIZED,
            WishError::NotFound => StatusCode::NOT_FOUND,
            WishError::NotAuthorized => StatusCode::FORBIDDEN,
            WishError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            WishError::Unexpected(e) => {
                tracing::error!("Internal server error: {e:?}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let info = match self {
            WishError::Unexpected(_) => "Unexpected server error".to_string(),
            _ => self.to_string(),
        };

        (status_code, Json(json!({ "error_info": info }))).into_response()
    }
}
