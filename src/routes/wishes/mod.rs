pub mod models;

use crate::modules::store::DynStore;
use crate::modules::AppState;
use crate::routes::wishes::models::{AddWish, AddWishResult, GetWishesQuery};
use crate::utils::auth::models::Claims;
use crate::utils::wishes::errors::WishError;
use crate::utils::wishes::models::Wish;
use crate::utils::wishes::{add_wish, archive_wish, get_wishes};
use axum::extract::{Path, Query, State};
use axum::routing::{get, patch};
use axum::{debug_handler, Json, Router};
use http::StatusCode;
use uuid::Uuid;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_wish_list).post(create_wish))
        .route("/:id/archive", patch(archive_one_wish))
}

/// Add wish
#[debug_handler(state = AppState)]
#[utoipa::path(post, path = "/wishes", tag = "wishes", request_body = AddWish, responses((status = 200, body = AddWishResult, description = "Created wish"), (status = 422, description = "Empty description or invalid link")))]
pub async fn create_wish(
    claims: Claims,
    State(store): State<DynStore>,
    Json(body): Json<AddWish>,
) -> Result<Json<AddWishResult>, WishError> {
    let wish_id = add_wish(&*store, claims.user_id, &body.description, &body.link).await?;
    Ok(Json(AddWishResult { wish_id }))
}

/// Get wishlist
#[debug_handler(state = AppState)]
#[utoipa::path(get, path = "/wishes", tag = "wishes", params(GetWishesQuery), responses((status = 200, body = [Wish], description = "Non-archived wishes"), (status = 403, description = "Wishlist not shared with the caller")))]
pub async fn get_wish_list(
    claims: Claims,
    State(store): State<DynStore>,
    Query(query): Query<GetWishesQuery>,
) -> Result<Json<Vec<Wish>>, WishError> {
    let wishes = get_wishes(&*store, claims.user_id, query.user_id).await?;
    Ok(Json(wishes))
}

/// Archive wish
#[debug_handler(state = AppState)]
#[utoipa::path(patch, path = "/wishes/{id}/archive", tag = "wishes", params(("id" = Uuid, Path, description = "Wish id")), responses((status = 200, description = "Archived wish"), (status = 403, description = "Not the owner"), (status = 404, description = "Wish not found")))]
pub async fn archive_one_wish(
    claims: Claims,
    State(store): State<DynStore>,
    Path(wish_id): Path<Uuid>,
) -> Result<StatusCode, WishError> {
    archive_wish(&*store, claims.user_id, wish_id).await?;
    Ok(StatusCode::OK)
}
