pub mod models;

use crate::modules::store::DynStore;
use crate::modules::AppState;
use crate::routes::invitations::models::{
    AcceptInvitation, CreateInvitation, CreateInvitationResult, RemoveFriend,
    RemoveSentInvitation,
};
use crate::utils::auth::models::Claims;
use crate::utils::invitations::errors::InvitationError;
use crate::utils::invitations::models::{IncomingInvitation, Invitation};
use crate::utils::invitations::{
    accept_invitation, get_accepted_invitations, get_friends, get_incoming_invitations,
    get_sent_invitations, remove_friend, remove_sent_invitation, send_invitation,
};
use axum::extract::State;
use axum::routing::{get, patch};
use axum::{debug_handler, Json, Router};
use http::StatusCode;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(fetch_sent_invitations).post(create_invitation))
        .route("/incoming", get(fetch_incoming_invitations))
        .route("/accepted", get(fetch_accepted_invitations))
        .route("/friends", get(fetch_friends))
        .route("/accept", patch(accept_incoming_invitation))
        .route("/remove", patch(remove_incoming_invitation))
        .route("/remove-sent", patch(remove_outgoing_invitation))
}

/// Invite a user by email to view the caller's wishlist
#[debug_handler(state = AppState)]
#[utoipa::path(post, path = "/invitations", tag = "invitations", request_body = CreateInvitation, responses((status = 200, body = CreateInvitationResult, description = "Created invitation"), (status = 422, description = "Invalid email")))]
pub async fn create_invitation(
    claims: Claims,
    State(store): State<DynStore>,
    Json(body): Json<CreateInvitation>,
) -> Result<Json<CreateInvitationResult>, InvitationError> {
    let invitation_id = send_invitation(&*store, claims.user_id, body.email.trim()).await?;
    Ok(Json(CreateInvitationResult { invitation_id }))
}

/// Every invitation the caller has sent
#[debug_handler(state = AppState)]
#[utoipa::path(get, path = "/invitations", tag = "invitations", responses((status = 200, body = [Invitation], description = "Sent invitations, oldest first")))]
pub async fn fetch_sent_invitations(
    claims: Claims,
    State(store): State<DynStore>,
) -> Result<Json<Vec<Invitation>>, InvitationError> {
    Ok(Json(get_sent_invitations(&*store, claims.user_id).await?))
}

/// Latest invitation of each sender addressed to the caller
#[debug_handler(state = AppState)]
#[utoipa::path(get, path = "/invitations/incoming", tag = "invitations", responses((status = 200, body = [IncomingInvitation], description = "One invitation per sender"), (status = 400, description = "No email associated with account")))]
pub async fn fetch_incoming_invitations(
    claims: Claims,
    State(store): State<DynStore>,
) -> Result<Json<Vec<IncomingInvitation>>, InvitationError> {
    Ok(Json(get_incoming_invitations(&*store, claims.user_id).await?))
}

/// Senders sharing their wishlist with the caller
#[debug_handler(state = AppState)]
#[utoipa::path(get, path = "/invitations/accepted", tag = "invitations", responses((status = 200, body = [IncomingInvitation], description = "Accepted invitations, one per sender"), (status = 400, description = "No email associated with account")))]
pub async fn fetch_accepted_invitations(
    claims: Claims,
    State(store): State<DynStore>,
) -> Result<Json<Vec<IncomingInvitation>>, InvitationError> {
    Ok(Json(get_accepted_invitations(&*store, claims.user_id).await?))
}

/// Recipients the caller currently shares their wishlist with
#[debug_handler(state = AppState)]
#[utoipa::path(get, path = "/invitations/friends", tag = "invitations", responses((status = 200, body = [Invitation], description = "Accepted invitations, one per recipient")))]
pub async fn fetch_friends(
    claims: Claims,
    State(store): State<DynStore>,
) -> Result<Json<Vec<Invitation>>, InvitationError> {
    Ok(Json(get_friends(&*store, claims.user_id).await?))
}

/// Accept the latest pending invitation from a sender
#[debug_handler(state = AppState)]
#[utoipa::path(patch, path = "/invitations/accept", tag = "invitations", request_body = AcceptInvitation, responses((status = 200, description = "Accepted invitation"), (status = 404, description = "No pending invitation")))]
pub async fn accept_incoming_invitation(
    claims: Claims,
    State(store): State<DynStore>,
    Json(body): Json<AcceptInvitation>,
) -> Result<StatusCode, InvitationError> {
    accept_invitation(&*store, claims.user_id, body.from_user_id).await?;
    Ok(StatusCode::OK)
}

/// Stop seeing a friend's wishlist
#[debug_handler(state = AppState)]
#[utoipa::path(patch, path = "/invitations/remove", tag = "invitations", request_body = RemoveFriend, responses((status = 200, description = "Removed friend"), (status = 404, description = "No accepted invitation")))]
pub async fn remove_incoming_invitation(
    claims: Claims,
    State(store): State<DynStore>,
    Json(body): Json<RemoveFriend>,
) -> Result<StatusCode, InvitationError> {
    remove_friend(&*store, claims.user_id, body.friend_user_id).await?;
    Ok(StatusCode::OK)
}

/// Stop sharing the caller's wishlist with an email
#[debug_handler(state = AppState)]
#[utoipa::path(patch, path = "/invitations/remove-sent", tag = "invitations", request_body = RemoveSentInvitation, responses((status = 200, description = "Removed friend"), (status = 404, description = "No accepted invitation")))]
pub async fn remove_outgoing_invitation(
    claims: Claims,
    State(store): State<DynStore>,
    Json(body): Json<RemoveSentInvitation>,
) -> Result<StatusCode, InvitationError> {
    remove_sent_invitation(&*store, claims.user_id, body.email.trim()).await?;
    Ok(StatusCode::OK)
}
