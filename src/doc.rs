use crate::routes::{
    auth::models::*, auth::*, invitations::models::*, invitations::*, wishes::models::*,
    wishes::*,
};
use crate::utils::invitations::models::*;
use crate::utils::wishes::models::*;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
info(title = "Wishlist", description = "Wishlists shared through email invitations", ),
paths(
post_register_user,
post_login_user,
post_anonymous_user,
post_logout_user,
post_refresh_user_token,
get_logged_in_user,
create_wish,
get_wish_list,
archive_one_wish,
create_invitation,
fetch_sent_invitations,
fetch_incoming_invitations,
fetch_accepted_invitations,
fetch_friends,
accept_incoming_invitation,
remove_incoming_invitation,
remove_outgoing_invitation,
),
components(schemas(
LoginCredentials,
RegisterCredentials,
LoggedInUser,
Wish,
AddWish,
AddWishResult,
Invitation,
InvitationStatus,
IncomingInvitation,
CreateInvitation,
CreateInvitationResult,
AcceptInvitation,
RemoveFriend,
RemoveSentInvitation
)),
tags((name = "auth"),(name = "wishes"),(name = "invitations"))
)]
pub struct ApiDoc;
