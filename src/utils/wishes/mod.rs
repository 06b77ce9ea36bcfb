pub mod errors;
pub mod models;

use crate::modules::store::Store;
use crate::utils::invitations::is_friend;
use crate::validation::ValidatedWish;
use tracing::{debug, trace};
use uuid::Uuid;
use validator::Validate;

use self::errors::WishError;
use self::models::Wish;

pub async fn add_wish(
    store: &dyn Store,
    user_id: Uuid,
    description: &str,
    link: &str,
) -> Result<Uuid, WishError> {
    ValidatedWish::new(description, link).validate()?;
    store
        .get_user(user_id)
        .await?
        .ok_or(WishError::Unauthenticated)?;

    let wish = store.insert_wish(user_id, description, link).await?;
    debug!("User {user_id} added wish {}", wish.id);
    Ok(wish.id)
}

/// Non-archived wishes of `target_id` (the caller when `None`).
///
/// Reading someone else's list requires the owner's latest invitation to the
/// caller's email to be accepted.
pub async fn get_wishes(
    store: &dyn Store,
    user_id: Uuid,
    target_id: Option<Uuid>,
) -> Result<Vec<Wish>, WishError> {
    let caller = store
        .get_user(user_id)
        .await?
        .ok_or(WishError::Unauthenticated)?;
    let target_id = target_id.unwrap_or(user_id);

    if target_id != user_id {
        let Some(email) = caller.email else {
            trace!("User {user_id} has no email and cannot be shared with");
            return Err(WishError::NotAuthorized);
        };
        if !is_friend(store, target_id, &email).await? {
            trace!("{target_id} does not share wishes with {email}");
            return Err(WishError::NotAuthorized);
        }
    }

    let wishes = store.list_wishes(target_id).await?;
    debug!("User {user_id} fetched {} wishes of {target_id}", wishes.len());
    Ok(wishes)
}

/// Archiving is one-way; archiving an archived wish succeeds without change.
pub async fn archive_wish(
    store: &dyn Store,
    user_id: Uuid,
    wish_id: Uuid,
) -> Result<(), WishError> {
    let wish = store.get_wish(wish_id).await?.ok_or(WishError::NotFound)?;
    if wish.owner_id != user_id {
        trace!("User {user_id} tried to archive wish {wish_id} of {}", wish.owner_id);
        return Err(WishError::NotAuthorized);
    }

    if !wish.is_archived {
        store.archive_wish(wish_id).await?;
    }
    debug!("User {user_id} archived wish {wish_id}");
    Ok(())
}
