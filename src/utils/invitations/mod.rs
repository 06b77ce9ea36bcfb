pub mod errors;
pub mod models;
pub mod resolve;

use crate::modules::store::Store;
use crate::validation::ValidatedInvitation;
use tracing::{debug, trace, warn};
use uuid::Uuid;
use validator::Validate;

use self::errors::InvitationError;
use self::models::{IncomingInvitation, Invitation, InvitationStatus, SenderEmail};
use self::resolve::{latest_per_recipient, latest_per_sender, latest_with_status};

async fn ensure_user(store: &dyn Store, user_id: Uuid) -> Result<(), InvitationError> {
    store
        .get_user(user_id)
        .await?
        .ok_or(InvitationError::Unauthenticated)?;
    Ok(())
}

async fn caller_email(store: &dyn Store, user_id: Uuid) -> Result<String, InvitationError> {
    let user = store
        .get_user(user_id)
        .await?
        .ok_or(InvitationError::Unauthenticated)?;
    user.email.ok_or(InvitationError::NoEmailOnAccount)
}

async fn sender_email(store: &dyn Store, sender_id: Uuid) -> SenderEmail {
    match store.get_user(sender_id).await {
        Ok(user) => SenderEmail::from(user.and_then(|u| u.email)),
        Err(e) => {
            warn!("Failed to look up sender {sender_id}: {e:?}");
            SenderEmail::Unknown
        }
    }
}

async fn with_sender_emails(
    store: &dyn Store,
    invitations: Vec<Invitation>,
) -> Vec<IncomingInvitation> {
    let mut incoming = Vec::with_capacity(invitations.len());
    for invitation in invitations {
        let from_user_email = sender_email(store, invitation.from_user_id).await;
        incoming.push(IncomingInvitation {
            invitation,
            from_user_email,
        });
    }
    incoming
}

/// Moves `invitation` to `to`, failing with `missing` if it left `from` in the meantime.
async fn transition(
    store: &dyn Store,
    invitation: &Invitation,
    to: InvitationStatus,
    missing: InvitationError,
) -> Result<(), InvitationError> {
    if !store
        .set_invitation_status(invitation.id, invitation.status, to)
        .await?
    {
        trace!("Invitation {} changed concurrently", invitation.id);
        return Err(missing);
    }
    debug!(
        "Invitation {} from {} to {}: {} -> {to}",
        invitation.id, invitation.from_user_id, invitation.email, invitation.status
    );
    Ok(())
}

/// Starts a new pending row for (`user_id`, `email`). Earlier rows stay as history.
pub async fn send_invitation(
    store: &dyn Store,
    user_id: Uuid,
    email: &str,
) -> Result<Uuid, InvitationError> {
    ValidatedInvitation::new(email).validate()?;
    ensure_user(store, user_id).await?;

    let invitation = store.insert_invitation(user_id, email).await?;
    debug!("User {user_id} invited {email}");
    Ok(invitation.id)
}

/// Every row the user has sent, in insertion order, without deduplication.
pub async fn get_sent_invitations(
    store: &dyn Store,
    user_id: Uuid,
) -> Result<Vec<Invitation>, InvitationError> {
    ensure_user(store, user_id).await?;
    Ok(store.invitations_from(user_id).await?)
}

/// Latest invitation of each sender addressed to the user's email.
pub async fn get_incoming_invitations(
    store: &dyn Store,
    user_id: Uuid,
) -> Result<Vec<IncomingInvitation>, InvitationError> {
    let email = caller_email(store, user_id).await?;
    let rows = store.invitations_to(&email).await?;
    trace!("Got {} invitation rows for {email}", rows.len());

    let latest = latest_per_sender(rows);
    Ok(with_sender_emails(store, latest).await)
}

/// Senders whose latest invitation to the user's email is accepted.
pub async fn get_accepted_invitations(
    store: &dyn Store,
    user_id: Uuid,
) -> Result<Vec<IncomingInvitation>, InvitationError> {
    let email = caller_email(store, user_id).await?;
    let rows = store.invitations_to(&email).await?;

    let accepted = latest_per_sender(rows)
        .into_iter()
        .filter(|i| i.status == InvitationStatus::Accepted)
        .collect();
    Ok(with_sender_emails(store, accepted).await)
}

/// Recipients whose latest invitation from the user is accepted.
pub async fn get_friends(
    store: &dyn Store,
    user_id: Uuid,
) -> Result<Vec<Invitation>, InvitationError> {
    ensure_user(store, user_id).await?;
    let rows = store.invitations_from(user_id).await?;

    Ok(latest_per_recipient(rows)
        .into_iter()
        .filter(|i| i.status == InvitationStatus::Accepted)
        .collect())
}

pub async fn accept_invitation(
    store: &dyn Store,
    user_id: Uuid,
    from_user_id: Uuid,
) -> Result<(), InvitationError> {
    let email = caller_email(store, user_id).await?;
    let rows = store.invitations_between(from_user_id, &email).await?;

    let Some(pending) = latest_with_status(&rows, InvitationStatus::Pending) else {
        trace!("No pending invitation from {from_user_id} to {email}");
        return Err(InvitationError::NoPendingInvitation);
    };

    transition(
        store,
        pending,
        InvitationStatus::Accepted,
        InvitationError::NoPendingInvitation,
    )
    .await
}

/// Recipient side: drops the friendship granted by `friend_user_id`.
pub async fn remove_friend(
    store: &dyn Store,
    user_id: Uuid,
    friend_user_id: Uuid,
) -> Result<(), InvitationError> {
    let email = caller_email(store, user_id).await?;
    let rows = store.invitations_between(friend_user_id, &email).await?;

    let Some(accepted) = latest_with_status(&rows, InvitationStatus::Accepted) else {
        trace!("No accepted invitation from {friend_user_id} to {email}");
        return Err(InvitationError::NoAcceptedInvitation);
    };

    transition(
        store,
        accepted,
        InvitationStatus::Removed,
        InvitationError::NoAcceptedInvitation,
    )
    .await
}

/// Sender side: stops sharing with `email`.
pub async fn remove_sent_invitation(
    store: &dyn Store,
    user_id: Uuid,
    email: &str,
) -> Result<(), InvitationError> {
    ensure_user(store, user_id).await?;
    let rows = store.invitations_between(user_id, email).await?;

    let Some(accepted) = latest_with_status(&rows, InvitationStatus::Accepted) else {
        trace!("No accepted invitation from {user_id} to {email}");
        return Err(InvitationError::NoAcceptedInvitation);
    };

    transition(
        store,
        accepted,
        InvitationStatus::Removed,
        InvitationError::NoAcceptedInvitation,
    )
    .await
}

/// Whether `sender_id` currently shares their wishlist with `recipient_email`.
pub async fn is_friend(
    store: &dyn Store,
    sender_id: Uuid,
    recipient_email: &str,
) -> anyhow::Result<bool> {
    let rows = store.invitations_between(sender_id, recipient_email).await?;
    Ok(resolve::is_accepted(&rows))
}
