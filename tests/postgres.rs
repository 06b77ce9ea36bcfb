use secrecy::SecretString;
use sqlx::PgPool;
use std::sync::Arc;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use wishlist::modules::store::{DynStore, PgStore, Store};
use wishlist::utils::auth::{try_register_user, verify_user_credentials};
use wishlist::utils::invitations::errors::InvitationError;
use wishlist::utils::invitations::models::InvitationStatus;
use wishlist::utils::invitations::{
    accept_invitation, get_accepted_invitations, get_incoming_invitations, get_sent_invitations,
    remove_friend, send_invitation,
};
use wishlist::utils::wishes::{add_wish, archive_wish, errors::WishError, get_wishes};

const PASSWORD: &str = "#very#_#strong#_#pass#";

async fn user(store: &PgStore) -> Uuid {
    store.create_user(None, None).await.unwrap().unwrap()
}

#[sqlx::test]
async fn duplicate_emails_are_rejected(db: PgPool) {
    let store = PgStore::new(db);

    let user_id = store
        .create_user(Some("a@x.com"), Some("hash"))
        .await
        .unwrap();
    assert!(user_id.is_some());
    assert!(store
        .create_user(Some("a@x.com"), Some("other"))
        .await
        .unwrap()
        .is_none());

    assert!(store.create_user(None, None).await.unwrap().is_some());
    assert!(store.create_user(None, None).await.unwrap().is_some());

    let credentials = store.get_credentials("a@x.com").await.unwrap().unwrap();
    assert_eq!(Some(credentials.user_id), user_id);
    assert_eq!(credentials.password, "hash");
}

#[sqlx::test]
async fn invitation_history_keeps_insertion_order(db: PgPool) {
    let store = PgStore::new(db);
    let alice = user(&store).await;

    let first = store.insert_invitation(alice, "b@x.com").await.unwrap();
    let other = store.insert_invitation(alice, "c@x.com").await.unwrap();
    let second = store.insert_invitation(alice, "b@x.com").await.unwrap();
    assert_eq!(first.status, InvitationStatus::Pending);
    assert!(first.created_at <= second.created_at);

    let between = store.invitations_between(alice, "b@x.com").await.unwrap();
    let ids: Vec<Uuid> = between.iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);

    let sent = store.invitations_from(alice).await.unwrap();
    let ids: Vec<Uuid> = sent.iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![first.id, other.id, second.id]);

    let received = store.invitations_to("c@x.com").await.unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].id, other.id);
}

#[sqlx::test]
async fn status_update_is_compare_and_set(db: PgPool) {
    let store = PgStore::new(db);
    let alice = user(&store).await;
    let invitation = store.insert_invitation(alice, "b@x.com").await.unwrap();

    let accept = |id: Uuid| {
        store.set_invitation_status(id, InvitationStatus::Pending, InvitationStatus::Accepted)
    };
    assert!(accept(invitation.id).await.unwrap());
    assert!(accept(invitation.id).await.unwrap());
    assert!(!store
        .set_invitation_status(
            invitation.id,
            InvitationStatus::Removed,
            InvitationStatus::Pending
        )
        .await
        .unwrap());
    assert!(!accept(Uuid::new_v4()).await.unwrap());

    let rows = store.invitations_between(alice, "b@x.com").await.unwrap();
    assert_eq!(rows[0].status, InvitationStatus::Accepted);
}

#[sqlx::test]
async fn revoked_tokens_are_remembered(db: PgPool) {
    let store = PgStore::new(db);
    let live = Uuid::new_v4();
    let expired = Uuid::new_v4();
    let now = OffsetDateTime::now_utc();

    store
        .blacklist_token(expired, now - Duration::hours(1))
        .await
        .unwrap();
    store
        .blacklist_token(live, now + Duration::hours(1))
        .await
        .unwrap();
    store
        .blacklist_token(live, now + Duration::hours(1))
        .await
        .unwrap();

    assert!(store.is_token_blacklisted(live).await.unwrap());
    assert!(!store.is_token_blacklisted(expired).await.unwrap());
    assert!(!store.is_token_blacklisted(Uuid::new_v4()).await.unwrap());
}

#[sqlx::test]
async fn wishes_on_postgres(db: PgPool) {
    let store: DynStore = Arc::new(PgStore::new(db));
    let alice = store.create_user(None, None).await.unwrap().unwrap();
    let mallory = store.create_user(None, None).await.unwrap().unwrap();

    let bike = add_wish(&*store, alice, "Bike", "https://shop.example/bike")
        .await
        .unwrap();
    let book = add_wish(&*store, alice, "Book", "https://shop.example/book")
        .await
        .unwrap();

    let res = archive_wish(&*store, mallory, bike).await;
    assert!(matches!(res, Err(WishError::NotAuthorized)));

    archive_wish(&*store, alice, bike).await.unwrap();
    archive_wish(&*store, alice, bike).await.unwrap();

    let wishes = get_wishes(&*store, alice, None).await.unwrap();
    assert_eq!(wishes.len(), 1);
    assert_eq!(wishes[0].id, book);
    assert!(!wishes[0].is_archived);
}

#[sqlx::test]
async fn invitation_lifecycle_on_postgres(db: PgPool) {
    let store: DynStore = Arc::new(PgStore::new(db));
    let alice = try_register_user(&*store, "a@x.com", SecretString::new(PASSWORD.to_string()))
        .await
        .unwrap();
    let bob = try_register_user(&*store, "b@x.com", SecretString::new(PASSWORD.to_string()))
        .await
        .unwrap();
    let res = verify_user_credentials(&*store, "b@x.com", SecretString::new(PASSWORD.to_string()))
        .await
        .unwrap();
    assert_eq!(res, bob);

    let first = send_invitation(&*store, alice, "b@x.com").await.unwrap();
    let second = send_invitation(&*store, alice, "b@x.com").await.unwrap();
    accept_invitation(&*store, bob, alice).await.unwrap();

    let sent = get_sent_invitations(&*store, alice).await.unwrap();
    assert_eq!(sent.len(), 2);
    assert_eq!((sent[0].id, sent[0].status), (first, InvitationStatus::Pending));
    assert_eq!((sent[1].id, sent[1].status), (second, InvitationStatus::Accepted));

    let accepted = get_accepted_invitations(&*store, bob).await.unwrap();
    assert_eq!(accepted.len(), 1);
    assert_eq!(accepted[0].invitation.id, second);
    assert_eq!(accepted[0].from_user_email.as_str(), "a@x.com");

    remove_friend(&*store, bob, alice).await.unwrap();
    assert!(get_accepted_invitations(&*store, bob).await.unwrap().is_empty());
    let res = remove_friend(&*store, bob, alice).await;
    assert!(matches!(res, Err(InvitationError::NoAcceptedInvitation)));

    let third = send_invitation(&*store, alice, "b@x.com").await.unwrap();
    let incoming = get_incoming_invitations(&*store, bob).await.unwrap();
    assert_eq!(incoming.len(), 1);
    assert_eq!(incoming[0].invitation.id, third);
    assert_eq!(incoming[0].invitation.status, InvitationStatus::Pending);
}
