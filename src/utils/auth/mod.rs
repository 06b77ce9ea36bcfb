pub mod additions;
pub mod errors;
pub mod models;

use crate::config::tokens::JwtSettings;
use crate::modules::store::Store;
use crate::utils::auth::additions::{hash_pass, validate_credentials, verify_pass};
use axum_extra::extract::{cookie::Cookie, CookieJar};
use errors::*;
use models::*;
use secrecy::{ExposeSecret, SecretString};
use time::Duration;
use tracing::{debug, trace};
use uuid::Uuid;

pub async fn try_register_user(
    store: &dyn Store,
    email: &str,
    password: SecretString,
) -> Result<Uuid, AuthError> {
    validate_credentials(email, password.expose_secret())?;

    if store.get_credentials(email).await?.is_some() {
        return Err(AuthError::UserAlreadyExists);
    }

    let hashed_pass = hash_pass(password.expose_secret())?;

    let user_id = store
        .create_user(Some(email), Some(&hashed_pass))
        .await?
        .ok_or(AuthError::UserAlreadyExists)?;

    debug!("Registered user {user_id}");
    Ok(user_id)
}

/// Creates an account without email or password.
pub async fn create_anonymous_user(store: &dyn Store) -> Result<Uuid, AuthError> {
    let user_id = store
        .create_user(None, None)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Anonymous user creation conflicted"))?;

    debug!("Created anonymous user {user_id}");
    Ok(user_id)
}

pub async fn verify_user_credentials(
    store: &dyn Store,
    email: &str,
    password: SecretString,
) -> Result<Uuid, AuthError> {
    debug!("Verifying credentials");
    if email.trim().is_empty() || password.expose_secret().is_empty() {
        return Err(AuthError::WrongEmailOrPassword);
    }

    let credentials = store
        .get_credentials(email)
        .await?
        .ok_or(AuthError::WrongEmailOrPassword)?;

    if verify_pass(password.expose_secret(), &credentials.password)? {
        return Ok(credentials.user_id);
    }
    Err(AuthError::WrongEmailOrPassword)
}

pub async fn get_current_user(store: &dyn Store, user_id: Uuid) -> Result<User, AuthError> {
    store
        .get_user(user_id)
        .await?
        .ok_or(AuthError::Unauthenticated)
}

pub fn generate_token_cookies(
    user_id: Uuid,
    secrets: &JwtSettings,
    security: CookieSecurity,
    jar: CookieJar,
) -> Result<CookieJar, AuthError> {
    let access_cookie = generate_jwt_in_cookie(
        Claims::new(user_id, secrets.access.0.expiration),
        secrets,
        security,
    )?;

    let refresh_cookie = generate_jwt_in_cookie(
        RefreshClaims::new(user_id, secrets.refresh.0.expiration),
        secrets,
        security,
    )?;

    Ok(jar.add(access_cookie).add(refresh_cookie))
}

fn generate_jwt_in_cookie<T: AuthToken>(
    payload: T,
    secrets: &JwtSettings,
    security: CookieSecurity,
) -> Result<Cookie<'static>, AuthError> {
    let token = payload.generate_jwt(&T::get_jwt_key(secrets).token)?;
    let cookie = T::generate_cookie(token, security);
    trace!("JWT: {cookie}");

    Ok(cookie)
}

/// Blacklists the token held in the jar, if it still decodes.
pub async fn revoke_token<T: AuthToken>(
    store: &dyn Store,
    secrets: &JwtSettings,
    jar: &CookieJar,
) -> Result<(), AuthError> {
    let Ok(cookie) = T::get_jwt_cookie(jar) else {
        return Ok(());
    };
    let Ok(claims) = T::decode_jwt(cookie.value(), &T::get_jwt_key(secrets).token) else {
        trace!("Ignoring undecodable {} cookie", T::NAME);
        return Ok(());
    };

    store
        .blacklist_token(claims.jti(), claims.expires_at())
        .await?;
    trace!("Blacklisted {} of user {}", T::NAME, claims.user_id());
    Ok(())
}

pub fn remove_cookie(name: &'static str) -> Cookie<'static> {
    Cookie::build(name, "")
        .path("/")
        .max_age(Duration::seconds(0))
        .finish()
}
