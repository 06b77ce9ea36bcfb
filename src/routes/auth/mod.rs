pub mod models;

use crate::app_errors::AppError;
use crate::config::tokens::JwtSettings;
use crate::modules::store::DynStore;
use crate::modules::AppState;
use crate::routes::auth::models::{LoggedInUser, LoginCredentials, RegisterCredentials};
use crate::utils::auth::models::{AuthToken, Claims, CookieSecurity, RefreshClaims};
use crate::utils::auth::*;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{debug_handler, Json, Router};
use axum_extra::extract::CookieJar;
use secrecy::SecretString;
use tracing::debug;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(post_register_user))
        .route("/login", post(post_login_user))
        .route("/anonymous", post(post_anonymous_user))
        .route("/logout", post(post_logout_user))
        .route("/refresh", post(post_refresh_user_token))
        .route("/me", get(get_logged_in_user))
}

/// Register with email and password
#[debug_handler(state = AppState)]
#[utoipa::path(post, path = "/auth/register", tag = "auth", request_body = RegisterCredentials, responses((status = 200, body = LoggedInUser, description = "Registered and signed in"), (status = 409, description = "Email already taken"), (status = 422, description = "Invalid email or password")))]
pub async fn post_register_user(
    State(store): State<DynStore>,
    State(secrets): State<JwtSettings>,
    State(security): State<CookieSecurity>,
    jar: CookieJar,
    Json(register_credentials): Json<RegisterCredentials>,
) -> Result<(CookieJar, Json<LoggedInUser>), AppError> {
    let email = register_credentials.email.trim();
    let user_id = try_register_user(
        &*store,
        email,
        SecretString::new(register_credentials.password.clone()),
    )
    .await?;

    let jar = generate_token_cookies(user_id, &secrets, security, jar)?;

    debug!("User {user_id} ({email}) registered successfully");

    let user = get_current_user(&*store, user_id).await?;
    Ok((jar, Json(user.into())))
}

/// Sign in with email and password
#[debug_handler(state = AppState)]
#[utoipa::path(post, path = "/auth/login", tag = "auth", request_body = LoginCredentials, responses((status = 200, body = LoggedInUser, description = "Signed in"), (status = 401, description = "Wrong email or password")))]
pub async fn post_login_user(
    State(store): State<DynStore>,
    State(secrets): State<JwtSettings>,
    State(security): State<CookieSecurity>,
    jar: CookieJar,
    Json(login_credentials): Json<LoginCredentials>,
) -> Result<(CookieJar, Json<LoggedInUser>), AppError> {
    let email = login_credentials.email.trim();
    let user_id = verify_user_credentials(
        &*store,
        email,
        SecretString::new(login_credentials.password.clone()),
    )
    .await?;

    let jar = generate_token_cookies(user_id, &secrets, security, jar)?;

    debug!("User {user_id} ({email}) logged in successfully");

    let user = get_current_user(&*store, user_id).await?;
    Ok((jar, Json(user.into())))
}

/// Sign in anonymously (account without email)
#[debug_handler(state = AppState)]
#[utoipa::path(post, path = "/auth/anonymous", tag = "auth", responses((status = 200, body = LoggedInUser, description = "Signed in anonymously")))]
pub async fn post_anonymous_user(
    State(store): State<DynStore>,
    State(secrets): State<JwtSettings>,
    State(security): State<CookieSecurity>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<LoggedInUser>), AppError> {
    let user_id = create_anonymous_user(&*store).await?;
    let jar = generate_token_cookies(user_id, &secrets, security, jar)?;

    debug!("Anonymous user {user_id} signed in");

    let user = get_current_user(&*store, user_id).await?;
    Ok((jar, Json(user.into())))
}

/// Currently signed-in user
#[debug_handler(state = AppState)]
#[utoipa::path(get, path = "/auth/me", tag = "auth", responses((status = 200, body = LoggedInUser), (status = 401, description = "Not authenticated")))]
pub async fn get_logged_in_user(
    claims: Claims,
    State(store): State<DynStore>,
) -> Result<Json<LoggedInUser>, AppError> {
    let user = get_current_user(&*store, claims.user_id).await?;
    Ok(Json(user.into()))
}

/// Sign out, revoking both tokens
#[debug_handler(state = AppState)]
#[utoipa::path(post, path = "/auth/logout", tag = "auth", responses((status = 200, description = "Signed out")))]
pub async fn post_logout_user(
    State(store): State<DynStore>,
    State(secrets): State<JwtSettings>,
    jar: CookieJar,
) -> Result<CookieJar, AppError> {
    revoke_token::<Claims>(&*store, &secrets, &jar).await?;
    revoke_token::<RefreshClaims>(&*store, &secrets, &jar).await?;

    debug!("User logged out successfully");

    Ok(jar
        .remove(remove_cookie(Claims::NAME))
        .remove(remove_cookie(RefreshClaims::NAME)))
}

/// Exchange the refresh token for a fresh token pair
#[debug_handler(state = AppState)]
#[utoipa::path(post, path = "/auth/refresh", tag = "auth", responses((status = 200, description = "Tokens refreshed"), (status = 401, description = "Not authenticated")))]
pub async fn post_refresh_user_token(
    refresh_claims: RefreshClaims,
    State(store): State<DynStore>,
    State(secrets): State<JwtSettings>,
    State(security): State<CookieSecurity>,
    jar: CookieJar,
) -> Result<CookieJar, AppError> {
    let jar = generate_token_cookies(refresh_claims.user_id, &secrets, security, jar)?;

    store
        .blacklist_token(refresh_claims.jti, refresh_claims.expires_at())
        .await
        .map_err(errors::AuthError::from)?;

    debug!(
        "User {}'s access token refreshed successfully",
        refresh_claims.user_id
    );

    Ok(jar)
}
