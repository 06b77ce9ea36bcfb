use crate::config::tokens::{JwtSettings, TokenData};
use crate::modules::store::DynStore;
use crate::utils::auth::errors::AuthError;
use anyhow::Context;
use axum::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;
use http::request::Parts;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::{Duration, OffsetDateTime};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: Option<String>,
}

#[derive(Debug, Clone, FromRow)]
pub struct UserCredentials {
    pub user_id: Uuid,
    pub password: String,
}

/// Secure flag for token cookies, off in development.
#[derive(Clone, Copy, Debug)]
pub struct CookieSecurity(pub bool);

pub trait AuthToken
where
    Self: DeserializeOwned + Serialize + Send + Sized,
{
    const NAME: &'static str;

    fn new(user_id: Uuid, duration: Duration) -> Self;
    fn jti(&self) -> Uuid;
    fn user_id(&self) -> Uuid;
    fn exp(&self) -> u64;
    fn get_jwt_key(settings: &JwtSettings) -> &TokenData;

    fn expires_at(&self) -> OffsetDateTime {
        OffsetDateTime::from_unix_timestamp(self.exp() as i64)
            .unwrap_or(OffsetDateTime::now_utc())
    }

    fn generate_cookie(token: String, security: CookieSecurity) -> Cookie<'static> {
        Cookie::build(Self::NAME, token)
            .http_only(true)
            .secure(security.0)
            .same_site(SameSite::Strict)
            .path("/")
            .finish()
    }

    fn generate_jwt(&self, key: &Secret<String>) -> Result<String, AuthError> {
        Ok(encode(
            &Header::default(),
            &self,
            &EncodingKey::from_secret(key.expose_secret().as_bytes()),
        )
        .context("Failed to encrypt token")?)
    }

    fn get_jwt_cookie(jar: &CookieJar) -> Result<Cookie<'static>, AuthError> {
        jar.get(Self::NAME)
            .cloned()
            .ok_or(AuthError::Unauthenticated)
    }

    fn decode_jwt(token: &str, key: &Secret<String>) -> Result<Self, AuthError> {
        let mut validation = Validation::default();
        validation.leeway = 5;

        let data = decode::<Self>(
            token,
            &DecodingKey::from_secret(key.expose_secret().as_bytes()),
            &validation,
        )
        .map_err(|_| AuthError::Unauthenticated)?;

        Ok(data.claims)
    }
}

/// Access token claims; extracting them is what authenticates a request.
#[derive(Serialize, Deserialize, Debug)]
pub struct Claims {
    pub jti: Uuid,
    pub user_id: Uuid,
    pub exp: u64,
}

impl AuthToken for Claims {
    const NAME: &'static str = "jwt";

    fn new(user_id: Uuid, duration: Duration) -> Self {
        Self {
            jti: Uuid::new_v4(),
            user_id,
            exp: jsonwebtoken::get_current_timestamp() + duration.whole_seconds().unsigned_abs(),
        }
    }

    fn jti(&self) -> Uuid {
        self.jti
    }

    fn user_id(&self) -> Uuid {
        self.user_id
    }

    fn exp(&self) -> u64 {
        self.exp
    }

    fn get_jwt_key(settings: &JwtSettings) -> &TokenData {
        &settings.access.0
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RefreshClaims {
    pub jti: Uuid,
    pub user_id: Uuid,
    pub exp: u64,
}

impl AuthToken for RefreshClaims {
    const NAME: &'static str = "refresh-jwt";

    fn new(user_id: Uuid, duration: Duration) -> Self {
        Self {
            jti: Uuid::new_v4(),
            user_id,
            exp: jsonwebtoken::get_current_timestamp() + duration.whole_seconds().unsigned_abs(),
        }
    }

    fn jti(&self) -> Uuid {
        self.jti
    }

    fn user_id(&self) -> Uuid {
        self.user_id
    }

    fn exp(&self) -> u64 {
        self.exp
    }

    fn get_jwt_key(settings: &JwtSettings) -> &TokenData {
        &settings.refresh.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Claims
where
    S: Send + Sync,
    JwtSettings: FromRef<S>,
    DynStore: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        verify_token::<Self, S>(parts, state).await
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RefreshClaims
where
    S: Send + Sync,
    JwtSettings: FromRef<S>,
    DynStore: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        verify_token::<Self, S>(parts, state).await
    }
}

async fn verify_token<T, S>(parts: &Parts, state: &S) -> Result<T, AuthError>
where
    T: AuthToken,
    S: Send + Sync,
    JwtSettings: FromRef<S>,
    DynStore: FromRef<S>,
{
    let settings = JwtSettings::from_ref(state);
    let store = DynStore::from_ref(state);

    let jar = CookieJar::from_headers(&parts.headers);
    let cookie = T::get_jwt_cookie(&jar)?;
    let claims = T::decode_jwt(cookie.value(), &T::get_jwt_key(&settings).token)?;

    if store.is_token_blacklisted(claims.jti()).await? {
        return Err(AuthError::Unauthenticated);
    }

    Ok(claims)
}
