use crate::config::get_secret_env;
use secrecy::Secret;
use serde::Deserialize;
use time::Duration;
use tracing::warn;

pub const NAME_ACCESS_SECRET: &str = "JWT_ACCESS_SECRET";
pub const NAME_REFRESH_SECRET: &str = "JWT_REFRESH_SECRET";

const ACCESS_SECRET: &str = "ACCESS_SECRET";
const REFRESH_SECRET: &str = "REFRESH_SECRET";

const ACCESS_EXPIRATION: Duration = Duration::minutes(5);
const REFRESH_EXPIRATION: Duration = Duration::days(7);

#[derive(Deserialize)]
pub struct JwtSettingsModel {
    pub access: Option<TokenDataModel>,
    pub refresh: Option<TokenDataModel>,
}

/// Expiration is given in seconds.
#[derive(Deserialize)]
pub struct TokenDataModel {
    pub token: Option<String>,
    pub expiration: Option<i64>,
}

impl TokenDataModel {
    fn to_token_data(self, default_secret: &str, default_expiration: Duration) -> TokenData {
        let token = self.token.unwrap_or_else(|| {
            warn!("Using default secret for {default_secret}");
            default_secret.to_string()
        });
        let expiration = self
            .expiration
            .map_or(default_expiration, |seconds| {
                let expiration = Duration::seconds(seconds);
                warn!("Using custom token expiration of {expiration}");
                expiration
            });
        TokenData::new(&token, expiration)
    }
}

impl JwtSettingsModel {
    pub fn to_settings(self) -> JwtSettings {
        let access = self.access.map_or_else(
            || {
                warn!("Using default access token");
                AccessTokenData::default()
            },
            |t| AccessTokenData(t.to_token_data(ACCESS_SECRET, ACCESS_EXPIRATION)),
        );

        let refresh = self.refresh.map_or_else(
            || {
                warn!("Using default refresh token");
                RefreshTokenData::default()
            },
            |t| RefreshTokenData(t.to_token_data(REFRESH_SECRET, REFRESH_EXPIRATION)),
        );

        JwtSettings { access, refresh }
    }
}

#[derive(Clone, Default)]
pub struct JwtSettings {
    pub access: AccessTokenData,
    pub refresh: RefreshTokenData,
}

impl JwtSettings {
    pub fn new(access: &str, refresh: &str) -> Self {
        Self {
            access: AccessTokenData(TokenData::new(access, ACCESS_EXPIRATION)),
            refresh: RefreshTokenData(TokenData::new(refresh, REFRESH_EXPIRATION)),
        }
    }

    pub fn from_env() -> Self {
        Self {
            access: AccessTokenData(TokenData {
                token: get_secret_env(NAME_ACCESS_SECRET),
                expiration: ACCESS_EXPIRATION,
            }),
            refresh: RefreshTokenData(TokenData {
                token: get_secret_env(NAME_REFRESH_SECRET),
                expiration: REFRESH_EXPIRATION,
            }),
        }
    }
}

#[derive(Clone)]
pub struct TokenData {
    pub token: Secret<String>,
    pub expiration: Duration,
}

impl TokenData {
    fn new(token: &str, expiration: Duration) -> Self {
        Self {
            token: Secret::new(token.to_owned()),
            expiration,
        }
    }
}

#[derive(Clone)]
pub struct AccessTokenData(pub TokenData);

impl Default for AccessTokenData {
    fn default() -> Self {
        Self(TokenData::new(ACCESS_SECRET, ACCESS_EXPIRATION))
    }
}

#[derive(Clone)]
pub struct RefreshTokenData(pub TokenData);

impl Default for RefreshTokenData {
    fn default() -> Self {
        Self(TokenData::new(REFRESH_SECRET, REFRESH_EXPIRATION))
    }
}
