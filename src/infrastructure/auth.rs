use std::io;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use rspotify::Token;
use serde::Deserialize;
use url::Url;

use crate::config::Config;
use crate::services::error::PlaylistError;

/// Permission needed to create and fill a public playlist.
pub const SPOTIFY_SCOPE: &str = "playlist-modify-public";

const TOKEN_CACHE_PATH: &str = ".spotify_token_cache.json";

/// Supplies an access token for the streaming API. The interactive browser
/// flow lives behind this trait so tests can hand in a pre-issued token.
#[async_trait]
pub trait TokenProvider {
    async fn obtain(&self) -> Result<Token, PlaylistError>;
}

/// OAuth authorization-code flow against the configured endpoints. On first
/// run this opens a browser and asks the user to paste the redirect URL back;
/// afterwards the token is served from the cache file until it expires.
pub struct AuthCodeFlow {
    http: reqwest::Client,
    authorize_url: String,
    token_url: String,
    redirect_uri: String,
    client_id: String,
    client_secret: String,
}

impl AuthCodeFlow {
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        Self {
            http,
            authorize_url: config.oauth_authorize_url.clone(),
            token_url: config.oauth_token_url.clone(),
            redirect_uri: config.redirect_uri.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
        }
    }

    /// The user-facing authorization page, built on the configured endpoint.
    fn authorize_page_url(&self) -> Result<Url, PlaylistError> {
        let mut url = Url::parse(&self.authorize_url).map_err(|error| {
            PlaylistError::MalformedConfig("SPOTIFY_OAUTH_AUTHORIZE_URL", error)
        })?;
        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("response_type", "code")
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("scope", SPOTIFY_SCOPE);
        Ok(url)
    }

    async fn exchange_code(&self, code: &str) -> Result<Token, PlaylistError> {
        let response = self
            .http
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", &self.redirect_uri),
            ])
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(PlaylistError::TokenExchange)?;

        let grant: TokenGrant = response.json().await.map_err(PlaylistError::TokenExchange)?;
        Ok(grant.into_token())
    }
}

#[async_trait]
impl TokenProvider for AuthCodeFlow {
    async fn obtain(&self) -> Result<Token, PlaylistError> {
        if let Ok(token) = Token::from_cache(TOKEN_CACHE_PATH) {
            if !token.is_expired() {
                tracing::info!("Using cached access token");
                return Ok(token);
            }
        }

        let authorize_url = self.authorize_page_url()?;
        if webbrowser::open(authorize_url.as_str()).is_err() {
            println!("Open this URL in your browser to authorize access:\n{authorize_url}");
        }

        println!("Paste the URL you were redirected to:");
        let mut redirect = String::new();
        io::stdin().read_line(&mut redirect)?;
        let code = authorization_code(&redirect)?;

        let token = self.exchange_code(&code).await?;
        if let Err(error) = token.write_cache(TOKEN_CACHE_PATH) {
            tracing::warn!("Could not cache the access token: {error}");
        }
        Ok(token)
    }
}

/// Pulls the `code` query parameter out of the redirect URL the user pasted.
fn authorization_code(redirect: &str) -> Result<String, PlaylistError> {
    let trimmed = redirect.trim();
    let url =
        Url::parse(trimmed).map_err(|_| PlaylistError::InvalidRedirect(trimmed.to_owned()))?;
    url.query_pairs()
        .find(|(key, _)| key == "code")
        .map(|(_, value)| value.into_owned())
        .ok_or_else(|| PlaylistError::InvalidRedirect(trimmed.to_owned()))
}

#[derive(Deserialize)]
struct TokenGrant {
    access_token: String,
    expires_in: i64,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    scope: Option<String>,
}

impl TokenGrant {
    fn into_token(self) -> Token {
        let expires_in = Duration::seconds(self.expires_in);
        Token {
            access_token: self.access_token,
            expires_in,
            expires_at: Utc::now().checked_add_signed(expires_in),
            refresh_token: self.refresh_token,
            scopes: self
                .scope
                .map(|scope| scope.split_whitespace().map(str::to_owned).collect())
                .unwrap_or_default(),
        }
    }
}
