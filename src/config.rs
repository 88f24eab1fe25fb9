use std::env;

use crate::services::error::PlaylistError;

pub struct Config {
    pub oauth_authorize_url: String,
    pub oauth_token_url: String,
    pub redirect_uri: String,
    pub client_id: String,
    pub client_secret: String,
}

impl Config {
    /// Reads every required value up front so a missing credential fails the
    /// run before any network call.
    pub fn from_env() -> Result<Self, PlaylistError> {
        Ok(Self {
            oauth_authorize_url: require("SPOTIFY_OAUTH_AUTHORIZE_URL")?,
            oauth_token_url: require("SPOTIFY_OAUTH_TOKEN_URL")?,
            redirect_uri: require("SPOTIFY_REDIRECT_URI")?,
            client_id: require("SPOTIFY_CLIENT_ID")?,
            client_secret: require("SPOTIFY_CLIENT_SECRET")?,
        })
    }
}

fn require(name: &'static str) -> Result<String, PlaylistError> {
    env::var(name).map_err(|_| PlaylistError::MissingConfig(name))
}
