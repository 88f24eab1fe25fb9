#[derive(Debug, thiserror::Error)]
pub enum PlaylistError {
    #[error("Missing required configuration value {0}")]
    MissingConfig(&'static str),
    #[error("Configuration value {0} is not a valid URL: {1}")]
    MalformedConfig(&'static str, #[source] url::ParseError),
    #[error("Chart page request failed: {0}")]
    ChartFetch(#[source] reqwest::Error),
    #[error("Token exchange failed: {0}")]
    TokenExchange(#[source] reqwest::Error),
    #[error("Authorization redirect did not contain a usable code: {0}")]
    InvalidRedirect(String),
    #[error("Spotify API error: {0}")]
    Spotify(#[from] rspotify::ClientError),
    #[error("Spotify returned a malformed id: {0}")]
    InvalidId(#[from] rspotify::model::IdError),
    #[error("Failed to read input: {0}")]
    Input(#[from] std::io::Error),
}
