use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Date is invalid: '{0}'. Please ensure it is in YYYY-MM-DD format")]
    InvalidDate(String),

    #[error("Failed to fetch chart: {0}")]
    Fetch(String),

    #[error("Failed to parse chart page: {0}")]
    Parse(String),

    #[error("Failed to create playlist: {0}")]
    PlaylistCreation(String),

    #[error("Failed to add tracks to playlist: {0}")]
    Append(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Spotify API error: {0}")]
    SpotifyApi(#[from] rspotify::ClientError),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
