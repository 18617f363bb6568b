use crate::error::{AppError, Result};

pub const DEFAULT_CHART_BASE_URL: &str = "https://www.billboard.com/charts/hot-100/";
pub const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:8888/callback";

#[derive(Debug, Clone)]
pub struct Config {
    pub spotify_client_id: String,
    pub spotify_client_secret: String,
    pub spotify_redirect_uri: String,
    pub chart_base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let spotify_client_id = std::env::var("SPOTIFY_CLIENT_ID")
            .map_err(|_| AppError::Config("SPOTIFY_CLIENT_ID not set".into()))?;

        let spotify_client_secret = std::env::var("SPOTIFY_CLIENT_SECRET")
            .map_err(|_| AppError::Config("SPOTIFY_CLIENT_SECRET not set".into()))?;

        let spotify_redirect_uri = std::env::var("SPOTIFY_REDIRECT_URI")
            .unwrap_or_else(|_| DEFAULT_REDIRECT_URI.to_string());

        let chart_base_url = std::env::var("CHART_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_CHART_BASE_URL.to_string());

        Ok(Self {
            spotify_client_id,
            spotify_client_secret,
            spotify_redirect_uri,
            chart_base_url,
        })
    }

    /// Names of credential variables that are set but blank. Unset ones
    /// already fail in `from_env`.
    pub fn blank_credentials(&self) -> Vec<String> {
        let mut blank = Vec::new();

        if self.spotify_client_id.trim().is_empty() {
            blank.push("SPOTIFY_CLIENT_ID".to_string());
        }
        if self.spotify_client_secret.trim().is_empty() {
            blank.push("SPOTIFY_CLIENT_SECRET".to_string());
        }

        blank
    }
}
