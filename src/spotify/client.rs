use async_trait::async_trait;
use rspotify::{
    AuthCodeSpotify, Credentials, OAuth,
    model::{PlayableId, PlaylistId, SearchResult, SearchType, TrackId, UserId},
    prelude::*,
    scopes,
};
use std::io::{self, Write};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::spotify::models::{CatalogTrack, PlaylistSpec};
use crate::spotify::session::CatalogSession;

pub struct SpotifyClient {
    client: AuthCodeSpotify,
    user_id: String,
}

impl SpotifyClient {
    /// Run the authorization-code flow on the terminal and resolve the
    /// current user.
    pub async fn new(config: &Config) -> Result<Self> {
        let creds = Credentials::new(&config.spotify_client_id, &config.spotify_client_secret);

        let oauth = OAuth {
            redirect_uri: config.spotify_redirect_uri.clone(),
            scopes: scopes!("playlist-modify-private"),
            ..Default::default()
        };

        let client = AuthCodeSpotify::new(creds, oauth);

        let auth_url = client.get_authorize_url(false)?;
        println!("\nOpen this URL in your browser to authorize Spotify:");
        println!("{}\n", auth_url);

        print!("Enter the URL you were redirected to: ");
        io::stdout().flush()?;

        let mut redirect_url = String::new();
        io::stdin().read_line(&mut redirect_url)?;

        let code = client
            .parse_response_code(redirect_url.trim())
            .ok_or_else(|| AppError::Auth("Failed to parse authorization code".into()))?;

        client.request_token(&code).await?;

        let user = client.current_user().await?;
        let user_id = user.id.id().to_string();
        let display_name = user.display_name.unwrap_or_else(|| user_id.clone());

        info!("Successfully authenticated as Spotify user: {}", display_name);

        Ok(Self { client, user_id })
    }
}

#[async_trait]
impl CatalogSession for SpotifyClient {
    async fn current_user_id(&self) -> Result<String> {
        Ok(self.user_id.clone())
    }

    async fn search_tracks(&self, query: &str, limit: u32) -> Result<Vec<CatalogTrack>> {
        debug!("Searching Spotify for: {}", query);

        let result = self
            .client
            .search(query, SearchType::Track, None, None, Some(limit), None)
            .await?;

        let SearchResult::Tracks(page) = result else {
            return Ok(Vec::new());
        };

        Ok(page
            .items
            .into_iter()
            .filter_map(|track| {
                // Local files carry no catalog id
                let id = track.id?;
                Some(CatalogTrack {
                    id: id.uri(),
                    name: track.name,
                    artists: track.artists.into_iter().map(|a| a.name).collect(),
                    album: track.album.name,
                    popularity: track.popularity,
                })
            })
            .collect())
    }

    async fn create_playlist(&self, user_id: &str, spec: &PlaylistSpec) -> Result<String> {
        let user = UserId::from_id(user_id)
            .map_err(|e| AppError::PlaylistCreation(format!("Invalid user id {}: {}", user_id, e)))?;

        let playlist = self
            .client
            .user_playlist_create(
                user,
                &spec.name,
                Some(spec.is_public()),
                Some(false),
                Some(&spec.description),
            )
            .await?;

        info!("Created Spotify playlist: {}", spec.name);

        Ok(playlist.id.id().to_string())
    }

    async fn append_items(&self, playlist_id: &str, track_ids: &[String]) -> Result<()> {
        if track_ids.is_empty() {
            return Ok(());
        }

        let playlist = PlaylistId::from_id(playlist_id)
            .map_err(|e| AppError::Append(format!("Invalid playlist id {}: {}", playlist_id, e)))?;

        let items = track_ids
            .iter()
            .map(|id| TrackId::from_id_or_uri(id).map(PlayableId::from))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| AppError::Append(format!("Invalid track id: {}", e)))?;

        self.client.playlist_add_items(playlist, items, None).await?;

        debug!("Added {} tracks to playlist {}", track_ids.len(), playlist_id);
        Ok(())
    }
}
