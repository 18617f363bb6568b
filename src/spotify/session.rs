use async_trait::async_trait;

use crate::error::Result;
use crate::spotify::models::{CatalogTrack, PlaylistSpec};

/// Largest number of items Spotify accepts in one "add items to playlist" call.
pub const SPOTIFY_MAX_APPEND_BATCH: usize = 100;

/// An authorized connection to the catalog/playlist API. Shared read-only for
/// the whole run.
#[async_trait]
pub trait CatalogSession: Send + Sync {
    async fn current_user_id(&self) -> Result<String>;

    /// Track search, best-ranked first.
    async fn search_tracks(&self, query: &str, limit: u32) -> Result<Vec<CatalogTrack>>;

    /// Create a playlist owned by `user_id` and return its id.
    async fn create_playlist(&self, user_id: &str, spec: &PlaylistSpec) -> Result<String>;

    async fn append_items(&self, playlist_id: &str, track_ids: &[String]) -> Result<()>;

    fn max_append_batch(&self) -> usize {
        SPOTIFY_MAX_APPEND_BATCH
    }
}
