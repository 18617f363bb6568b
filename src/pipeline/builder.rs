use tracing::{info, warn};

use crate::error::{AppError, Result};
use crate::pipeline::report::{FailedBatch, PlaylistResult, ResolvedTrack};
use crate::spotify::{CatalogSession, PlaylistSpec};

/// Creates a playlist and fills it with resolved tracks in chart order.
pub struct PlaylistBuilder<'a, S: CatalogSession + ?Sized> {
    session: &'a S,
    batch_size: usize,
}

impl<'a, S: CatalogSession + ?Sized> PlaylistBuilder<'a, S> {
    pub fn new(session: &'a S) -> Self {
        Self {
            session,
            batch_size: session.max_append_batch().max(1),
        }
    }

    /// Requested items per append call, capped at what the session accepts.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.clamp(1, self.session.max_append_batch().max(1));
        self
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Always creates a new playlist; running twice for the same spec yields
    /// two playlists.
    pub async fn build(
        &self,
        spec: &PlaylistSpec,
        resolved: &[ResolvedTrack],
    ) -> Result<PlaylistResult> {
        let (matched, unmatched): (Vec<_>, Vec<_>) =
            resolved.iter().partition(|r| r.is_matched());

        let track_ids: Vec<String> = matched
            .into_iter()
            .filter_map(|r| r.track_id.clone())
            .collect();
        let skipped = unmatched.into_iter().map(|r| r.entry.clone()).collect();

        let user_id = self
            .session
            .current_user_id()
            .await
            .map_err(|e| AppError::PlaylistCreation(e.to_string()))?;

        let playlist_id = self
            .session
            .create_playlist(&user_id, spec)
            .await
            .map_err(|e| AppError::PlaylistCreation(e.to_string()))?;

        info!("Created playlist '{}' ({})", spec.name, playlist_id);

        let mut added_count = 0;
        let mut failed_batch = None;

        for (i, chunk) in track_ids.chunks(self.batch_size).enumerate() {
            match self.session.append_items(&playlist_id, chunk).await {
                Ok(()) => {
                    added_count += chunk.len();
                }
                Err(e) => {
                    // Later chunks would land out of chart order, so stop here
                    let failure = FailedBatch {
                        batch: i + 1,
                        not_appended: track_ids.len() - added_count,
                        reason: e.to_string(),
                    };
                    warn!(
                        "Failed to add batch {} to playlist {}: {}",
                        failure.batch, spec.name, failure.reason
                    );
                    failed_batch = Some(failure);
                    break;
                }
            }
        }

        info!(
            "Added {}/{} tracks to playlist '{}'",
            added_count,
            track_ids.len(),
            spec.name
        );

        Ok(PlaylistResult {
            playlist_id,
            name: spec.name.clone(),
            added_count,
            skipped,
            failed_batch,
        })
    }
}
