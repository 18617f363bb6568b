use futures::stream::{self, StreamExt};
use indicatif::ProgressBar;
use tracing::{info, warn};

use crate::chart::ChartEntry;
use crate::matcher::TrackSelector;
use crate::pipeline::report::ResolvedTrack;
use crate::spotify::CatalogSession;

/// Candidates requested per search.
pub const SEARCH_LIMIT: u32 = 10;
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Maps chart entries to catalog track ids, one search per entry.
pub struct TrackResolver<'a, S: CatalogSession + ?Sized> {
    session: &'a S,
    selector: Box<dyn TrackSelector>,
    concurrency: usize,
    progress: ProgressBar,
}

impl<'a, S: CatalogSession + ?Sized> TrackResolver<'a, S> {
    pub fn new(session: &'a S, selector: Box<dyn TrackSelector>) -> Self {
        Self {
            session,
            selector,
            concurrency: DEFAULT_CONCURRENCY,
            progress: ProgressBar::hidden(),
        }
    }

    /// Number of searches kept in flight. Clamped to at least 1.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Returns exactly one `ResolvedTrack` per entry, in input order.
    pub async fn resolve(&self, entries: &[ChartEntry]) -> Vec<ResolvedTrack> {
        self.progress.set_length(entries.len() as u64);

        let resolved = stream::iter(entries)
            .map(|entry| self.resolve_entry(entry))
            .buffered(self.concurrency)
            .collect::<Vec<_>>()
            .await;

        self.progress.finish_and_clear();

        let matched = resolved.iter().filter(|r| r.is_matched()).count();
        info!(
            "Resolved {}/{} chart entries on Spotify",
            matched,
            resolved.len()
        );

        resolved
    }

    async fn resolve_entry(&self, entry: &ChartEntry) -> ResolvedTrack {
        let track_id = match self
            .session
            .search_tracks(&entry.search_query(), SEARCH_LIMIT)
            .await
        {
            Ok(candidates) => match self.selector.select(entry, &candidates) {
                Some(track) => {
                    info!("{} found on Spotify", entry);
                    Some(track.id.clone())
                }
                None => {
                    info!("{} doesn't exist in Spotify. Skipped.", entry);
                    None
                }
            },
            Err(e) => {
                warn!("Search failed for {}: {}. Skipped.", entry, e);
                None
            }
        };

        self.progress.inc(1);

        ResolvedTrack {
            entry: entry.clone(),
            track_id,
        }
    }
}
