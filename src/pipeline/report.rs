use crate::chart::ChartEntry;
use crate::spotify::PlaylistSpec;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTrack {
    pub entry: ChartEntry,
    /// `None` when the catalog had no acceptable match.
    pub track_id: Option<String>,
}

impl ResolvedTrack {
    pub fn is_matched(&self) -> bool {
        self.track_id.is_some()
    }
}

/// An append chunk that was rejected; population stopped there.
#[derive(Debug, Clone)]
pub struct FailedBatch {
    /// 1-based chunk number.
    pub batch: usize,
    /// Identifiers from this chunk onward that were not appended.
    pub not_appended: usize,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct PlaylistResult {
    pub playlist_id: String,
    pub name: String,
    pub added_count: usize,
    pub skipped: Vec<ChartEntry>,
    pub failed_batch: Option<FailedBatch>,
}

/// Outcome of one pipeline run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub date: String,
    pub spec: PlaylistSpec,
    pub entries_found: usize,
    pub resolved_count: usize,
    pub skipped: Vec<ChartEntry>,
    /// Present only when the playlist was actually created.
    pub playlist: Option<PlaylistResult>,
}

impl RunReport {
    pub fn is_dry_run(&self) -> bool {
        self.playlist.is_none()
    }

    pub fn match_rate(&self) -> f64 {
        if self.entries_found > 0 {
            (self.resolved_count as f64 / self.entries_found as f64) * 100.0
        } else {
            0.0
        }
    }
}
