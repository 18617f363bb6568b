pub mod chart;
pub mod config;
pub mod date;
pub mod error;
pub mod matcher;
pub mod pipeline;
pub mod spotify;

#[cfg(test)]
mod test_logs;

pub use chart::{ChartEntry, ChartExtractor, ChartSource};
pub use config::Config;
pub use date::validate_date;
pub use error::{AppError, Result};
pub use matcher::{MatchStrategy, TrackSelector};
pub use pipeline::{ChartPlaylistPipeline, PipelineOptions, PlaylistResult, RunReport};
pub use spotify::{CatalogSession, CatalogTrack, PlaylistSpec, SpotifyClient};
