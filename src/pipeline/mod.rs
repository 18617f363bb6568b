pub mod builder;
pub mod orchestrator;
pub mod report;
pub mod resolver;

pub use builder::PlaylistBuilder;
pub use orchestrator::{ChartPlaylistPipeline, PipelineOptions, print_summary};
pub use report::{FailedBatch, PlaylistResult, ResolvedTrack, RunReport};
pub use resolver::TrackResolver;
