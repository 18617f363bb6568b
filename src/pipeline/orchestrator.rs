use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::chart::ChartSource;
use crate::date::{format_date, validate_date};
use crate::error::Result;
use crate::matcher::MatchStrategy;
use crate::pipeline::builder::PlaylistBuilder;
use crate::pipeline::report::RunReport;
use crate::pipeline::resolver::{DEFAULT_CONCURRENCY, TrackResolver};
use crate::spotify::session::SPOTIFY_MAX_APPEND_BATCH;
use crate::spotify::{CatalogSession, PlaylistSpec};

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Create and populate the playlist. When false the run stops after
    /// resolving tracks.
    pub commit: bool,
    pub batch_size: usize,
    pub concurrency: usize,
    pub strategy: MatchStrategy,
    pub show_progress: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            commit: false,
            batch_size: SPOTIFY_MAX_APPEND_BATCH,
            concurrency: DEFAULT_CONCURRENCY,
            strategy: MatchStrategy::default(),
            show_progress: false,
        }
    }
}

/// date -> chart entries -> resolved tracks -> playlist.
pub struct ChartPlaylistPipeline<C, S> {
    source: C,
    session: S,
    options: PipelineOptions,
}

impl<C: ChartSource, S: CatalogSession> ChartPlaylistPipeline<C, S> {
    pub fn new(source: C, session: S, options: PipelineOptions) -> Self {
        Self {
            source,
            session,
            options,
        }
    }

    pub async fn run(&self, date_input: &str) -> Result<RunReport> {
        let date = format_date(validate_date(date_input)?);
        let spec = PlaylistSpec::for_chart_date(&date);

        info!(
            "Building '{}' (commit={}, strategy={})",
            spec.name, self.options.commit, self.options.strategy
        );

        let entries = self.source.fetch_entries(&date).await?;

        let resolved = TrackResolver::new(&self.session, self.options.strategy.selector())
            .with_concurrency(self.options.concurrency)
            .with_progress(self.progress_bar())
            .resolve(&entries)
            .await;

        let resolved_count = resolved.iter().filter(|r| r.is_matched()).count();
        let skipped = resolved
            .iter()
            .filter(|r| !r.is_matched())
            .map(|r| r.entry.clone())
            .collect();

        let playlist = if self.options.commit {
            let result = PlaylistBuilder::new(&self.session)
                .with_batch_size(self.options.batch_size)
                .build(&spec, &resolved)
                .await?;
            Some(result)
        } else {
            info!(
                "Dry run: would add {} tracks to '{}'",
                resolved_count, spec.name
            );
            None
        };

        Ok(RunReport {
            date,
            spec,
            entries_found: entries.len(),
            resolved_count,
            skipped,
            playlist,
        })
    }

    fn progress_bar(&self) -> ProgressBar {
        if !self.options.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb.set_message("Searching Spotify");
        pb
    }
}

pub fn print_summary(report: &RunReport) {
    println!();
    println!("{}", "=".repeat(60));
    println!("{}", "CHART PLAYLIST SUMMARY".bold());
    println!("{}", "=".repeat(60));
    println!("Chart date: {}", report.date);
    println!("Chart entries found: {}", report.entries_found);
    println!(
        "Found on Spotify: {}",
        report.resolved_count.to_string().green()
    );
    println!("Skipped: {}", report.skipped.len().to_string().red());
    println!("Match rate: {:.1}%", report.match_rate());

    match &report.playlist {
        Some(playlist) => {
            println!(
                "Playlist: {} ({})",
                playlist.name.green(),
                playlist.playlist_id
            );
            println!("Tracks added: {}", playlist.added_count);
            if let Some(failure) = &playlist.failed_batch {
                println!(
                    "{}",
                    format!(
                        "Batch {} failed, {} tracks not added: {}",
                        failure.batch, failure.not_appended, failure.reason
                    )
                    .red()
                );
            }
        }
        None => {
            println!(
                "Playlist: {} {}",
                report.spec.name.cyan(),
                "(dry run, not created)".yellow()
            );
        }
    }
    println!("{}", "=".repeat(60));

    if !report.skipped.is_empty() {
        println!("\nSkipped entries:");
        for entry in &report.skipped {
            println!("  - {}", entry.to_string().yellow());
        }
    }
}
