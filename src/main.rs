use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use chart2spotify::pipeline::print_summary;
use chart2spotify::{
    AppError, ChartExtractor, ChartPlaylistPipeline, Config, MatchStrategy, PipelineOptions,
    SpotifyClient, validate_date,
};

#[derive(Parser)]
#[command(name = "chart2spotify")]
#[command(about = "Create a Spotify playlist from a historical Billboard Hot 100 chart")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a playlist from the chart of a given date
    Create {
        /// Chart date in YYYY-MM-DD format (prompted for when omitted)
        date: Option<String>,

        /// Actually create the playlist (default is a dry run)
        #[arg(long)]
        commit: bool,

        /// Tracks per "add items" request (capped at 100)
        #[arg(long, default_value_t = 100)]
        batch_size: usize,

        /// Concurrent Spotify searches
        #[arg(long, default_value_t = 4)]
        concurrency: usize,

        /// How to pick a track among search results
        #[arg(long, value_enum, default_value_t = MatchStrategy::First)]
        match_strategy: MatchStrategy,
    },

    /// Show setup guide
    Setup,
}

fn setup_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_tracing(cli.verbose);

    match cli.command {
        Commands::Create {
            date,
            commit,
            batch_size,
            concurrency,
            match_strategy,
        } => {
            let options = PipelineOptions {
                commit,
                batch_size,
                concurrency,
                strategy: match_strategy,
                show_progress: true,
            };
            create_playlist(date, options).await?;
        }
        Commands::Setup => {
            show_setup_guide();
        }
    }

    Ok(())
}

async fn create_playlist(date: Option<String>, options: PipelineOptions) -> Result<()> {
    println!("{}", "Billboard Hot 100 to Spotify".cyan().bold());
    println!("{}", "=".repeat(50));

    let date_input = match date {
        Some(date) => date,
        None => prompt_for_date()?,
    };

    // Reject bad input before authenticating or touching the network
    if let Err(e @ AppError::InvalidDate(_)) = validate_date(&date_input) {
        println!("{}", e.to_string().red());
        return Ok(());
    }

    if !options.commit {
        println!(
            "{}",
            "DRY RUN MODE - No playlist will be created (use --commit)".yellow()
        );
    }

    let config = Config::from_env().context("Failed to load configuration")?;

    let blank = config.blank_credentials();
    if !blank.is_empty() {
        println!("{}", "Blank configuration values:".red());
        for item in &blank {
            println!("   - {}", item);
        }
        println!(
            "\n{}",
            "Set non-empty values in the environment or a .env file (see `chart2spotify setup`).".yellow()
        );
        std::process::exit(1);
    }

    let extractor =
        ChartExtractor::new(&config.chart_base_url).context("Invalid chart configuration")?;
    let session = SpotifyClient::new(&config)
        .await
        .context("Failed to connect to Spotify")?;

    let pipeline = ChartPlaylistPipeline::new(extractor, session, options);
    let report = pipeline.run(&date_input).await?;

    print_summary(&report);

    if report.is_dry_run() {
        println!("\n{}", "Dry run completed - no changes made".yellow());
    } else {
        println!("\n{}", "Playlist created!".green());
    }

    Ok(())
}

fn prompt_for_date() -> Result<String> {
    print!("Which date do you want to make a playlist of? Type the date in format YYYY-MM-DD: ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .context("Failed to read date")?;

    Ok(input.trim().to_string())
}

fn show_setup_guide() {
    println!("{}", "chart2spotify Setup Guide".cyan().bold());
    println!("{}", "=".repeat(50));

    println!("\n{}", "1. Spotify API Setup".yellow());
    println!("   - Go to https://developer.spotify.com/dashboard/");
    println!("   - Create a new app");
    println!("   - Copy your Client ID and Client Secret");
    println!("   - Add 'http://127.0.0.1:8888/callback' as a redirect URI");

    println!("\n{}", "2. Configuration".yellow());
    println!("   - Create a .env file with:");
    println!("     SPOTIFY_CLIENT_ID=your_spotify_client_id");
    println!("     SPOTIFY_CLIENT_SECRET=your_spotify_client_secret");
    println!("     SPOTIFY_REDIRECT_URI=http://127.0.0.1:8888/callback");
    println!("   - Optionally override the chart source with CHART_BASE_URL");

    println!("\n{}", "3. Usage".yellow());
    println!("   - chart2spotify create                    (prompts for a date, dry run)");
    println!("   - chart2spotify create 1999-12-31         (dry run for a date)");
    println!("   - chart2spotify create 1999-12-31 --commit (create the playlist)");
    println!("   - chart2spotify create 1999-12-31 --match-strategy exact --commit");

    println!("\n{}", "Ready to build playlists!".green());
}
