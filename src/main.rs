//! Main entry point for the tubefront CLI

use anyhow::{bail, Context};
use clap::{CommandFactory, Parser};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tubefront::cli::{Args, Command, OutputFormatter, VerbosityLevel};
use tubefront::controller::Action;
use tubefront::core::{DownloadPhase, SearchMode};
use tubefront::{BackendClient, Frontend, MemoryPage};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbosity_level())?;
    info!("Starting tubefront with args: {:?}", args);

    let formatter = OutputFormatter::new(args.verbosity_level());

    let Some(command) = args.command.clone() else {
        Args::command().print_help()?;
        return Ok(());
    };

    let backend = Arc::new(
        BackendClient::with_config(args.client_config()).context("Failed to build HTTP client")?,
    );
    debug!("Backend at {}", backend.base_url());
    let page = Arc::new(if args.is_channel_page() {
        MemoryPage::channel_page()
    } else {
        MemoryPage::search_page()
    });
    let context = args.page_context().context("Invalid --page-url")?;
    debug!("Page context: {:?}", context);

    let frontend = Frontend::new(page.clone(), backend, context);
    let start_time = Instant::now();

    match command {
        Command::Search { query, mode } => {
            let mode = SearchMode::from(mode);
            frontend.search().set_mode(mode);

            let spinner = formatter.start_spinner(mode.loading_message());
            let outcome = frontend.search().submit_search(&query.join(" ")).await;
            formatter.finish_spinner(spinner);

            let set = outcome.context("Search failed")?;
            formatter.print_results(&set);
        }
        Command::Options { video_id } => {
            let spinner = formatter.start_spinner("Loading download options...");
            let outcome = frontend.downloads().open_download_modal(&video_id).await;
            formatter.finish_spinner(spinner);

            let phase = outcome.context("Failed to load download options")?;
            match frontend.downloads().session() {
                Some(session) if phase == DownloadPhase::OptionsReady => {
                    formatter.print_download_options(&page, &session)
                }
                _ => {
                    formatter.print_download_outcome(&page, phase);
                    bail!("No download options for {}", video_id);
                }
            }
        }
        Command::Download { video_id, itag } => {
            let spinner = formatter.start_spinner("Preparing download...");
            let outcome = frontend
                .downloads()
                .download_stream(&video_id, itag)
                .await;
            formatter.finish_spinner(spinner);

            let phase = outcome.context("Download failed")?;
            formatter.print_download_outcome(&page, phase);
            if phase != DownloadPhase::DownloadSucceeded {
                bail!("Download of {} (itag {}) failed", video_id, itag);
            }
        }
        Command::Save {
            video_id,
            title,
            thumbnail,
        } => {
            let response = frontend
                .player()
                .save_video(&video_id, &title, &thumbnail)
                .await
                .context("Could not save video")?;
            if response.success {
                formatter.success(&response.message);
            } else {
                formatter.warning(&response.message);
            }
        }
        Command::Play { video_id } => {
            frontend
                .dispatch(Action::Play {
                    video_id: video_id.clone(),
                })
                .await
                .context("This page has no player")?;
            formatter.print_player(&video_id, frontend.player().is_logged_in());
        }
    }

    if args.show_markup {
        formatter.print_markup(&page);
    }
    formatter.debug(&format!("Done in {:?}", start_time.elapsed()));

    Ok(())
}

/// Initialize logging system
fn init_logging(verbosity: VerbosityLevel) -> anyhow::Result<()> {
    // RUST_LOG wins over the verbosity flags
    let default_level = match verbosity {
        VerbosityLevel::Quiet => "error",
        VerbosityLevel::Normal => "info",
        VerbosityLevel::Verbose => "debug",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(())
}
