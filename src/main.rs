// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};
use tubeset::utils::logging::{format_stat, format_success, format_warning};
use tubeset::{Config, EnrichmentPipeline, ReportPipeline, YouTubeClient};

#[derive(Parser)]
#[command(name = "tubeset")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Channel avatar enrichment and HTML report for a YouTube video dataset", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch channel avatars from the YouTube Data API and merge them into the dataset
    Enrich {
        /// Dataset file; the backup is written next to it
        #[arg(short, long, value_name = "FILE")]
        dataset: Option<PathBuf>,

        #[arg(long, env = "YOUTUBE_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        #[arg(long, value_name = "NUM")]
        batch_size: Option<usize>,

        #[arg(long)]
        no_progress: bool,
    },

    /// Render the dataset as an HTML grid grouped by channel
    Report {
        #[arg(short, long, value_name = "FILE")]
        dataset: Option<PathBuf>,

        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tubeset::utils::logging::init_logger(cli.color, cli.verbose);

    let config = if cli.config.exists() {
        info!("Loading configuration from: {}", cli.config.display());
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        Config::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            Config::default_config()
        })
    };

    match cli.command {
        Commands::Enrich {
            dataset,
            api_key,
            batch_size,
            no_progress,
        } => {
            let mut config = config;
            if let Some(path) = dataset {
                config = config.with_dataset(path);
            }
            if api_key.is_some() {
                config.api.api_key = api_key;
            }
            if let Some(size) = batch_size {
                config.api.batch_size = size;
            }
            config.validate().context("Invalid configuration")?;

            cmd_enrich(&config, !no_progress).await?;
        }
        Commands::Report { dataset, output } => {
            let mut config = config;
            if let Some(path) = dataset {
                config = config.with_dataset(path);
            }
            if let Some(path) = output {
                config.report.output_path = path;
            }

            cmd_report(&config)?;
        }
    }

    Ok(())
}

async fn cmd_enrich(config: &Config, show_progress: bool) -> Result<()> {
    let client = YouTubeClient::new(&config.api).context(
        "YouTube API key missing: set YOUTUBE_API_KEY, pass --api-key or fill api.api_key",
    )?;

    let pipeline = EnrichmentPipeline::new(config, client).with_progress(show_progress);
    let stats = pipeline.run().await.context("Avatar enrichment failed")?;

    println!("{}", "=".repeat(60));
    println!("{}", format_success("Enrichment finished"));
    println!("{}", format_stat("Total entries", stats.total_records));
    println!("{}", format_stat("Unique channels", stats.unique_channels));
    println!("{}", format_stat("Avatars fetched", stats.avatars_found));
    println!("{}", format_stat("Entries enriched", stats.records_enriched));
    println!("{}", format_stat("Coverage", format!("{:.1}%", stats.coverage())));
    println!("{}", format_stat("Dataset saved", stats.dataset_path.display()));
    println!("{}", format_stat("Backup created", stats.backup_path.display()));
    if stats.batches_failed > 0 {
        println!(
            "{}",
            format_warning(&format!(
                "{} of {} batches failed and were skipped",
                stats.batches_failed, stats.batches_sent
            ))
        );
    }
    info!("Enrichment complete in {:.2}s", stats.duration.as_secs_f64());

    Ok(())
}

fn cmd_report(config: &Config) -> Result<()> {
    let stats = ReportPipeline::new(config)
        .run()
        .with_context(|| format!("Failed to build report from {}", config.dataset.path.display()))?;

    println!();
    println!(
        "{}",
        format_success(&format!(
            "Report generated: {}",
            stats.output_path.display()
        ))
    );
    println!("{}", format_stat("Size", format!("{:.2} MB", stats.output_megabytes())));
    println!("{}", format_stat("YouTubers", stats.channels));
    println!("{}", format_stat("Videos", stats.videos));
    println!(
        "{}",
        format_stat(
            "Average",
            format!("{:.1} videos per YouTuber", stats.average_videos_per_channel())
        )
    );

    if !stats.top_channels.is_empty() {
        println!("\nTop {} YouTubers by video count:", stats.top_channels.len());
        for (rank, (name, count)) in stats.top_channels.iter().enumerate() {
            println!("   {}. {}: {} videos", rank + 1, name, count);
        }
    }

    Ok(())
}
