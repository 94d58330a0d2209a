use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use console::Emoji;
use indicatif::{ProgressBar, ProgressStyle};

use sumppi::{
    NoopReporter, ProgressEvent, ProgressReporter, ReqwestClient, S3Store, SeriesEndpoint,
    SharedProgressReporter, StorageLocation, generate_and_upload, generate_to_file,
    latest_for_series, local_feed_filename,
};

// Emoji with fallback for terminals without Unicode support
static MICROPHONE: Emoji<'_, '_> = Emoji("🎙️  ", "");
static SEARCH: Emoji<'_, '_> = Emoji("🔍 ", "[~] ");
static HEADPHONES: Emoji<'_, '_> = Emoji("🎧 ", "[i] ");
static UPLOAD: Emoji<'_, '_> = Emoji("📤 ", "[^] ");
static SUCCESS: Emoji<'_, '_> = Emoji("✅ ", "[+] ");
static CALENDAR: Emoji<'_, '_> = Emoji("📅 ", "[d] ");

/// Generate an RSS podcast feed for a series
#[derive(Parser, Debug)]
#[command(name = "sumppi")]
#[command(about = "Generate an RSS podcast feed from a podcast series")]
#[command(version)]
struct Args {
    /// GUID of the podcast series
    guid: String,

    /// Directory the feed file is written to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Upload the feed to s3://bucket/key instead of writing a file
    #[arg(short, long, value_name = "S3_PATH", conflicts_with = "latest")]
    upload: Option<String>,

    /// AWS region used for uploads
    #[arg(long, requires = "upload")]
    region: Option<String>,

    /// Print the date of the latest episode and exit
    #[arg(short, long)]
    latest: bool,

    /// Series API URL template, with {guid} as placeholder
    #[arg(long, value_name = "TEMPLATE")]
    endpoint: Option<String>,

    /// Quiet mode - suppress progress output
    #[arg(short, long)]
    quiet: bool,
}

/// Progress reporter using an indicatif spinner
struct SpinnerReporter {
    bar: ProgressBar,
}

impl SpinnerReporter {
    fn new() -> Self {
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} {wide_msg}")
            .unwrap();

        let bar = ProgressBar::new_spinner();
        bar.set_style(style);
        bar.enable_steady_tick(std::time::Duration::from_millis(100));

        Self { bar }
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressReporter for SpinnerReporter {
    fn report(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::FetchingSeries { guid } => {
                self.bar
                    .set_message(format!("{SEARCH}Fetching series: {}", guid.cyan()));
            }

            ProgressEvent::SeriesFetched {
                title,
                author,
                episode_count,
            } => {
                self.bar.set_message(format!(
                    "{HEADPHONES}{} by {} • {} episodes",
                    title.bold().green(),
                    author.yellow(),
                    episode_count.to_string().cyan()
                ));
            }

            ProgressEvent::UploadingFeed { location } => {
                self.bar
                    .set_message(format!("{UPLOAD}Uploading to {}", location.cyan()));
            }

            ProgressEvent::FeedGenerated { .. }
            | ProgressEvent::FeedWritten { .. }
            | ProgressEvent::FeedUploaded { .. } => {}
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    if !args.quiet {
        println!(
            "\n{}{} {}\n",
            MICROPHONE,
            "sumppi".bold().magenta(),
            "- Podcast Feed Generator".dimmed()
        );
    }

    let client = ReqwestClient::new();
    let endpoint = args
        .endpoint
        .as_deref()
        .map(SeriesEndpoint::new)
        .unwrap_or_default();

    let spinner = (!args.quiet).then(|| Arc::new(SpinnerReporter::new()));
    let reporter: SharedProgressReporter = match &spinner {
        Some(spinner) => spinner.clone() as SharedProgressReporter,
        None => NoopReporter::shared(),
    };

    let (emoji, message) = if args.latest {
        let date = latest_for_series(&client, &endpoint, &args.guid, &reporter).await;
        finish(&spinner);
        let date = date.context("Failed to find latest episode")?;
        (&CALENDAR, format!("Latest episode date: {date}"))
    } else if let Some(s3_path) = &args.upload {
        let location = StorageLocation::parse(s3_path).context("Invalid upload target")?;
        let store = S3Store::connect(args.region.as_deref())
            .await
            .context("Failed to initialize S3 client")?;

        let outcome =
            generate_and_upload(&client, &endpoint, &store, &args.guid, &location, &reporter)
                .await;
        finish(&spinner);
        (&SUCCESS, outcome.context("Failed to upload feed")?.summary())
    } else {
        let filename = local_feed_filename(&args.guid, None);
        let outcome = generate_to_file(
            &client,
            &endpoint,
            &args.guid,
            &args.output_dir,
            &filename,
            &reporter,
        )
        .await;
        finish(&spinner);
        (&SUCCESS, outcome.context("Failed to generate feed")?.summary())
    };

    if args.quiet {
        println!("{message}");
    } else {
        println!("{emoji}{}\n", message.green());
    }

    Ok(())
}

fn finish(spinner: &Option<Arc<SpinnerReporter>>) {
    if let Some(spinner) = spinner {
        spinner.finish();
    }
}
