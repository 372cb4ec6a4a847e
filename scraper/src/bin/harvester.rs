use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use smbc_scraper::{extract_archive_dates, harvest, print_report, restrict_dates, save_report, Fetcher};
use std::path::PathBuf;
use std::time::Duration;

/// Archive the SMBC back catalog: walk the archive listing and download
/// every comic page and image into a local cache.
#[derive(Debug, Parser)]
#[command(name = "harvester")]
struct Args {
    /// Base URL of the comic site
    #[arg(long, default_value = "https://www.smbc-comics.com")]
    base_url: String,

    /// Directory where fetched pages and images are kept
    #[arg(long, default_value = "cache")]
    cache_dir: PathBuf,

    /// Pause between comics, in milliseconds
    #[arg(long, default_value_t = 1500)]
    delay_ms: u64,

    /// Only harvest the first N comics from the listing
    #[arg(long)]
    limit: Option<usize>,

    /// Skip comics published before this date (YYYY-MM-DD)
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Skip comics published after this date (YYYY-MM-DD)
    #[arg(long)]
    to: Option<NaiveDate>,

    /// Write the harvest results to this JSON file
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("🚀 Starting harvest");

    let fetcher = Fetcher::new(&args.base_url, &args.cache_dir)
        .with_context(|| format!("Failed to set up cache at {}", args.cache_dir.display()))?;

    // The archive page carries a date dropdown with one option per comic.
    let listing_url = format!("{}/comic/archive", args.base_url);
    let listing_html = fetcher
        .fetch_page(&listing_url, "archive.html")
        .context("Failed to fetch the archive listing")?;

    let mut dates = extract_archive_dates(&listing_html);
    println!("Found {} comics in the archive listing", dates.len());

    dates = restrict_dates(dates, args.from, args.to);
    if let Some(limit) = args.limit {
        dates.truncate(limit);
    }

    let records = harvest(
        &fetcher,
        &args.base_url,
        &dates,
        Duration::from_millis(args.delay_ms),
    );

    print_report(&records);

    if let Some(output) = &args.output {
        save_report(&records, output)?;
        println!("\nResults saved to {}", output.display());
    }

    Ok(())
}
