use crate::fetch::Fetcher;
use crate::scrape::{scrape_comic, ScrapeFailure};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::thread;
use std::time::Duration;

/// Outcome of one date in a harvest run: the resolved image URL, or why
/// that date was skipped.
#[derive(Debug)]
pub struct HarvestRecord {
    pub date: String,
    pub result: Result<String, ScrapeFailure>,
}

/// Scrape every date in order, one at a time, pausing `delay` between
/// consecutive dates so the site never sees a burst of requests.
///
/// A failed date is recorded and the loop moves on; the output always has
/// one record per input date, in input order.
pub fn harvest(
    fetcher: &Fetcher,
    base_url: &str,
    dates: &[String],
    delay: Duration,
) -> Vec<HarvestRecord> {
    let mut records = Vec::with_capacity(dates.len());

    for (index, date) in dates.iter().enumerate() {
        println!("📅 Fetching comic for date: {}", date);

        let result = scrape_comic(fetcher, base_url, date);
        if let Err(failure) = &result {
            println!(" - ❌ {}", failure);
        }

        records.push(HarvestRecord {
            date: date.clone(),
            result,
        });

        if index + 1 < dates.len() {
            thread::sleep(delay);
        }
    }

    records
}

/// Keep only the dates within the inclusive `from..=to` range. A date that
/// does not parse as `YYYY-MM-DD` is dropped once any bound is set; with no
/// bounds the listing passes through untouched.
pub fn restrict_dates(
    dates: Vec<String>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Vec<String> {
    if from.is_none() && to.is_none() {
        return dates;
    }

    dates
        .into_iter()
        .filter(|date| match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
            Ok(parsed) => {
                from.map_or(true, |bound| parsed >= bound)
                    && to.map_or(true, |bound| parsed <= bound)
            }
            Err(_) => false,
        })
        .collect()
}

pub fn print_report(records: &[HarvestRecord]) {
    println!("\n📦 All downloaded comics:");
    for record in records {
        match &record.result {
            Ok(url) => println!("{}: {}", record.date, url),
            Err(failure) => println!("{}: ❌ Failed ({})", record.date, failure),
        }
    }
}

#[derive(Debug, Serialize)]
struct ReportEntry<'a> {
    date: &'a str,
    url: Option<&'a str>,
    error: Option<String>,
}

/// Write the harvest results to a JSON file, one entry per date in harvest
/// order.
pub fn save_report(records: &[HarvestRecord], path: &Path) -> Result<()> {
    let entries: Vec<ReportEntry> = records
        .iter()
        .map(|record| match &record.result {
            Ok(url) => ReportEntry {
                date: &record.date,
                url: Some(url.as_str()),
                error: None,
            },
            Err(failure) => ReportEntry {
                date: &record.date,
                url: None,
                error: Some(failure.to_string()),
            },
        })
        .collect();

    let json = serde_json::to_string_pretty(&entries).context("Failed to serialize report")?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(())
}
