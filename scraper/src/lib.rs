// Export the harvester modules
pub mod fetch;
pub mod harvest;
pub mod scrape;

// Re-export tests for integration testing
#[cfg(test)]
pub mod tests;

// Re-export key types and functions for easier access
pub use crate::fetch::{FetchError, Fetcher};
pub use crate::harvest::{harvest, print_report, restrict_dates, save_report, HarvestRecord};
pub use crate::scrape::{
    extract_archive_dates, find_comic_image, image_extension, scrape_comic, ScrapeFailure,
};
