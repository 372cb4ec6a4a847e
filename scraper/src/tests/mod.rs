use anyhow::Result;
use std::fs;
use std::path::Path;

pub mod fixtures;

pub mod fetch_tests;

// Unroutable base URL: connecting to port 0 fails immediately, so a test
// that accidentally reaches the network errors out instead of hanging.
pub const OFFLINE_BASE: &str = "http://127.0.0.1:0";

/// Minimal comic page markup with the given image src
pub fn comic_page_html(src: &str) -> String {
    format!(
        r#"<html><body><div id="comic"><img src="{}" id="cc-comic"></div></body></html>"#,
        src
    )
}

/// Helper function to log and save failed HTML for future regression testing
pub fn save_failed_html(html: &str, test_name: &str) -> Result<()> {
    let failures_dir = Path::new("src/tests/fixtures/failures");
    fs::create_dir_all(failures_dir)?;

    let file_path = failures_dir.join(format!("{}.html", test_name));
    fs::write(&file_path, html)?;

    println!("Saved failed HTML to {}", file_path.display());
    Ok(())
}
