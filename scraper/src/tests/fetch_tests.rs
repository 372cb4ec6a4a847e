use super::OFFLINE_BASE;
use crate::fetch::{FetchError, Fetcher};
use anyhow::Result;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_new_creates_the_cache_directory() -> Result<()> {
    let root = TempDir::new()?;
    let cache_dir = root.path().join("nested").join("cache");

    let _fetcher = Fetcher::new(OFFLINE_BASE, &cache_dir)?;
    assert!(cache_dir.is_dir());
    Ok(())
}

#[test]
fn test_cached_page_short_circuits_the_network() -> Result<()> {
    let cache = TempDir::new()?;
    fs::write(cache.path().join("comic_2002-09-05.html"), "<html>cached</html>")?;

    let fetcher = Fetcher::new(OFFLINE_BASE, cache.path())?;
    let url = format!("{}/comic/2002-09-05", OFFLINE_BASE);

    // The URL is unroutable, so success here proves the network was never
    // consulted, and both reads return the same bytes.
    let first = fetcher.fetch_page(&url, "comic_2002-09-05.html")?;
    let second = fetcher.fetch_page(&url, "comic_2002-09-05.html")?;

    assert_eq!(first, "<html>cached</html>");
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_page_fetch_failure_leaves_no_cache_file() -> Result<()> {
    let cache = TempDir::new()?;
    let fetcher = Fetcher::new(OFFLINE_BASE, cache.path())?;

    let result = fetcher.fetch_page(
        &format!("{}/comic/2002-09-05", OFFLINE_BASE),
        "comic_2002-09-05.html",
    );

    assert!(matches!(result, Err(FetchError::Request { .. })));
    assert!(!fetcher.is_cached("comic_2002-09-05.html"));
    Ok(())
}

#[test]
fn test_existing_image_is_never_overwritten() -> Result<()> {
    let cache = TempDir::new()?;
    fs::write(cache.path().join("comic_2002-09-05.png"), b"original bytes")?;

    let fetcher = Fetcher::new(OFFLINE_BASE, cache.path())?;
    fetcher.download_image(
        &format!("{}/comics/20020905.png", OFFLINE_BASE),
        "comic_2002-09-05.png",
    )?;

    let bytes = fs::read(cache.path().join("comic_2002-09-05.png"))?;
    assert_eq!(bytes, b"original bytes");
    Ok(())
}

#[test]
fn test_image_download_failure_leaves_no_cache_file() -> Result<()> {
    let cache = TempDir::new()?;
    let fetcher = Fetcher::new(OFFLINE_BASE, cache.path())?;

    let result = fetcher.download_image(
        &format!("{}/comics/20020905.png", OFFLINE_BASE),
        "comic_2002-09-05.png",
    );

    assert!(matches!(result, Err(FetchError::Request { .. })));
    assert!(!fetcher.is_cached("comic_2002-09-05.png"));
    Ok(())
}

#[test]
fn test_cache_path_layout() -> Result<()> {
    let cache = TempDir::new()?;
    let fetcher = Fetcher::new(OFFLINE_BASE, cache.path())?;

    assert_eq!(
        fetcher.cache_path("comic_2002-09-05.html"),
        cache.path().join("comic_2002-09-05.html")
    );
    assert!(!fetcher.is_cached("comic_2002-09-05.html"));
    Ok(())
}
