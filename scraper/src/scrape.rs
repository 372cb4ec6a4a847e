use crate::fetch::{FetchError, Fetcher};
use scraper::{Html, Selector};

const DATE_OPTION_PREFIX: &str = "comic/";
const DEFAULT_IMAGE_EXT: &str = ".png";

#[derive(Debug, thiserror::Error)]
pub enum ScrapeFailure {
    #[error("{0}")]
    Transport(#[from] FetchError),
    #[error("no comic image found on page")]
    NoImage,
}

/// Pull the comic dates out of the archive page's date dropdown.
///
/// Each archived comic appears as an `<option value="comic/YYYY-MM-DD">`.
/// Options without a value attribute, or whose value points elsewhere, are
/// skipped. Document order is preserved so the result follows the site's
/// own chronology.
pub fn extract_archive_dates(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let option_selector = Selector::parse("option").unwrap();

    document
        .select(&option_selector)
        .filter_map(|option| option.value().attr("value"))
        .filter_map(|value| value.strip_prefix(DATE_OPTION_PREFIX))
        .map(str::to_string)
        .collect()
}

/// Resolve the comic image URL from a comic page.
///
/// The comic lives as the single `<img>` inside the `#comic` container. A
/// relative `src` is resolved against the site base URL.
pub fn find_comic_image(html: &str, base_url: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let img_selector = Selector::parse("#comic img").unwrap();

    let img = document.select(&img_selector).next()?;
    let src = img.value().attr("src")?;

    if src.starts_with("http") {
        Some(src.to_string())
    } else {
        Some(format!("{}{}", base_url, src))
    }
}

/// File extension of an image URL, query string discarded. Defaults to
/// `.png` when the last path segment has no extension.
pub fn image_extension(url: &str) -> String {
    let path = url.split('?').next().unwrap_or(url);
    let name = path.rsplit('/').next().unwrap_or(path);

    match name.rfind('.') {
        Some(idx) if idx + 1 < name.len() => name[idx..].to_string(),
        _ => DEFAULT_IMAGE_EXT.to_string(),
    }
}

/// Scrape a single comic: fetch its page, locate the comic image, and make
/// sure the image bytes are cached.
///
/// Any failure resolves this one date and never propagates further, so the
/// harvest keeps going with the remaining dates.
pub fn scrape_comic(
    fetcher: &Fetcher,
    base_url: &str,
    date: &str,
) -> Result<String, ScrapeFailure> {
    let url = format!("{}/comic/{}", base_url, date);
    let html = fetcher.fetch_page(&url, &format!("comic_{}.html", date))?;

    let image_url = find_comic_image(&html, base_url).ok_or(ScrapeFailure::NoImage)?;

    let ext = image_extension(&image_url);
    fetcher.download_image(&image_url, &format!("comic_{}{}", date, ext))?;

    Ok(image_url)
}
