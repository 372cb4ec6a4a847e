use reqwest::blocking::Client;
use reqwest::{header, StatusCode};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

// The site rejects requests that look like a default HTTP library client,
// so page fetches identify as a desktop browser.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/114.0.5735.110 Safari/537.36";
const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.5";

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("unexpected status {status} from {url}")]
    Status { url: String, status: StatusCode },
    #[error("cache file {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Downloads pages and images, keeping a copy of everything it fetches in a
/// flat cache directory. A cache file that already exists is returned as-is
/// and the network is never touched, so re-running a harvest only fetches
/// what previous runs missed.
///
/// Strictly single-caller: nothing here locks the cache directory, and two
/// processes racing on the same cache file is unsupported.
pub struct Fetcher {
    client: Client,
    cache_dir: PathBuf,
    referer: String,
}

impl Fetcher {
    /// Create a fetcher rooted at `cache_dir`, creating the directory if
    /// needed. `base_url` is only used as the referer on page requests.
    pub fn new(base_url: &str, cache_dir: impl Into<PathBuf>) -> Result<Self, FetchError> {
        let cache_dir = cache_dir.into();
        fs::create_dir_all(&cache_dir).map_err(|source| FetchError::Io {
            path: cache_dir.clone(),
            source,
        })?;

        Ok(Fetcher {
            client: Client::new(),
            cache_dir,
            referer: format!("{}/", base_url),
        })
    }

    pub fn cache_path(&self, cache_file: &str) -> PathBuf {
        self.cache_dir.join(cache_file)
    }

    pub fn is_cached(&self, cache_file: &str) -> bool {
        self.cache_path(cache_file).exists()
    }

    /// Fetch an HTML page, preferring the cached copy under `cache_file`.
    /// A cache miss hits the network with the browser header set and writes
    /// the body to the cache before returning it.
    pub fn fetch_page(&self, url: &str, cache_file: &str) -> Result<String, FetchError> {
        let cache_path = self.cache_path(cache_file);

        if let Ok(cached) = fs::read_to_string(&cache_path) {
            println!(" - Loading from cache: {}", cache_file);
            return Ok(cached);
        }

        println!(" - Fetching from site: {}", url);
        let response = self
            .client
            .get(url)
            .header(header::USER_AGENT, USER_AGENT)
            .header(header::ACCEPT, ACCEPT)
            .header(header::ACCEPT_LANGUAGE, ACCEPT_LANGUAGE)
            .header(header::REFERER, self.referer.as_str())
            .send()
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.text().map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?;

        write_cache_file(&cache_path, body.as_bytes())?;
        Ok(body)
    }

    /// Download an image into the cache. An existing cache file skips the
    /// network entirely. Image requests carry no special headers.
    pub fn download_image(&self, url: &str, cache_file: &str) -> Result<(), FetchError> {
        let cache_path = self.cache_path(cache_file);

        if cache_path.exists() {
            println!(" - Image already cached");
            return Ok(());
        }

        println!(" - Downloading image");
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let bytes = response.bytes().map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?;

        write_cache_file(&cache_path, &bytes)
    }
}

fn write_cache_file(path: &Path, contents: &[u8]) -> Result<(), FetchError> {
    fs::write(path, contents).map_err(|source| FetchError::Io {
        path: path.to_path_buf(),
        source,
    })
}
