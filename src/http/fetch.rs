use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use tokio::io::AsyncWriteExt;

use crate::error::HttpError;

const DEFAULT_TIMEOUT_SECS: u64 = 60;
const USER_AGENT: &str = concat!("utilbelt/", env!("CARGO_PKG_VERSION"));

/// Settings for [`Fetcher`].
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Total time allowed for a request, body included
    pub timeout: Duration,
    /// Value of the `User-Agent` header
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl FetchConfig {
    /// Create a config for small resources that should arrive fast
    pub fn quick() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            ..Self::default()
        }
    }

    /// Create a config for large downloads over slow links
    pub fn patient() -> Self {
        Self {
            timeout: Duration::from_secs(300),
            ..Self::default()
        }
    }
}

/// Downloads whole resources over HTTP.
///
/// This covers the common "get this URL" case only; build requests with
/// `reqwest` directly for anything more involved.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Result<Self, HttpError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()
            .map_err(HttpError::Client)?;

        Ok(Self { client })
    }

    /// Get the body of `url`.
    ///
    /// A status other than 200 is reported as [`HttpError::NotOk`], which
    /// still carries the body.
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>, HttpError> {
        log::debug!("Fetching {}", url);
        let response = self.get(url).await?;
        let status = response.status();

        let body = response
            .bytes()
            .await
            .map_err(|source| HttpError::Request {
                url: url.to_string(),
                source,
            })?
            .to_vec();

        if status != StatusCode::OK {
            return Err(HttpError::NotOk {
                url: url.to_string(),
                status: status.to_string(),
                body: Some(body),
                path: None,
            });
        }
        Ok(body)
    }

    /// Stream the body of `url` to a file in `dir` and return its path.
    ///
    /// Without a `filename` the last segment of the URL path is used. The
    /// file is written even for a status other than 200; the resulting
    /// [`HttpError::NotOk`] then carries its path.
    pub async fn save(
        &self,
        url: &str,
        dir: &Path,
        filename: Option<&str>,
    ) -> Result<PathBuf, HttpError> {
        let filename = match filename.filter(|name| !name.is_empty()) {
            Some(name) => name.to_string(),
            None => filename_from_url(url).ok_or_else(|| HttpError::NoFilename(url.to_string()))?,
        };
        let path = dir.join(filename);
        log::debug!("Saving {} to {}", url, path.display());

        let mut response = self.get(url).await?;
        let status = response.status();

        let io_error = |source| HttpError::FileIo {
            path: path.clone(),
            source,
        };
        let mut output = tokio::fs::File::create(&path).await.map_err(io_error)?;
        while let Some(chunk) = response.chunk().await.map_err(|source| HttpError::Request {
            url: url.to_string(),
            source,
        })? {
            output.write_all(&chunk).await.map_err(io_error)?;
        }
        output.flush().await.map_err(io_error)?;

        if status != StatusCode::OK {
            return Err(HttpError::NotOk {
                url: url.to_string(),
                status: status.to_string(),
                body: None,
                path: Some(path),
            });
        }
        Ok(path)
    }

    async fn get(&self, url: &str) -> Result<Response, HttpError> {
        self.client
            .get(url)
            .send()
            .await
            .map_err(|source| HttpError::Request {
                url: url.to_string(),
                source,
            })
    }
}

fn filename_from_url(url: &str) -> Option<String> {
    let last = match url::Url::parse(url) {
        Ok(parsed) => parsed.path_segments()?.next_back()?.to_string(),
        Err(_) => url.rsplit('/').next()?.to_string(),
    };
    (!last.is_empty()).then_some(last)
}

/// [`Fetcher::fetch`] with the default configuration.
pub async fn fetch(url: &str) -> Result<Vec<u8>, HttpError> {
    Fetcher::new(FetchConfig::default())?.fetch(url).await
}

/// [`Fetcher::save`] with the default configuration.
pub async fn save(url: &str, dir: &Path, filename: Option<&str>) -> Result<PathBuf, HttpError> {
    Fetcher::new(FetchConfig::default())?
        .save(url, dir, filename)
        .await
}
