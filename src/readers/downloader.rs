use crate::error::{IbtracsError, Result};
use crate::utils::progress::ProgressReporter;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_LENGTH;
use std::fs;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{info, warn};

/// What [`Downloader::ensure_local`] did with the local file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Downloaded { bytes: u64 },
    UpToDate,
    /// Remote size could not be determined; the local copy was kept.
    KeptLocal,
}

/// Fetches the track file from a fixed URL when the local copy is missing
/// or its size disagrees with the server's Content-Length.
///
/// One attempt per call, no retries, transport-default timeouts.
pub struct Downloader {
    client: Client,
    url: String,
    verify_remote_size: bool,
}

impl Downloader {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url = url.into();
        let client = Client::builder()
            .build()
            .map_err(|source| IbtracsError::Download {
                url: url.clone(),
                source,
            })?;

        Ok(Self {
            client,
            url,
            verify_remote_size: true,
        })
    }

    /// Skip the HEAD request when a local file already exists.
    pub fn with_verify_remote_size(mut self, verify_remote_size: bool) -> Self {
        self.verify_remote_size = verify_remote_size;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn ensure_local(
        &self,
        path: &Path,
        progress: Option<&ProgressReporter>,
    ) -> Result<FetchOutcome> {
        let local_size = local_size(path)?;

        if let Some(size) = local_size {
            if !self.verify_remote_size {
                return Ok(FetchOutcome::UpToDate);
            }
            match self.remote_size() {
                Some(remote) if remote == size => {
                    info!(
                        path = %path.display(),
                        bytes = size,
                        "file already exists with the expected size"
                    );
                    return Ok(FetchOutcome::UpToDate);
                }
                Some(remote) => {
                    info!(
                        local = size,
                        remote,
                        "local file size differs from remote, downloading again"
                    );
                }
                None => return Ok(FetchOutcome::KeptLocal),
            }
        }

        if let Some(p) = progress {
            p.set_message(&format!("Downloading {}...", self.url));
        }
        let bytes = self.download(path)?;
        if let Some(p) = progress {
            p.println(&format!("Downloaded {} bytes to {}", bytes, path.display()));
        }

        Ok(FetchOutcome::Downloaded { bytes })
    }

    /// Content-Length advertised by a HEAD request, if any.
    fn remote_size(&self) -> Option<u64> {
        let response = match self.client.head(&self.url).send() {
            Ok(response) => response,
            Err(e) => {
                warn!(url = %self.url, error = %e, "HEAD request failed, keeping local file");
                return None;
            }
        };

        let size = response
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());

        if size.is_none() {
            warn!(url = %self.url, "no Content-Length advertised, keeping local file");
        }
        size
    }

    /// Download into a temp file next to `path`, then rename into place.
    fn download(&self, path: &Path) -> Result<u64> {
        let parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent)?;

        info!(url = %self.url, path = %path.display(), "downloading track file");

        let mut response = self
            .client
            .get(&self.url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|source| self.download_error(source))?;

        let mut temp_file = NamedTempFile::new_in(parent)?;
        let bytes = response
            .copy_to(&mut temp_file)
            .map_err(|source| self.download_error(source))?;
        temp_file.as_file().sync_all()?;
        temp_file.persist(path).map_err(|e| IbtracsError::Io(e.error))?;

        info!(bytes, "file downloaded successfully");
        Ok(bytes)
    }

    fn download_error(&self, source: reqwest::Error) -> IbtracsError {
        IbtracsError::Download {
            url: self.url.clone(),
            source,
        }
    }
}

fn local_size(path: &Path) -> Result<Option<u64>> {
    match fs::metadata(path) {
        Ok(meta) => Ok(Some(meta.len())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}
