//! Template download with size checking and bounded retry.
//!
//! A redirect or error page can come back as a `200`, so the advertised
//! size of the payload is compared against a minimum before anything is
//! written to disk. Undersized responses are retried; any other failure
//! is final.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;

use crate::error::{Error, Result};
use crate::output;

/// Response head plus a streaming body.
pub struct HttpResponse {
    pub status: u16,
    /// Value of the `Content-Length` header, when the server sent one
    pub content_length: Option<u64>,
    pub body: Box<dyn Read>,
}

/// Something that can perform a blocking HTTP GET.
pub trait HttpSource {
    /// Sends the request and returns the response without reading the body.
    fn get(&self, url: &str) -> Result<HttpResponse>;
}

/// `HttpSource` backed by a blocking reqwest client.
pub struct ReqwestSource {
    client: Client,
}

impl ReqwestSource {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(format!("next-gen/{}", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(30))
            .timeout(None::<Duration>)
            .build()
            .map_err(|e| Error::RequestError {
                url: String::new(),
                reason: format!("failed to create HTTP client: {}", e),
            })?;
        Ok(Self { client })
    }
}

impl HttpSource for ReqwestSource {
    fn get(&self, url: &str) -> Result<HttpResponse> {
        let response = self.client.get(url).send().map_err(|e| Error::RequestError {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(HttpResponse {
            status: response.status().as_u16(),
            content_length: response.content_length(),
            body: Box::new(response),
        })
    }
}

/// Downloads the template archive, retrying undersized responses.
pub struct Fetcher<'a> {
    source: &'a dyn HttpSource,
    min_size: u64,
    max_retries: u32,
}

impl<'a> Fetcher<'a> {
    pub fn new(source: &'a dyn HttpSource, min_size: u64, max_retries: u32) -> Self {
        Self { source, min_size, max_retries }
    }

    /// Requests `url` until a large enough `200` arrives, returning that
    /// response and the attempt number it came from.
    ///
    /// # Errors
    /// * `Error::BadStatus` on the first non-200 response
    /// * `Error::UndersizedArchive` once `max_retries + 1` attempts were undersized
    /// * `Error::RequestError` if the request could not be sent
    pub fn request(&self, url: &str) -> Result<(HttpResponse, u32)> {
        let max_attempts = self.max_retries.saturating_add(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            debug!("Download attempt {} of {} for '{}'.", attempt, max_attempts, url);

            let response = self.source.get(url)?;
            if response.status != 200 {
                return Err(Error::BadStatus { status: response.status });
            }

            let size = response.content_length.unwrap_or(0);
            output::info(&format!("Downloading {} bytes.", size));

            if size >= self.min_size {
                return Ok((response, attempt));
            }

            output::error("Size is suspiciously small.");
            drop(response);

            if attempt >= max_attempts {
                return Err(Error::UndersizedArchive {
                    attempts: attempt,
                    min_size: self.min_size,
                });
            }
            debug!("Archive of {} bytes is below {} bytes, retrying.", size, self.min_size);
            output::info("Retrying...");
        }
    }

    /// Downloads `url` into `dest`, streaming the body to disk.
    ///
    /// The body is first written to a `.part` sibling of `dest` and only
    /// renamed once complete, so a failed download never leaves a file
    /// under the final name.
    pub fn fetch(&self, url: &str, dest: &Path) -> Result<u64> {
        let (mut response, attempt) = self.request(url)?;
        debug!("Accepted response from attempt {}.", attempt);

        let partial = partial_path(dest);
        let mut file = File::create(&partial).map_err(|source| Error::ArchiveCreateError {
            path: partial.display().to_string(),
            source,
        })?;

        let written = match io::copy(&mut response.body, &mut file) {
            Ok(written) => written,
            Err(e) => {
                drop(file);
                let _ = fs::remove_file(&partial);
                return Err(Error::ArchiveWriteError(e));
            }
        };
        file.sync_all().map_err(Error::ArchiveWriteError)?;
        drop(file);

        fs::rename(&partial, dest).map_err(|source| Error::ArchiveCreateError {
            path: dest.display().to_string(),
            source,
        })?;
        debug!("Wrote {} bytes to '{}'.", written, dest.display());

        Ok(written)
    }
}

/// Path the archive is streamed to before it is complete.
pub fn partial_path(dest: &Path) -> PathBuf {
    let mut name = dest.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".part");
    dest.with_file_name(name)
}
