//! Source archive download
//!
//! Archives come from an FTP mirror by default; HTTP(S) mirrors work too. Data is
//! written to a `.part` file next to the destination and renamed once complete, so
//! an interrupted transfer never looks like a valid archive.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use irefindex_common::IrefError;
use suppaftp::{FtpError, FtpStream};
use tracing::{debug, info, warn};
use url::Url;

/// Maximum number of attempts for one FTP transfer
pub const MAX_RETRIES: u32 = 3;

/// Base delay between attempts; multiplied by the attempt number
pub const RETRY_DELAY_SECS: u64 = 5;

#[derive(Debug, Clone)]
pub struct FtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

impl FtpConfig {
    /// Anonymous login against the URL's host
    pub fn from_url(url: &Url) -> Result<Self> {
        let host = url
            .host_str()
            .with_context(|| format!("No host in {}", url))?
            .to_string();
        Ok(Self {
            host,
            port: url.port().unwrap_or(21),
            username: "anonymous".to_string(),
            password: "anonymous@bio2rdf.org".to_string(),
        })
    }
}

pub struct FtpClient {
    config: FtpConfig,
}

impl FtpClient {
    pub fn new(config: FtpConfig) -> Self {
        Self { config }
    }

    /// Download `path` into `dest`, retrying transient failures with linear backoff
    pub async fn download_to(&self, path: &str, dest: &Path) -> Result<u64> {
        for attempt in 1..=MAX_RETRIES {
            debug!("Download attempt {}/{} for: {}", attempt, MAX_RETRIES, path);

            match tokio::task::spawn_blocking({
                let config = self.config.clone();
                let path = path.to_string();
                let dest = dest.to_path_buf();
                move || Self::download_sync(&config, &path, &dest)
            })
            .await
            {
                Ok(Ok(bytes)) => {
                    info!("Downloaded {} ({} bytes)", path, bytes);
                    return Ok(bytes);
                },
                Ok(Err(e)) if e.is_transient() && attempt < MAX_RETRIES => {
                    let delay = RETRY_DELAY_SECS * attempt as u64;
                    warn!(
                        "Download attempt {}/{} failed: {}. Retrying in {}s...",
                        attempt, MAX_RETRIES, e, delay
                    );
                    tokio::time::sleep(Duration::from_secs(delay)).await;
                },
                Ok(Err(e)) => {
                    return Err(e).with_context(|| {
                        format!("Failed to download {} after {} attempt(s)", path, attempt)
                    });
                },
                Err(e) => bail!("FTP download task panicked: {}", e),
            }
        }

        bail!("Failed to download {}: no attempts made", path)
    }

    /// One transfer, streamed straight into the `.part` file
    fn download_sync(config: &FtpConfig, path: &str, dest: &Path) -> irefindex_common::Result<u64> {
        debug!("Connecting to FTP server: {}:{}", config.host, config.port);
        let mut ftp_stream = FtpStream::connect(format!("{}:{}", config.host, config.port))
            .map_err(|e| network_error("connect to", &config.host, e))?;

        // EPSV copes with NAT
        ftp_stream.set_mode(suppaftp::Mode::ExtendedPassive);

        ftp_stream
            .login(&config.username, &config.password)
            .map_err(|e| network_error("log in to", &config.host, e))?;
        ftp_stream
            .transfer_type(suppaftp::types::FileType::Binary)
            .map_err(|e| network_error("set binary mode on", &config.host, e))?;

        let part = part_path(dest);
        let mut file = std::fs::File::create(&part)?;
        let transfer = ftp_stream.retr(path, |reader| {
            let written = std::io::copy(reader, &mut file).map_err(FtpError::ConnectionError)?;
            file.flush().map_err(FtpError::ConnectionError)?;
            Ok(written)
        });

        let written = match transfer {
            Ok(written) => written,
            Err(e) => {
                drop(file);
                if let Err(remove) = std::fs::remove_file(&part) {
                    warn!("Failed to remove {}: {}", part.display(), remove);
                }
                return Err(network_error("retrieve", path, e));
            },
        };
        drop(file);
        std::fs::rename(&part, dest)?;

        if let Err(e) = ftp_stream.quit() {
            warn!("Failed to quit FTP session gracefully: {}", e);
        }
        Ok(written)
    }
}

fn network_error(action: &str, target: &str, e: FtpError) -> IrefError {
    IrefError::Network(format!("Failed to {} {}: {}", action, target, e))
}

/// Download `<base_url><file_name>` to `dest`, returning the byte count
pub async fn fetch(base_url: &str, file_name: &str, dest: &Path) -> Result<u64> {
    let url = source_url(base_url, file_name)?;
    info!(url = %url, dest = %dest.display(), "Downloading source archive");

    match url.scheme() {
        "ftp" => FtpClient::new(FtpConfig::from_url(&url)?).download_to(url.path(), dest).await,
        "http" | "https" => download_http(&url, dest).await,
        other => bail!("Unsupported download scheme '{}'", other),
    }
}

/// Join a directory URL and a file name; the base is treated as a directory
pub fn source_url(base_url: &str, file_name: &str) -> Result<Url> {
    let mut base = base_url.to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    let base = Url::parse(&base).with_context(|| format!("Invalid download URL '{}'", base_url))?;
    base.join(file_name)
        .with_context(|| format!("Invalid file name '{}'", file_name))
}

async fn download_http(url: &Url, dest: &Path) -> Result<u64> {
    let response = reqwest::get(url.clone())
        .await
        .map_err(|e| IrefError::Network(format!("Failed to request {}: {}", url, e)))?;
    if !response.status().is_success() {
        return Err(IrefError::Network(format!(
            "Failed to download {}: {}",
            url,
            response.status()
        ))
        .into());
    }

    let total_size = response.content_length().unwrap_or(0);
    let pb = ProgressBar::new(total_size);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg}\n{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({eta})")?
            .progress_chars("#>-"),
    );
    let name = dest
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    pb.set_message(format!("Downloading {}", name));

    let part = part_path(dest);
    let mut file = std::fs::File::create(&part)
        .with_context(|| format!("Failed to create {}", part.display()))?;
    let mut downloaded = 0u64;
    let mut stream = response.bytes_stream();
    let streamed: Result<()> = async {
        while let Some(chunk) = stream.next().await {
            let chunk = chunk
                .map_err(|e| IrefError::Network(format!("Failed to read {}: {}", url, e)))?;
            file.write_all(&chunk)?;
            downloaded += chunk.len() as u64;
            pb.set_position(downloaded);
        }
        file.flush()?;
        Ok(())
    }
    .await;
    drop(file);
    if let Err(e) = streamed {
        pb.abandon();
        if let Err(remove) = std::fs::remove_file(&part) {
            warn!("Failed to remove {}: {}", part.display(), remove);
        }
        return Err(e);
    }
    std::fs::rename(&part, dest)
        .with_context(|| format!("Failed to move {} into place", part.display()))?;

    pb.finish_with_message(format!("Downloaded {}", name));
    Ok(downloaded)
}

fn part_path(dest: &Path) -> PathBuf {
    let mut name = dest.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}
