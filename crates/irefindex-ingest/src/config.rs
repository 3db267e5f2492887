//! Conversion run settings

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use irefindex_common::{IrefError, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// Per-organism MITAB files published with each release
pub const AVAILABLE_FILES: &[&str] = &[
    "10090", "10116", "4932", "559292", "562", "6239", "7227", "9606", "other",
];

/// Token of the combined file
pub const ALL_FILES: &str = "all";

pub const DEFAULT_INDIR: &str = "/data/download/irefindex/";
pub const DEFAULT_OUTDIR: &str = "/data/rdf/irefindex/";
pub const DEFAULT_VERSION: &str = "03022013";
pub const DEFAULT_DOWNLOAD_URL: &str =
    "ftp://ftp.no.embnet.org/irefindex/data/current/psi_mitab/MITAB2.6/";
pub const DEFAULT_RELEASE: &str = "3";

/// Which files to convert.
///
/// `All` is the combined release file (`All.mitab.<version>.txt.zip`), not the
/// union of the per-organism files.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileSelection {
    #[default]
    All,
    Subset(Vec<String>),
}

impl FileSelection {
    pub fn tokens(&self) -> Vec<&str> {
        match self {
            FileSelection::All => vec![ALL_FILES],
            FileSelection::Subset(tokens) => tokens.iter().map(String::as_str).collect(),
        }
    }
}

impl FromStr for FileSelection {
    type Err = IrefError;

    /// `all` or a comma-separated list of file tokens
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case(ALL_FILES) {
            return Ok(FileSelection::All);
        }

        let mut tokens: Vec<String> = Vec::new();
        for token in s.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let token = token.to_lowercase();
            if !AVAILABLE_FILES.contains(&token.as_str()) {
                return Err(IrefError::Config(format!(
                    "Unknown file '{}', expected 'all' or any of {}",
                    token,
                    AVAILABLE_FILES.join(",")
                )));
            }
            if !tokens.contains(&token) {
                tokens.push(token);
            }
        }

        if tokens.is_empty() {
            return Err(IrefError::Config("No files selected".to_string()));
        }
        Ok(FileSelection::Subset(tokens))
    }
}

impl fmt::Display for FileSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileSelection::All => f.write_str("all"),
            FileSelection::Subset(tokens) => f.write_str(&tokens.join(",")),
        }
    }
}

/// What to do with a record that cannot be represented
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum RecordErrorPolicy {
    /// Log the record (file and line) and continue
    #[default]
    Skip,
    /// Stop converting the current file
    Abort,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertConfig {
    pub files: FileSelection,
    pub indir: PathBuf,
    pub outdir: PathBuf,
    /// Dated release token embedded in the published file names
    pub version: String,
    /// Named graph; switches the output to N-Quads
    pub graph_uri: Option<String>,
    pub gzip: bool,
    /// Download even when the archive is already present
    pub download: bool,
    pub download_url: String,
    /// Bio2RDF release number used in the dataset node
    pub release: String,
    pub on_record_error: RecordErrorPolicy,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            files: FileSelection::All,
            indir: PathBuf::from(DEFAULT_INDIR),
            outdir: PathBuf::from(DEFAULT_OUTDIR),
            version: DEFAULT_VERSION.to_string(),
            graph_uri: None,
            gzip: true,
            download: false,
            download_url: DEFAULT_DOWNLOAD_URL.to_string(),
            release: DEFAULT_RELEASE.to_string(),
            on_record_error: RecordErrorPolicy::Skip,
        }
    }
}

impl ConvertConfig {
    pub fn with_files(mut self, files: FileSelection) -> Self {
        self.files = files;
        self
    }

    pub fn with_indir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.indir = dir.into();
        self
    }

    pub fn with_outdir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.outdir = dir.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_graph_uri(mut self, graph_uri: Option<String>) -> Self {
        self.graph_uri = graph_uri;
        self
    }

    pub fn with_gzip(mut self, gzip: bool) -> Self {
        self.gzip = gzip;
        self
    }

    pub fn with_download(mut self, download: bool) -> Self {
        self.download = download;
        self
    }

    pub fn with_download_url(mut self, url: impl Into<String>) -> Self {
        self.download_url = url.into();
        self
    }

    pub fn with_release(mut self, release: impl Into<String>) -> Self {
        self.release = release.into();
        self
    }

    pub fn with_record_error_policy(mut self, policy: RecordErrorPolicy) -> Self {
        self.on_record_error = policy;
        self
    }

    /// Text file inside the archive, e.g. `Other.mitab.03022013.txt`
    pub fn member_name(&self, token: &str) -> String {
        format!("{}.mitab.{}.txt", ucfirst(token), self.version)
    }

    pub fn archive_name(&self, token: &str) -> String {
        format!("{}.zip", self.member_name(token))
    }

    pub fn archive_path(&self, token: &str) -> PathBuf {
        self.indir.join(self.archive_name(token))
    }

    pub fn quads(&self) -> bool {
        self.graph_uri.is_some()
    }

    fn extension(&self) -> &'static str {
        if self.quads() {
            "nq"
        } else {
            "nt"
        }
    }

    /// Converted file name, e.g. `irefindex-9606.nt.gz`
    pub fn output_name(&self, token: &str) -> String {
        let name = format!("irefindex-{}.{}", token, self.extension());
        if self.gzip {
            format!("{}.gz", name)
        } else {
            name
        }
    }

    pub fn output_path(&self, token: &str) -> PathBuf {
        self.outdir.join(self.output_name(token))
    }

    /// Dataset description file, never compressed
    pub fn dataset_file_name(&self) -> String {
        format!("bio2rdf-irefindex.{}", self.extension())
    }

    pub fn dataset_path(&self) -> PathBuf {
        self.outdir.join(self.dataset_file_name())
    }

    pub fn validate(&self) -> Result<()> {
        if self.version.trim().is_empty() {
            return Err(IrefError::Config("Version must not be empty".to_string()));
        }
        if self.release.trim().is_empty() {
            return Err(IrefError::Config("Release must not be empty".to_string()));
        }

        let url = Url::parse(&self.download_url).map_err(|e| {
            IrefError::Config(format!("Invalid download URL '{}': {}", self.download_url, e))
        })?;
        if !matches!(url.scheme(), "ftp" | "http" | "https") {
            return Err(IrefError::Config(format!(
                "Unsupported download scheme '{}'",
                url.scheme()
            )));
        }

        if let Some(graph) = &self.graph_uri {
            Url::parse(graph).map_err(|e| {
                IrefError::Config(format!("Invalid graph URI '{}': {}", graph, e))
            })?;
        }

        check_dir_target(&self.indir)?;
        check_dir_target(&self.outdir)?;
        Ok(())
    }
}

/// A directory setting must not point at an existing regular file
fn check_dir_target(path: &Path) -> Result<()> {
    if path.is_file() {
        return Err(IrefError::Config(format!(
            "{} exists and is not a directory",
            path.display()
        )));
    }
    Ok(())
}

fn ucfirst(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
