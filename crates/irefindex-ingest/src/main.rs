//! irefindex-ingest - iRefIndex MITAB 2.6 to RDF converter

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::{ArgAction, Parser};
use irefindex_common::logging::{init_logging, LogConfig, LogLevel};
use irefindex_ingest::config::{
    ConvertConfig, FileSelection, RecordErrorPolicy, DEFAULT_DOWNLOAD_URL, DEFAULT_INDIR,
    DEFAULT_OUTDIR, DEFAULT_RELEASE, DEFAULT_VERSION,
};
use irefindex_ingest::pipeline;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "irefindex-ingest")]
#[command(author, version, about = "Convert iRefIndex PSI-MITAB 2.6 files to RDF")]
struct Cli {
    /// `all` or a comma-separated list of 10090,10116,4932,559292,562,6239,7227,9606,other
    #[arg(short, long, env = "IREFINDEX_FILES", default_value = "all")]
    files: FileSelection,

    /// Directory to download into and parse from
    #[arg(long, env = "IREFINDEX_INDIR", default_value = DEFAULT_INDIR)]
    indir: PathBuf,

    /// Directory to place converted files
    #[arg(long, env = "IREFINDEX_OUTDIR", default_value = DEFAULT_OUTDIR)]
    outdir: PathBuf,

    /// Dated version of the files to convert
    #[arg(long = "source-version", env = "IREFINDEX_VERSION", default_value = DEFAULT_VERSION)]
    source_version: String,

    /// Graph URI; produces N-Quads instead of N-Triples
    #[arg(long, env = "IREFINDEX_GRAPH_URI")]
    graph_uri: Option<String>,

    /// Gzip the output
    #[arg(long, env = "IREFINDEX_GZIP", default_value_t = true, action = ArgAction::Set)]
    gzip: bool,

    /// Download the archives even when present locally
    #[arg(long, env = "IREFINDEX_DOWNLOAD", default_value_t = false, action = ArgAction::Set)]
    download: bool,

    /// Directory URL holding the MITAB archives
    #[arg(long, env = "IREFINDEX_DOWNLOAD_URL", default_value = DEFAULT_DOWNLOAD_URL)]
    download_url: String,

    /// Bio2RDF release number
    #[arg(long, env = "IREFINDEX_RELEASE", default_value = DEFAULT_RELEASE)]
    release: String,

    /// What to do with records that cannot be converted
    #[arg(long, env = "IREFINDEX_ON_RECORD_ERROR", value_enum, default_value_t = RecordErrorPolicy::Skip)]
    on_record_error: RecordErrorPolicy,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl From<Cli> for ConvertConfig {
    fn from(cli: Cli) -> Self {
        ConvertConfig::default()
            .with_files(cli.files)
            .with_indir(cli.indir)
            .with_outdir(cli.outdir)
            .with_version(cli.source_version)
            .with_graph_uri(cli.graph_uri)
            .with_gzip(cli.gzip)
            .with_download(cli.download)
            .with_download_url(cli.download_url)
            .with_release(cli.release)
            .with_record_error_policy(cli.on_record_error)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };

    // Environment variables take precedence
    let log_config = LogConfig::builder()
        .level(log_level)
        .log_file_prefix("irefindex-ingest")
        .build()
        .with_env_overrides()?;
    let _guard = init_logging(&log_config)?;

    let started = Instant::now();
    let start_time = chrono::Local::now();
    let config = ConvertConfig::from(cli);
    info!(files = %config.files, indir = %config.indir.display(), outdir = %config.outdir.display(), "Starting conversion");

    let summary = pipeline::run(&config).await?;

    info!(
        started = %start_time.format("%A %e %B @ %l:%M:%S %P"),
        finished = %chrono::Local::now().format("%A %e %B @ %l:%M:%S %P"),
        took_secs = started.elapsed().as_secs_f64(),
        statements = summary.totals.statements,
        "Finished"
    );
    Ok(())
}
