//! Conversion pipeline
//!
//! For each selected file: make sure the archive is present (downloading it when
//! missing or when asked to), stream the zip member line by line through the
//! record mapper, and write the statements to the output file. After the last
//! file, the dataset description is written next to the outputs.
//!
//! Group bookkeeping lives in the mapper, which is carried from file to file so a
//! group shared by two organism files is still described only once per run.

use std::io::BufRead;
use std::ops::AddAssign;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{debug, info, warn};

use crate::archive;
use crate::config::{ConvertConfig, RecordErrorPolicy};
use crate::dataset::{dataset_qname, DatasetDescription, NAMESPACE};
use crate::download;
use crate::mitab::{validate_header, GroupStore, MitabError, MitabRecord, RecordMapper};
use crate::rdf::{Bio2RdfResolver, NTriplesWriter, OutputFile, StatementSink};

const PROGRESS_INTERVAL: u64 = 100_000;

/// Counters for one converted file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileStats {
    /// Lines read, header included
    pub lines: u64,
    pub records: u64,
    pub skipped: u64,
    pub statements: u64,
}

impl AddAssign for FileStats {
    fn add_assign(&mut self, other: Self) {
        self.lines += other.lines;
        self.records += other.records;
        self.skipped += other.skipped;
        self.statements += other.statements;
    }
}

#[derive(Debug, Clone)]
pub struct FileReport {
    pub token: String,
    pub output: PathBuf,
    pub stats: FileStats,
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub files: Vec<FileReport>,
    pub totals: FileStats,
    pub groups_described: usize,
    pub dataset_file: PathBuf,
}

/// Convert one MITAB stream.
///
/// The header is checked before anything is emitted; a bad header fails the whole
/// stream. Record errors follow `policy`.
pub fn convert<R, S, K>(
    source: &str,
    reader: &mut R,
    mapper: &mut RecordMapper<S>,
    sink: &mut K,
    policy: RecordErrorPolicy,
) -> Result<FileStats>
where
    R: BufRead + ?Sized,
    S: GroupStore,
    K: StatementSink + ?Sized,
{
    let mut stats = FileStats::default();
    let mut buf = Vec::with_capacity(4096);

    if reader
        .read_until(b'\n', &mut buf)
        .with_context(|| format!("Failed to read header of {}", source))?
        == 0
    {
        return Err(MitabError::EmptyInput).with_context(|| format!("{}: no header", source));
    }
    stats.lines += 1;
    let columns = validate_header(&String::from_utf8_lossy(&buf))
        .with_context(|| format!("{}:1: invalid header", source))?;
    debug!(source, columns, "Header accepted");

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .with_context(|| format!("Failed to read {} after line {}", source, stats.lines))?;
        if read == 0 {
            break;
        }
        stats.lines += 1;

        let line = String::from_utf8_lossy(&buf);
        if line.trim().is_empty() {
            continue;
        }

        let mapped = MitabRecord::parse(&line).and_then(|record| mapper.map(&record));
        let statements = match mapped {
            Ok(statements) => statements,
            Err(e) if e.is_record_error() && policy == RecordErrorPolicy::Skip => {
                warn!(source, line = stats.lines, error = %e, "Skipping record");
                stats.skipped += 1;
                continue;
            },
            Err(e) => {
                return Err(e).with_context(|| format!("{}:{}", source, stats.lines));
            },
        };

        for statement in &statements {
            sink.emit(statement)
                .with_context(|| format!("Failed to write output for {}:{}", source, stats.lines))?;
        }
        stats.records += 1;
        stats.statements += statements.len() as u64;

        if stats.records % PROGRESS_INTERVAL == 0 {
            info!(source, records = stats.records, statements = stats.statements, "Progress");
        }
    }

    sink.flush()
        .with_context(|| format!("Failed to flush output for {}", source))?;
    Ok(stats)
}

/// Convert one selected file from its archive into its output file.
///
/// On failure no output file is left behind.
pub fn convert_archive<S: GroupStore>(
    config: &ConvertConfig,
    token: &str,
    mapper: &mut RecordMapper<S>,
) -> Result<FileReport> {
    let output = config.output_path(token);
    match write_output(config, token, mapper, &output) {
        Ok(stats) => Ok(FileReport {
            token: token.to_string(),
            output,
            stats,
        }),
        Err(e) => {
            if let Err(remove) = std::fs::remove_file(&output) {
                warn!(path = %output.display(), error = %remove, "Failed to remove partial output");
            }
            Err(e)
        },
    }
}

fn write_output<S: GroupStore>(
    config: &ConvertConfig,
    token: &str,
    mapper: &mut RecordMapper<S>,
    output: &Path,
) -> Result<FileStats> {
    let archive_path = config.archive_path(token);
    let member = config.member_name(token);

    let file = OutputFile::create(output, config.gzip)?;
    let mut writer =
        NTriplesWriter::new(file, mapper.resolver().clone()).with_graph(config.graph_uri.clone());

    let stats = archive::with_member(&archive_path, &member, |reader| {
        convert(&member, reader, mapper, &mut writer, config.on_record_error)
    })
    .with_context(|| format!("Unable to read {} from {}", member, archive_path.display()))??;

    writer
        .into_inner()
        .and_then(OutputFile::finish)
        .with_context(|| format!("Failed to finish {}", output.display()))?;
    Ok(stats)
}

/// Download a file's archive when it is missing or a download is forced
pub async fn ensure_archive(config: &ConvertConfig, token: &str) -> Result<PathBuf> {
    let path = config.archive_path(token);
    let exists = tokio::fs::try_exists(&path).await.unwrap_or(false);
    if !exists {
        info!(path = %path.display(), "Archive not found, will attempt to download");
    }

    if config.download || !exists {
        let bytes = download::fetch(&config.download_url, &config.archive_name(token), &path)
            .await
            .with_context(|| format!("Error downloading {}", config.archive_name(token)))?;
        debug!(path = %path.display(), bytes, "Archive ready");
    }
    Ok(path)
}

/// Full run: every selected file, then the dataset description
pub async fn run(config: &ConvertConfig) -> Result<RunSummary> {
    config.validate()?;
    tokio::fs::create_dir_all(&config.indir)
        .await
        .with_context(|| format!("Failed to create {}", config.indir.display()))?;
    tokio::fs::create_dir_all(&config.outdir)
        .await
        .with_context(|| format!("Failed to create {}", config.outdir.display()))?;

    let resolver = Bio2RdfResolver::new().shared();
    let mut mapper = RecordMapper::new(resolver.clone(), dataset_qname(NAMESPACE, &config.release))?;

    let mut files = Vec::new();
    let mut totals = FileStats::default();

    for token in config.files.tokens() {
        ensure_archive(config, token).await?;

        info!(file = token, "Processing");
        let started = Instant::now();
        let (returned, report) = tokio::task::spawn_blocking({
            let config = config.clone();
            let token = token.to_string();
            move || {
                let report = convert_archive(&config, &token, &mut mapper);
                (mapper, report)
            }
        })
        .await
        .context("Conversion task panicked")?;
        mapper = returned;
        let report = report?;

        info!(
            file = token,
            lines = report.stats.lines,
            records = report.stats.records,
            skipped = report.stats.skipped,
            statements = report.stats.statements,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Done"
        );
        totals += report.stats;
        files.push(report);
    }

    let description = DatasetDescription::new(
        &config.release,
        &config.version,
        &config.download_url,
        files
            .iter()
            .map(|f| config.output_name(&f.token))
            .collect(),
        Utc::now().date_naive(),
    );
    let dataset_file = config.dataset_path();
    write_description(&description, &dataset_file, config.graph_uri.clone(), resolver)?;
    info!(path = %dataset_file.display(), "Wrote dataset description");

    info!(
        files = files.len(),
        records = totals.records,
        skipped = totals.skipped,
        statements = totals.statements,
        groups = mapper.groups().described_count(),
        "Conversion complete"
    );

    Ok(RunSummary {
        files,
        totals,
        groups_described: mapper.groups().described_count(),
        dataset_file,
    })
}

fn write_description(
    description: &DatasetDescription,
    path: &Path,
    graph: Option<String>,
    resolver: crate::rdf::SharedResolver,
) -> Result<()> {
    let file = OutputFile::create(path, false)?;
    let mut writer = NTriplesWriter::new(file, resolver).with_graph(graph);
    for statement in description.statements() {
        writer.emit(&statement)?;
    }
    writer.into_inner()?.finish()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mitab::COLUMN_COUNT;
    use crate::rdf::{QName, Statement};
    use std::io::Cursor;

    fn mapper() -> RecordMapper {
        RecordMapper::new(
            Bio2RdfResolver::new().shared(),
            QName::new("irefindex_resource", "bio2rdf.dataset.irefindex.R3"),
        )
        .unwrap()
    }

    fn header() -> String {
        let names: Vec<String> = (0..COLUMN_COUNT).map(|i| format!("c{}", i)).collect();
        format!("#{}\n", names.join("\t"))
    }

    fn record(rigid: &str) -> String {
        let mut fields = vec!["-"; COLUMN_COUNT];
        fields[0] = "uniprotkb:P1";
        fields[1] = "uniprotkb:P2";
        fields[13] = rigid;
        fields[52] = "X";
        format!("{}\n", fields.join("\t"))
    }

    #[test]
    fn test_convert_counts() {
        let input = format!("{}{}\n{}", header(), record("rigid:a"), record("rigid:b"));
        let mut sink: Vec<Statement> = Vec::new();
        let stats = convert(
            "test",
            &mut Cursor::new(input),
            &mut mapper(),
            &mut sink,
            RecordErrorPolicy::Skip,
        )
        .unwrap();

        assert_eq!(stats.lines, 4);
        assert_eq!(stats.records, 2);
        assert_eq!(stats.skipped, 0);
        assert_eq!(stats.statements, sink.len() as u64);
    }

    #[test]
    fn test_skip_and_abort_policies() {
        let input = format!("{}short\tline\n{}", header(), record("rigid:a"));

        let mut sink: Vec<Statement> = Vec::new();
        let stats = convert(
            "test",
            &mut Cursor::new(input.clone()),
            &mut mapper(),
            &mut sink,
            RecordErrorPolicy::Skip,
        )
        .unwrap();
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.records, 1);

        let mut sink: Vec<Statement> = Vec::new();
        let err = convert(
            "test",
            &mut Cursor::new(input),
            &mut mapper(),
            &mut sink,
            RecordErrorPolicy::Abort,
        )
        .unwrap_err();
        assert!(format!("{:#}", err).contains("test:2"));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let mut sink: Vec<Statement> = Vec::new();
        let err = convert(
            "empty",
            &mut Cursor::new(Vec::new()),
            &mut mapper(),
            &mut sink,
            RecordErrorPolicy::Skip,
        )
        .unwrap_err();
        assert!(matches!(err.downcast_ref::<MitabError>(), Some(MitabError::EmptyInput)));
    }

    #[test]
    fn test_file_stats_add() {
        let mut total = FileStats::default();
        total += FileStats { lines: 3, records: 2, skipped: 0, statements: 20 };
        total += FileStats { lines: 2, records: 0, skipped: 1, statements: 0 };
        assert_eq!(total, FileStats { lines: 5, records: 2, skipped: 1, statements: 20 });
    }
}
