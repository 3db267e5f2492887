//! Shared helpers for the integration tests
//!
//! Records start as 54 `-` fields; tests set only the columns they care about.

#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::Path;

use irefindex_ingest::mitab::COLUMN_COUNT;
use irefindex_ingest::rdf::{Bio2RdfResolver, QName};
use irefindex_ingest::RecordMapper;
use zip::write::SimpleFileOptions;

/// Builder for one MITAB data line
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    fields: Vec<String>,
}

impl RecordBuilder {
    /// Minimal pairwise interaction `rigid:<rigid>` between P1 and P2
    pub fn pairwise(rigid: &str) -> Self {
        Self {
            fields: vec!["-".to_string(); COLUMN_COUNT],
        }
        .set(0, "uniprotkb:P1")
        .set(1, "uniprotkb:P2")
        .set(13, &format!("rigid:{}", rigid))
        .set(30, "2010/05/18")
        .set(52, "X")
    }

    pub fn set(mut self, column: usize, value: &str) -> Self {
        self.fields[column] = value.to_string();
        self
    }

    pub fn line(&self) -> String {
        format!("{}\n", self.fields.join("\t"))
    }
}

/// `#`-prefixed header with `columns` names
pub fn header(columns: usize) -> String {
    let names: Vec<String> = (0..columns).map(|i| format!("column{}", i)).collect();
    format!("#{}\n", names.join("\t"))
}

pub fn mitab(records: &[RecordBuilder]) -> String {
    let mut text = header(COLUMN_COUNT);
    for record in records {
        text.push_str(&record.line());
    }
    text
}

/// Write a single-member zip the way iRefIndex publishes them
pub fn write_archive(path: &Path, member: &str, content: &str) {
    let mut writer = zip::ZipWriter::new(File::create(path).unwrap());
    writer.start_file(member, SimpleFileOptions::default()).unwrap();
    writer.write_all(content.as_bytes()).unwrap();
    writer.finish().unwrap();
}

pub fn mapper() -> RecordMapper {
    RecordMapper::new(
        Bio2RdfResolver::new().shared(),
        QName::new("irefindex_resource", "bio2rdf.dataset.irefindex.R3"),
    )
    .unwrap()
}
