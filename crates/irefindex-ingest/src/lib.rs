//! iRefIndex MITAB to RDF
//!
//! Converts iRefIndex PSI-MITAB 2.6 dumps into Bio2RDF-style N-Triples or N-Quads.
//!
//! # Overview
//!
//! - **mitab**: header check, identifier decoding, typed record view, group
//!   bookkeeping and the record-to-statement mapper
//! - **rdf**: statement model, Bio2RDF name resolution and serialization
//! - **pipeline**: archive to output file, plus the run driver
//! - **download**: FTP/HTTP retrieval of the source archives
//! - **dataset**: the run's dataset description
//!
//! # Example
//!
//! ```no_run
//! use irefindex_ingest::config::{ConvertConfig, FileSelection};
//! use irefindex_ingest::pipeline;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ConvertConfig::default()
//!         .with_files("9606".parse::<FileSelection>()?)
//!         .with_outdir("./rdf");
//!     let summary = pipeline::run(&config).await?;
//!     println!("{} statements", summary.totals.statements);
//!     Ok(())
//! }
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod archive;
pub mod config;
pub mod dataset;
pub mod download;
pub mod mitab;
pub mod pipeline;
pub mod rdf;

pub use config::{ConvertConfig, FileSelection, RecordErrorPolicy};
pub use mitab::{MitabError, MitabRecord, RecordMapper};
