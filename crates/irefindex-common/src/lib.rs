//! iRefIndex RDF common library
//!
//! Shared error taxonomy and logging setup for the iRefIndex RDF workspace.
//!
//! - **Errors**: [`IrefError`] covers the I/O-facing failures (archives, downloads,
//!   output files, configuration) that every member can hit
//! - **Logging**: [`logging::init_logging`] wires `tracing` to console and/or rolling files
//!
//! # Example
//!
//! ```no_run
//! use irefindex_common::logging::{init_logging, LogConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let _guard = init_logging(&LogConfig::from_env()?)?;
//!     tracing::info!("converter started");
//!     Ok(())
//! }
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod error;
pub mod logging;

pub use error::{IrefError, Result};
