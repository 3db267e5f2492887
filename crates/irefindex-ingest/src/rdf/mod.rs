//! RDF statement model, naming and serialization
//!
//! - **statement**: qualified names, objects and statements
//! - **vocab**: prefixes, classes and predicates of the iRefIndex vocabulary
//! - **namespace**: the qualified-name resolver (Bio2RDF conventions)
//! - **writer**: statement sinks, N-Triples/N-Quads output, gzip files

pub mod namespace;
pub mod statement;
pub mod vocab;
pub mod writer;

pub use namespace::{Bio2RdfResolver, QNameResolver, SharedResolver};
pub use statement::{LiteralTag, Object, QName, Statement};
pub use writer::{NTriplesWriter, OutputFile, StatementSink};
