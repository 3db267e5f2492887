//! Statement sinks and N-Triples / N-Quads serialization

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use flate2::write::GzEncoder;
use flate2::Compression;
use irefindex_common::{IrefError, Result};
use tracing::debug;

use super::{LiteralTag, Object, QNameResolver, SharedResolver, Statement};

/// Receives statements one at a time, in emission order
pub trait StatementSink {
    fn emit(&mut self, statement: &Statement) -> Result<()>;

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Collecting sink, mostly for tests and small conversions
impl StatementSink for Vec<Statement> {
    fn emit(&mut self, statement: &Statement) -> Result<()> {
        self.push(statement.clone());
        Ok(())
    }
}

/// Line-oriented RDF writer
///
/// Writes N-Triples, or N-Quads when a graph IRI is set.
pub struct NTriplesWriter<W: Write> {
    out: W,
    resolver: SharedResolver,
    graph: Option<String>,
    written: u64,
}

impl<W: Write> NTriplesWriter<W> {
    pub fn new(out: W, resolver: SharedResolver) -> Self {
        Self {
            out,
            resolver,
            graph: None,
            written: 0,
        }
    }

    /// Emit quads into the named graph
    pub fn with_graph(mut self, graph: Option<String>) -> Self {
        self.graph = graph;
        self
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    /// Format one statement as a single line (terminated by `\n`)
    pub fn format(&self, statement: &Statement) -> String {
        format_statement(self.resolver.as_ref(), statement, self.graph.as_deref())
    }

    /// Flush and hand back the underlying writer
    pub fn into_inner(mut self) -> Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<W: Write> StatementSink for NTriplesWriter<W> {
    fn emit(&mut self, statement: &Statement) -> Result<()> {
        let line = self.format(statement);
        self.out.write_all(line.as_bytes())?;
        self.written += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

pub fn format_statement(
    resolver: &(dyn QNameResolver + Send + Sync),
    statement: &Statement,
    graph: Option<&str>,
) -> String {
    let subject = resolver.expand(&statement.subject);
    let predicate = resolver.expand(&statement.predicate);
    let object = match &statement.object {
        Object::Node(qname) => format!("<{}>", resolver.expand(qname)),
        Object::Iri(iri) => format!("<{}>", super::namespace::escape_iri(iri)),
        Object::Literal { value, tag } => {
            let quoted = format!("\"{}\"", escape_literal(value));
            match tag {
                LiteralTag::Plain => quoted,
                LiteralTag::Datatype(datatype) => {
                    format!("{}^^<{}>", quoted, resolver.expand(datatype))
                },
                LiteralTag::Language(language) => format!("{}@{}", quoted, language),
            }
        },
    };

    match graph {
        Some(graph) => format!("<{}> <{}> {} <{}> .\n", subject, predicate, object, graph),
        None => format!("<{}> <{}> {} .\n", subject, predicate, object),
    }
}

/// N-Triples string escaping
pub fn escape_literal(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + 2);
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Output file, optionally gzip-compressed
pub enum OutputFile {
    Plain(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
}

impl OutputFile {
    pub fn create(path: &Path, gzip: bool) -> Result<Self> {
        let file = File::create(path).map_err(|e| {
            IrefError::Output(format!("Unable to create {}: {}", path.display(), e))
        })?;
        let buffered = BufWriter::with_capacity(1 << 20, file);
        debug!(path = %path.display(), gzip, "Opened output file");

        Ok(if gzip {
            OutputFile::Gzip(GzEncoder::new(buffered, Compression::default()))
        } else {
            OutputFile::Plain(buffered)
        })
    }

    /// Write the gzip trailer (if any) and flush everything to disk
    pub fn finish(self) -> Result<()> {
        let mut buffered = match self {
            OutputFile::Plain(buffered) => buffered,
            OutputFile::Gzip(encoder) => encoder.finish()?,
        };
        buffered.flush()?;
        Ok(())
    }
}

impl Write for OutputFile {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            OutputFile::Plain(w) => w.write(buf),
            OutputFile::Gzip(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            OutputFile::Plain(w) => w.flush(),
            OutputFile::Gzip(w) => w.flush(),
        }
    }
}
