//! Qualified-name resolution
//!
//! The resolver is the only component that knows naming conventions. It turns a
//! decoded `(namespace, identifier)` pair into the canonical [`QName`] used as a
//! subject or object, and later expands qualified names into absolute IRIs.
//!
//! [`Bio2RdfResolver`] implements the Bio2RDF scheme: well-known vocabularies expand to
//! their W3C/community namespaces, everything else becomes `http://bio2rdf.org/prefix:local`.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::Arc;

use super::{vocab, QName};

/// Shared handle used by the mapper and the writers
pub type SharedResolver = Arc<dyn QNameResolver + Send + Sync>;

pub trait QNameResolver {
    /// Canonical node name for a decoded identifier
    fn resolve(&self, namespace: &str, identifier: &str) -> QName;

    /// Absolute IRI for a qualified name
    fn expand(&self, qname: &QName) -> String;
}

/// Source namespace spellings and their canonical Bio2RDF prefix
const SYNONYMS: &[(&str, &str)] = &[
    ("uniprotkb", "uniprot"),
    ("psi-mi", "mi"),
    ("taxid", "taxon"),
    ("entrezgene", "ncbigene"),
    ("entrez gene/locuslink", "ncbigene"),
    ("entrezgene/locuslink", "ncbigene"),
    ("genbank_protein_gi", "gi"),
    ("refseq", "refseq"),
];

/// iRefIndex-internal identifier schemes, published under `irefindex_<ns>`
const IREFINDEX_SCHEMES: &[&str] = &[
    "rogid", "irogid", "rigid", "irigid", "crogid", "icrogid", "crigid", "icrigid",
];

pub const BIO2RDF_BASE: &str = "http://bio2rdf.org/";

#[derive(Debug, Clone)]
pub struct Bio2RdfResolver {
    base: String,
    standard: HashMap<&'static str, &'static str>,
}

impl Default for Bio2RdfResolver {
    fn default() -> Self {
        Self::with_base(BIO2RDF_BASE)
    }
}

impl Bio2RdfResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver minting non-standard IRIs under `base`
    pub fn with_base(base: impl Into<String>) -> Self {
        let standard = HashMap::from([
            (vocab::RDF, "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
            (vocab::RDFS, "http://www.w3.org/2000/01/rdf-schema#"),
            (vocab::XSD, "http://www.w3.org/2001/XMLSchema#"),
            (vocab::VOID, "http://rdfs.org/ns/void#"),
            (vocab::DC, "http://purl.org/dc/terms/"),
            (vocab::FOAF, "http://xmlns.com/foaf/0.1/"),
            (vocab::PROV, "http://www.w3.org/ns/prov#"),
            (vocab::PAV, "http://purl.org/pav/"),
        ]);
        Self {
            base: base.into(),
            standard,
        }
    }

    pub fn shared(self) -> SharedResolver {
        Arc::new(self)
    }

    /// Canonical prefix for a source namespace
    pub fn canonical_prefix(namespace: &str) -> String {
        let lowered = namespace.trim().to_lowercase();
        if let Some((_, canonical)) = SYNONYMS.iter().find(|(from, _)| *from == lowered) {
            return (*canonical).to_string();
        }
        if IREFINDEX_SCHEMES.contains(&lowered.as_str()) {
            return format!("irefindex_{}", lowered);
        }
        lowered
    }
}

impl QNameResolver for Bio2RdfResolver {
    fn resolve(&self, namespace: &str, identifier: &str) -> QName {
        let prefix = Self::canonical_prefix(namespace);
        let local = match prefix.as_str() {
            // psi-mi:"MI:0018" -> mi:0018
            "mi" => strip_prefix_ignore_case(identifier, "MI:"),
            _ => identifier,
        };
        QName::new(prefix, local)
    }

    fn expand(&self, qname: &QName) -> String {
        match self.standard.get(qname.prefix()) {
            Some(namespace) => format!("{}{}", namespace, escape_iri(qname.local())),
            None => format!(
                "{}{}:{}",
                self.base,
                escape_iri(qname.prefix()),
                escape_iri(qname.local())
            ),
        }
    }
}

fn strip_prefix_ignore_case<'a>(value: &'a str, prefix: &str) -> &'a str {
    match value.get(..prefix.len()) {
        Some(head) if head.eq_ignore_ascii_case(prefix) => &value[prefix.len()..],
        _ => value,
    }
}

/// Percent-encode characters that may not appear in an N-Triples IRI
pub fn escape_iri(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            ' ' | '<' | '>' | '"' | '{' | '}' | '|' | '\\' | '^' | '`' => {
                let _ = write!(escaped, "%{:02X}", c as u32);
            },
            c if c.is_control() => {
                let mut buf = [0u8; 4];
                for byte in c.encode_utf8(&mut buf).bytes() {
                    let _ = write!(escaped, "%{:02X}", byte);
                }
            },
            c => escaped.push(c),
        }
    }
    escaped
}
