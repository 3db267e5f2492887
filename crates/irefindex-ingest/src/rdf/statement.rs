//! Statement model
//!
//! Subjects and predicates are always qualified names; expansion to full IRIs is the
//! resolver's job at serialization time, so the mapper never sees a naming scheme.

use std::fmt;

/// Prefixed name such as `irefindex_vocabulary:method` or `uniprot:P12345`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QName {
    prefix: String,
    local: String,
}

impl QName {
    pub fn new(prefix: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            local: local.into(),
        }
    }

    /// Split `prefix:local` on the first colon
    pub fn parse(value: &str) -> Option<Self> {
        let (prefix, local) = value.split_once(':')?;
        if prefix.is_empty() {
            return None;
        }
        Some(Self::new(prefix, local))
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn local(&self) -> &str {
        &self.local
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.prefix, self.local)
    }
}

/// How a literal is qualified
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiteralTag {
    Plain,
    Datatype(QName),
    Language(String),
}

/// Object position of a statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Object {
    /// A graph node named by a qualified name
    Node(QName),
    /// An absolute IRI outside any managed namespace (e.g. a web page)
    Iri(String),
    Literal { value: String, tag: LiteralTag },
}

impl Object {
    pub fn as_node(&self) -> Option<&QName> {
        match self {
            Object::Node(qname) => Some(qname),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Object::Literal { value, .. } => Some(value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub subject: QName,
    pub predicate: QName,
    pub object: Object,
}

impl Statement {
    pub fn node(subject: QName, predicate: QName, object: QName) -> Self {
        Self {
            subject,
            predicate,
            object: Object::Node(object),
        }
    }

    pub fn iri(subject: QName, predicate: QName, iri: impl Into<String>) -> Self {
        Self {
            subject,
            predicate,
            object: Object::Iri(iri.into()),
        }
    }

    pub fn literal(subject: QName, predicate: QName, value: impl Into<String>) -> Self {
        Self {
            subject,
            predicate,
            object: Object::Literal {
                value: value.into(),
                tag: LiteralTag::Plain,
            },
        }
    }

    pub fn typed_literal(
        subject: QName,
        predicate: QName,
        value: impl Into<String>,
        datatype: QName,
    ) -> Self {
        Self {
            subject,
            predicate,
            object: Object::Literal {
                value: value.into(),
                tag: LiteralTag::Datatype(datatype),
            },
        }
    }

    pub fn lang_literal(
        subject: QName,
        predicate: QName,
        value: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            subject,
            predicate,
            object: Object::Literal {
                value: value.into(),
                tag: LiteralTag::Language(language.into()),
            },
        }
    }
}
