//! Compound identifier decoding
//!
//! MITAB identifier columns hold tokens of the form `namespace:identifier(label)`,
//! several of them `|`-separated when a column lists alternatives:
//!
//! ```text
//! uniprotkb:P12345(GENEX_HUMAN)
//! psi-mi:"MI:0018"(two hybrid)
//! rogid:UcdngwpTSS6hG/pvQGgpp40u67I9606|irogid:1234
//! ```

use regex::Regex;

use super::{Result, ABSENT};
use crate::rdf::{QName, SharedResolver};

/// Namespaces that carry counts rather than identifiers; never graph nodes
pub const STATISTIC_NAMESPACES: &[&str] = &["hpr", "lpr", "hp", "np"];

/// A decoded `namespace:identifier(label)` token
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DecodedIdentifier {
    /// Normalized namespace; empty when absent or suppressed
    pub namespace: String,
    /// Identifier with surrounding whitespace and quotes removed
    pub identifier: String,
    /// Parenthesized label, empty when none
    pub label: String,
    /// Node name, `None` when the token must not become a node
    pub qname: Option<QName>,
}

impl DecodedIdentifier {
    pub fn is_statistic(&self) -> bool {
        STATISTIC_NAMESPACES.contains(&self.namespace.as_str())
    }

    /// Label if the token had one, else the identifier
    pub fn display_text(&self) -> &str {
        if self.label.is_empty() {
            &self.identifier
        } else {
            &self.label
        }
    }
}

pub struct IdentifierDecoder {
    label_pattern: Regex,
    resolver: SharedResolver,
}

impl IdentifierDecoder {
    pub fn new(resolver: SharedResolver) -> Result<Self> {
        // Greedy on both sides: the label is the last parenthesized group
        let label_pattern = Regex::new(r"(.*)\((.*)\)")?;
        Ok(Self {
            label_pattern,
            resolver,
        })
    }

    pub fn resolver(&self) -> &SharedResolver {
        &self.resolver
    }

    /// Decode a single token
    pub fn decode(&self, token: &str) -> DecodedIdentifier {
        let token = token.trim();
        let (namespace, remainder) = token.split_once(':').unwrap_or(("", token));

        let (identifier, label) = match self.label_pattern.captures(remainder) {
            Some(caps) => (
                caps.get(1).map_or("", |m| m.as_str()),
                caps.get(2).map_or("", |m| m.as_str()),
            ),
            None => (remainder, ""),
        };
        let identifier = identifier.trim().replace('"', "");
        let label = label.trim().to_string();

        let namespace = match namespace.trim() {
            "other" | "xx" => "",
            "complex" => "rogid",
            ns => ns,
        }
        .to_string();

        let qname = if namespace.is_empty()
            || identifier.is_empty()
            || STATISTIC_NAMESPACES.contains(&namespace.as_str())
        {
            None
        } else {
            Some(self.resolver.resolve(&namespace, &identifier))
        };

        DecodedIdentifier {
            namespace,
            identifier,
            label,
            qname,
        }
    }

    /// Decode only the first `|` alternative of a field
    pub fn decode_first(&self, field: &str) -> DecodedIdentifier {
        let first = field.split('|').next().unwrap_or(field);
        self.decode(first)
    }

    /// Decode every `|` alternative, skipping absent (`-`) and empty ones
    pub fn decode_all<'a>(&'a self, field: &'a str) -> impl Iterator<Item = DecodedIdentifier> + 'a {
        field
            .split('|')
            .map(str::trim)
            .filter(|alt| !alt.is_empty() && *alt != ABSENT)
            .map(move |alt| self.decode(alt))
    }
}
