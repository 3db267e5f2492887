// PSI-MITAB 2.6 (iRefIndex flavour) to RDF statements
//
// A MITAB dump is a '#'-prefixed 54-column header followed by one interaction per
// line. Each line is split into a typed record view, and the mapper turns that view
// into statements about the interaction, its two interactors and the redundancy
// groups they belong to.
//
// - header: column count check on the first line
// - identifier: `namespace:identifier(label)` decoding
// - record: named accessors over the 54 positional fields
// - groups: run-wide "already described" bookkeeping
// - mapper: record -> statements

pub mod groups;
pub mod header;
pub mod identifier;
pub mod mapper;
pub mod record;

pub use groups::{GroupKind, GroupStore, GroupTracker, InMemoryGroupStore, SharedGroupStore};
pub use header::validate_header;
pub use identifier::{DecodedIdentifier, IdentifierDecoder};
pub use mapper::{InteractionKind, RecordMapper};
pub use record::{MitabRecord, Slot};

/// Columns in a MITAB 2.6 line
pub const COLUMN_COUNT: usize = 54;

/// Placeholder for an absent value
pub const ABSENT: &str = "-";

/// Result type for MITAB operations
pub type Result<T> = std::result::Result<T, MitabError>;

/// Error types for MITAB decoding and mapping
#[derive(Debug, thiserror::Error)]
pub enum MitabError {
    #[error("Input is empty, expected a header line")]
    EmptyInput,

    #[error("Expecting {expected} columns in header, found {found}")]
    HeaderColumnCount { expected: usize, found: usize },

    #[error("Expecting {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("Interaction identifier '{0}' does not decode to a node")]
    MissingInteractionId(String),

    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),
}

impl MitabError {
    /// Errors confined to a single record; everything else invalidates the file
    pub fn is_record_error(&self) -> bool {
        matches!(
            self,
            MitabError::FieldCount { .. } | MitabError::MissingInteractionId(_)
        )
    }
}

/// `Some(field)` unless the field is empty or the absent placeholder
pub(crate) fn present(field: &str) -> Option<&str> {
    let trimmed = field.trim();
    if trimmed.is_empty() || trimmed == ABSENT {
        None
    } else {
        Some(trimmed)
    }
}
