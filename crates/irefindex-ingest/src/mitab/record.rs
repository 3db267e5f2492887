//! Typed view over one MITAB 2.6 line
//!
//! Column numbers are 0-based and follow the iRefIndex MITAB 2.6 README. Each
//! accessor returns the raw field text; decoding is the caller's business.

use std::fmt;

use super::{MitabError, Result, COLUMN_COUNT};

/// Interactor position within a binary record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    A,
    B,
}

impl Slot {
    pub const BOTH: [Slot; 2] = [Slot::A, Slot::B];

    pub fn index(self) -> usize {
        match self {
            Slot::A => 0,
            Slot::B => 1,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Slot::A => "a",
            Slot::B => "b",
        })
    }
}

#[derive(Debug, Clone)]
pub struct MitabRecord<'a> {
    fields: Vec<&'a str>,
}

impl<'a> MitabRecord<'a> {
    /// Split a data line on tabs; anything but 54 fields is an error
    pub fn parse(line: &'a str) -> Result<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != COLUMN_COUNT {
            return Err(MitabError::FieldCount {
                expected: COLUMN_COUNT,
                found: fields.len(),
            });
        }
        Ok(Self { fields })
    }

    /// Raw access by column number; `None` past the last column
    pub fn field(&self, column: usize) -> Option<&'a str> {
        self.fields.get(column).copied()
    }

    /// Columns 0/1: uidA, uidB
    pub fn interactor(&self, slot: Slot) -> &'a str {
        self.fields[slot.index()]
    }

    /// Column 3: alternative identifiers list (altB in the README).
    ///
    /// Both identical-group and similar-group slots draw their members from this
    /// one column.
    pub fn alternative_ids(&self) -> &'a str {
        self.fields[3]
    }

    /// Column 6: interaction detection method
    pub fn detection_method(&self) -> &'a str {
        self.fields[6]
    }

    /// Column 8: publication identifiers
    pub fn publications(&self) -> &'a str {
        self.fields[8]
    }

    /// Columns 9/10: taxA, taxB
    pub fn taxon(&self, slot: Slot) -> &'a str {
        self.fields[9 + slot.index()]
    }

    /// Column 11: MI interaction type
    pub fn interaction_type(&self) -> &'a str {
        self.fields[11]
    }

    /// Column 12: source database
    pub fn source_db(&self) -> &'a str {
        self.fields[12]
    }

    /// Column 13: interaction identifiers, the first one names the interaction
    pub fn interaction_ids(&self) -> &'a str {
        self.fields[13]
    }

    /// Column 14: confidence scores (`lpr`, `hpr`, `np`, ...)
    pub fn confidence(&self) -> &'a str {
        self.fields[14]
    }

    /// Column 15: complex expansion method
    pub fn expansion(&self) -> &'a str {
        self.fields[15]
    }

    /// Columns 16/17
    pub fn biological_role(&self, slot: Slot) -> &'a str {
        self.fields[16 + slot.index()]
    }

    /// Columns 18/19
    pub fn experimental_role(&self, slot: Slot) -> &'a str {
        self.fields[18 + slot.index()]
    }

    /// Columns 20/21
    pub fn interactor_type(&self, slot: Slot) -> &'a str {
        self.fields[20 + slot.index()]
    }

    /// Column 28: host organism taxid
    pub fn host_organism(&self) -> &'a str {
        self.fields[28]
    }

    /// Column 30: creation date
    pub fn created(&self) -> &'a str {
        self.fields[30]
    }

    /// Columns 42/43: irogida, irogidb
    pub fn irogid(&self, slot: Slot) -> &'a str {
        self.fields[42 + slot.index()]
    }

    /// Column 44: irigid
    pub fn irigid(&self) -> &'a str {
        self.fields[44]
    }

    /// Columns 49/50 key the two similar-group slots.
    ///
    /// These are icrogidb and icrigid in the README layout; the published RDF has
    /// always been keyed on them, so they stay.
    pub fn similar_group_id(&self, slot: Slot) -> &'a str {
        self.fields[49 + slot.index()]
    }

    /// Column 50: icrigid, also the iRefWeb interaction number
    pub fn icrigid(&self) -> &'a str {
        self.fields[50]
    }

    /// Column 52: edgetype discriminant (`X`, `C` or `Y`)
    pub fn edge_type(&self) -> &'a str {
        self.fields[52]
    }

    /// Column 53: numParticipants
    pub fn participant_count(&self) -> &'a str {
        self.fields[53]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_with(values: &[(usize, &str)]) -> String {
        let mut fields = vec!["-"; COLUMN_COUNT];
        for (column, value) in values {
            fields[*column] = value;
        }
        fields.join("\t")
    }

    #[test]
    fn test_parse_and_accessors() {
        let line = line_with(&[
            (0, "uniprotkb:P1"),
            (1, "uniprotkb:P2"),
            (10, "taxid:10090"),
            (13, "rigid:abc|irigid:5"),
            (17, "psi-mi:MI:0499(unspecified role)"),
            (43, "77"),
            (50, "4242"),
            (52, "X"),
        ]);
        let record = MitabRecord::parse(&line).unwrap();

        assert_eq!(record.interactor(Slot::A), "uniprotkb:P1");
        assert_eq!(record.interactor(Slot::B), "uniprotkb:P2");
        assert_eq!(record.taxon(Slot::B), "taxid:10090");
        assert_eq!(record.interaction_ids(), "rigid:abc|irigid:5");
        assert_eq!(record.biological_role(Slot::B), "psi-mi:MI:0499(unspecified role)");
        assert_eq!(record.irogid(Slot::B), "77");
        assert_eq!(record.similar_group_id(Slot::B), "4242");
        assert_eq!(record.icrigid(), "4242");
        assert_eq!(record.edge_type(), "X");
        assert_eq!(record.field(2), Some("-"));
        assert_eq!(record.field(COLUMN_COUNT - 1), Some(record.participant_count()));
        assert_eq!(record.field(COLUMN_COUNT), None);
    }

    #[test]
    fn test_line_endings_are_not_fields() {
        let line = format!("{}\r\n", line_with(&[]));
        assert!(MitabRecord::parse(&line).is_ok());
    }

    #[test]
    fn test_wrong_field_count() {
        let short = vec!["-"; 53].join("\t");
        match MitabRecord::parse(&short) {
            Err(MitabError::FieldCount { expected, found }) => {
                assert_eq!(expected, 54);
                assert_eq!(found, 53);
            },
            other => panic!("unexpected: {:?}", other),
        }

        let long = vec!["-"; 55].join("\t");
        assert!(MitabRecord::parse(&long).is_err());
    }

    #[test]
    fn test_trailing_empty_fields_are_kept() {
        let mut fields = vec!["-"; COLUMN_COUNT];
        fields[53] = "";
        let line = fields.join("\t");
        let record = MitabRecord::parse(&line).unwrap();
        assert_eq!(record.participant_count(), "");
    }

    #[test]
    fn test_slot_display() {
        assert_eq!(Slot::A.to_string(), "a");
        assert_eq!(Slot::B.to_string(), "b");
        assert_eq!(Slot::BOTH.map(Slot::index), [0, 1]);
    }
}
