//! Record to statement mapping
//!
//! One record describes one interaction: its type and label, both interactors with
//! their roles, the redundancy groups the interactors belong to, publications,
//! confidence counters and provenance. Group nodes are described once per run via
//! the [`GroupTracker`]; every later record only adds edges to them.

use tracing::trace;

use super::groups::{GroupKind, GroupStore, GroupTracker, InMemoryGroupStore};
use super::identifier::{DecodedIdentifier, IdentifierDecoder};
use super::record::{MitabRecord, Slot};
use super::{present, MitabError, Result};
use crate::rdf::vocab::{self, vocab};
use crate::rdf::{QName, SharedResolver, Statement};

const IREFWEB_INTERACTION_URL: &str = "http://wodaklab.org/iRefWeb/interaction/show/";

/// MI term used by sources for "unknown role"; never emitted as a role
const UNKNOWN_ROLE: &str = "0000";

/// Method texts that mean "no method"
const NO_METHOD: &[&str] = &["NA", "-1"];

/// Namespaces in the alternatives column that name the identical group itself
const IDENTICAL_SELF_TOKENS: &[&str] = &["rogid", "irogid", "irefindex_rogid", "irefindex_irogid"];

/// Namespaces in the alternatives column that name the similar group itself
const SIMILAR_SELF_TOKENS: &[&str] = &["crogid", "icrogid", "irefindex_crogid", "irefindex_icrogid"];

/// Interaction class selected by the edgetype column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionKind {
    Pairwise,
    MultimericComplex,
    Homopolymeric,
}

impl InteractionKind {
    pub fn from_discriminant(value: &str) -> Option<Self> {
        match value.trim() {
            "X" => Some(InteractionKind::Pairwise),
            "C" => Some(InteractionKind::MultimericComplex),
            "Y" => Some(InteractionKind::Homopolymeric),
            _ => None,
        }
    }

    /// Local name of the vocabulary class
    pub fn class(self) -> &'static str {
        match self {
            InteractionKind::Pairwise => vocab::PAIRWISE_INTERACTION,
            InteractionKind::MultimericComplex => vocab::MULTIMERIC_COMPLEX,
            InteractionKind::Homopolymeric => vocab::HOMOPOLYMERIC_COMPLEX,
        }
    }

    /// Base label, built from the raw column text rather than decoded identifiers
    pub fn label(self, record: &MitabRecord<'_>) -> String {
        match self {
            InteractionKind::Pairwise => format!(
                "Pairwise interaction between {} and {}",
                record.interactor(Slot::A),
                record.interactor(Slot::B)
            ),
            InteractionKind::MultimericComplex => {
                format!("{} component complex", record.participant_count())
            },
            InteractionKind::Homopolymeric => {
                format!("homomeric complex composed of {}", record.interactor(Slot::A))
            },
        }
    }
}

/// Maps records to statements, remembering described groups across records
pub struct RecordMapper<S: GroupStore = InMemoryGroupStore> {
    decoder: IdentifierDecoder,
    groups: GroupTracker<S>,
    dataset: QName,
}

impl RecordMapper<InMemoryGroupStore> {
    pub fn new(resolver: SharedResolver, dataset: QName) -> Result<Self> {
        Self::with_groups(resolver, dataset, GroupTracker::new())
    }
}

impl<S: GroupStore> RecordMapper<S> {
    pub fn with_groups(
        resolver: SharedResolver,
        dataset: QName,
        groups: GroupTracker<S>,
    ) -> Result<Self> {
        Ok(Self {
            decoder: IdentifierDecoder::new(resolver)?,
            groups,
            dataset,
        })
    }

    pub fn resolver(&self) -> &SharedResolver {
        self.decoder.resolver()
    }

    pub fn dataset(&self) -> &QName {
        &self.dataset
    }

    pub fn groups(&self) -> &GroupTracker<S> {
        &self.groups
    }

    /// Statements for one record, in emission order.
    ///
    /// Fails without side effects on the group tracker when the interaction
    /// identifier does not decode to a node.
    pub fn map(&mut self, record: &MitabRecord<'_>) -> Result<Vec<Statement>> {
        let interaction = self.decoder.decode_first(record.interaction_ids());
        let iid = match &interaction.qname {
            Some(qname) => qname.clone(),
            None => {
                return Err(MitabError::MissingInteractionId(
                    record.interaction_ids().to_string(),
                ))
            },
        };

        let mut out = Vec::with_capacity(48);
        out.push(Statement::node(iid.clone(), vocab::void_in_dataset(), self.dataset.clone()));

        // Unrecognized discriminants keep the label decoded from the identifier column
        let label = match InteractionKind::from_discriminant(record.edge_type()) {
            Some(kind) => {
                out.push(Statement::node(iid.clone(), vocab::rdf_type(), vocab(kind.class())));
                kind.label(record)
            },
            None => {
                trace!(edge_type = record.edge_type(), %iid, "Unrecognized edge type");
                interaction.label.clone()
            },
        };

        let mut method_suffix = String::new();
        if let Some(field) = present(record.detection_method()) {
            let method = self.decoder.decode_first(field);
            if let Some(qname) = &method.qname {
                out.push(Statement::node(iid.clone(), vocab(vocab::METHOD), qname.clone()));
            }
            let text = method.display_text();
            if !text.is_empty() && !NO_METHOD.contains(&text) {
                method_suffix = format!(" identified by {} ", text);
            }
        }

        out.push(Statement::literal(
            iid.clone(),
            vocab::rdfs_label(),
            format!("{}{} [{}]", label, method_suffix, iid),
        ));
        out.push(Statement::iri(
            iid.clone(),
            vocab::rdfs_see_also(),
            format!("{}{}", IREFWEB_INTERACTION_URL, record.icrigid().trim()),
        ));

        for slot in Slot::BOTH {
            self.map_interactor(record, slot, &iid, &mut out);
        }
        for slot in Slot::BOTH {
            self.map_identical_group(record, slot, &mut out);
        }
        for slot in Slot::BOTH {
            self.map_similar_group(record, slot, &mut out);
        }

        for article in self.decoder.decode_all(record.publications()) {
            if let Some(qname) = article.qname {
                out.push(Statement::node(iid.clone(), vocab(vocab::ARTICLE), qname));
            }
        }

        if let Some(field) = present(record.interaction_type()).filter(|f| *f != "NA") {
            let mi_type = self.decoder.decode_first(field);
            if let Some(qname) = &mi_type.qname {
                out.push(Statement::node(iid.clone(), vocab::rdf_type(), qname.clone()));
                if self.groups.ensure_described(&qname.to_string(), GroupKind::Defined, None) {
                    out.push(Statement::literal(
                        qname.clone(),
                        vocab::rdfs_label(),
                        format!("{} [{}]", mi_type.display_text(), qname),
                    ));
                }
            }
        }

        if let Some(field) = present(record.source_db()) {
            if let Some(qname) = self.decoder.decode_first(field).qname {
                out.push(Statement::node(iid.clone(), vocab(vocab::SOURCE), qname));
            }
        }

        for score in self.decoder.decode_all(record.confidence()) {
            out.push(confidence_statement(&iid, &score));
        }

        let expansion = record.expansion().trim();
        if !expansion.is_empty() {
            out.push(Statement::literal(iid.clone(), vocab(vocab::EXPANSION_METHOD), expansion));
        }

        if let Some(field) = present(record.host_organism()) {
            if let Some(qname) = self.decoder.decode_first(field).qname {
                out.push(Statement::node(iid.clone(), vocab(vocab::HOST_ORGANISM), qname));
            }
        }

        out.push(Statement::literal(iid.clone(), vocab::dc_created(), record.created().trim()));

        out.push(Statement::node(
            iid.clone(),
            vocab(vocab::IDENTICAL_INTERACTION_GROUP),
            QName::new(vocab::IREFINDEX_IRIGID, record.irigid().trim()),
        ));
        out.push(Statement::node(
            iid,
            vocab(vocab::SIMILAR_INTERACTION_GROUP),
            QName::new(vocab::IREFINDEX_CRIGID, record.icrigid().trim()),
        ));

        Ok(out)
    }

    fn map_interactor(
        &self,
        record: &MitabRecord<'_>,
        slot: Slot,
        iid: &QName,
        out: &mut Vec<Statement>,
    ) {
        let predicate = format!("interactor_{}", slot);
        let interactor = self.decoder.decode_first(record.interactor(slot)).qname;
        if let Some(interactor) = &interactor {
            out.push(Statement::node(iid.clone(), vocab(&predicate), interactor.clone()));
        }

        for (field, aspect) in [
            (record.biological_role(slot), "biological_role"),
            (record.experimental_role(slot), "experimental_role"),
        ] {
            let Some(field) = present(field) else { continue };
            match self.decoder.decode_first(field).qname {
                Some(role) if !is_unknown_role(&role) => out.push(Statement::node(
                    iid.clone(),
                    vocab(&format!("{}_{}", predicate, aspect)),
                    role,
                )),
                _ => {},
            }
        }

        // Placeholder types are kept; only roles drop them
        if let (Some(interactor), Some(field)) = (interactor, present(record.interactor_type(slot))) {
            if let Some(kind) = self.decoder.decode_first(field).qname {
                out.push(Statement::node(interactor, vocab::rdf_type(), kind));
            }
        }
    }

    fn map_identical_group(&mut self, record: &MitabRecord<'_>, slot: Slot, out: &mut Vec<Statement>) {
        let Some(id) = present(record.irogid(slot)) else {
            return;
        };
        let group = QName::new(vocab::IREFINDEX_IROGID, id);
        let taxon = present(record.taxon(slot))
            .filter(|t| *t != "-1")
            .and_then(|t| self.decoder.decode_first(t).qname);

        if self.groups.ensure_described(id, GroupKind::Identical, taxon.as_ref()) {
            describe_group(&group, vocab::TAXON_SEQUENCE_IDENTICAL_GROUP, out);
            if let Some(taxon) = &taxon {
                out.push(Statement::node(group.clone(), vocab(vocab::TAXON), taxon.clone()));
            }
        }

        for member in self.members(record, IDENTICAL_SELF_TOKENS) {
            out.push(Statement::node(
                member.clone(),
                vocab(vocab::IDENTICAL_GROUP_MEMBERSHIP),
                group.clone(),
            ));
            if let Some(taxon) = &taxon {
                out.push(Statement::node(member, vocab(vocab::TAXON), taxon.clone()));
            }
        }
    }

    fn map_similar_group(&mut self, record: &MitabRecord<'_>, slot: Slot, out: &mut Vec<Statement>) {
        let Some(id) = present(record.similar_group_id(slot)) else {
            return;
        };
        let group = QName::new(vocab::IREFINDEX_ICROGID, id);

        if self.groups.ensure_described(id, GroupKind::Similar, None) {
            describe_group(&group, vocab::TAXON_SEQUENCE_SIMILAR_GROUP, out);
        }

        for member in self.members(record, SIMILAR_SELF_TOKENS) {
            out.push(Statement::node(
                member,
                vocab(vocab::SIMILAR_GROUP_MEMBERSHIP),
                group.clone(),
            ));
        }
    }

    /// Nodes in the alternatives column, minus those naming the group itself
    fn members(&self, record: &MitabRecord<'_>, exclude: &[&str]) -> Vec<QName> {
        self.decoder
            .decode_all(record.alternative_ids())
            .filter(|d| !d.namespace.is_empty() && !exclude.contains(&d.namespace.as_str()))
            .filter_map(|d| d.qname)
            .collect()
    }
}

fn describe_group(group: &QName, class: &str, out: &mut Vec<Statement>) {
    out.push(Statement::literal(group.clone(), vocab::rdfs_label(), format!("[{}]", group)));
    out.push(Statement::node(group.clone(), vocab::rdf_type(), vocab(class)));
}

fn is_unknown_role(role: &QName) -> bool {
    role.prefix() == "mi" && role.local() == UNKNOWN_ROLE
}

/// `lpr` and `hpr` have their own counters; every other score lands in the
/// supporting-articles counter
fn confidence_statement(iid: &QName, score: &DecodedIdentifier) -> Statement {
    let predicate = match score.namespace.as_str() {
        "lpr" => vocab::MINIMUM_INTERACTIONS_REPORTED,
        "hpr" => vocab::MAXIMUM_INTERACTIONS_REPORTED,
        _ => vocab::NUMBER_SUPPORTING_ARTICLES,
    };
    Statement::literal(iid.clone(), vocab(predicate), score.identifier.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mitab::COLUMN_COUNT;
    use crate::rdf::{Bio2RdfResolver, Object};

    fn mapper() -> RecordMapper {
        RecordMapper::new(
            Bio2RdfResolver::new().shared(),
            QName::new("irefindex_resource", "bio2rdf.dataset.irefindex.R3"),
        )
        .unwrap()
    }

    fn line(values: &[(usize, &str)]) -> String {
        let mut fields = vec!["-"; COLUMN_COUNT];
        for (column, value) in values {
            fields[*column] = value;
        }
        fields.join("\t")
    }

    fn base_line(extra: &[(usize, &str)]) -> String {
        let mut values = vec![
            (0, "uniprotkb:P1"),
            (1, "uniprotkb:P2"),
            (13, "rigid:abc|irigid:5"),
            (30, "2010/05/18"),
            (44, "5"),
            (50, "4242"),
            (52, "X"),
        ];
        values.extend_from_slice(extra);
        line(&values)
    }

    fn objects<'a>(statements: &'a [Statement], predicate: &str) -> Vec<&'a Object> {
        statements
            .iter()
            .filter(|s| s.predicate.to_string() == predicate)
            .map(|s| &s.object)
            .collect()
    }

    fn label_of(statements: &[Statement], subject: &str) -> Option<String> {
        statements
            .iter()
            .find(|s| s.subject.to_string() == subject && s.predicate == vocab::rdfs_label())
            .and_then(|s| s.object.as_literal().map(str::to_string))
    }

    #[test]
    fn test_pairwise_label_uses_raw_columns() {
        let text = base_line(&[(6, "psi-mi:\"MI:0018\"(two hybrid)")]);
        let record = MitabRecord::parse(&text).unwrap();
        let out = mapper().map(&record).unwrap();

        assert_eq!(out[0].subject.to_string(), "irefindex_rigid:abc");
        assert_eq!(out[0].predicate, vocab::void_in_dataset());
        assert_eq!(
            label_of(&out, "irefindex_rigid:abc").unwrap(),
            "Pairwise interaction between uniprotkb:P1 and uniprotkb:P2 identified by two hybrid  [irefindex_rigid:abc]"
        );
        assert_eq!(
            objects(&out, "irefindex_vocabulary:method"),
            vec![&Object::Node(QName::new("mi", "0018"))]
        );
    }

    #[test]
    fn test_complex_labels() {
        let text = line(&[(0, "complex:77"), (13, "rigid:r1"), (52, "C"), (53, "4")]);
        let out = mapper().map(&MitabRecord::parse(&text).unwrap()).unwrap();
        assert_eq!(label_of(&out, "irefindex_rigid:r1").unwrap(), "4 component complex [irefindex_rigid:r1]");
        assert!(out.contains(&Statement::node(
            QName::new("irefindex_rigid", "r1"),
            vocab::rdf_type(),
            vocab(vocab::MULTIMERIC_COMPLEX)
        )));

        let text = line(&[(0, "uniprotkb:P9"), (13, "rigid:r2"), (52, "Y")]);
        let out = mapper().map(&MitabRecord::parse(&text).unwrap()).unwrap();
        assert_eq!(
            label_of(&out, "irefindex_rigid:r2").unwrap(),
            "homomeric complex composed of uniprotkb:P9 [irefindex_rigid:r2]"
        );
    }

    #[test]
    fn test_unknown_discriminant_emits_no_class() {
        let text = line(&[(13, "rigid:r3(fallback)"), (52, "Z")]);
        let out = mapper().map(&MitabRecord::parse(&text).unwrap()).unwrap();

        assert!(objects(&out, "rdf:type").is_empty());
        assert_eq!(label_of(&out, "irefindex_rigid:r3").unwrap(), "fallback [irefindex_rigid:r3]");
    }

    #[test]
    fn test_no_method_suffix_for_placeholders() {
        for method in ["psi-mi:MI:0000(NA)", "psi-mi:MI:0000(-1)"] {
            let text = base_line(&[(6, method)]);
            let out = mapper().map(&MitabRecord::parse(&text).unwrap()).unwrap();
            let label = label_of(&out, "irefindex_rigid:abc").unwrap();
            assert!(!label.contains("identified by"), "{}", label);
        }
    }

    #[test]
    fn test_missing_interaction_id_fails_record() {
        let mut m = mapper();
        for ids in ["-", "other:foo", "nocolon", "rigid:|irigid:3"] {
            let text = line(&[(13, ids), (42, "1"), (52, "X")]);
            let err = m.map(&MitabRecord::parse(&text).unwrap()).unwrap_err();
            assert!(matches!(err, MitabError::MissingInteractionId(_)));
            assert!(err.is_record_error());
        }
        assert_eq!(m.groups().described_count(), 0);
    }

    #[test]
    fn test_roles_skip_unknown_but_types_do_not() {
        let text = base_line(&[
            (16, "psi-mi:\"MI:0000\"(unspecified)"),
            (17, "psi-mi:\"MI:0496\"(bait)"),
            (18, "psi-mi:\"MI:0498\"(prey)"),
            (20, "psi-mi:\"MI:0000\"(unknown)"),
            (21, "psi-mi:\"MI:0326\"(protein)"),
        ]);
        let out = mapper().map(&MitabRecord::parse(&text).unwrap()).unwrap();

        assert!(objects(&out, "irefindex_vocabulary:interactor_a_biological_role").is_empty());
        assert_eq!(objects(&out, "irefindex_vocabulary:interactor_b_biological_role").len(), 1);
        assert_eq!(objects(&out, "irefindex_vocabulary:interactor_a_experimental_role").len(), 1);
        assert!(out.contains(&Statement::node(
            QName::new("uniprot", "P1"),
            vocab::rdf_type(),
            QName::new("mi", "0000")
        )));
        assert!(out.contains(&Statement::node(
            QName::new("uniprot", "P2"),
            vocab::rdf_type(),
            QName::new("mi", "0326")
        )));
    }

    #[test]
    fn test_identical_group_described_once() {
        let mut m = mapper();
        let text = base_line(&[
            (3, "rogid:xyz9606|irogid:11|uniprotkb:P1|refseq:NP_1"),
            (9, "taxid:9606(Homo sapiens)"),
            (42, "11"),
        ]);
        let record = MitabRecord::parse(&text).unwrap();

        let first = m.map(&record).unwrap();
        assert_eq!(label_of(&first, "irefindex_irogid:11").unwrap(), "[irefindex_irogid:11]");
        assert!(first.contains(&Statement::node(
            QName::new("irefindex_irogid", "11"),
            vocab(vocab::TAXON),
            QName::new("taxon", "9606")
        )));
        let memberships = objects(&first, "irefindex_vocabulary:taxon-sequence-identical-group");
        assert_eq!(memberships.len(), 2);

        let second = m.map(&record).unwrap();
        assert!(label_of(&second, "irefindex_irogid:11").is_none());
        assert_eq!(
            objects(&second, "irefindex_vocabulary:taxon-sequence-identical-group").len(),
            2
        );
        assert!(second.contains(&Statement::node(
            QName::new("uniprot", "P1"),
            vocab(vocab::TAXON),
            QName::new("taxon", "9606")
        )));
    }

    #[test]
    fn test_similar_group_has_no_taxon() {
        let text = base_line(&[
            (3, "crogid:c1|icrogid:99|uniprotkb:P1"),
            (9, "taxid:9606"),
            (49, "99"),
        ]);
        let out = mapper().map(&MitabRecord::parse(&text).unwrap()).unwrap();

        let group = QName::new("irefindex_icrogid", "99");
        assert!(out.contains(&Statement::node(
            group.clone(),
            vocab::rdf_type(),
            vocab(vocab::TAXON_SEQUENCE_SIMILAR_GROUP)
        )));
        assert!(!out.iter().any(|s| s.subject == group && s.predicate == vocab(vocab::TAXON)));
        // crogid:c1 and icrogid:99 name the group itself, so only P1 is a member
        let memberships: Vec<&Statement> = out
            .iter()
            .filter(|s| s.predicate == vocab(vocab::SIMILAR_GROUP_MEMBERSHIP))
            .collect();
        assert_eq!(memberships.len(), 2);
        assert!(memberships.iter().all(|s| s.subject == QName::new("uniprot", "P1")));
        assert!(out.contains(&Statement::node(
            QName::new("uniprot", "P1"),
            vocab(vocab::SIMILAR_GROUP_MEMBERSHIP),
            group.clone()
        )));
        // column 50 is the second similar-group slot
        assert!(out.contains(&Statement::node(
            QName::new("uniprot", "P1"),
            vocab(vocab::SIMILAR_GROUP_MEMBERSHIP),
            QName::new("irefindex_icrogid", "4242")
        )));
    }

    #[test]
    fn test_confidence_routing() {
        let text = base_line(&[(14, "lpr:2|hpr:17|np:3|-")]);
        let out = mapper().map(&MitabRecord::parse(&text).unwrap()).unwrap();

        let literal = |p: &str| -> Vec<&str> {
            objects(&out, p).into_iter().filter_map(Object::as_literal).collect()
        };
        assert_eq!(literal("irefindex_vocabulary:minimum-number-interactions-reported"), vec!["2"]);
        assert_eq!(literal("irefindex_vocabulary:maximum-number-interactions-reported"), vec!["17"]);
        assert_eq!(literal("irefindex_vocabulary:number-supporting-articles"), vec!["3"]);
    }

    #[test]
    fn test_mi_type_label_once() {
        let mut m = mapper();
        let text = base_line(&[(11, "psi-mi:\"MI:0407\"(direct interaction)")]);
        let record = MitabRecord::parse(&text).unwrap();

        let first = m.map(&record).unwrap();
        assert_eq!(
            label_of(&first, "mi:0407").unwrap(),
            "direct interaction [mi:0407]"
        );
        let second = m.map(&record).unwrap();
        assert!(label_of(&second, "mi:0407").is_none());
        assert_eq!(objects(&second, "rdf:type").len(), 2);
    }

    #[test]
    fn test_trailing_statements() {
        let text = base_line(&[
            (8, "pubmed:123|-|pubmed:456"),
            (12, "MI:0463(biogrid)"),
            (15, "bipartite"),
            (28, "taxid:-1"),
        ]);
        let out = mapper().map(&MitabRecord::parse(&text).unwrap()).unwrap();

        assert_eq!(objects(&out, "irefindex_vocabulary:article").len(), 2);
        assert_eq!(objects(&out, "irefindex_vocabulary:source").len(), 1);
        assert_eq!(
            objects(&out, "irefindex_vocabulary:expansion-method"),
            vec![&Object::Literal { value: "bipartite".into(), tag: crate::rdf::LiteralTag::Plain }]
        );
        assert_eq!(objects(&out, "irefindex_vocabulary:host-organism").len(), 1);
        assert_eq!(objects(&out, "dc:created")[0].as_literal(), Some("2010/05/18"));

        let n = out.len();
        assert_eq!(
            out[n - 2].object,
            Object::Node(QName::new("irefindex_irigid", "5"))
        );
        assert_eq!(
            out[n - 1].object,
            Object::Node(QName::new("irefindex_crigid", "4242"))
        );
    }
}
