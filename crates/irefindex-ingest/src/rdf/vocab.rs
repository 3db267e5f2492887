//! Prefixes and terms used in emitted statements

use super::QName;

pub const RDF: &str = "rdf";
pub const RDFS: &str = "rdfs";
pub const XSD: &str = "xsd";
pub const VOID: &str = "void";
pub const DC: &str = "dc";
pub const FOAF: &str = "foaf";
pub const PROV: &str = "prov";
pub const PAV: &str = "pav";

/// Namespace of iRefIndex-specific classes and predicates
pub const IREFINDEX_VOCABULARY: &str = "irefindex_vocabulary";

/// Prefix for Bio2RDF dataset resources of this source
pub const IREFINDEX_RESOURCE: &str = "irefindex_resource";

pub const IREFINDEX_IROGID: &str = "irefindex_irogid";
pub const IREFINDEX_ICROGID: &str = "irefindex_icrogid";
pub const IREFINDEX_IRIGID: &str = "irefindex_irigid";
pub const IREFINDEX_CRIGID: &str = "irefindex_crigid";

// Classes
pub const PAIRWISE_INTERACTION: &str = "Pairwise-Interaction";
pub const MULTIMERIC_COMPLEX: &str = "Multimeric-Complex";
pub const HOMOPOLYMERIC_COMPLEX: &str = "Homopolymeric-Complex";
pub const TAXON_SEQUENCE_IDENTICAL_GROUP: &str = "Taxon-Sequence-Identical-Group";
pub const TAXON_SEQUENCE_SIMILAR_GROUP: &str = "Taxon-Sequence-Similar-Group";

// Predicates
pub const METHOD: &str = "method";
pub const TAXON: &str = "taxon";
pub const ARTICLE: &str = "article";
pub const SOURCE: &str = "source";
pub const EXPANSION_METHOD: &str = "expansion-method";
pub const HOST_ORGANISM: &str = "host-organism";
pub const IDENTICAL_GROUP_MEMBERSHIP: &str = "taxon-sequence-identical-group";
pub const SIMILAR_GROUP_MEMBERSHIP: &str = "taxon-sequence-similar-group";
pub const IDENTICAL_INTERACTION_GROUP: &str = "taxon-sequence-identical-interaction-group";
pub const SIMILAR_INTERACTION_GROUP: &str = "taxon-sequence-similar-interaction-group";
pub const MINIMUM_INTERACTIONS_REPORTED: &str = "minimum-number-interactions-reported";
pub const MAXIMUM_INTERACTIONS_REPORTED: &str = "maximum-number-interactions-reported";
pub const NUMBER_SUPPORTING_ARTICLES: &str = "number-supporting-articles";

/// Term in the iRefIndex vocabulary namespace
pub fn vocab(local: &str) -> QName {
    QName::new(IREFINDEX_VOCABULARY, local)
}

pub fn rdf_type() -> QName {
    QName::new(RDF, "type")
}

pub fn rdfs_label() -> QName {
    QName::new(RDFS, "label")
}

pub fn rdfs_see_also() -> QName {
    QName::new(RDFS, "seeAlso")
}

pub fn void_in_dataset() -> QName {
    QName::new(VOID, "inDataset")
}

pub fn dc_created() -> QName {
    QName::new(DC, "created")
}
