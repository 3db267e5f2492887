//! Bio2RDF dataset description
//!
//! One small graph per run describing what was produced and where it came from:
//! the Bio2RDF dataset node with its dumps, and the iRefIndex source it was derived
//! from together with the source's license terms.

use chrono::NaiveDate;

use crate::rdf::vocab::{self, IREFINDEX_RESOURCE};
use crate::rdf::{QName, Statement};

pub const NAMESPACE: &str = "irefindex";
pub const HOMEPAGE: &str = "http://irefindex.uio.no";
pub const LICENSE_URL: &str = "http://irefindex.uio.no/wiki/README_MITAB2.6_for_iRefIndex#License";
pub const RIGHTS: &[&str] = &["use", "attribution", "no-commercial"];
pub const PUBLISHER: &str = "http://bio2rdf.org";
const DOWNLOAD_BASE: &str = "http://download.bio2rdf.org/release";

#[derive(Debug, Clone)]
pub struct DatasetDescription {
    pub namespace: String,
    pub release: String,
    /// Where the converter itself lives
    pub script_url: String,
    /// Output files of this run
    pub files: Vec<String>,
    pub homepage: String,
    pub rights: Vec<String>,
    pub license_url: String,
    pub download_url: String,
    /// Source release token
    pub version: String,
    pub created: NaiveDate,
}

impl DatasetDescription {
    /// Description with the iRefIndex defaults filled in
    pub fn new(
        release: impl Into<String>,
        version: impl Into<String>,
        download_url: impl Into<String>,
        files: Vec<String>,
        created: NaiveDate,
    ) -> Self {
        Self {
            namespace: NAMESPACE.to_string(),
            release: release.into(),
            script_url: env!("CARGO_PKG_REPOSITORY").to_string(),
            files,
            homepage: HOMEPAGE.to_string(),
            rights: RIGHTS.iter().map(|r| r.to_string()).collect(),
            license_url: LICENSE_URL.to_string(),
            download_url: download_url.into(),
            version: version.into(),
            created,
        }
    }

    pub fn dataset(&self) -> QName {
        dataset_qname(&self.namespace, &self.release)
    }

    /// Node for the upstream release this run converted
    pub fn source(&self) -> QName {
        QName::new(
            format!("{}_resource", self.namespace),
            format!("{}.source.{}", self.namespace, self.version),
        )
    }

    pub fn statements(&self) -> Vec<Statement> {
        let dataset = self.dataset();
        let source = self.source();
        let date = self.created.format("%Y-%m-%d").to_string();
        let void_dataset = QName::new(vocab::VOID, "Dataset");

        let mut out = vec![
            Statement::node(dataset.clone(), vocab::rdf_type(), void_dataset.clone()),
            Statement::literal(
                dataset.clone(),
                vocab::rdfs_label(),
                format!(
                    "{} dataset by Bio2RDF on {} [{}]",
                    self.namespace, date, dataset
                ),
            ),
            Statement::typed_literal(
                dataset.clone(),
                vocab::dc_created(),
                date,
                QName::new(vocab::XSD, "date"),
            ),
            Statement::iri(dataset.clone(), QName::new(vocab::DC, "creator"), &self.script_url),
            Statement::iri(dataset.clone(), QName::new(vocab::DC, "publisher"), PUBLISHER),
        ];

        for file in &self.files {
            out.push(Statement::iri(
                dataset.clone(),
                QName::new(vocab::VOID, "dataDump"),
                format!("{}/{}/{}/{}", DOWNLOAD_BASE, self.release, self.namespace, file),
            ));
        }
        out.push(Statement::node(
            dataset,
            QName::new(vocab::PROV, "wasDerivedFrom"),
            source.clone(),
        ));

        out.push(Statement::node(source.clone(), vocab::rdf_type(), void_dataset));
        out.push(Statement::literal(
            source.clone(),
            vocab::rdfs_label(),
            format!("iRefIndex ({}) [{}]", self.version, source),
        ));
        out.push(Statement::iri(source.clone(), QName::new(vocab::FOAF, "page"), &self.homepage));
        for right in &self.rights {
            out.push(Statement::literal(source.clone(), QName::new(vocab::DC, "rights"), right));
        }
        out.push(Statement::iri(source.clone(), QName::new(vocab::DC, "license"), &self.license_url));
        out.push(Statement::iri(
            source.clone(),
            QName::new(vocab::VOID, "dataDump"),
            &self.download_url,
        ));
        out.push(Statement::literal(source, QName::new(vocab::PAV, "version"), &self.version));
        out
    }
}

/// `irefindex_resource:bio2rdf.dataset.irefindex.R<release>`
pub fn dataset_qname(namespace: &str, release: &str) -> QName {
    let prefix = if namespace == NAMESPACE {
        IREFINDEX_RESOURCE.to_string()
    } else {
        format!("{}_resource", namespace)
    };
    QName::new(prefix, format!("bio2rdf.dataset.{}.R{}", namespace, release))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::Object;

    fn description() -> DatasetDescription {
        DatasetDescription::new(
            "3",
            "03022013",
            "ftp://ftp.no.embnet.org/irefindex/data/current/psi_mitab/MITAB2.6/",
            vec!["irefindex-9606.nt.gz".to_string(), "irefindex-562.nt.gz".to_string()],
            NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
        )
    }

    #[test]
    fn test_dataset_qname() {
        assert_eq!(
            dataset_qname("irefindex", "3").to_string(),
            "irefindex_resource:bio2rdf.dataset.irefindex.R3"
        );
    }

    #[test]
    fn test_statements() {
        let desc = description();
        let out = desc.statements();
        let dataset = desc.dataset();

        let dumps: Vec<_> = out
            .iter()
            .filter(|s| s.subject == dataset && s.predicate.local() == "dataDump")
            .collect();
        assert_eq!(dumps.len(), 2);
        assert_eq!(
            dumps[0].object,
            Object::Iri("http://download.bio2rdf.org/release/3/irefindex/irefindex-9606.nt.gz".into())
        );

        let created = out
            .iter()
            .find(|s| s.predicate == vocab::dc_created())
            .unwrap();
        assert_eq!(created.object.as_literal(), Some("2026-10-18"));

        let rights = out.iter().filter(|s| s.predicate.local() == "rights").count();
        assert_eq!(rights, 3);
        assert!(out.contains(&Statement::node(
            dataset,
            QName::new("prov", "wasDerivedFrom"),
            desc.source()
        )));
        assert!(out.contains(&Statement::literal(
            desc.source(),
            QName::new("pav", "version"),
            "03022013"
        )));
    }
}
