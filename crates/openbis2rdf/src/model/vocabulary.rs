//! Lookup from openBIS JSON keys to ontology terms.
//!
//! The converter never derives vocabulary on its own: every `@type` string
//! and attribute key is resolved through an [`OntologyLookup`]. The built-in
//! [`Vocabulary::openbis`] table mirrors the `openbis_json_key` annotations
//! of the openBIS ontology; deployments with a different ontology load their
//! own table with [`Vocabulary::load`].

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{ConvertError, Result};

use super::ontology::{dcat, obis, standard};

/// Read-only resolution of JSON keys against a fixed ontology.
pub trait OntologyLookup {
    /// Canonical class or relation IRI for a `@type` string or attribute key.
    fn lookup(&self, key: &str) -> Option<&str>;

    /// Parent class for instances created from the `@type` string `type_key`.
    fn superclass(&self, _type_key: &str) -> Option<&str> {
        None
    }
}

/// Built-in `@type` → class table.
const OPENBIS_CLASSES: &[(&str, &str)] = &[
    ("as.dto.space.Space", obis::SPACE),
    ("as.dto.project.Project", obis::PROJECT),
    ("as.dto.experiment.Experiment", obis::COLLECTION),
    ("as.dto.sample.Sample", obis::OBJECT),
    ("as.dto.dataset.DataSet", obis::DATA_SET),
    ("as.dto.datastore.DataStore", obis::DATA_STORE),
    ("dss.dto.datasetfile.DataSetFile", dcat::DISTRIBUTION_CLASS),
    ("as.dto.person.Person", obis::PERSON),
    ("as.dto.tag.Tag", obis::TAG),
    ("as.dto.vocabulary.Vocabulary", obis::VOCABULARY),
    ("as.dto.vocabulary.VocabularyTerm", obis::VOCABULARY_TERM),
    ("as.dto.sample.SampleType", standard::OWL_CLASS),
    ("as.dto.experiment.ExperimentType", standard::OWL_CLASS),
    ("as.dto.dataset.DataSetType", standard::OWL_CLASS),
    ("as.dto.property.PropertyType", standard::OWL_OBJECT_PROPERTY),
    ("as.dto.property.PropertyAssignment", obis::PROPERTY_ASSIGNMENT),
    ("as.dto.space.id.SpacePermId", obis::PERMANENT_IDENTIFIER),
    ("as.dto.project.id.ProjectPermId", obis::PERMANENT_IDENTIFIER),
    ("as.dto.experiment.id.ExperimentPermId", obis::PERMANENT_IDENTIFIER),
    ("as.dto.sample.id.SamplePermId", obis::PERMANENT_IDENTIFIER),
    ("as.dto.dataset.id.DataSetPermId", obis::PERMANENT_IDENTIFIER),
    ("as.dto.datastore.id.DataStorePermId", obis::PERMANENT_IDENTIFIER),
    ("as.dto.person.id.PersonPermId", obis::PERMANENT_IDENTIFIER),
    ("as.dto.entitytype.id.EntityTypePermId", obis::PERMANENT_IDENTIFIER),
    ("as.dto.property.id.PropertyTypePermId", obis::PERMANENT_IDENTIFIER),
    ("as.dto.sample.Identifier", obis::PERMANENT_IDENTIFIER),
    ("as.dto.project.id.ProjectIdentifier", obis::IDENTIFIER),
    ("as.dto.experiment.id.ExperimentIdentifier", obis::IDENTIFIER),
    ("as.dto.sample.id.SampleIdentifier", obis::IDENTIFIER),
];

/// Built-in attribute key → relation table.
const OPENBIS_RELATIONS: &[(&str, &str)] = &[
    ("code", obis::CODE),
    ("description", obis::DESCRIPTION),
    ("label", standard::RDFS_LABEL),
    ("registrationDate", obis::REGISTRATION_DATE),
    ("modificationDate", obis::MODIFICATION_DATE),
    ("registrator", obis::REGISTRATOR),
    ("modifier", obis::MODIFIER),
    ("email", obis::EMAIL),
    ("firstName", obis::FIRST_NAME),
    ("lastName", obis::LAST_NAME),
    ("userId", obis::USER_ID),
    ("dataType", obis::DATA_TYPE),
    ("permId", obis::HAS_IDENTIFIER),
    ("identifier", obis::HAS_IDENTIFIER),
    ("space", obis::RELATES_TO),
    ("project", obis::RELATES_TO),
    ("experiment", obis::RELATES_TO),
    ("sample", obis::RELATES_TO),
    ("dataStore", obis::RELATES_TO),
    ("type", obis::RELATES_TO),
    ("propertyType", obis::RELATES_TO),
    ("vocabulary", obis::RELATES_TO),
    ("tags", obis::RELATES_TO),
    ("projects", obis::RELATES_TO),
    ("experiments", obis::RELATES_TO),
    ("samples", obis::RELATES_TO),
    ("dataSets", obis::RELATES_TO),
    ("components", obis::RELATES_TO),
    ("container", obis::RELATES_TO),
    ("parents", obis::HAS_PARENT),
    ("children", obis::HAS_CHILD),
    ("propertyAssignments", obis::HAS_PROPERTY_ASSIGNMENT),
    ("dataSetId", obis::DATASET_PERMID),
    ("path", obis::FILE_PATH),
    ("fileLength", obis::FILE_LENGTH),
    ("checksumCRC32", obis::CHECKSUM),
    ("downloadUrl", dcat::ENDPOINT_URL),
];

/// Built-in `@type` → parent class hints for type entities.
const OPENBIS_SUPERCLASSES: &[(&str, &str)] = &[
    ("as.dto.sample.SampleType", obis::OBJECT),
    ("as.dto.experiment.ExperimentType", obis::COLLECTION),
];

/// On-disk vocabulary table: a flat `{ "json key": "iri" }` object with an
/// optional `@superclasses` object of the same shape.
#[derive(Debug, Deserialize)]
struct VocabularyFile {
    #[serde(rename = "@superclasses", default)]
    superclasses: HashMap<String, String>,
    #[serde(flatten)]
    terms: HashMap<String, String>,
}

/// Immutable key → IRI table.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    terms: HashMap<String, String>,
    superclasses: HashMap<String, String>,
}

impl Vocabulary {
    /// An empty vocabulary; resolves nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in openBIS table.
    pub fn openbis() -> Self {
        let terms = OPENBIS_CLASSES
            .iter()
            .chain(OPENBIS_RELATIONS)
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let superclasses = OPENBIS_SUPERCLASSES
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self {
            terms,
            superclasses,
        }
    }

    /// Builder-style insertion of a single term.
    pub fn with_term(mut self, key: &str, iri: &str) -> Self {
        self.terms.insert(key.to_string(), iri.to_string());
        self
    }

    /// Builder-style insertion of a superclass hint.
    pub fn with_superclass(mut self, type_key: &str, parent: &str) -> Self {
        self.superclasses
            .insert(type_key.to_string(), parent.to_string());
        self
    }

    /// Parse a vocabulary table from JSON text.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let file: VocabularyFile =
            serde_json::from_str(content).map_err(|e| ConvertError::Vocabulary {
                message: e.to_string(),
            })?;
        if let Some((key, _)) = file.terms.iter().find(|(_, iri)| iri.trim().is_empty()) {
            return Err(ConvertError::Vocabulary {
                message: format!("key '{key}' maps to an empty IRI"),
            });
        }
        Ok(Self {
            terms: file.terms,
            superclasses: file.superclasses,
        })
    }

    /// Load a vocabulary table from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Overlay `other` on this table; entries in `other` win.
    pub fn extend(&mut self, other: Vocabulary) {
        self.terms.extend(other.terms);
        self.superclasses.extend(other.superclasses);
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl OntologyLookup for Vocabulary {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.terms.get(key).map(String::as_str)
    }

    fn superclass(&self, type_key: &str) -> Option<&str> {
        self.superclasses.get(type_key).map(String::as_str)
    }
}
