//! IRI minting for openBIS entities in RDF graphs.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use url::Url;

use super::ontology::{standard, PROVISIONAL_NS};
use crate::error::{ConvertError, Result};

/// Characters that need percent-encoding in IRI path segments.
/// We keep alphanumeric, -, _, ., ~ as unreserved per RFC 3987.
const IRI_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'!')
    .add(b'"')
    .add(b'#')
    .add(b'$')
    .add(b'%')
    .add(b'&')
    .add(b'\'')
    .add(b'(')
    .add(b')')
    .add(b'*')
    .add(b'+')
    .add(b',')
    .add(b'/')
    .add(b':')
    .add(b';')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'?')
    .add(b'@')
    .add(b'[')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Path segment every synthesized identity is anchored under.
const NAMESPACE_SEGMENT: &str = "openbismantic/";

/// Generates permanent IRIs for openBIS entities, identifier records and
/// custom properties.
pub struct IriMinter {
    namespace: String,
}

impl IriMinter {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            namespace: resolve_namespace(base_url)?,
        })
    }

    /// The namespace all minted IRIs start with (no trailing slash).
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Escape a string for use in an IRI path segment.
    fn escape(value: &str) -> String {
        utf8_percent_encode(value, IRI_ENCODE_SET).to_string()
    }

    /// IRI for a business entity promoted by its permanent identifier.
    pub fn entity_iri(&self, segment: &str, label: &str) -> String {
        format!(
            "{}/{}/{}",
            self.namespace,
            Self::escape(segment),
            Self::escape(label)
        )
    }

    /// IRI for a data-set file. The owning data set's permanent id keeps
    /// equal file paths from different data sets apart.
    pub fn distribution_iri(&self, segment: &str, dataset_permid: &str, label: &str) -> String {
        format!(
            "{}/{}/{}/{}",
            self.namespace,
            Self::escape(segment),
            Self::escape(dataset_permid),
            Self::escape(label)
        )
    }

    /// IRI for a property or entity named directly by its code.
    pub fn code_iri(&self, code: &str) -> String {
        format!("{}/{}", self.namespace, Self::escape(code))
    }

    /// IRI for a permanent identifier record.
    pub fn permanent_identifier_iri(&self, label: &str) -> String {
        self.entity_iri("permanent_identifier", label)
    }

    /// IRI a provisional identity renders as before canonicalization.
    pub fn provisional_iri(local_id: &str) -> String {
        format!("{PROVISIONAL_NS}{}", Self::escape(local_id))
    }

    /// Path segment used for instances of `class_iri`.
    ///
    /// `owl:Class` and `owl:ObjectProperty` are special-cased; every other
    /// class contributes its lowercased local name.
    pub fn class_segment(class_iri: &str) -> String {
        match class_iri {
            standard::OWL_CLASS => "class".to_string(),
            standard::OWL_OBJECT_PROPERTY => "object_property".to_string(),
            _ => {
                let local = class_iri.rsplit('#').next().unwrap_or(class_iri);
                let local = local.rsplit('/').next().unwrap_or(local);
                local.to_lowercase()
            }
        }
    }
}

/// Resolve the identity namespace against `base_url` the way a relative
/// URL reference would be: a base ending in `/` is extended, otherwise its
/// last path segment is replaced. Query and fragment are dropped.
pub fn resolve_namespace(base_url: &str) -> Result<String> {
    let invalid = |e: url::ParseError| ConvertError::BaseUrl {
        url: base_url.to_string(),
        message: e.to_string(),
    };
    let namespace = Url::parse(base_url)
        .and_then(|base| base.join(NAMESPACE_SEGMENT))
        .map_err(invalid)?;
    Ok(namespace.as_str().trim_end_matches('/').to_string())
}
