//! RDF vocabulary constants for the openBIS graph.
//!
//! - `obis:` prefix (https://w3id.org/matolab/openbis/) -- the openBIS ontology
//! - `qudt:` prefix (http://qudt.org/schema/qudt/) -- quantity value wrappers
//! - `oa:` prefix (http://www.w3.org/ns/oa#) -- annotation wrappers for free text
//! - `dcat:` prefix (http://www.w3.org/ns/dcat#) -- distributions and download URLs

/// Standard RDF/RDFS/OWL/XSD namespace URIs
pub mod standard {
    pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
    pub const OWL: &str = "http://www.w3.org/2002/07/owl#";
    pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";
    pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
    pub const RDF_VALUE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#value";
    pub const RDFS_LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
    pub const RDFS_COMMENT: &str = "http://www.w3.org/2000/01/rdf-schema#comment";
    pub const RDFS_SUBCLASS_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";
    pub const OWL_CLASS: &str = "http://www.w3.org/2002/07/owl#Class";
    pub const OWL_OBJECT_PROPERTY: &str = "http://www.w3.org/2002/07/owl#ObjectProperty";
    pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
    pub const XSD_BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
    pub const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
    pub const XSD_DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";
    pub const XSD_DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";
    pub const XSD_DATE_TIME_STAMP: &str = "http://www.w3.org/2001/XMLSchema#dateTimeStamp";
}

/// openBIS ontology (`obis:` prefix)
pub mod obis {
    pub const PREFIX: &str = "obis";
    pub const NS: &str = "https://w3id.org/matolab/openbis/";

    // Classes
    pub const SPACE: &str = "https://w3id.org/matolab/openbis/Space";
    pub const PROJECT: &str = "https://w3id.org/matolab/openbis/Project";
    pub const COLLECTION: &str = "https://w3id.org/matolab/openbis/Collection";
    pub const OBJECT: &str = "https://w3id.org/matolab/openbis/Object";
    pub const DATA_SET: &str = "https://w3id.org/matolab/openbis/DataSet";
    pub const DATA_STORE: &str = "https://w3id.org/matolab/openbis/DataStore";
    pub const PERSON: &str = "https://w3id.org/matolab/openbis/Person";
    pub const TAG: &str = "https://w3id.org/matolab/openbis/Tag";
    pub const VOCABULARY: &str = "https://w3id.org/matolab/openbis/Vocabulary";
    pub const VOCABULARY_TERM: &str = "https://w3id.org/matolab/openbis/VocabularyTerm";
    pub const PROPERTY_ASSIGNMENT: &str = "https://w3id.org/matolab/openbis/PropertyAssignment";
    pub const IDENTIFIER: &str = "https://w3id.org/matolab/openbis/Identifier";
    pub const PERMANENT_IDENTIFIER: &str = "https://w3id.org/matolab/openbis/PermanentIdentifier";

    // Identifier relationships
    pub const HAS_IDENTIFIER: &str = "https://w3id.org/matolab/openbis/has_identifier";
    pub const IS_IDENTIFIER_OF: &str = "https://w3id.org/matolab/openbis/is_identifier_of";

    // Entity properties
    pub const CODE: &str = "https://w3id.org/matolab/openbis/code";
    pub const DESCRIPTION: &str = "https://w3id.org/matolab/openbis/description";
    pub const REGISTRATION_DATE: &str = "https://w3id.org/matolab/openbis/registration_date";
    pub const MODIFICATION_DATE: &str = "https://w3id.org/matolab/openbis/modification_date";
    pub const REGISTRATOR: &str = "https://w3id.org/matolab/openbis/registrator";
    pub const MODIFIER: &str = "https://w3id.org/matolab/openbis/modifier";
    pub const EMAIL: &str = "https://w3id.org/matolab/openbis/email";
    pub const FIRST_NAME: &str = "https://w3id.org/matolab/openbis/first_name";
    pub const LAST_NAME: &str = "https://w3id.org/matolab/openbis/last_name";
    pub const USER_ID: &str = "https://w3id.org/matolab/openbis/user_id";
    pub const DATA_TYPE: &str = "https://w3id.org/matolab/openbis/data_type";

    // Entity relationships
    pub const RELATES_TO: &str = "https://w3id.org/matolab/openbis/relates_to";
    pub const HAS_PARENT: &str = "https://w3id.org/matolab/openbis/has_parent";
    pub const HAS_CHILD: &str = "https://w3id.org/matolab/openbis/has_child";
    pub const HAS_PROPERTY_ASSIGNMENT: &str =
        "https://w3id.org/matolab/openbis/has_property_assignment";

    // Data set files
    pub const DATASET_PERMID: &str = "https://w3id.org/matolab/openbis/dataset_permid";
    pub const FILE_PATH: &str = "https://w3id.org/matolab/openbis/file_path";
    pub const FILE_LENGTH: &str = "https://w3id.org/matolab/openbis/file_length";
    pub const CHECKSUM: &str = "https://w3id.org/matolab/openbis/checksum";
}

/// QUDT quantity values (`qudt:` prefix)
pub mod qudt {
    pub const PREFIX: &str = "qudt";
    pub const NS: &str = "http://qudt.org/schema/qudt/";

    pub const QUANTITY_VALUE: &str = "http://qudt.org/schema/qudt/QuantityValue";
    pub const VALUE: &str = "http://qudt.org/schema/qudt/value";
}

/// Web Annotation vocabulary (`oa:` prefix)
pub mod oa {
    pub const PREFIX: &str = "oa";
    pub const NS: &str = "http://www.w3.org/ns/oa#";

    pub const ANNOTATION: &str = "http://www.w3.org/ns/oa#Annotation";
    pub const HAS_LITERAL_BODY: &str = "http://www.w3.org/ns/oa#hasLiteralBody";
}

/// Data Catalog vocabulary (`dcat:` prefix)
pub mod dcat {
    pub const PREFIX: &str = "dcat";
    pub const NS: &str = "http://www.w3.org/ns/dcat#";

    pub const DISTRIBUTION_CLASS: &str = "http://www.w3.org/ns/dcat#Distribution";
    pub const DISTRIBUTION: &str = "http://www.w3.org/ns/dcat#distribution";
    pub const ENDPOINT_URL: &str = "http://www.w3.org/ns/dcat#endpointURL";
    pub const DOWNLOAD_URL: &str = "http://www.w3.org/ns/dcat#downloadURL";
}

/// Namespace that provisional (source-local) identities render under.
pub const PROVISIONAL_NS: &str = "https://example.com/";
