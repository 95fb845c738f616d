//! Graph builder: walks an openBIS JSON document and adds provisional triples.
//!
//! The [`GraphBuilder`] visits every object in the document, resolves its
//! `@type` and attribute keys through an [`OntologyLookup`], and records the
//! result in a [`Graph`]. Entities are named by their source-local `@id`
//! ([`Node::Provisional`]); the canonicalizer renames them afterwards.

use chrono::{Local, TimeZone, Utc};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{ConvertError, Result};
use crate::model::graph::{Graph, Literal, Node, Term};
use crate::model::ontology::{obis, standard};
use crate::model::vocabulary::OntologyLookup;

use super::value::{classify_json, describe_value, iso_naive, ValueKind};
use super::{ConversionOptions, TimestampZone};

/// Reserved key holding free-form `{ code: value }` properties.
const PROPERTIES_KEY: &str = "properties";
/// Query settings echoed back by the API; never data.
const FETCH_OPTIONS_KEY: &str = "fetchOptions";
/// Container type for search hits; recursed into, never an entity itself.
const SEARCH_RESULT_TYPE: &str = "as.dto.common.search.SearchResult";
const SEARCH_RESULT_OBJECTS: &str = "objects";
/// Keys holding epoch-millisecond timestamps.
const TIMESTAMP_KEYS: &[&str] = &["registrationDate", "modificationDate"];
const EMAIL_KEY: &str = "email";
const PERM_ID_KEY: &str = "permId";
const IDENTIFIER_KEY: &str = "identifier";
const DIRECTORY_KEY: &str = "directory";
/// Keys of the data-set file id wrapper.
const DATA_SET_ID_KEY: &str = "dataSetId";
const FILE_PATH_KEY: &str = "filePath";

// ---------------------------------------------------------------------------
// GraphBuilder
// ---------------------------------------------------------------------------

/// Walks a JSON document and adds triples to a [`Graph`].
pub struct GraphBuilder<'a, L: OntologyLookup + ?Sized> {
    graph: &'a mut Graph,
    lookup: &'a L,
    options: &'a ConversionOptions,
}

impl<'a, L: OntologyLookup + ?Sized> GraphBuilder<'a, L> {
    pub fn new(graph: &'a mut Graph, lookup: &'a L, options: &'a ConversionOptions) -> Self {
        Self {
            graph,
            lookup,
            options,
        }
    }

    // -----------------------------------------------------------------------
    // Public entry points
    // -----------------------------------------------------------------------

    /// Walk a whole document (an object or a list of objects).
    pub fn build(&mut self, document: &Value) -> Result<()> {
        self.walk(document, None)
    }

    /// Walk `value` as if it were nested under `parent`.
    pub fn build_under(&mut self, value: &Value, parent: Option<&Node>) -> Result<()> {
        self.walk(value, parent)
    }

    // -----------------------------------------------------------------------
    // Traversal
    // -----------------------------------------------------------------------

    fn walk(&mut self, value: &Value, parent: Option<&Node>) -> Result<()> {
        match value {
            Value::Object(map) => self.walk_object(map, parent),
            Value::Array(items) => {
                for item in items {
                    self.walk(item, parent)?;
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn walk_object(&mut self, map: &Map<String, Value>, parent: Option<&Node>) -> Result<()> {
        let lookup = self.lookup;
        let Some(type_key) = map.get("@type").and_then(Value::as_str) else {
            return Ok(());
        };
        let Some(class) = lookup.lookup(type_key) else {
            if type_key == SEARCH_RESULT_TYPE {
                if let Some(objects) = map.get(SEARCH_RESULT_OBJECTS) {
                    return self.walk(objects, None);
                }
            }
            debug!(type_key, "no ontology class for type, skipping");
            return Ok(());
        };
        if is_directory(map) {
            debug!(type_key, "skipping directory listing");
            return Ok(());
        }
        let entity = local_id(map)
            .map(Node::provisional)
            .ok_or_else(|| ConvertError::MissingLocalId {
                type_key: type_key.to_string(),
            })?;

        if is_identifier_class(class) {
            match parent {
                Some(owner) => {
                    let label = map
                        .get(PERM_ID_KEY)
                        .and_then(Value::as_str)
                        .or_else(|| map.get(IDENTIFIER_KEY).and_then(Value::as_str))
                        .unwrap_or_default();
                    add_identifier(self.graph, owner, &entity, class, label);
                }
                None => debug!(type_key, "identifier without owning entity, skipping"),
            }
            return Ok(());
        }

        self.graph
            .add(entity.clone(), standard::RDF_TYPE, Node::iri(class));
        if class == standard::OWL_CLASS {
            if let Some(parent_class) = lookup.superclass(type_key) {
                self.graph.add(
                    entity.clone(),
                    standard::RDFS_SUBCLASS_OF,
                    Node::iri(parent_class),
                );
            }
        }

        for (key, value) in map {
            self.walk_attribute(&entity, key, value)?;
        }
        Ok(())
    }

    fn walk_attribute(&mut self, entity: &Node, key: &str, value: &Value) -> Result<()> {
        if key.starts_with('@') || key == FETCH_OPTIONS_KEY {
            return Ok(());
        }
        match value {
            Value::Object(props) if key == PROPERTIES_KEY => {
                self.describe_properties(entity, props);
                Ok(())
            }
            Value::Object(wrapper) if wrapper.contains_key(DATA_SET_ID_KEY) => {
                self.attach_file_id(entity, wrapper);
                Ok(())
            }
            Value::Object(_) => {
                self.walk(value, Some(entity))?;
                self.link(entity, key, std::slice::from_ref(value));
                Ok(())
            }
            Value::Array(items) => {
                for item in items {
                    self.walk(item, Some(entity))?;
                }
                self.link(entity, key, items);
                Ok(())
            }
            _ => self.attach_scalar(entity, key, value),
        }
    }

    // -----------------------------------------------------------------------
    // Relations to nested entities
    // -----------------------------------------------------------------------

    /// Relate `entity` to every nested object in `items` carrying an `@id`.
    fn link(&mut self, entity: &Node, key: &str, items: &[Value]) {
        let targets: Vec<String> = items
            .iter()
            .filter_map(Value::as_object)
            .filter(|obj| !is_directory(obj) && !self.is_identifier_object(obj))
            .filter_map(local_id)
            .collect();
        if targets.is_empty() {
            return;
        }
        let lookup = self.lookup;
        let Some(relation) = lookup.lookup(key) else {
            debug!(%entity, key, "no ontology relation for nested key");
            return;
        };
        for target in targets {
            self.graph
                .add(entity.clone(), relation, Node::provisional(target));
        }
    }

    fn is_identifier_object(&self, obj: &Map<String, Value>) -> bool {
        obj.get("@type")
            .and_then(Value::as_str)
            .and_then(|t| self.lookup.lookup(t))
            .is_some_and(is_identifier_class)
    }

    // -----------------------------------------------------------------------
    // Scalars
    // -----------------------------------------------------------------------

    fn attach_scalar(&mut self, entity: &Node, key: &str, value: &Value) -> Result<()> {
        if !is_truthy(value) {
            return Ok(());
        }
        if key == PERM_ID_KEY {
            if let Some(perm_id) = value.as_str() {
                self.graph
                    .add(entity.clone(), standard::RDF_VALUE, Literal::plain(perm_id));
                return Ok(());
            }
        }
        let lookup = self.lookup;
        let Some(relation) = lookup.lookup(key) else {
            debug!(%entity, key, "no ontology relation for attribute, dropping");
            return Ok(());
        };

        if TIMESTAMP_KEYS.contains(&key) {
            if let Some(millis) = value.as_i64().or_else(|| value.as_f64().map(|f| f as i64)) {
                let iso = self.timestamp(key, millis)?;
                self.graph.add(
                    entity.clone(),
                    relation,
                    Literal::typed(iso, standard::XSD_DATE_TIME_STAMP),
                );
                return Ok(());
            }
        }

        let text = scalar_text(value);
        let object: Term = if key == EMAIL_KEY {
            Node::iri(format!("mailto:{text}")).into()
        } else if relation == obis::RELATES_TO {
            // A bare local id pointing at an entity defined elsewhere.
            Node::provisional(text).into()
        } else {
            Literal::plain(text).into()
        };
        self.graph.add(entity.clone(), relation, object);
        Ok(())
    }

    /// Render epoch milliseconds as an ISO-8601 date-time.
    fn timestamp(&self, key: &str, millis: i64) -> Result<String> {
        let naive = match self.options.timestamp_zone {
            TimestampZone::Local => Local
                .timestamp_millis_opt(millis)
                .single()
                .map(|dt| dt.naive_local()),
            TimestampZone::Utc => Utc
                .timestamp_millis_opt(millis)
                .single()
                .map(|dt| dt.naive_utc()),
        };
        naive
            .map(|ndt| iso_naive(&ndt))
            .ok_or_else(|| ConvertError::TimestampOutOfRange {
                key: key.to_string(),
                millis,
            })
    }

    // -----------------------------------------------------------------------
    // Free-form properties
    // -----------------------------------------------------------------------

    fn describe_properties(&mut self, entity: &Node, props: &Map<String, Value>) {
        for (code, value) in props {
            if classify_json(value).kind == ValueKind::Blank {
                continue;
            }
            let property = match find_custom_property(self.graph, code) {
                Some(property) => property,
                None => mint_property(self.graph, code),
            };
            describe_value(self.graph, entity, &property, value);
        }
    }

    // -----------------------------------------------------------------------
    // Data-set file ids
    // -----------------------------------------------------------------------

    /// Handle `{ "dataSetId": {...}, "filePath": "..." }`: record the owning
    /// data set's permanent id and mint a permanent identifier from the path.
    fn attach_file_id(&mut self, entity: &Node, wrapper: &Map<String, Value>) {
        let dataset_perm_id = match wrapper.get(DATA_SET_ID_KEY) {
            Some(Value::Object(id)) => id.get(PERM_ID_KEY).and_then(Value::as_str),
            Some(Value::String(id)) => Some(id.as_str()),
            _ => None,
        };
        let lookup = self.lookup;
        match (dataset_perm_id, lookup.lookup(DATA_SET_ID_KEY)) {
            (Some(perm_id), Some(relation)) => {
                self.graph
                    .add(entity.clone(), relation, Literal::plain(perm_id));
            }
            (Some(_), None) => debug!(%entity, "no ontology relation for dataSetId"),
            _ => {}
        }
        if let Some(path) = wrapper.get(FILE_PATH_KEY).and_then(Value::as_str) {
            let record = self.graph.fresh_blank();
            add_identifier(
                self.graph,
                entity,
                &record,
                obis::PERMANENT_IDENTIFIER,
                path,
            );
        }
    }
}

/// Walk `document` into `graph`, nesting it under `parent` when given.
pub fn build<L: OntologyLookup + ?Sized>(
    document: &Value,
    graph: &mut Graph,
    lookup: &L,
    parent: Option<&Node>,
    options: &ConversionOptions,
) -> Result<()> {
    GraphBuilder::new(graph, lookup, options).build_under(document, parent)
}

// ---------------------------------------------------------------------------
// Identifier records and custom properties
// ---------------------------------------------------------------------------

/// Link `record` to `owner` as an identifier of kind `class`.
///
/// `$` and `:` are stripped from the label.
pub fn add_identifier(graph: &mut Graph, owner: &Node, record: &Node, class: &str, label: &str) {
    graph.add(record.clone(), standard::RDF_TYPE, Node::iri(class));
    let label: String = label.chars().filter(|c| !matches!(c, '$' | ':')).collect();
    if !label.is_empty() {
        graph.add(record.clone(), standard::RDF_VALUE, Literal::plain(label));
    }
    graph.add(owner.clone(), obis::HAS_IDENTIFIER, record.clone());
    graph.add(record.clone(), obis::IS_IDENTIFIER_OF, owner.clone());
}

/// The object property already declaring `obis:code` = `code`, if any.
pub fn find_custom_property(graph: &Graph, code: &str) -> Option<Node> {
    let code = Term::Literal(Literal::plain(code));
    graph
        .subjects(obis::CODE, &code)
        .find(|node| graph.has_type(node, standard::OWL_OBJECT_PROPERTY))
        .cloned()
}

/// Create an object property for an attribute key the ontology lacks.
fn mint_property(graph: &mut Graph, code: &str) -> Node {
    let property = graph.fresh_blank();
    graph.add(
        property.clone(),
        standard::RDF_TYPE,
        Node::iri(standard::OWL_OBJECT_PROPERTY),
    );
    graph.add(property.clone(), obis::CODE, Literal::plain(code));
    let record = graph.fresh_blank();
    add_identifier(graph, &property, &record, obis::PERMANENT_IDENTIFIER, code);
    debug!(code, "minted custom property");
    property
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn is_identifier_class(class: &str) -> bool {
    class == obis::IDENTIFIER || class == obis::PERMANENT_IDENTIFIER
}

/// Source-local id of an object, as written in its `@id`.
fn local_id(map: &Map<String, Value>) -> Option<String> {
    match map.get("@id")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn is_directory(map: &Map<String, Value>) -> bool {
    map.get(DIRECTORY_KEY).is_some_and(is_truthy)
}

/// JSON truthiness: null, false, zero and empty containers are false.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
