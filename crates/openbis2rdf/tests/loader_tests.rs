use std::io::Write;
use std::path::Path;

use openbis2rdf::conversion::loader::{load_json, read_document};
use openbis2rdf::error::ConvertError;

#[test]
fn load_fixture_json() {
    let fixture_path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/dataset.json");

    let document = load_json(&fixture_path).expect("Failed to load fixture JSON");

    let items = document.as_array().expect("fixture is a list");
    assert_eq!(items.len(), 4);
    assert_eq!(items[0]["@type"], "as.dto.dataset.DataSet");
}

#[test]
fn read_document_from_reader() {
    let document = read_document(&b"{\"@type\": \"as.dto.space.Space\", \"@id\": 1}"[..])
        .expect("valid JSON");
    assert_eq!(document["@id"], 1);
}

#[test]
fn byte_order_mark_is_skipped() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all("\u{feff}[]".as_bytes()).unwrap();
    let document = load_json(file.path()).expect("BOM-prefixed JSON");
    assert!(document.as_array().is_some_and(Vec::is_empty));
}

#[test]
fn invalid_json_gives_json_error() {
    let result = read_document(&b"{not json"[..]);
    assert!(matches!(result, Err(ConvertError::Json(_))));
}

#[test]
fn load_nonexistent_file_gives_error() {
    let result = load_json(Path::new("/nonexistent/file.json"));
    assert!(matches!(result, Err(ConvertError::Io(_))));
}
