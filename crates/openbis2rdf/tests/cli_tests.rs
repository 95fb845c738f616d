//! CLI integration tests.
//!
//! These tests invoke the `openbis2rdf` binary via `std::process::Command`
//! against the fixture JSON files and verify output correctness.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Path to the built binary (set by cargo test).
fn binary_path() -> PathBuf {
    // `cargo test` places the test binary next to the main binary
    let mut path = std::env::current_exe()
        .expect("current_exe")
        .parent()
        .expect("parent")
        .parent()
        .expect("grandparent")
        .to_path_buf();
    path.push("openbis2rdf");
    path
}

/// Path to a fixture file.
fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn dataset_fixture() -> String {
    fixture_path("dataset.json").to_str().unwrap().to_string()
}

fn triple_lines(output: &str) -> Vec<&str> {
    output
        .lines()
        .map(str::trim)
        .filter(|t| !t.is_empty() && !t.starts_with('#') && !t.starts_with("@prefix"))
        .collect()
}

#[test]
fn ntriples_output_is_valid() {
    let output = Command::new(binary_path())
        .args([dataset_fixture().as_str(), "--utc", "-q"])
        .output()
        .expect("failed to execute binary");

    assert!(
        output.status.success(),
        "openbis2rdf failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8(output.stdout).expect("invalid UTF-8");
    let lines = triple_lines(&stdout);

    // N-Triples: every triple line ends with " ." and starts with a node
    for line in &lines {
        assert!(line.ends_with(" ."), "N-Triples line does not end with ' .': {line}");
        assert!(
            line.starts_with('<') || line.starts_with("_:"),
            "N-Triples line does not start with a node: {line}"
        );
    }
    assert!(lines.len() > 30, "Expected more than 30 triples, got {}", lines.len());

    // No provisional identities survive
    assert!(!stdout.contains("https://example.com/"), "provisional IRI leaked");
    assert!(stdout.contains(
        "<https://openbismantic.matolab.org/openbismantic/dataset/20231114221320-1> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <https://w3id.org/matolab/openbis/DataSet> ."
    ));
    assert!(stdout.contains(
        "\"2023-11-14T22:13:20\"^^<http://www.w3.org/2001/XMLSchema#dateTimeStamp>"
    ));
}

#[test]
fn turtle_output_has_prefixes() {
    let output = Command::new(binary_path())
        .args([dataset_fixture().as_str(), "--format", "turtle", "-q"])
        .output()
        .expect("failed to execute binary");

    assert!(
        output.status.success(),
        "openbis2rdf failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8(output.stdout).expect("invalid UTF-8");

    assert!(stdout.contains("@prefix rdf:"), "Turtle output should contain rdf prefix");
    assert!(stdout.contains("@prefix obis:"), "Turtle output should contain obis prefix");
    assert!(stdout.contains("obis:DataSet"), "class IRIs should be compacted");
}

#[test]
fn jsonld_output_groups_nodes() {
    let output = Command::new(binary_path())
        .args([dataset_fixture().as_str(), "-f", "json-ld", "--utc", "-q"])
        .output()
        .expect("failed to execute binary");

    assert!(
        output.status.success(),
        "openbis2rdf failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let document: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("output should be JSON");
    assert_eq!(document["@context"]["obis"], "https://w3id.org/matolab/openbis/");
    let graph = document["@graph"].as_array().expect("@graph array");
    let dataset = graph
        .iter()
        .find(|node| {
            node["@id"] == "https://openbismantic.matolab.org/openbismantic/dataset/20231114221320-1"
        })
        .expect("data set node");
    assert_eq!(dataset["@type"], "obis:DataSet");
    assert_eq!(dataset["dcat:distribution"].as_array().map(Vec::len), Some(2));
}

#[test]
fn rdfxml_output_is_xml() {
    let output = Command::new(binary_path())
        .args([dataset_fixture().as_str(), "-f", "rdfxml", "--utc", "-q"])
        .output()
        .expect("failed to execute binary");

    assert!(
        output.status.success(),
        "openbis2rdf failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8(output.stdout).expect("invalid UTF-8");
    assert!(stdout.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"), "{stdout}");
    assert!(stdout.contains("<rdf:RDF xmlns:rdf=\"http://www.w3.org/1999/02/22-rdf-syntax-ns#\""));
    assert!(stdout.contains(
        "<rdf:Description rdf:about=\"https://openbismantic.matolab.org/openbismantic/dataset/20231114221320-1\">"
    ));
    assert!(stdout.contains("<rdf:type rdf:resource=\"https://w3id.org/matolab/openbis/DataSet\"/>"));
    assert!(stdout.trim_end().ends_with("</rdf:RDF>"));
}

#[test]
fn nquads_matches_ntriples() {
    let run = |format: &str| {
        let output = Command::new(binary_path())
            .args([dataset_fixture().as_str(), "-f", format, "--utc", "-q"])
            .output()
            .expect("failed to execute binary");
        assert!(output.status.success());
        String::from_utf8(output.stdout).expect("invalid UTF-8")
    };
    assert_eq!(run("nquads"), run("nt"));
}

#[test]
fn base_url_changes_output_iris() {
    let output = Command::new(binary_path())
        .args([
            dataset_fixture().as_str(),
            "--base-url",
            "http://custom.example/lab/",
            "-q",
        ])
        .output()
        .expect("failed to execute binary");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("invalid UTF-8");

    assert!(
        stdout.contains("<http://custom.example/lab/openbismantic/dataset/20231114221320-1>"),
        "Output should use the custom namespace"
    );
    assert!(
        !stdout.contains("https://openbismantic.matolab.org/"),
        "Default namespace should not appear"
    );
}

#[test]
fn builtin_table_promotes_sample_identifier() {
    let mut input = tempfile::NamedTempFile::new().unwrap();
    input
        .write_all(
            br#"{"@id": "7", "@type": "as.dto.sample.Sample",
                 "identifier": {"@id": "8", "@type": "as.dto.sample.Identifier", "identifier": "/SPACE/SAMPLE-1"}}"#,
        )
        .unwrap();

    let output = Command::new(binary_path())
        .args([input.path().to_str().unwrap(), "-q"])
        .output()
        .expect("failed to execute binary");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("invalid UTF-8");
    assert!(
        stdout.contains(
            "<https://openbismantic.matolab.org/openbismantic/object/%2FSPACE%2FSAMPLE-1> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <https://w3id.org/matolab/openbis/Object> ."
        ),
        "sample should be promoted: {stdout}"
    );
    assert!(!stdout.contains("https://example.com/"), "provisional IRI leaked");
}

#[test]
fn vocabulary_file_extends_builtin_table() {
    let mut input = tempfile::NamedTempFile::new().unwrap();
    input
        .write_all(
            br#"{"@id": 7, "@type": "as.dto.material.Material",
                 "permId": {"@id": 8, "@type": "as.dto.sample.id.SamplePermId", "permId": "MAT-1"}}"#,
        )
        .unwrap();

    let output = Command::new(binary_path())
        .args([
            input.path().to_str().unwrap(),
            "--vocabulary",
            fixture_path("vocabulary.json").to_str().unwrap(),
            "-q",
        ])
        .output()
        .expect("failed to execute binary");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("invalid UTF-8");
    assert!(
        stdout.contains("<https://openbismantic.matolab.org/openbismantic/object/MAT-1>"),
        "material should be typed by the extra table: {stdout}"
    );
}

#[test]
fn reads_stdin_and_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let out_path = dir.path().join("out.nt");

    let mut child = Command::new(binary_path())
        .args(["-", "-o", out_path.to_str().unwrap(), "-q"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn binary");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(br#"{"@type": "as.dto.space.Space", "@id": 1, "code": "LAB"}"#)
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    let written = std::fs::read_to_string(&out_path).unwrap();
    assert!(written.contains(
        "<https://openbismantic.matolab.org/openbismantic/LAB> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <https://w3id.org/matolab/openbis/Space> ."
    ));
}

#[test]
fn unknown_format_fails() {
    let output = Command::new(binary_path())
        .args([dataset_fixture().as_str(), "-f", "trig"])
        .output()
        .expect("failed to execute binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).expect("invalid UTF-8");
    assert!(stderr.contains("unknown format"), "got: {stderr}");
}

#[test]
fn missing_id_fails_loudly() {
    let mut input = tempfile::NamedTempFile::new().unwrap();
    input
        .write_all(br#"{"@type": "as.dto.sample.Sample", "code": "S1"}"#)
        .unwrap();
    let output = Command::new(binary_path())
        .args([input.path().to_str().unwrap(), "-q"])
        .output()
        .expect("failed to execute binary");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn default_prints_summary_to_stderr() {
    let output = Command::new(binary_path())
        .args([dataset_fixture().as_str()])
        .output()
        .expect("failed to execute binary");

    assert!(output.status.success());

    let stderr = String::from_utf8(output.stderr).expect("invalid UTF-8");
    assert!(stderr.contains("Converted"), "Should show conversion summary");
    assert!(stderr.contains("triples"), "Summary should mention triple count");
}

#[test]
fn quiet_suppresses_stderr() {
    let output = Command::new(binary_path())
        .args([dataset_fixture().as_str(), "-q"])
        .output()
        .expect("failed to execute binary");

    assert!(output.status.success());

    let stderr = String::from_utf8(output.stderr).expect("invalid UTF-8");
    assert!(
        stderr.is_empty(),
        "Quiet mode should produce no stderr output, got: {stderr}"
    );
}
