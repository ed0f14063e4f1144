//! Integration tests for rule-driven node construction.

use std::fs;
use tempfile::tempdir;

use smith_core::{
    CoreError, LinePrompter, Node, NodeConstructor, NodeExport, NodeFormat, NodeValidator,
};
use smith_schema::{RuleReader, RuleSet};

const EML_RULES: &str = r#"
rules:
  eml:
    attributes:
      - name: packageId
        required: true
      - name: system
        required: true
        allowed_values: [knb, doi]
      - name: scope
        allowed_values: [system, document]
    content:
      rules: [emptyContent]
    children:
      - names: [dataset, citation]
        min: 1
        max: 1
  dataset:
    content:
      rules: [emptyContent]
    children:
      - names: [title]
        min: 1
        max: 2
      - names: [creator]
        min: 0
  citation:
    content:
      rules: [emptyContent]
    children:
      - names: [title]
        min: 1
        max: 1
  title:
    attributes:
      - name: lang
    content:
      rules: [nonEmptyContent]
  creator:
    content:
      enum: [person, organization]
  broken:
    content:
      rules: [emptyContent]
    children:
      - names: [title]
        min: 0
        max: abc
"#;

fn rules() -> RuleSet {
    RuleReader::from_yaml_str(EML_RULES).unwrap()
}

fn build(rules: &RuleSet, node_type: Option<&str>, answers: &[&str]) -> Result<Node, CoreError> {
    let mut prompter = LinePrompter::scripted(answers);
    let mut constructor = NodeConstructor::new(rules, &mut prompter);
    constructor.construct(node_type)
}

/// Answers for a complete eml document with a dataset holding two titles
/// and one creator.
const EML_ANSWERS: &[&str] = &[
    "pkg.1.1", // packageId
    "doi",     // system
    "",        // scope (optional)
    "dataset", // choice between dataset and citation
    "en",      // title lang
    "Lakes",   // title content
    "y",       // another title?
    "",        // title lang
    "Rivers",  // title content (max reached afterwards)
    "y",       // a creator?
    "person",  // creator content
    "n",       // another creator?
];

/// Test a full multi-level construction.
#[test]
fn test_construct_complete_document() {
    let rules = rules();
    let eml = build(&rules, Some("eml"), EML_ANSWERS).unwrap();

    assert_eq!(eml.attribute("packageId"), Some("pkg.1.1"));
    assert_eq!(eml.attribute("system"), Some("doi"));
    assert_eq!(eml.attribute("scope"), None);
    assert_eq!(eml.content, None);

    assert_eq!(eml.children.len(), 1);
    let dataset = &eml.children[0];
    assert_eq!(dataset.name, "dataset");

    let names: Vec<_> = dataset.children.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["title", "title", "creator"]);
    assert_eq!(dataset.children[0].attribute("lang"), Some("en"));
    assert_eq!(dataset.children[1].attribute("lang"), None);
    assert_eq!(dataset.children[1].content(), Some("Rivers"));
    assert_eq!(dataset.children[2].content(), Some("person"));

    let result = NodeValidator::validate(&eml, &rules);
    assert!(result.valid, "Validation failed: {:?}", result.errors);
}

/// Test that identical answers give structurally identical trees.
#[test]
fn test_construction_is_repeatable() {
    let rules = rules();
    let first = build(&rules, Some("eml"), EML_ANSWERS).unwrap();
    let second = build(&rules, Some("eml"), EML_ANSWERS).unwrap();

    assert_ne!(first.id, second.id);
    assert!(first.structurally_eq(&second));
}

/// Test that invalid answers are re-asked and never stored.
#[test]
fn test_invalid_answers_are_reasked() {
    let rules = rules();
    let answers = [
        "", "pkg.2", // packageId is required
        "ark", "", "knb", // system must be one of the choices
        "global", "system", // scope must be one of the choices
        "citation",
        "", "", "", "Only title", // title content is required
    ];

    let eml = build(&rules, Some("eml"), &answers).unwrap();
    assert_eq!(eml.attribute("packageId"), Some("pkg.2"));
    assert_eq!(eml.attribute("system"), Some("knb"));
    assert_eq!(eml.attribute("scope"), Some("system"));
    assert_eq!(eml.children[0].name, "citation");
    assert_eq!(eml.children[0].children[0].content(), Some("Only title"));
    assert!(NodeValidator::ensure_complete(&eml, &rules).is_ok());
}

/// Test that running out of answers is a hard failure.
#[test]
fn test_input_exhausted() {
    let rules = rules();
    let err = build(&rules, Some("eml"), &["pkg.3", "doi"]).unwrap_err();
    assert!(matches!(err, CoreError::InputExhausted));
}

/// Test that a malformed bound aborts before any child is created.
#[test]
fn test_malformed_rule_aborts() {
    let rules = rules();
    let err = build(&rules, Some("broken"), &["y", "en", "never used"]).unwrap_err();
    assert!(err.is_malformed_rule());
    assert!(err.to_string().contains("abc"));
}

/// Test choosing the node type interactively.
#[test]
fn test_node_type_prompt() {
    let rules = rules();
    let node = build(&rules, None, &["", "paragraph", "creator", "organization"]).unwrap();
    assert_eq!(node.name, "creator");
    assert_eq!(node.content(), Some("organization"));
}

/// Test saving a constructed document and validating the stored copy.
#[test]
fn test_save_load_and_validate() {
    let rules = rules();
    let eml = build(&rules, Some("eml"), EML_ANSWERS).unwrap();

    let temp = tempdir().unwrap();
    let path = temp.path().join(NodeExport::default_file_name(&eml, NodeFormat::Json));
    NodeExport::save(&eml, &path, NodeFormat::Json).unwrap();

    let loaded = NodeExport::load(&path).unwrap();
    assert_eq!(loaded, eml);
    assert!(NodeValidator::ensure_complete(&loaded, &rules).is_ok());

    let mut tampered = loaded.clone();
    tampered.children[0].children.clear();
    let yaml = NodeExport::render(&tampered, NodeFormat::Yaml).unwrap();
    let tampered_path = temp.path().join("tampered.yaml");
    fs::write(&tampered_path, yaml).unwrap();

    let err = NodeValidator::ensure_complete(&NodeExport::load(&tampered_path).unwrap(), &rules)
        .unwrap_err();
    assert!(matches!(err, CoreError::SchemaIncomplete { .. }));
}
