#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use rstest::rstest;
use std::fs;
use tempfile::TempDir;

const CUSTOM: &str = r#"
import numpy as np
from pywr.parameters import Parameter, load_parameter
from pywr import recorders

class LicenseParameter(Parameter):
    """A licence.

    class NotAClass(Parameter):
    """
    def value(self, ts, si):
        return 1.0

class ScaledLicense(LicenseParameter):
    pass

class PeakRecorder(recorders.NodeRecorder):
    pass

class Weir(Link, metaclass=NodeMeta):
    pass

class Helper(object):
    pass

LicenseParameter.register()
"#;

#[test]
fn scan_classifies_by_base_class() {
    let record = scan_source(CUSTOM);
    assert!(record.parse_ok);
    assert_eq!(record.parameter_names, vec!["LicenseParameter", "ScaledLicense"]);
    assert_eq!(record.recorder_names, vec!["PeakRecorder"]);
    assert_eq!(record.node_names, vec!["Weir"]);
}

#[test]
fn scan_records_declared_bases_for_every_class() {
    let record = scan_source(CUSTOM);
    let names: Vec<&str> = record.base_classes.keys().map(|k| k.as_str()).collect();
    assert_eq!(
        names,
        vec!["LicenseParameter", "ScaledLicense", "PeakRecorder", "Weir", "Helper"]
    );
    assert_eq!(record.base_classes["PeakRecorder"], vec!["NodeRecorder"]);
    assert_eq!(record.base_classes["Weir"], vec!["Link"]);
    assert_eq!(record.category_of("Helper"), None);
}

#[test]
fn scan_prefers_parameter_over_recorder_and_node() {
    let record = scan_source("class Both(Recorder, Parameter, Node):\n    pass\n");
    assert_eq!(record.category_of("Both"), Some(ComponentCategory::Parameter));
    assert!(record.recorder_names.is_empty());
    assert!(record.node_names.is_empty());
}

#[test]
fn scan_prefers_recorder_over_node() {
    let record = scan_source("class R(Node, Recorder):\n    pass\n");
    assert_eq!(record.category_of("R"), Some(ComponentCategory::Recorder));
}

#[test]
fn scan_class_without_bases() {
    let record = scan_source("class Plain:\n    pass\n");
    assert!(record.parse_ok);
    assert_eq!(record.base_classes["Plain"], Vec::<smol_str::SmolStr>::new());
}

#[test]
fn scan_reads_classes_after_docstring_ending_in_quote() {
    let source = r#"class Licence(Parameter):
    """Annual limit, see "licence""""
    pass
"#;
    let record = scan_source(source);
    assert!(record.parse_ok);
    assert_eq!(record.category_of("Licence"), Some(ComponentCategory::Parameter));
}

#[rstest]
#[case("class (Parameter):\n    pass\n")]
#[case("class A(Parameter\n")]
#[case("class A(Parameter) pass\n")]
#[case("x = 'unterminated\n")]
fn scan_flags_malformed_sources(#[case] source: &str) {
    assert!(!scan_source(source).parse_ok);
}

#[test]
fn scan_source_file_reports_missing_file() {
    let dir = TempDir::new().unwrap();
    let record = scan_source_file(dir.path().join("missing.py"));
    assert!(!record.exists);
    assert!(!record.parse_ok);
}

#[test]
fn scan_source_file_reads_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom.py");
    fs::write(&path, CUSTOM).unwrap();

    let record = scan_source_file(&path);
    assert!(record.exists);
    assert!(record.parse_ok);
    assert_eq!(record.path.as_deref(), Some(path.as_path()));
    let components: Vec<_> = record.components().collect();
    assert_eq!(components[0], (ComponentCategory::Parameter, "LicenseParameter"));
    assert_eq!(components.len(), 4);
}

#[rstest]
#[case(ComponentCategory::Parameter, "MonthlyProfileParameter", "monthlyprofile")]
#[case(ComponentCategory::Parameter, "CONSTANTPARAMETER", "constant")]
#[case(ComponentCategory::Parameter, "Parameter", "parameter")]
#[case(ComponentCategory::Recorder, "CSVRecorder", "csv")]
#[case(ComponentCategory::Recorder, "numpyarraynode", "numpyarraynode")]
#[case(ComponentCategory::Node, "AggregatedNode", "aggregatednode")]
fn key_normalisation(
    #[case] category: ComponentCategory,
    #[case] type_name: &str,
    #[case] expected: &str,
) {
    assert_eq!(category.key_of(type_name), expected);
}

#[test]
fn builtin_keys_and_bases() {
    assert!(is_builtin_key(ComponentCategory::Parameter, "constant"));
    assert!(is_builtin_key(ComponentCategory::Recorder, "csv"));
    assert!(is_builtin_key(ComponentCategory::Node, "storage"));
    assert!(!is_builtin_key(ComponentCategory::Parameter, "license"));
    assert!(is_known_base(ComponentCategory::Parameter, "IndexParameter"));
    assert!(!is_known_base(ComponentCategory::Node, "Parameter"));
}

#[test]
fn identifiers() {
    assert!(is_identifier("Débit"));
    assert!(is_identifier("_private"));
    assert!(!is_identifier("1abc"));
    assert!(!is_identifier(""));
}
