//! Configuration Tests.
//!
//! Loads configurations from JSON files and checks validation of every section.

use std::io::Write;

use dualsim_core::config::{BranchPredictor, Config, ConfigError};
use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

#[test]
fn defaults_describe_the_baseline_core() {
    let config = Config::default();
    assert_eq!(config.pipeline.memory_stages, 3);
    assert_eq!(config.pipeline.fpu_stages, 3);
    assert_eq!(config.pipeline.branch_predictor, BranchPredictor::GShare);
    assert_eq!(config.latency.fdiv, 4);
    assert!(config.cache.enabled);
    assert_eq!(config.network.listen, None);
    assert!(config.validate().is_ok());
}

#[test]
fn file_round_trip() {
    let mut config = Config::default();
    config.general.trace = true;
    config.general.max_cycles = Some(500);
    config.latency.fsqrt = 6;
    config.network.peer = Some("127.0.0.1:9000".parse().unwrap());

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(serde_json::to_string(&config).unwrap().as_bytes()).unwrap();
    assert_eq!(Config::from_file(file.path()).unwrap(), config);
}

#[test]
fn predictor_names_are_case_tolerant() {
    for name in ["GShare", "gshare", "Gshare"] {
        let text = format!(r#"{{"pipeline": {{"branch_predictor": "{name}"}}}}"#);
        assert_eq!(
            Config::from_json(&text).unwrap().pipeline.branch_predictor,
            BranchPredictor::GShare
        );
    }
}

#[test]
fn invalid_fields_are_named() {
    for (text, field) in [
        (r#"{"pipeline": {"memory_stages": 0}}"#, "pipeline.memory_stages"),
        (r#"{"pipeline": {"history_bits": 0}}"#, "pipeline.history_bits"),
        (r#"{"pipeline": {"initial_counter": 4}}"#, "pipeline.initial_counter"),
        (r#"{"memory": {"size_words": 0}}"#, "memory.size_words"),
        (r#"{"cache": {"line_bytes": 48}}"#, "cache.line_bytes"),
    ] {
        match Config::from_json(text) {
            Err(ConfigError::Invalid { field: got, .. }) => assert_eq!(got, field),
            other => panic!("{text}: expected invalid {field}, got {other:?}"),
        }
    }
}

#[test]
fn malformed_json_is_a_parse_error() {
    assert!(matches!(
        Config::from_json(r#"{"latency": {"fdiv": "slow"}}"#),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        Config::from_file(dir.path().join("none.json")),
        Err(ConfigError::Io(_))
    ));
}
