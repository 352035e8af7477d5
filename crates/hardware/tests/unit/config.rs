//! Configuration Tests.

use rstest::rstest;

use pipesim_core::common::ConfigError;
use pipesim_core::config::{BackendType, Config, PredictorKind};

#[test]
fn empty_object_gives_defaults() {
    let config = Config::from_json("{}").unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(config.pipeline.backend, BackendType::InOrder);
    assert_eq!(config.pipeline.branch_predictor, PredictorKind::Bimodal);
    assert_eq!(config.pipeline.btb_size, 16);
    assert_eq!(config.pipeline.pt_size, 16);
    assert_eq!(config.pipeline.counter_init, 3);
    assert_eq!(config.memory.size, 64_000);
    assert!(!config.general.trace_pipeline);
}

#[test]
fn full_document_parses() {
    let json = r#"{
        "general": { "trace_pipeline": true, "max_cycles": 5000 },
        "pipeline": {
            "backend": "OutOfOrder",
            "branch_predictor": "Static",
            "btb_size": 32,
            "pt_size": 64,
            "counter_init": 4,
            "rob_size": 16,
            "rs_size": 8
        },
        "memory": { "size": 1024 }
    }"#;
    let config = Config::from_json(json).unwrap_or_else(|e| panic!("{e}"));
    assert!(config.general.trace_pipeline);
    assert_eq!(config.general.max_cycles, 5000);
    assert_eq!(config.pipeline.backend, BackendType::OutOfOrder);
    assert_eq!(config.pipeline.branch_predictor, PredictorKind::Static);
    assert_eq!(config.pipeline.btb_size, 32);
    assert_eq!(config.pipeline.pt_size, 64);
    assert_eq!(config.pipeline.counter_init, 4);
    assert_eq!(config.pipeline.rob_size, 16);
    assert_eq!(config.pipeline.rs_size, 8);
    assert_eq!(config.memory.size, 1024);
}

#[rstest]
#[case::btb_not_power_of_two(r#"{ "pipeline": { "btb_size": 12 } }"#, "pipeline.btb_size")]
#[case::pt_zero(r#"{ "pipeline": { "pt_size": 0 } }"#, "pipeline.pt_size")]
#[case::rob_too_small(r#"{ "pipeline": { "rob_size": 1 } }"#, "pipeline.rob_size")]
#[case::rs_too_small(r#"{ "pipeline": { "rs_size": 0 } }"#, "pipeline.rs_size")]
#[case::counter_too_large(r#"{ "pipeline": { "counter_init": 8 } }"#, "pipeline.counter_init")]
#[case::no_memory(r#"{ "memory": { "size": 0 } }"#, "memory.size")]
#[case::no_cycles(r#"{ "general": { "max_cycles": 0 } }"#, "general.max_cycles")]
fn invalid_values_are_rejected(#[case] json: &str, #[case] expected: &str) {
    match Config::from_json(json) {
        Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, expected),
        other => panic!("expected an invalid-field error, got {other:?}"),
    }
}

#[rstest]
#[case::unknown_backend(r#"{ "pipeline": { "backend": "Superscalar" } }"#)]
#[case::wrong_type(r#"{ "memory": { "size": "big" } }"#)]
#[case::not_json("backend = in-order")]
fn malformed_documents_are_json_errors(#[case] json: &str) {
    assert!(matches!(Config::from_json(json), Err(ConfigError::Json(_))));
}

#[test]
fn default_config_validates() {
    assert!(Config::default().validate().is_ok());
}
