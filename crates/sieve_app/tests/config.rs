use std::fs;

use pretty_assertions::assert_eq;
use sieve_app::{AppConfig, ConfigError};
use sieve_engine::{MarkupContract, PipelineConfig};

fn init_logging() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(sieve_logging::initialize_for_tests);
}

#[test]
fn missing_file_yields_defaults() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();

    let config = AppConfig::load(&dir.path().join("absent.ron")).unwrap();

    assert_eq!(config, AppConfig::default());
    assert_eq!(config.pipeline.extraction_delay_ms, 300);
}

#[test]
fn partial_file_overrides_only_named_fields() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sieve.ron");
    fs::write(
        &path,
        r#"(
            markup: (
                feed_item: "div.post",
                like_keywords: ["like", "gefällt"],
            ),
            pipeline: (notification_debounce_ms: 250),
        )"#,
    )
    .unwrap();

    let config = AppConfig::load(&path).unwrap();

    assert_eq!(config.markup.feed_item, "div.post");
    assert_eq!(config.markup.like_keywords, vec!["like", "gefällt"]);
    assert_eq!(config.markup.text, MarkupContract::default().text);
    assert_eq!(
        config.pipeline,
        PipelineConfig {
            notification_debounce_ms: 250,
            ..PipelineConfig::default()
        }
    );
    assert!(config.feed_markup().is_ok());
}

#[test]
fn malformed_file_is_a_parse_error() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.ron");
    fs::write(&path, "(markup: ").unwrap();

    let err = AppConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn invalid_selector_is_reported() {
    init_logging();
    let config = AppConfig::parse(r#"(markup: (photo: "[[["))"#).unwrap();

    let err = config.feed_markup().unwrap_err();
    assert!(matches!(err, ConfigError::Markup(_)));
}
