use std::path::PathBuf;
use std::time::Duration;

use pretty_assertions::assert_eq;
use sieve_app::{load_document, read_markup, run, AppConfig, DriverOptions, RunReport, SettingsStore};
use sieve_engine::Pipeline;

fn demo(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../demos")
        .join(name)
}

#[test]
fn demo_config_matches_the_defaults() {
    sieve_logging::initialize_for_tests();
    let config = AppConfig::load(&demo("sieve.ron")).unwrap();
    assert_eq!(config, AppConfig::default());
}

#[tokio::test(start_paused = true)]
async fn demo_feed_end_to_end() {
    sieve_logging::initialize_for_tests();
    let config = AppConfig::load(&demo("sieve.ron")).unwrap();
    let mut store = SettingsStore::open(demo("settings.ron")).unwrap();
    assert_eq!(store.snapshot().min_likes, 10);

    let document = load_document(&demo("home.html"), None, "https://x.com/home").unwrap();
    let options = DriverOptions {
        fragments: vec![read_markup(&demo("scroll-1.html"), None).unwrap()],
        scroll_interval: Duration::from_millis(1_000),
        ..DriverOptions::default()
    };
    let mut pipeline = Pipeline::new(
        document,
        store.snapshot(),
        config.feed_markup().unwrap(),
        config.pipeline.clone(),
    );

    run(&mut pipeline, Some(&mut store), &options).await;
    let report = RunReport::collect(&pipeline);

    assert_eq!(report.total, 4);
    let hidden: Vec<bool> = report.items.iter().map(|line| line.hidden).collect();
    assert_eq!(hidden, vec![false, false, false, true]);
    assert_eq!(report.items[1].views, 88_000);
    assert_eq!(report.items[1].likes, 2_304);
    assert_eq!(report.items[1].media, Some("image"));
    assert_eq!(report.items[1].primary_language, Some(true));
    assert_eq!(report.items[2].media, Some("video"));
    assert_eq!(report.items[2].views, 2_100_000);
    assert_eq!(report.items[3].verdict.as_deref(), Some("hide:BelowMinimum(Likes)"));
    assert!(!report.banner);
}
