use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use serde_json::Value;
use sieve_core::{Mode, Settings};
use sieve_engine::Pipeline;
use sieve_logging::sieve_info;

use sieve_app::{
    load_document, logging, read_markup, run, AppConfig, DriverOptions, LogDestination,
    RunReport, SettingsStore,
};

/// Filters a saved social-media feed page the way the live sieve would.
#[derive(Debug, Parser)]
#[command(name = "feed_sieve", version, about)]
struct Args {
    /// Saved page snapshot to load as the host document.
    #[arg(long)]
    page: PathBuf,

    /// Location the page is treated as being loaded from.
    #[arg(long, default_value = "https://x.com/home")]
    url: String,

    /// Character encoding of the page and fragments, when known.
    #[arg(long)]
    charset: Option<String>,

    /// Settings store file (RON map). Edits are picked up while running.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Markup contract and timing overrides (RON).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Publish this mode to the settings store before starting.
    #[arg(long, value_parser = parse_mode)]
    mode: Option<Mode>,

    /// Fragment appended to the page body per scroll step. Repeatable.
    #[arg(long = "append")]
    fragments: Vec<PathBuf>,

    #[arg(long, default_value_t = 2_000)]
    scroll_interval_ms: u64,

    #[arg(long, default_value_t = 250)]
    poll_interval_ms: u64,

    #[arg(long, value_enum, default_value_t = LogDestination::Terminal)]
    log: LogDestination,

    #[arg(short, long)]
    verbose: bool,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,
}

/// Accepts current and legacy mode names, as the settings store does.
fn parse_mode(raw: &str) -> Result<Mode, String> {
    serde_json::from_value(Value::String(raw.to_string())).map_err(|err| err.to_string())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::initialize(args.log, args.verbose);

    let config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    let markup = config.feed_markup()?;

    let mut store = args
        .settings
        .as_ref()
        .map(SettingsStore::open)
        .transpose()?;
    if let Some(mode) = args.mode {
        match store.as_mut() {
            Some(store) => store
                .publish_mode(mode)
                .with_context(|| format!("publishing mode to {:?}", store.path()))?,
            None => anyhow::bail!("--mode needs a --settings store to publish to"),
        }
    }
    let settings = store
        .as_ref()
        .map(SettingsStore::snapshot)
        .unwrap_or_else(|| Arc::new(Settings::default()));

    let document = load_document(&args.page, args.charset.as_deref(), &args.url)?;
    let fragments = args
        .fragments
        .iter()
        .map(|path| read_markup(path, args.charset.as_deref()))
        .collect::<Result<Vec<_>, _>>()?;

    let options = DriverOptions {
        fragments,
        scroll_interval: Duration::from_millis(args.scroll_interval_ms),
        poll_interval: Duration::from_millis(args.poll_interval_ms),
    };

    let mut pipeline = Pipeline::new(document, settings, markup, config.pipeline.clone());
    let elapsed = run(&mut pipeline, store.as_mut(), &options).await;
    sieve_info!("Finished after {} ms", elapsed.as_millis());

    let report = RunReport::collect(&pipeline);
    if args.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{report}");
    }
    Ok(())
}
