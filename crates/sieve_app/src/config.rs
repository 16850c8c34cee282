use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sieve_engine::{FeedMarkup, MarkupContract, MarkupError, PipelineConfig};
use sieve_logging::{sieve_info, sieve_warn};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error(transparent)]
    Markup(#[from] MarkupError),
}

/// Binary configuration: the host markup contract plus pipeline timing.
///
/// ```ron
/// (
///     markup: (feed_item: "article[data-testid=\"tweet\"]"),
///     pipeline: (extraction_delay_ms: 300),
/// )
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub markup: MarkupContract,
    pub pipeline: PipelineConfig,
}

impl AppConfig {
    /// Reads a RON config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                sieve_warn!("No config at {:?}; using defaults", path);
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let config = Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        sieve_info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(content)
    }

    /// Compiles the markup contract, rejecting invalid selectors up front.
    pub fn feed_markup(&self) -> Result<FeedMarkup, ConfigError> {
        Ok(FeedMarkup::compile(&self.markup)?)
    }
}
