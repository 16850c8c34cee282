//! Sieve engine: host document model, extraction and the event-driven pipeline.
mod banner;
mod decode;
mod document;
mod extract;
mod markup;
mod pipeline;
mod registry;
mod timer;
mod visibility;

pub use banner::{banner_visible, hide_banner, show_banner, BANNER_ID};
pub use decode::{decode_page, DecodeError, DecodedPage};
pub use document::{Document, Mutation, StyleProperty};
pub use extract::{rendered_text, Extractor, FeedItemExtractor};
pub use markup::{FeedMarkup, LabelKeywords, MarkupContract, MarkupError};
pub use pipeline::{ItemReport, Pipeline, PipelineConfig, StorageArea};
pub use registry::ItemRegistry;
pub use timer::TimerQueue;
pub use visibility::{apply_visibility, is_hidden, HIDE_BUNDLE};

pub use ego_tree::NodeId;
