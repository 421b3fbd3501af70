//! Emoji corpus construction, persistence and shared initialization
//!
//! This module contains:
//! - Color features and the asset collection they summarize
//! - Directory loading with per-asset normalization
//! - The per-resolution precompute cache
//! - One-time initialization of corpus plus index

/// Emoji assets and the corpus owning them
pub mod assets;
/// Precomputed corpus persistence
pub mod cache;
/// Per-channel mean color features
pub mod feature;
/// Directory scanning and asset normalization
pub mod loader;
/// Initialization barrier and shared corpus handles
pub mod registry;

pub use assets::{Corpus, EmojiAsset};
pub use cache::PrecomputeCache;
pub use feature::ColorFeature;
pub use loader::CorpusLoader;
pub use registry::{CorpusConfig, CorpusHandle, CorpusRegistry, initialize_corpus};
