//! # Saca
//!
//! A frequency-weighted prefix tree for autocompletion and spelling
//! correction.
//!
//! ## Features
//!
//! - Pure Rust implementation
//! - Exact weight lookup for inserted words
//! - Top-N completion under a prefix, heaviest words first
//! - Time-bounded "Did you mean?" matching by edit distance
//! - Pluggable edit distance metrics
//! - Optional case folding

pub mod error;
pub mod spelling;
pub mod trie;
pub mod util;

// Re-exports for the public API
pub use error::{Result, SacaError};
pub use spelling::suggest::{Suggester, Suggestion};
pub use trie::{Iter, Trie, TrieConfig, TrieConfigBuilder};
pub use util::levenshtein::{DamerauLevenshtein, DistanceMetric, EditDistance, Levenshtein};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
