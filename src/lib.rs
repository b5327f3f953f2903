//! # Knowledge Clustering
//!
//! Automated notion clustering for the `knowledge` LaTeX package:
//! - Normalization of terms (TeX markup, accents, scopes, function words)
//! - Word matching up to stemming and ignorable prefixes
//! - Scope meanings inferred from the known synonyms
//! - Greedy incremental clustering of undefined knowledges into bags
//! - Knowledge/diagnose file handling and anchor point linting
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use knowledge_clustering::{BagStore, ClusterConfig, ClusteringEngine, Language};
//!
//! fn main() -> anyhow::Result<()> {
//!     let engine = ClusteringEngine::new(ClusterConfig::new(Language::English))?;
//!     let mut store = BagStore::from_bags(vec![vec!["word"], vec!["semigroup"]]);
//!
//!     let report = engine.cluster(&mut store, vec!["words", "automaton"])?;
//!
//!     println!("{}", report.summary());
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod config;
pub mod core;
pub mod distance;
pub mod document;
pub mod engine;
pub mod error;
pub mod nlp;
pub mod scope;

// Re-export primary types
pub use config::{ClusterConfig, Language};
pub use core::{Assignment, AssignmentKind, Bag, BagId, BagStore, ClusterReport, NormalizedTerm};
pub use distance::{term_distance, Distance, TermMetric};
pub use engine::ClusteringEngine;
pub use error::{KnowledgeError, Result};
pub use nlp::{Linguist, SnowballLinguist};
pub use scope::ScopeMeanings;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
