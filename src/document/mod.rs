//! Files around the clustering core: knowledge files, LaTeX diagnose
//! files, anchor point linting.

pub mod anchor;
pub mod atomic;
pub mod autofinder;
pub mod diagnose;
pub mod knowledges;

pub use anchor::{missing_anchors, AnchorWarning, TexDocument};
pub use atomic::{hash_file, AtomicUpdate};
pub use autofinder::{get_knowledge_files, get_unique_diagnose_file};
pub use diagnose::{parse_diagnose, read_diagnose};
pub use knowledges::{Block, KnowledgeBase, KnowledgeFile, DISCARD_LINE};
