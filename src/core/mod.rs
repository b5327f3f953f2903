pub mod bag;
pub mod report;
pub mod term;

pub use bag::{Bag, BagId, BagStore};
pub use report::{Assignment, AssignmentKind, ClusterReport};
pub use term::NormalizedTerm;
