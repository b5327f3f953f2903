use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::bag::BagId;
use crate::distance::Distance;

/// How an unknown term was placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentKind {
    /// Appended to the bag of a near term
    Merged,
    /// Seeded a bag of its own
    NewBag,
}

/// Placement of one unknown term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// The unknown term
    pub term: String,

    /// Bag receiving the term
    pub bag: BagId,

    pub kind: AssignmentKind,

    /// Term of the bag the unknown term was matched against
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,

    /// Distance to the anchor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<Distance>,

    /// Outer iteration (1-based) in which the term was placed
    pub pass: usize,
}

impl Assignment {
    pub fn merged(term: impl Into<String>, bag: BagId, anchor: impl Into<String>, distance: Distance, pass: usize) -> Self {
        Self {
            term: term.into(),
            bag,
            kind: AssignmentKind::Merged,
            anchor: Some(anchor.into()),
            distance: Some(distance),
            pass,
        }
    }

    pub fn new_bag(term: impl Into<String>, bag: BagId, pass: usize) -> Self {
        Self {
            term: term.into(),
            bag,
            kind: AssignmentKind::NewBag,
            anchor: None,
            distance: None,
            pass,
        }
    }
}

/// Outcome of a clustering run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterReport {
    /// Placements, in the order they were decided
    pub assignments: Vec<Assignment>,

    /// Number of bags created by the run
    pub new_bags: usize,

    /// Bags that are new or gained terms
    pub changed_bags: Vec<BagId>,

    /// Unknown terms ignored (already known, or repeated)
    #[serde(default)]
    pub skipped: Vec<String>,

    /// Number of outer iterations
    pub passes: usize,

    /// Merge threshold used
    pub alpha: f64,

    /// Run duration in milliseconds
    pub latency_ms: f64,

    pub finished_at: DateTime<Utc>,
}

impl ClusterReport {
    /// Report of a run that placed nothing
    pub fn empty(alpha: f64) -> Self {
        Self {
            assignments: Vec::new(),
            new_bags: 0,
            changed_bags: Vec::new(),
            skipped: Vec::new(),
            passes: 0,
            alpha,
            latency_ms: 0.0,
            finished_at: Utc::now(),
        }
    }

    /// Assignments that joined an existing bag
    pub fn merged(&self) -> impl Iterator<Item = &Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.kind == AssignmentKind::Merged)
    }

    /// Assignment of `term`, if it was placed by this run
    pub fn assignment_of(&self, term: &str) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.term == term)
    }

    /// One-line summary for the console
    pub fn summary(&self) -> String {
        format!("Found a solution by adding {} new bag(s).", self.new_bags)
    }
}
