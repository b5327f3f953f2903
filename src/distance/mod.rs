pub mod term;
pub mod words;

use rapidfuzz::distance::levenshtein;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use term::{term_distance, TermMetric};
pub use words::{is_subset, set_distance, similar_words};

/// Distance between two terms; only ever used to compare candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Distance {
    /// Number of unmatched words
    Finite(usize),
    /// Incomparable terms (incompatible scopes, unparseable term)
    Infinite,
}

impl Distance {
    pub const ZERO: Distance = Distance::Finite(0);

    /// Whether the distance allows a merge under threshold `alpha`
    pub fn within(&self, alpha: f64) -> bool {
        match self {
            Distance::Finite(d) => (*d as f64) <= alpha,
            Distance::Infinite => false,
        }
    }

    pub fn is_infinite(&self) -> bool {
        matches!(self, Distance::Infinite)
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Finite(d) => write!(f, "{}", d),
            Distance::Infinite => f.write_str("∞"),
        }
    }
}

/// Levenshtein distance over characters (insert, delete, substitute: cost 1)
pub fn edit_distance(s: &str, t: &str) -> usize {
    levenshtein::distance(s.chars(), t.chars())
}

/// First candidate minimising the edit distance to `term`
pub fn closest_by_edit<'a>(term: &str, candidates: &[&'a str]) -> Option<&'a str> {
    let mut best: Option<(&'a str, usize)> = None;
    for &candidate in candidates {
        let d = edit_distance(term, candidate);
        if best.map_or(true, |(_, min)| d < min) {
            best = Some((candidate, d));
        }
    }
    best.map(|(candidate, _)| candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_order() {
        assert!(Distance::Finite(0) < Distance::Finite(3));
        assert!(Distance::Finite(10_000) < Distance::Infinite);
        assert_eq!(
            [Distance::Infinite, Distance::Finite(2)].iter().min(),
            Some(&Distance::Finite(2))
        );
    }

    #[test]
    fn test_within_threshold() {
        assert!(Distance::ZERO.within(0.0));
        assert!(!Distance::Finite(1).within(0.0));
        assert!(Distance::Finite(1).within(1.5));
        assert!(!Distance::Infinite.within(f64::MAX));
    }

    #[test]
    fn test_edit_distance() {
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("", "abc"), 3);
        assert_eq!(edit_distance("büchi", "buchi"), 1);
    }

    #[test]
    fn test_closest_keeps_first_on_ties() {
        assert_eq!(closest_by_edit("words", &["word", "wordy"]), Some("word"));
        assert_eq!(closest_by_edit("words", &["wordy", "word"]), Some("wordy"));
        assert_eq!(closest_by_edit("words", &["sword", "word"]), Some("word"));
        assert_eq!(closest_by_edit("words", &[]), None);
    }
}
