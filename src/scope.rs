use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use crate::core::term::NormalizedTerm;
use crate::distance::words::unmatched;
use crate::nlp::Linguist;

/// Candidate meanings of each scope, inferred from known bags.
///
/// A meaning is a list of words which, added to a scoped term, turn it into
/// an unscoped synonym: in a bag holding both `regular languages@ord` and
/// `regular language over countable ordinals`, scope `ord` means
/// `countable ordinals`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeMeanings {
    table: BTreeMap<String, Vec<Vec<String>>>,
}

impl ScopeMeanings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an explicit table, scopes without an entry keep the fallback
    pub fn from_table(table: BTreeMap<String, Vec<Vec<String>>>) -> Self {
        Self { table }
    }

    /// Infer the meanings of every scope occurring in `bags`.
    ///
    /// Each scope also gets its own text as a last meaning.
    pub fn infer<'a, I>(bags: I, linguist: &dyn Linguist) -> Self
    where
        I: IntoIterator<Item = &'a [String]>,
    {
        let mut table: BTreeMap<String, Vec<Vec<String>>> = BTreeMap::new();

        for bag in bags {
            let normalized: Vec<NormalizedTerm> =
                bag.iter().map(|t| NormalizedTerm::new(t, linguist)).collect();

            for term in normalized.iter().filter(|t| t.has_scope()) {
                let meanings = table.entry(term.scope.clone()).or_default();
                for meaning in meanings_in_bag(term, &normalized, linguist) {
                    push_unique(meanings, meaning);
                }
            }
        }

        for (scope, meanings) in table.iter_mut() {
            push_unique(meanings, vec![scope.clone()]);
        }

        tracing::debug!("🔭 Inferred meanings for {} scope(s)", table.len());
        Self { table }
    }

    /// Meanings of `scope` found in a single bag, without the fallback
    pub fn infer_in_bag(scope: &str, bag: &[String], linguist: &dyn Linguist) -> Vec<Vec<String>> {
        let normalized: Vec<NormalizedTerm> =
            bag.iter().map(|t| NormalizedTerm::new(t, linguist)).collect();

        let mut meanings = Vec::new();
        for term in normalized.iter().filter(|t| t.scope == scope && t.has_scope()) {
            for meaning in meanings_in_bag(term, &normalized, linguist) {
                push_unique(&mut meanings, meaning);
            }
        }
        meanings
    }

    pub fn insert(&mut self, scope: impl Into<String>, meanings: Vec<Vec<String>>) {
        self.table.insert(scope.into(), meanings);
    }

    /// Meanings of `scope`, or the scope text alone when it was never seen
    pub fn meanings_for(&self, scope: &str) -> Cow<'_, [Vec<String>]> {
        match self.table.get(scope) {
            Some(meanings) if !meanings.is_empty() => Cow::Borrowed(meanings.as_slice()),
            _ => Cow::Owned(vec![vec![scope.to_string()]]),
        }
    }

    pub fn scopes(&self) -> impl Iterator<Item = &str> {
        self.table.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl From<BTreeMap<String, Vec<Vec<String>>>> for ScopeMeanings {
    fn from(table: BTreeMap<String, Vec<Vec<String>>>) -> Self {
        Self::from_table(table)
    }
}

impl fmt::Display for ScopeMeanings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Defined scopes:")?;
        for (scope, meanings) in &self.table {
            let rendered: Vec<String> = meanings.iter().map(|m| format!("[{}]", m.join(", "))).collect();
            writeln!(f, "\t@{}: {}", scope, rendered.join(" "))?;
        }
        Ok(())
    }
}

/// Residuals of the unscoped siblings of `scoped` covering all its words
fn meanings_in_bag(
    scoped: &NormalizedTerm,
    bag: &[NormalizedTerm],
    linguist: &dyn Linguist,
) -> Vec<Vec<String>> {
    let no_prefix = [String::new()];
    bag.iter()
        .filter(|sibling| !sibling.has_scope())
        .filter_map(|sibling| {
            let (left, right) = unmatched(&scoped.words, &sibling.words, &no_prefix, linguist);
            left.is_empty()
                .then(|| right.into_iter().map(str::to_string).collect())
        })
        .collect()
}

/// Push `meaning` unless an equal word set is already listed
fn push_unique(meanings: &mut Vec<Vec<String>>, meaning: Vec<String>) {
    let same_set = |m: &Vec<String>| {
        m.len() == meaning.len() && m.iter().all(|w| meaning.contains(w))
    };
    if !meanings.iter().any(same_set) {
        meanings.push(meaning);
    }
}
