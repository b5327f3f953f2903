use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{KnowledgeError, Result};

/// Position of a bag in a [`BagStore`]; stable for the lifetime of the store
pub type BagId = usize;

/// Ordered sequence of synonymous terms
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bag {
    terms: Vec<String>,
    /// Number of terms present at the last checkpoint
    known_len: usize,
    /// Index of the knowledge file defining the bag, `None` for new bags
    source: Option<usize>,
}

impl Bag {
    fn new(terms: Vec<String>, source: Option<usize>) -> Self {
        Self {
            terms,
            known_len: 0,
            source,
        }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Terms present at the last checkpoint
    pub fn known_terms(&self) -> &[String] {
        &self.terms[..self.known_len]
    }

    /// Terms added since the last checkpoint
    pub fn new_terms(&self) -> &[String] {
        &self.terms[self.known_len..]
    }

    pub fn source(&self) -> Option<usize> {
        self.source
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.iter().any(|t| t == term)
    }
}

/// Append-only collection of bags.
///
/// Bags are never removed nor reordered and terms are only appended, so a
/// [`BagId`] stays valid and everything added since the last
/// [`checkpoint`](BagStore::checkpoint) can be recovered by position.
#[derive(Debug, Clone, Default)]
pub struct BagStore {
    bags: Vec<Bag>,
    known_count: usize,
    index: HashMap<String, BagId>,
}

impl BagStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from known bags and checkpoint it
    pub fn from_bags<I, B, S>(bags: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut store = Self::new();
        for bag in bags {
            store.push_known(bag.into_iter().map(Into::into).collect(), None);
        }
        store.checkpoint();
        store
    }

    /// Add a bag read from a knowledge source.
    ///
    /// A term already defined elsewhere stays in the bag (the source is
    /// rendered back verbatim) but keeps pointing to its first bag.
    pub fn push_known(&mut self, terms: Vec<String>, source: Option<usize>) -> BagId {
        let id = self.bags.len();
        for term in &terms {
            if let Some(first) = self.index.get(term) {
                tracing::warn!(
                    "⚠️ Knowledge '{}' is defined twice (bags #{} and #{})",
                    term,
                    first,
                    id
                );
                continue;
            }
            self.index.insert(term.clone(), id);
        }
        self.bags.push(Bag::new(terms, source));
        id
    }

    /// Mark the current content as known
    pub fn checkpoint(&mut self) {
        self.known_count = self.bags.len();
        for bag in &mut self.bags {
            bag.known_len = bag.terms.len();
        }
    }

    /// Create a bag holding only `term`
    pub fn add_new_bag(&mut self, term: impl Into<String>) -> Result<BagId> {
        let term = term.into();
        if self.index.contains_key(&term) {
            return Err(KnowledgeError::DuplicateTerm(term));
        }
        let id = self.bags.len();
        self.index.insert(term.clone(), id);
        self.bags.push(Bag::new(vec![term], None));
        Ok(id)
    }

    /// Append `term` to the bag containing `anchor`
    pub fn define_synonym_of(&mut self, term: impl Into<String>, anchor: &str) -> Result<BagId> {
        let term = term.into();
        if self.index.contains_key(&term) {
            return Err(KnowledgeError::DuplicateTerm(term));
        }
        let id = match self.index.get(anchor) {
            Some(&id) => id,
            None => {
                return Err(KnowledgeError::UnknownAnchor {
                    term,
                    anchor: anchor.to_string(),
                })
            }
        };
        self.index.insert(term.clone(), id);
        self.bags[id].terms.push(term);
        Ok(id)
    }

    /// Bag containing `term`
    pub fn bag_of(&self, term: &str) -> Option<BagId> {
        self.index.get(term).copied()
    }

    pub fn contains(&self, term: &str) -> bool {
        self.index.contains_key(term)
    }

    pub fn get(&self, id: BagId) -> Option<&Bag> {
        self.bags.get(id)
    }

    pub fn bags(&self) -> &[Bag] {
        &self.bags
    }

    pub fn len(&self) -> usize {
        self.bags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bags.is_empty()
    }

    /// Number of bags present at the last checkpoint
    pub fn known_bag_count(&self) -> usize {
        self.known_count
    }

    /// Every term, bag after bag
    pub fn all_terms(&self) -> impl Iterator<Item = &str> {
        self.bags.iter().flat_map(|b| b.terms.iter().map(String::as_str))
    }

    pub fn term_count(&self) -> usize {
        self.bags.iter().map(Bag::len).sum()
    }

    /// Bags created since the last checkpoint
    pub fn new_bags(&self) -> &[Bag] {
        &self.bags[self.known_count..]
    }

    /// Terms of bag `id` added since the last checkpoint
    pub fn new_terms_in(&self, id: BagId) -> &[String] {
        self.bags.get(id).map(Bag::new_terms).unwrap_or(&[])
    }

    /// Bags that are new or gained terms since the last checkpoint
    pub fn changed_bags(&self) -> Vec<BagId> {
        self.bags
            .iter()
            .enumerate()
            .filter(|(_, bag)| !bag.new_terms().is_empty())
            .map(|(id, _)| id)
            .collect()
    }
}
