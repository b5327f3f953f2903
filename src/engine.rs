use crate::config::ClusterConfig;
use crate::core::{Assignment, BagStore, ClusterReport, NormalizedTerm};
use crate::distance::{closest_by_edit, Distance, TermMetric};
use crate::error::Result;
use crate::nlp::{Linguist, SnowballLinguist};
use crate::scope::ScopeMeanings;
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
use std::time::Instant;

/// Incremental clustering of unknown terms into bags of synonyms
pub struct ClusteringEngine {
    config: ClusterConfig,
    linguist: Arc<dyn Linguist>,
}

/// A term with its normalization, computed once per run
struct Entry {
    term: String,
    normalized: NormalizedTerm,
}

impl Entry {
    fn new(term: String, linguist: &dyn Linguist) -> Self {
        let normalized = NormalizedTerm::new(&term, linguist);
        Self { term, normalized }
    }
}

impl ClusteringEngine {
    /// Create an engine using the Snowball toolkit of the configured language
    pub fn new(config: ClusterConfig) -> Result<Self> {
        let linguist = Arc::new(SnowballLinguist::new(config.language));
        Self::with_linguist(config, linguist)
    }

    /// Create an engine with a custom linguistic toolkit
    pub fn with_linguist(config: ClusterConfig, linguist: Arc<dyn Linguist>) -> Result<Self> {
        config.validate()?;
        tracing::debug!(
            "✅ Clustering engine ready (lang={}, alpha={}, {} prefix(es))",
            config.language,
            config.alpha,
            config.prefixes.len()
        );
        Ok(Self { config, linguist })
    }

    pub fn config(&self) -> &ClusterConfig {
        &self.config
    }

    pub fn linguist(&self) -> &dyn Linguist {
        self.linguist.as_ref()
    }

    /// Scope meanings of the bags currently in `store`
    pub fn infer_scopes(&self, store: &BagStore) -> ScopeMeanings {
        ScopeMeanings::infer(store.bags().iter().map(|b| b.terms()), self.linguist.as_ref())
    }

    /// Distance between two raw terms under this engine's configuration
    pub fn distance(&self, t1: &str, t2: &str, meanings: &ScopeMeanings) -> Distance {
        TermMetric::new(&self.config.prefixes, meanings, self.linguist.as_ref()).distance(t1, t2)
    }

    /// Place every unknown term into a bag of `store`.
    ///
    /// Scope meanings are inferred from `store` before anything is added.
    pub fn cluster<I, S>(&self, store: &mut BagStore, unknown: I) -> Result<ClusterReport>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let meanings = self.infer_scopes(store);
        self.cluster_with_meanings(store, unknown, &meanings)
    }

    /// Same as [`cluster`](Self::cluster) with an explicit scope table
    pub fn cluster_with_meanings<I, S>(
        &self,
        store: &mut BagStore,
        unknown: I,
        meanings: &ScopeMeanings,
    ) -> Result<ClusterReport>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let start = Instant::now();
        let linguist = self.linguist.as_ref();
        let metric = TermMetric::new(&self.config.prefixes, meanings, linguist);
        let alpha = self.config.alpha;
        let bags_before = store.len();

        let mut report = ClusterReport::empty(alpha);

        let mut seen = HashSet::new();
        let mut pending: Vec<Entry> = Vec::new();
        for term in unknown {
            let term = term.into();
            if store.contains(&term) || !seen.insert(term.clone()) {
                tracing::warn!("⚠️ Skipping '{}': already known or listed twice", term);
                report.skipped.push(term);
                continue;
            }
            pending.push(Entry::new(term, linguist));
        }

        tracing::info!(
            "🧩 Clustering {} unknown term(s) against {} bag(s)",
            pending.len(),
            bags_before
        );

        // Terms that may still attract unknown terms during the current pass
        let mut newly: Vec<Entry> = store
            .all_terms()
            .map(|t| Entry::new(t.to_string(), linguist))
            .collect();
        // Terms already compared against every remaining unknown term
        let mut previously: Vec<Entry> = Vec::new();
        let mut changed = BTreeSet::new();

        while !pending.is_empty() {
            report.passes += 1;
            let pass = report.passes;

            if newly.is_empty() {
                let entry = pending.remove(0);
                let id = store.add_new_bag(entry.term.clone())?;
                tracing::debug!("🆕 '{}' opens bag #{}", entry.term, id);
                report.assignments.push(Assignment::new_bag(entry.term.clone(), id, pass));
                changed.insert(id);
                newly.push(entry);
            }

            let mut added = Vec::new();
            let mut remaining = Vec::new();

            for entry in std::mem::take(&mut pending) {
                let Some((distance, ties)) = nearest(&metric, &entry, &newly) else {
                    remaining.push(entry);
                    continue;
                };
                if !distance.within(alpha) {
                    remaining.push(entry);
                    continue;
                }

                let Some(anchor) = closest_by_edit(&entry.term, &ties) else {
                    remaining.push(entry);
                    continue;
                };
                match store.define_synonym_of(entry.term.clone(), anchor) {
                    Ok(id) => {
                        tracing::debug!(
                            "🔗 '{}' joins bag #{} via '{}' (d={})",
                            entry.term,
                            id,
                            anchor,
                            distance
                        );
                        report.assignments.push(Assignment::merged(
                            entry.term.clone(),
                            id,
                            anchor,
                            distance,
                            pass,
                        ));
                        changed.insert(id);
                        added.push(entry);
                    }
                    Err(e) => {
                        tracing::error!("❌ Could not merge '{}': {}", entry.term, e);
                        remaining.push(entry);
                    }
                }
            }

            pending = remaining;
            previously.append(&mut newly);
            newly = added;
        }

        report.new_bags = store.len() - bags_before;
        report.changed_bags = changed.into_iter().collect();
        report.latency_ms = start.elapsed().as_secs_f64() * 1000.0;
        report.finished_at = chrono::Utc::now();

        tracing::info!(
            "✅ {} in {} pass(es), {} term(s) compared ({:.2}ms)",
            report.summary(),
            report.passes,
            previously.len() + newly.len(),
            report.latency_ms
        );

        Ok(report)
    }
}

impl std::fmt::Debug for ClusteringEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClusteringEngine")
            .field("config", &self.config)
            .field("language", &self.linguist.language())
            .finish()
    }
}

/// Smallest finite distance from `entry` to `candidates`, and every
/// candidate reaching it (in candidate order)
fn nearest<'a>(
    metric: &TermMetric<'_>,
    entry: &Entry,
    candidates: &'a [Entry],
) -> Option<(Distance, Vec<&'a str>)> {
    let mut best = Distance::Infinite;
    let mut ties: Vec<&str> = Vec::new();

    for candidate in candidates {
        let d = metric.between(&entry.normalized, &candidate.normalized);
        if d.is_infinite() {
            continue;
        }
        if d < best {
            best = d;
            ties.clear();
            ties.push(&candidate.term);
        } else if d == best {
            ties.push(&candidate.term);
        }
    }

    (!ties.is_empty()).then_some((best, ties))
}
