use crate::core::term::NormalizedTerm;
use crate::distance::words::set_distance;
use crate::distance::Distance;
use crate::nlp::Linguist;
use crate::scope::ScopeMeanings;

/// Everything a pairwise term comparison depends on
#[derive(Clone, Copy)]
pub struct TermMetric<'a> {
    prefixes: &'a [String],
    meanings: &'a ScopeMeanings,
    linguist: &'a dyn Linguist,
}

impl<'a> TermMetric<'a> {
    pub fn new(prefixes: &'a [String], meanings: &'a ScopeMeanings, linguist: &'a dyn Linguist) -> Self {
        Self {
            prefixes,
            meanings,
            linguist,
        }
    }

    /// Distance between two raw terms
    pub fn distance(&self, t1: &str, t2: &str) -> Distance {
        let n1 = NormalizedTerm::new(t1, self.linguist);
        let n2 = NormalizedTerm::new(t2, self.linguist);
        self.between(&n1, &n2)
    }

    /// Distance between two already normalized terms
    pub fn between(&self, t1: &NormalizedTerm, t2: &NormalizedTerm) -> Distance {
        if t1.has_scope() && t2.has_scope() && t1.scope != t2.scope {
            return Distance::Infinite;
        }
        if t1.is_empty() || t2.is_empty() {
            return Distance::Infinite;
        }
        if t1.scope == t2.scope {
            return Distance::Finite(set_distance(&t1.words, &t2.words, self.prefixes, self.linguist));
        }

        // exactly one side is scoped
        let (scoped, plain) = if t1.has_scope() { (t1, t2) } else { (t2, t1) };

        self.meanings
            .meanings_for(&scoped.scope)
            .iter()
            .map(|meaning| {
                let mut augmented = scoped.words.clone();
                for word in meaning {
                    if !augmented.contains(word) {
                        augmented.push(word.clone());
                    }
                }
                Distance::Finite(set_distance(&augmented, &plain.words, self.prefixes, self.linguist))
            })
            .min()
            .unwrap_or(Distance::Infinite)
    }
}

impl std::fmt::Debug for TermMetric<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TermMetric")
            .field("prefixes", &self.prefixes)
            .field("scopes", &self.meanings.len())
            .field("language", &self.linguist.language())
            .finish()
    }
}

/// Distance between two raw terms
pub fn term_distance(
    t1: &str,
    t2: &str,
    prefixes: &[String],
    meanings: &ScopeMeanings,
    linguist: &dyn Linguist,
) -> Distance {
    TermMetric::new(prefixes, meanings, linguist).distance(t1, t2)
}
