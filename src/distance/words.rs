use crate::nlp::Linguist;

/// Suffixes ignored when comparing two words
pub const IGNORED_SUFFIXES: &[&str] = &["", "s"];

/// Whether two words are the same up to stemming, one of `prefixes`
/// (the empty prefix is always tried) and one of [`IGNORED_SUFFIXES`].
pub fn similar_words(w1: &str, w2: &str, prefixes: &[String], linguist: &dyn Linguist) -> bool {
    if w1 == w2 {
        return true;
    }
    let stem1 = linguist.stem(w1);
    let stem2 = linguist.stem(w2);

    for s1 in [w1, stem1.as_ref()] {
        for s2 in [w2, stem2.as_ref()] {
            let all_prefixes = std::iter::once("").chain(prefixes.iter().map(String::as_str));
            for prefix in all_prefixes {
                for suffix in IGNORED_SUFFIXES {
                    if is_affixed(s1, s2, prefix, suffix) || is_affixed(s2, s1, prefix, suffix) {
                        return true;
                    }
                }
            }
        }
    }
    false
}

/// `candidate == prefix + base + suffix`, without allocating
#[inline]
fn is_affixed(base: &str, candidate: &str, prefix: &str, suffix: &str) -> bool {
    candidate.len() == prefix.len() + base.len() + suffix.len()
        && candidate.starts_with(prefix)
        && candidate.ends_with(suffix)
        && &candidate[prefix.len()..candidate.len() - suffix.len()] == base
}

/// Words of each side left unmatched by the greedy pairing.
///
/// Repeatedly takes the first word of `words1` having a similar word in
/// `words2`, and removes it together with the first such word. This is a
/// first-match heuristic, not an optimal matching: the scan order decides
/// which partner a word with several candidates gets.
pub fn unmatched<'a, A, B>(
    words1: &'a [A],
    words2: &'a [B],
    prefixes: &[String],
    linguist: &dyn Linguist,
) -> (Vec<&'a str>, Vec<&'a str>)
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    let mut left: Vec<&str> = words1.iter().map(AsRef::as_ref).collect();
    let mut right: Vec<&str> = words2.iter().map(AsRef::as_ref).collect();

    loop {
        let pair = left.iter().enumerate().find_map(|(i, w1)| {
            right
                .iter()
                .position(|w2| similar_words(w1, w2, prefixes, linguist))
                .map(|j| (i, j))
        });
        match pair {
            Some((i, j)) => {
                left.remove(i);
                right.remove(j);
            }
            None => break,
        }
    }

    (left, right)
}

/// Number of words of either set left unmatched by the greedy pairing
pub fn set_distance<A, B>(
    words1: &[A],
    words2: &[B],
    prefixes: &[String],
    linguist: &dyn Linguist,
) -> usize
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    let (left, right) = unmatched(words1, words2, prefixes, linguist);
    left.len() + right.len()
}

/// Whether the greedy pairing matches every word of `words1`
pub fn is_subset<A, B>(words1: &[A], words2: &[B], prefixes: &[String], linguist: &dyn Linguist) -> bool
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    unmatched(words1, words2, prefixes, linguist).0.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Language;
    use crate::nlp::SnowballLinguist;

    fn prefixes(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_similar_words() {
        let en = SnowballLinguist::new(Language::English);
        let none = prefixes(&[""]);
        assert!(similar_words("word", "word", &none, &en));
        assert!(similar_words("word", "words", &none, &en));
        assert!(similar_words("semigroups", "semigroup", &none, &en));
        assert!(!similar_words("word", "automaton", &none, &en));
    }

    #[test]
    fn test_similar_words_with_prefix() {
        let en = SnowballLinguist::new(Language::English);
        assert!(similar_words("foo", "turbofoo", &prefixes(&["", "turbo"]), &en));
        assert!(similar_words("turbofoo", "foo", &prefixes(&["", "turbo"]), &en));
        assert!(!similar_words("foo", "turbofoo", &prefixes(&[""]), &en));
        assert!(!similar_words("foo", "megafoo", &prefixes(&["", "turbo"]), &en));
    }

    #[test]
    fn test_set_distance() {
        let en = SnowballLinguist::new(Language::English);
        let none = prefixes(&[""]);
        assert_eq!(set_distance(&["ordinal", "semigroup"], &["semigroups", "ordinal"], &none, &en), 0);
        assert_eq!(set_distance(&["word"], &["countable", "ordinal", "word"], &none, &en), 2);
        assert_eq!(set_distance::<&str, &str>(&[], &["word"], &none, &en), 1);
    }

    #[test]
    fn test_greedy_first_match() {
        let en = SnowballLinguist::new(Language::English);
        let none = prefixes(&[""]);
        // "word" pairs with the first similar word, leaving the plural behind
        let (left, right) = unmatched(&["word", "words"], &["word", "letter"], &none, &en);
        assert_eq!(left, vec!["words"]);
        assert_eq!(right, vec!["letter"]);
    }

    #[test]
    fn test_is_subset() {
        let en = SnowballLinguist::new(Language::English);
        let none = prefixes(&[""]);
        assert!(is_subset(
            &["regular", "languages"],
            &["regular", "language", "countable", "ordinals"],
            &none,
            &en
        ));
        assert!(!is_subset(&["regular", "automaton"], &["regular", "language"], &none, &en));
        assert!(is_subset::<&str, &str>(&[], &["anything"], &none, &en));
    }
}
