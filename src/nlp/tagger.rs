//! Lexicon-based part-of-speech tagger for English.
//!
//! Only the split between function words and content words affects
//! clustering. The finer open-class tags (adverb, verb, adjective, noun)
//! are informational: they show up in trace logs through [`PosTag::penn`].

use crate::nlp::tokenizer::is_punctuation;

// ═══════════════════════════════════════════════════════════════════════════
// Closed-class lexicon (English)
// ═══════════════════════════════════════════════════════════════════════════

const DETERMINERS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "every", "each", "some", "any", "no",
    "another", "either", "neither", "all", "both", "half",
];

const PREPOSITIONS: &[&str] = &[
    "of", "in", "on", "over", "under", "for", "with", "without", "within", "by", "from", "at",
    "into", "onto", "upon", "about", "above", "below", "between", "among", "through",
    "throughout", "against", "along", "across", "after", "before", "behind", "beyond", "during",
    "except", "inside", "outside", "near", "since", "until", "towards", "toward", "via", "per",
    "as", "than", "whereas", "although", "though", "because", "if", "unless", "whether", "while",
];

const CONJUNCTIONS: &[&str] = &["and", "or", "but", "nor", "yet", "plus"];

const PRONOUNS: &[&str] = &[
    "i", "me", "my", "mine", "myself", "you", "your", "yours", "yourself", "he", "him", "his",
    "himself", "she", "her", "hers", "herself", "it", "its", "itself", "we", "us", "our",
    "ours", "ourselves", "they", "them", "their", "theirs", "themselves", "one's",
];

const MODALS: &[&str] = &[
    "can", "could", "may", "might", "must", "shall", "should", "will", "would", "ought",
];

const WH_WORDS: &[&str] = &[
    "which", "what", "who", "whom", "whose", "where", "when", "why", "how", "whatever",
    "whichever", "whoever",
];

const NUMBER_WORDS: &[&str] = &[
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
    "hundred", "thousand", "million", "billion",
];

/// Words tagged as pre-determiners when they precede a determiner
const PREDETERMINERS: &[&str] = &["all", "both", "half"];

/// Words tagged as pre-determiners when they precede an indefinite article
const PREDETERMINERS_BEFORE_ARTICLE: &[&str] = &["such", "quite", "rather", "what"];

const ADVERB_SUFFIXES: &[&str] = &["ly", "wise", "ward", "wards"];
const VERB_SUFFIXES: &[&str] = &["ing", "ed", "ize", "ise", "ify"];
const ADJECTIVE_SUFFIXES: &[&str] = &[
    "able", "ible", "al", "ous", "ive", "ful", "less", "ic", "ary", "ant", "ent", "ular", "ian",
];

/// Part-of-speech tags, named after their Penn Treebank counterparts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PosTag {
    Noun,
    Adjective,
    Verb,
    Adverb,
    Cardinal,
    Predeterminer,
    Determiner,
    Preposition,
    Conjunction,
    Pronoun,
    Modal,
    To,
    Existential,
    WhWord,
    Possessive,
    Punctuation,
}

impl PosTag {
    /// Penn Treebank tag
    pub fn penn(&self) -> &'static str {
        match self {
            PosTag::Noun => "NN",
            PosTag::Adjective => "JJ",
            PosTag::Verb => "VB",
            PosTag::Adverb => "RB",
            PosTag::Cardinal => "CD",
            PosTag::Predeterminer => "PDT",
            PosTag::Determiner => "DT",
            PosTag::Preposition => "IN",
            PosTag::Conjunction => "CC",
            PosTag::Pronoun => "PRP",
            PosTag::Modal => "MD",
            PosTag::To => "TO",
            PosTag::Existential => "EX",
            PosTag::WhWord => "WDT",
            PosTag::Possessive => "POS",
            PosTag::Punctuation => ".",
        }
    }

    /// Whether words with this tag carry meaning (nouns, adjectives, verbs,
    /// adverbs, cardinals, pre-determiners)
    pub fn is_content(&self) -> bool {
        matches!(
            self,
            PosTag::Noun
                | PosTag::Adjective
                | PosTag::Verb
                | PosTag::Adverb
                | PosTag::Cardinal
                | PosTag::Predeterminer
        )
    }
}

/// Tag every token; tokens are expected lowercase
pub fn tag(tokens: &[String]) -> Vec<(String, PosTag)> {
    tokens
        .iter()
        .enumerate()
        .map(|(i, token)| {
            let next = tokens.get(i + 1).map(String::as_str);
            (token.clone(), classify(token, next))
        })
        .collect()
}

fn classify(token: &str, next: Option<&str>) -> PosTag {
    if is_punctuation(token) {
        return PosTag::Punctuation;
    }
    if token.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',')
        || NUMBER_WORDS.contains(&token)
    {
        return PosTag::Cardinal;
    }
    if token == "'s" || token == "'" {
        return PosTag::Possessive;
    }

    let next_is_determiner = next.map_or(false, |n| DETERMINERS.contains(&n));
    if PREDETERMINERS.contains(&token) && next_is_determiner {
        return PosTag::Predeterminer;
    }
    if PREDETERMINERS_BEFORE_ARTICLE.contains(&token) && matches!(next, Some("a") | Some("an"))
    {
        return PosTag::Predeterminer;
    }

    if token == "to" {
        return PosTag::To;
    }
    if token == "there" && next.map_or(false, |n| matches!(n, "is" | "are" | "exists" | "exist"))
    {
        return PosTag::Existential;
    }
    if DETERMINERS.contains(&token) {
        return PosTag::Determiner;
    }
    if PREPOSITIONS.contains(&token) {
        return PosTag::Preposition;
    }
    if CONJUNCTIONS.contains(&token) {
        return PosTag::Conjunction;
    }
    if PRONOUNS.contains(&token) {
        return PosTag::Pronoun;
    }
    if MODALS.contains(&token) {
        return PosTag::Modal;
    }
    if WH_WORDS.contains(&token) {
        return PosTag::WhWord;
    }

    guess_open_class(token)
}

/// Open-class words: guessed from their suffix, nouns by default
fn guess_open_class(token: &str) -> PosTag {
    let long_enough = |suffix: &str| token.len() > suffix.len() + 2 && token.ends_with(suffix);

    if ADVERB_SUFFIXES.iter().any(|s| long_enough(s)) {
        PosTag::Adverb
    } else if VERB_SUFFIXES.iter().any(|s| long_enough(s)) {
        PosTag::Verb
    } else if ADJECTIVE_SUFFIXES.iter().any(|s| long_enough(s)) {
        PosTag::Adjective
    } else {
        PosTag::Noun
    }
}
