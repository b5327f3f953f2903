use rust_stemmers::{Algorithm, Stemmer};
use std::borrow::Cow;
use std::fmt;

use crate::config::Language;
use crate::nlp::tagger;
use crate::nlp::tokenizer;
use crate::nlp::Linguist;

/// Snowball stemming + treebank-like tokenizer + lexicon POS filter
pub struct SnowballLinguist {
    language: Language,
    stemmer: Stemmer,
}

impl SnowballLinguist {
    pub fn new(language: Language) -> Self {
        let algorithm = match language {
            Language::English => Algorithm::English,
            Language::French => Algorithm::French,
        };
        Self {
            language,
            stemmer: Stemmer::create(algorithm),
        }
    }
}

impl Default for SnowballLinguist {
    fn default() -> Self {
        Self::new(Language::English)
    }
}

impl fmt::Debug for SnowballLinguist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnowballLinguist")
            .field("language", &self.language)
            .finish()
    }
}

impl Linguist for SnowballLinguist {
    fn language(&self) -> Language {
        self.language
    }

    fn tokenize(&self, text: &str) -> Vec<String> {
        tokenizer::tokenize(text)
    }

    fn content_words(&self, text: &str) -> Vec<String> {
        let tokens = self.tokenize(text);
        match self.language {
            Language::English => {
                let tagged = tagger::tag(&tokens);
                tracing::trace!(
                    "🏷️ {:?}",
                    tagged
                        .iter()
                        .map(|(word, pos)| format!("{}/{}", word, pos.penn()))
                        .collect::<Vec<_>>()
                );
                tagged
                    .into_iter()
                    .filter(|(_, pos)| pos.is_content())
                    .map(|(word, _)| word)
                    .collect()
            }
            // No tagger for other languages: every token counts
            Language::French => tokens,
        }
    }

    fn stem<'a>(&self, word: &'a str) -> Cow<'a, str> {
        self.stemmer.stem(word)
    }
}
