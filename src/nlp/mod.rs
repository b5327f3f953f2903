pub mod snowball;
pub mod tagger;
pub mod tokenizer;

use std::borrow::Cow;

use crate::config::Language;

pub use snowball::SnowballLinguist;
pub use tagger::PosTag;

/// Trait for the linguistic toolkit consumed by the distance computations
pub trait Linguist: Send + Sync {
    /// Language this toolkit was built for
    fn language(&self) -> Language;

    /// Split text into tokens
    fn tokenize(&self, text: &str) -> Vec<String>;

    /// Tokens carrying meaning (function words dropped where a tagger exists)
    fn content_words(&self, text: &str) -> Vec<String>;

    /// Morphological reduction of a single word
    fn stem<'a>(&self, word: &'a str) -> Cow<'a, str>;
}
