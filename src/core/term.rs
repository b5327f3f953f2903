use serde::{Deserialize, Serialize};

use crate::nlp::Linguist;

// ═══════════════════════════════════════════════════════════════════════════
// TeX markup
// ═══════════════════════════════════════════════════════════════════════════

const SCOPE_SEPARATOR: char = '@';
const ESCAPE: char = '\\';
const MATH_DELIMITER: char = '$';

/// Accents defined with non-alphabetic commands, and `\-` (hyphenation hint)
const ACCENT_ESCAPES: &[&str] = &["\\`", "\\'", "\\^", "\\\"", "\\~", "\\=", "\\.", "\\-"];

/// Non-breaking space and forced line break
const SPACE_MARKERS: &[&str] = &["~", "\\\\"];

const GROUPING_CHARS: &[char] = &['{', '}'];

/// A term reduced to its load-bearing words and its scope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedTerm {
    /// Distinct content words, in order of first occurrence
    pub words: Vec<String>,

    /// Normalized scope, empty when the term has none
    pub scope: String,
}

impl NormalizedTerm {
    /// Normalize a raw term such as `\emph{regular} languages@ord`
    pub fn new(term: &str, linguist: &dyn Linguist) -> Self {
        let (label, scope) = split_scope(term);
        let cleaned = normalize_text(label);

        let mut words: Vec<String> = Vec::new();
        for word in linguist.content_words(&cleaned) {
            if !words.contains(&word) {
                words.push(word);
            }
        }

        Self {
            words,
            scope: normalize_text(scope).trim().to_string(),
        }
    }

    /// Whether the term carries a scope
    pub fn has_scope(&self) -> bool {
        !self.scope.is_empty()
    }

    /// Whether no word survived normalization (pure markup)
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Split `label@scope` at the last `@` that is not escaped.
///
/// Returns the label and the (possibly empty) scope.
pub fn split_scope(term: &str) -> (&str, &str) {
    let mut chars = term.char_indices().rev().peekable();
    while let Some((idx, c)) = chars.next() {
        if c != SCOPE_SEPARATOR {
            continue;
        }
        let escaped = chars.peek().map_or(false, |&(_, prev)| prev == ESCAPE);
        if !escaped {
            return (&term[..idx], &term[idx + SCOPE_SEPARATOR.len_utf8()..]);
        }
    }
    (term, "")
}

/// Strip TeX markup from a label and fold it to lowercase ASCII.
///
/// Math spans, accent commands, command names and braces are removed;
/// non-breaking markers become spaces. Arguments of commands are kept.
pub fn normalize_text(text: &str) -> String {
    let mut out = text.to_lowercase();
    strip_math(&mut out);

    for escape in ACCENT_ESCAPES {
        remove_all(&mut out, escape);
    }
    for marker in SPACE_MARKERS {
        while let Some(idx) = out.find(marker) {
            out.replace_range(idx..idx + marker.len(), " ");
        }
    }
    strip_commands(&mut out);
    out.retain(|c| !GROUPING_CHARS.contains(&c));

    fold_to_ascii(&out)
}

/// Drop every `$…$` span, delimiters included; a lone `$` is kept
fn strip_math(text: &mut String) {
    while let Some(open) = text.find(MATH_DELIMITER) {
        let after = open + MATH_DELIMITER.len_utf8();
        match text[after..].find(MATH_DELIMITER) {
            Some(rel) => {
                let close = after + rel + MATH_DELIMITER.len_utf8();
                text.replace_range(open..close, "");
            }
            None => break,
        }
    }
}

fn remove_all(text: &mut String, pattern: &str) {
    while let Some(idx) = text.find(pattern) {
        text.replace_range(idx..idx + pattern.len(), "");
    }
}

/// Remove each backslash together with the letters of the command name
fn strip_commands(text: &mut String) {
    while let Some(idx) = text.find(ESCAPE) {
        let start = idx + ESCAPE.len_utf8();
        let name_len: usize = text[start..]
            .chars()
            .take_while(|c| c.is_alphabetic())
            .map(char::len_utf8)
            .sum();
        text.replace_range(idx..start + name_len, "");
    }
}

/// Transliterate to ASCII; characters without a transliteration are dropped
fn fold_to_ascii(text: &str) -> String {
    deunicode::deunicode_with_tofu(text, "")
}
