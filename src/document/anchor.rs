use serde::Serialize;
use std::fmt;
use std::path::Path;

use crate::error::{KnowledgeError, Result};

/// Strings introducing a knowledge
const INTRO_STRINGS: &[&str] = &["\\intro", "\"\""];

/// Anchor point commands
const AP_STRINGS: &[&str] = &["\\AP", "\\itemAP"];

/// Replacement of a blank line in the cleaned text
const PARAGRAPH: &str = "\\par ";

pub const DEFAULT_SPACE: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Last character was a regular one
    Normal,
    /// Blanks since the last regular character, no newline
    Blank,
    /// Exactly one newline since the last regular character
    Newline,
    /// At least two newlines since the last regular character
    Paragraph,
    /// Inside a comment
    Comment,
}

/// TeX source with comments removed and whitespace collapsed.
///
/// Runs of blanks become a single space and blank lines become `\par `.
/// Every byte of the cleaned text that starts an output chunk points back
/// to the source offset it comes from.
#[derive(Debug, Clone)]
pub struct TexDocument {
    source: String,
    cleaned: String,
    pointer: Vec<Option<usize>>,
}

impl TexDocument {
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let mut cleaned = String::with_capacity(source.len());
        let mut pointer: Vec<Option<usize>> = Vec::with_capacity(source.len());
        let mut state = State::Normal;

        for (position, c) in source.char_indices() {
            let (next, output, mapped) = transition(state, c);
            state = next;
            if mapped {
                if pointer.len() < cleaned.len() {
                    pointer.resize(cleaned.len(), None);
                }
                pointer.push(Some(position));
            }
            match output {
                Output::Nothing => {}
                Output::Char(c) => cleaned.push(c),
                Output::Str(s) => cleaned.push_str(s),
            }
        }

        Self {
            source,
            cleaned,
            pointer,
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| KnowledgeError::io(path, e))?;
        Ok(Self::new(source))
    }

    pub fn cleaned(&self) -> &str {
        &self.cleaned
    }

    /// Source offset of the cleaned text at `offset`
    pub fn source_offset(&self, offset: usize) -> Option<usize> {
        self.pointer.get(offset).copied().flatten()
    }

    /// 1-based line of a source offset
    pub fn line_of(&self, source_offset: usize) -> usize {
        let end = source_offset.min(self.source.len());
        self.source.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count() + 1
    }
}

enum Output {
    Nothing,
    Char(char),
    Str(&'static str),
}

/// Returns the next state, the output, and whether the input character is
/// the origin of the output
fn transition(state: State, c: char) -> (State, Output, bool) {
    match c {
        '%' => (State::Comment, Output::Nothing, false),
        '\n' => match state {
            State::Comment => (State::Normal, Output::Nothing, false),
            State::Normal => (State::Newline, Output::Char(' '), false),
            State::Blank => (State::Newline, Output::Nothing, false),
            State::Newline => (State::Paragraph, Output::Str(PARAGRAPH), true),
            State::Paragraph => (State::Paragraph, Output::Nothing, false),
        },
        ' ' | '\t' => match state {
            State::Normal => (State::Blank, Output::Char(' '), true),
            other => (other, Output::Nothing, false),
        },
        _ => match state {
            State::Comment => (State::Comment, Output::Nothing, false),
            _ => (State::Normal, Output::Char(c), true),
        },
    }
}

/// Introduction of a knowledge too far from any anchor point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnchorWarning {
    pub line: usize,
    /// Byte offset in the source
    pub offset: usize,
}

impl fmt::Display for AnchorWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Missing anchor point at line {}.", self.line)
    }
}

/// Introductions not preceded by an anchor point within `space` characters
/// of cleaned text. The window counts characters, offsets stay in bytes.
pub fn missing_anchors(doc: &TexDocument, space: usize) -> Result<Vec<AnchorWarning>> {
    let text = doc.cleaned();
    let mut warnings = Vec::new();

    for intro in INTRO_STRINGS {
        for (start, _) in text.match_indices(intro) {
            let begin = text[..start]
                .char_indices()
                .rev()
                .take(space)
                .last()
                .map_or(start, |(i, _)| i);
            let window = &text[begin..start];
            if AP_STRINGS.iter().any(|ap| window.contains(ap)) {
                continue;
            }

            let offset = doc.source_offset(start).ok_or_else(|| {
                KnowledgeError::Other(format!("No source position for cleaned offset {}", start))
            })?;
            warnings.push(AnchorWarning {
                line: doc.line_of(offset),
                offset,
            });
        }
    }

    tracing::debug!("⚓ {} introduction(s) without anchor point", warnings.len());
    Ok(warnings)
}
