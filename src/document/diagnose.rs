use std::path::Path;

use crate::error::{KnowledgeError, Result};

const UNDEFINED_HEADING: &str = "Undefined knowledges";
const BLOCK_SEPARATOR: &str = "************************";
const ITEM_MARKER: &str = "| ";

/// Position of the reader in a `.diagnose` file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Waiting for the undefined knowledges section
    Waiting,
    /// Heading seen, separator expected
    Heading,
    /// Inside the list of undefined knowledges
    InBlock,
}

impl State {
    /// Transition on one line, with the knowledge the line carries if any
    fn step(self, line: &str) -> (State, Option<&str>) {
        match self {
            State::Waiting if line.contains(UNDEFINED_HEADING) => (State::Heading, None),
            State::Heading if line.contains(BLOCK_SEPARATOR) => (State::InBlock, None),
            State::InBlock if line.contains(BLOCK_SEPARATOR) => (State::Waiting, None),
            State::InBlock => match line.split_once(ITEM_MARKER) {
                Some((_, knowledge)) => (State::InBlock, Some(knowledge)),
                None => (State::InBlock, None),
            },
            state => (state, None),
        }
    }
}

/// Undefined knowledges listed in a diagnose file, without repetition
pub fn parse_diagnose(content: &str) -> Vec<String> {
    let mut state = State::Waiting;
    let mut knowledges: Vec<String> = Vec::new();

    for line in content.lines() {
        let (next, knowledge) = state.step(line);
        state = next;
        if let Some(knowledge) = knowledge {
            if !knowledges.iter().any(|k| k == knowledge) {
                knowledges.push(knowledge.to_string());
            }
        }
    }
    knowledges
}

pub fn read_diagnose(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| KnowledgeError::io(path, e))?;
    let knowledges = parse_diagnose(&content);
    tracing::debug!(
        "📄 {} undefined knowledge(s) in {}",
        knowledges.len(),
        path.display()
    );
    Ok(knowledges)
}
