//! Treebank-like word tokenizer.
//!
//! Splits on whitespace, detaches punctuation as standalone tokens, keeps
//! hyphens inside words (`-buchi`, `omega-regular`) and splits clitics off
//! (`automaton's` → `automaton`, `'s`).

/// Tokenize `text` into words and punctuation tokens
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for chunk in text.split_whitespace() {
        split_chunk(chunk, &mut tokens);
    }
    tokens
}

/// Whether a token carries no letter nor digit
pub fn is_punctuation(token: &str) -> bool {
    !token.chars().any(char::is_alphanumeric)
}

#[inline]
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

fn split_chunk(chunk: &str, out: &mut Vec<String>) {
    let chars: Vec<char> = chunk.chars().collect();
    let mut word = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if is_word_char(c) {
            word.push(c);
            continue;
        }

        let starts_clitic = c == '\''
            && !word.is_empty()
            && chars.get(i + 1).map_or(false, |n| n.is_alphabetic());

        if !word.is_empty() {
            out.push(std::mem::take(&mut word));
        }
        if starts_clitic {
            word.push(c);
        } else {
            out.push(c.to_string());
        }
    }

    if !word.is_empty() {
        out.push(word);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_words() {
        assert_eq!(tokenize("ordinal  semigroup"), vec!["ordinal", "semigroup"]);
    }

    #[test]
    fn test_punctuation_is_detached() {
        assert_eq!(
            tokenize("(regular) language, again."),
            vec!["(", "regular", ")", "language", ",", "again", "."]
        );
    }

    #[test]
    fn test_hyphen_stays_in_word() {
        assert_eq!(tokenize("-buchi omega-regular"), vec!["-buchi", "omega-regular"]);
    }

    #[test]
    fn test_clitic() {
        assert_eq!(tokenize("automaton's run"), vec!["automaton", "'s", "run"]);
        assert_eq!(tokenize("'quoted'"), vec!["'", "quoted", "'"]);
    }

    #[test]
    fn test_is_punctuation() {
        assert!(is_punctuation("-"));
        assert!(is_punctuation(","));
        assert!(!is_punctuation("-buchi"));
    }
}
