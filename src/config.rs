use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{KnowledgeError, Result};

const ENGLISH_INI: &str = include_str!("../data/english.ini");
const FRENCH_INI: &str = include_str!("../data/french.ini");

/// Key holding the list of ignorable prefixes in `.ini` configuration files
const PREFIXES_KEY: &str = "prefixes_similar";

/// Language of the TeX document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Language {
    #[default]
    #[serde(rename = "en", alias = "english")]
    #[cfg_attr(feature = "cli", value(name = "en", alias = "english"))]
    English,
    #[serde(rename = "fr", alias = "french")]
    #[cfg_attr(feature = "cli", value(name = "fr", alias = "french"))]
    French,
}

impl Language {
    /// Short identifier (`en`, `fr`)
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::French => "fr",
        }
    }

    /// Full lowercase name (`english`, `french`)
    pub fn name(&self) -> &'static str {
        match self {
            Language::English => "english",
            Language::French => "french",
        }
    }

    /// Bundled `.ini` configuration for this language
    fn bundled_config(&self) -> &'static str {
        match self {
            Language::English => ENGLISH_INI,
            Language::French => FRENCH_INI,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Language {
    type Err = KnowledgeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Language::English),
            "fr" | "french" => Ok(Language::French),
            other => Err(KnowledgeError::UnsupportedLanguage(other.to_string())),
        }
    }
}

/// Immutable configuration of a clustering run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterConfig {
    /// Maximal distance allowed for merging an unknown term into a bag
    pub alpha: f64,

    /// Selects tokenizer, stemmer and part-of-speech filtering
    pub language: Language,

    /// Prefixes ignored when comparing words; always starts with `""`
    pub prefixes: Vec<String>,
}

/// YAML configuration file; every key is optional
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    alpha: Option<f64>,
    #[serde(default, alias = "language")]
    lang: Option<Language>,
    #[serde(default, alias = "PREFIXES_SIMILAR")]
    prefixes: Option<Vec<String>>,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

impl ClusterConfig {
    /// Default threshold: only provably equivalent terms are merged
    pub const DEFAULT_ALPHA: f64 = 0.0;

    /// Configuration with the bundled prefixes of `language`
    pub fn new(language: Language) -> Self {
        let prefixes = parse_ini_prefixes(language.bundled_config())
            .unwrap_or_else(|_| vec![String::new()]);
        Self {
            alpha: Self::DEFAULT_ALPHA,
            language,
            prefixes: normalize_prefixes(prefixes),
        }
    }

    /// Load a configuration file (`.yaml`/`.yml`, or legacy `.ini`).
    ///
    /// `language` overrides whatever the file declares.
    pub fn from_file(path: impl AsRef<Path>, language: Option<Language>) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| KnowledgeError::io(path, e))?;

        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        );

        let config = if is_yaml {
            let file: FileConfig = serde_yaml::from_str(&content)?;
            let language = language.or(file.lang).unwrap_or_default();
            let mut config = Self::new(language);
            if let Some(prefixes) = file.prefixes {
                config.prefixes = normalize_prefixes(prefixes);
            }
            if let Some(alpha) = file.alpha {
                config.alpha = alpha;
            }
            config
        } else {
            let prefixes = parse_ini_prefixes(&content)?;
            let mut config = Self::new(language.unwrap_or_default());
            config.prefixes = normalize_prefixes(prefixes);
            config
        };

        config.validate()?;
        tracing::debug!(
            "Loaded configuration from {}: {} prefixes, alpha={}",
            path.display(),
            config.prefixes.len(),
            config.alpha
        );
        Ok(config)
    }

    /// Replace the threshold
    pub fn with_alpha(mut self, alpha: f64) -> Result<Self> {
        self.alpha = alpha;
        self.validate()?;
        Ok(self)
    }

    /// Replace the prefix list (the empty prefix is added if missing)
    pub fn with_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prefixes = normalize_prefixes(prefixes.into_iter().map(Into::into).collect());
        self
    }

    /// Check the invariants of a configuration
    pub fn validate(&self) -> Result<()> {
        if !self.alpha.is_finite() || self.alpha < 0.0 {
            return Err(KnowledgeError::Config(format!(
                "alpha must be a finite non-negative number, got {}",
                self.alpha
            )));
        }
        if self.prefixes.first().map(String::as_str) != Some("") {
            return Err(KnowledgeError::Config(
                "the prefix list must start with the empty prefix".to_string(),
            ));
        }
        Ok(())
    }
}

/// Put the empty prefix first and drop repetitions
fn normalize_prefixes(prefixes: Vec<String>) -> Vec<String> {
    let mut out = vec![String::new()];
    for prefix in prefixes {
        if !out.contains(&prefix) {
            out.push(prefix);
        }
    }
    out
}

/// Read the `PREFIXES_SIMILAR` list of an `.ini` file.
///
/// The value spans the key line and every following indented line; each
/// line is one prefix, `#` starts a comment. Keys in `[DEFAULT]` win over
/// keys from other sections.
pub fn parse_ini_prefixes(content: &str) -> Result<Vec<String>> {
    let mut section = String::new();
    let mut current: Option<(bool, Vec<String>)> = None;
    let mut found_default: Option<Vec<String>> = None;
    let mut found_other: Option<Vec<String>> = None;

    let mut flush = |current: &mut Option<(bool, Vec<String>)>| {
        if let Some((in_default, lines)) = current.take() {
            if in_default {
                found_default.get_or_insert(lines);
            } else {
                found_other.get_or_insert(lines);
            }
        }
    };

    for line in content.lines() {
        let trimmed = line.trim();
        let indented = line.starts_with(char::is_whitespace);

        if indented && !trimmed.is_empty() {
            if let Some((_, lines)) = current.as_mut() {
                lines.push(strip_comment(trimmed));
            }
            continue;
        }

        flush(&mut current);

        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
            continue;
        }
        if trimmed.starts_with('[') && trimmed.ends_with(']') {
            section = trimmed[1..trimmed.len() - 1].trim().to_string();
            continue;
        }
        if let Some(idx) = trimmed.find(['=', ':']) {
            let key = trimmed[..idx].trim().to_lowercase();
            if key == PREFIXES_KEY {
                let first = strip_comment(trimmed[idx + 1..].trim());
                current = Some((section == "DEFAULT", vec![first]));
            }
        }
    }
    flush(&mut current);

    found_default.or(found_other).ok_or_else(|| {
        KnowledgeError::Config(format!("missing key `{}`", PREFIXES_KEY.to_uppercase()))
    })
}

fn strip_comment(line: &str) -> String {
    line.split('#').next().unwrap_or("").trim().to_string()
}
