use std::path::{Path, PathBuf};

use crate::core::{BagId, BagStore};
use crate::document::atomic::{hash_bytes, AtomicUpdate};
use crate::error::{KnowledgeError, Result};

/// Header of the region holding suggested new knowledges
pub const DISCARD_LINE: &str = "%%%%% NEW KNOWLEDGES ";

const KNOWLEDGE_COMMAND: &str = "\\knowledge{";
const COMMENT: char = '%';
const BAR: char = '|';

/// Piece of a knowledge file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Lines copied through untouched
    Tex(Vec<String>),
    /// A `\knowledge{...}` line followed by its ` | term` lines
    Knowledge {
        lines: Vec<String>,
        command: String,
        /// Position of the bag among the bags of the file
        bag: usize,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Mode {
    #[default]
    Tex,
    Knowledge,
    Discard,
}

/// A parsed knowledge file
#[derive(Debug, Clone)]
pub struct KnowledgeFile {
    path: PathBuf,
    content: String,
    hash: String,
    blocks: Vec<Block>,
    bags: Vec<Vec<String>>,
}

impl KnowledgeFile {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| KnowledgeError::io(path, e))?;
        Ok(Self::parse(path, content))
    }

    /// Parse `content`, read from `path`
    pub fn parse(path: impl Into<PathBuf>, content: String) -> Self {
        let mut parser = Parser::default();
        for line in content.lines() {
            parser.feed(line);
        }
        let (blocks, bags) = parser.finish();

        Self {
            path: path.into(),
            hash: hash_bytes(content.as_bytes()),
            content,
            blocks,
            bags,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Terms of each `\knowledge` block, in file order
    pub fn bags(&self) -> &[Vec<String>] {
        &self.bags
    }

    /// Content as read from disk
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Line transducer building the blocks of a file
#[derive(Default)]
struct Parser {
    mode: Mode,
    blocks: Vec<Block>,
    bags: Vec<Vec<String>>,
    current: Vec<String>,
    command: String,
    terms: Vec<String>,
}

impl Parser {
    fn feed(&mut self, line: &str) {
        if self.mode == Mode::Discard && !line.starts_with(COMMENT) {
            self.mode = Mode::Tex;
        }

        if line == DISCARD_LINE {
            self.push_block();
            self.mode = Mode::Discard;
        } else if line.starts_with(KNOWLEDGE_COMMAND) {
            self.push_block();
            self.mode = Mode::Knowledge;
            self.command = line.to_string();
            self.current = vec![line.to_string()];
        } else {
            match self.mode {
                Mode::Knowledge => {
                    if let Some(term) = bar_term(line) {
                        self.current.push(line.to_string());
                        if !term.is_empty() {
                            self.terms.push(term.to_string());
                        }
                    } else if !is_commented_bar(line) {
                        self.push_block();
                        self.mode = Mode::Tex;
                        self.current = vec![line.to_string()];
                    }
                }
                Mode::Tex => self.current.push(line.to_string()),
                Mode::Discard => {}
            }
        }
    }

    fn push_block(&mut self) {
        match self.mode {
            Mode::Tex if !self.current.is_empty() => {
                self.blocks.push(Block::Tex(std::mem::take(&mut self.current)));
            }
            Mode::Knowledge => {
                self.blocks.push(Block::Knowledge {
                    lines: std::mem::take(&mut self.current),
                    command: std::mem::take(&mut self.command),
                    bag: self.bags.len(),
                });
                self.bags.push(std::mem::take(&mut self.terms));
            }
            _ => {}
        }
    }

    fn finish(mut self) -> (Vec<Block>, Vec<Vec<String>>) {
        self.push_block();
        (self.blocks, self.bags)
    }
}

/// Term of a ` | term` line
fn bar_term(line: &str) -> Option<&str> {
    line.trim().strip_prefix(BAR).map(str::trim)
}

/// `% | term`, a synonym commented out by the author
fn is_commented_bar(line: &str) -> bool {
    line.trim()
        .strip_prefix(COMMENT)
        .map_or(false, |rest| rest.trim_start().starts_with(BAR))
}

fn synonym_line(term: &str, nocomment: bool) -> String {
    if nocomment {
        format!(" | {}\n", term)
    } else {
        format!("%  | {}\n", term)
    }
}

/// Every knowledge file of a document, with their bags gathered in one store.
///
/// Bags created by clustering belong to the last file.
#[derive(Debug)]
pub struct KnowledgeBase {
    files: Vec<KnowledgeFile>,
    /// Store id of each bag, per file
    bag_ids: Vec<Vec<BagId>>,
    store: BagStore,
}

impl KnowledgeBase {
    /// Load knowledge files; the last one receives new bags
    pub fn load<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut files = Vec::new();
        let mut seen: Vec<PathBuf> = Vec::new();
        for path in paths {
            let path = path.as_ref().to_path_buf();
            if seen.contains(&path) {
                tracing::warn!(
                    "⚠️ Same knowledge file given twice ({}), second occurrence is ignored",
                    path.display()
                );
                continue;
            }
            files.push(KnowledgeFile::load(&path)?);
            seen.push(path);
        }
        Self::from_files(files)
    }

    pub fn from_files(files: Vec<KnowledgeFile>) -> Result<Self> {
        if files.is_empty() {
            return Err(KnowledgeError::NoFile("No knowledge file given.".to_string()));
        }

        let mut store = BagStore::new();
        let mut bag_ids = Vec::with_capacity(files.len());
        for (index, file) in files.iter().enumerate() {
            let ids: Vec<BagId> = file
                .bags()
                .iter()
                .map(|terms| store.push_known(terms.clone(), Some(index)))
                .collect();
            bag_ids.push(ids);
        }
        store.checkpoint();

        tracing::info!(
            "📚 Loaded {} bag(s), {} knowledge(s) from {} file(s)",
            store.len(),
            store.term_count(),
            files.len()
        );
        Ok(Self {
            files,
            bag_ids,
            store,
        })
    }

    pub fn files(&self) -> &[KnowledgeFile] {
        &self.files
    }

    pub fn store(&self) -> &BagStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut BagStore {
        &mut self.store
    }

    fn default_index(&self) -> usize {
        self.files.len() - 1
    }

    /// Whether file `index` gained synonyms or, for the default file, new bags
    pub fn was_changed(&self, index: usize) -> bool {
        !self.new_knowledges_in(index).is_empty()
    }

    /// Files gaining content
    pub fn changed_files(&self) -> Vec<&Path> {
        (0..self.files.len())
            .filter(|&i| self.was_changed(i))
            .map(|i| self.files[i].path())
            .collect()
    }

    /// Knowledges added to file `index`
    pub fn new_knowledges_in(&self, index: usize) -> Vec<&str> {
        let Some(ids) = self.bag_ids.get(index) else {
            return Vec::new();
        };
        let mut out: Vec<&str> = ids
            .iter()
            .flat_map(|&id| self.store.new_terms_in(id))
            .map(String::as_str)
            .collect();
        if index == self.default_index() {
            out.extend(
                self.store
                    .new_bags()
                    .iter()
                    .flat_map(|bag| bag.terms())
                    .map(String::as_str),
            );
        }
        out
    }

    /// Knowledges added to the file at `path`
    pub fn new_knowledges_in_file(&self, path: &Path) -> Vec<&str> {
        self.files
            .iter()
            .position(|f| f.path() == path)
            .map(|i| self.new_knowledges_in(i))
            .unwrap_or_default()
    }

    /// New content of file `index`
    pub fn render(&self, index: usize, nocomment: bool) -> String {
        let mut out = String::new();
        let Some(file) = self.files.get(index) else {
            return out;
        };

        for block in file.blocks() {
            match block {
                Block::Tex(lines) => {
                    for line in lines {
                        out.push_str(line);
                        out.push('\n');
                    }
                }
                Block::Knowledge { lines, bag, .. } => {
                    for line in lines {
                        out.push_str(line);
                        out.push('\n');
                    }
                    for term in self.store.new_terms_in(self.bag_ids[index][*bag]) {
                        out.push_str(&synonym_line(term, nocomment));
                    }
                }
            }
        }

        if index == self.default_index() && !self.store.new_bags().is_empty() {
            out.push_str(DISCARD_LINE);
            out.push('\n');
            for bag in self.store.new_bags().iter().filter(|b| !b.is_empty()) {
                out.push_str("%\n");
                out.push_str("%\\knowledge{notion}\n");
                for term in bag.terms() {
                    out.push_str(&synonym_line(term, nocomment));
                }
            }
        }
        out
    }

    /// Write back every file whose content changed; returns the written paths
    pub fn write(&self, nocomment: bool) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        for (index, file) in self.files.iter().enumerate() {
            let rendered = self.render(index, nocomment);
            if rendered == file.content() {
                continue;
            }
            let mut update = AtomicUpdate::new(file.path(), file.hash.clone())?;
            update.write_all(rendered.as_bytes())?;
            update.commit()?;
            written.push(file.path().to_path_buf());
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORDINAL_KL: &str = concat!(
        "% Knowledges of the ordinal paper\n",
        "\\knowledge{notion}\n",
        " | word\n",
        " | words\n",
        "% | letters\n",
        "\n",
        "\\knowledge{notion}\n",
        " | semigroup\n",
        "%%%%% NEW KNOWLEDGES \n",
        "%\n",
        "%\\knowledge{notion}\n",
        "%  | stale suggestion\n",
        "\\knowledge{url={https://example.org}}\n",
        " | automaton\n",
    );

    fn parsed() -> KnowledgeFile {
        KnowledgeFile::parse("ordinal.kl", ORDINAL_KL.to_string())
    }

    #[test]
    fn test_parse_blocks() {
        let file = parsed();
        assert_eq!(
            file.bags(),
            &[
                vec!["word".to_string(), "words".to_string()],
                vec!["semigroup".to_string()],
                vec!["automaton".to_string()],
            ]
        );
        assert_eq!(file.blocks().len(), 5);
        assert!(matches!(&file.blocks()[0], Block::Tex(lines) if lines.len() == 1));
        assert!(matches!(
            &file.blocks()[1],
            Block::Knowledge { bag: 0, lines, .. } if lines.len() == 3
        ));
        assert!(matches!(&file.blocks()[2], Block::Tex(lines) if lines == &vec![String::new()]));
        assert!(matches!(
            &file.blocks()[4],
            Block::Knowledge { command, .. } if command.starts_with("\\knowledge{url=")
        ));
    }

    #[test]
    fn test_unchanged_render_drops_discard_region() {
        let kb = KnowledgeBase::from_files(vec![parsed()]).unwrap();
        let rendered = kb.render(0, false);
        assert!(!rendered.contains("stale suggestion"));
        assert!(!rendered.contains(DISCARD_LINE));
        // commented synonyms are regenerated from the diagnose file
        assert!(!rendered.contains("letters"));
        assert!(!kb.was_changed(0));
    }

    #[test]
    fn test_render_new_synonyms_and_bags() {
        let mut kb = KnowledgeBase::from_files(vec![parsed()]).unwrap();
        kb.store_mut().define_synonym_of("semigroups", "semigroup").unwrap();
        kb.store_mut().add_new_bag("ordinal").unwrap();

        let rendered = kb.render(0, false);
        assert!(rendered.contains(" | semigroup\n%  | semigroups\n"));
        assert!(rendered.ends_with(
            "%%%%% NEW KNOWLEDGES \n%\n%\\knowledge{notion}\n%  | ordinal\n"
        ));
        assert_eq!(kb.new_knowledges_in(0), vec!["semigroups", "ordinal"]);

        let plain = kb.render(0, true);
        assert!(plain.contains(" | semigroup\n | semigroups\n"));
    }

    #[test]
    fn test_new_bags_go_to_last_file() {
        let first = KnowledgeFile::parse("a.kl", "\\knowledge{notion}\n | word\n".to_string());
        let last = KnowledgeFile::parse("b-default.kl", "\\knowledge{notion}\n | semigroup\n".to_string());
        let mut kb = KnowledgeBase::from_files(vec![first, last]).unwrap();
        kb.store_mut().define_synonym_of("words", "word").unwrap();
        kb.store_mut().add_new_bag("automaton").unwrap();

        assert_eq!(kb.new_knowledges_in(0), vec!["words"]);
        assert_eq!(kb.new_knowledges_in(1), vec!["automaton"]);
        assert!(!kb.render(0, false).contains(DISCARD_LINE));
        assert!(kb.render(1, false).contains(DISCARD_LINE));
        assert_eq!(kb.changed_files(), vec![Path::new("a.kl"), Path::new("b-default.kl")]);
        assert_eq!(kb.new_knowledges_in_file(Path::new("b-default.kl")), vec!["automaton"]);
        assert!(kb.new_knowledges_in_file(Path::new("missing.kl")).is_empty());
    }

    #[test]
    fn test_write_only_changed_files() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.kl");
        let b = dir.path().join("b.kl");
        std::fs::write(&a, "\\knowledge{notion}\n | word\n").unwrap();
        std::fs::write(&b, "\\knowledge{notion}\n | semigroup\n").unwrap();

        let mut kb = KnowledgeBase::load(&[&a, &b, &a]).unwrap();
        assert_eq!(kb.files().len(), 2);
        kb.store_mut().define_synonym_of("words", "word").unwrap();

        let written = kb.write(false).unwrap();
        assert_eq!(written, vec![a.clone()]);
        assert_eq!(
            std::fs::read_to_string(&a).unwrap(),
            "\\knowledge{notion}\n | word\n%  | words\n"
        );
    }

    #[test]
    fn test_no_file() {
        assert!(matches!(
            KnowledgeBase::from_files(Vec::new()),
            Err(KnowledgeError::NoFile(_))
        ));
    }
}
