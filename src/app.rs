use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::ClusterConfig;
use crate::core::ClusterReport;
use crate::document::{self, AnchorWarning, KnowledgeBase, TexDocument};
use crate::engine::ClusteringEngine;
use crate::error::Result;
use crate::scope::ScopeMeanings;

/// Inputs of a `cluster` run
#[derive(Debug, Clone)]
pub struct ClusterJob {
    /// Knowledge files; the last one receives new bags
    pub knowledge_files: Vec<PathBuf>,
    pub diagnose_file: PathBuf,
    pub config: ClusterConfig,
    /// Write new synonyms as live ` | term` lines instead of comments
    pub nocomment: bool,
}

impl ClusterJob {
    /// Fill in missing files from what lies under `dir`
    pub fn discover(
        dir: impl AsRef<Path>,
        knowledge_files: Vec<PathBuf>,
        diagnose_file: Option<PathBuf>,
        config: ClusterConfig,
    ) -> Result<Self> {
        let dir = dir.as_ref();
        let diagnose_file = match diagnose_file {
            Some(path) => path,
            None => document::get_unique_diagnose_file(dir)?,
        };
        let knowledge_files = if knowledge_files.is_empty() {
            document::get_knowledge_files(dir)?
        } else {
            knowledge_files
        };
        Ok(Self {
            knowledge_files,
            diagnose_file,
            config,
            nocomment: false,
        })
    }
}

/// What a `cluster` run did
#[derive(Debug, Clone, Serialize)]
pub struct ClusterOutcome {
    pub report: ClusterReport,
    /// Scope meanings inferred from the knowledge files before clustering
    pub scopes: ScopeMeanings,
    /// Files that gained knowledges, with the knowledges they gained
    pub changes: Vec<FileChange>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileChange {
    pub path: PathBuf,
    pub knowledges: Vec<String>,
}

impl ClusterOutcome {
    /// Console message listing the changed files, or their new knowledges
    /// when `print_knowledges` is set
    pub fn changes_message(&self, print_knowledges: bool) -> String {
        if self.changes.is_empty() {
            return "No file was changed.".to_string();
        }
        if !print_knowledges {
            let names: Vec<String> = self
                .changes
                .iter()
                .map(|c| c.path.display().to_string())
                .collect();
            return format!("The following files were changed: {}.", names.join(", "));
        }

        let mut msg = String::new();
        for change in &self.changes {
            msg.push_str(&format!("Added in file {}:\n", change.path.display()));
            for knowledge in &change.knowledges {
                msg.push_str(&format!("\t{}\n", knowledge));
            }
        }
        msg
    }
}

/// Cluster the undefined knowledges of the diagnose file into the knowledge
/// files, and write the files back
pub fn run_cluster(job: &ClusterJob) -> Result<ClusterOutcome> {
    let mut kb = KnowledgeBase::load(&job.knowledge_files)?;
    let engine = ClusteringEngine::new(job.config.clone())?;
    let scopes = engine.infer_scopes(kb.store());
    tracing::debug!("🔭 Scopes: {:?}", scopes.scopes().collect::<Vec<_>>());

    let unknown = document::read_diagnose(&job.diagnose_file)?;
    if unknown.is_empty() {
        tracing::info!("✅ No undefined knowledge in {}", job.diagnose_file.display());
        return Ok(ClusterOutcome {
            report: ClusterReport::empty(job.config.alpha),
            scopes,
            changes: Vec::new(),
        });
    }

    let report = engine.cluster_with_meanings(kb.store_mut(), unknown, &scopes)?;

    let changes = kb
        .changed_files()
        .into_iter()
        .map(|path| FileChange {
            path: path.to_path_buf(),
            knowledges: kb
                .new_knowledges_in_file(path)
                .into_iter()
                .map(str::to_string)
                .collect(),
        })
        .collect();

    let written = kb.write(job.nocomment)?;
    tracing::debug!("💾 {} file(s) written", written.len());

    Ok(ClusterOutcome {
        report,
        scopes,
        changes,
    })
}

/// Introductions of knowledges too far from an anchor point in a TeX file
pub fn run_anchor(tex_file: impl AsRef<Path>, space: usize) -> Result<Vec<AnchorWarning>> {
    let doc = TexDocument::load(tex_file)?;
    document::missing_anchors(&doc, space)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(changes: Vec<FileChange>) -> ClusterOutcome {
        ClusterOutcome {
            report: ClusterReport::empty(0.0),
            scopes: ScopeMeanings::new(),
            changes,
        }
    }

    #[test]
    fn test_no_change_message() {
        assert_eq!(outcome(Vec::new()).changes_message(false), "No file was changed.");
    }

    #[test]
    fn test_changes_message() {
        let out = outcome(vec![
            FileChange {
                path: PathBuf::from("a.kl"),
                knowledges: vec!["words".to_string()],
            },
            FileChange {
                path: PathBuf::from("b-default.kl"),
                knowledges: vec!["automaton".to_string(), "automatons".to_string()],
            },
        ]);
        assert_eq!(
            out.changes_message(false),
            "The following files were changed: a.kl, b-default.kl."
        );
        assert_eq!(
            out.changes_message(true),
            "Added in file a.kl:\n\twords\nAdded in file b-default.kl:\n\tautomaton\n\tautomatons\n"
        );
    }
}
