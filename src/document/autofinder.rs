use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{KnowledgeError, Result};

const DIAGNOSE_EXT: &str = "diagnose";
const KNOWLEDGE_EXT: &str = "kl";
const DEFAULT_SUFFIX: &str = "default.kl";

/// Files under `dir` (recursively) with extension `ext`, sorted by path
pub fn find_ext(dir: impl AsRef<Path>, ext: &str) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = entry?;
        if entry.file_type().is_file()
            && entry.path().extension().map_or(false, |e| e == ext)
        {
            found.push(entry.into_path());
        }
    }
    found.sort();
    Ok(found)
}

/// The only `.diagnose` file under `dir`
pub fn get_unique_diagnose_file(dir: impl AsRef<Path>) -> Result<PathBuf> {
    let mut files = find_ext(dir, DIAGNOSE_EXT)?;
    match files.len() {
        0 => Err(KnowledgeError::NoFile(
            "No .diagnose file present in the directory.".to_string(),
        )),
        1 => Ok(files.remove(0)),
        _ => Err(KnowledgeError::TooManyFiles(format!(
            "Multiple .diagnose files present in the directory: {} and {}.",
            files[0].display(),
            files[1].display()
        ))),
    }
}

/// Every `.kl` file under `dir`.
///
/// With several files, exactly one must end with `default.kl`; it is put
/// last so that it receives the new knowledges.
pub fn get_knowledge_files(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let mut files = find_ext(dir, KNOWLEDGE_EXT)?;
    if files.is_empty() {
        return Err(KnowledgeError::NoFile(
            "No .kl file present in the directory.".to_string(),
        ));
    }
    if files.len() == 1 {
        return Ok(files);
    }

    let defaults: Vec<usize> = files
        .iter()
        .enumerate()
        .filter(|(_, p)| p.to_string_lossy().ends_with(DEFAULT_SUFFIX))
        .map(|(i, _)| i)
        .collect();

    match defaults.as_slice() {
        [] => Err(KnowledgeError::NoFile(format!(
            "No file ending with `{}` present in the directory.",
            DEFAULT_SUFFIX
        ))),
        [index] => {
            let default = files.remove(*index);
            files.push(default);
            Ok(files)
        }
        [first, second, ..] => Err(KnowledgeError::TooManyFiles(format!(
            "Multiple files ending with `{}` present in the directory: {} and {}.",
            DEFAULT_SUFFIX,
            files[*first].display(),
            files[*second].display()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_unique_default_goes_last() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path();
        touch(&p.join("subdir1/coolproject.diagnose"));
        touch(&p.join("subdir2/abbreviations.kl"));
        touch(&p.join("subdir2/main-default.kl"));
        touch(&p.join("subdir3/omega-automata.kl"));

        assert_eq!(
            get_unique_diagnose_file(p).unwrap(),
            p.join("subdir1/coolproject.diagnose")
        );
        let kl = get_knowledge_files(p).unwrap();
        assert_eq!(kl.len(), 3);
        assert_eq!(kl[2], p.join("subdir2/main-default.kl"));
    }

    #[test]
    fn test_two_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path();
        touch(&p.join("subdir2/main-default.kl"));
        touch(&p.join("subdir3/secondary-default.kl"));
        assert!(matches!(
            get_knowledge_files(p),
            Err(KnowledgeError::TooManyFiles(_))
        ));
    }

    #[test]
    fn test_no_default() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path();
        touch(&p.join("subdir2/abbreviations.kl"));
        touch(&p.join("subdir3/omega-automata.kl"));
        assert!(matches!(get_knowledge_files(p), Err(KnowledgeError::NoFile(_))));

        fs::remove_file(p.join("subdir2/abbreviations.kl")).unwrap();
        assert_eq!(get_knowledge_files(p).unwrap().len(), 1);
    }

    #[test]
    fn test_diagnose_count() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path();
        assert!(matches!(get_unique_diagnose_file(p), Err(KnowledgeError::NoFile(_))));

        touch(&p.join("subdir1/coolproject.diagnose"));
        touch(&p.join("subdir2/another-file.diagnose"));
        assert!(matches!(
            get_unique_diagnose_file(p),
            Err(KnowledgeError::TooManyFiles(_))
        ));
    }
}
