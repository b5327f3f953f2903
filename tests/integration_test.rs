use knowledge_clustering::app::{self, ClusterJob};
use knowledge_clustering::{AssignmentKind, ClusterConfig, KnowledgeError, Language};
use std::fs;
use std::path::Path;

const ORDINAL_KL: &str = concat!(
    "% Knowledges of the ordinal paper\n",
    "\\knowledge{notion}\n",
    " | word\n",
    "\n",
    "\\knowledge{notion}\n",
    " | word@ord\n",
    "\n",
    "\\knowledge{notion}\n",
    " | regular language over countable ordinals\n",
    " | regular languages@ord\n",
    "\n",
    "\\knowledge{notion}\n",
    " | separation\n",
    "\n",
    "\\knowledge{notion}\n",
    " | semigroup\n",
);

const ORDINAL_DIAGNOSE: &str = concat!(
    "************************\n",
    "* Undefined knowledges *\n",
    "************************\n",
    "\n",
    "| words\n",
    "| countable ordinal word\n",
    "| inseparability\n",
    "| semigroups\n",
    "| automaton\n",
    "| words\n",
    "\n",
    "************************\n",
);

const ORDINAL_SOLUTION: &str = concat!(
    "% Knowledges of the ordinal paper\n",
    "\\knowledge{notion}\n",
    " | word\n",
    "%  | words\n",
    "\n",
    "\\knowledge{notion}\n",
    " | word@ord\n",
    "%  | countable ordinal word\n",
    "\n",
    "\\knowledge{notion}\n",
    " | regular language over countable ordinals\n",
    " | regular languages@ord\n",
    "\n",
    "\\knowledge{notion}\n",
    " | separation\n",
    "%  | inseparability\n",
    "\n",
    "\\knowledge{notion}\n",
    " | semigroup\n",
    "%  | semigroups\n",
    "%%%%% NEW KNOWLEDGES \n",
    "%\n",
    "%\\knowledge{notion}\n",
    "%  | automaton\n",
);

fn write_project(dir: &Path) {
    fs::write(dir.join("ordinal.kl"), ORDINAL_KL).unwrap();
    fs::write(dir.join("ordinal.diagnose"), ORDINAL_DIAGNOSE).unwrap();
}

fn job(dir: &Path) -> ClusterJob {
    ClusterJob::discover(dir, Vec::new(), None, ClusterConfig::new(Language::English)).unwrap()
}

#[test]
fn test_cluster_workflow() {
    let dir = tempfile::tempdir().unwrap();
    write_project(dir.path());

    let outcome = app::run_cluster(&job(dir.path())).unwrap();

    assert_eq!(outcome.report.new_bags, 1);
    assert_eq!(outcome.report.summary(), "Found a solution by adding 1 new bag(s).");
    assert_eq!(
        fs::read_to_string(dir.path().join("ordinal.kl")).unwrap(),
        ORDINAL_SOLUTION
    );
    // the diagnose file is left untouched
    assert_eq!(
        fs::read_to_string(dir.path().join("ordinal.diagnose")).unwrap(),
        ORDINAL_DIAGNOSE
    );

    assert_eq!(outcome.changes.len(), 1);
    assert_eq!(
        outcome.changes[0].knowledges,
        vec![
            "words",
            "countable ordinal word",
            "inseparability",
            "semigroups",
            "automaton"
        ]
    );

    let automaton = outcome.report.assignment_of("automaton").unwrap();
    assert_eq!(automaton.kind, AssignmentKind::NewBag);
    let scoped = outcome.report.assignment_of("countable ordinal word").unwrap();
    assert_eq!(scoped.anchor.as_deref(), Some("word@ord"));
}

#[test]
fn test_second_run_is_stable() {
    let dir = tempfile::tempdir().unwrap();
    write_project(dir.path());

    app::run_cluster(&job(dir.path())).unwrap();
    app::run_cluster(&job(dir.path())).unwrap();

    assert_eq!(
        fs::read_to_string(dir.path().join("ordinal.kl")).unwrap(),
        ORDINAL_SOLUTION
    );
}

#[test]
fn test_nocomment_defines_knowledges() {
    let dir = tempfile::tempdir().unwrap();
    write_project(dir.path());

    let mut first = job(dir.path());
    first.nocomment = true;
    app::run_cluster(&first).unwrap();

    let content = fs::read_to_string(dir.path().join("ordinal.kl")).unwrap();
    assert!(content.contains(" | word\n | words\n"));

    // every knowledge except the new bag is now defined
    let second = app::run_cluster(&job(dir.path())).unwrap();
    assert_eq!(second.report.skipped.len(), 4);
    assert_eq!(second.report.new_bags, 1);
}

#[test]
fn test_new_bags_go_to_default_file() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path();
    fs::create_dir_all(p.join("chapters")).unwrap();
    fs::write(p.join("chapters/words.kl"), "\\knowledge{notion}\n | word\n").unwrap();
    fs::write(p.join("main-default.kl"), "\\knowledge{notion}\n | semigroup\n").unwrap();
    fs::write(p.join("ordinal.diagnose"), ORDINAL_DIAGNOSE).unwrap();

    let job = job(p);
    assert!(job.knowledge_files[1].ends_with("main-default.kl"));
    let outcome = app::run_cluster(&job).unwrap();

    let words = fs::read_to_string(p.join("chapters/words.kl")).unwrap();
    assert_eq!(words, "\\knowledge{notion}\n | word\n%  | words\n");
    let default = fs::read_to_string(p.join("main-default.kl")).unwrap();
    assert!(default.contains("%%%%% NEW KNOWLEDGES \n"));
    assert!(default.contains("%  | automaton\n"));
    assert!(default.contains(" | semigroup\n%  | semigroups\n"));
    assert_eq!(outcome.changes.len(), 2);
}

#[test]
fn test_empty_diagnose_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("ordinal.kl"), ORDINAL_KL).unwrap();
    fs::write(dir.path().join("ordinal.diagnose"), "No undefined knowledge\n").unwrap();

    let outcome = app::run_cluster(&job(dir.path())).unwrap();
    assert!(outcome.changes.is_empty());
    assert_eq!(outcome.changes_message(false), "No file was changed.");
    assert_eq!(fs::read_to_string(dir.path().join("ordinal.kl")).unwrap(), ORDINAL_KL);
}

#[test]
fn test_missing_files_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    let err = ClusterJob::discover(dir.path(), Vec::new(), None, ClusterConfig::default()).unwrap_err();
    assert!(matches!(err, KnowledgeError::NoFile(_)));
}

#[test]
fn test_json_outcome() {
    let dir = tempfile::tempdir().unwrap();
    write_project(dir.path());

    let outcome = app::run_cluster(&job(dir.path())).unwrap();
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["report"]["new_bags"], 1);
    assert_eq!(json["report"]["assignments"][0]["term"], "words");
    assert_eq!(json["report"]["assignments"][0]["kind"], "merged");
}

#[test]
fn test_anchor_command() {
    let dir = tempfile::tempdir().unwrap();
    let tex = dir.path().join("ordinal.tex");
    fs::write(
        &tex,
        concat!(
            "\\AP \\intro{word} is a sequence of letters.\n",
            "\n",
            "Every \\intro{semigroup} is associative.\n",
        ),
    )
    .unwrap();

    assert!(app::run_anchor(&tex, 200).unwrap().is_empty());
    let warnings = app::run_anchor(&tex, 5).unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].to_string(), "Missing anchor point at line 3.");
}
