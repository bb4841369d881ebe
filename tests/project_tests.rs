//! Project-level integration tests
//!
//! These exercise the full pipeline: sources are enumerated, every file is lexed and recognized, the results are
//! merged into a symbol table and published as a generation.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use epoch::ast::{FunctionReturn, VariableOrigin};
use epoch::{AnalysisConfig, DirectorySource, InMemorySources, Project, SourceIssue, SourceText, SymbolTable};

fn fixture_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/project")
}

fn names(symbols: &SymbolTable, path: &str, line: u32, column: u32) -> Vec<String> {
    symbols
        .available_variables(Path::new(path), line, column)
        .iter()
        .map(|v| v.name().to_string())
        .collect()
}

// ============================================================================
// End-to-end
// ============================================================================

#[test]
fn test_add_function_end_to_end() {
    let sources = InMemorySources::new().with("add.epoch", "add : integer x, integer y -> integer sum { sum = x + y }");
    let generation = Project::default().reparse(&sources).unwrap();

    let add = generation.symbols.function("add").expect("add registered");
    assert_eq!(add.overloads.len(), 1);
    let overload = &add.overloads[0];
    let params: Vec<(String, String)> = overload
        .parameters
        .iter()
        .map(|p| (p.ty.to_string(), p.name.text.clone()))
        .collect();
    assert_eq!(
        params,
        [("integer".to_string(), "x".to_string()), ("integer".to_string(), "y".to_string())]
    );
    let FunctionReturn::Variable(ret) = &overload.returns else {
        panic!("expected return variable, got {:?}", overload.returns);
    };
    assert_eq!((ret.ty.name.as_str(), ret.name()), ("integer", "sum"));

    let visible = generation.symbols.available_variables(Path::new("add.epoch"), 0, 50);
    let summary: Vec<(&str, VariableOrigin)> = visible.iter().map(|v| (v.name(), v.origin)).collect();
    assert_eq!(
        summary,
        [
            ("x", VariableOrigin::Parameter),
            ("y", VariableOrigin::Parameter),
            ("sum", VariableOrigin::Return)
        ]
    );
    assert!(generation.diagnostics.is_empty());
}

#[test]
fn test_fixture_directory() {
    let dir = fixture_dir();
    let sources = DirectorySource::new(&dir, "epoch");
    let generation = Project::default().reparse(&sources).unwrap();
    let symbols = &generation.symbols;

    assert!(generation.diagnostics.is_empty(), "{:?}", generation.diagnostics);
    assert_eq!(symbols.file_count(), 2);
    assert!(symbols.is_function("entry"));
    assert!(symbols.is_function("clamp"));
    assert_eq!(symbols.function("area").map(|f| f.overloads.len()), Some(2));
    assert!(symbols.is_structure("point"));
    assert!(symbols.is_type("shape") && symbols.is_type("meters") && symbols.is_type("count"));
    assert_eq!(symbols.structure_members("point").len(), 2);

    let main = dir.join("main.epoch");
    let main = main.to_string_lossy();
    // Inside the while loop of `entry`.
    assert_eq!(names(symbols, &main, 14, 8), ["frame_count", "width", "origin", "step"]);
    // After the loop, still inside `entry`.
    assert_eq!(names(symbols, &main, 16, 4), ["frame_count", "width", "origin"]);
    // Inside the `elseif` branch of `clamp`.
    assert_eq!(names(symbols, &main, 27, 8), ["frame_count", "value", "low", "high", "result"]);
    // On the signature line of `clamp` only globals are visible.
    assert_eq!(names(symbols, &main, 19, 0), ["frame_count"]);
}

// ============================================================================
// Registration policy
// ============================================================================

#[test]
fn test_overloads_accumulate_in_registration_order() {
    let sources = InMemorySources::new()
        .with("a.epoch", "f : integer a")
        .with("b.epoch", "f : integer a, integer b");
    let generation = Project::default().reparse(&sources).unwrap();
    let f = generation.symbols.function("f").unwrap();
    assert_eq!(f.overloads.len(), 2);
    assert_eq!(f.overloads[0].parameters.len(), 1);
    assert_eq!(f.overloads[1].parameters.len(), 2);
}

#[test]
fn test_duplicate_structure_keeps_first() {
    let sources = InMemorySources::new()
        .with("a.epoch", "structure Point : integer x, integer y")
        .with("b.epoch", "structure Point : real r");
    let generation = Project::default().reparse(&sources).unwrap();
    let members: Vec<String> = generation
        .symbols
        .structure_members("Point")
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(members, ["integer x", "integer y"]);
}

#[test]
fn test_lookup_misses_are_empty() {
    let generation = Project::default().reparse(&InMemorySources::new()).unwrap();
    assert!(generation.symbols.function("missing").is_none());
    assert!(!generation.symbols.is_type("missing"));
    assert!(generation.symbols.structure_members("missing").is_empty());
    assert!(names(&generation.symbols, "missing.epoch", 0, 0).is_empty());
}

// ============================================================================
// Failure handling
// ============================================================================

#[test]
fn test_error_isolation() {
    let sources = InMemorySources::new()
        .with("good.epoch", "ok : integer n -> integer r { r = n }")
        .with("bad.epoch", "broken : integer n {\n n = \n}");
    let generation = Project::default().reparse(&sources).unwrap();

    let errors: Vec<_> = generation.diagnostics.errors().collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].file.key(), "bad.epoch");
    assert!(generation.symbols.is_function("ok"));
    assert!(!generation.symbols.is_function("broken"));
    assert_eq!(names(&generation.symbols, "good.epoch", 0, 33), ["n", "r"]);
}

#[test]
fn test_non_utf8_file_does_not_block_the_project() {
    let dir = std::env::temp_dir().join(format!("epoch_project_utf8_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("good.epoch"), "ok : integer n").unwrap();
    std::fs::write(dir.join("bad.epoch"), b"f : nothing \xff\xfe").unwrap();

    let generation = Project::default().reparse(&DirectorySource::new(&dir, "epoch"));
    let _ = std::fs::remove_dir_all(&dir);
    let generation = generation.unwrap();

    assert!(generation.symbols.is_function("ok"));
    assert_eq!(generation.symbols.file_count(), 2);
    let warnings: Vec<_> = generation.diagnostics.warnings().collect();
    assert!(warnings.iter().any(|w| w.message.contains("not valid UTF-8")), "{warnings:?}");
}

#[test]
fn test_unreadable_file_reports_error_and_keeps_last_good() {
    let project = Project::default();
    let mut sources = InMemorySources::new().with("a.epoch", "f : nothing");
    project.reparse(&sources).unwrap();

    let unreadable = SourceText {
        issue: Some(SourceIssue::Unreadable("permission denied".to_string())),
        ..SourceText::new("a.epoch", "")
    };
    sources.insert_source(unreadable);
    let generation = project.reparse(&sources).unwrap();

    let errors: Vec<_> = generation.diagnostics.errors().collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("permission denied"));
    assert!(generation.symbols.is_function("f"));
}

#[test]
fn test_failed_file_keeps_last_good_contribution() {
    let project = Project::default();
    let mut sources = InMemorySources::new().with("a.epoch", "f : integer n\nstructure s : integer x");
    project.reparse(&sources).unwrap();

    sources.insert("a.epoch", "f : integer n\nstructure s : integer x,");
    let generation = project.reparse(&sources).unwrap();
    assert!(generation.diagnostics.has_errors());
    assert!(generation.symbols.is_function("f"));
    assert!(generation.symbols.is_structure("s"));
}

#[test]
fn test_failed_file_without_history_contributes_partial() {
    let project = Project::new(AnalysisConfig::new().with_retain_last_good(false));
    let mut sources = InMemorySources::new().with("a.epoch", "f : integer n\nstructure s : integer x");
    project.reparse(&sources).unwrap();

    sources.insert("a.epoch", "f : integer n\nstructure s : integer x,");
    let generation = project.reparse(&sources).unwrap();
    assert!(generation.symbols.is_function("f"));
    assert!(!generation.symbols.is_structure("s"));
}

#[test]
fn test_removed_file_is_forgotten() {
    let project = Project::default();
    let mut sources = InMemorySources::new().with("a.epoch", "f : nothing");
    project.reparse(&sources).unwrap();

    sources.remove("a.epoch");
    sources.insert("a.epoch", "f : (");
    let generation = project.reparse(&sources).unwrap();
    // Same path again, so its last good parse is still the fallback.
    assert!(generation.symbols.is_function("f"));

    sources.remove("a.epoch");
    project.reparse(&sources).unwrap();
    sources.insert("a.epoch", "f : (");
    let generation = project.reparse(&sources).unwrap();
    assert!(!generation.symbols.is_function("f"));
}

// ============================================================================
// Generations
// ============================================================================

#[test]
fn test_snapshot_survives_rebuild() {
    let project = Project::default();
    let mut sources = InMemorySources::new().with("a.epoch", "first : nothing");
    project.reparse(&sources).unwrap();
    let before = project.snapshot();

    sources.insert("a.epoch", "second : nothing");
    project.reparse(&sources).unwrap();
    let after = project.snapshot();

    assert!(before.symbols.is_function("first"));
    assert!(!before.symbols.is_function("second"));
    assert!(after.symbols.is_function("second"));
    assert!(!after.symbols.is_function("first"));
    assert_eq!(after.number, before.number + 1);
}

#[test]
fn test_debounced_reparse_sees_changes_after_window() {
    let project = Project::new(AnalysisConfig::new().with_debounce(Duration::from_millis(500)));
    let mut sources = InMemorySources::new().with("a.epoch", "first : nothing");
    let start = Instant::now();
    assert!(project.parse_if_outdated_at(&sources, start).unwrap());

    sources.insert("a.epoch", "second : nothing");
    assert!(!project.parse_if_outdated_at(&sources, start + Duration::from_millis(100)).unwrap());
    assert!(project.snapshot().symbols.is_function("first"));

    assert!(project.parse_if_outdated_at(&sources, start + Duration::from_millis(600)).unwrap());
    assert!(project.snapshot().symbols.is_function("second"));
}

#[test]
fn test_file_lookup_is_case_insensitive() {
    let sources = InMemorySources::new().with("Src/Main.Epoch", "f : integer a { }");
    let generation = Project::default().reparse(&sources).unwrap();
    assert_eq!(names(&generation.symbols, "src/main.epoch", 0, 15), ["a"]);
    assert_eq!(names(&generation.symbols, "SRC/MAIN.EPOCH", 0, 15), ["a"]);
}

#[test]
fn test_signature_listing() {
    let sources = DirectorySource::new(fixture_dir(), "epoch");
    let generation = Project::default().reparse(&sources).unwrap();
    let listing = generation
        .symbols
        .function_signatures()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n");
    insta::assert_snapshot!(listing, @r#"
    area : 0 -> ...
    area : integer side -> integer result
    clamp : integer value, integer low, integer high -> integer result
    entry : nothing
    print : string text [external("runtime", "print")]
    "#);
}
