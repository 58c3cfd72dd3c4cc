//! Hygiene — enforces coding standards at test time
//!
//! Scans the production sources of this crate for patterns that crash the
//! page, swallow storage failures, or leak credentials into the console. Each
//! check has a budget of zero; sibling `*_test.rs` files are exempt.

use std::fs;
use std::path::Path;

struct SourceFile {
    path: String,
    content: String,
}

/// Collect production `.rs` files under `src/`, excluding `*_test.rs`.
fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(Path::new(env!("CARGO_MANIFEST_DIR")).join("src").as_path(), &mut files);
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
        } else if path.extension().is_some_and(|e| e == "rs") {
            let path_str = path.to_string_lossy().to_string();
            if path_str.ends_with("_test.rs") {
                continue;
            }
            if let Ok(content) = fs::read_to_string(&path) {
                out.push(SourceFile { path: path_str, content });
            }
        }
    }
}

fn hits_where(files: &[SourceFile], matches: impl Fn(&str) -> bool) -> Vec<(String, usize)> {
    files
        .iter()
        .filter_map(|file| {
            let count = file.content.lines().filter(|line| matches(line)).count();
            (count > 0).then(|| (file.path.clone(), count))
        })
        .collect()
}

fn assert_none(what: &str, hits: &[(String, usize)]) {
    let count: usize = hits.iter().map(|(_, c)| c).sum();
    let listing = hits
        .iter()
        .map(|(path, count)| format!("  {path}: {count}"))
        .collect::<Vec<_>>()
        .join("\n");
    assert!(count == 0, "{what} found {count} time(s) in production sources.\n{listing}");
}

#[test]
fn sources_are_found() {
    let files = source_files();
    assert!(files.iter().any(|f| f.path.ends_with("session.rs")));
}

#[test]
fn no_unwrap() {
    assert_none(".unwrap()", &hits_where(&source_files(), |l| l.contains(".unwrap()")));
}

#[test]
fn no_expect() {
    assert_none(".expect(", &hits_where(&source_files(), |l| l.contains(".expect(")));
}

#[test]
fn no_panicking_macros() {
    let files = source_files();
    for pattern in ["panic!(", "unreachable!(", "todo!(", "unimplemented!("] {
        assert_none(pattern, &hits_where(&files, |l| l.contains(pattern)));
    }
}

#[test]
fn no_silent_discard() {
    assert_none("let _ =", &hits_where(&source_files(), |l| l.contains("let _ =")));
}

#[test]
fn no_dot_ok() {
    assert_none(".ok()", &hits_where(&source_files(), |l| l.contains(".ok()")));
}

#[test]
fn no_allow_dead_code() {
    assert_none("#[allow(dead_code)]", &hits_where(&source_files(), |l| l.contains("#[allow(dead_code)]")));
}

#[test]
fn tokens_never_logged() {
    let hits = hits_where(&source_files(), |l| l.contains("log::") && (l.contains("{token") || l.contains("token=")));
    assert_none("token in log statement", &hits);
}
