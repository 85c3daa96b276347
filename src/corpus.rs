//! Corpus discovery and per-file extraction driver
//!
//! Scans a directory tree for Kotlin sources and runs the extraction walk
//! over each file. Per-file failures are recorded as explicit skip outcomes
//! and never abort the run; only an unreadable corpus root is fatal.

use std::fs;
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use crate::error::{KtMineError, Result};
use crate::parser::{kotlin_parser, parse_source};
use crate::reader::read_source;
use crate::record::FunctionTable;
use crate::walk::walk;

/// Why a file was skipped during a corpus run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// File could not be read or decoded under any configured encoding
    Unreadable,
    /// Tree-sitter did not produce a syntax tree
    Unparseable,
}

/// Result of extracting one file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    Extracted { functions: usize },
    Skipped { reason: SkipReason },
}

/// Aggregate counts for a corpus run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CorpusReport {
    pub files: usize,
    pub extracted: usize,
    pub skipped_unreadable: usize,
    pub skipped_unparseable: usize,
}

impl CorpusReport {
    fn record(&mut self, outcome: &FileOutcome) {
        self.files += 1;
        match outcome {
            FileOutcome::Extracted { functions } => self.extracted += functions,
            FileOutcome::Skipped {
                reason: SkipReason::Unreadable,
            } => self.skipped_unreadable += 1,
            FileOutcome::Skipped {
                reason: SkipReason::Unparseable,
            } => self.skipped_unparseable += 1,
        }
    }

    pub fn skipped(&self) -> usize {
        self.skipped_unreadable + self.skipped_unparseable
    }
}

/// Recursively collect `.kt`/`.kts` files under `root`, sorted by path.
///
/// Hidden directories and common build output directories are skipped.
pub fn find_kotlin_files(root: &Path) -> Result<Vec<PathBuf>> {
    if fs::read_dir(root).is_err() {
        return Err(KtMineError::CorpusUnreadable {
            path: root.display().to_string(),
        });
    }

    let mut files = Vec::new();
    collect_kotlin_files(root, &mut files);
    files.sort();
    Ok(files)
}

fn collect_kotlin_files(dir: &Path, files: &mut Vec<PathBuf>) {
    let entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(_) => return,
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if should_skip_path(&path) {
            continue;
        }
        if path.is_dir() {
            collect_kotlin_files(&path, files);
        } else if path.is_file() && has_kotlin_extension(&path) {
            files.push(path);
        }
    }
}

fn has_kotlin_extension(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("kt") | Some("kts")
    )
}

/// Skip hidden files/directories and common non-source directories
fn should_skip_path(path: &Path) -> bool {
    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
        name.starts_with('.') || name == "build" || name == "out" || name == "node_modules"
    } else {
        false
    }
}

/// Extract all functions from one file into `table`.
///
/// Read, decode, and parse failures are absorbed into a skip outcome so the
/// corpus run can continue; no partial records are kept for a skipped file.
pub fn extract_file(path: &Path, table: &mut FunctionTable, keep_empty_bodies: bool) -> FileOutcome {
    let source = match read_source(path) {
        Ok(source) => source,
        Err(_) => {
            return FileOutcome::Skipped {
                reason: SkipReason::Unreadable,
            }
        }
    };

    let mut parser = match kotlin_parser() {
        Ok(parser) => parser,
        Err(_) => {
            return FileOutcome::Skipped {
                reason: SkipReason::Unparseable,
            }
        }
    };
    let tree = match parse_source(&mut parser, &source) {
        Ok(tree) => tree,
        Err(_) => {
            return FileOutcome::Skipped {
                reason: SkipReason::Unparseable,
            }
        }
    };

    let before = table.len();
    walk(&tree.root_node(), &source, table, keep_empty_bodies);
    FileOutcome::Extracted {
        functions: table.len() - before,
    }
}

/// Run extraction over an entire corpus.
///
/// Files are processed in parallel with one accumulation table per file;
/// results are merged back in input-file order so `function_id` assignment
/// stays deterministic across runs.
pub fn extract_corpus(
    root: &Path,
    keep_empty_bodies: bool,
    show_progress: bool,
) -> Result<(FunctionTable, CorpusReport)> {
    let files = find_kotlin_files(root)?;

    let progress = if show_progress {
        let bar = ProgressBar::new(files.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{bar:40} {pos}/{len} files ({eta})")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Some(bar)
    } else {
        None
    };

    let per_file: Vec<(FunctionTable, FileOutcome)> = files
        .par_iter()
        .map(|path| {
            let mut table = FunctionTable::new();
            let outcome = extract_file(path, &mut table, keep_empty_bodies);
            if let Some(bar) = &progress {
                bar.inc(1);
            }
            (table, outcome)
        })
        .collect();

    if let Some(bar) = &progress {
        bar.finish_and_clear();
    }

    let mut merged = FunctionTable::new();
    let mut report = CorpusReport::default();
    for (table, outcome) in per_file {
        report.record(&outcome);
        merged.merge(table);
    }

    Ok((merged, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_find_kotlin_files_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "b.kt", "fun b() = 2\n");
        write_file(dir.path(), "a.kts", "fun a() = 1\n");
        write_file(dir.path(), "notes.txt", "not kotlin");
        fs::create_dir(dir.path().join("nested")).unwrap();
        write_file(&dir.path().join("nested"), "c.kt", "fun c() = 3\n");

        let files = find_kotlin_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.kts", "b.kt", "c.kt"]);
    }

    #[test]
    fn test_find_kotlin_files_skips_build_dirs() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("build")).unwrap();
        write_file(&dir.path().join("build"), "gen.kt", "fun gen() = 0\n");
        write_file(dir.path(), "real.kt", "fun real() = 1\n");

        let files = find_kotlin_files(dir.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("real.kt"));
    }

    #[test]
    fn test_unreadable_root_is_fatal() {
        let result = find_kotlin_files(Path::new("/nonexistent/corpus"));
        assert!(matches!(
            result,
            Err(KtMineError::CorpusUnreadable { .. })
        ));
    }

    #[test]
    fn test_extract_file_counts_functions() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "sample.kt",
            "fun a() = 1\nfun b() = 2\nfun empty() {}\n",
        );

        let mut table = FunctionTable::new();
        let outcome = extract_file(&path, &mut table, false);
        assert_eq!(outcome, FileOutcome::Extracted { functions: 2 });
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_extract_file_missing_is_skipped() {
        let mut table = FunctionTable::new();
        let outcome = extract_file(Path::new("/nonexistent/x.kt"), &mut table, false);
        assert_eq!(
            outcome,
            FileOutcome::Skipped {
                reason: SkipReason::Unreadable
            }
        );
        assert!(table.is_empty());
    }

    #[test]
    fn test_extract_corpus_deterministic_order() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "b.kt", "fun fromB() = 2\n");
        write_file(dir.path(), "a.kt", "fun fromA() = 1\n");

        let (table, report) = extract_corpus(dir.path(), false, false).unwrap();
        assert_eq!(report.files, 2);
        assert_eq!(report.extracted, 2);
        assert_eq!(report.skipped(), 0);

        // Merged in sorted file order regardless of parallel scheduling
        assert_eq!(table.records()[0].simple_identifier, vec!["fromA"]);
        assert_eq!(table.records()[1].simple_identifier, vec!["fromB"]);
    }
}
