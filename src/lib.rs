//! ktmine: Kotlin function miner for code-generation datasets
//!
//! This library mines a corpus of Kotlin source files for function
//! declarations and turns each one into a structured record (signature text,
//! body text, classification flags). It uses tree-sitter for parsing and
//! emits flat tabular output suitable for model-training pipelines.
//!
//! # Pipeline
//!
//! 1. `corpus` discovers `.kt`/`.kts` files under a root directory
//! 2. `reader` decodes each file, falling back through legacy encodings
//! 3. `walk` visits the syntax tree, pruning abstract classes and collecting
//!    one `FunctionRecord` per function declaration
//! 4. `table` flattens the accumulated records into rows with dense ids
//! 5. `signature` reconstructs canonical signature text for each row
//! 6. `golden` verifies the whole pipeline against a stored expected table
//!
//! # Example
//!
//! ```ignore
//! use ktmine::{extract_corpus, to_rows};
//! use std::path::Path;
//!
//! let (table, report) = extract_corpus(Path::new("corpus/"), false, false)?;
//! let rows = to_rows(&table);
//! println!("{} functions, {} files skipped", rows.len(), report.skipped());
//! ```

pub mod cli;
pub mod corpus;
pub mod error;
pub mod golden;
pub mod parser;
pub mod reader;
pub mod record;
pub mod signature;
pub mod table;
pub mod walk;

// Re-export commonly used types
pub use cli::{Cli, OutputFormat};
pub use corpus::{extract_corpus, extract_file, find_kotlin_files, CorpusReport, FileOutcome};
pub use error::{KtMineError, Result};
pub use golden::{verify, GoldenOutcome, GoldenRow};
pub use parser::{kotlin_parser, parse_source};
pub use reader::read_source;
pub use record::{
    flatten_field, normalize_parameters, resolve_return_shape, split_outside_angles,
    FunctionRecord, FunctionTable, ReturnShape,
};
pub use signature::{categorize_length, synthesize};
pub use table::{
    to_dataset_rows, to_rows, write_dataset_csv, write_function_csv, write_function_json,
    CorpusSummary, DatasetRow, FunctionRow,
};
pub use walk::walk;
