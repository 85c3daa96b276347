//! Golden-file verification of the extraction pipeline
//!
//! Runs the walk over a fixed sample file twice (first keeping empty bodies,
//! then filtering them) into the same accumulation table, flattens the
//! result, and compares it cell-for-cell against a stored golden CSV. The
//! harness owns its table, so nothing leaks into a later corpus run.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{KtMineError, Result};
use crate::parser::{kotlin_parser, parse_source};
use crate::reader::read_source;
use crate::record::{flatten_field, normalize_parameters, FunctionTable};
use crate::walk::walk;

/// One flattened row of the golden table.
///
/// Unlike the production function table, flags stay a single joined column
/// here: the golden table checks the raw extraction output before any
/// downstream expansion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoldenRow {
    pub simple_identifier: String,
    pub function_value_parameters: String,
    pub user_type: String,
    pub modifiers: String,
    pub function_body: String,
    pub type_parameters: String,
    pub flags: String,
}

/// Result of a golden verification run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoldenOutcome {
    Pass,
    Mismatch { message: String },
}

impl GoldenOutcome {
    pub fn passed(&self) -> bool {
        matches!(self, Self::Pass)
    }
}

/// Verify extraction against a golden table.
///
/// On a match the produced table is written to `output_path`; on a mismatch
/// nothing is written and the outcome describes the first differing cell.
/// A mismatch is reported as a value, not an error; errors are reserved for
/// unreadable inputs.
pub fn verify(sample_file: &Path, golden_table: &Path, output_path: &Path) -> Result<GoldenOutcome> {
    let golden = match load_golden(golden_table)? {
        Ok(rows) => rows,
        Err(message) => return Ok(GoldenOutcome::Mismatch { message }),
    };
    let produced = extract_sample(sample_file)?;

    if let Some(message) = first_difference(&golden, &produced) {
        return Ok(GoldenOutcome::Mismatch { message });
    }

    write_rows(output_path, &produced)?;
    Ok(GoldenOutcome::Pass)
}

/// Walk the sample twice into one table: empty bodies kept, then filtered
fn extract_sample(sample_file: &Path) -> Result<Vec<GoldenRow>> {
    if !sample_file.exists() {
        return Err(KtMineError::FileNotFound {
            path: sample_file.display().to_string(),
        });
    }

    let source = read_source(sample_file)?;
    let mut parser = kotlin_parser()?;
    let tree = parse_source(&mut parser, &source)?;

    let mut table = FunctionTable::new();
    walk(&tree.root_node(), &source, &mut table, true);
    walk(&tree.root_node(), &source, &mut table, false);

    Ok(table
        .records()
        .iter()
        .map(|record| GoldenRow {
            simple_identifier: flatten_field(&record.simple_identifier),
            function_value_parameters: normalize_parameters(&flatten_field(
                &record.function_value_parameters,
            )),
            user_type: flatten_field(&record.user_type),
            modifiers: flatten_field(&record.modifiers),
            function_body: flatten_field(&record.function_body),
            type_parameters: flatten_field(&record.type_parameters),
            flags: flatten_field(&record.flags),
        })
        .collect())
}

/// Expected golden header, in column order
const GOLDEN_COLUMNS: [&str; 7] = [
    "simple_identifier",
    "function_value_parameters",
    "user_type",
    "modifiers",
    "function_body",
    "type_parameters",
    "flags",
];

/// Load the golden CSV; missing cells deserialize as empty strings.
///
/// The inner result reports a column-set mismatch: serde would silently
/// ignore extra or reordered columns, but the comparison contract is exact,
/// so the header row is checked against `GOLDEN_COLUMNS` first.
fn load_golden(path: &Path) -> Result<std::result::Result<Vec<GoldenRow>, String>> {
    if !path.exists() {
        return Err(KtMineError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let mut reader = csv::Reader::from_path(path)?;

    let headers = reader.headers()?.clone();
    if !headers.iter().eq(GOLDEN_COLUMNS.iter().copied()) {
        return Ok(Err(format!(
            "column set differs: expected {:?}, got {:?}",
            GOLDEN_COLUMNS, headers
        )));
    }

    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row?);
    }
    Ok(Ok(rows))
}

fn write_rows(path: &Path, rows: &[GoldenRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Describe the first differing cell, or None when tables match exactly
fn first_difference(golden: &[GoldenRow], produced: &[GoldenRow]) -> Option<String> {
    if golden.len() != produced.len() {
        return Some(format!(
            "row count differs: golden has {}, produced has {}",
            golden.len(),
            produced.len()
        ));
    }

    for (index, (expected, actual)) in golden.iter().zip(produced).enumerate() {
        for (column, expected_cell, actual_cell) in [
            ("simple_identifier", &expected.simple_identifier, &actual.simple_identifier),
            (
                "function_value_parameters",
                &expected.function_value_parameters,
                &actual.function_value_parameters,
            ),
            ("user_type", &expected.user_type, &actual.user_type),
            ("modifiers", &expected.modifiers, &actual.modifiers),
            ("function_body", &expected.function_body, &actual.function_body),
            ("type_parameters", &expected.type_parameters, &actual.type_parameters),
            ("flags", &expected.flags, &actual.flags),
        ] {
            if expected_cell != actual_cell {
                return Some(format!(
                    "row {index}, column {column}: expected {expected_cell:?}, got {actual_cell:?}"
                ));
            }
        }
    }
    None
}
