//! Tabular formatting of extracted function records
//!
//! Records are flattened into flat rows once per run: list fields are joined
//! with `", "`, the parameter cell is normalized, and `function_id` is
//! assigned as a dense 0-based index over the final row order.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{KtMineError, Result};
use crate::record::{flatten_field, normalize_parameters, FunctionTable};
use crate::signature::{categorize_length, synthesize, LENGTH_BUCKETS};

/// One flattened row of the function table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionRow {
    pub function_id: usize,
    pub simple_identifier: String,
    pub function_value_parameters: String,
    pub user_type: String,
    pub modifiers: String,
    pub function_body: String,
    pub type_parameters: String,
    pub is_single_expression: bool,
    pub is_test: bool,
}

/// Flatten an accumulation table into rows with dense 0-based ids
pub fn to_rows(table: &FunctionTable) -> Vec<FunctionRow> {
    table
        .records()
        .iter()
        .enumerate()
        .map(|(function_id, record)| FunctionRow {
            function_id,
            simple_identifier: flatten_field(&record.simple_identifier),
            function_value_parameters: normalize_parameters(&flatten_field(
                &record.function_value_parameters,
            )),
            user_type: flatten_field(&record.user_type),
            modifiers: flatten_field(&record.modifiers),
            function_body: flatten_field(&record.function_body),
            type_parameters: flatten_field(&record.type_parameters),
            is_single_expression: record.is_single_expression(),
            is_test: record.is_test(),
        })
        .collect()
}

/// One row of the downstream text-generation dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetRow {
    pub function_id: usize,
    pub signature: String,
    pub body: String,
    pub is_single_expression: bool,
    pub is_test: bool,
    pub len_0_20: bool,
    pub len_20_50: bool,
    pub len_50_100: bool,
    pub len_100_plus: bool,
}

/// Build the downstream dataset: synthesized signature, body, flags, and a
/// one-hot signature-length bucket
pub fn to_dataset_rows(rows: &[FunctionRow]) -> Vec<DatasetRow> {
    rows.iter()
        .map(|row| {
            let signature = synthesize(row);
            let bucket = categorize_length(&signature);
            DatasetRow {
                function_id: row.function_id,
                signature,
                body: row.function_body.clone(),
                is_single_expression: row.is_single_expression,
                is_test: row.is_test,
                len_0_20: bucket == LENGTH_BUCKETS[0],
                len_20_50: bucket == LENGTH_BUCKETS[1],
                len_50_100: bucket == LENGTH_BUCKETS[2],
                len_100_plus: bucket == LENGTH_BUCKETS[3],
            }
        })
        .collect()
}

/// Write the function table as CSV
pub fn write_function_csv(path: &Path, rows: &[FunctionRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the function table as pretty JSON
pub fn write_function_json(path: &Path, rows: &[FunctionRow]) -> Result<()> {
    let json = serde_json::to_string_pretty(rows).map_err(|e| KtMineError::TableWrite {
        message: format!("JSON serialization failed: {}", e),
    })?;
    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;
    file.write_all(b"\n")?;
    Ok(())
}

/// Write the downstream dataset table as CSV
pub fn write_dataset_csv(path: &Path, rows: &[DatasetRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Corpus-level counts reported after an extraction run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CorpusSummary {
    pub functions: usize,
    pub single_expression: usize,
    pub test: usize,
    pub neither: usize,
}

impl CorpusSummary {
    pub fn from_rows(rows: &[FunctionRow]) -> Self {
        let single_expression = rows.iter().filter(|r| r.is_single_expression).count();
        let test = rows.iter().filter(|r| r.is_test).count();
        let neither = rows
            .iter()
            .filter(|r| !r.is_single_expression && !r.is_test)
            .count();
        Self {
            functions: rows.len(),
            single_expression,
            test,
            neither,
        }
    }

    fn percent(&self, count: usize) -> f64 {
        if self.functions == 0 {
            0.0
        } else {
            count as f64 * 100.0 / self.functions as f64
        }
    }

    /// Human-readable summary printed to stderr after a corpus run
    pub fn report(&self) -> String {
        format!(
            "Extracted {} functions: {:.2}% single-expression, {:.2}% test, {:.2}% neither",
            self.functions,
            self.percent(self.single_expression),
            self.percent(self.test),
            self.percent(self.neither)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FunctionRecord;

    fn sample_table() -> FunctionTable {
        let mut table = FunctionTable::new();

        let mut sum = FunctionRecord {
            simple_identifier: vec!["sum".to_string()],
            function_value_parameters: vec!["(a: Int,\n    b: Int)".to_string()],
            function_body: vec!["= a + b".to_string()],
            ..Default::default()
        };
        sum.compute_flags();
        table.push(sum);

        let mut test_sum = FunctionRecord {
            simple_identifier: vec!["testSum".to_string()],
            modifiers: vec!["@Test".to_string()],
            function_body: vec!["{ check(sum(1, 2) == 3) }".to_string()],
            ..Default::default()
        };
        test_sum.compute_flags();
        table.push(test_sum);

        table
    }

    #[test]
    fn test_dense_function_ids() {
        let rows = to_rows(&sample_table());
        let ids: Vec<_> = rows.iter().map(|r| r.function_id).collect();
        assert_eq!(ids, vec![0, 1]);
    }

    #[test]
    fn test_parameter_normalization_applied() {
        let rows = to_rows(&sample_table());
        assert_eq!(rows[0].function_value_parameters, "a: Int, b: Int");
    }

    #[test]
    fn test_flag_columns() {
        let rows = to_rows(&sample_table());
        assert!(rows[0].is_single_expression);
        assert!(!rows[0].is_test);
        assert!(!rows[1].is_single_expression);
        assert!(rows[1].is_test);
    }

    #[test]
    fn test_dataset_rows_one_hot() {
        let rows = to_rows(&sample_table());
        let dataset = to_dataset_rows(&rows);
        assert_eq!(dataset.len(), 2);
        for row in &dataset {
            let hot = [row.len_0_20, row.len_20_50, row.len_50_100, row.len_100_plus]
                .iter()
                .filter(|&&b| b)
                .count();
            assert_eq!(hot, 1);
        }
        assert_eq!(dataset[0].signature, "fun sum(a: Int, b: Int) +");
        assert_eq!(dataset[0].body, "= a + b");
    }

    #[test]
    fn test_csv_round_trip() {
        let rows = to_rows(&sample_table());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("functions.csv");
        write_function_csv(&path, &rows).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let back: Vec<FunctionRow> = reader.deserialize().map(|r| r.unwrap()).collect();
        assert_eq!(back, rows);
    }

    #[test]
    fn test_summary_counts() {
        let rows = to_rows(&sample_table());
        let summary = CorpusSummary::from_rows(&rows);
        assert_eq!(summary.functions, 2);
        assert_eq!(summary.single_expression, 1);
        assert_eq!(summary.test, 1);
        assert_eq!(summary.neither, 0);
        assert!(summary.report().contains("2 functions"));
    }
}
