// Copyright 2025 Pupil Chat Developers
// SPDX-License-Identifier: Apache-2.0

//! Column-major sample tables and their CSV form
//!
//! Columns are collected one field at a time and transposed into one row
//! per sample when written. The file layout is a single `# `-prefixed header
//! line followed by comma-separated rows, numbers in `%.18e` notation.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{RecordingError, RecordingResult};

/// Named columns of equal length
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleTable {
    columns: Vec<(&'static str, Vec<f64>)>,
}

impl SampleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column; header order follows insertion order
    pub fn push_column(&mut self, name: &'static str, values: Vec<f64>) {
        debug_assert!(
            self.columns.is_empty() || self.columns[0].1.len() == values.len(),
            "column '{}' has {} values, table has {} rows",
            name,
            values.len(),
            self.row_count()
        );
        self.columns.push((name, values));
    }

    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|(name, _)| *name).collect()
    }

    /// Comma-joined column names
    pub fn header(&self) -> String {
        self.column_names().join(",")
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |(_, values)| values.len())
    }

    /// Rows in sample order (the transpose of the columns)
    pub fn rows(&self) -> impl Iterator<Item = Vec<f64>> + '_ {
        (0..self.row_count()).map(move |row| {
            self.columns
                .iter()
                .map(|(_, values)| values[row])
                .collect()
        })
    }

    /// Write the table to `path`, replacing any existing file
    ///
    /// Returns the number of data rows written.
    pub fn write_csv(&self, path: &Path) -> RecordingResult<usize> {
        let file = File::create(path).map_err(|e| RecordingError::io(path, e))?;
        let mut out = BufWriter::new(file);
        writeln!(out, "# {}", self.header()).map_err(|e| RecordingError::io(path, e))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(out);

        let mut written = 0;
        for row in self.rows() {
            writer.write_record(row.into_iter().map(format_scientific))?;
            written += 1;
        }
        writer.flush().map_err(|e| RecordingError::io(path, e))?;

        Ok(written)
    }
}

/// Format like C's `%.18e`: 18 fractional digits, signed two-digit exponent
pub fn format_scientific(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    // Rust renders the exponent bare ("1.5e0", "2.5e-1")
    let formatted = format!("{:.18e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => formatted,
    }
}
