//! Delimited-text tables and column projection.
//!
//! A [`Table`] is read once from a header line plus data rows. Cells are kept
//! exactly as read; typing is left to the output side (see
//! [`crate::value_conversion`]).

use csv::{ReaderBuilder, StringRecord};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{ConvertError, Result};

/// How rows whose field count differs from the header are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum RowPolicy {
    /// Abort the whole conversion on the first mismatched row.
    #[default]
    Strict,
    /// Drop extra trailing fields and pad missing ones with empty strings.
    Tolerant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    pub delimiter: u8,
    pub row_policy: RowPolicy,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            delimiter: b'\t',
            row_policy: RowPolicy::Strict,
        }
    }
}

/// One data row. Cells line up with [`Table::columns`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    cells: Vec<String>,
}

impl Row {
    pub fn cells(&self) -> &[String] {
        &self.cells
    }
}

/// Header plus rows, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Reads a table from a file.
    pub fn from_path(path: &Path, options: &ParseOptions) -> Result<Self> {
        let file = File::open(path).map_err(|e| ConvertError::io(path, e))?;
        Self::parse(BufReader::with_capacity(32 * 1024, file), options)
    }

    /// Reads the first line as column names and every following line as a row.
    pub fn parse<R: Read>(input: R, options: &ParseOptions) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .delimiter(options.delimiter)
            .has_headers(true)
            // field counts are checked below so the policy decides
            .flexible(true)
            .from_reader(input);

        let headers = reader.headers()?.clone();
        if headers.is_empty() {
            return Err(ConvertError::EmptyInput);
        }
        let columns: Vec<String> = headers.iter().map(str::to_string).collect();
        warn_duplicate_columns(&columns);

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            rows.push(build_row(&record, columns.len(), options.row_policy)?);
        }

        debug!(
            columns = columns.len(),
            rows = rows.len(),
            "parsed delimited input"
        );

        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of `column` in the header; first occurrence wins.
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Cell of `row` under `column`, if both exist.
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let index = self.column_index(column)?;
        self.rows.get(row).map(|r| r.cells[index].as_str())
    }

    /// Every row as a record over all columns, in header order.
    ///
    /// A repeated column name appears once, at its first position and with
    /// its first value, matching [`Table::column_index`].
    pub fn records(&self) -> Vec<Record> {
        let indices: Vec<usize> = (0..self.columns.len())
            .filter(|&i| !self.columns[..i].contains(&self.columns[i]))
            .collect();

        self.rows
            .iter()
            .map(|row| Record {
                fields: indices
                    .iter()
                    .map(|&i| (self.columns[i].clone(), row.cells[i].clone()))
                    .collect(),
            })
            .collect()
    }

    /// Restricts every row to `selected`, keeping the order given.
    ///
    /// All names are resolved before any record is built, so an unknown column
    /// fails the whole projection.
    pub fn project<S: AsRef<str>>(&self, selected: &[S]) -> Result<Vec<Record>> {
        let indices = selected
            .iter()
            .map(|name| {
                let name = name.as_ref();
                self.column_index(name)
                    .map(|index| (name.to_string(), index))
                    .ok_or_else(|| ConvertError::UnknownColumn {
                        column: name.to_string(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(self
            .rows
            .iter()
            .map(|row| Record {
                fields: indices
                    .iter()
                    .map(|(name, index)| (name.clone(), row.cells[*index].clone()))
                    .collect(),
            })
            .collect())
    }
}

/// A row restricted to a chosen set of columns, in selection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn new(fields: Vec<(String, String)>) -> Self {
        Self { fields }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == column)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

fn build_row(record: &StringRecord, expected: usize, policy: RowPolicy) -> Result<Row> {
    let found = record.len();
    let line = record.position().map(|p| p.line()).unwrap_or(0);

    if found != expected {
        match policy {
            RowPolicy::Strict => {
                return Err(ConvertError::MalformedRow {
                    line,
                    expected,
                    found,
                })
            }
            RowPolicy::Tolerant => {
                warn!(line, expected, found, "adjusting row to header width");
            }
        }
    }

    let mut cells: Vec<String> = record.iter().take(expected).map(str::to_string).collect();
    cells.resize(expected, String::new());
    Ok(Row { cells })
}

fn warn_duplicate_columns(columns: &[String]) {
    for (i, column) in columns.iter().enumerate() {
        if columns[..i].contains(column) {
            warn!(column = %column, "duplicate column name; lookups use the first occurrence");
        }
    }
}
