//! Entity table loading.
//!
//! The entity table is a delimited file with one row per entity. Its schema
//! is caller-defined beyond the required identifier column; draw modes pull
//! whatever coordinate, contour or path columns they need by name.

use csv::{ReaderBuilder, StringRecord};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use crate::error::{MinardError, Result};

/// An entity table loaded into memory, keyed by a configured id column.
#[derive(Debug, Clone)]
pub struct EntityTable {
    columns: HashMap<String, usize>,
    rows: Vec<StringRecord>,
    id_column: String,
}

impl EntityTable {
    /// Load a table from a CSV file. The id column must exist.
    pub fn from_path(path: &Path, id_column: &str) -> Result<Self> {
        let reader = ReaderBuilder::new().has_headers(true).from_path(path)?;
        Self::from_csv_reader(reader, id_column)
    }

    /// Load a table from any reader producing CSV text.
    pub fn from_reader<R: Read>(reader: R, id_column: &str) -> Result<Self> {
        let reader = ReaderBuilder::new().has_headers(true).from_reader(reader);
        Self::from_csv_reader(reader, id_column)
    }

    fn from_csv_reader<R: Read>(mut reader: csv::Reader<R>, id_column: &str) -> Result<Self> {
        let columns: HashMap<String, usize> = reader
            .headers()?
            .iter()
            .enumerate()
            .map(|(i, name)| (name.to_string(), i))
            .collect();

        if !columns.contains_key(id_column) {
            return Err(MinardError::Table {
                message: format!("'{}' is not a column in the table", id_column),
            });
        }

        let rows = reader.records().collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            columns,
            rows,
            id_column: id_column.to_string(),
        })
    }

    /// Number of entity rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether the table has the named column.
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.contains_key(column)
    }

    /// The id of every entity, in row order.
    pub fn ids(&self) -> Result<Vec<String>> {
        (0..self.rows.len())
            .map(|row| self.str_value(row, &self.id_column).map(str::to_string))
            .collect()
    }

    /// Raw cell value at `(row, column)`.
    pub fn str_value(&self, row: usize, column: &str) -> Result<&str> {
        let col = *self.columns.get(column).ok_or_else(|| MinardError::Table {
            message: format!("'{}' is not a column in the table", column),
        })?;
        self.rows
            .get(row)
            .and_then(|record| record.get(col))
            .ok_or_else(|| MinardError::Table {
                message: format!("row {} has no value in column '{}'", row, column),
            })
    }

    /// Cell value parsed as an integer grid coordinate.
    pub fn i64_value(&self, row: usize, column: &str) -> Result<i64> {
        let raw = self.str_value(row, column)?;
        raw.trim().parse().map_err(|_| MinardError::Table {
            message: format!(
                "row {} column '{}': '{}' is not an integer",
                row, column, raw
            ),
        })
    }

    /// Cell value parsed as a float (label offsets).
    pub fn f64_value(&self, row: usize, column: &str) -> Result<f64> {
        let raw = self.str_value(row, column)?;
        raw.trim().parse().map_err(|_| MinardError::Table {
            message: format!("row {} column '{}': '{}' is not a number", row, column, raw),
        })
    }

    /// Largest integer value in a column, for canvas extents.
    pub fn max_i64(&self, column: &str) -> Result<i64> {
        let mut max = i64::MIN;
        for row in 0..self.rows.len() {
            max = max.max(self.i64_value(row, column)?);
        }
        if max == i64::MIN {
            return Err(MinardError::Table {
                message: format!("column '{}' has no rows to take a maximum over", column),
            });
        }
        Ok(max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CSV: &str = "\
abbrev,square_x,square_y,offset
AA,0,0,0.5
BB,1,0,-0.25
CC,0,1,1
";

    #[test]
    fn test_load_and_access() {
        let table = EntityTable::from_reader(CSV.as_bytes(), "abbrev").unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.ids().unwrap(), vec!["AA", "BB", "CC"]);
        assert_eq!(table.str_value(1, "abbrev").unwrap(), "BB");
        assert_eq!(table.i64_value(1, "square_x").unwrap(), 1);
        assert_eq!(table.f64_value(0, "offset").unwrap(), 0.5);
        assert_eq!(table.max_i64("square_y").unwrap(), 1);
    }

    #[test]
    fn test_missing_id_column_fatal() {
        let err = EntityTable::from_reader(CSV.as_bytes(), "state").unwrap_err();
        assert!(err.to_string().contains("'state' is not a column"));
    }

    #[test]
    fn test_missing_column_lookup() {
        let table = EntityTable::from_reader(CSV.as_bytes(), "abbrev").unwrap();
        assert!(table.str_value(0, "hex_x").is_err());
        assert!(!table.has_column("hex_x"));
    }

    #[test]
    fn test_unparsable_cell() {
        let table = EntityTable::from_reader(CSV.as_bytes(), "abbrev").unwrap();
        // The offset column holds floats, not integers.
        assert!(table.i64_value(0, "offset").is_err());
        assert!(table.f64_value(0, "abbrev").is_err());
    }
}
