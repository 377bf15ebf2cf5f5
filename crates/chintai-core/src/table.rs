//! Loosely typed in-memory table of listing rows.
//!
//! Raw CSV cells load as text; pipeline stages replace them with typed
//! values column by column. Columns are addressed by name because later
//! stages depend on the renames of earlier ones.

use std::fmt;
use std::io;

use serde::Serialize;

use crate::error::{ParseError, Result};
use crate::models::listing::interim_value;

/// A single cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Empty cell.
    Missing,
    /// Unparsed text, as scraped.
    Text(String),
    Int(i64),
    Float(f64),
}

impl Value {
    /// Text cell, or `Missing` for an empty string.
    pub fn text(s: impl Into<String>) -> Self {
        let s = s.into();
        if s.is_empty() { Value::Missing } else { Value::Text(s) }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Missing => Ok(()),
            Value::Text(s) => f.write_str(s),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{}", x),
        }
    }
}

/// Named columns over rows of [`Value`]s.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a row; it must have one cell per column.
    pub fn push_row(&mut self, row: Vec<Value>) -> std::result::Result<(), ParseError> {
        if row.len() != self.columns.len() {
            return Err(ParseError::RowWidth {
                row: self.rows.len(),
                found: row.len(),
                expected: self.columns.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Index of a column a stage cannot do without.
    pub fn require(&self, name: &str) -> std::result::Result<usize, ParseError> {
        self.column_index(name)
            .ok_or_else(|| ParseError::MissingColumn(name.to_string()))
    }

    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row).map(|r| &r[idx])
    }

    /// Cells of one column, top to bottom.
    pub fn column(&self, name: &str) -> std::result::Result<Vec<&Value>, ParseError> {
        let idx = self.require(name)?;
        Ok(self.rows.iter().map(|r| &r[idx]).collect())
    }

    /// Remove a column. Returns false if it did not exist.
    pub fn drop_column(&mut self, name: &str) -> bool {
        let Some(idx) = self.column_index(name) else {
            return false;
        };
        self.columns.remove(idx);
        for row in &mut self.rows {
            row.remove(idx);
        }
        true
    }

    /// Replace a column in place, or append it if new.
    pub fn set_column(
        &mut self,
        name: &str,
        values: Vec<Value>,
    ) -> std::result::Result<(), ParseError> {
        if values.len() != self.rows.len() {
            return Err(ParseError::RowWidth {
                row: values.len().min(self.rows.len()),
                found: values.len(),
                expected: self.rows.len(),
            });
        }

        match self.column_index(name) {
            Some(idx) => {
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row[idx] = value;
                }
            }
            None => {
                self.columns.push(name.to_string());
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }
        Ok(())
    }

    /// Rewrite every cell of a column.
    pub fn map_column<F>(&mut self, name: &str, mut f: F) -> std::result::Result<(), ParseError>
    where
        F: FnMut(&Value) -> std::result::Result<Value, ParseError>,
    {
        let idx = self.require(name)?;
        for row in &mut self.rows {
            row[idx] = f(&row[idx])?;
        }
        Ok(())
    }

    /// Stack tables vertically. Columns are the union in first-seen order;
    /// cells a table does not have are `Missing`.
    pub fn concat(tables: Vec<Table>) -> Table {
        let mut columns: Vec<String> = Vec::new();
        for table in &tables {
            for column in &table.columns {
                if !columns.contains(column) {
                    columns.push(column.clone());
                }
            }
        }

        let mut rows = Vec::with_capacity(tables.iter().map(Table::len).sum());
        for table in tables {
            let mapping: Vec<Option<usize>> = columns
                .iter()
                .map(|c| table.column_index(c))
                .collect();
            for mut row in table.rows {
                let combined = mapping
                    .iter()
                    .map(|idx| match idx {
                        Some(i) => std::mem::replace(&mut row[*i], Value::Missing),
                        None => Value::Missing,
                    })
                    .collect();
                rows.push(combined);
            }
        }

        Table { columns, rows }
    }

    /// Read a CSV with a header row. Every non-empty cell becomes text.
    pub fn from_csv_reader<R: io::Read>(reader: R) -> Result<Table> {
        Self::read_csv(reader, |_, text| Value::text(text))
    }

    /// Read a CSV written after preprocessing. Derived numeric columns come
    /// back as `Int`/`Float` so the pipeline leaves them alone.
    pub fn from_interim_csv<R: io::Read>(reader: R) -> Result<Table> {
        Self::read_csv(reader, interim_value)
    }

    fn read_csv<R, F>(reader: R, mut cell: F) -> Result<Table>
    where
        R: io::Read,
        F: FnMut(&str, &str) -> Value,
    {
        let mut rdr = csv::Reader::from_reader(reader);
        let columns: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
        let mut table = Table::new(columns.clone());

        for record in rdr.records() {
            let record = record?;
            let row = columns
                .iter()
                .zip(record.iter())
                .map(|(column, text)| cell(column, text))
                .collect();
            table.push_row(row)?;
        }

        Ok(table)
    }

    /// Write the table as CSV with a header row.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(&self.columns)?;
        for row in &self.rows {
            wtr.write_record(row.iter().map(Value::to_string))?;
        }
        wtr.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Table {
        let mut table = Table::new(vec!["a".into(), "b".into()]);
        table.push_row(vec![Value::text("1"), Value::text("x")]).unwrap();
        table.push_row(vec![Value::text("2"), Value::Missing]).unwrap();
        table
    }

    #[test]
    fn test_push_row_width() {
        let mut table = sample();
        let err = table.push_row(vec![Value::Missing]).unwrap_err();
        assert_eq!(err, ParseError::RowWidth { row: 2, found: 1, expected: 2 });
    }

    #[test]
    fn test_set_and_drop_column() {
        let mut table = sample();
        table.set_column("c", vec![Value::Int(1), Value::Int(2)]).unwrap();
        assert_eq!(table.columns(), ["a", "b", "c"]);

        table.set_column("a", vec![Value::Int(10), Value::Int(20)]).unwrap();
        assert_eq!(table.get(1, "a"), Some(&Value::Int(20)));

        assert!(table.drop_column("b"));
        assert!(!table.drop_column("b"));
        assert_eq!(table.columns(), ["a", "c"]);
        assert_eq!(table.rows()[0], vec![Value::Int(10), Value::Int(1)]);
    }

    #[test]
    fn test_require_missing_column() {
        let table = sample();
        assert_eq!(
            table.require("rent"),
            Err(ParseError::MissingColumn("rent".to_string()))
        );
    }

    #[test]
    fn test_concat_unions_columns() {
        let left = sample();
        let mut right = Table::new(vec!["b".into(), "z".into()]);
        right.push_row(vec![Value::text("y"), Value::Int(9)]).unwrap();

        let combined = Table::concat(vec![left, right]);
        assert_eq!(combined.columns(), ["a", "b", "z"]);
        assert_eq!(combined.len(), 3);
        assert_eq!(
            combined.rows()[2],
            vec![Value::Missing, Value::text("y"), Value::Int(9)]
        );
        assert_eq!(combined.get(0, "z"), Some(&Value::Missing));
    }

    #[test]
    fn test_csv_io() {
        let input = ",name,rent\n0,メゾン白金,8.5万円\n1,,-\n";
        let table = Table::from_csv_reader(input.as_bytes()).unwrap();

        assert_eq!(table.columns(), ["", "name", "rent"]);
        assert_eq!(table.get(0, "rent"), Some(&Value::text("8.5万円")));
        assert_eq!(table.get(1, "name"), Some(&Value::Missing));

        let mut out = Vec::new();
        table.write_csv(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), input);
    }

    #[test]
    fn test_interim_csv_keeps_derived_columns_typed() {
        let input = "district,rent,deposit,area,station_0,walk_time_0,RC,floor_plan\n港区,120,1,40.5,白金台駅,7,1,1K\n";
        let table = Table::from_interim_csv(input.as_bytes()).unwrap();

        assert_eq!(table.get(0, "rent"), Some(&Value::Int(120)));
        assert_eq!(table.get(0, "deposit"), Some(&Value::Int(1)));
        assert_eq!(table.get(0, "area"), Some(&Value::Float(40.5)));
        assert_eq!(table.get(0, "walk_time_0"), Some(&Value::Int(7)));
        assert_eq!(table.get(0, "RC"), Some(&Value::Int(1)));
        assert_eq!(table.get(0, "station_0"), Some(&Value::text("白金台駅")));
        assert_eq!(table.get(0, "floor_plan"), Some(&Value::text("1K")));
    }

    #[test]
    fn test_interim_csv_leaves_raw_text_alone() {
        let input = "rent,area\n12万円,25.5m2\n";
        let table = Table::from_interim_csv(input.as_bytes()).unwrap();

        assert_eq!(table.get(0, "rent"), Some(&Value::text("12万円")));
        assert_eq!(table.get(0, "area"), Some(&Value::text("25.5m2")));
    }
}
