// ============================================================
// Layer 3 — Table Domain Type
// ============================================================
// An in-memory, column-oriented table loaded from a CSV file.
//
// Each column is either:
//   - Numeric: every non-empty cell parsed as f64 (empty → NaN)
//   - Text:    at least one cell was not a number
//
// Pipeline stages mutate the table in place, one after another:
//   rename Soil_pH → encode Crop/Region → append derived columns
//
// Reference: Rust Book §6 (Enums), §8 (Collections)

use anyhow::{bail, Result};

/// The values of a single column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Numeric(Vec<f64>),
    Text(Vec<String>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Numeric(v) => v.len(),
            ColumnData::Text(v)    => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A named column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    pub fn numeric(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self { name: name.into(), data: ColumnData::Numeric(values) }
    }

    pub fn text(name: impl Into<String>, values: Vec<String>) -> Self {
        Self { name: name.into(), data: ColumnData::Text(values) }
    }

    /// Cell values rendered as strings, whatever the column type.
    /// Used when a numeric column is treated as categorical.
    pub fn labels(&self) -> Vec<String> {
        match &self.data {
            ColumnData::Text(v)    => v.clone(),
            ColumnData::Numeric(v) => v.iter().map(|x| x.to_string()).collect(),
        }
    }
}

/// Column-oriented table. All columns have `row_count` cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns:   Vec<Column>,
    row_count: usize,
}

impl Table {
    /// Build a table from columns, rejecting ragged input.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let row_count = columns.first().map(|c| c.data.len()).unwrap_or(0);
        for c in &columns {
            if c.data.len() != row_count {
                bail!(
                    "Column '{}' has {} rows, expected {}",
                    c.name, c.data.len(), row_count
                );
            }
        }
        let mut seen = std::collections::HashSet::new();
        for c in &columns {
            if !seen.insert(c.name.as_str()) {
                bail!("Duplicate column name '{}'", c.name);
            }
        }
        Ok(Self { columns, row_count })
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Numeric values of a column, or an error if it is missing or text.
    pub fn numeric(&self, name: &str) -> Result<&[f64]> {
        match self.column(name) {
            Some(Column { data: ColumnData::Numeric(v), .. }) => Ok(v),
            Some(_) => bail!("Column '{}' is not numeric", name),
            None    => bail!("Missing column '{}'", name),
        }
    }

    /// Rename a column in place. Renaming a missing column is a no-op,
    /// matching how a rename map is applied to whatever columns exist.
    pub fn rename_column(&mut self, from: &str, to: &str) -> Result<bool> {
        if from == to {
            return Ok(self.column(from).is_some());
        }
        if self.column(to).is_some() && self.column(from).is_some() {
            bail!("Cannot rename '{}' to '{}': target already exists", from, to);
        }
        match self.columns.iter_mut().find(|c| c.name == from) {
            Some(col) => {
                col.name = to.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Replace the data of an existing column, keeping its position.
    pub fn replace_column(&mut self, name: &str, data: ColumnData) -> Result<()> {
        if data.len() != self.row_count {
            bail!(
                "Replacement for '{}' has {} rows, expected {}",
                name, data.len(), self.row_count
            );
        }
        match self.columns.iter_mut().find(|c| c.name == name) {
            Some(col) => {
                col.data = data;
                Ok(())
            }
            None => bail!("Missing column '{}'", name),
        }
    }

    /// Append a new column at the end.
    pub fn push_column(&mut self, column: Column) -> Result<()> {
        if self.columns.is_empty() {
            self.row_count = column.data.len();
        } else if column.data.len() != self.row_count {
            bail!(
                "Column '{}' has {} rows, expected {}",
                column.name, column.data.len(), self.row_count
            );
        }
        if self.column(&column.name).is_some() {
            bail!("Duplicate column name '{}'", column.name);
        }
        self.columns.push(column);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::new(vec![
            Column::numeric("a", vec![1.0, 2.0]),
            Column::text("b", vec!["x".into(), "y".into()]),
        ]).unwrap()
    }

    #[test]
    fn test_rejects_ragged_columns() {
        let t = Table::new(vec![
            Column::numeric("a", vec![1.0, 2.0]),
            Column::numeric("b", vec![1.0]),
        ]);
        assert!(t.is_err());
    }

    #[test]
    fn test_rename_keeps_position() {
        let mut t = sample();
        assert!(t.rename_column("a", "alpha").unwrap());
        assert_eq!(t.column_names(), vec!["alpha", "b"]);
        // Missing source column is a no-op
        assert!(!t.rename_column("zzz", "q").unwrap());
    }

    #[test]
    fn test_numeric_accessor_errors() {
        let t = sample();
        assert_eq!(t.numeric("a").unwrap(), &[1.0, 2.0]);
        assert!(t.numeric("b").is_err());
        assert!(t.numeric("missing").is_err());
    }

    #[test]
    fn test_push_column() {
        let mut t = sample();
        assert!(t.push_column(Column::numeric("c", vec![0.0])).is_err());
        t.push_column(Column::numeric("c", vec![0.0, 1.0])).unwrap();
        assert_eq!(t.column_count(), 3);
        assert_eq!(t.column_names(), vec!["a", "b", "c"]);
    }
}
