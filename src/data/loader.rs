// ============================================================
// Layer 4 — CSV Dataset Loader
// ============================================================
// Loads the crop yield CSV file into a column-oriented Table
// using the `csv` crate.
//
// Column typing:
//   A column is Numeric when every non-empty cell parses as a
//   float. Empty cells in a numeric column become NaN — there is
//   no missing-value handling, so NaN flows on into scaling and
//   training untouched.
//   Any other column is kept as Text (e.g. Crop, Region).
//
// Failure:
//   Missing file, unreadable bytes, ragged rows, or a file with
//   no header all return an error. The loader never exits the
//   process; the CLI decides what to do.
//
// Reference: csv crate documentation
//            Rust Book §9 (Error Handling)

use anyhow::{bail, Context, Result};
use std::{fs::File, io::Read, path::PathBuf};

use crate::domain::table::{Column, Table};
use crate::domain::traits::TableSource;

/// Loads a comma-delimited file with a header row.
/// Implements the TableSource trait from Layer 3.
pub struct CsvLoader {
    path: PathBuf,
}

impl CsvLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TableSource for CsvLoader {
    fn load(&self) -> Result<Table> {
        let file = File::open(&self.path)
            .with_context(|| format!("Cannot open dataset '{}'", self.path.display()))?;

        let table = read_table(file)
            .with_context(|| format!("Cannot parse dataset '{}'", self.path.display()))?;

        tracing::debug!(
            "Read {} rows x {} columns from '{}'",
            table.row_count(),
            table.column_count(),
            self.path.display()
        );
        Ok(table)
    }
}

/// Parse CSV text from any reader into a Table.
pub fn read_table<R: Read>(reader: R) -> Result<Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .context("Cannot read header row")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        bail!("Dataset has no header row");
    }

    // Collect raw cells column by column
    let mut raw: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for (line, record) in rdr.records().enumerate() {
        // +2: one for the header, one for 1-based line numbers
        let record = record.with_context(|| format!("Bad record at line {}", line + 2))?;
        for (cells, value) in raw.iter_mut().zip(record.iter()) {
            cells.push(value.to_string());
        }
    }

    let columns = headers
        .into_iter()
        .zip(raw)
        .map(|(name, cells)| type_column(name, cells))
        .collect();

    Table::new(columns)
}

/// Decide whether a column of raw cells is numeric or text.
fn type_column(name: String, cells: Vec<String>) -> Column {
    let parsed: Option<Vec<f64>> = cells
        .iter()
        .map(|c| {
            let c = c.trim();
            if c.is_empty() { Some(f64::NAN) } else { c.parse::<f64>().ok() }
        })
        .collect();

    match parsed {
        Some(values) => Column::numeric(name, values),
        None         => Column::text(name, cells),
    }
}
