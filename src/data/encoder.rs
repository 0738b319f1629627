// ============================================================
// Layer 4 — Categorical Label Encoder
// ============================================================
// Maps each distinct label of a categorical column to a dense
// integer code in [0, distinct_count - 1].
//
// Ordering: codes follow the SORTED order of the distinct
// labels, so "Maize" < "Rice" < "Wheat" → 0, 1, 2 regardless
// of which one appears first in the file. A column that loaded
// as numeric (e.g. region IDs) is sorted by value, not as text.
//
// The fitted mapping lives only for the duration of one run.
// It is returned to the caller but not written to disk, so a
// saved model can only be applied to new data by re-deriving
// codes from a dataset with the same category set.
//
// Reference: Rust Book §8 (Hash Maps), BTreeSet ordering

use anyhow::{bail, Result};
use std::collections::{BTreeSet, HashMap};

use crate::domain::table::{ColumnData, Table};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelEncoder {
    /// Code i decodes to classes[i]
    classes: Vec<String>,
    index:   HashMap<String, usize>,
}

impl LabelEncoder {
    /// Learn the sorted set of distinct labels.
    pub fn fit<S: AsRef<str>>(labels: &[S]) -> Self {
        let classes: Vec<String> = labels
            .iter()
            .map(|s| s.as_ref().to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        Self::from_classes(classes)
    }

    /// Learn the distinct values of a numeric column, ordered by value
    /// rather than by their text form, so 2 < 9 < 10. NaN sorts last.
    pub fn fit_numeric(values: &[f64]) -> Self {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        sorted.dedup_by(|a, b| a.total_cmp(b).is_eq());
        Self::from_classes(sorted.iter().map(f64::to_string).collect())
    }

    fn from_classes(classes: Vec<String>) -> Self {
        let index = classes
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), i))
            .collect();
        Self { classes, index }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Label → code. Unseen labels are an error.
    pub fn encode(&self, label: &str) -> Result<usize> {
        match self.index.get(label) {
            Some(&code) => Ok(code),
            None        => bail!("Unseen category '{}'", label),
        }
    }

    /// Code → label. Out-of-range codes are an error.
    pub fn decode(&self, code: usize) -> Result<&str> {
        match self.classes.get(code) {
            Some(label) => Ok(label),
            None        => bail!("Code {} out of range (0..{})", code, self.classes.len()),
        }
    }

    pub fn transform<S: AsRef<str>>(&self, labels: &[S]) -> Result<Vec<usize>> {
        labels.iter().map(|l| self.encode(l.as_ref())).collect()
    }

    pub fn inverse_transform(&self, codes: &[usize]) -> Result<Vec<String>> {
        codes.iter().map(|&c| self.decode(c).map(str::to_string)).collect()
    }
}

/// Fit an encoder on a column and replace that column in place
/// with the numeric codes. Returns the fitted encoder.
pub fn encode_column(table: &mut Table, name: &str) -> Result<LabelEncoder> {
    let col = match table.column(name) {
        Some(col) => col,
        None      => bail!("Missing categorical column '{}'", name),
    };

    let labels  = col.labels();
    let encoder = match &col.data {
        ColumnData::Numeric(values) => LabelEncoder::fit_numeric(values),
        ColumnData::Text(_)         => LabelEncoder::fit(&labels),
    };
    let codes: Vec<f64> = encoder
        .transform(&labels)?
        .into_iter()
        .map(|c| c as f64)
        .collect();

    table.replace_column(name, ColumnData::Numeric(codes))?;
    tracing::debug!("Encoded '{}' into {} classes", name, encoder.class_count());
    Ok(encoder)
}

/// The encoders fitted for one table, keyed by column name.
#[derive(Debug, Clone, Default)]
pub struct CategoryEncoders {
    encoders: Vec<(String, LabelEncoder)>,
}

impl CategoryEncoders {
    /// Encode each named column in place, in the given order.
    pub fn fit_transform(table: &mut Table, columns: &[&str]) -> Result<Self> {
        let encoders = columns
            .iter()
            .map(|&name| encode_column(table, name).map(|enc| (name.to_string(), enc)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { encoders })
    }

    pub fn get(&self, column: &str) -> Option<&LabelEncoder> {
        self.encoders
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, enc)| enc)
    }
}
