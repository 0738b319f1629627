// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer talks to these traits, never to the
// concrete CSV loader or JSON files. For example:
//   - CsvLoader implements TableSource
//   - StandardScaler implements Persistable
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;
use std::path::Path;

use crate::domain::table::Table;

// ─── TableSource ──────────────────────────────────────────────────────────────
/// Any component that can produce a tabular dataset.
///
/// Implementations:
///   - CsvLoader → reads a delimited text file with a header row
pub trait TableSource {
    /// Load the whole table. Errors are returned, never swallowed:
    /// the caller decides whether to exit, retry, or report.
    fn load(&self) -> Result<Table>;
}

// ─── Persistable ──────────────────────────────────────────────────────────────
/// Any component whose state can be saved and restored from disk.
///
/// Implementations:
///   - StandardScaler → per-column mean/std as JSON
pub trait Persistable: Sized {
    /// Save this component's state to the given path
    fn save(&self, path: &Path) -> Result<()>;

    /// Load a component's state from the given path
    fn load(path: &Path) -> Result<Self>;
}
