// ============================================================
// Layer 3 — Dataset Schema
// ============================================================
// Column names the pipeline relies on. The raw CSV uses
// `Soil_pH`; it is renamed to `Soil pH` straight after loading
// so every later stage sees one consistent name.

/// Column name as it appears in the raw CSV
pub const RAW_SOIL_PH: &str = "Soil_pH";

pub const SOIL_PH:     &str = "Soil pH";
pub const NITROGEN:    &str = "Nitrogen";
pub const PHOSPHORUS:  &str = "Phosphorus";
pub const POTASSIUM:   &str = "Potassium";
pub const TEMPERATURE: &str = "Temperature";
pub const HUMIDITY:    &str = "Humidity";
pub const RAINFALL:    &str = "Rainfall";

/// Categorical columns, label-encoded before anything else touches them
pub const CROP:   &str = "Crop";
pub const REGION: &str = "Region";

/// Regression target
pub const YIELD: &str = "Yield";

// Derived columns, appended in this order
pub const SOIL_QUALITY_INDEX:          &str = "Soil Quality Index";
pub const TEMP_HUMIDITY_RATIO:         &str = "Temp-Humidity Ratio";
pub const RAINFALL_ADJUSTED_NUTRIENTS: &str = "Rainfall-Adjusted Nutrients";

/// Renames applied right after loading: (from, to)
pub const COLUMN_RENAMES: &[(&str, &str)] = &[(RAW_SOIL_PH, SOIL_PH)];

/// Columns passed through the label encoder
pub const CATEGORICAL_COLUMNS: &[&str] = &[CROP, REGION];
