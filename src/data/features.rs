// ============================================================
// Layer 4 — Feature Synthesizer
// ============================================================
// Appends three derived columns computed row by row:
//
//   Soil Quality Index          = (Soil pH * Nitrogen) / 10
//   Temp-Humidity Ratio         = Temperature / Humidity
//   Rainfall-Adjusted Nutrients = Rainfall / (N + P + K + 1)
//
// There is no guard against division by zero: a row with
// Humidity == 0 produces inf (or NaN for 0/0) and that value
// flows on into scaling and training. We only log a warning.

use anyhow::Result;

use crate::domain::schema::{
    HUMIDITY, NITROGEN, PHOSPHORUS, POTASSIUM, RAINFALL, RAINFALL_ADJUSTED_NUTRIENTS,
    SOIL_PH, SOIL_QUALITY_INDEX, TEMPERATURE, TEMP_HUMIDITY_RATIO,
};
use crate::domain::table::{Column, Table};

pub fn soil_quality_index(soil_ph: f64, nitrogen: f64) -> f64 {
    (soil_ph * nitrogen) / 10.0
}

pub fn temp_humidity_ratio(temperature: f64, humidity: f64) -> f64 {
    temperature / humidity
}

pub fn rainfall_adjusted_nutrients(
    rainfall:   f64,
    nitrogen:   f64,
    phosphorus: f64,
    potassium:  f64,
) -> f64 {
    rainfall / (nitrogen + phosphorus + potassium + 1.0)
}

/// Compute the derived columns and append them to the table.
pub fn add_derived_features(table: &mut Table) -> Result<()> {
    let soil_ph     = table.numeric(SOIL_PH)?;
    let nitrogen    = table.numeric(NITROGEN)?;
    let phosphorus  = table.numeric(PHOSPHORUS)?;
    let potassium   = table.numeric(POTASSIUM)?;
    let temperature = table.numeric(TEMPERATURE)?;
    let humidity    = table.numeric(HUMIDITY)?;
    let rainfall    = table.numeric(RAINFALL)?;

    let sqi: Vec<f64> = soil_ph
        .iter()
        .zip(nitrogen)
        .map(|(&ph, &n)| soil_quality_index(ph, n))
        .collect();

    let thr: Vec<f64> = temperature
        .iter()
        .zip(humidity)
        .map(|(&t, &h)| temp_humidity_ratio(t, h))
        .collect();

    let ran: Vec<f64> = (0..table.row_count())
        .map(|i| rainfall_adjusted_nutrients(rainfall[i], nitrogen[i], phosphorus[i], potassium[i]))
        .collect();

    for (name, values) in [
        (SOIL_QUALITY_INDEX, &sqi),
        (TEMP_HUMIDITY_RATIO, &thr),
        (RAINFALL_ADJUSTED_NUTRIENTS, &ran),
    ] {
        let bad = values.iter().filter(|v| !v.is_finite()).count();
        if bad > 0 {
            tracing::warn!("'{}' has {} non-finite values", name, bad);
        }
    }

    table.push_column(Column::numeric(SOIL_QUALITY_INDEX, sqi))?;
    table.push_column(Column::numeric(TEMP_HUMIDITY_RATIO, thr))?;
    table.push_column(Column::numeric(RAINFALL_ADJUSTED_NUTRIENTS, ran))?;
    Ok(())
}
