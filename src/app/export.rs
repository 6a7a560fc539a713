use crate::core::{Estimate, Mode, Storage};
use crate::utils::error::{EstimatorError, Result};
use serde::Serialize;
use std::path::Path;

/// File written when the export target is a directory.
pub const DEFAULT_EXPORT_FILE: &str = "estimate.csv";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
    Json,
}

impl ExportFormat {
    pub fn from_path(path: &str) -> Result<Self> {
        let extension = Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("csv") => Ok(ExportFormat::Csv),
            Some("tsv") => Ok(ExportFormat::Tsv),
            Some("json") => Ok(ExportFormat::Json),
            other => Err(EstimatorError::ExportError {
                message: format!(
                    "Unsupported export extension {:?} for '{}'. Allowed extensions: csv, tsv, json",
                    other.unwrap_or(""),
                    path
                ),
            }),
        }
    }
}

/// One flat row: inputs, mode, then every derived value.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportRow {
    mode: Mode,
    width: f64,
    height: f64,
    land_cost_per_meter_squared: f64,
    building_portion: f64,
    building_cost_per_meter_squared: f64,
    num_floors: f64,
    target_month_duration: f64,
    target_monthly_instalment: f64,
    land_area: f64,
    land_cost: f64,
    building_area: f64,
    building_cost: f64,
    total_cost: f64,
    monthly_instalment: f64,
    duration: f64,
}

impl From<&Estimate> for ExportRow {
    fn from(estimate: &Estimate) -> Self {
        let input = &estimate.input;
        let output = &estimate.output;
        Self {
            mode: estimate.mode,
            width: input.width,
            height: input.height,
            land_cost_per_meter_squared: input.land_cost_per_meter_squared,
            building_portion: input.building_portion,
            building_cost_per_meter_squared: input.building_cost_per_meter_squared,
            num_floors: input.num_floors,
            target_month_duration: input.target_month_duration,
            target_monthly_instalment: input.target_monthly_instalment,
            land_area: output.land_area,
            land_cost: output.land_cost,
            building_area: output.building_area,
            building_cost: output.building_cost,
            total_cost: output.total_cost,
            monthly_instalment: output.monthly_instalment,
            duration: output.duration,
        }
    }
}

pub fn render(estimate: &Estimate, format: ExportFormat) -> Result<Vec<u8>> {
    match format {
        ExportFormat::Csv => render_delimited(estimate, b','),
        ExportFormat::Tsv => render_delimited(estimate, b'\t'),
        ExportFormat::Json => {
            let mut data = serde_json::to_vec_pretty(estimate)?;
            data.push(b'\n');
            Ok(data)
        }
    }
}

fn render_delimited(estimate: &Estimate, delimiter: u8) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());
    writer.serialize(ExportRow::from(estimate))?;

    writer.into_inner().map_err(|e| EstimatorError::ExportError {
        message: format!("Failed to flush export buffer: {}", e),
    })
}

/// A path without extension names a directory; the estimate goes to
/// [`DEFAULT_EXPORT_FILE`] inside it.
pub fn resolve_target(path: &str) -> String {
    let target = Path::new(path);
    if target.extension().is_some() {
        return path.to_string();
    }
    target.join(DEFAULT_EXPORT_FILE).to_string_lossy().into_owned()
}

/// Writes `estimate` to `path` through `storage`, format chosen by extension.
pub fn export_estimate<S: Storage + ?Sized>(
    storage: &S,
    path: &str,
    estimate: &Estimate,
) -> Result<String> {
    let target = resolve_target(path);
    let format = ExportFormat::from_path(&target)?;
    let data = render(estimate, format)?;
    let written = storage.write_file(&target, &data)?;
    tracing::info!("💾 Estimate exported as {:?} to {}", format, written);
    Ok(written)
}
