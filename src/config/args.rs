use super::toml_config::TomlConfig;
use crate::core::estimator::CostEstimator;
use crate::domain::model::{InputField, Mode};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "land-cost")]
#[command(about = "Estimate land and building cost, monthly instalment and duration")]
pub struct CliConfig {
    /// Path to a TOML file with initial values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Initial mode: duration (1) or instalment (2)
    #[arg(short, long)]
    pub mode: Option<Mode>,

    /// Land width in meters
    #[arg(long)]
    pub width: Option<f64>,

    /// Land height in meters
    #[arg(long)]
    pub height: Option<f64>,

    /// Land cost per square meter
    #[arg(long = "land-cost")]
    pub land_cost_per_meter_squared: Option<f64>,

    /// Fraction of the land used by the building footprint
    #[arg(long)]
    pub building_portion: Option<f64>,

    /// Building cost per square meter
    #[arg(long = "building-cost")]
    pub building_cost_per_meter_squared: Option<f64>,

    /// Number of floors
    #[arg(long)]
    pub num_floors: Option<f64>,

    /// Target duration in months
    #[arg(long = "target-duration")]
    pub target_month_duration: Option<f64>,

    /// Target monthly instalment
    #[arg(long = "target-instalment")]
    pub target_monthly_instalment: Option<f64>,

    /// Switch to this mode after loading the inputs
    #[arg(long)]
    pub switch_mode: Option<Mode>,

    /// Run the interactive form on stdin
    #[arg(short, long)]
    pub interactive: bool,

    /// Print the estimate as JSON
    #[arg(long)]
    pub json: bool,

    /// Write the estimate to a .csv, .tsv or .json file
    #[arg(long)]
    pub export: Option<String>,

    /// Print the submitted input record
    #[arg(long)]
    pub submit: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long)]
    pub log_json: bool,
}

impl CliConfig {
    fn overrides(&self) -> [(InputField, Option<f64>); 8] {
        [
            (InputField::Width, self.width),
            (InputField::Height, self.height),
            (InputField::LandCostPerMeterSquared, self.land_cost_per_meter_squared),
            (InputField::BuildingPortion, self.building_portion),
            (
                InputField::BuildingCostPerMeterSquared,
                self.building_cost_per_meter_squared,
            ),
            (InputField::NumFloors, self.num_floors),
            (InputField::TargetMonthDuration, self.target_month_duration),
            (InputField::TargetMonthlyInstalment, self.target_monthly_instalment),
        ]
    }

    pub fn load_file_config(&self) -> Result<TomlConfig> {
        match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path.display());
                let config = TomlConfig::from_file(path)?;
                config.validate()?;
                Ok(config)
            }
            None => Ok(TomlConfig::default()),
        }
    }

    /// Builds the starting form state: defaults, then the file, then flags.
    pub fn build_estimator(&self, file_config: &TomlConfig) -> Result<CostEstimator> {
        let mut input = file_config.initial_input();
        for (field, value) in self.overrides() {
            if let Some(value) = value {
                tracing::debug!("🔧 {} overridden to {}", field, value);
                input.set(field, value);
            }
        }

        let mode = match self.mode {
            Some(mode) => mode,
            None => file_config.mode()?,
        };

        let mut estimator = CostEstimator::with_input(input, mode);
        if let Some(target) = self.switch_mode {
            estimator.set_mode(target);
        }
        Ok(estimator)
    }

    /// Export path from the flag, falling back to `[export] output_path`.
    pub fn export_path<'a>(&'a self, file_config: &'a TomlConfig) -> Option<&'a str> {
        self.export.as_deref().or_else(|| file_config.output_path())
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        for (field, value) in self.overrides() {
            if let Some(value) = value {
                validation::validate_finite(field.name(), value)?;
            }
        }

        if let Some(path) = &self.export {
            validation::validate_path("export", path)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_file_values() {
        let cli = CliConfig::parse_from([
            "land-cost",
            "--width",
            "10",
            "--num-floors",
            "2",
            "--mode",
            "instalment",
        ]);
        let file = TomlConfig::from_toml_str("[land]\nwidth = 5\nheight = 20\n").unwrap();

        let estimator = cli.build_estimator(&file).unwrap();

        assert_eq!(estimator.input().width, 10.0);
        assert_eq!(estimator.input().height, 20.0);
        assert_eq!(estimator.input().num_floors, 2.0);
        assert_eq!(estimator.mode(), Mode::ByTargetMonthlyInstalment);
    }

    #[test]
    fn test_switch_mode_applies_transition() {
        let cli = CliConfig::parse_from([
            "land-cost",
            "--width",
            "10",
            "--height",
            "20",
            "--land-cost",
            "1000000",
            "--num-floors",
            "2",
            "--target-duration",
            "12",
            "--switch-mode",
            "2",
        ]);

        let estimator = cli.build_estimator(&TomlConfig::default()).unwrap();

        assert_eq!(estimator.mode(), Mode::ByTargetMonthlyInstalment);
        let expected = 1_400_000_000.0 / 12.0;
        assert!((estimator.input().target_monthly_instalment - expected).abs() < 1e-6);
    }

    #[test]
    fn test_validate_rejects_non_finite_override() {
        let cli = CliConfig::parse_from(["land-cost", "--width", "inf"]);
        assert!(cli.validate().is_err());

        let cli = CliConfig::parse_from(["land-cost", "--width", "3"]);
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_export_path_prefers_flag() {
        let file = TomlConfig::from_toml_str("[export]\noutput_path = \"from-file.json\"\n").unwrap();

        let cli = CliConfig::parse_from(["land-cost"]);
        assert_eq!(cli.export_path(&file), Some("from-file.json"));

        let cli = CliConfig::parse_from(["land-cost", "--export", "flag.csv"]);
        assert_eq!(cli.export_path(&file), Some("flag.csv"));
    }
}
