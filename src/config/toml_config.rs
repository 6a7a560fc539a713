use crate::domain::model::{EstimateInput, InputField, Mode};
use crate::utils::error::{EstimatorError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Initial form values loaded from a TOML file. Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub estimator: EstimatorSection,
    pub land: LandConfig,
    pub building: BuildingConfig,
    pub target: TargetConfig,
    pub export: Option<ExportConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorSection {
    pub mode: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LandConfig {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub cost_per_meter_squared: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildingConfig {
    pub portion: Option<f64>,
    pub cost_per_meter_squared: Option<f64>,
    pub num_floors: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    pub month_duration: Option<f64>,
    pub monthly_instalment: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    pub output_path: String,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EstimatorError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EstimatorError::TomlError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${LAND_WIDTH})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EstimatorError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Mode from `[estimator]`, defaulting to by-target-duration.
    pub fn mode(&self) -> Result<Mode> {
        match &self.estimator.mode {
            Some(value) => value.parse(),
            None => Ok(Mode::default()),
        }
    }

    /// Form values with every missing key filled from the form defaults.
    pub fn initial_input(&self) -> EstimateInput {
        let mut input = EstimateInput::default();
        for (field, value) in self.entries() {
            if let Some(value) = value {
                input.set(field, value);
            }
        }
        input
    }

    pub fn output_path(&self) -> Option<&str> {
        self.export.as_ref().map(|e| e.output_path.as_str())
    }

    fn entries(&self) -> [(InputField, Option<f64>); 8] {
        [
            (InputField::Width, self.land.width),
            (InputField::Height, self.land.height),
            (InputField::LandCostPerMeterSquared, self.land.cost_per_meter_squared),
            (InputField::BuildingPortion, self.building.portion),
            (
                InputField::BuildingCostPerMeterSquared,
                self.building.cost_per_meter_squared,
            ),
            (InputField::NumFloors, self.building.num_floors),
            (InputField::TargetMonthDuration, self.target.month_duration),
            (InputField::TargetMonthlyInstalment, self.target.monthly_instalment),
        ]
    }

    fn key_for(field: InputField) -> &'static str {
        match field {
            InputField::Width => "land.width",
            InputField::Height => "land.height",
            InputField::LandCostPerMeterSquared => "land.cost_per_meter_squared",
            InputField::BuildingPortion => "building.portion",
            InputField::BuildingCostPerMeterSquared => "building.cost_per_meter_squared",
            InputField::NumFloors => "building.num_floors",
            InputField::TargetMonthDuration => "target.month_duration",
            InputField::TargetMonthlyInstalment => "target.monthly_instalment",
        }
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        for (field, value) in self.entries() {
            if let Some(value) = value {
                validation::validate_finite(Self::key_for(field), value)?;
            }
        }

        if let Some(mode) = &self.estimator.mode {
            mode.parse::<Mode>()
                .map_err(|_| EstimatorError::InvalidConfigValueError {
                    field: "estimator.mode".to_string(),
                    value: mode.clone(),
                    reason: "Expected 'duration' or 'instalment'".to_string(),
                })?;
        }

        if let Some(path) = self.output_path() {
            validation::validate_path("export.output_path", path)?;
        }

        Ok(())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
