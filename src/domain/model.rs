use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The form's input record. Field names serialize in the form's camelCase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateInput {
    pub width: f64,
    pub height: f64,
    pub land_cost_per_meter_squared: f64,
    pub building_portion: f64,
    pub building_cost_per_meter_squared: f64,
    pub num_floors: f64,
    pub target_month_duration: f64,
    pub target_monthly_instalment: f64,
}

impl Default for EstimateInput {
    fn default() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            land_cost_per_meter_squared: 0.0,
            building_portion: 0.6,
            building_cost_per_meter_squared: 5_000_000.0,
            num_floors: 1.0,
            target_month_duration: 0.0,
            target_monthly_instalment: 0.0,
        }
    }
}

impl EstimateInput {
    pub fn get(&self, field: InputField) -> f64 {
        match field {
            InputField::Width => self.width,
            InputField::Height => self.height,
            InputField::LandCostPerMeterSquared => self.land_cost_per_meter_squared,
            InputField::BuildingPortion => self.building_portion,
            InputField::BuildingCostPerMeterSquared => self.building_cost_per_meter_squared,
            InputField::NumFloors => self.num_floors,
            InputField::TargetMonthDuration => self.target_month_duration,
            InputField::TargetMonthlyInstalment => self.target_monthly_instalment,
        }
    }

    pub fn set(&mut self, field: InputField, value: f64) {
        let slot = match field {
            InputField::Width => &mut self.width,
            InputField::Height => &mut self.height,
            InputField::LandCostPerMeterSquared => &mut self.land_cost_per_meter_squared,
            InputField::BuildingPortion => &mut self.building_portion,
            InputField::BuildingCostPerMeterSquared => &mut self.building_cost_per_meter_squared,
            InputField::NumFloors => &mut self.num_floors,
            InputField::TargetMonthDuration => &mut self.target_month_duration,
            InputField::TargetMonthlyInstalment => &mut self.target_monthly_instalment,
        };
        *slot = value;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InputField {
    Width,
    Height,
    LandCostPerMeterSquared,
    BuildingPortion,
    BuildingCostPerMeterSquared,
    NumFloors,
    TargetMonthDuration,
    TargetMonthlyInstalment,
}

impl InputField {
    pub const ALL: [InputField; 8] = [
        InputField::Width,
        InputField::Height,
        InputField::LandCostPerMeterSquared,
        InputField::BuildingPortion,
        InputField::BuildingCostPerMeterSquared,
        InputField::NumFloors,
        InputField::TargetMonthDuration,
        InputField::TargetMonthlyInstalment,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            InputField::Width => "width",
            InputField::Height => "height",
            InputField::LandCostPerMeterSquared => "landCostPerMeterSquared",
            InputField::BuildingPortion => "buildingPortion",
            InputField::BuildingCostPerMeterSquared => "buildingCostPerMeterSquared",
            InputField::NumFloors => "numFloors",
            InputField::TargetMonthDuration => "targetMonthDuration",
            InputField::TargetMonthlyInstalment => "targetMonthlyInstalment",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            InputField::Width => "Width (m)",
            InputField::Height => "Height (m)",
            InputField::LandCostPerMeterSquared => "Land Cost/m²",
            InputField::BuildingPortion => "Building Portion",
            InputField::BuildingCostPerMeterSquared => "Building Cost/m²",
            InputField::NumFloors => "Number of Floors",
            InputField::TargetMonthDuration => "Target Duration (month)",
            InputField::TargetMonthlyInstalment => "Target Monthly Installment",
        }
    }
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InputField {
    type Err = crate::utils::error::EstimatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // camelCase、snake_case 與 kebab-case 都接受
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();

        InputField::ALL
            .into_iter()
            .find(|field| field.name().to_ascii_lowercase() == normalized)
            .ok_or_else(|| crate::utils::error::EstimatorError::UnknownField {
                name: s.trim().to_string(),
            })
    }
}

/// Which target quantity the user supplies; the other one is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    ByTargetDuration,
    ByTargetMonthlyInstalment,
}

impl Mode {
    /// The target field the user edits in this mode.
    pub fn free_field(&self) -> InputField {
        match self {
            Mode::ByTargetDuration => InputField::TargetMonthDuration,
            Mode::ByTargetMonthlyInstalment => InputField::TargetMonthlyInstalment,
        }
    }

    /// The target field computed from the others in this mode.
    pub fn derived_field(&self) -> InputField {
        self.other().free_field()
    }

    pub fn other(&self) -> Mode {
        match self {
            Mode::ByTargetDuration => Mode::ByTargetMonthlyInstalment,
            Mode::ByTargetMonthlyInstalment => Mode::ByTargetDuration,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mode::ByTargetDuration => "By Target Duration",
            Mode::ByTargetMonthlyInstalment => "By Target Monthly Instalment",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Mode {
    type Err = crate::utils::error::EstimatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "1" | "duration" | "by-target-duration" | "bytargetduration" => {
                Ok(Mode::ByTargetDuration)
            }
            "2"
            | "instalment"
            | "installment"
            | "by-target-monthly-instalment"
            | "by-target-monthly-installment"
            | "bytargetmonthlyinstalment" => Ok(Mode::ByTargetMonthlyInstalment),
            _ => Err(crate::utils::error::EstimatorError::UnknownMode {
                value: s.trim().to_string(),
            }),
        }
    }
}

/// Values computed from an [`EstimateInput`]. Never stored on their own.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedOutput {
    pub land_area: f64,
    pub land_cost: f64,
    pub building_area: f64,
    pub building_cost: f64,
    pub total_cost: f64,
    pub monthly_instalment: f64,
    pub duration: f64,
}

/// Snapshot of the whole form: what the user entered and what it implies.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Estimate {
    pub mode: Mode,
    pub input: EstimateInput,
    pub output: DerivedOutput,
}
