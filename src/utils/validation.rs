use crate::domain::model::{EstimateInput, InputField};
use crate::utils::error::{EstimatorError, Result};
use serde::Serialize;
use std::fmt;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 表單輸入層的數字解析：空白或無法解析的文字一律視為 0。
///
/// 允許千分位逗號 (`1,000,000`)，與畫面上的顯示格式一致。
pub fn parse_lenient(raw: &str) -> f64 {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return 0.0;
    }

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => {
            tracing::debug!("Treating unparseable input {:?} as 0", raw);
            0.0
        }
    }
}

pub fn validate_finite(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(EstimatorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be a finite number".to_string(),
        });
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(EstimatorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(EstimatorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_range<T: PartialOrd + fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(EstimatorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Advisory finding about an input value. Never blocks the calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputWarning {
    pub field: InputField,
    pub value: f64,
    pub reason: String,
}

impl fmt::Display for InputWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}: {}", self.field, self.value, self.reason)
    }
}

pub fn check_inputs(input: &EstimateInput) -> Vec<InputWarning> {
    let mut warnings = Vec::new();

    let non_negative = [
        InputField::Width,
        InputField::Height,
        InputField::LandCostPerMeterSquared,
        InputField::BuildingCostPerMeterSquared,
        InputField::TargetMonthDuration,
        InputField::TargetMonthlyInstalment,
    ];
    for field in non_negative {
        let value = input.get(field);
        if value < 0.0 {
            warnings.push(InputWarning {
                field,
                value,
                reason: "expected a non-negative value".to_string(),
            });
        }
    }

    if validate_range("buildingPortion", input.building_portion, 0.0, 1.0).is_err() {
        warnings.push(InputWarning {
            field: InputField::BuildingPortion,
            value: input.building_portion,
            reason: "expected a fraction between 0 and 1".to_string(),
        });
    }

    if input.num_floors <= 0.0 {
        warnings.push(InputWarning {
            field: InputField::NumFloors,
            value: input.num_floors,
            reason: "expected at least one floor".to_string(),
        });
    } else if input.num_floors.fract() != 0.0 {
        warnings.push(InputWarning {
            field: InputField::NumFloors,
            value: input.num_floors,
            reason: "expected a whole number of floors".to_string(),
        });
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lenient() {
        assert_eq!(parse_lenient("12.5"), 12.5);
        assert_eq!(parse_lenient("  40 "), 40.0);
        assert_eq!(parse_lenient("1,000,000"), 1_000_000.0);
        assert_eq!(parse_lenient("1e3"), 1000.0);
        assert_eq!(parse_lenient("-3"), -3.0);
        assert_eq!(parse_lenient(""), 0.0);
        assert_eq!(parse_lenient("   "), 0.0);
        assert_eq!(parse_lenient("abc"), 0.0);
        assert_eq!(parse_lenient("inf"), 0.0);
        assert_eq!(parse_lenient("NaN"), 0.0);
    }

    #[test]
    fn test_validate_finite() {
        assert!(validate_finite("land.width", 10.0).is_ok());
        assert!(validate_finite("land.width", f64::NAN).is_err());
        assert!(validate_finite("land.width", f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("export.output_path", "./output").is_ok());
        assert!(validate_path("export.output_path", "").is_err());
        assert!(validate_path("export.output_path", "a\0b").is_err());
    }

    #[test]
    fn test_default_inputs_have_no_warnings() {
        assert!(check_inputs(&EstimateInput::default()).is_empty());
    }

    #[test]
    fn test_check_inputs_flags_suspicious_values() {
        let input = EstimateInput {
            width: -1.0,
            building_portion: 1.5,
            num_floors: 0.0,
            ..EstimateInput::default()
        };

        let fields: Vec<InputField> = check_inputs(&input).iter().map(|w| w.field).collect();
        assert_eq!(
            fields,
            vec![
                InputField::Width,
                InputField::BuildingPortion,
                InputField::NumFloors
            ]
        );
    }

    #[test]
    fn test_fractional_floors_warn() {
        let input = EstimateInput {
            num_floors: 2.5,
            ..EstimateInput::default()
        };
        let warnings = check_inputs(&input);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].reason.contains("whole number"));
    }
}
