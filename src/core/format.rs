use crate::domain::model::{DerivedOutput, Mode};
use std::fmt;

const MAX_FRACTION_DIGITS: usize = 3;

/// Magnitude from which plain numbers switch to exponent notation.
const EXPONENT_UPPER: f64 = 1e21;
/// Non-zero magnitudes below this also use exponent notation.
const EXPONENT_LOWER: f64 = 1e-6;

/// `abs` to `decimals` fraction digits, exact ties rounded away from zero.
///
/// `abs` is a finite, non-negative value. A tie at `decimals` digits means
/// `abs * 2^(decimals + 1)` is an odd integer; the power-of-two scaling is exact.
fn fixed_half_away(abs: f64, decimals: usize) -> String {
    let scaled = abs * 2f64.powi(decimals as i32 + 1);
    let is_tie = scaled.fract() == 0.0 && scaled % 2.0 == 1.0;

    if is_tie {
        // 下一個可表示的值已越過中點，std 格式化會向上進位
        format!("{:.*}", decimals, f64::from_bits(abs.to_bits() + 1))
    } else {
        format!("{:.*}", decimals, abs)
    }
}

/// Formats a currency-like amount with `,` thousands separators and at most
/// three fraction digits, trailing zeros dropped (`1400000000` → `1,400,000,000`).
pub fn format_grouped(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let fixed = fixed_half_away(value.abs(), MAX_FRACTION_DIGITS);
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(fixed.len() + fixed.len() / 3 + 1);
    if value < 0.0 {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Plain number without grouping, shortest representation (`240`, `12.5`).
///
/// Magnitudes of at least `1e21` or below `1e-6` use exponent notation
/// (`1e+21`, `1.5e-7`).
pub fn format_plain(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let abs = value.abs();
    if abs >= EXPONENT_UPPER || (abs != 0.0 && abs < EXPONENT_LOWER) {
        let scientific = format!("{:e}", value);
        return match scientific.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => scientific,
        };
    }

    // -0 顯示成 0
    format!("{}", value + 0.0)
}

/// Rounds to `decimals` places and prints the result without trailing zeros.
pub fn format_rounded(value: f64, decimals: usize) -> String {
    if !value.is_finite() || value.abs() >= EXPONENT_UPPER {
        return format_plain(value);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let fixed = format!("{}{}", sign, fixed_half_away(value.abs(), decimals));
    let trimmed = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed.as_str()
    };

    match trimmed {
        "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Duration in months and years, both rounded to 2 decimals.
pub fn format_duration(months: f64) -> String {
    format!(
        "{} Month ({} Years)",
        format_rounded(months, 2),
        format_rounded(months / 12.0, 2)
    )
}

/// Read-only view of the derived values, rendered the way the form shows them.
pub struct Summary<'a> {
    pub mode: Mode,
    pub output: &'a DerivedOutput,
}

impl<'a> Summary<'a> {
    pub fn new(mode: Mode, output: &'a DerivedOutput) -> Self {
        Self { mode, output }
    }

    pub fn lines(&self) -> Vec<String> {
        let out = self.output;
        let mut lines = vec![
            format!("Land Area: {} m²", format_plain(out.land_area)),
            format!("Building Area: {} m²", format_plain(out.building_area)),
            format!(
                "Total Cost: {} + {} = {}",
                format_grouped(out.land_cost),
                format_grouped(out.building_cost),
                format_grouped(out.total_cost)
            ),
        ];

        match self.mode {
            Mode::ByTargetDuration => lines.push(format!(
                "Installment Per Month: {}",
                format_grouped(out.monthly_instalment)
            )),
            Mode::ByTargetMonthlyInstalment => {
                lines.push(format!("Duration: {}", format_duration(out.duration)))
            }
        }

        lines
    }
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
