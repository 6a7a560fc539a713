use crate::core::calculation::{recompute, round_half_up};
use crate::domain::model::{DerivedOutput, Estimate, EstimateInput, InputField, Mode};
use crate::domain::ports::Notifier;
use crate::utils::error::{EstimatorError, Result};
use crate::utils::validation::parse_lenient;

/// Form state of the estimator: the input record plus the current mode.
///
/// Derived values are never cached; [`CostEstimator::output`] recomputes them
/// from the current input on every call.
#[derive(Debug, Clone, Default)]
pub struct CostEstimator {
    input: EstimateInput,
    mode: Mode,
}

impl CostEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(input: EstimateInput, mode: Mode) -> Self {
        Self { input, mode }
    }

    pub fn input(&self) -> &EstimateInput {
        &self.input
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn output(&self) -> DerivedOutput {
        recompute(&self.input)
    }

    pub fn estimate(&self) -> Estimate {
        Estimate {
            mode: self.mode,
            input: self.input,
            output: self.output(),
        }
    }

    pub fn is_editable(&self, field: InputField) -> bool {
        field != self.mode.derived_field()
    }

    /// Writes one input field. The target field derived by the current mode
    /// is read-only.
    pub fn set_field(&mut self, field: InputField, value: f64) -> Result<DerivedOutput> {
        if !self.is_editable(field) {
            return Err(EstimatorError::FieldNotEditable {
                field,
                mode: self.mode,
            });
        }

        self.input.set(field, value);
        tracing::debug!(field = %field, value, "Input updated");
        Ok(self.output())
    }

    /// Writes one field from raw form text; unparseable text counts as 0.
    pub fn set_raw_field(&mut self, field: InputField, raw: &str) -> Result<DerivedOutput> {
        self.set_field(field, parse_lenient(raw))
    }

    /// Switches mode, overwriting the newly derived target field with the
    /// value computed from the inputs as they were before the switch.
    pub fn set_mode(&mut self, mode: Mode) -> DerivedOutput {
        if mode == self.mode {
            return self.output();
        }

        let previous = self.output();
        match mode {
            Mode::ByTargetDuration => {
                self.input.target_month_duration = round_half_up(previous.duration);
            }
            Mode::ByTargetMonthlyInstalment => {
                self.input.target_monthly_instalment = previous.monthly_instalment;
            }
        }

        tracing::debug!(from = %self.mode, to = %mode, "Mode switched");
        self.mode = mode;
        self.output()
    }

    pub fn toggle_mode(&mut self) -> DerivedOutput {
        self.set_mode(self.mode.other())
    }

    /// Sends the current input record to `notifier` as pretty-printed JSON.
    pub fn submit<N: Notifier + ?Sized>(&self, notifier: &N) -> Result<String> {
        let body = serde_json::to_string_pretty(&self.input)?;
        notifier.notify("Submitted values", &body)?;
        tracing::info!("Form submitted");
        Ok(body)
    }
}
