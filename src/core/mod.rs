pub mod calculation;
pub mod estimator;
pub mod format;

pub use crate::domain::model::{DerivedOutput, Estimate, EstimateInput, InputField, Mode};
pub use crate::domain::ports::{Notifier, Storage};
pub use crate::utils::error::Result;
