pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::session::FormSession;
pub use config::cli::{LocalStorage, StdoutNotifier};
pub use config::toml_config::TomlConfig;
pub use crate::core::{calculation::recompute, estimator::CostEstimator};
pub use domain::model::{DerivedOutput, Estimate, EstimateInput, InputField, Mode};
pub use utils::error::{EstimatorError, Result};
