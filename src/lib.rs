//! ROI Engine library crate.
//!
//! This crate computes return-on-investment projections for adopting
//! workplace ergonomics software.  External applications may call the
//! crate-level functions below, which use the standard price list, or
//! build an [`Engine`] around a custom [`LicencePricing`] model.

pub mod config;
pub mod engine;
pub mod error;
pub mod fields;
pub mod models;
pub mod presets;
pub mod pricing;
pub mod scenario;
pub mod sensitivity;
pub mod validation;

pub use engine::Engine;
pub use error::{ComputationFault, ConfigError, FieldError};
pub use fields::Field;
pub use models::{
    CalculationResult, CalculationStep, Currency, ParameterSet, Scenario, ScenarioTriple,
    SensitivityCurve, SensitivityPoint, Unit,
};
pub use pricing::{LicencePricing, PricingInfo, PricingTable};
pub use validation::{advisories, validate, Advisory, ValidationOutcome};

use once_cell::sync::Lazy;

static DEFAULT_ENGINE: Lazy<Engine> = Lazy::new(Engine::default);

/// Licence price for `headcount` from the standard table.
pub fn resolve_cost(headcount: u32) -> PricingInfo {
    DEFAULT_ENGINE.resolve_cost(headcount)
}

/// One scenario computed against the standard table.
pub fn compute(params: &ParameterSet, scenario: Scenario) -> CalculationResult {
    DEFAULT_ENGINE.compute(params, scenario)
}

/// All three scenarios computed against the standard table.
pub fn compute_all(params: &ParameterSet) -> ScenarioTriple {
    DEFAULT_ENGINE.compute_all(params)
}

/// Sensitivity sweep of the expected scenario.  `fields` defaults to
/// [`sensitivity::DEFAULT_FIELDS`] and `variations` to
/// [`sensitivity::DEFAULT_VARIATIONS`].
pub fn analyze(
    params: &ParameterSet,
    fields: Option<&[Field]>,
    variations: Option<&[f64]>,
) -> Vec<SensitivityCurve> {
    DEFAULT_ENGINE.analyze(
        params,
        fields.unwrap_or(&sensitivity::DEFAULT_FIELDS),
        variations.unwrap_or(&sensitivity::DEFAULT_VARIATIONS),
    )
}
