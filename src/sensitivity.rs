//! One-at-a-time sensitivity analysis.
//!
//! Each requested field is shifted by a set of percentage offsets of its
//! baseline while every other input stays fixed, and the expected
//! scenario is recomputed per offset.  Sweeps for different fields are
//! independent, so they run in parallel with [`rayon`].

use crate::engine::Engine;
use crate::fields::Field;
use crate::models::{ParameterSet, Scenario, SensitivityCurve, SensitivityPoint};
use rayon::prelude::*;
use tracing::debug;

/// Offsets, in percent of the baseline value, used when none are given.
pub const DEFAULT_VARIATIONS: [f64; 7] = [-30.0, -20.0, -10.0, 0.0, 10.0, 20.0, 30.0];

/// Inputs swept when the caller does not pick any.
pub const DEFAULT_FIELDS: [Field; 5] = [
    Field::AdminSalary,
    Field::AdminTimeNow,
    Field::CostPerAbsenceDay,
    Field::ReductionInMsdAbsence,
    Field::MsdPrevalence,
];

/// Copy of `params` with `field` moved by `variation` percent of its
/// current value.
pub fn perturb(params: &ParameterSet, field: Field, variation: f64) -> ParameterSet {
    let mut modified = params.clone();
    let baseline = field.get(params);
    field.set(&mut modified, baseline + baseline * variation / 100.0);
    modified
}

impl Engine {
    /// Sweeps each of `fields` over `variations`, returning one curve per
    /// field in the order requested.
    pub fn analyze(
        &self,
        params: &ParameterSet,
        fields: &[Field],
        variations: &[f64],
    ) -> Vec<SensitivityCurve> {
        debug!(
            fields = fields.len(),
            variations = variations.len(),
            "running sensitivity sweep"
        );
        fields
            .par_iter()
            .map(|&field| self.sweep(params, field, variations))
            .collect()
    }

    fn sweep(&self, params: &ParameterSet, field: Field, variations: &[f64]) -> SensitivityCurve {
        let points = variations
            .iter()
            .map(|&variation| {
                let modified = perturb(params, field, variation);
                let result = self.compute(&modified, Scenario::Expected);
                SensitivityPoint {
                    variation,
                    value: field.get(&modified),
                    roi_percentage: result.roi_percentage,
                    payback_months: result.payback_months,
                    net_benefit: result.net_benefit,
                }
            })
            .collect();
        SensitivityCurve {
            field,
            baseline: field.get(params),
            unit: field.unit(),
            points,
        }
    }
}
