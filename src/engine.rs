//! ROI computation engine.
//!
//! The `engine` module turns a [`ParameterSet`] and a [`Scenario`] into
//! a [`CalculationResult`].  Scenario adjustments are applied to a local
//! copy of the inputs, then a fixed sequence of fourteen derived values
//! is evaluated in order, each producing one audit step.  Licence
//! pricing is delegated to an implementation of [`LicencePricing`], so
//! a custom price list can be swapped in.
//!
//! No rounding happens here; presentation code rounds for display.

use crate::error::ComputationFault;
use crate::models::{CalculationResult, CalculationStep, ParameterSet, Scenario, Unit};
use crate::pricing::{LicencePricing, PricingInfo, PricingTable};
use std::sync::Arc;
use tracing::{debug, warn};

/// Extra days per week of admin time assumed by the conservative scenario.
pub const CONSERVATIVE_ADMIN_TIME_PENALTY: f64 = 0.5;
const CONSERVATIVE_REDUCTION_FACTOR: f64 = 0.5;
const STRETCH_REDUCTION_FACTOR: f64 = 1.5;
/// Upper bound on the reported payback period.
pub const PAYBACK_CAP_MONTHS: f64 = 36.0;
const WORK_DAYS_PER_WEEK: f64 = 5.0;

/// Returns a copy of `params` with the scenario's multipliers applied.
pub fn adjust_for_scenario(params: &ParameterSet, scenario: Scenario) -> ParameterSet {
    let mut adjusted = params.clone();
    match scenario {
        Scenario::Conservative => {
            adjusted.admin_time_with_software += CONSERVATIVE_ADMIN_TIME_PENALTY;
            adjusted.reduction_in_msd_absence *= CONSERVATIVE_REDUCTION_FACTOR;
            adjusted.reduction_in_clinical_interventions *= CONSERVATIVE_REDUCTION_FACTOR;
        }
        Scenario::Expected => {}
        Scenario::Stretch => {
            adjusted.reduction_in_msd_absence *= STRETCH_REDUCTION_FACTOR;
            adjusted.reduction_in_clinical_interventions *= STRETCH_REDUCTION_FACTOR;
        }
    }
    adjusted
}

/// Audit trail that refuses non-finite values.
struct Trail {
    steps: Vec<CalculationStep>,
}

impl Trail {
    fn new() -> Self {
        Self {
            steps: Vec::with_capacity(14),
        }
    }

    fn record(
        &mut self,
        label: &'static str,
        formula: String,
        value: f64,
        unit: Unit,
    ) -> Result<f64, ComputationFault> {
        if !value.is_finite() {
            return Err(ComputationFault::InvalidNumericOperation { step: label, value });
        }
        self.steps.push(CalculationStep {
            label: label.to_string(),
            formula,
            value,
            unit,
        });
        Ok(value)
    }
}

/// The calculation engine bound to a pricing model.
#[derive(Clone)]
pub struct Engine {
    pricing: Arc<dyn LicencePricing>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Arc::new(PricingTable::standard().clone()))
    }
}

impl Engine {
    pub fn new(pricing: Arc<dyn LicencePricing>) -> Self {
        Self { pricing }
    }

    pub fn resolve_cost(&self, headcount: u32) -> PricingInfo {
        self.pricing.resolve_cost(headcount)
    }

    /// Computes one scenario.  Never fails: a computation fault yields
    /// an invalid, zeroed result carrying the fault message.
    pub fn compute(&self, params: &ParameterSet, scenario: Scenario) -> CalculationResult {
        match self.try_compute(params, scenario) {
            Ok(result) => result,
            Err(fault) => {
                warn!(%scenario, error = %fault, "ROI computation faulted");
                CalculationResult::failed(scenario, fault.to_string())
            }
        }
    }

    /// Computes one scenario, surfacing arithmetic faults to the caller.
    pub fn try_compute(
        &self,
        params: &ParameterSet,
        scenario: Scenario,
    ) -> Result<CalculationResult, ComputationFault> {
        let mut trail = Trail::new();

        if params.headcount == 0 {
            trail.record(
                "Zero headcount",
                "headcount = 0: no licence cost and no savings".to_string(),
                0.0,
                Unit::Users,
            )?;
            debug!(%scenario, "zero headcount, returning zeroed result");
            return Ok(CalculationResult {
                steps: trail.steps,
                ..CalculationResult::zeroed(scenario)
            });
        }

        let p = adjust_for_scenario(params, scenario);
        let headcount = f64::from(p.headcount);

        let on_cost_multiplier = trail.record(
            "On-cost multiplier",
            format!("1 + {} / 100", p.admin_on_cost_percentage),
            1.0 + p.admin_on_cost_percentage / 100.0,
            Unit::Multiplier,
        )?;
        let dse_user_count = trail.record(
            "DSE users",
            format!("{headcount} × {} / 100", p.dse_user_percentage),
            headcount * p.dse_user_percentage / 100.0,
            Unit::Users,
        )?;
        let admin_cost_now = trail.record(
            "Admin cost now",
            format!(
                "{} × {on_cost_multiplier} × ({} / {WORK_DAYS_PER_WEEK})",
                p.admin_salary, p.admin_time_now
            ),
            p.admin_salary * on_cost_multiplier * (p.admin_time_now / WORK_DAYS_PER_WEEK),
            Unit::Currency,
        )?;
        let admin_cost_with_software = trail.record(
            "Admin cost with software",
            format!(
                "{} × {on_cost_multiplier} × ({} / {WORK_DAYS_PER_WEEK})",
                p.admin_salary, p.admin_time_with_software
            ),
            p.admin_salary * on_cost_multiplier * (p.admin_time_with_software / WORK_DAYS_PER_WEEK),
            Unit::Currency,
        )?;
        let admin_saving = trail.record(
            "Admin saving",
            format!("{admin_cost_now} − {admin_cost_with_software}"),
            admin_cost_now - admin_cost_with_software,
            Unit::Currency,
        )?;

        let pricing = self.pricing.resolve_cost(p.headcount);
        let licence_cost = trail.record(
            "Licence cost",
            format!("{} tier price for {} users", pricing.tier_label, p.headcount),
            pricing.annual_price,
            Unit::Currency,
        )?;

        let msd_absence_baseline_days = trail.record(
            "MSD absence baseline",
            format!(
                "{dse_user_count} × {} / 100 × {} × {} / 100",
                p.baseline_absence_rate, p.work_days_per_year, p.absence_due_to_msd_percentage
            ),
            dse_user_count * p.baseline_absence_rate / 100.0
                * f64::from(p.work_days_per_year)
                * p.absence_due_to_msd_percentage
                / 100.0,
            Unit::Days,
        )?;
        let absence_saving = trail.record(
            "Absence saving",
            format!(
                "{msd_absence_baseline_days} × {} × {} / 100",
                p.cost_per_absence_day, p.reduction_in_msd_absence
            ),
            msd_absence_baseline_days * p.cost_per_absence_day * p.reduction_in_msd_absence / 100.0,
            Unit::Currency,
        )?;
        let intervention_saving = trail.record(
            "Intervention saving",
            format!(
                "{dse_user_count} × {} / 100 × {} / 100 × {} × {} / 100",
                p.msd_prevalence,
                p.reduction_in_clinical_interventions,
                p.cost_per_clinical_intervention,
                p.msd_needing_intervention_percentage
            ),
            dse_user_count * p.msd_prevalence / 100.0 * p.reduction_in_clinical_interventions
                / 100.0
                * p.cost_per_clinical_intervention
                * p.msd_needing_intervention_percentage
                / 100.0,
            Unit::Currency,
        )?;

        let total_annual_savings = trail.record(
            "Total annual savings",
            format!("{admin_saving} + {absence_saving} + {intervention_saving}"),
            admin_saving + absence_saving + intervention_saving,
            Unit::Currency,
        )?;
        let net_benefit = trail.record(
            "Net benefit",
            format!("{total_annual_savings} − {licence_cost}"),
            total_annual_savings - licence_cost,
            Unit::Currency,
        )?;
        let roi_percentage = if licence_cost > 0.0 {
            trail.record(
                "ROI",
                format!("{net_benefit} / {licence_cost} × 100"),
                net_benefit / licence_cost * 100.0,
                Unit::Percent,
            )?
        } else {
            trail.record("ROI", "no licence cost".to_string(), 0.0, Unit::Percent)?
        };
        let payback_months = trail.record(
            "Payback period",
            format!(
                "min({PAYBACK_CAP_MONTHS}, 12 × {licence_cost} / max({total_annual_savings}, 1))"
            ),
            PAYBACK_CAP_MONTHS.min(12.0 * licence_cost / total_annual_savings.max(1.0)),
            Unit::Months,
        )?;

        // Savings per DSE user are undefined without DSE users.
        let breakeven = if total_annual_savings > 0.0 && dse_user_count > 0.0 {
            (licence_cost / (total_annual_savings / dse_user_count)).ceil()
        } else {
            0.0
        };
        let breakeven = trail.record(
            "Breakeven users",
            format!("ceil({licence_cost} / ({total_annual_savings} / {dse_user_count}))"),
            breakeven,
            Unit::Users,
        )?;

        let result = CalculationResult {
            scenario,
            is_valid: true,
            validation_errors: Vec::new(),
            tier_label: Some(pricing.tier_label),
            dse_user_count,
            admin_cost_now,
            admin_cost_with_software,
            admin_saving,
            licence_cost,
            msd_absence_baseline_days,
            absence_saving,
            intervention_saving,
            total_annual_savings,
            net_benefit,
            roi_percentage,
            payback_months,
            breakeven_users: breakeven as u64,
            steps: trail.steps,
        };
        debug!(
            %scenario,
            headcount = p.headcount,
            roi = result.roi_percentage,
            payback = result.payback_months,
            "computed ROI"
        );
        Ok(result)
    }
}
