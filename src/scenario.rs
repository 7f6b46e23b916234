//! Scenario aggregation: one input set, three results.

use crate::engine::Engine;
use crate::models::{ParameterSet, Scenario, ScenarioTriple};
use tracing::debug;

impl Engine {
    /// Runs the conservative, expected and stretch scenarios over the
    /// same borrowed input.
    pub fn compute_all(&self, params: &ParameterSet) -> ScenarioTriple {
        let triple = ScenarioTriple {
            conservative: self.compute(params, Scenario::Conservative),
            expected: self.compute(params, Scenario::Expected),
            stretch: self.compute(params, Scenario::Stretch),
        };
        debug!(
            conservative = triple.conservative.roi_percentage,
            expected = triple.expected.roi_percentage,
            stretch = triple.stretch.roi_percentage,
            "computed scenario triple"
        );
        triple
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CalculationResult;
    use proptest::prelude::{prop_assert, prop_assume, proptest};

    const TOLERANCE: f64 = 1e-6;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= TOLERANCE * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn triple_is_keyed_by_scenario() {
        let triple = Engine::default().compute_all(&ParameterSet::default());
        for scenario in Scenario::ALL {
            assert_eq!(triple.get(scenario).scenario, scenario);
        }
        assert_eq!(
            triple.expected,
            Engine::default().compute(&ParameterSet::default(), Scenario::Expected)
        );
    }

    #[test]
    fn invalid_input_invalidates_every_scenario() {
        let params = ParameterSet {
            admin_salary: f64::INFINITY,
            ..ParameterSet::default()
        };
        let triple = Engine::default().compute_all(&params);
        assert!(triple.iter().all(|r| !r.is_valid));
    }

    fn invariants_hold(result: &CalculationResult) -> bool {
        let additive = close(
            result.total_annual_savings,
            result.admin_saving + result.absence_saving + result.intervention_saving,
        );
        let net = close(result.net_benefit, result.total_annual_savings - result.licence_cost);
        let roi = result.licence_cost <= 0.0
            || close(result.roi_percentage, result.net_benefit / result.licence_cost * 100.0);
        additive && net && roi && result.payback_months <= 36.0
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_scenarios_are_ordered_and_consistent(
            headcount in 1u32..100_000,
            dse in 0u32..=100,
            salary in 0u32..250_000,
            on_cost in 0u32..=100,
            time_now_halves in 0u32..=10,
            time_sw_halves in 0u32..=10,
            absence_rate_tenths in 0u32..=200,
            work_days in 1u32..=366,
            msd_share in 0u32..=100,
            absence_day_cost in 0u32..5_000,
            prevalence in 0u32..=100,
            msd_reduction in 0u32..=100,
            intervention_reduction in 0u32..=100,
            intervention_cost in 0u32..10_000,
            needing_intervention in 0u32..=100,
        ) {
            let params = ParameterSet {
                headcount,
                dse_user_percentage: f64::from(dse),
                admin_salary: f64::from(salary),
                admin_on_cost_percentage: f64::from(on_cost),
                admin_time_now: f64::from(time_now_halves) / 2.0,
                admin_time_with_software: f64::from(time_sw_halves) / 2.0,
                baseline_absence_rate: f64::from(absence_rate_tenths) / 10.0,
                work_days_per_year: work_days,
                absence_due_to_msd_percentage: f64::from(msd_share),
                cost_per_absence_day: f64::from(absence_day_cost),
                msd_prevalence: f64::from(prevalence),
                reduction_in_msd_absence: f64::from(msd_reduction),
                reduction_in_clinical_interventions: f64::from(intervention_reduction),
                cost_per_clinical_intervention: f64::from(intervention_cost),
                msd_needing_intervention_percentage: f64::from(needing_intervention),
                ..ParameterSet::default()
            };
            let triple = Engine::default().compute_all(&params);
            prop_assume!(triple.expected.total_annual_savings > 0.0);

            for result in triple.iter() {
                prop_assert!(result.is_valid);
                prop_assert!(invariants_hold(result));
            }
            let slack = TOLERANCE * triple.stretch.net_benefit.abs().max(1.0);
            prop_assert!(triple.conservative.net_benefit <= triple.expected.net_benefit + slack);
            prop_assert!(triple.expected.net_benefit <= triple.stretch.net_benefit + slack);
            prop_assert!(
                triple.conservative.roi_percentage <= triple.expected.roi_percentage + slack
            );
            prop_assert!(triple.expected.roi_percentage <= triple.stretch.roi_percentage + slack);
        }
    }
}
