//! Data models for the ROI Engine.
//!
//! The `models` module defines the serialisable structs and enums that
//! flow through the engine: the [`ParameterSet`] describing a prospect,
//! the [`Scenario`] profiles, and the itemised [`CalculationResult`],
//! [`ScenarioTriple`] and [`SensitivityCurve`] outputs.  Every type
//! derives `Serialize` and `Deserialize` so that a presentation layer
//! can exchange them as JSON without further mapping.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Currency used purely for display by callers.  The engine never
/// converts between currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Eur,
    #[default]
    Gbp,
    Usd,
}

impl Currency {
    pub const ALL: [Currency; 3] = [Currency::Eur, Currency::Gbp, Currency::Usd];

    /// ISO 4217 code.
    pub fn code(self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Usd => "USD",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Eur => "€",
            Currency::Gbp => "£",
            Currency::Usd => "$",
        }
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("must be one of EUR, GBP, USD (got '{s}')"))
    }
}

/// The three fixed multiplier profiles applied to one input set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    /// Software-assisted admin time is half a day per week worse and
    /// absence/intervention reductions are halved.
    Conservative,
    /// Inputs are used unchanged.
    #[default]
    Expected,
    /// Absence/intervention reductions are scaled by one and a half.
    Stretch,
}

impl Scenario {
    pub const ALL: [Scenario; 3] = [
        Scenario::Conservative,
        Scenario::Expected,
        Scenario::Stretch,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Scenario::Conservative => "conservative",
            Scenario::Expected => "expected",
            Scenario::Stretch => "stretch",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unit attached to an input field or an audit step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Currency,
    Percent,
    Days,
    DaysPerWeek,
    Users,
    Months,
    Multiplier,
}

/// Description of a prospect's current compliance process.
///
/// All fields are plain numbers; range checking happens in
/// [`crate::validation`] and the engine itself never mutates a
/// `ParameterSet`.  Scenario adjustments are applied to a local copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    /// Total number of employees.
    pub headcount: u32,
    /// Share of employees who are display screen equipment users.
    pub dse_user_percentage: f64,
    /// Annual salary of the competent person running assessments.
    pub admin_salary: f64,
    /// Employer on-costs (pension, insurance) on top of salary.
    pub admin_on_cost_percentage: f64,
    /// Days per week spent on the manual compliance process today.
    pub admin_time_now: f64,
    /// Days per week the same work takes with the software.
    pub admin_time_with_software: f64,
    /// Percentage of working days lost to absence.
    pub baseline_absence_rate: f64,
    pub work_days_per_year: u32,
    /// Share of absence attributable to musculoskeletal disorders.
    pub absence_due_to_msd_percentage: f64,
    pub cost_per_absence_day: f64,
    /// Share of DSE users experiencing an MSD.
    pub msd_prevalence: f64,
    pub reduction_in_msd_absence: f64,
    pub reduction_in_clinical_interventions: f64,
    pub cost_per_clinical_intervention: f64,
    /// Share of MSD cases that need clinical intervention.
    pub msd_needing_intervention_percentage: f64,
    pub currency: Currency,
}

impl Default for ParameterSet {
    /// A 100-person office with two admin days a week spent on
    /// compliance, halved by the software.
    fn default() -> Self {
        Self {
            headcount: 100,
            dse_user_percentage: 60.0,
            admin_salary: 50_000.0,
            admin_on_cost_percentage: 30.0,
            admin_time_now: 2.0,
            admin_time_with_software: 1.0,
            baseline_absence_rate: 5.0,
            work_days_per_year: 220,
            absence_due_to_msd_percentage: 30.0,
            cost_per_absence_day: 300.0,
            msd_prevalence: 25.0,
            reduction_in_msd_absence: 15.0,
            reduction_in_clinical_interventions: 25.0,
            cost_per_clinical_intervention: 600.0,
            msd_needing_intervention_percentage: 20.0,
            currency: Currency::Gbp,
        }
    }
}

/// One audit record explaining how a derived value was obtained.  Steps
/// are informational only; nothing in the engine reads them back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationStep {
    pub label: String,
    /// Human-readable formula with the concrete operands substituted.
    pub formula: String,
    pub value: f64,
    pub unit: Unit,
}

/// Fully itemised output of one engine run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub scenario: Scenario,
    /// `false` only when the computation itself faulted.  In that case
    /// every numeric field is zero and `validation_errors` holds one
    /// message.
    pub is_valid: bool,
    pub validation_errors: Vec<String>,
    /// Label of the pricing tier that produced `licence_cost`.
    pub tier_label: Option<String>,
    pub dse_user_count: f64,
    pub admin_cost_now: f64,
    pub admin_cost_with_software: f64,
    pub admin_saving: f64,
    pub licence_cost: f64,
    pub msd_absence_baseline_days: f64,
    pub absence_saving: f64,
    pub intervention_saving: f64,
    pub total_annual_savings: f64,
    pub net_benefit: f64,
    pub roi_percentage: f64,
    pub payback_months: f64,
    pub breakeven_users: u64,
    /// Ordered audit trail of intermediate values.
    pub steps: Vec<CalculationStep>,
}

impl CalculationResult {
    /// A valid result where every figure is zero.
    pub fn zeroed(scenario: Scenario) -> Self {
        Self {
            scenario,
            is_valid: true,
            validation_errors: Vec::new(),
            tier_label: None,
            dse_user_count: 0.0,
            admin_cost_now: 0.0,
            admin_cost_with_software: 0.0,
            admin_saving: 0.0,
            licence_cost: 0.0,
            msd_absence_baseline_days: 0.0,
            absence_saving: 0.0,
            intervention_saving: 0.0,
            total_annual_savings: 0.0,
            net_benefit: 0.0,
            roi_percentage: 0.0,
            payback_months: 0.0,
            breakeven_users: 0,
            steps: Vec::new(),
        }
    }

    /// A zeroed result flagged invalid with a single error message.
    pub fn failed(scenario: Scenario, message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            validation_errors: vec![message.into()],
            ..Self::zeroed(scenario)
        }
    }
}

/// Results for all three scenarios computed from one input set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioTriple {
    pub conservative: CalculationResult,
    pub expected: CalculationResult,
    pub stretch: CalculationResult,
}

impl ScenarioTriple {
    pub fn get(&self, scenario: Scenario) -> &CalculationResult {
        match scenario {
            Scenario::Conservative => &self.conservative,
            Scenario::Expected => &self.expected,
            Scenario::Stretch => &self.stretch,
        }
    }

    /// Iterates in conservative, expected, stretch order.
    pub fn iter(&self) -> impl Iterator<Item = &CalculationResult> {
        [&self.conservative, &self.expected, &self.stretch].into_iter()
    }
}

/// Outcome of the expected scenario for one perturbed input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityPoint {
    /// Percentage offset applied to the baseline, e.g. `-20.0`.
    pub variation: f64,
    /// The input value actually fed to the engine.
    pub value: f64,
    pub roi_percentage: f64,
    pub payback_months: f64,
    pub net_benefit: f64,
}

/// Sweep of a single input field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityCurve {
    pub field: crate::fields::Field,
    pub baseline: f64,
    pub unit: Unit,
    pub points: Vec<SensitivityPoint>,
}
