//! Typed identifiers for the numeric inputs of a [`ParameterSet`].
//!
//! Callers that work with field names (form adapters, sensitivity
//! sweeps) go through [`Field`] instead of indexing by string.  The
//! static constraint table returned by [`Field::spec`] is shared by the
//! validator and by anything that needs a field's range or unit.

use crate::models::{ParameterSet, Unit};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Headcount,
    DseUserPercentage,
    AdminSalary,
    AdminOnCostPercentage,
    AdminTimeNow,
    AdminTimeWithSoftware,
    BaselineAbsenceRate,
    WorkDaysPerYear,
    AbsenceDueToMsdPercentage,
    CostPerAbsenceDay,
    MsdPrevalence,
    ReductionInMsdAbsence,
    ReductionInClinicalInterventions,
    CostPerClinicalIntervention,
    MsdNeedingInterventionPercentage,
}

/// How a field's value is interpreted and checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Whole number; fractional input is rejected.
    Integer,
    /// Value in `[0, 100]`.
    Percentage,
    /// Non-negative amount in the display currency.
    Currency,
    /// Any finite decimal within range.
    Decimal,
}

/// Declared constraints for one field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub kind: FieldKind,
    pub min: f64,
    pub max: f64,
    /// Input granularity offered to users.  Not enforced.
    pub step: f64,
    pub unit: Unit,
}

const fn spec(kind: FieldKind, min: f64, max: f64, step: f64, unit: Unit) -> FieldSpec {
    FieldSpec {
        kind,
        min,
        max,
        step,
        unit,
    }
}

const PERCENT: FieldSpec = spec(FieldKind::Percentage, 0.0, 100.0, 1.0, Unit::Percent);

impl Field {
    pub const ALL: [Field; 15] = [
        Field::Headcount,
        Field::DseUserPercentage,
        Field::AdminSalary,
        Field::AdminOnCostPercentage,
        Field::AdminTimeNow,
        Field::AdminTimeWithSoftware,
        Field::BaselineAbsenceRate,
        Field::WorkDaysPerYear,
        Field::AbsenceDueToMsdPercentage,
        Field::CostPerAbsenceDay,
        Field::MsdPrevalence,
        Field::ReductionInMsdAbsence,
        Field::ReductionInClinicalInterventions,
        Field::CostPerClinicalIntervention,
        Field::MsdNeedingInterventionPercentage,
    ];

    /// Key used in serialised records and raw form input.
    pub fn key(self) -> &'static str {
        match self {
            Field::Headcount => "headcount",
            Field::DseUserPercentage => "dse_user_percentage",
            Field::AdminSalary => "admin_salary",
            Field::AdminOnCostPercentage => "admin_on_cost_percentage",
            Field::AdminTimeNow => "admin_time_now",
            Field::AdminTimeWithSoftware => "admin_time_with_software",
            Field::BaselineAbsenceRate => "baseline_absence_rate",
            Field::WorkDaysPerYear => "work_days_per_year",
            Field::AbsenceDueToMsdPercentage => "absence_due_to_msd_percentage",
            Field::CostPerAbsenceDay => "cost_per_absence_day",
            Field::MsdPrevalence => "msd_prevalence",
            Field::ReductionInMsdAbsence => "reduction_in_msd_absence",
            Field::ReductionInClinicalInterventions => "reduction_in_clinical_interventions",
            Field::CostPerClinicalIntervention => "cost_per_clinical_intervention",
            Field::MsdNeedingInterventionPercentage => "msd_needing_intervention_percentage",
        }
    }

    pub fn spec(self) -> FieldSpec {
        match self {
            Field::Headcount => spec(FieldKind::Integer, 0.0, 100_000.0, 1.0, Unit::Users),
            Field::AdminSalary => spec(FieldKind::Currency, 0.0, 250_000.0, 500.0, Unit::Currency),
            Field::AdminTimeNow | Field::AdminTimeWithSoftware => {
                spec(FieldKind::Decimal, 0.0, 5.0, 0.5, Unit::DaysPerWeek)
            }
            Field::BaselineAbsenceRate => FieldSpec { step: 0.1, ..PERCENT },
            Field::WorkDaysPerYear => spec(FieldKind::Integer, 1.0, 366.0, 1.0, Unit::Days),
            Field::CostPerAbsenceDay => {
                spec(FieldKind::Currency, 0.0, 5_000.0, 10.0, Unit::Currency)
            }
            Field::CostPerClinicalIntervention => {
                spec(FieldKind::Currency, 0.0, 10_000.0, 10.0, Unit::Currency)
            }
            Field::DseUserPercentage
            | Field::AdminOnCostPercentage
            | Field::AbsenceDueToMsdPercentage
            | Field::MsdPrevalence
            | Field::ReductionInMsdAbsence
            | Field::ReductionInClinicalInterventions
            | Field::MsdNeedingInterventionPercentage => PERCENT,
        }
    }

    pub fn unit(self) -> Unit {
        self.spec().unit
    }

    /// Reads the field from `params` as a float.
    pub fn get(self, params: &ParameterSet) -> f64 {
        match self {
            Field::Headcount => f64::from(params.headcount),
            Field::DseUserPercentage => params.dse_user_percentage,
            Field::AdminSalary => params.admin_salary,
            Field::AdminOnCostPercentage => params.admin_on_cost_percentage,
            Field::AdminTimeNow => params.admin_time_now,
            Field::AdminTimeWithSoftware => params.admin_time_with_software,
            Field::BaselineAbsenceRate => params.baseline_absence_rate,
            Field::WorkDaysPerYear => f64::from(params.work_days_per_year),
            Field::AbsenceDueToMsdPercentage => params.absence_due_to_msd_percentage,
            Field::CostPerAbsenceDay => params.cost_per_absence_day,
            Field::MsdPrevalence => params.msd_prevalence,
            Field::ReductionInMsdAbsence => params.reduction_in_msd_absence,
            Field::ReductionInClinicalInterventions => params.reduction_in_clinical_interventions,
            Field::CostPerClinicalIntervention => params.cost_per_clinical_intervention,
            Field::MsdNeedingInterventionPercentage => params.msd_needing_intervention_percentage,
        }
    }

    /// Writes `value` into `params`.  Integer fields are rounded to the
    /// nearest whole number and saturate at zero.
    pub fn set(self, params: &mut ParameterSet, value: f64) {
        let whole = || value.round().max(0.0) as u32;
        match self {
            Field::Headcount => params.headcount = whole(),
            Field::DseUserPercentage => params.dse_user_percentage = value,
            Field::AdminSalary => params.admin_salary = value,
            Field::AdminOnCostPercentage => params.admin_on_cost_percentage = value,
            Field::AdminTimeNow => params.admin_time_now = value,
            Field::AdminTimeWithSoftware => params.admin_time_with_software = value,
            Field::BaselineAbsenceRate => params.baseline_absence_rate = value,
            Field::WorkDaysPerYear => params.work_days_per_year = whole(),
            Field::AbsenceDueToMsdPercentage => params.absence_due_to_msd_percentage = value,
            Field::CostPerAbsenceDay => params.cost_per_absence_day = value,
            Field::MsdPrevalence => params.msd_prevalence = value,
            Field::ReductionInMsdAbsence => params.reduction_in_msd_absence = value,
            Field::ReductionInClinicalInterventions => {
                params.reduction_in_clinical_interventions = value
            }
            Field::CostPerClinicalIntervention => params.cost_per_clinical_intervention = value,
            Field::MsdNeedingInterventionPercentage => {
                params.msd_needing_intervention_percentage = value
            }
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        Field::ALL
            .into_iter()
            .find(|field| field.key() == key)
            .ok_or_else(|| format!("unknown field '{key}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip_through_from_str() {
        for field in Field::ALL {
            assert_eq!(field.key().parse::<Field>(), Ok(field));
        }
        assert!("salary".parse::<Field>().is_err());
    }

    #[test]
    fn serde_key_matches_field_key() {
        for field in Field::ALL {
            let json = serde_json::to_value(field).unwrap();
            assert_eq!(json, field.key());
        }
    }

    #[test]
    fn set_then_get_returns_written_value() {
        let mut params = ParameterSet::default();
        Field::CostPerAbsenceDay.set(&mut params, 412.5);
        assert_eq!(Field::CostPerAbsenceDay.get(&params), 412.5);
    }

    #[test]
    fn integer_fields_round_and_saturate() {
        let mut params = ParameterSet::default();
        Field::Headcount.set(&mut params, 109.6);
        assert_eq!(params.headcount, 110);
        Field::Headcount.set(&mut params, -4.0);
        assert_eq!(params.headcount, 0);
    }

    #[test]
    fn percentage_fields_are_bounded_to_hundred() {
        for field in Field::ALL {
            let spec = field.spec();
            assert!(spec.min <= spec.max);
            if spec.kind == FieldKind::Percentage {
                assert_eq!((spec.min, spec.max), (0.0, 100.0));
            }
        }
        assert_eq!(Field::Headcount.spec().max, 100_000.0);
    }
}
