//! Input validation.
//!
//! [`validate`] turns an untyped form record into a [`ParameterSet`],
//! checking every declared field against the constraint table in
//! [`crate::fields`].  All violations are collected; nothing
//! short-circuits.  Cross-field business rules are not enforced here;
//! [`advisories`] reports them separately as non-blocking findings.

use crate::error::FieldError;
use crate::fields::{Field, FieldKind};
use crate::models::{Currency, ParameterSet, Scenario};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// Result of validating a raw record.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    Valid(ParameterSet),
    Invalid(Vec<FieldError>),
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid(_))
    }

    /// Error messages formatted as `field: message`.
    pub fn errors(&self) -> Vec<String> {
        match self {
            ValidationOutcome::Valid(_) => Vec::new(),
            ValidationOutcome::Invalid(errors) => errors.iter().map(ToString::to_string).collect(),
        }
    }

    pub fn into_result(self) -> Result<ParameterSet, Vec<FieldError>> {
        match self {
            ValidationOutcome::Valid(params) => Ok(params),
            ValidationOutcome::Invalid(errors) => Err(errors),
        }
    }
}

/// Validate and coerce a raw record.  Numbers may arrive as JSON
/// numbers or as numeric strings.  Unknown keys are ignored.
pub fn validate(raw: &Map<String, Value>) -> ValidationOutcome {
    let mut params = ParameterSet::default();
    let mut errors = Vec::new();

    for field in Field::ALL {
        match check_field(field, raw.get(field.key())) {
            Ok(value) => field.set(&mut params, value),
            Err(message) => errors.push(FieldError::new(field.key(), message)),
        }
    }

    match raw.get("currency") {
        Some(Value::String(code)) => match code.parse::<Currency>() {
            Ok(currency) => params.currency = currency,
            Err(message) => errors.push(FieldError::new("currency", message)),
        },
        Some(Value::Null) | None => errors.push(FieldError::new("currency", "is required")),
        Some(_) => errors.push(FieldError::new("currency", "must be one of EUR, GBP, USD")),
    }

    if errors.is_empty() {
        ValidationOutcome::Valid(params)
    } else {
        ValidationOutcome::Invalid(errors)
    }
}

fn check_field(field: Field, raw: Option<&Value>) -> Result<f64, String> {
    let value = match raw {
        None | Some(Value::Null) => return Err("is required".to_string()),
        Some(Value::Number(n)) => n.as_f64().ok_or("must be a number")?,
        Some(Value::String(s)) if s.trim().is_empty() => return Err("is required".to_string()),
        Some(Value::String(s)) => s.trim().parse::<f64>().map_err(|_| "must be a number")?,
        Some(_) => return Err("must be a number".to_string()),
    };
    if !value.is_finite() {
        return Err("must be a finite number".to_string());
    }

    let spec = field.spec();
    if spec.kind == FieldKind::Integer && value.fract() != 0.0 {
        return Err("must be a whole number".to_string());
    }
    if value < spec.min || value > spec.max {
        return Err(format!("must be between {} and {}", spec.min, spec.max));
    }
    Ok(value)
}

/// A non-blocking observation about inconsistent but in-range inputs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Advisory {
    pub field: Field,
    pub message: String,
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Cross-field business-rule checks.  Findings never block a
/// calculation; callers decide how to surface them.
pub fn advisories(params: &ParameterSet) -> Vec<Advisory> {
    let mut found = Vec::new();
    let mut note = |field: Field, message: String| found.push(Advisory { field, message });

    if params.admin_time_with_software >= params.admin_time_now {
        note(
            Field::AdminTimeWithSoftware,
            format!(
                "software-assisted admin time ({} days/week) should be less than \
                 current time ({} days/week)",
                params.admin_time_with_software, params.admin_time_now
            ),
        );
    } else if params.admin_time_with_software + crate::engine::CONSERVATIVE_ADMIN_TIME_PENALTY
        >= params.admin_time_now
    {
        note(
            Field::AdminTimeWithSoftware,
            format!("the {} scenario leaves no admin time saving", Scenario::Conservative),
        );
    }

    if params.headcount > 0 && params.dse_user_percentage == 0.0 {
        note(
            Field::DseUserPercentage,
            "no DSE users: absence and intervention savings are zero and breakeven is reported as 0"
                .to_string(),
        );
    }

    if params.reduction_in_msd_absence > 0.0 && params.absence_due_to_msd_percentage == 0.0 {
        note(
            Field::ReductionInMsdAbsence,
            "an MSD absence reduction is claimed but no absence is attributed to MSDs".to_string(),
        );
    }

    found
}
