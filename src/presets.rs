//! Starting-point parameter presets.
//!
//! Sales users usually begin from a sector and company-size profile and
//! then tweak individual inputs.  The profiles are immutable constants
//! keyed by enum tags; [`ParameterSet::from_presets`] merges them over
//! the default parameter set.

use crate::models::{Currency, ParameterSet};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Industry {
    Office,
    FinancialServices,
    Healthcare,
    Manufacturing,
    PublicSector,
}

/// Workforce characteristics typical of an industry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndustryProfile {
    pub dse_user_percentage: f64,
    pub baseline_absence_rate: f64,
    pub msd_prevalence: f64,
    pub absence_due_to_msd_percentage: f64,
}

impl Industry {
    pub const ALL: [Industry; 5] = [
        Industry::Office,
        Industry::FinancialServices,
        Industry::Healthcare,
        Industry::Manufacturing,
        Industry::PublicSector,
    ];

    pub fn profile(self) -> IndustryProfile {
        let (dse, absence, prevalence, msd_share) = match self {
            Industry::Office => (60.0, 5.0, 25.0, 30.0),
            Industry::FinancialServices => (90.0, 3.5, 30.0, 25.0),
            Industry::Healthcare => (40.0, 6.0, 35.0, 35.0),
            Industry::Manufacturing => (25.0, 5.5, 40.0, 40.0),
            Industry::PublicSector => (75.0, 6.5, 28.0, 30.0),
        };
        IndustryProfile {
            dse_user_percentage: dse,
            baseline_absence_rate: absence,
            msd_prevalence: prevalence,
            absence_due_to_msd_percentage: msd_share,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompanySize {
    Small,
    Medium,
    Large,
    Enterprise,
}

/// Headcount and compliance workload typical of a company size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompanySizeProfile {
    pub headcount: u32,
    pub admin_time_now: f64,
    pub admin_time_with_software: f64,
}

impl CompanySize {
    pub const ALL: [CompanySize; 4] = [
        CompanySize::Small,
        CompanySize::Medium,
        CompanySize::Large,
        CompanySize::Enterprise,
    ];

    pub fn profile(self) -> CompanySizeProfile {
        let (headcount, admin_time_now, admin_time_with_software) = match self {
            CompanySize::Small => (50, 1.5, 0.5),
            CompanySize::Medium => (250, 2.0, 1.0),
            CompanySize::Large => (1_000, 4.0, 1.5),
            CompanySize::Enterprise => (5_000, 5.0, 2.0),
        };
        CompanySizeProfile {
            headcount,
            admin_time_now,
            admin_time_with_software,
        }
    }
}

impl ParameterSet {
    /// Default parameters overlaid with an industry and a size profile.
    pub fn from_presets(industry: Industry, size: CompanySize, currency: Currency) -> Self {
        let sector = industry.profile();
        let scale = size.profile();
        Self {
            headcount: scale.headcount,
            admin_time_now: scale.admin_time_now,
            admin_time_with_software: scale.admin_time_with_software,
            dse_user_percentage: sector.dse_user_percentage,
            baseline_absence_rate: sector.baseline_absence_rate,
            msd_prevalence: sector.msd_prevalence,
            absence_due_to_msd_percentage: sector.absence_due_to_msd_percentage,
            currency,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{advisories, validate};

    #[test]
    fn office_medium_overrides_only_profile_fields() {
        let params =
            ParameterSet::from_presets(Industry::Office, CompanySize::Medium, Currency::Usd);
        assert_eq!(params.headcount, 250);
        assert_eq!(params.currency, Currency::Usd);
        assert_eq!(params.admin_salary, ParameterSet::default().admin_salary);
    }

    #[test]
    fn every_combination_passes_validation_without_advisories() {
        for industry in Industry::ALL {
            for size in CompanySize::ALL {
                let params = ParameterSet::from_presets(industry, size, Currency::Eur);
                let record = match serde_json::to_value(&params).unwrap() {
                    serde_json::Value::Object(map) => map,
                    other => panic!("expected object, got {other}"),
                };
                assert!(validate(&record).is_valid(), "{industry:?}/{size:?}");
                assert!(advisories(&params).is_empty(), "{industry:?}/{size:?}");
            }
        }
    }
}
