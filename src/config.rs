//! Runtime settings for the `roi_engine` binary.
//!
//! Settings come from environment variables:
//!
//! * `ROI_PRICING_FILE` - JSON pricing table replacing the standard one.
//! * `ROI_INPUT` - JSON parameter record; stdin is read when unset.
//! * `ROI_SENSITIVITY_FIELDS` - comma-separated field keys to sweep.

use crate::fields::Field;
use crate::pricing::{LicencePricing, PricingTable};
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;

pub const PRICING_FILE_VAR: &str = "ROI_PRICING_FILE";
pub const INPUT_VAR: &str = "ROI_INPUT";
pub const SENSITIVITY_FIELDS_VAR: &str = "ROI_SENSITIVITY_FIELDS";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub pricing_file: Option<PathBuf>,
    pub input: Option<PathBuf>,
    /// `None` means the default sweep.
    pub sensitivity_fields: Option<Vec<Field>>,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup.  Blank values are
    /// treated as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let sensitivity_fields = get(SENSITIVITY_FIELDS_VAR)
            .map(|list| {
                list.split(',')
                    .filter(|key| !key.trim().is_empty())
                    .map(|key| key.parse::<Field>().map_err(anyhow::Error::msg))
                    .collect::<Result<Vec<_>>>()
            })
            .transpose()
            .with_context(|| format!("invalid {SENSITIVITY_FIELDS_VAR}"))?;

        Ok(Self {
            pricing_file: get(PRICING_FILE_VAR).map(PathBuf::from),
            input: get(INPUT_VAR).map(PathBuf::from),
            sensitivity_fields,
        })
    }

    /// The pricing model to compute with.
    pub fn pricing(&self) -> Result<Arc<dyn LicencePricing>> {
        let table = match &self.pricing_file {
            Some(path) => PricingTable::from_json_file(path)?,
            None => PricingTable::standard().clone(),
        };
        Ok(Arc::new(table))
    }
}
