//! Licence pricing traits and structures.
//!
//! The `pricing` module maps a headcount to an annual licence cost.  It
//! provides the [`LicencePricing`] trait, which the engine calls
//! through, a tiered [`PricingTable`] implementation with volume
//! discount bands, and a helper for loading a custom table from a JSON
//! file.  The standard table is built once and shared.

use crate::error::ConfigError;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// A pricing bracket that applies from `threshold` users upwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingTier {
    pub threshold: u32,
    pub annual_price: f64,
    /// Advertised "from" price per user.  Resolution always recomputes
    /// the effective per-user price from the annual price.
    pub per_user_price: f64,
    pub label: String,
}

/// A multiplicative discount for deployments of at least
/// `min_headcount` users.  Only the largest applicable band is used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountBand {
    pub min_headcount: u32,
    /// Fraction taken off the tier price, e.g. `0.05` for 5%.
    pub rate: f64,
}

/// Resolved price for a specific headcount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingInfo {
    /// Annual price after discount, rounded to a whole currency unit.
    pub annual_price: f64,
    /// `annual_price / headcount`, rounded to two decimals.  Zero when
    /// the headcount is zero.
    pub per_user_price: f64,
    pub tier_label: String,
    /// Discount rate that was applied, if any.
    pub discount_rate: f64,
}

/// A pricing model determines the licence cost for a headcount.
///
/// Implementations must be thread-safe (`Send + Sync`) because the
/// sensitivity sweep may call them from several threads at once.
pub trait LicencePricing: Send + Sync {
    fn resolve_cost(&self, headcount: u32) -> PricingInfo;
}

/// Tiered price list with volume discount bands.  Always holds at
/// least one tier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricingTable {
    tiers: Vec<PricingTier>,
    discounts: Vec<DiscountBand>,
}

/// On-disk shape of a pricing table, checked before use.
#[derive(Deserialize)]
struct PricingFile {
    tiers: Vec<PricingTier>,
    #[serde(default)]
    discounts: Vec<DiscountBand>,
}

fn tier(threshold: u32, annual_price: f64, per_user_price: f64, label: &str) -> PricingTier {
    PricingTier {
        threshold,
        annual_price,
        per_user_price,
        label: label.to_string(),
    }
}

static STANDARD: Lazy<PricingTable> = Lazy::new(|| PricingTable {
    tiers: vec![
        tier(0, 2_500.0, 50.0, "Starter"),
        tier(50, 4_000.0, 40.0, "Small Team"),
        tier(100, 6_000.0, 30.0, "Growth"),
        tier(250, 12_000.0, 24.0, "Business"),
        tier(500, 20_000.0, 20.0, "Professional"),
        tier(1_000, 35_000.0, 14.0, "Enterprise"),
        tier(2_500, 70_000.0, 14.0, "Enterprise Plus"),
        tier(5_000, 120_000.0, 12.0, "Corporate"),
        tier(10_000, 200_000.0, 10.0, "Global"),
    ],
    discounts: vec![
        DiscountBand {
            min_headcount: 5_000,
            rate: 0.05,
        },
        DiscountBand {
            min_headcount: 10_000,
            rate: 0.10,
        },
    ],
});

impl PricingTable {
    /// Builds a table, checking that tiers are present with strictly
    /// increasing thresholds and that discount rates lie in `[0, 1)`.
    pub fn new(tiers: Vec<PricingTier>, discounts: Vec<DiscountBand>) -> Result<Self, ConfigError> {
        let table = Self { tiers, discounts };
        table.check()?;
        Ok(table)
    }

    /// The built-in price list.
    pub fn standard() -> &'static PricingTable {
        &STANDARD
    }

    /// Load a pricing table from a JSON file of the form
    /// `{"tiers": [...], "discounts": [...]}`.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_json_str(&data)?;
        debug!(path = ?path, tiers = table.tiers.len(), "loaded pricing table");
        Ok(table)
    }

    pub fn from_json_str(data: &str) -> Result<Self, ConfigError> {
        let file: PricingFile = serde_json::from_str(data)?;
        Self::new(file.tiers, file.discounts)
    }

    pub fn tiers(&self) -> &[PricingTier] {
        &self.tiers
    }

    pub fn discounts(&self) -> &[DiscountBand] {
        &self.discounts
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.tiers.is_empty() {
            return Err(ConfigError::EmptyTable);
        }
        for pair in self.tiers.windows(2) {
            if pair[1].threshold <= pair[0].threshold {
                return Err(ConfigError::NonIncreasingThreshold {
                    previous: pair[0].threshold,
                    threshold: pair[1].threshold,
                });
            }
        }
        for band in &self.discounts {
            if !(0.0..1.0).contains(&band.rate) {
                return Err(ConfigError::InvalidDiscount {
                    min_headcount: band.min_headcount,
                    rate: band.rate,
                });
            }
        }
        Ok(())
    }

    /// Highest tier whose threshold is at or below `headcount`, falling
    /// back to the lowest tier.
    fn matching_tier(&self, headcount: u32) -> &PricingTier {
        self.tiers
            .iter()
            .rev()
            .find(|t| t.threshold <= headcount)
            .unwrap_or(&self.tiers[0])
    }

    fn discount_rate(&self, headcount: u32) -> f64 {
        self.discounts
            .iter()
            .filter(|band| headcount >= band.min_headcount)
            .max_by_key(|band| band.min_headcount)
            .map(|band| band.rate)
            .unwrap_or(0.0)
    }
}

impl LicencePricing for PricingTable {
    fn resolve_cost(&self, headcount: u32) -> PricingInfo {
        let tier = self.matching_tier(headcount);
        let discount_rate = self.discount_rate(headcount);
        let annual_price = (tier.annual_price * (1.0 - discount_rate)).round();
        let per_user_price = if headcount == 0 {
            0.0
        } else {
            round_cents(annual_price / f64::from(headcount))
        };
        PricingInfo {
            annual_price,
            per_user_price,
            tier_label: tier.label.clone(),
            discount_rate,
        }
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard(headcount: u32) -> PricingInfo {
        PricingTable::standard().resolve_cost(headcount)
    }

    #[test]
    fn picks_highest_threshold_not_above_headcount() {
        assert_eq!(standard(49).tier_label, "Starter");
        assert_eq!(standard(50).tier_label, "Small Team");
        assert_eq!(standard(100).annual_price, 6_000.0);
        assert_eq!(standard(100).per_user_price, 60.0);
        assert_eq!(standard(999).tier_label, "Professional");
    }

    #[test]
    fn zero_headcount_uses_lowest_tier_with_zero_per_user() {
        let info = standard(0);
        assert_eq!(info.annual_price, 2_500.0);
        assert_eq!(info.per_user_price, 0.0);
        assert_eq!(info.tier_label, "Starter");
    }

    #[test]
    fn headcount_below_every_threshold_falls_back_to_lowest_tier() {
        let table = PricingTable::new(
            vec![tier(10, 1_000.0, 100.0, "Ten"), tier(20, 1_500.0, 75.0, "Twenty")],
            vec![],
        )
        .unwrap();
        let info = table.resolve_cost(3);
        assert_eq!(info.tier_label, "Ten");
        assert_eq!(info.annual_price, 1_000.0);
        assert_eq!(info.per_user_price, 333.33);
    }

    #[test]
    fn discount_bands_do_not_stack() {
        let corporate = standard(5_000);
        assert_eq!(corporate.discount_rate, 0.05);
        assert_eq!(corporate.annual_price, 114_000.0);
        assert_eq!(corporate.per_user_price, 22.8);

        let global = standard(10_000);
        assert_eq!(global.discount_rate, 0.10);
        assert_eq!(global.annual_price, 180_000.0);
        assert_eq!(global.per_user_price, 18.0);
    }

    #[test]
    fn per_user_price_follows_rounded_annual_price() {
        let table = PricingTable::new(
            vec![tier(0, 100.5, 100.5, "Fractional")],
            vec![DiscountBand {
                min_headcount: 3,
                rate: 0.07,
            }],
        )
        .unwrap();

        let single = table.resolve_cost(1);
        assert_eq!(single.annual_price, 101.0);
        assert_eq!(single.per_user_price, 101.0);

        // 100.5 × 0.93 = 93.465, rounded to 93 before dividing.
        let discounted = table.resolve_cost(4);
        assert_eq!(discounted.annual_price, 93.0);
        assert_eq!(discounted.per_user_price, 23.25);
    }

    #[test]
    fn annual_price_is_monotonic_across_the_table() {
        let mut previous = 0.0;
        for headcount in (0..=100_000).step_by(50) {
            let price = standard(headcount).annual_price;
            assert!(price >= previous, "price dropped at {headcount}");
            previous = price;
        }
    }

    #[test]
    fn rejects_non_increasing_thresholds() {
        let err = PricingTable::new(vec![tier(0, 1.0, 1.0, "a"), tier(0, 2.0, 1.0, "b")], vec![])
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NonIncreasingThreshold {
                previous: 0,
                threshold: 0
            }
        ));
    }

    #[test]
    fn rejects_empty_table_and_bad_discount() {
        assert!(matches!(PricingTable::new(vec![], vec![]), Err(ConfigError::EmptyTable)));
        let bad = PricingTable::new(
            vec![tier(0, 1.0, 1.0, "a")],
            vec![DiscountBand { min_headcount: 10, rate: 1.5 }],
        );
        assert!(matches!(bad, Err(ConfigError::InvalidDiscount { .. })));
    }

    #[test]
    fn loads_table_from_json() {
        let table = PricingTable::from_json_str(
            r#"{"tiers": [
                {"threshold": 0, "annual_price": 900.0, "per_user_price": 9.0, "label": "Solo"},
                {"threshold": 200, "annual_price": 1800.0, "per_user_price": 9.0, "label": "Team"}
            ]}"#,
        )
        .unwrap();
        assert!(table.discounts().is_empty());
        assert_eq!(table.resolve_cost(250).tier_label, "Team");
        assert!(PricingTable::from_json_str("{\"tiers\": []}").is_err());
    }
}
