use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;

use super::classification::{AmountRange, LicenseGroup, RegionScope, TenderClassification};

/// Rate applied when no table cell matches at any fallback tier.
pub const DEFAULT_ASSESSMENT_RATE: f64 = 100.0;

/// Which lookup attempt produced the assessment rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupTier {
    Exact,
    ProvinceScope,
    GeneralLicense,
    ProvinceGeneral,
    GlobalDefault,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateLookup {
    pub rate: f64,
    pub tier: LookupTier,
}

/// Sparse region scope → license group → amount range → assessment rate table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateTable {
    cells: BTreeMap<RegionScope, BTreeMap<LicenseGroup, BTreeMap<AmountRange, f64>>>,
}

impl RateTable {
    /// Reference rates compiled from past award statistics.
    pub fn standard() -> Self {
        const CELLS: &[(RegionScope, LicenseGroup, AmountRange, f64)] = &[
            (RegionScope::Province, LicenseGroup::General, AmountRange::Under1, 99.930),
            (RegionScope::Province, LicenseGroup::General, AmountRange::From1To3, 100.092),
            (RegionScope::Province, LicenseGroup::General, AmountRange::Over3, 100.140),
            (RegionScope::Province, LicenseGroup::Landscaping, AmountRange::From1To3, 99.822),
            (RegionScope::Province, LicenseGroup::Landscaping, AmountRange::Over3, 99.502),
            (RegionScope::City, LicenseGroup::General, AmountRange::Under1, 99.536),
            (RegionScope::City, LicenseGroup::General, AmountRange::From1To3, 99.994),
        ];

        CELLS
            .iter()
            .fold(Self::default(), |table, &(scope, group, range, rate)| {
                table.with_rate(scope, group, range, rate)
            })
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, serde_json::Error> {
        serde_json::from_reader(reader)
    }

    pub fn with_rate(
        mut self,
        scope: RegionScope,
        group: LicenseGroup,
        range: AmountRange,
        rate: f64,
    ) -> Self {
        self.cells
            .entry(scope)
            .or_default()
            .entry(group)
            .or_default()
            .insert(range, rate);
        self
    }

    pub fn get(&self, scope: RegionScope, group: LicenseGroup, range: AmountRange) -> Option<f64> {
        self.cells.get(&scope)?.get(&group)?.get(&range).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.cells
            .values()
            .flat_map(|groups| groups.values())
            .all(|ranges| ranges.is_empty())
    }

    /// Resolves a rate, falling back through progressively broader cells.
    pub fn lookup(&self, classification: &TenderClassification) -> RateLookup {
        let TenderClassification {
            region_scope,
            license_group,
            amount_range,
        } = *classification;

        let attempts = [
            (LookupTier::Exact, region_scope, license_group),
            (LookupTier::ProvinceScope, RegionScope::Province, license_group),
            (LookupTier::GeneralLicense, region_scope, LicenseGroup::General),
            (
                LookupTier::ProvinceGeneral,
                RegionScope::Province,
                LicenseGroup::General,
            ),
        ];

        attempts
            .into_iter()
            .find_map(|(tier, scope, group)| {
                self.get(scope, group, amount_range)
                    .map(|rate| RateLookup { rate, tier })
            })
            .unwrap_or(RateLookup {
                rate: DEFAULT_ASSESSMENT_RATE,
                tier: LookupTier::GlobalDefault,
            })
    }
}
