use serde::{Deserialize, Serialize};

const NATIONWIDE: &str = "전국";
const SUBDIVISION_SUFFIXES: [char; 3] = ['시', '군', '구'];
const LANDSCAPING_TRADES: [&str; 2] = ["조경식재", "나무병원"];

const HUNDRED_MILLION: f64 = 100_000_000.0;
const THREE_HUNDRED_MILLION: f64 = 300_000_000.0;

/// Geographic reach of the tender's participation restriction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionScope {
    Province,
    City,
}

impl RegionScope {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Province => "province",
            Self::City => "city",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LicenseGroup {
    General,
    Landscaping,
}

impl LicenseGroup {
    pub const fn label(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Landscaping => "landscaping",
        }
    }
}

/// Basis amount band, lower edge inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AmountRange {
    #[serde(rename = "under1")]
    Under1,
    #[serde(rename = "from1to3")]
    From1To3,
    #[serde(rename = "over3")]
    Over3,
}

impl AmountRange {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Under1 => "under1",
            Self::From1To3 => "from1to3",
            Self::Over3 => "over3",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenderClassification {
    pub region_scope: RegionScope,
    pub license_group: LicenseGroup,
    pub amount_range: AmountRange,
}

impl TenderClassification {
    pub fn classify(
        participation_regions: Option<&str>,
        permitted_industries: Option<&str>,
        basis_amount: f64,
    ) -> Self {
        Self {
            region_scope: determine_region_scope(participation_regions),
            license_group: determine_license_group(permitted_industries),
            amount_range: determine_amount_range(basis_amount),
        }
    }
}

pub fn determine_region_scope(regions: Option<&str>) -> RegionScope {
    let Some(regions) = regions.map(str::trim).filter(|value| !value.is_empty()) else {
        return RegionScope::Province;
    };

    if regions.contains(',') || regions == NATIONWIDE {
        return RegionScope::Province;
    }

    let parts: Vec<&str> = regions.split_whitespace().collect();
    match parts.as_slice() {
        [_, .., last] if last.ends_with(SUBDIVISION_SUFFIXES) => RegionScope::City,
        _ => RegionScope::Province,
    }
}

pub fn determine_license_group(industries: Option<&str>) -> LicenseGroup {
    match industries {
        Some(names) if LANDSCAPING_TRADES.iter().any(|trade| names.contains(trade)) => {
            LicenseGroup::Landscaping
        }
        _ => LicenseGroup::General,
    }
}

pub fn determine_amount_range(basis_amount: f64) -> AmountRange {
    if basis_amount < HUNDRED_MILLION {
        AmountRange::Under1
    } else if basis_amount < THREE_HUNDRED_MILLION {
        AmountRange::From1To3
    } else {
        AmountRange::Over3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_scope_defaults_to_province() {
        assert_eq!(determine_region_scope(None), RegionScope::Province);
        assert_eq!(determine_region_scope(Some("  ")), RegionScope::Province);
        assert_eq!(determine_region_scope(Some("전국")), RegionScope::Province);
        assert_eq!(determine_region_scope(Some("경기도")), RegionScope::Province);
        assert_eq!(
            determine_region_scope(Some("서울특별시")),
            RegionScope::Province
        );
    }

    #[test]
    fn region_scope_treats_multiple_regions_as_province() {
        assert_eq!(
            determine_region_scope(Some("서울특별시, 경기도")),
            RegionScope::Province
        );
        assert_eq!(
            determine_region_scope(Some("경기도 수원시, 경기도 성남시")),
            RegionScope::Province
        );
    }

    #[test]
    fn region_scope_detects_subdivisions() {
        for regions in [
            "경기도 성남시",
            "강원도 춘천시",
            "경기도 양평군",
            "서울특별시 강남구",
        ] {
            assert_eq!(
                determine_region_scope(Some(regions)),
                RegionScope::City,
                "{regions}"
            );
        }
    }

    #[test]
    fn license_group_matches_landscaping_trades() {
        assert_eq!(determine_license_group(None), LicenseGroup::General);
        assert_eq!(determine_license_group(Some("토공사업")), LicenseGroup::General);
        assert_eq!(
            determine_license_group(Some("조경식재ㆍ시설물공사업")),
            LicenseGroup::Landscaping
        );
        assert_eq!(
            determine_license_group(Some("나무병원(1종)")),
            LicenseGroup::Landscaping
        );
        assert_eq!(
            determine_license_group(Some("일반건설업, 조경식재공사업")),
            LicenseGroup::Landscaping
        );
    }

    #[test]
    fn amount_range_boundaries_are_exact() {
        assert_eq!(determine_amount_range(50_000_000.0), AmountRange::Under1);
        assert_eq!(determine_amount_range(99_999_999.0), AmountRange::Under1);
        assert_eq!(determine_amount_range(100_000_000.0), AmountRange::From1To3);
        assert_eq!(determine_amount_range(299_999_999.0), AmountRange::From1To3);
        assert_eq!(determine_amount_range(300_000_000.0), AmountRange::Over3);
        assert_eq!(determine_amount_range(1_000_000_000.0), AmountRange::Over3);
    }
}
