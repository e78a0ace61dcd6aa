use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Surcharge applied when the build starts on an upper floor.
pub const UPPER_FLOOR_MULTIPLIER: f64 = 1.10;

/// Contingency percentages accepted by the estimator.
pub const CONTINGENCY_PERCENT_RANGE: (f64, f64) = (0.0, 30.0);

/// Two-letter state code keying the unit-cost table. Normalized to upper case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct RegionCode(String);

impl RegionCode {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for RegionCode {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

impl From<RegionCode> for String {
    fn from(value: RegionCode) -> Self {
        value.0
    }
}

impl From<&str> for RegionCode {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Finish-quality level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StandardTier {
    Low,
    #[default]
    Medium,
    High,
}

impl StandardTier {
    pub const fn ordered() -> [Self; 3] {
        [Self::Low, Self::Medium, Self::High]
    }

    pub const fn id(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl FromStr for StandardTier {
    type Err = EstimateError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ordered()
            .into_iter()
            .find(|tier| tier.id() == normalized)
            .ok_or_else(|| EstimateError::invalid("standard_tier", format!("unknown tier '{value}'")))
    }
}

/// Number of floors in the building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(try_from = "u8", into = "u8")]
pub enum FloorCount {
    #[default]
    One,
    Two,
    Three,
}

impl FloorCount {
    pub const fn ordered() -> [Self; 3] {
        [Self::One, Self::Two, Self::Three]
    }

    pub const fn floors(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
        }
    }
}

impl TryFrom<u8> for FloorCount {
    type Error = EstimateError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ordered()
            .into_iter()
            .find(|count| count.floors() == value)
            .ok_or_else(|| {
                EstimateError::invalid("floor_count", format!("{value} floors is not offered"))
            })
    }
}

impl From<FloorCount> for u8 {
    fn from(value: FloorCount) -> Self {
        value.floors()
    }
}

impl FromStr for FloorCount {
    type Err = EstimateError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let floors = value.trim().parse::<u8>().map_err(|_| {
            EstimateError::invalid("floor_count", format!("'{value}' is not a floor count"))
        })?;
        Self::try_from(floors)
    }
}

/// Architectural layout of the house.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HouseType {
    #[default]
    SingleStorey,
    TwoStorey,
    Triplex,
}

impl HouseType {
    pub const fn ordered() -> [Self; 3] {
        [Self::SingleStorey, Self::TwoStorey, Self::Triplex]
    }

    pub const fn id(self) -> &'static str {
        match self {
            Self::SingleStorey => "single_storey",
            Self::TwoStorey => "two_storey",
            Self::Triplex => "triplex",
        }
    }
}

impl FromStr for HouseType {
    type Err = EstimateError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        Self::ordered()
            .into_iter()
            .find(|house| house.id() == normalized)
            .ok_or_else(|| EstimateError::invalid("house_type", format!("unknown house type '{value}'")))
    }
}

/// Optional extras, each charged as a fixed share of the adjusted build cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Amenity {
    Garage,
    LeisureArea,
    Pool,
    BarbecueArea,
    SecuritySystem,
}

impl Amenity {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Garage,
            Self::LeisureArea,
            Self::Pool,
            Self::BarbecueArea,
            Self::SecuritySystem,
        ]
    }

    pub const fn surcharge_rate(self) -> f64 {
        match self {
            Self::Garage => 0.05,
            Self::LeisureArea => 0.08,
            Self::Pool => 0.12,
            Self::BarbecueArea => 0.04,
            Self::SecuritySystem => 0.03,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Garage => "Garage",
            Self::LeisureArea => "Leisure area",
            Self::Pool => "Pool",
            Self::BarbecueArea => "Barbecue area",
            Self::SecuritySystem => "Security system",
        }
    }
}

/// Independent on/off switches for each [`Amenity`]. A deserialized selection holds
/// exactly the switches it names; only an omitted selection falls back to
/// [`AmenitySelection::default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmenitySelection {
    #[serde(default)]
    pub garage: bool,
    #[serde(default)]
    pub leisure_area: bool,
    #[serde(default)]
    pub pool: bool,
    #[serde(default)]
    pub barbecue_area: bool,
    #[serde(default)]
    pub security_system: bool,
}

impl AmenitySelection {
    pub const fn none() -> Self {
        Self {
            garage: false,
            leisure_area: false,
            pool: false,
            barbecue_area: false,
            security_system: false,
        }
    }

    pub fn is_enabled(&self, amenity: Amenity) -> bool {
        match amenity {
            Amenity::Garage => self.garage,
            Amenity::LeisureArea => self.leisure_area,
            Amenity::Pool => self.pool,
            Amenity::BarbecueArea => self.barbecue_area,
            Amenity::SecuritySystem => self.security_system,
        }
    }

    pub fn with(mut self, amenity: Amenity, enabled: bool) -> Self {
        match amenity {
            Amenity::Garage => self.garage = enabled,
            Amenity::LeisureArea => self.leisure_area = enabled,
            Amenity::Pool => self.pool = enabled,
            Amenity::BarbecueArea => self.barbecue_area = enabled,
            Amenity::SecuritySystem => self.security_system = enabled,
        }
        self
    }

    /// Enabled amenities in their fixed display order.
    pub fn enabled(&self) -> impl Iterator<Item = Amenity> + '_ {
        Amenity::ordered()
            .into_iter()
            .filter(move |amenity| self.is_enabled(*amenity))
    }
}

impl Default for AmenitySelection {
    /// A garage is pre-selected, everything else is opt-in.
    fn default() -> Self {
        Self::none().with(Amenity::Garage, true)
    }
}

/// Everything the estimator needs to price one build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectParameters {
    #[serde(default)]
    pub region: RegionCode,
    #[serde(default)]
    pub area: f64,
    #[serde(default)]
    pub standard_tier: StandardTier,
    #[serde(default)]
    pub floor_count: FloorCount,
    #[serde(default)]
    pub house_type: HouseType,
    #[serde(default)]
    pub starts_on_upper_floor: bool,
    #[serde(default = "default_contingency_percent")]
    pub contingency_percent: f64,
    #[serde(default)]
    pub amenities: AmenitySelection,
    /// Informational only, never priced.
    #[serde(default = "default_bedrooms")]
    pub bedrooms: u8,
    /// Informational only, never priced.
    #[serde(default = "default_bathrooms")]
    pub bathrooms: u8,
}

impl ProjectParameters {
    pub fn new(region: impl Into<RegionCode>, area: f64) -> Self {
        Self {
            region: region.into(),
            area,
            standard_tier: StandardTier::default(),
            floor_count: FloorCount::default(),
            house_type: HouseType::default(),
            starts_on_upper_floor: false,
            contingency_percent: default_contingency_percent(),
            amenities: AmenitySelection::default(),
            bedrooms: default_bedrooms(),
            bathrooms: default_bathrooms(),
        }
    }

    /// Checks the ranges the estimator relies on. Table membership is checked by
    /// [`crate::estimator::estimate`].
    pub fn validate(&self) -> Result<(), EstimateError> {
        if !self.area.is_finite() || self.area <= 0.0 {
            return Err(EstimateError::invalid(
                "area",
                format!("must be a positive number (found {})", self.area),
            ));
        }

        let (min, max) = CONTINGENCY_PERCENT_RANGE;
        if !self.contingency_percent.is_finite()
            || self.contingency_percent < min
            || self.contingency_percent > max
        {
            return Err(EstimateError::invalid(
                "contingency_percent",
                format!(
                    "must be between {min} and {max} (found {})",
                    self.contingency_percent
                ),
            ));
        }

        Ok(())
    }
}

impl Default for ProjectParameters {
    /// An unfilled form: no region and no area yet.
    fn default() -> Self {
        Self::new(RegionCode::default(), 0.0)
    }
}

fn default_contingency_percent() -> f64 {
    10.0
}

fn default_bedrooms() -> u8 {
    3
}

fn default_bathrooms() -> u8 {
    2
}

/// Estimator failures. Every variant is a caller fault; nothing is retried.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EstimateError {
    #[error("invalid parameter `{field}`: {reason}")]
    InvalidParameter { field: &'static str, reason: String },
}

impl EstimateError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_codes_are_normalized() {
        assert_eq!(RegionCode::new(" sp ").as_str(), "SP");
        let parsed: RegionCode = serde_json::from_str("\"rj\"").expect("region parses");
        assert_eq!(parsed, RegionCode::new("RJ"));
        assert!(RegionCode::default().is_blank());
    }

    #[test]
    fn floor_count_rejects_unlisted_values() {
        assert_eq!(FloorCount::try_from(2).expect("two floors"), FloorCount::Two);
        let err = FloorCount::try_from(4).expect_err("four floors not offered");
        assert!(matches!(
            err,
            EstimateError::InvalidParameter {
                field: "floor_count",
                ..
            }
        ));
        assert!(serde_json::from_str::<FloorCount>("0").is_err());
        assert_eq!(
            serde_json::to_string(&FloorCount::Three).expect("serializes"),
            "3"
        );
    }

    #[test]
    fn identifiers_parse_from_cli_strings() {
        assert_eq!("HIGH".parse::<StandardTier>().expect("tier"), StandardTier::High);
        assert_eq!(
            "two-storey".parse::<HouseType>().expect("house type"),
            HouseType::TwoStorey
        );
        assert!("luxury".parse::<StandardTier>().is_err());
    }

    #[test]
    fn amenity_selection_defaults_to_garage_only() {
        let selection = AmenitySelection::default();
        let enabled: Vec<_> = selection.enabled().collect();
        assert_eq!(enabled, vec![Amenity::Garage]);

        let parsed: AmenitySelection =
            serde_json::from_str(r#"{ "pool": true }"#).expect("selection parses");
        assert!(parsed.pool && !parsed.garage && !parsed.security_system);
    }

    #[test]
    fn omitted_amenities_keep_the_garage_but_named_ones_are_literal() {
        let omitted: ProjectParameters =
            serde_json::from_str(r#"{ "region": "SP", "area": 100 }"#).expect("parses");
        assert_eq!(omitted.amenities, AmenitySelection::default());

        let named: ProjectParameters = serde_json::from_str(
            r#"{ "region": "SP", "area": 100, "amenities": { "pool": true } }"#,
        )
        .expect("parses");
        let enabled: Vec<_> = named.amenities.enabled().collect();
        assert_eq!(enabled, vec![Amenity::Pool]);
    }

    #[test]
    fn validate_rejects_non_positive_area_and_out_of_range_contingency() {
        let mut params = ProjectParameters::new("SP", 0.0);
        assert!(matches!(
            params.validate(),
            Err(EstimateError::InvalidParameter { field: "area", .. })
        ));

        params.area = f64::NAN;
        assert!(params.validate().is_err());

        params.area = 80.0;
        params.contingency_percent = 31.0;
        assert!(matches!(
            params.validate(),
            Err(EstimateError::InvalidParameter {
                field: "contingency_percent",
                ..
            })
        ));

        params.contingency_percent = 0.0;
        assert!(params.validate().is_ok());
    }
}
