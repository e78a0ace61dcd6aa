use serde::Serialize;
use tracing::debug;

use super::domain::{Amenity, EstimateError, ProjectParameters, UPPER_FLOOR_MULTIPLIER};
use super::tables::CostTables;

pub const MATERIALS_SHARE: f64 = 0.50;
pub const LABOR_SHARE: f64 = 0.40;
pub const CONTINGENCY_SHARE: f64 = 0.10;

/// Fixed display split of the final total.
///
/// The reserve share is always 10 % of the total and is not derived from
/// [`CostBreakdown::contingency_value`]; both figures are reported side by side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostAllocation {
    pub materials: f64,
    pub labor: f64,
    pub contingency_reserve: f64,
}

impl CostAllocation {
    fn of(total: f64) -> Self {
        Self {
            materials: total * MATERIALS_SHARE,
            labor: total * LABOR_SHARE,
            contingency_reserve: total * CONTINGENCY_SHARE,
        }
    }

    pub fn sum(&self) -> f64 {
        self.materials + self.labor + self.contingency_reserve
    }
}

/// Surcharge charged for one enabled amenity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AmenityLine {
    pub amenity: Amenity,
    pub label: &'static str,
    pub rate: f64,
    pub amount: f64,
}

/// One row of the itemized result: the increment a stage added on top of the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BreakdownLine {
    pub stage: BreakdownStage,
    pub label: &'static str,
    pub amount: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakdownStage {
    Base,
    Standard,
    Floors,
    HouseType,
    UpperFloor,
    Amenities,
    Contingency,
    Total,
}

impl BreakdownStage {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Base => "Base cost",
            Self::Standard => "Standard adjustment",
            Self::Floors => "Floors adjustment",
            Self::HouseType => "House type adjustment",
            Self::UpperFloor => "Upper floor adjustment",
            Self::Amenities => "Amenities",
            Self::Contingency => "Contingency",
            Self::Total => "Total",
        }
    }
}

/// Running subtotals of the adjustment chain, in evaluation order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub unit_cost: f64,
    pub base: f64,
    pub after_standard: f64,
    pub after_floors: f64,
    pub after_house_type: f64,
    pub after_upper_floor: f64,
    pub amenities: Vec<AmenityLine>,
    pub amenity_surcharge: f64,
    pub pre_contingency: f64,
    pub contingency_percent: f64,
    pub contingency_value: f64,
    pub total: f64,
    pub allocation: CostAllocation,
}

impl CostBreakdown {
    /// Increments shown on the result screen. Stages that added nothing (no upper-floor
    /// start, no amenities) are omitted; base and total are always present.
    pub fn line_items(&self) -> Vec<BreakdownLine> {
        let candidates = [
            (BreakdownStage::Base, self.base),
            (BreakdownStage::Standard, self.after_standard - self.base),
            (BreakdownStage::Floors, self.after_floors - self.after_standard),
            (
                BreakdownStage::HouseType,
                self.after_house_type - self.after_floors,
            ),
            (
                BreakdownStage::UpperFloor,
                self.after_upper_floor - self.after_house_type,
            ),
            (BreakdownStage::Amenities, self.amenity_surcharge),
            (BreakdownStage::Contingency, self.contingency_value),
            (BreakdownStage::Total, self.total),
        ];

        candidates
            .into_iter()
            .filter(|(stage, amount)| match stage {
                BreakdownStage::UpperFloor | BreakdownStage::Amenities => *amount != 0.0,
                _ => true,
            })
            .map(|(stage, amount)| BreakdownLine {
                stage,
                label: stage.label(),
                amount,
            })
            .collect()
    }
}

/// Prices a build. Every stage multiplies the running subtotal; amenities are each
/// charged against the post-upper-floor subtotal and summed, never compounded.
pub fn estimate(
    params: &ProjectParameters,
    tables: &CostTables,
) -> Result<CostBreakdown, EstimateError> {
    params.validate()?;

    let unit_cost = tables.regions.unit_cost(&params.region).ok_or_else(|| {
        EstimateError::invalid(
            "region",
            format!("no unit cost registered for '{}'", params.region),
        )
    })?;

    let base = params.area * unit_cost;
    let after_standard = base * tables.standards.factor(params.standard_tier);
    let after_floors = after_standard * tables.floors.factor(params.floor_count);
    let after_house_type = after_floors * tables.house_types.factor(params.house_type);
    let after_upper_floor = if params.starts_on_upper_floor {
        after_house_type * UPPER_FLOOR_MULTIPLIER
    } else {
        after_house_type
    };

    let amenities: Vec<AmenityLine> = params
        .amenities
        .enabled()
        .map(|amenity| AmenityLine {
            amenity,
            label: amenity.label(),
            rate: amenity.surcharge_rate(),
            amount: after_upper_floor * amenity.surcharge_rate(),
        })
        .collect();
    let amenity_surcharge = amenities.iter().fold(0.0, |sum, line| sum + line.amount);

    let pre_contingency = after_upper_floor + amenity_surcharge;
    let contingency_value = pre_contingency * (params.contingency_percent / 100.0);
    let total = pre_contingency + contingency_value;

    debug!(
        region = %params.region,
        area = params.area,
        total,
        "estimated construction cost"
    );

    Ok(CostBreakdown {
        unit_cost,
        base,
        after_standard,
        after_floors,
        after_house_type,
        after_upper_floor,
        amenities,
        amenity_surcharge,
        pre_contingency,
        contingency_percent: params.contingency_percent,
        contingency_value,
        total,
        allocation: CostAllocation::of(total),
    })
}
