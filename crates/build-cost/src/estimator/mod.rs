//! Sequential cost-adjustment chain and the static tables it reads.

mod breakdown;
pub mod domain;
pub mod tables;

pub use breakdown::{
    estimate, AmenityLine, BreakdownLine, BreakdownStage, CostAllocation, CostBreakdown,
    CONTINGENCY_SHARE, LABOR_SHARE, MATERIALS_SHARE,
};
pub use domain::{
    Amenity, AmenitySelection, EstimateError, FloorCount, HouseType, ProjectParameters,
    RegionCode, StandardTier,
};
pub use tables::{CatalogError, CostTables, FactorEntry, FactorTable, RegionCostTable, RegionEntry};
