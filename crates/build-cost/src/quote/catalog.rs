use serde::Serialize;

use super::RECOMMENDED_CONTINGENCY_PERCENT;
use crate::estimator::domain::CONTINGENCY_PERCENT_RANGE;
use crate::estimator::{Amenity, CostTables, FactorTable, FloorCount, HouseType, StandardTier};
use crate::payment::{
    PaymentMode, DEFAULT_DOWN_PAYMENT_PERCENT, DEFAULT_INSTALLMENT_COUNT,
    DEFAULT_MONTHLY_RATE_PERCENT,
};

const INSTALLMENT_COUNTS: [u32; 6] = [6, 12, 18, 24, 36, 48];
const FINANCING_TERMS: [u32; 10] = [12, 24, 36, 48, 60, 84, 120, 180, 240, 360];

#[derive(Debug, Clone, Serialize)]
pub struct RegionOption {
    pub code: String,
    pub name: String,
    pub unit_cost: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FactorOption<K> {
    pub id: K,
    pub label: &'static str,
    pub description: &'static str,
    pub factor: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AmenityOption {
    pub amenity: Amenity,
    pub label: &'static str,
    pub surcharge_rate: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct PercentRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentOptions {
    pub modes: Vec<PaymentMode>,
    pub installment_counts: Vec<u32>,
    pub financing_terms: Vec<u32>,
    pub default_installment_count: u32,
    pub down_payment_percent: PercentRange,
    pub monthly_rate_percent: PercentRange,
}

/// Everything a form needs to render its pickers, derived from the loaded tables.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogView {
    pub regions: Vec<RegionOption>,
    pub standard_tiers: Vec<FactorOption<StandardTier>>,
    pub floor_counts: Vec<FactorOption<FloorCount>>,
    pub house_types: Vec<FactorOption<HouseType>>,
    pub amenities: Vec<AmenityOption>,
    pub contingency_percent: PercentRange,
    pub recommended_contingency_percent: (f64, f64),
    pub payment: PaymentOptions,
}

fn factor_options<K: Ord + Copy>(table: &FactorTable<K>) -> Vec<FactorOption<K>> {
    table
        .iter()
        .map(|(id, entry)| FactorOption {
            id,
            label: entry.label,
            description: entry.description,
            factor: entry.factor,
        })
        .collect()
}

impl CatalogView {
    pub fn from_tables(tables: &CostTables) -> Self {
        let (contingency_min, contingency_max) = CONTINGENCY_PERCENT_RANGE;
        Self {
            regions: tables
                .regions
                .iter()
                .map(|entry| RegionOption {
                    code: entry.code.to_string(),
                    name: entry.name.clone(),
                    unit_cost: entry.unit_cost,
                })
                .collect(),
            standard_tiers: factor_options(&tables.standards),
            floor_counts: factor_options(&tables.floors),
            house_types: factor_options(&tables.house_types),
            amenities: Amenity::ordered()
                .into_iter()
                .map(|amenity| AmenityOption {
                    amenity,
                    label: amenity.label(),
                    surcharge_rate: amenity.surcharge_rate(),
                })
                .collect(),
            contingency_percent: PercentRange {
                min: contingency_min,
                max: contingency_max,
                step: 1.0,
                default: 10.0,
            },
            recommended_contingency_percent: RECOMMENDED_CONTINGENCY_PERCENT,
            payment: PaymentOptions {
                modes: PaymentMode::ordered().to_vec(),
                installment_counts: INSTALLMENT_COUNTS.to_vec(),
                financing_terms: FINANCING_TERMS.to_vec(),
                default_installment_count: DEFAULT_INSTALLMENT_COUNT,
                down_payment_percent: PercentRange {
                    min: 10.0,
                    max: 50.0,
                    step: 5.0,
                    default: DEFAULT_DOWN_PAYMENT_PERCENT,
                },
                monthly_rate_percent: PercentRange {
                    min: 0.5,
                    max: 3.0,
                    step: 0.1,
                    default: DEFAULT_MONTHLY_RATE_PERCENT,
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_reflects_loaded_tables() {
        let view = CatalogView::from_tables(&CostTables::standard());
        assert_eq!(view.regions.len(), 27);
        assert_eq!(view.regions[0].code, "AC");
        assert_eq!(view.standard_tiers.len(), 3);
        assert_eq!(view.amenities.len(), 5);
        assert!(view.payment.financing_terms.contains(&360));

        let json = serde_json::to_value(&view).expect("catalog serializes");
        assert_eq!(json["floor_counts"][1]["id"], 2);
        assert_eq!(json["house_types"][2]["id"], "triplex");
    }
}
