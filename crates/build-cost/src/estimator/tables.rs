use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use super::domain::{FloorCount, HouseType, RegionCode, StandardTier};
use crate::config::CatalogConfig;

/// Factor used when an identifier is missing from its table.
pub const FALLBACK_FACTOR: f64 = 1.0;

const STANDARD_REGIONS: [(&str, &str, f64); 27] = [
    ("AC", "Acre", 1850.0),
    ("AL", "Alagoas", 1780.0),
    ("AP", "Amapá", 1920.0),
    ("AM", "Amazonas", 1890.0),
    ("BA", "Bahia", 1750.0),
    ("CE", "Ceará", 1720.0),
    ("DF", "Distrito Federal", 2100.0),
    ("ES", "Espírito Santo", 1880.0),
    ("GO", "Goiás", 1820.0),
    ("MA", "Maranhão", 1680.0),
    ("MT", "Mato Grosso", 1840.0),
    ("MS", "Mato Grosso do Sul", 1860.0),
    ("MG", "Minas Gerais", 1800.0),
    ("PA", "Pará", 1790.0),
    ("PB", "Paraíba", 1710.0),
    ("PR", "Paraná", 1920.0),
    ("PE", "Pernambuco", 1760.0),
    ("PI", "Piauí", 1690.0),
    ("RJ", "Rio de Janeiro", 2050.0),
    ("RN", "Rio Grande do Norte", 1740.0),
    ("RS", "Rio Grande do Sul", 1950.0),
    ("RO", "Rondônia", 1830.0),
    ("RR", "Roraima", 1900.0),
    ("SC", "Santa Catarina", 1940.0),
    ("SP", "São Paulo", 2080.0),
    ("SE", "Sergipe", 1730.0),
    ("TO", "Tocantins", 1810.0),
];

/// Errors raised while loading the region unit-cost table.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read unit cost table {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid unit cost CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("unit cost row {row} has a blank region code")]
    BlankCode { row: usize },
    #[error("region {code} has invalid unit cost {value}")]
    InvalidUnitCost { code: RegionCode, value: f64 },
    #[error("region {0} appears more than once")]
    DuplicateRegion(RegionCode),
    #[error("unit cost table is empty")]
    Empty,
}

/// Baseline construction cost for one region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionEntry {
    pub code: RegionCode,
    pub name: String,
    pub unit_cost: f64,
}

/// Region code to unit cost (currency per square metre).
#[derive(Debug, Clone, PartialEq)]
pub struct RegionCostTable {
    entries: BTreeMap<RegionCode, RegionEntry>,
}

impl RegionCostTable {
    pub fn standard() -> Self {
        let entries = STANDARD_REGIONS
            .iter()
            .map(|(code, name, unit_cost)| {
                let code = RegionCode::new(code);
                let entry = RegionEntry {
                    code: code.clone(),
                    name: (*name).to_string(),
                    unit_cost: *unit_cost,
                };
                (code, entry)
            })
            .collect();
        Self { entries }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    /// Parses a `code,name,unit_cost` CSV export.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut entries = BTreeMap::new();

        for (index, record) in csv_reader.deserialize::<RegionRow>().enumerate() {
            let row = record?;
            let code = RegionCode::new(&row.code);
            if code.is_blank() {
                // header is line 1
                return Err(CatalogError::BlankCode { row: index + 2 });
            }
            if !row.unit_cost.is_finite() || row.unit_cost <= 0.0 {
                return Err(CatalogError::InvalidUnitCost {
                    code,
                    value: row.unit_cost,
                });
            }
            if entries.contains_key(&code) {
                return Err(CatalogError::DuplicateRegion(code));
            }

            let name = if row.name.is_empty() {
                code.to_string()
            } else {
                row.name
            };
            entries.insert(
                code.clone(),
                RegionEntry {
                    code,
                    name,
                    unit_cost: row.unit_cost,
                },
            );
        }

        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }

        Ok(Self { entries })
    }

    pub fn get(&self, code: &RegionCode) -> Option<&RegionEntry> {
        self.entries.get(code)
    }

    pub fn unit_cost(&self, code: &RegionCode) -> Option<f64> {
        self.get(code).map(|entry| entry.unit_cost)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegionEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct RegionRow {
    code: String,
    #[serde(default)]
    name: String,
    unit_cost: f64,
}

/// Multiplier plus display text for one table row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FactorEntry {
    pub factor: f64,
    pub label: &'static str,
    pub description: &'static str,
}

/// Identifier to multiplier lookup. Missing identifiers price at [`FALLBACK_FACTOR`].
#[derive(Debug, Clone, PartialEq)]
pub struct FactorTable<K: Ord> {
    entries: BTreeMap<K, FactorEntry>,
}

impl<K: Ord + Copy> FactorTable<K> {
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, FactorEntry)>,
    {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn get(&self, key: K) -> Option<&FactorEntry> {
        self.entries.get(&key)
    }

    pub fn factor(&self, key: K) -> f64 {
        self.get(key)
            .map(|entry| entry.factor)
            .unwrap_or(FALLBACK_FACTOR)
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, &FactorEntry)> {
        self.entries.iter().map(|(key, entry)| (*key, entry))
    }
}

fn entry(factor: f64, label: &'static str, description: &'static str) -> FactorEntry {
    FactorEntry {
        factor,
        label,
        description,
    }
}

/// Every lookup the estimator reads. Built once at start-up and shared read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct CostTables {
    pub regions: RegionCostTable,
    pub standards: FactorTable<StandardTier>,
    pub floors: FactorTable<FloorCount>,
    pub house_types: FactorTable<HouseType>,
}

impl CostTables {
    pub fn standard() -> Self {
        Self {
            regions: RegionCostTable::standard(),
            standards: FactorTable::from_entries([
                (
                    StandardTier::Low,
                    entry(0.85, "Low standard", "Simple finish"),
                ),
                (
                    StandardTier::Medium,
                    entry(1.0, "Medium standard", "Standard finish"),
                ),
                (
                    StandardTier::High,
                    entry(1.2, "High standard", "Premium finish"),
                ),
            ]),
            floors: FactorTable::from_entries([
                (FloorCount::One, entry(1.0, "1 floor", "Ground floor only")),
                (FloorCount::Two, entry(1.15, "2 floors", "Structure for two floors")),
                (
                    FloorCount::Three,
                    entry(1.25, "3 floors", "Structure for three floors"),
                ),
            ]),
            house_types: FactorTable::from_entries([
                (
                    HouseType::SingleStorey,
                    entry(1.0, "Single-storey house", "All rooms on one level"),
                ),
                (
                    HouseType::TwoStorey,
                    entry(1.15, "Two-storey house", "Living areas split over two levels"),
                ),
                (
                    HouseType::Triplex,
                    entry(1.25, "Triplex", "Three stacked living levels"),
                ),
            ]),
        }
    }

    pub fn with_regions(self, regions: RegionCostTable) -> Self {
        Self { regions, ..self }
    }

    /// Compiled-in tables, with the region costs replaced when a CSV is configured.
    pub fn load(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let tables = Self::standard();
        match &config.unit_cost_csv {
            Some(path) => {
                let regions = RegionCostTable::from_path(path)?;
                info!(path = %path.display(), regions = regions.len(), "loaded unit cost table");
                Ok(tables.with_regions(regions))
            }
            None => Ok(tables),
        }
    }
}

impl Default for CostTables {
    fn default() -> Self {
        Self::standard()
    }
}
