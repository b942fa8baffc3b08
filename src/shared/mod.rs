//! Shared types for the Sproutfield simulation core.
//!
//! This is the type contract. Every domain module imports from here.
//! No domain imports from any other domain directly.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

// ═══════════════════════════════════════════════════════════════════════
// CROP CATALOG — static reference data
// ═══════════════════════════════════════════════════════════════════════

/// Unique identifier for every crop type in the game.
/// Using string IDs for data-driven flexibility.
pub type CropId = String;

/// Immutable economics and growth parameters for one crop type.
/// Deserialized from the catalog document; the crop id is the map key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropDef {
    pub name: String,
    /// Currency per seed unit.
    pub base_cost: f64,
    /// Currency per unit yield at sale.
    pub market_price: f64,
    /// Liters required per planted instance to reach maturity.
    pub water_need: f64,
    /// Kilograms required per planted instance to reach maturity.
    pub fertilizer_need: f64,
    pub yield_per_plant: f64,
    /// Growth stage at which the crop counts as matured.
    #[serde(default = "default_growth_stages")]
    pub growth_stages: u8,
    pub icon: String,
}

fn default_growth_stages() -> u8 {
    MATURE_STAGE_DEFAULT
}

#[derive(Debug, Clone, Default)]
pub struct CropCatalog {
    pub crops: HashMap<CropId, CropDef>,
}

impl CropCatalog {
    pub fn get(&self, id: &str) -> Result<&CropDef, GameError> {
        self.crops
            .get(id)
            .ok_or_else(|| GameError::UnknownCrop { crop: id.to_string() })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.crops.contains_key(id)
    }

    /// Crop ids in stable (sorted) order for display.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.crops.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.crops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crops.is_empty()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// FIELD GRID
// ═══════════════════════════════════════════════════════════════════════

/// One planted cell. Created by planting, mutated by resource
/// application, destroyed by harvest.
#[derive(Debug, Clone, PartialEq)]
pub struct PlantedCrop {
    /// Always a valid catalog key once set.
    pub crop_type: CropId,
    /// 0 on planting; jumps to the crop's matured stage when resources
    /// are applied successfully.
    pub growth_stage: u8,
    /// Cumulative liters committed to this cell.
    pub water_applied: f64,
    /// Cumulative kilograms committed to this cell.
    pub fertilizer_applied: f64,
}

impl PlantedCrop {
    pub fn new(crop_type: impl Into<CropId>) -> Self {
        Self {
            crop_type: crop_type.into(),
            growth_stage: 0,
            water_applied: 0.0,
            fertilizer_applied: 0.0,
        }
    }
}

/// Fixed-size planting grid. Out-of-bounds access is a programming
/// error and panics; callers index with known-valid coordinates.
#[derive(Debug, Clone)]
pub struct FieldGrid {
    /// Row-major cells. Dimensions never change for a session.
    pub cells: Vec<Vec<Option<PlantedCrop>>>,
}

impl Default for FieldGrid {
    fn default() -> Self {
        Self {
            cells: vec![vec![None; FIELD_COLS]; FIELD_ROWS],
        }
    }
}

impl FieldGrid {
    pub fn cell(&self, row: usize, col: usize) -> Option<&PlantedCrop> {
        self.cells[row][col].as_ref()
    }

    pub fn cell_mut(&mut self, row: usize, col: usize) -> &mut Option<PlantedCrop> {
        &mut self.cells[row][col]
    }

    pub fn planted_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|c| c.is_some())
    }

    /// Resets every cell to empty.
    pub fn clear(&mut self) {
        for cell in self.cells.iter_mut().flatten() {
            *cell = None;
        }
    }

    pub fn planted(&self) -> impl Iterator<Item = &PlantedCrop> {
        self.cells.iter().flatten().filter_map(|c| c.as_ref())
    }

    pub fn planted_mut(&mut self) -> impl Iterator<Item = &mut PlantedCrop> {
        self.cells.iter_mut().flatten().filter_map(|c| c.as_mut())
    }
}

// ═══════════════════════════════════════════════════════════════════════
// INVENTORY & WALLET
// ═══════════════════════════════════════════════════════════════════════

/// Seed counts plus bulk water and fertilizer stock. Bulk quantities
/// are kept at 0.1 precision so repeated float arithmetic cannot drift,
/// and no mutation may drive any level below zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inventory {
    pub seeds: HashMap<CropId, u32>,
    /// Liters.
    pub water: f64,
    /// Kilograms.
    pub fertilizer: f64,
}

impl Inventory {
    pub fn seed_count(&self, crop: &str) -> u32 {
        self.seeds.get(crop).copied().unwrap_or(0)
    }

    pub fn add_seeds(&mut self, crop: &str, quantity: u32) {
        *self.seeds.entry(crop.to_string()).or_insert(0) += quantity;
    }

    /// Consume one seed. Returns false (and changes nothing) if none left.
    pub fn take_seed(&mut self, crop: &str) -> bool {
        match self.seeds.get_mut(crop) {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            }
            _ => false,
        }
    }

    pub fn add_water(&mut self, liters: f64) {
        self.water = round1(self.water + liters);
    }

    pub fn add_fertilizer(&mut self, kilos: f64) {
        self.fertilizer = round1(self.fertilizer + kilos);
    }

    pub fn consume_water(&mut self, liters: f64) {
        self.water = round1((self.water - liters).max(0.0));
    }

    pub fn consume_fertilizer(&mut self, kilos: f64) {
        self.fertilizer = round1((self.fertilizer - kilos).max(0.0));
    }
}

/// The money ledger. Purchases are the only path that reduces the
/// balance, and none may drive it negative.
#[derive(Debug, Clone, PartialEq)]
pub struct Wallet {
    pub balance: f64,
}

impl Default for Wallet {
    fn default() -> Self {
        Self {
            balance: STARTING_BALANCE,
        }
    }
}

impl Wallet {
    pub fn can_afford(&self, cost: f64) -> bool {
        self.balance >= cost
    }

    pub fn debit(&mut self, amount: f64) {
        self.balance = round2(self.balance - amount);
    }

    pub fn credit(&mut self, amount: f64) {
        self.balance = round2(self.balance + amount);
    }
}

/// Round to one decimal place (bulk resource precision).
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round to two decimal places (currency precision).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ═══════════════════════════════════════════════════════════════════════
// OPERATION RESULTS — receipts returned by commands
// ═══════════════════════════════════════════════════════════════════════

/// Paper trail for a completed purchase.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseReceipt {
    /// What was bought, e.g. "wheat seeds", "water", "fertilizer".
    pub item: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub cost: f64,
}

/// Aggregate water/fertilizer required by the occupied cells of a field.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ResourceDemand {
    pub water: f64,
    pub fertilizer: f64,
}

impl ResourceDemand {
    pub fn is_met_by(&self, inventory: &Inventory) -> bool {
        inventory.water >= self.water && inventory.fertilizer >= self.fertilizer
    }
}

/// Outcome of one resource application pass over the field.
/// `cells_grown == 0` means the field had nothing planted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResourceApplication {
    pub cells_grown: usize,
    pub water_used: f64,
    pub fertilizer_used: f64,
}

/// Outcome of a harvest: what was reaped and what it sold for.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HarvestSummary {
    /// Crop type → units reaped from mature cells.
    pub yields: HashMap<CropId, f64>,
    pub earnings: f64,
    /// Mature cells that produced yield.
    pub cells_harvested: usize,
    /// All cells emptied, mature or not.
    pub cells_cleared: usize,
}

// ═══════════════════════════════════════════════════════════════════════
// EXTERNAL COLLABORATOR DATA
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Assembled weather observation for a location. Missing optional
/// fields mean "unknown", never an error.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    pub temperature_c: f64,
    pub precipitation_mm: f64,
    pub elevation_m: Option<f64>,
    pub soil_type: Option<String>,
}

impl Default for WeatherSnapshot {
    fn default() -> Self {
        Self {
            temperature_c: DEFAULT_TEMPERATURE_C,
            precipitation_mm: DEFAULT_PRECIPITATION_MM,
            elevation_m: None,
            soil_type: None,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// ERRORS
// ═══════════════════════════════════════════════════════════════════════

/// Everything a simulation command can reject. None of these are fatal;
/// a rejected command leaves all state untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameError {
    #[error("unknown crop type '{crop}'")]
    UnknownCrop { crop: String },

    #[error("quantity must be positive (got {quantity})")]
    InvalidQuantity { quantity: f64 },

    #[error("insufficient funds: need ${needed:.2}, have ${available:.2}")]
    InsufficientFunds { needed: f64, available: f64 },

    #[error(
        "insufficient resources: need {water_needed:.1}L water and {fertilizer_needed:.1}kg fertilizer, have {water_available:.1}L and {fertilizer_available:.1}kg"
    )]
    InsufficientResources {
        water_needed: f64,
        water_available: f64,
        fertilizer_needed: f64,
        fertilizer_available: f64,
    },

    #[error("cell ({row}, {col}) is already planted")]
    CellOccupied { row: usize, col: usize },

    #[error("no {crop} seeds in inventory")]
    NoSeeds { crop: String },
}

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

pub const FIELD_ROWS: usize = 5;
pub const FIELD_COLS: usize = 5;
pub const FIELD_CELLS: usize = FIELD_ROWS * FIELD_COLS;

pub const STARTING_BALANCE: f64 = 300.0;

/// Currency per liter of water.
pub const WATER_PRICE_PER_LITER: f64 = 0.2;
/// Currency per kilogram of fertilizer.
pub const FERTILIZER_PRICE_PER_KG: f64 = 2.0;

/// Matured growth stage when the catalog document omits `growthStages`.
pub const MATURE_STAGE_DEFAULT: u8 = 4;

// Fallbacks when the weather collaborator cannot be reached.
pub const DEFAULT_TEMPERATURE_C: f64 = 25.0;
pub const DEFAULT_PRECIPITATION_MM: f64 = 0.0;

// Default location when no coordinates are supplied (New Delhi).
pub const DEFAULT_LATITUDE: f64 = 28.6139;
pub const DEFAULT_LONGITUDE: f64 = 77.2090;
