//! Session façade — one explicitly owned game instance.
//!
//! `GameSession` owns the catalog, field, inventory, and wallet, and
//! exposes the command interface over them. There is no ambient state
//! anywhere: callers hold the session and pass nothing else around.

use tracing::info;

use crate::economy::{self, EconomyStats};
use crate::farming;
use crate::shared::*;

#[derive(Debug, Clone)]
pub struct GameSession {
    pub catalog: CropCatalog,
    pub field: FieldGrid,
    pub inventory: Inventory,
    pub wallet: Wallet,
    pub stats: EconomyStats,
}

impl GameSession {
    /// Start a fresh session: empty field, empty inventory, starting balance.
    pub fn new(catalog: CropCatalog) -> Self {
        info!(
            "[Session] New session: {} crop types, ${:.2} starting balance",
            catalog.len(),
            STARTING_BALANCE
        );
        Self {
            catalog,
            field: FieldGrid::default(),
            inventory: Inventory::default(),
            wallet: Wallet::default(),
            stats: EconomyStats::default(),
        }
    }

    // ── Purchases & credits ─────────────────────────────────────────────

    pub fn purchase_seeds(
        &mut self,
        crop: &str,
        quantity: u32,
    ) -> Result<PurchaseReceipt, GameError> {
        economy::buy_seeds(
            &mut self.wallet,
            &mut self.inventory,
            &mut self.stats,
            &self.catalog,
            crop,
            quantity,
        )
    }

    pub fn purchase_water(&mut self, liters: f64) -> Result<PurchaseReceipt, GameError> {
        economy::buy_water(&mut self.wallet, &mut self.inventory, &mut self.stats, liters)
    }

    pub fn purchase_fertilizer(&mut self, kilos: f64) -> Result<PurchaseReceipt, GameError> {
        economy::buy_fertilizer(&mut self.wallet, &mut self.inventory, &mut self.stats, kilos)
    }

    /// Grant seeds without payment (starter kits).
    pub fn credit_seeds(&mut self, crop: &str, quantity: u32) -> Result<(), GameError> {
        economy::credit_seeds(&mut self.inventory, &self.catalog, crop, quantity)
    }

    // ── Field commands ──────────────────────────────────────────────────

    pub fn plant(&mut self, row: usize, col: usize, crop: &str) -> Result<(), GameError> {
        farming::plant_crop(
            &mut self.field,
            &mut self.inventory,
            &self.catalog,
            row,
            col,
            crop,
        )
    }

    pub fn apply_resources(&mut self) -> Result<ResourceApplication, GameError> {
        farming::apply_resources(&mut self.field, &mut self.inventory, &self.catalog)
    }

    /// Reap mature cells and reset the grid. The harvest dialog applies
    /// resources first and then calls this; it only reaps.
    pub fn harvest(&mut self) -> Result<HarvestSummary, GameError> {
        let summary = farming::harvest_field(&mut self.field, &mut self.wallet, &self.catalog)?;
        if summary.cells_cleared > 0 {
            self.stats.record_harvest(summary.earnings);
        }
        Ok(summary)
    }

    // ── Queries ─────────────────────────────────────────────────────────

    pub fn field_demand(&self) -> Result<ResourceDemand, GameError> {
        farming::field_demand(&self.field, &self.catalog)
    }

    pub fn can_harvest(&self) -> Result<bool, GameError> {
        farming::can_harvest(&self.field, &self.inventory, &self.catalog)
    }
}
