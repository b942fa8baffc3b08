use tracing::info;

use crate::economy::stats::EconomyStats;
use crate::shared::*;

// ─────────────────────────────────────────────────────────────────────────────
// Purchases — the core buy flow: validate, price, afford-check, commit
// ─────────────────────────────────────────────────────────────────────────────

/// Buy seed packets for one crop type. Cost is `quantity × baseCost`.
pub fn buy_seeds(
    wallet: &mut Wallet,
    inventory: &mut Inventory,
    stats: &mut EconomyStats,
    catalog: &CropCatalog,
    crop: &str,
    quantity: u32,
) -> Result<PurchaseReceipt, GameError> {
    if quantity == 0 {
        return Err(GameError::InvalidQuantity { quantity: 0.0 });
    }
    let def = catalog.get(crop)?;
    let cost = round2(def.base_cost * quantity as f64);

    if !wallet.can_afford(cost) {
        info!(
            "[Economy] Cannot afford {} × '{}' seeds (need ${:.2}, have ${:.2})",
            quantity, crop, cost, wallet.balance
        );
        return Err(GameError::InsufficientFunds {
            needed: cost,
            available: wallet.balance,
        });
    }

    wallet.debit(cost);
    inventory.add_seeds(crop, quantity);
    stats.record_spend(cost);

    info!(
        "[Economy] Bought {} × '{}' seeds for ${:.2}. Remaining balance: ${:.2}",
        quantity, crop, cost, wallet.balance
    );

    Ok(PurchaseReceipt {
        item: format!("{} seeds", crop),
        quantity: quantity as f64,
        unit_price: def.base_cost,
        cost,
    })
}

/// Buy bulk water in liters at the fixed unit price.
pub fn buy_water(
    wallet: &mut Wallet,
    inventory: &mut Inventory,
    stats: &mut EconomyStats,
    liters: f64,
) -> Result<PurchaseReceipt, GameError> {
    buy_bulk(wallet, stats, "water", liters, WATER_PRICE_PER_LITER, || {
        inventory.add_water(liters)
    })
}

/// Buy bulk fertilizer in kilograms at the fixed unit price.
pub fn buy_fertilizer(
    wallet: &mut Wallet,
    inventory: &mut Inventory,
    stats: &mut EconomyStats,
    kilos: f64,
) -> Result<PurchaseReceipt, GameError> {
    buy_bulk(
        wallet,
        stats,
        "fertilizer",
        kilos,
        FERTILIZER_PRICE_PER_KG,
        || inventory.add_fertilizer(kilos),
    )
}

/// Shared bulk-purchase flow for water and fertilizer.
fn buy_bulk(
    wallet: &mut Wallet,
    stats: &mut EconomyStats,
    item: &str,
    quantity: f64,
    unit_price: f64,
    commit_stock: impl FnOnce(),
) -> Result<PurchaseReceipt, GameError> {
    if !(quantity > 0.0) || !quantity.is_finite() {
        return Err(GameError::InvalidQuantity { quantity });
    }
    let cost = round2(quantity * unit_price);

    if !wallet.can_afford(cost) {
        info!(
            "[Economy] Cannot afford {} units of {} (need ${:.2}, have ${:.2})",
            quantity, item, cost, wallet.balance
        );
        return Err(GameError::InsufficientFunds {
            needed: cost,
            available: wallet.balance,
        });
    }

    wallet.debit(cost);
    commit_stock();
    stats.record_spend(cost);

    info!(
        "[Economy] Bought {} units of {} for ${:.2}. Remaining balance: ${:.2}",
        quantity, item, cost, wallet.balance
    );

    Ok(PurchaseReceipt {
        item: item.to_string(),
        quantity,
        unit_price,
        cost,
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Credits — unconditional additions, no money involved
// ─────────────────────────────────────────────────────────────────────────────

/// Grant seeds without payment (starter kits). A zero quantity is legal
/// and does nothing beyond validating the crop id.
pub fn credit_seeds(
    inventory: &mut Inventory,
    catalog: &CropCatalog,
    crop: &str,
    quantity: u32,
) -> Result<(), GameError> {
    catalog.get(crop)?;
    inventory.add_seeds(crop, quantity);
    if quantity > 0 {
        info!("[Economy] Granted {} × '{}' seeds", quantity, crop);
    }
    Ok(())
}
