//! Harvest engine — reaps mature cells and resets the field.

use tracing::info;

use crate::farming::irrigation::field_demand;
use crate::shared::*;

/// Harvest gate: the field must be fully planted AND current stock must
/// cover the aggregate demand. Pure query; mutates nothing.
pub fn can_harvest(
    field: &FieldGrid,
    inventory: &Inventory,
    catalog: &CropCatalog,
) -> Result<bool, GameError> {
    if !field.is_full() {
        return Ok(false);
    }
    let demand = field_demand(field, catalog)?;
    Ok(demand.is_met_by(inventory))
}

/// Reap every mature cell, credit the sale, and clear the whole grid.
///
/// A cell is mature when its growth stage equals its crop's matured
/// stage. Immature cells yield nothing but are cleared all the same.
pub fn harvest_field(
    field: &mut FieldGrid,
    wallet: &mut Wallet,
    catalog: &CropCatalog,
) -> Result<HarvestSummary, GameError> {
    let mut summary = HarvestSummary::default();

    for cell in field.planted() {
        summary.cells_cleared += 1;
        let def = catalog.get(&cell.crop_type)?;
        if cell.growth_stage == def.growth_stages {
            *summary.yields.entry(cell.crop_type.clone()).or_insert(0.0) +=
                def.yield_per_plant;
            summary.earnings += def.yield_per_plant * def.market_price;
            summary.cells_harvested += 1;
        }
    }

    for total in summary.yields.values_mut() {
        *total = round1(*total);
    }
    summary.earnings = round2(summary.earnings);

    wallet.credit(summary.earnings);
    field.clear();

    info!(
        "[Farming] Harvested {} of {} cells for ${:.2}. New balance: ${:.2}",
        summary.cells_harvested, summary.cells_cleared, summary.earnings, wallet.balance
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn test_catalog() -> CropCatalog {
        let mut crops = HashMap::new();
        crops.insert(
            "maize".to_string(),
            CropDef {
                name: "Maize".into(),
                base_cost: 3.0,
                market_price: 5.0,
                water_need: 3.5,
                fertilizer_need: 1.8,
                yield_per_plant: 2.0,
                growth_stages: 4,
                icon: "🌽".into(),
            },
        );
        crops.insert(
            "onion".to_string(),
            CropDef {
                name: "Onion".into(),
                base_cost: 3.5,
                market_price: 7.0,
                water_need: 2.5,
                fertilizer_need: 1.2,
                yield_per_plant: 1.8,
                growth_stages: 4,
                icon: "🧅".into(),
            },
        );
        CropCatalog { crops }
    }

    fn plant_at_stage(field: &mut FieldGrid, row: usize, col: usize, crop: &str, stage: u8) {
        let mut planted = PlantedCrop::new(crop);
        planted.growth_stage = stage;
        *field.cell_mut(row, col) = Some(planted);
    }

    #[test]
    fn gate_requires_a_full_grid() {
        let catalog = test_catalog();
        let mut field = FieldGrid::default();
        let mut inventory = Inventory::default();
        inventory.add_water(1000.0);
        inventory.add_fertilizer(1000.0);

        plant_at_stage(&mut field, 0, 0, "maize", 0);
        assert!(!can_harvest(&field, &inventory, &catalog).unwrap());

        for row in 0..FIELD_ROWS {
            for col in 0..FIELD_COLS {
                if field.cell(row, col).is_none() {
                    plant_at_stage(&mut field, row, col, "maize", 0);
                }
            }
        }
        assert!(can_harvest(&field, &inventory, &catalog).unwrap());
    }

    #[test]
    fn gate_requires_stock_to_cover_demand() {
        let catalog = test_catalog();
        let mut field = FieldGrid::default();
        for row in 0..FIELD_ROWS {
            for col in 0..FIELD_COLS {
                plant_at_stage(&mut field, row, col, "maize", 0);
            }
        }

        // 25 maize cells need 87.5L and 45kg
        let mut inventory = Inventory::default();
        inventory.add_water(87.4);
        inventory.add_fertilizer(45.0);
        assert!(!can_harvest(&field, &inventory, &catalog).unwrap());

        inventory.add_water(0.1);
        assert!(can_harvest(&field, &inventory, &catalog).unwrap());
    }

    #[test]
    fn harvest_reaps_mature_cells_and_clears_everything() {
        let catalog = test_catalog();
        let mut field = FieldGrid::default();
        let mut wallet = Wallet::default();

        plant_at_stage(&mut field, 0, 0, "maize", 4);
        plant_at_stage(&mut field, 0, 1, "maize", 4);
        plant_at_stage(&mut field, 0, 2, "onion", 4);
        plant_at_stage(&mut field, 4, 4, "maize", 0); // immature, lost

        let summary = harvest_field(&mut field, &mut wallet, &catalog).unwrap();

        assert_eq!(summary.cells_harvested, 3);
        assert_eq!(summary.cells_cleared, 4);
        assert_eq!(summary.yields.get("maize"), Some(&4.0));
        assert_eq!(summary.yields.get("onion"), Some(&1.8));
        // 4 maize units at $5 plus 1.8 onion units at $7
        assert_eq!(summary.earnings, 32.6);
        assert_eq!(wallet.balance, STARTING_BALANCE + 32.6);
        assert_eq!(field.planted_count(), 0, "grid must be fully cleared");
    }

    #[test]
    fn harvesting_an_empty_field_yields_nothing() {
        let catalog = test_catalog();
        let mut field = FieldGrid::default();
        let mut wallet = Wallet::default();

        let summary = harvest_field(&mut field, &mut wallet, &catalog).unwrap();
        assert!(summary.yields.is_empty());
        assert_eq!(summary.earnings, 0.0);
        assert_eq!(wallet.balance, STARTING_BALANCE);
    }
}
