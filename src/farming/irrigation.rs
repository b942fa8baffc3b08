use tracing::{info, warn};

use crate::shared::*;

/// Sum the water/fertilizer needs of every occupied cell. Empty cells
/// contribute nothing; an empty field has zero demand.
pub fn field_demand(
    field: &FieldGrid,
    catalog: &CropCatalog,
) -> Result<ResourceDemand, GameError> {
    let mut demand = ResourceDemand::default();
    for cell in field.planted() {
        let def = catalog.get(&cell.crop_type)?;
        demand.water += def.water_need;
        demand.fertilizer += def.fertilizer_need;
    }
    demand.water = round1(demand.water);
    demand.fertilizer = round1(demand.fertilizer);
    Ok(demand)
}

/// Apply water and fertilizer across the whole field in one pass.
///
/// All or nothing: either every occupied cell receives its needs and
/// jumps to its matured stage, or (on shortfall) nothing changes at all.
/// An empty field is a no-op reported as zero cells grown.
pub fn apply_resources(
    field: &mut FieldGrid,
    inventory: &mut Inventory,
    catalog: &CropCatalog,
) -> Result<ResourceApplication, GameError> {
    let demand = field_demand(field, catalog)?;
    if field.planted_count() == 0 {
        return Ok(ResourceApplication::default());
    }

    if !demand.is_met_by(inventory) {
        warn!(
            "[Farming] Resource application aborted: need {:.1}L / {:.1}kg, have {:.1}L / {:.1}kg",
            demand.water, demand.fertilizer, inventory.water, inventory.fertilizer
        );
        return Err(GameError::InsufficientResources {
            water_needed: demand.water,
            water_available: inventory.water,
            fertilizer_needed: demand.fertilizer,
            fertilizer_available: inventory.fertilizer,
        });
    }

    inventory.consume_water(demand.water);
    inventory.consume_fertilizer(demand.fertilizer);

    let mut grown = 0;
    for cell in field.planted_mut() {
        // Every crop id was validated while computing the demand.
        let Ok(def) = catalog.get(&cell.crop_type) else {
            continue;
        };
        cell.water_applied = round1(cell.water_applied + def.water_need);
        cell.fertilizer_applied = round1(cell.fertilizer_applied + def.fertilizer_need);
        cell.growth_stage = def.growth_stages;
        grown += 1;
    }

    info!(
        "[Farming] Applied {:.1}L water and {:.1}kg fertilizer across {} cells",
        demand.water, demand.fertilizer, grown
    );

    Ok(ResourceApplication {
        cells_grown: grown,
        water_used: demand.water,
        fertilizer_used: demand.fertilizer,
    })
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
            "wheat".to_string(),
            CropDef {
                name: "Wheat".into(),
                base_cost: 2.0,
                market_price: 4.5,
                water_need: 3.0,
                fertilizer_need: 1.0,
                yield_per_plant: 2.0,
                growth_stages: 4,
                icon: "🌾".into(),
            },
        );
        CropCatalog { crops }
    }

    fn plant(field: &mut FieldGrid, row: usize, col: usize, crop: &str) {
        *field.cell_mut(row, col) = Some(PlantedCrop::new(crop));
    }

    #[test]
    fn demand_aggregates_over_occupied_cells_only() {
        let catalog = test_catalog();
        let mut field = FieldGrid::default();
        plant(&mut field, 0, 0, "maize");
        plant(&mut field, 0, 1, "maize");
        plant(&mut field, 4, 4, "wheat");

        let demand = field_demand(&field, &catalog).unwrap();
        assert_eq!(demand.water, 10.0);
        assert_eq!(demand.fertilizer, 4.6);
    }

    #[test]
    fn empty_field_application_is_a_no_op() {
        let catalog = test_catalog();
        let mut field = FieldGrid::default();
        let mut inventory = Inventory::default();
        inventory.add_water(10.0);

        let applied = apply_resources(&mut field, &mut inventory, &catalog).unwrap();
        assert_eq!(applied, ResourceApplication::default());
        assert_eq!(inventory.water, 10.0);
    }

    #[test]
    fn shortfall_aborts_with_no_partial_effect() {
        let catalog = test_catalog();
        let mut field = FieldGrid::default();
        plant(&mut field, 0, 0, "maize");
        plant(&mut field, 1, 1, "maize");

        let mut inventory = Inventory::default();
        inventory.add_water(7.0); // exactly enough
        inventory.add_fertilizer(3.5); // 0.1 short of the 3.6 needed

        let err = apply_resources(&mut field, &mut inventory, &catalog).unwrap_err();
        assert_eq!(
            err,
            GameError::InsufficientResources {
                water_needed: 7.0,
                water_available: 7.0,
                fertilizer_needed: 3.6,
                fertilizer_available: 3.5,
            }
        );
        assert_eq!(inventory.water, 7.0);
        assert_eq!(inventory.fertilizer, 3.5);
        for cell in field.planted() {
            assert_eq!(cell.growth_stage, 0, "no cell may grow on shortfall");
            assert_eq!(cell.water_applied, 0.0);
        }
    }

    #[test]
    fn successful_application_matures_every_cell_and_debits_stock() {
        let catalog = test_catalog();
        let mut field = FieldGrid::default();
        plant(&mut field, 0, 0, "maize");
        plant(&mut field, 3, 2, "wheat");

        let mut inventory = Inventory::default();
        inventory.add_water(10.0);
        inventory.add_fertilizer(5.0);

        let applied = apply_resources(&mut field, &mut inventory, &catalog).unwrap();
        assert_eq!(applied.cells_grown, 2);
        assert_eq!(applied.water_used, 6.5);
        assert_eq!(applied.fertilizer_used, 2.8);
        assert_eq!(inventory.water, 3.5);
        assert_eq!(inventory.fertilizer, 2.2);

        let maize = field.cell(0, 0).unwrap();
        assert_eq!(maize.growth_stage, 4);
        assert_eq!(maize.water_applied, 3.5);
        assert_eq!(maize.fertilizer_applied, 1.8);
        let wheat = field.cell(3, 2).unwrap();
        assert_eq!(wheat.growth_stage, 4);
        assert_eq!(wheat.water_applied, 3.0);
        assert_eq!(wheat.fertilizer_applied, 1.0);
    }

    #[test]
    fn repeated_application_accumulates_per_cell_totals() {
        let catalog = test_catalog();
        let mut field = FieldGrid::default();
        plant(&mut field, 0, 0, "maize");

        let mut inventory = Inventory::default();
        inventory.add_water(7.0);
        inventory.add_fertilizer(3.6);

        apply_resources(&mut field, &mut inventory, &catalog).unwrap();
        apply_resources(&mut field, &mut inventory, &catalog).unwrap();

        let cell = field.cell(0, 0).unwrap();
        assert_eq!(cell.water_applied, 7.0);
        assert_eq!(cell.fertilizer_applied, 3.6);
        assert_eq!(inventory.water, 0.0);
        assert_eq!(inventory.fertilizer, 0.0);
    }
}
