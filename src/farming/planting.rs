use tracing::info;

use crate::shared::*;

/// Plant one seed into an empty cell.
///
/// The cell must be empty and the inventory must hold at least one seed
/// of the crop type. On success the cell holds a stage-0 crop and exactly
/// one seed is consumed; on rejection nothing changes. Out-of-bounds
/// coordinates panic.
pub fn plant_crop(
    field: &mut FieldGrid,
    inventory: &mut Inventory,
    catalog: &CropCatalog,
    row: usize,
    col: usize,
    crop: &str,
) -> Result<(), GameError> {
    catalog.get(crop)?;

    if field.cell(row, col).is_some() {
        return Err(GameError::CellOccupied { row, col });
    }
    if !inventory.take_seed(crop) {
        return Err(GameError::NoSeeds {
            crop: crop.to_string(),
        });
    }

    *field.cell_mut(row, col) = Some(PlantedCrop::new(crop));
    info!("[Farming] Planted '{}' at ({}, {})", crop, row, col);
    Ok(())
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
        CropCatalog { crops }
    }

    #[test]
    fn planting_fills_the_cell_and_takes_one_seed() {
        let catalog = test_catalog();
        let mut field = FieldGrid::default();
        let mut inventory = Inventory::default();
        inventory.add_seeds("maize", 3);

        plant_crop(&mut field, &mut inventory, &catalog, 2, 4, "maize").unwrap();

        assert_eq!(inventory.seed_count("maize"), 2);
        assert_eq!(field.planted_count(), 1);
        let cell = field.cell(2, 4).expect("cell should be planted");
        assert_eq!(cell.crop_type, "maize");
        assert_eq!(cell.growth_stage, 0);
        assert_eq!(cell.water_applied, 0.0);
        assert_eq!(cell.fertilizer_applied, 0.0);
    }

    #[test]
    fn replanting_an_occupied_cell_is_rejected_without_mutation() {
        let catalog = test_catalog();
        let mut field = FieldGrid::default();
        let mut inventory = Inventory::default();
        inventory.add_seeds("maize", 3);

        plant_crop(&mut field, &mut inventory, &catalog, 0, 0, "maize").unwrap();
        let err = plant_crop(&mut field, &mut inventory, &catalog, 0, 0, "maize").unwrap_err();

        assert_eq!(err, GameError::CellOccupied { row: 0, col: 0 });
        assert_eq!(inventory.seed_count("maize"), 2, "no extra seed consumed");
        assert_eq!(field.planted_count(), 1);
    }

    #[test]
    fn planting_without_seeds_is_rejected() {
        let catalog = test_catalog();
        let mut field = FieldGrid::default();
        let mut inventory = Inventory::default();

        let err = plant_crop(&mut field, &mut inventory, &catalog, 1, 1, "maize").unwrap_err();

        assert_eq!(
            err,
            GameError::NoSeeds {
                crop: "maize".into()
            }
        );
        assert!(field.cell(1, 1).is_none());
    }

    #[test]
    fn planting_an_unknown_crop_is_rejected() {
        let catalog = test_catalog();
        let mut field = FieldGrid::default();
        let mut inventory = Inventory::default();
        inventory.add_seeds("maize", 1);

        let err = plant_crop(&mut field, &mut inventory, &catalog, 1, 1, "mango").unwrap_err();
        assert!(matches!(err, GameError::UnknownCrop { .. }));
        assert_eq!(inventory.seed_count("maize"), 1);
    }

    #[test]
    #[should_panic]
    fn out_of_bounds_coordinates_panic() {
        let catalog = test_catalog();
        let mut field = FieldGrid::default();
        let mut inventory = Inventory::default();
        inventory.add_seeds("maize", 1);
        let _ = plant_crop(&mut field, &mut inventory, &catalog, 9, 0, "maize");
    }
}
