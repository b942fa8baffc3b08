//! Data layer — builds the crop catalog at session startup.
//!
//! The catalog document is embedded in the binary (`crops.json`), parsed
//! once, and every definition is validated before the catalog is handed
//! out. Definitions never change for the lifetime of a session.

use std::collections::HashMap;

use thiserror::Error;
use tracing::info;

use crate::shared::{CropCatalog, CropDef, CropId};

const CROPS_JSON: &str = include_str!("crops.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog document is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalog document contains no crops")]
    Empty,

    #[error("crop '{crop}': {problem}")]
    InvalidDef { crop: String, problem: String },
}

/// Parse and validate the embedded catalog document.
pub fn builtin_catalog() -> Result<CropCatalog, CatalogError> {
    load_catalog(CROPS_JSON)
}

/// Parse and validate a catalog document (crop id → definition).
pub fn load_catalog(document: &str) -> Result<CropCatalog, CatalogError> {
    let crops: HashMap<CropId, CropDef> = serde_json::from_str(document)?;
    if crops.is_empty() {
        return Err(CatalogError::Empty);
    }
    for (id, def) in &crops {
        validate_def(id, def)?;
    }
    info!("[Data] Crop catalog loaded: {} crop types", crops.len());
    Ok(CropCatalog { crops })
}

fn validate_def(id: &str, def: &CropDef) -> Result<(), CatalogError> {
    let invalid = |problem: &str| CatalogError::InvalidDef {
        crop: id.to_string(),
        problem: problem.to_string(),
    };

    if def.name.trim().is_empty() {
        return Err(invalid("name is empty"));
    }
    // `!(x > 0.0)` also rejects NaN.
    if !(def.base_cost > 0.0) || !def.base_cost.is_finite() {
        return Err(invalid("baseCost must be a positive number"));
    }
    if !(def.market_price > 0.0) || !def.market_price.is_finite() {
        return Err(invalid("marketPrice must be a positive number"));
    }
    if !(def.water_need >= 0.0) || !def.water_need.is_finite() {
        return Err(invalid("waterNeed must be a non-negative number"));
    }
    if !(def.fertilizer_need >= 0.0) || !def.fertilizer_need.is_finite() {
        return Err(invalid("fertilizerNeed must be a non-negative number"));
    }
    if !(def.yield_per_plant > 0.0) || !def.yield_per_plant.is_finite() {
        return Err(invalid("yieldPerPlant must be a positive number"));
    }
    if def.growth_stages == 0 {
        return Err(invalid("growthStages must be at least 1"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::{GameError, MATURE_STAGE_DEFAULT};

    #[test]
    fn builtin_catalog_loads_and_validates() {
        let catalog = builtin_catalog().unwrap();
        assert_eq!(catalog.len(), 5, "expected the five built-in crop types");
        for id in ["cauliflower", "paddy", "wheat", "onion", "maize"] {
            assert!(catalog.contains(id), "missing built-in crop '{}'", id);
        }
    }

    #[test]
    fn maize_economics_match_the_tuning_sheet() {
        let catalog = builtin_catalog().unwrap();
        let maize = catalog.get("maize").unwrap();
        assert_eq!(maize.base_cost, 3.0);
        assert_eq!(maize.market_price, 5.0);
        assert_eq!(maize.yield_per_plant, 2.0);
    }

    #[test]
    fn omitted_growth_stages_defaults() {
        let catalog = builtin_catalog().unwrap();
        // wheat's document entry has no growthStages key
        let wheat = catalog.get("wheat").unwrap();
        assert_eq!(wheat.growth_stages, MATURE_STAGE_DEFAULT);
    }

    #[test]
    fn unknown_crop_lookup_is_an_error() {
        let catalog = builtin_catalog().unwrap();
        assert_eq!(
            catalog.get("mango"),
            Err(GameError::UnknownCrop {
                crop: "mango".into()
            })
        );
    }

    #[test]
    fn empty_document_is_rejected() {
        assert!(matches!(load_catalog("{}"), Err(CatalogError::Empty)));
    }

    #[test]
    fn malformed_document_is_rejected() {
        assert!(matches!(
            load_catalog("not json"),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn negative_base_cost_is_rejected() {
        let doc = r#"{
            "weed": {
                "name": "Weed",
                "baseCost": -1.0,
                "marketPrice": 2.0,
                "waterNeed": 1.0,
                "fertilizerNeed": 0.5,
                "yieldPerPlant": 1.0,
                "icon": "x"
            }
        }"#;
        assert!(matches!(
            load_catalog(doc),
            Err(CatalogError::InvalidDef { .. })
        ));
    }
}
