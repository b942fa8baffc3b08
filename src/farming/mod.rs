//! Farming domain — planting, resource application, crop growth, harvest.
//!
//! Communicates with other domains exclusively through crate::shared types.

pub mod harvest;
pub mod irrigation;
pub mod planting;

pub use harvest::{can_harvest, harvest_field};
pub use irrigation::{apply_resources, field_demand};
pub use planting::plant_crop;
