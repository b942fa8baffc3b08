//! Weather collaborator — assembles a [`WeatherSnapshot`] for a location.
//!
//! Provider chain: NASA POWER daily temperatures, then the Open-Meteo
//! forecast (which overrides temperature and supplies precipitation),
//! then Open-Meteo elevation, then the OpenEPI soil classification.
//! Every step is independently fallible: a failed step degrades its
//! field to the default and the aggregate fetch never fails.

mod providers;

use std::time::Duration;

use tracing::{info, warn};

use crate::shared::{GeoPoint, WeatherSnapshot};

/// Per-request timeout for every provider call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Default)]
pub struct WeatherClient {
    client: reqwest::Client,
}

impl WeatherClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the best snapshot the providers can assemble.
    pub async fn fetch(&self, location: GeoPoint) -> WeatherSnapshot {
        let mut snapshot = WeatherSnapshot::default();

        match providers::nasa_power_temperature(&self.client, location).await {
            Ok(Some(temperature)) => snapshot.temperature_c = temperature,
            Ok(None) => warn!("[Weather] NASA POWER had no valid samples for this window"),
            Err(e) => warn!("[Weather] NASA POWER failed, falling back to Open-Meteo: {e}"),
        }

        match providers::open_meteo_forecast(&self.client, location).await {
            Ok(Some(outlook)) => {
                snapshot.temperature_c = outlook.temperature_c;
                snapshot.precipitation_mm = outlook.precipitation_mm;
            }
            Ok(None) => warn!("[Weather] Open-Meteo forecast had no daily block"),
            Err(e) => warn!("[Weather] Open-Meteo forecast failed: {e}"),
        }

        match providers::open_meteo_elevation(&self.client, location).await {
            Ok(Some(elevation)) => snapshot.elevation_m = Some(elevation),
            Ok(None) => {}
            Err(e) => warn!("[Weather] Elevation fetch failed: {e}"),
        }

        match providers::openepi_soil_type(&self.client, location).await {
            Ok(Some(soil)) => snapshot.soil_type = Some(soil),
            Ok(None) => {}
            Err(e) => warn!("[Weather] Soil type fetch failed: {e}"),
        }

        info!(
            "[Weather] Snapshot for ({:.4}, {:.4}): {:.1}°C, {:.1}mm precipitation",
            location.latitude,
            location.longitude,
            snapshot.temperature_c,
            snapshot.precipitation_mm
        );
        snapshot
    }
}
