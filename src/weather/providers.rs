//! Provider bindings for the weather chain.
//!
//! Every provider gets its own fetch function returning
//! `Result<Option<T>, ProviderError>`: `Err` for transport and decode
//! failures, `Ok(None)` when the provider answered but had nothing
//! usable for the location. The response shapes are deserialized
//! tolerantly so a partial payload degrades instead of erroring.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::shared::GeoPoint;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("provider returned HTTP {0}")]
    Status(reqwest::StatusCode),
}

// ─────────────────────────────────────────────
// NASA POWER — historical daily temperature
// ─────────────────────────────────────────────

/// Observation window for the daily-point query.
const NASA_SAMPLE_START: &str = "20251001";
const NASA_SAMPLE_END: &str = "20251002";

/// Sentinel NASA POWER reports for days with no measurement.
const NASA_INVALID_SAMPLE: f64 = -999.0;

#[derive(Debug, Default, Deserialize)]
struct NasaPowerResponse {
    #[serde(default)]
    properties: NasaPowerProperties,
}

#[derive(Debug, Default, Deserialize)]
struct NasaPowerProperties {
    #[serde(default)]
    parameter: NasaPowerParameter,
}

#[derive(Debug, Default, Deserialize)]
struct NasaPowerParameter {
    /// Date string → daily maximum temperature in °C.
    #[serde(rename = "T2M_MAX", default)]
    t2m_max: HashMap<String, f64>,
}

/// Mean of the valid daily maximum temperatures, if the window has any.
pub(crate) async fn nasa_power_temperature(
    client: &reqwest::Client,
    location: GeoPoint,
) -> Result<Option<f64>, ProviderError> {
    let url = format!(
        "https://power.larc.nasa.gov/api/temporal/daily/point?parameters=T2M_MAX,T2M_MIN&community=AG&longitude={}&latitude={}&start={}&end={}&format=JSON",
        location.longitude, location.latitude, NASA_SAMPLE_START, NASA_SAMPLE_END
    );
    let response: NasaPowerResponse = get_json(client, &url).await?;
    Ok(mean_valid_temperature(&response.properties.parameter.t2m_max))
}

fn mean_valid_temperature(samples: &HashMap<String, f64>) -> Option<f64> {
    let valid: Vec<f64> = samples
        .values()
        .copied()
        .filter(|t| *t != NASA_INVALID_SAMPLE)
        .collect();
    if valid.is_empty() {
        return None;
    }
    Some(valid.iter().sum::<f64>() / valid.len() as f64)
}

// ─────────────────────────────────────────────
// Open-Meteo — forecast
// ─────────────────────────────────────────────

/// First forecast day distilled to what the simulation needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DayOutlook {
    pub temperature_c: f64,
    pub precipitation_mm: f64,
}

#[derive(Debug, Default, Deserialize)]
struct ForecastResponse {
    daily: Option<ForecastDaily>,
}

#[derive(Debug, Default, Deserialize)]
struct ForecastDaily {
    #[serde(default)]
    temperature_2m_max: Vec<f64>,
    #[serde(default)]
    temperature_2m_min: Vec<f64>,
    #[serde(default)]
    precipitation_sum: Vec<f64>,
}

pub(crate) async fn open_meteo_forecast(
    client: &reqwest::Client,
    location: GeoPoint,
) -> Result<Option<DayOutlook>, ProviderError> {
    let url = format!(
        "https://api.open-meteo.com/v1/forecast?latitude={}&longitude={}&daily=temperature_2m_max,temperature_2m_min,precipitation_sum&timezone=auto",
        location.latitude, location.longitude
    );
    let response: ForecastResponse = get_json(client, &url).await?;
    Ok(response.daily.as_ref().and_then(first_day_outlook))
}

/// Day-one outlook: midpoint of the max/min forecast plus its rain sum.
fn first_day_outlook(daily: &ForecastDaily) -> Option<DayOutlook> {
    let max = daily.temperature_2m_max.first()?;
    let min = daily.temperature_2m_min.first()?;
    let precipitation_mm = daily.precipitation_sum.first().copied().unwrap_or(0.0);
    Some(DayOutlook {
        temperature_c: (max + min) / 2.0,
        precipitation_mm,
    })
}

// ─────────────────────────────────────────────
// Open-Meteo — elevation
// ─────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
struct ElevationResponse {
    /// The endpoint answers with an array even for a single point.
    #[serde(default)]
    elevation: Vec<f64>,
}

pub(crate) async fn open_meteo_elevation(
    client: &reqwest::Client,
    location: GeoPoint,
) -> Result<Option<f64>, ProviderError> {
    let url = format!(
        "https://api.open-meteo.com/v1/elevation?latitude={}&longitude={}",
        location.latitude, location.longitude
    );
    let response: ElevationResponse = get_json(client, &url).await?;
    Ok(response.elevation.first().copied())
}

// ─────────────────────────────────────────────
// OpenEPI — soil classification
// ─────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
struct SoilResponse {
    #[serde(default)]
    properties: SoilProperties,
}

#[derive(Debug, Default, Deserialize)]
struct SoilProperties {
    most_probable_soil_type: Option<String>,
}

pub(crate) async fn openepi_soil_type(
    client: &reqwest::Client,
    location: GeoPoint,
) -> Result<Option<String>, ProviderError> {
    let url = format!(
        "https://api.openepi.io/soil/type?lon={}&lat={}",
        location.longitude, location.latitude
    );
    let response: SoilResponse = get_json(client, &url).await?;
    Ok(response
        .properties
        .most_probable_soil_type
        .filter(|soil| !soil.is_empty()))
}

// ─────────────────────────────────────────────
// Shared transport
// ─────────────────────────────────────────────

async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
) -> Result<T, ProviderError> {
    let response = client
        .get(url)
        .timeout(super::REQUEST_TIMEOUT)
        .send()
        .await?;
    let status = response.status();
    if !status.is_success() {
        return Err(ProviderError::Status(status));
    }
    Ok(response.json::<T>().await?)
}
