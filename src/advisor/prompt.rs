//! Prompt construction for the crop advisor.

use crate::shared::{GeoPoint, WeatherSnapshot};

/// System role for every advisor conversation.
pub const SYSTEM_PROMPT: &str = "You are an AI agricultural assistant that provides realistic and location-based crop recommendations.";

/// User prompt carrying the location and the assembled weather picture.
pub fn build_prompt(location: GeoPoint, weather: &WeatherSnapshot) -> String {
    let elevation = match weather.elevation_m {
        Some(meters) => format!("{meters}m"),
        None => "unknown".to_owned(),
    };
    let soil = weather.soil_type.as_deref().unwrap_or("Unknown");
    format!(
        "You are an agricultural AI assistant.\n\
         Based on the following data:\n\
         - Location: lat {lat}, lon {lon}\n\
         - Avg temperature: {temperature}°C\n\
         - Avg precipitation: {precipitation}mm\n\
         - Elevation: {elevation}\n\
         - Soil type: {soil}\n\
         Suggest the **top 4-5 crops** best suited for this location for all four seasons \
         (Spring, Summer, Autumn, Winter).\n\
         Give short names only, formatted as a numbered list.",
        lat = location.latitude,
        lon = location.longitude,
        temperature = weather.temperature_c,
        precipitation = weather.precipitation_mm,
    )
}
