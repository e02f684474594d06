use crate::core::polyline::codec::{decode_with_precision, encode_with_precision, LatLng};
use crate::core::polyline::normalize::normalize;
use crate::domain::error::RouteError;
use crate::domain::models::AppError;

/// Decodes to `[lon, lat]` pairs, the order the map collaborator expects.
pub fn decode_route(encoded: &str, precision: u32) -> Result<Vec<[f64; 2]>, AppError> {
    let pairs = decode_with_precision(encoded, precision).map_err(RouteError::from)?;
    let path = normalize(&pairs)?;
    Ok(path.to_lon_lat())
}

/// Encodes a JSON array of `[lat, lon]` pairs.
pub fn encode_route(raw: &str, precision: u32) -> Result<String, AppError> {
    let pairs = serde_json::from_str::<Vec<[f64; 2]>>(raw).map_err(|error| {
        AppError::new(
            "INVALID_INPUT",
            format!("failed to parse coordinates: {error}"),
            Some("pass a JSON array such as [[33.68,73.04],[33.70,73.05]]".to_string()),
        )
    })?;
    let points = pairs
        .iter()
        .map(|[latitude, longitude]| LatLng::new(*latitude, *longitude))
        .collect::<Vec<_>>();
    // Validate before encoding so the output always decodes.
    normalize(&points)?;
    let encoded = encode_with_precision(&points, precision).map_err(RouteError::from)?;
    Ok(encoded)
}
