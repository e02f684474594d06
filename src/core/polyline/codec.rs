//! Encoded polyline format: zig-zag signed deltas split into 5-bit chunks,
//! each chunk offset by 63 into printable ASCII. Points are stored latitude
//! first, then longitude.

use crate::domain::error::DecodeError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PRECISION: u32 = 5;

const CHUNK_BITS: u32 = 5;
const CHUNK_MASK: i64 = 0x1f;
const CONTINUATION: i64 = 0x20;
const ASCII_OFFSET: u8 = 63;
const MAX_SHIFT: u32 = 30;

/// A decoded pair, still in wire (latitude, longitude) order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

impl LatLng {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

pub fn decode(encoded: &str) -> Result<Vec<LatLng>, DecodeError> {
    decode_with_precision(encoded, DEFAULT_PRECISION)
}

pub fn decode_with_precision(encoded: &str, precision: u32) -> Result<Vec<LatLng>, DecodeError> {
    let factor = precision_factor(precision)?;
    let mut index = 0;
    let mut latitude = 0_i64;
    let mut longitude = 0_i64;
    let mut points = Vec::new();

    while index < encoded.len() {
        let point = points.len();
        latitude += read_delta(encoded, &mut index)?;
        if index >= encoded.len() {
            return Err(DecodeError::MissingLongitude { point });
        }
        longitude += read_delta(encoded, &mut index)?;

        let lat = latitude as f64 / factor;
        let lon = longitude as f64 / factor;
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(DecodeError::OutOfRange {
                point,
                latitude: lat,
                longitude: lon,
            });
        }
        points.push(LatLng::new(lat, lon));
    }

    Ok(points)
}

pub fn encode(points: &[LatLng]) -> Result<String, DecodeError> {
    encode_with_precision(points, DEFAULT_PRECISION)
}

pub fn encode_with_precision(points: &[LatLng], precision: u32) -> Result<String, DecodeError> {
    let factor = precision_factor(precision)?;
    let mut output = String::with_capacity(points.len() * 8);
    let mut previous_lat = 0_i64;
    let mut previous_lon = 0_i64;
    for point in points {
        let lat = (point.latitude * factor).round() as i64;
        let lon = (point.longitude * factor).round() as i64;
        write_delta(lat - previous_lat, &mut output);
        write_delta(lon - previous_lon, &mut output);
        previous_lat = lat;
        previous_lon = lon;
    }
    Ok(output)
}

fn precision_factor(precision: u32) -> Result<f64, DecodeError> {
    if !(1..=7).contains(&precision) {
        return Err(DecodeError::UnsupportedPrecision(precision));
    }
    Ok(10_f64.powi(precision as i32))
}

fn read_delta(encoded: &str, index: &mut usize) -> Result<i64, DecodeError> {
    let bytes = encoded.as_bytes();
    let start = *index;
    let mut result = 0_i64;
    let mut shift = 0_u32;
    loop {
        let Some(&byte) = bytes.get(*index) else {
            return Err(DecodeError::Truncated { index: start });
        };
        if !(ASCII_OFFSET..=126).contains(&byte) {
            // Everything before `index` was ASCII, so it is a char boundary.
            let character = encoded[*index..].chars().next().unwrap_or('\u{fffd}');
            return Err(DecodeError::InvalidCharacter {
                index: *index,
                character,
            });
        }
        if shift > MAX_SHIFT {
            return Err(DecodeError::Overflow { index: start });
        }
        let chunk = i64::from(byte - ASCII_OFFSET);
        *index += 1;
        result |= (chunk & CHUNK_MASK) << shift;
        shift += CHUNK_BITS;
        if chunk & CONTINUATION == 0 {
            break;
        }
    }
    if result & 1 == 1 {
        Ok(!(result >> 1))
    } else {
        Ok(result >> 1)
    }
}

fn write_delta(delta: i64, output: &mut String) {
    let mut value = if delta < 0 { !(delta << 1) } else { delta << 1 };
    while value >= CONTINUATION {
        output.push(char::from(
            ((CONTINUATION | (value & CHUNK_MASK)) as u8) + ASCII_OFFSET,
        ));
        value >>= CHUNK_BITS;
    }
    output.push(char::from(value as u8 + ASCII_OFFSET));
}

#[cfg(test)]
mod tests {
    use super::{decode, decode_with_precision, encode, encode_with_precision, LatLng};
    use crate::domain::error::DecodeError;

    fn assert_close(actual: &[LatLng], expected: &[LatLng]) {
        assert_eq!(actual.len(), expected.len());
        for (left, right) in actual.iter().zip(expected) {
            assert!((left.latitude - right.latitude).abs() <= 1e-5);
            assert!((left.longitude - right.longitude).abs() <= 1e-5);
        }
    }

    #[test]
    fn decodes_reference_polyline() {
        let points = decode("_p~iF~ps|U_ulLnnqC_mqNvxq`@").unwrap();
        assert_close(
            &points,
            &[
                LatLng::new(38.5, -120.2),
                LatLng::new(40.7, -120.95),
                LatLng::new(43.252, -126.453),
            ],
        );
    }

    #[test]
    fn encodes_reference_polyline() {
        let encoded = encode(&[
            LatLng::new(38.5, -120.2),
            LatLng::new(40.7, -120.95),
            LatLng::new(43.252, -126.453),
        ])
        .unwrap();
        assert_eq!(encoded, "_p~iF~ps|U_ulLnnqC_mqNvxq`@");
    }

    #[test]
    fn islamabad_route_survives_encoding() {
        let route = [
            LatLng::new(33.6844, 73.0479),
            LatLng::new(33.70, 73.05),
            LatLng::new(33.72, 73.06),
        ];
        let decoded = decode(&encode(&route).unwrap()).unwrap();
        assert_close(&decoded, &route);
    }

    #[test]
    fn precision_six_is_supported() {
        let route = [LatLng::new(52.520008, 13.404954), LatLng::new(52.516275, 13.377704)];
        let encoded = encode_with_precision(&route, 6).unwrap();
        let decoded = decode_with_precision(&encoded, 6).unwrap();
        for (left, right) in decoded.iter().zip(&route) {
            assert!((left.latitude - right.latitude).abs() <= 1e-6);
            assert!((left.longitude - right.longitude).abs() <= 1e-6);
        }
    }

    #[test]
    fn empty_string_decodes_to_no_points() {
        assert!(decode("").unwrap().is_empty());
    }

    #[test]
    fn dangling_continuation_chunk_is_truncated() {
        // '_' carries the continuation bit with nothing after it.
        let result = decode("_p~iF~ps|U_");
        assert_eq!(result, Err(DecodeError::Truncated { index: 10 }));
    }

    #[test]
    fn latitude_without_longitude_is_rejected() {
        let result = decode("_p~iF~ps|U_ulL");
        assert_eq!(result, Err(DecodeError::MissingLongitude { point: 1 }));
    }

    #[test]
    fn characters_outside_alphabet_are_rejected() {
        let result = decode("_p~iF ps|U");
        assert!(matches!(
            result,
            Err(DecodeError::InvalidCharacter { index: 5, character: ' ' })
        ));
    }

    #[test]
    fn out_of_range_latitude_is_rejected() {
        let encoded = encode(&[LatLng::new(89.0, 0.0), LatLng::new(0.0, 0.0)]).unwrap();
        // Two copies of the first delta push latitude to 178 degrees.
        let first_point_len = encode(&[LatLng::new(89.0, 0.0)]).unwrap().len();
        let doubled = format!("{}{}", &encoded[..first_point_len], &encoded[..first_point_len]);
        assert!(matches!(
            decode(&doubled),
            Err(DecodeError::OutOfRange { point: 1, .. })
        ));
    }

    #[test]
    fn overlong_varint_is_rejected() {
        let result = decode("~~~~~~~~~~");
        assert_eq!(result, Err(DecodeError::Overflow { index: 0 }));
    }

    #[test]
    fn unsupported_precision_is_rejected() {
        assert_eq!(
            decode_with_precision("??", 0),
            Err(DecodeError::UnsupportedPrecision(0))
        );
    }
}
