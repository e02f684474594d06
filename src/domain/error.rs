use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("invalid polyline character {character:?} at byte {index}")]
    InvalidCharacter { index: usize, character: char },
    #[error("polyline ends inside a varint starting at byte {index}")]
    Truncated { index: usize },
    #[error("point {point} has a latitude but no longitude")]
    MissingLongitude { point: usize },
    #[error("varint starting at byte {index} overflows")]
    Overflow { index: usize },
    #[error("point {point} is out of range: lat {latitude}, lon {longitude}")]
    OutOfRange {
        point: usize,
        latitude: f64,
        longitude: f64,
    },
    #[error("unsupported polyline precision {0}")]
    UnsupportedPrecision(u32),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("path contains no points")]
    EmptyPath,
    #[error("invalid coordinate: lon {longitude}, lat {latitude}")]
    InvalidCoordinate { longitude: f64, latitude: f64 },
    #[error("route has {points} point(s), at least 2 are required")]
    DegenerateRoute { points: usize },
    #[error("camera path has {camera} points but target has {target}")]
    CardinalityMismatch { target: usize, camera: usize },
}
