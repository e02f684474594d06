pub mod camera;
pub mod geometry;
pub mod playback;
pub mod polyline;
pub mod route;
