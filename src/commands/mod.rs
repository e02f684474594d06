pub mod playback;
pub mod polyline;
pub mod route;
pub mod settings;
