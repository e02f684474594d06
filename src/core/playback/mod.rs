pub mod driver;
pub mod host;
pub mod session;
