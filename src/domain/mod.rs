pub mod error;
pub mod geo;
pub mod models;
pub mod state_machine;
