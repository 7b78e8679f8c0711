//! CLI command implementations

pub mod build;
pub mod config;
pub mod products;

pub use build::execute as build;
pub use config::execute as config;
pub use products::execute as products;
