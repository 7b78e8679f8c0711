//! devbuild - development build server
//!
//! Lays out IDE products for development runs from compiled module output.
//! Builders are created lazily per platform prefix from a product
//! configuration and re-validated against the output directory on every
//! request.

pub mod builder;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod server;
pub mod tasks;

pub use error::{DevBuildError, DevBuildResult};
pub use server::BuildServer;
