//! Lazily built, per-key resources
//!
//! Values are built on first request and kept for the life of the cache.
//! Every later request re-validates the value before returning it, so callers
//! always see state that matches what is on disk.
//!
//! # Entry States
//!
//! | State | Description |
//! |-------|-------------|
//! | Absent | Never requested, or every build attempt failed |
//! | Building | Constructor running under the cache lock |
//! | Ready | Built; re-validated on each request |

pub mod keyed;

pub use keyed::{KeyedCache, Revalidate};
