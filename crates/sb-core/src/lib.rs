//! sb-core - Core library for schemabump
//!
//! This crate provides the version model, the fixed dialect registry,
//! configuration parsing for `schemabump.yml`, and the layout that maps a
//! project root onto the artifact paths every bump touches.

pub mod config;
pub mod dialect;
pub mod error;
pub mod layout;
pub mod version;

pub use config::Config;
pub use dialect::{Dialect, DialectSet};
pub use error::{CoreError, CoreResult};
pub use layout::Layout;
pub use version::{Version, VersionTriple};
