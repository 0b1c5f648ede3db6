//! CLI command implementations

pub(crate) mod bump;
pub(crate) mod common;
pub(crate) mod prompt;
pub(crate) mod show;
