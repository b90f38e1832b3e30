//! Umbrella package for the scopehint workspace integration tests

pub use scopehint_core::*;
