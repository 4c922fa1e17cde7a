//! Shared utilities and constants.

pub mod constants;

pub use constants::*;
