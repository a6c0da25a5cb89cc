//! Shared formatting and arithmetic helpers

pub mod currency;
pub mod math;
pub mod time;
