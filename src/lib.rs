//! Fiber Network Explorer Analytics
//!

pub mod analysis;
pub mod api;
pub mod cli;
pub mod codec;
pub mod collector;
pub mod config;
pub mod errors;
pub mod types;
pub mod utils;
