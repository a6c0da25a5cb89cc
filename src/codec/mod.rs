//! On-chain amount codec
//!
//! Amounts cross the wire as hexadecimal integers in the asset's smallest
//! unit. This module turns them into arbitrary-precision integers and then
//! into display decimals:
//! - **Decoding** - big-endian `0x...` strings and the legacy fixed-width
//!   little-endian 128-bit form
//! - **Detection** - choosing the byte order of a capacity string
//! - **Scaling** - native asset amounts divided by the subdivision factor

pub mod amount;

pub use amount::{
    capacity_or_zero, capacity_to_display, decode, decode_capacity, detect_endianness,
    encode_big_endian, encode_little_endian, is_native_asset, to_display, Endianness,
};

/// Native asset of the Fiber network
pub const NATIVE_ASSET: &str = "CKB";

/// Smallest native units (shannons) per display unit
pub const NATIVE_SUBUNITS: u64 = 100_000_000;

/// Decimal places implied by [`NATIVE_SUBUNITS`]
pub const NATIVE_DECIMALS: u32 = 8;

/// Total length of a legacy little-endian capacity: `0x` + 32 hex digits
pub const LEGACY_LE_HEX_LEN: usize = 34;
