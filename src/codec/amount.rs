use num_bigint::BigUint;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use tracing::warn;

use super::{LEGACY_LE_HEX_LEN, NATIVE_ASSET, NATIVE_DECIMALS};
use crate::errors::DecodeError;

/// Byte order of a hex-encoded amount
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endianness {
    Big,
    Little,
}

/// Width of the legacy little-endian encoding in bytes
const LEGACY_LE_BYTES: usize = 16;

fn strip_hex_prefix(hex_str: &str) -> &str {
    let trimmed = hex_str.trim();
    trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed)
}

/// Decode a hex integer into an arbitrary-precision unsigned integer
///
/// Big-endian input is parsed directly as base 16. Little-endian input is
/// read as whole bytes, least significant first.
///
/// # Examples
/// ```
/// use fiber_analytics::codec::{decode, Endianness};
/// use num_bigint::BigUint;
///
/// assert_eq!(decode("0x1dcd6500", Endianness::Big).unwrap(), BigUint::from(500_000_000u64));
/// assert_eq!(decode("0x0065cd1d", Endianness::Little).unwrap(), BigUint::from(500_000_000u64));
/// ```
pub fn decode(hex_str: &str, endianness: Endianness) -> Result<BigUint, DecodeError> {
    let digits = strip_hex_prefix(hex_str);
    if digits.is_empty() {
        return Err(DecodeError::Empty);
    }
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(DecodeError::InvalidHex(hex_str.to_string()));
    }

    match endianness {
        Endianness::Big => BigUint::parse_bytes(digits.as_bytes(), 16)
            .ok_or_else(|| DecodeError::InvalidHex(hex_str.to_string())),
        Endianness::Little => {
            if digits.len() % 2 != 0 {
                return Err(DecodeError::OddLength(hex_str.to_string()));
            }
            let bytes =
                hex::decode(digits).map_err(|_| DecodeError::InvalidHex(hex_str.to_string()))?;
            Ok(BigUint::from_bytes_le(&bytes))
        }
    }
}

/// Choose the byte order of a capacity string
///
/// Only the legacy format is little-endian: exactly `0x` plus 32 hex digits.
/// A 32-digit string that starts with a zero byte but does not end with one
/// is a left-padded big-endian value and stays big-endian.
pub fn detect_endianness(hex_str: &str) -> Endianness {
    let trimmed = hex_str.trim();
    if trimmed.len() != LEGACY_LE_HEX_LEN || !trimmed.starts_with("0x") {
        return Endianness::Big;
    }
    let digits = &trimmed[2..];
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Endianness::Big;
    }
    if digits.starts_with("00") && !digits.ends_with("00") {
        return Endianness::Big;
    }
    Endianness::Little
}

/// Decode a capacity string using the detected byte order
pub fn decode_capacity(hex_str: &str) -> Result<BigUint, DecodeError> {
    decode(hex_str, detect_endianness(hex_str))
}

/// Whether `asset` names the native asset (an empty name counts as native)
pub fn is_native_asset(asset: &str) -> bool {
    let asset = asset.trim();
    asset.is_empty() || asset.eq_ignore_ascii_case(NATIVE_ASSET)
}

/// Scale a base-unit amount into display units for `asset`
///
/// Native amounts are divided by 10^8; every other asset is returned
/// unscaled.
///
/// # Examples
/// ```
/// use fiber_analytics::codec::to_display;
/// use num_bigint::BigUint;
/// use rust_decimal::Decimal;
///
/// let five_ckb = BigUint::from(500_000_000u64);
/// assert_eq!(to_display(&five_ckb, "").unwrap(), Decimal::from(5));
/// assert_eq!(to_display(&five_ckb, "RUSD").unwrap(), Decimal::from(500_000_000));
/// ```
pub fn to_display(value: &BigUint, asset: &str) -> Result<Decimal, DecodeError> {
    let overflow = || DecodeError::Overflow(value.to_string());
    let raw = value.to_i128().ok_or_else(overflow)?;
    let scale = if is_native_asset(asset) {
        NATIVE_DECIMALS
    } else {
        0
    };
    Decimal::try_from_i128_with_scale(raw, scale)
        .map(|d| d.normalize())
        .map_err(|_| overflow())
}

/// Decode a capacity string and scale it for `asset`
pub fn capacity_to_display(hex_str: &str, asset: &str) -> Result<Decimal, DecodeError> {
    to_display(&decode_capacity(hex_str)?, asset)
}

/// Display capacity, or zero when the field is corrupt
///
/// Used at aggregation call sites so that one malformed record only loses its
/// own contribution.
pub fn capacity_or_zero(hex_str: &str, asset: &str, record_id: &str) -> Decimal {
    match capacity_to_display(hex_str, asset) {
        Ok(amount) => amount,
        Err(e) => {
            warn!(
                "Capacity of {} could not be decoded ({}), counting as zero",
                record_id, e
            );
            Decimal::ZERO
        }
    }
}

/// `0x`-prefixed minimal big-endian hex
pub fn encode_big_endian(value: &BigUint) -> String {
    format!("0x{}", value.to_str_radix(16))
}

/// Legacy fixed-width 16-byte little-endian hex
pub fn encode_little_endian(value: &BigUint) -> Result<String, DecodeError> {
    let mut bytes = value.to_bytes_le();
    if bytes.len() > LEGACY_LE_BYTES {
        return Err(DecodeError::Overflow(value.to_string()));
    }
    bytes.resize(LEGACY_LE_BYTES, 0);
    Ok(format!("0x{}", hex::encode(bytes)))
}
