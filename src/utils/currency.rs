//! Currency formatting utilities for capacity values
//!
//! Native amounts are shown in both CKB and shannons; other assets are shown
//! in their own base unit.

use rust_decimal::Decimal;

use crate::codec::{is_native_asset, NATIVE_ASSET, NATIVE_SUBUNITS};

/// Format a shannon amount as dual CKB + shannons display
///
/// # Examples
/// ```
/// use fiber_analytics::utils::currency::format_shannons_as_ckb;
///
/// assert_eq!(
///     format_shannons_as_ckb(28125351850),
///     "281.25351850 CKB (28125351850 shannons)"
/// );
/// assert_eq!(format_shannons_as_ckb(5471), "0.00005471 CKB (5471 shannons)");
/// ```
pub fn format_shannons_as_ckb(shannons: u64) -> String {
    let whole = shannons / NATIVE_SUBUNITS;
    let frac = shannons % NATIVE_SUBUNITS;
    format!(
        "{}.{:08} {} ({} shannons)",
        whole, frac, NATIVE_ASSET, shannons
    )
}

/// Format an already-scaled display amount with its asset label
///
/// Native amounts keep 8 decimal places; other assets are printed as-is.
///
/// # Examples
/// ```
/// use fiber_analytics::utils::currency::format_display_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_display_amount(Decimal::from(5), "CKB"), "5.00000000 CKB");
/// assert_eq!(format_display_amount(Decimal::from(1200), "RUSD"), "1200 RUSD");
/// ```
pub fn format_display_amount(amount: Decimal, asset: &str) -> String {
    if is_native_asset(asset) {
        let mut scaled = amount.round_dp(8);
        scaled.rescale(8);
        format!("{} {}", scaled, NATIVE_ASSET)
    } else {
        format!("{} {}", amount.normalize(), asset.trim())
    }
}
