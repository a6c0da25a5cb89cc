//! Mathematical utility functions for aggregate views
//!
//! Percentage helper with zero-division handling, shared by the geographic
//! and hosting views.

/// Calculate percentage safely for usize values, returning 0.0 if total is zero.
///
/// # Arguments
/// * `part` - The numerator (portion of the total)
/// * `total` - The denominator (total count)
///
/// # Returns
/// Percentage as a float (0.0 to 100.0), or 0.0 if total is zero.
///
/// # Examples
/// ```
/// use fiber_analytics::utils::math::safe_percentage;
///
/// assert_eq!(safe_percentage(50, 100), 50.0);
/// assert_eq!(safe_percentage(1, 4), 25.0);
/// assert_eq!(safe_percentage(50, 0), 0.0);  // Zero-division guard
/// ```
#[inline]
pub fn safe_percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64) * 100.0
    }
}
