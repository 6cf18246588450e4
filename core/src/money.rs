//! Currency formatting for derived view fields.
//!
//! The prototype renders every money amount as a two-decimal fixed-point
//! dollar string. Formatting happens exactly once, at snapshot-derivation
//! time; view types carry the formatted strings, never raw amounts.

/// Format an amount as a two-decimal dollar string.
///
/// # Examples
///
/// ```
/// use storefront_core::format_usd;
///
/// assert_eq!(format_usd(0.0), "$0.00");
/// assert_eq!(format_usd(5.0), "$5.00");
/// assert_eq!(format_usd(19.99), "$19.99");
/// ```
#[must_use]
pub fn format_usd(amount: f64) -> String {
    format!("${amount:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_two_decimals() {
        assert_eq!(format_usd(0.0), "$0.00");
        assert_eq!(format_usd(12.5), "$12.50");
        assert_eq!(format_usd(99.999), "$100.00");
    }

    #[test]
    fn formats_multiplied_subtotals() {
        // 3 × $19.99, the shape derivation produces
        assert_eq!(format_usd(19.99 * 3.0), "$59.97");
    }
}
