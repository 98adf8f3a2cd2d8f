/// Render an atomic token amount as a dollar string, e.g. `10000` with
/// 6 decimals is `$0.01`. Keeps at least two fractional digits and drops
/// trailing zeros beyond that. Returns `None` if `amount` is not an integer
/// or `decimals` is too large to scale a `u128`.
pub fn format_usd(amount: &str, decimals: u32) -> Option<String> {
    let atomic: u128 = amount.trim().parse().ok()?;
    format_usd_atomic(atomic, decimals)
}

pub fn format_usd_atomic(atomic: u128, decimals: u32) -> Option<String> {
    let scale = 10u128.checked_pow(decimals)?;
    let whole = atomic / scale;
    let frac = atomic % scale;
    if decimals == 0 {
        return Some(format!("${whole}.00"));
    }

    let mut digits = format!("{frac:0width$}", width = decimals as usize);
    while digits.len() > 2 && digits.ends_with('0') {
        digits.pop();
    }
    if digits.len() < 2 {
        digits.push('0');
    }
    Some(format!("${whole}.{digits}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_cents() {
        assert_eq!(format_usd("10000", 6).as_deref(), Some("$0.01"));
        assert_eq!(format_usd("50000", 6).as_deref(), Some("$0.05"));
        assert_eq!(format_usd("1500000", 6).as_deref(), Some("$1.50"));
    }

    #[test]
    fn keeps_sub_cent_precision() {
        assert_eq!(format_usd("1", 6).as_deref(), Some("$0.000001"));
        assert_eq!(format_usd("1234", 6).as_deref(), Some("$0.001234"));
    }

    #[test]
    fn handles_edge_inputs() {
        assert_eq!(format_usd("0", 6).as_deref(), Some("$0.00"));
        assert_eq!(format_usd("7", 0).as_deref(), Some("$7.00"));
        assert_eq!(format_usd("1", 1).as_deref(), Some("$0.10"));
        assert!(format_usd("0.01", 6).is_none());
        assert!(format_usd("", 6).is_none());
    }

    #[test]
    fn oversized_decimals_are_rejected() {
        assert!(format_usd("1", 39).is_none());
        assert!(format_usd_atomic(1, u32::MAX).is_none());
        assert_eq!(
            format_usd_atomic(10u128.pow(38), 38).as_deref(),
            Some("$1.00")
        );
    }
}
