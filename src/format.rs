//! Compact number formatting for headline metrics.

/// Format a count as thousands ("K") or millions ("M").
///
/// Values above one million use "M", whole if exact and with one decimal
/// otherwise. Everything else is truncated to whole thousands. Negative
/// numbers format their magnitude behind a minus sign.
pub fn format_number(num: i64) -> String {
    let sign = if num < 0 { "-" } else { "" };
    let magnitude = num.unsigned_abs();

    if magnitude > 1_000_000 {
        if magnitude % 1_000_000 == 0 {
            return format!("{sign}{} M", magnitude / 1_000_000);
        }
        return format!("{sign}{:.1} M", magnitude as f64 / 1_000_000.0);
    }
    format!("{sign}{} K", magnitude / 1_000)
}
