//! Report formatting helpers

use crate::models::Money;

/// Horizontal bar for `value` relative to `max`
pub fn format_bar(value: Money, max: Money, width: usize) -> String {
    if !max.is_positive() || !value.is_positive() {
        return "░".repeat(width);
    }

    let filled = (i128::from(value.paise()) * width as i128 + i128::from(max.paise()) / 2)
        / i128::from(max.paise());
    let filled = (filled.max(0) as usize).min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Warning line for a day whose spending passed the daily limit
pub fn format_limit_warning(spent: Money, limit: Money) -> String {
    format!(
        "Warning: you have exceeded your daily limit ({} spent today, limit {}).",
        spent, limit
    )
}
