use rust_decimal::{Decimal, RoundingStrategy};

/// Renders a dollar amount with the 2-decimal rounding used everywhere a
/// price is spoken or logged. Totals and per-line subtotals must go through
/// this so the confirmation text and the backend total line up.
pub fn format_usd(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("${rounded:.2}")
}
