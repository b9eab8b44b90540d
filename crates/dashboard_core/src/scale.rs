//! Bar widths for the market price chart.

/// Lower bound of the chart scale, so a cheap recommendation does not blow up
/// the reference bars.
pub const PRICE_SCALE_FLOOR: f64 = 500.0;

/// Width of a price bar as a percentage of the chart.
///
/// The scale is `max(recommended_price, PRICE_SCALE_FLOOR)`. The result is not
/// clamped: a bar priced above the scale reports more than 100.
pub fn bar_width(price: f64, recommended_price: f64) -> f64 {
    let max_scale = recommended_price.max(PRICE_SCALE_FLOOR);
    price / max_scale * 100.0
}
