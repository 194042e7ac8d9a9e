/// Discount applied to the spot price before tick alignment
const LIMIT_DISCOUNT: f64 = 0.995;

/// btc_jpy price tick: limit prices are whole multiples of 1000 JPY
const PRICE_TICK_JPY: f64 = 1000.0;

/// Quantities are computed at 4-decimal precision before the multiplier
const QUANTITY_DECIMALS: i32 = 4;

/// Limit price for a maker buy: 0.5% under spot, rounded down to the
/// exchange tick so the order rests on the book.
pub fn limit_price(last_price: f64) -> u64 {
    let adjusted = last_price * LIMIT_DISCOUNT;
    (adjusted / PRICE_TICK_JPY).floor() as u64 * PRICE_TICK_JPY as u64
}

/// Order quantity for a given JPY budget at a given limit price.
///
/// The base lot is truncated to 4 decimals first (never spend over budget),
/// then the multiplier is applied, so the final amount is always an exact
/// multiple of the truncated lot (2x with the default policy).
pub fn order_quantity(investment_jpy: f64, limit_price: u64, multiplier: f64) -> f64 {
    let scale = 10f64.powi(QUANTITY_DECIMALS);
    let base_lot = ((investment_jpy / limit_price as f64) * scale).floor() / scale;
    base_lot * multiplier
}
