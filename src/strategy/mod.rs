pub mod pricing;
pub mod sizing;

pub use pricing::{limit_price, order_quantity};
pub use sizing::investment_for_score;
