/// Sentiment-weighted investment sizing
///
/// Maps a Fear & Greed score to a JPY amount for this week's buy: the more
/// fearful the market, the larger the purchase. A monotonically decreasing
/// step function with upper-inclusive band boundaries, so a score of exactly
/// 20/40/60/80 lands in the lower-multiplier band.
pub fn investment_for_score(score: u32, base: f64) -> f64 {
    if score <= 20 {
        base * 2.0
    } else if score <= 40 {
        base * 1.5
    } else if score <= 60 {
        base
    } else if score <= 80 {
        base * 0.75
    } else {
        base * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: f64 = 7500.0;

    #[test]
    fn test_extreme_fear_doubles_investment() {
        assert_eq!(investment_for_score(0, BASE), 15000.0);
        assert_eq!(investment_for_score(15, BASE), 15000.0);
        assert_eq!(investment_for_score(20, BASE), 15000.0);
    }

    #[test]
    fn test_band_boundaries_are_upper_inclusive() {
        // Each boundary value belongs to the band below it
        assert_eq!(investment_for_score(20, BASE), BASE * 2.0);
        assert_eq!(investment_for_score(21, BASE), BASE * 1.5);
        assert_eq!(investment_for_score(40, BASE), BASE * 1.5);
        assert_eq!(investment_for_score(41, BASE), BASE * 1.0);
        assert_eq!(investment_for_score(60, BASE), BASE * 1.0);
        assert_eq!(investment_for_score(61, BASE), BASE * 0.75);
        assert_eq!(investment_for_score(80, BASE), BASE * 0.75);
        assert_eq!(investment_for_score(81, BASE), BASE * 0.5);
    }

    #[test]
    fn test_extreme_greed_halves_investment() {
        assert_eq!(investment_for_score(90, BASE), 3750.0);
        assert_eq!(investment_for_score(100, BASE), 3750.0);
    }

    #[test]
    fn test_monotonically_non_increasing() {
        let mut previous = f64::INFINITY;
        for score in 0..=100 {
            let amount = investment_for_score(score, BASE);
            assert!(
                amount <= previous,
                "Investment increased at score {}: {} > {}",
                score,
                amount,
                previous
            );
            previous = amount;
        }
    }
}
