//! Elo-based match outcome prediction
//!
//! Win probability from the rating-difference logistic model:
//!     expected_a = 1 / (1 + 10^((rb - ra) / 400))
//!     expected_b = 1 - expected_a
//!
//! Decimal odds are the reciprocal of the win probability (stake multiplier
//! for a win). The function is total over finite ratings; equal ratings give
//! exactly 0.5 / 0.5 and odds 2.0 / 2.0. Non-finite ratings are a data
//! defect rejected at catalog load time, not here.

use crate::models::{MatchPrediction, Player, PlayerOutcome, PredictResponse, Surface};

/// Rating-difference divisor of the logistic curve
const ELO_SCALE: f64 = 400.0;

/// Expected score of a player rated `rating_a` against one rated `rating_b`
///
/// # Examples
/// ```
/// use matchodds::predictor::expected_score;
/// let e = expected_score(2000.0, 1800.0);
/// assert!((e - 0.7597).abs() < 0.0001);
/// ```
pub fn expected_score(rating_a: f64, rating_b: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((rating_b - rating_a) / ELO_SCALE))
}

/// Win probabilities and decimal odds for both sides of a matchup
pub fn predict(rating_a: f64, rating_b: f64) -> MatchPrediction {
    let expected_a = expected_score(rating_a, rating_b);
    let expected_b = 1.0 - expected_a;

    MatchPrediction {
        p1_probability: expected_a,
        p2_probability: expected_b,
        p1_odds: 1.0 / expected_a,
        p2_odds: 1.0 / expected_b,
    }
}

/// Predict a match between two catalog players on the given surface
pub fn predict_match(player1: &Player, player2: &Player, surface: Surface) -> PredictResponse {
    let rating1 = player1.rating(surface);
    let rating2 = player2.rating(surface);
    let prediction = predict(rating1, rating2);

    PredictResponse {
        surface,
        player1: PlayerOutcome {
            name: player1.name.clone(),
            rating: rating1,
            probability: prediction.p1_probability,
            decimal_odds: prediction.p1_odds,
        },
        player2: PlayerOutcome {
            name: player2.name.clone(),
            rating: rating2,
            probability: prediction.p2_probability,
            decimal_odds: prediction.p2_odds,
        },
    }
}
