//! Matchodds - Tennis match outcome prediction from Elo surface ratings
//!
//! This library provides:
//! - A player ratings catalog loaded from CSV, with substring name search
//! - A selection state machine driving the two-player matchup flow
//! - Win probability and decimal odds from the Elo expected-score formula
//!
//! # Example
//!
//! ```
//! use matchodds::predictor;
//!
//! let pred = predictor::predict(2000.0, 1800.0);
//! assert!(pred.p1_probability > 0.75);
//! assert_eq!(pred.p1_probability + pred.p2_probability, 1.0);
//! ```

pub mod core;
pub mod data;
pub mod models;
pub mod predictor;

// API-specific modules (only available with api feature)
#[cfg(feature = "api")]
pub mod error;

// Re-export commonly used types
pub use crate::core::{SelectionState, Slot};
pub use crate::data::{ParseError, PlayerCatalog, DEFAULT_SEARCH_LIMIT};
pub use crate::models::{
    MatchPrediction, Player, PlayerOutcome, PredictRequest, PredictResponse, Surface,
};
