use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Court surface a rating applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    #[default]
    Overall,
    Hard,
    Clay,
    Grass,
}

impl Surface {
    /// All declared surfaces, in ratings-file column order
    pub const ALL: [Surface; 4] = [
        Surface::Overall,
        Surface::Hard,
        Surface::Clay,
        Surface::Grass,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Surface::Overall => "overall",
            Surface::Hard => "hard",
            Surface::Clay => "clay",
            Surface::Grass => "grass",
        }
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejected surface name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown surface '{0}', expected one of: overall, hard, clay, grass")]
pub struct InvalidSurface(pub String);

impl FromStr for Surface {
    type Err = InvalidSurface;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "overall" => Ok(Surface::Overall),
            "hard" => Ok(Surface::Hard),
            "clay" => Ok(Surface::Clay),
            "grass" => Ok(Surface::Grass),
            _ => Err(InvalidSurface(s.to_string())),
        }
    }
}

/// A rated player from the ratings table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub elo_overall: f64,
    pub elo_hard: f64,
    pub elo_clay: f64,
    pub elo_grass: f64,
}

impl Player {
    /// Rating on the given surface
    pub fn rating(&self, surface: Surface) -> f64 {
        match surface {
            Surface::Overall => self.elo_overall,
            Surface::Hard => self.elo_hard,
            Surface::Clay => self.elo_clay,
            Surface::Grass => self.elo_grass,
        }
    }
}

/// Win probability and decimal odds for both sides of a matchup
///
/// Probabilities sum to 1 by construction. Values are unrounded; rounding to
/// two decimal places happens at the presentation layer only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchPrediction {
    pub p1_probability: f64,
    pub p2_probability: f64,
    pub p1_odds: f64,
    pub p2_odds: f64,
}

/// Match prediction request
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictRequest {
    pub player1: String,
    pub player2: String,
    #[serde(default)]
    pub surface: Surface,
}

/// One side of a prediction response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerOutcome {
    pub name: String,
    pub rating: f64,
    pub probability: f64,
    pub decimal_odds: f64,
}

/// Match prediction response
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    pub surface: Surface,
    pub player1: PlayerOutcome,
    pub player2: PlayerOutcome,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub players_loaded: usize,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
