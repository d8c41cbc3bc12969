//! CSV loading and name search for the player ratings catalog
//!
//! The ratings file is one header record (discarded) followed by one record
//! per player: `name,overall,hard,clay,grass`. Loading is fail-fast: the
//! first malformed record aborts the whole load so the catalog never holds a
//! partial player set. Fields may be double-quoted, so names containing
//! commas survive.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::models::Player;

/// Default number of search results returned for a query
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Rating columns following the name field, in order
const RATING_COLUMNS: [&str; 4] = ["elo_overall", "elo_hard", "elo_clay", "elo_grass"];

/// Catalog load errors
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line {line}: expected 5 fields, got {got}")]
    FieldCount { line: usize, got: usize },

    #[error("line {line}: empty player name")]
    EmptyName { line: usize },

    #[error("line {line}: duplicate player name '{name}'")]
    DuplicateName { line: usize, name: String },

    #[error("line {line}: invalid {column} rating '{value}'")]
    InvalidRating {
        line: usize,
        column: &'static str,
        value: String,
    },

    #[error("failed to read ratings file: {0}")]
    Io(#[from] std::io::Error),
}

/// In-memory catalog of rated players
///
/// Loaded once at startup and never mutated afterwards. Insertion order of
/// the ratings file is preserved and drives search result ordering.
#[derive(Debug, Default)]
pub struct PlayerCatalog {
    players: Vec<Player>,
}

impl PlayerCatalog {
    /// An empty catalog, the fallback when loading fails
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load and parse a ratings CSV file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ParseError> {
        let content = fs::read_to_string(path.as_ref())?;
        let catalog = Self::parse(&content)?;
        info!("Loaded {} players from {:?}", catalog.len(), path.as_ref());
        Ok(catalog)
    }

    /// Parse ratings CSV text
    ///
    /// Header-only input yields an empty, non-error catalog.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let mut players = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for (idx, raw) in input.lines().enumerate() {
            // First record is the header
            if idx == 0 || raw.trim().is_empty() {
                continue;
            }
            let line = idx + 1;

            let fields = split_record(raw);
            if fields.len() != RATING_COLUMNS.len() + 1 {
                return Err(ParseError::FieldCount {
                    line,
                    got: fields.len(),
                });
            }

            let name = fields[0].trim();
            if name.is_empty() {
                return Err(ParseError::EmptyName { line });
            }
            if !seen.insert(name.to_string()) {
                return Err(ParseError::DuplicateName {
                    line,
                    name: name.to_string(),
                });
            }

            let mut ratings = [0.0f64; 4];
            for (i, column) in RATING_COLUMNS.iter().enumerate() {
                ratings[i] = parse_rating(&fields[i + 1], line, column)?;
            }

            players.push(Player {
                name: name.to_string(),
                elo_overall: ratings[0],
                elo_hard: ratings[1],
                elo_clay: ratings[2],
                elo_grass: ratings[3],
            });
        }

        Ok(Self { players })
    }

    /// Case-insensitive substring search over player names
    ///
    /// Preserves catalog insertion order among matches and truncates to
    /// `limit`. An empty or whitespace-only query yields no matches rather
    /// than the whole catalog.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&Player> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        self.players
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .take(limit)
            .collect()
    }

    /// Exact name lookup
    pub fn get(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    /// All players in insertion order
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

/// Parse a rating field to a finite f64
fn parse_rating(value: &str, line: usize, column: &'static str) -> Result<f64, ParseError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|r| r.is_finite())
        .ok_or_else(|| ParseError::InvalidRating {
            line,
            column,
            value: value.trim().to_string(),
        })
}

/// Split one record on commas, honoring double-quoted fields
///
/// A doubled quote inside a quoted field is an escaped quote.
fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);

    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "player,elo_overall,elo_hard,elo_clay,elo_grass";

    fn sample_catalog() -> PlayerCatalog {
        let csv = format!(
            "{HEADER}\n\
             Carlos Alcaraz,2150.5,2120.0,2180.3,2050.1\n\
             Novak Djokovic,2200.0,2210.4,2150.8,2190.2\n\
             Jannik Sinner,2180.2,2230.1,2100.5,2080.9\n\
             Casper Ruud,2010.7,1980.3,2090.6,1920.4\n"
        );
        PlayerCatalog::parse(&csv).unwrap()
    }

    #[test]
    fn test_parse_basic() {
        let catalog = sample_catalog();
        assert_eq!(catalog.len(), 4);
        let player = catalog.get("Novak Djokovic").unwrap();
        assert!((player.elo_clay - 2150.8).abs() < 1e-9);
    }

    #[test]
    fn test_header_only_is_empty_catalog() {
        let catalog = PlayerCatalog::parse(&format!("{HEADER}\n")).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.len(), 0);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let csv = format!("{HEADER}\n\nAlice,1500,1500,1500,1500\n\n");
        let catalog = PlayerCatalog::parse(&csv).unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_wrong_field_count_rejected() {
        let csv = format!("{HEADER}\nAlice,1500,1500,1500\n");
        let err = PlayerCatalog::parse(&csv).unwrap_err();
        assert!(matches!(err, ParseError::FieldCount { line: 2, got: 4 }));
    }

    #[test]
    fn test_malformed_rating_rejected() {
        let csv = format!("{HEADER}\nAlice,1500,abc,1500,1500\n");
        let err = PlayerCatalog::parse(&csv).unwrap_err();
        match err {
            ParseError::InvalidRating {
                line,
                column,
                value,
            } => {
                assert_eq!(line, 2);
                assert_eq!(column, "elo_hard");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_finite_rating_rejected() {
        for bad in ["NaN", "inf", "-inf"] {
            let csv = format!("{HEADER}\nAlice,1500,1500,{bad},1500\n");
            let err = PlayerCatalog::parse(&csv).unwrap_err();
            assert!(matches!(err, ParseError::InvalidRating { .. }), "{bad}");
        }
    }

    #[test]
    fn test_empty_name_rejected() {
        let csv = format!("{HEADER}\n ,1500,1500,1500,1500\n");
        assert!(matches!(
            PlayerCatalog::parse(&csv).unwrap_err(),
            ParseError::EmptyName { line: 2 }
        ));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let csv = format!("{HEADER}\nAlice,1500,1500,1500,1500\nAlice,1600,1600,1600,1600\n");
        assert!(matches!(
            PlayerCatalog::parse(&csv).unwrap_err(),
            ParseError::DuplicateName { line: 3, .. }
        ));
    }

    #[test]
    fn test_quoted_name_with_comma() {
        let csv = format!("{HEADER}\n\"Doe, John\",1500,1500,1500,1500\n");
        let catalog = PlayerCatalog::parse(&csv).unwrap();
        assert!(catalog.get("Doe, John").is_some());
    }

    #[test]
    fn test_split_record_escaped_quote() {
        let fields = split_record(r#""say ""hi""",1,2"#);
        assert_eq!(fields, vec![r#"say "hi""#, "1", "2"]);
    }

    #[test]
    fn test_search_empty_query_yields_nothing() {
        let catalog = sample_catalog();
        assert!(catalog.search("", 10).is_empty());
        assert!(catalog.search("   ", 10).is_empty());
    }

    #[test]
    fn test_search_case_insensitive_substring() {
        let catalog = sample_catalog();
        let matches = catalog.search("SINN", 10);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "Jannik Sinner");
    }

    #[test]
    fn test_search_preserves_insertion_order() {
        let catalog = sample_catalog();
        // "ca" hits Carlos Alcaraz and Casper Ruud, file order
        let names: Vec<&str> = catalog
            .search("ca", 10)
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["Carlos Alcaraz", "Casper Ruud"]);
    }

    #[test]
    fn test_search_respects_limit() {
        let catalog = sample_catalog();
        let matches = catalog.search("a", 2);
        assert_eq!(matches.len(), 2);
    }

    #[test]
    fn test_search_no_match() {
        let catalog = sample_catalog();
        assert!(catalog.search("federer", 10).is_empty());
    }

    #[test]
    fn test_get_is_exact() {
        let catalog = sample_catalog();
        assert!(catalog.get("Casper Ruud").is_some());
        assert!(catalog.get("casper ruud").is_none());
        assert!(catalog.get("Casper").is_none());
    }
}
