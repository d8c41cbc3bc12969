//! Selection state machine for the two-player matchup flow
//!
//! Tracks the search buffer, dropdown visibility, and chosen player for each
//! of the two slots, plus the active surface and whether the computed result
//! is shown. All mutation happens through discrete actions; any change to a
//! slot or the surface hides a previously revealed result. Presentation
//! layers watch the `revision` counter and re-read the accessors when it
//! moves, so the state stays framework-independent.

use std::sync::Arc;

use crate::data::csv_loader::{PlayerCatalog, DEFAULT_SEARCH_LIMIT};
use crate::models::{MatchPrediction, Player, Surface};
use crate::predictor;

/// The two matchup slots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    First,
    Second,
}

#[derive(Debug, Default)]
struct SlotState {
    query: String,
    /// Name key into the catalog; the catalog stays sole owner of the player
    selected: Option<String>,
    dropdown_open: bool,
}

/// Mutable matchup state driving the predictor
#[derive(Debug)]
pub struct SelectionState {
    catalog: Arc<PlayerCatalog>,
    slots: [SlotState; 2],
    surface: Surface,
    result_visible: bool,
    revision: u64,
}

impl SelectionState {
    pub fn new(catalog: Arc<PlayerCatalog>) -> Self {
        Self {
            catalog,
            slots: [SlotState::default(), SlotState::default()],
            surface: Surface::Overall,
            result_visible: false,
            revision: 0,
        }
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    /// Replace a slot's search text
    ///
    /// Typing invalidates the slot's prior pick and hides any shown result.
    pub fn set_query(&mut self, slot: Slot, text: &str) {
        let state = &mut self.slots[slot as usize];
        state.query = text.to_string();
        state.selected = None;
        state.dropdown_open = true;
        self.result_visible = false;
        self.touch();
    }

    /// Current search text for a slot
    pub fn query(&self, slot: Slot) -> &str {
        &self.slots[slot as usize].query
    }

    /// Filtered candidates for a slot's current query
    pub fn candidates(&self, slot: Slot) -> Vec<&Player> {
        self.catalog
            .search(&self.slots[slot as usize].query, DEFAULT_SEARCH_LIMIT)
    }

    /// Whether the slot's dropdown should be shown
    pub fn dropdown_open(&self, slot: Slot) -> bool {
        self.slots[slot as usize].dropdown_open
    }

    /// Bind a slot to a catalog player
    ///
    /// Refused (state untouched) when the name is not in the catalog.
    pub fn select(&mut self, slot: Slot, name: &str) -> bool {
        let Some(player) = self.catalog.get(name) else {
            return false;
        };
        let name = player.name.clone();

        let state = &mut self.slots[slot as usize];
        state.query = name.clone();
        state.selected = Some(name);
        state.dropdown_open = false;
        self.result_visible = false;
        self.touch();
        true
    }

    /// Blur-equivalent: close the slot's dropdown, keeping query and pick
    pub fn dismiss(&mut self, slot: Slot) {
        let state = &mut self.slots[slot as usize];
        if state.dropdown_open {
            state.dropdown_open = false;
            self.touch();
        }
    }

    /// The player currently bound to a slot, if any
    pub fn selected(&self, slot: Slot) -> Option<&Player> {
        self.slots[slot as usize]
            .selected
            .as_deref()
            .and_then(|name| self.catalog.get(name))
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    /// Change the active surface, hiding any shown result
    pub fn set_surface(&mut self, surface: Surface) {
        self.surface = surface;
        self.result_visible = false;
        self.touch();
    }

    /// Both slots bound
    pub fn can_compute(&self) -> bool {
        self.slots.iter().all(|s| s.selected.is_some())
    }

    /// Show the prediction. Silent no-op while either slot is unbound.
    pub fn reveal(&mut self) {
        if self.can_compute() {
            self.result_visible = true;
            self.touch();
        }
    }

    pub fn result_visible(&self) -> bool {
        self.result_visible
    }

    /// Current prediction, recomputed on every call
    ///
    /// Some only after `reveal()` with both slots bound.
    pub fn prediction(&self) -> Option<MatchPrediction> {
        if !self.result_visible {
            return None;
        }
        let first = self.selected(Slot::First)?;
        let second = self.selected(Slot::Second)?;
        Some(predictor::predict(
            first.rating(self.surface),
            second.rating(self.surface),
        ))
    }

    /// Monotonic change counter for poll-based observers
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The backing catalog
    pub fn catalog(&self) -> &PlayerCatalog {
        &self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_state() -> SelectionState {
        let csv = "player,elo_overall,elo_hard,elo_clay,elo_grass\n\
                   Alice Alpha,2000,2010,1990,1980\n\
                   Bob Beta,1800,1790,1810,1820\n\
                   Cara Gamma,1900,1910,1890,1880\n";
        SelectionState::new(Arc::new(PlayerCatalog::parse(csv).unwrap()))
    }

    #[test]
    fn test_initial_state() {
        let state = sample_state();
        assert_eq!(state.surface(), Surface::Overall);
        assert!(!state.can_compute());
        assert!(!state.result_visible());
        assert!(state.prediction().is_none());
        assert!(!state.dropdown_open(Slot::First));
    }

    #[test]
    fn test_set_query_filters_candidates() {
        let mut state = sample_state();
        state.set_query(Slot::First, "al");
        let names: Vec<&str> = state
            .candidates(Slot::First)
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["Alice Alpha"]);
        assert!(state.dropdown_open(Slot::First));
    }

    #[test]
    fn test_empty_query_has_no_candidates() {
        let state = sample_state();
        assert!(state.candidates(Slot::First).is_empty());
    }

    #[test]
    fn test_select_binds_slot_and_closes_dropdown() {
        let mut state = sample_state();
        state.set_query(Slot::First, "al");
        assert!(state.select(Slot::First, "Alice Alpha"));
        assert_eq!(state.selected(Slot::First).unwrap().name, "Alice Alpha");
        assert_eq!(state.query(Slot::First), "Alice Alpha");
        assert!(!state.dropdown_open(Slot::First));
    }

    #[test]
    fn test_select_unknown_name_refused() {
        let mut state = sample_state();
        let before = state.revision();
        assert!(!state.select(Slot::First, "Nobody"));
        assert!(state.selected(Slot::First).is_none());
        assert_eq!(state.revision(), before);
    }

    #[test]
    fn test_typing_clears_prior_pick() {
        let mut state = sample_state();
        state.select(Slot::First, "Alice Alpha");
        state.set_query(Slot::First, "anything");
        assert!(state.selected(Slot::First).is_none());
    }

    #[test]
    fn test_reveal_is_noop_until_both_bound() {
        let mut state = sample_state();
        state.reveal();
        assert!(!state.result_visible());

        state.select(Slot::First, "Alice Alpha");
        state.reveal();
        assert!(!state.result_visible());
        assert!(state.prediction().is_none());

        state.select(Slot::Second, "Bob Beta");
        assert!(state.can_compute());
        state.reveal();
        assert!(state.result_visible());
        assert!(state.prediction().is_some());
    }

    #[test]
    fn test_prediction_matches_ratings() {
        let mut state = sample_state();
        state.select(Slot::First, "Alice Alpha");
        state.select(Slot::Second, "Bob Beta");
        state.reveal();

        // overall 2000 vs 1800
        let pred = state.prediction().unwrap();
        assert!((pred.p1_probability - 0.7597).abs() < 0.0001);
        assert!((pred.p2_probability - 0.2403).abs() < 0.0001);
    }

    #[test]
    fn test_surface_change_hides_result() {
        let mut state = sample_state();
        state.select(Slot::First, "Alice Alpha");
        state.select(Slot::Second, "Bob Beta");
        state.reveal();
        assert!(state.result_visible());

        state.set_surface(Surface::Clay);
        assert!(!state.result_visible());
        assert!(state.prediction().is_none());

        // Both slots still bound, so the result can be revealed again
        state.reveal();
        let pred = state.prediction().unwrap();
        // clay 1990 vs 1810
        assert!(pred.p1_probability > 0.5);
    }

    #[test]
    fn test_typing_hides_result() {
        let mut state = sample_state();
        state.select(Slot::First, "Alice Alpha");
        state.select(Slot::Second, "Bob Beta");
        state.reveal();

        state.set_query(Slot::Second, "car");
        assert!(!state.result_visible());
        assert!(!state.can_compute());
    }

    #[test]
    fn test_dismiss_keeps_pick() {
        let mut state = sample_state();
        state.select(Slot::First, "Cara Gamma");
        state.set_query(Slot::Second, "bo");
        state.dismiss(Slot::Second);
        assert!(!state.dropdown_open(Slot::Second));
        assert_eq!(state.query(Slot::Second), "bo");
        assert_eq!(state.selected(Slot::First).unwrap().name, "Cara Gamma");
    }

    #[test]
    fn test_revision_moves_on_mutation() {
        let mut state = sample_state();
        let r0 = state.revision();
        state.set_query(Slot::First, "a");
        assert!(state.revision() > r0);
        let r1 = state.revision();
        state.set_surface(Surface::Grass);
        assert!(state.revision() > r1);
    }
}
