//! Core business logic modules

pub mod selection;

// Re-export commonly used types
pub use selection::{SelectionState, Slot};
