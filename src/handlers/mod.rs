//! HTTP request handlers

pub mod health;
pub mod players;
pub mod predict;
