//! Shuttle module — the single capacity-bounded mover and its deck.

pub mod deck;
pub mod agent;

pub use agent::{Berth, Shuttle};
pub use deck::Deck;
