//! Game rules that vary between variants.
//!
//! The engine calls into `InteractionRule` whenever pieces meet on a tile
//! but never hardcodes what a meeting means.

pub mod interaction;

pub use interaction::{CaptureOpponents, Coexist, Interaction, InteractionRule};
