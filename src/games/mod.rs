//! Ready-made game configurations.

pub mod zombies;
