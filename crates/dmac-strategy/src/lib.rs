//! The crossover signal engine.

pub mod crossover;

pub use crossover::{Crossover, CrossoverConfig};
