//! Rolling mean indicators for the crossover engine.
//!
//! Only simple arithmetic means are provided; the crossover contract is
//! defined over trailing simple means, not exponential ones.

pub mod moving_average;

pub use moving_average::{Sma, StreamingSma};
