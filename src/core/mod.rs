//! Core utilities: types, errors, logging, deterministic RNG, color.

pub mod types;
pub mod error;
pub mod logging;
pub mod rng;
pub mod color;

pub use error::Error;
pub use rng::{make_seed, GrowthRng};
pub use types::Result;
