//! Traits describing read-only content and deterministic randomness.
//!
//! The class catalog is exposed through [`ClassOracle`] so the lifecycle
//! runtime never couples to a concrete content source. [`RngOracle`] keeps
//! every probabilistic roll (stealth dodge, evasion, quick step direction)
//! reproducible from a seed.
mod catalog;
mod error;
mod rng;

pub use catalog::{ClassCatalog, ClassData, ClassOracle};
pub use error::CatalogError;
pub use rng::{Dice, PcgRng, RngOracle, compute_seed};
