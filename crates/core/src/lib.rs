//! Member segmentation core.
//!
//! Loads a linear rule set from JSON and scores member records against it.
//! No HTTP or configuration concerns live here.

pub mod error;
pub mod hashing;
pub mod normalize;
pub mod rules;
pub mod scoring;
