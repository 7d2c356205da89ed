//! Rule set model and loader.
//!
//! A rule document declares segment intercepts, feature rules with
//! per-segment coefficients, and classification thresholds. The loader
//! validates it into an immutable [`RuleSet`].

pub mod loader;
pub mod model;
pub mod segments;
pub mod tables;

pub use loader::{load_rule_set, load_rule_set_from_paths, LoadOptions};
pub use model::{FeatureRule, FieldTable, RuleSet, SegmentScores, Thresholds, ValueTables};
