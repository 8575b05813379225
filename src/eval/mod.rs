//! Alignment evaluation
//!
//! Compares hypothesis warping paths against measure-level ground truth and
//! aggregates signed errors across scenarios.

pub mod align_errors;
pub mod batch;
pub mod ground_truth;

pub use align_errors::{evaluate_alignment, evaluate_scenario, ScenarioErrors};
pub use batch::{evaluate_batch, EvalBatchReport};
pub use ground_truth::{match_ground_truth, GroundTruth};
