//! Alignment error computation

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::annot::{parse_annotation_file, parse_eval_measures, parse_info_file};
use crate::config::Config;
use crate::error::Result;
use crate::eval::ground_truth::{match_ground_truth, GroundTruth};
use crate::path::{filter_degenerate_steps, WarpingPath};

/// Signed alignment errors for one scenario, index-aligned with the evaluated
/// measure numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioErrors {
    /// predicted_t2 - ground_truth_t2, per evaluated measure
    pub errors: Vec<f64>,
    pub measures: Vec<i64>,
}

/// Evaluates a hypothesis path against ground truth.
///
/// Each ground-truth `t1` anchor is mapped through the hypothesis path by
/// piecewise-linear interpolation (anchors outside the path's domain clamp to
/// the boundary value); the error is the difference to the ground-truth `t2`.
/// The hypothesis must have strictly increasing `t1`, which the degenerate-
/// step filter guarantees.
pub fn evaluate_alignment(hypothesis: &WarpingPath, ground_truth: &GroundTruth) -> ScenarioErrors {
    let errors = ground_truth
        .points
        .iter()
        .map(|&(t1, t2)| hypothesis.predict_t2(t1) - t2)
        .collect();

    ScenarioErrors {
        errors,
        measures: ground_truth.measures.clone(),
    }
}

/// Evaluates a single scenario from its files.
///
/// Loads the hypothesis path (converted to seconds per the configured frame
/// period), both beat annotation files and the scenario info, matches ground
/// truth against the movement's sanctioned measure set, and computes the
/// per-measure errors.
pub fn evaluate_scenario<P: AsRef<Path>>(
    hyp_file: P,
    annot1: P,
    annot2: P,
    info_file: P,
    config: &Config,
) -> Result<ScenarioErrors> {
    let info = parse_info_file(info_file)?;
    let timeline1 = parse_annotation_file(annot1)?;
    let timeline2 = parse_annotation_file(annot2)?;
    let eval_measures =
        parse_eval_measures(&config.reference.eval_measures, &info.movement_id())?;
    let ground_truth = match_ground_truth(&timeline1, &timeline2, &eval_measures);

    let raw = WarpingPath::from_npy_file(hyp_file, config.frame_period())?;
    // evaluation interpolates the filtered path; downsampling is for TSM only
    let hypothesis = filter_degenerate_steps(&raw)?;

    Ok(evaluate_alignment(&hypothesis, &ground_truth))
}
