//! Batch evaluation across scenarios
//!
//! Scenarios are independent: each reads its own files and contributes one
//! entry to the persisted error map. A failing scenario is recorded and never
//! aborts its siblings.

use std::collections::BTreeMap;

use log::{info, warn};
use rayon::prelude::*;

use crate::annot::parse_summary_file;
use crate::config::Config;
use crate::error::{AlignSyncError, Result};
use crate::eval::align_errors::{evaluate_scenario, ScenarioErrors};

/// Per-scenario pass/fail outcome of a batch evaluation.
#[derive(Debug, Default)]
pub struct EvalBatchReport {
    pub passed: Vec<String>,
    pub failed: Vec<(String, String)>,
}

/// Evaluates every scenario listed in `scenarios.summary` and persists the
/// scenario id → (errors, measures) map as `errs.json` in the output
/// directory.
pub fn evaluate_batch(config: &Config) -> Result<EvalBatchReport> {
    let scenarios = parse_summary_file(config.summary_file())?;
    info!("evaluating {} scenarios", scenarios.len());

    let results: Vec<(String, Result<ScenarioErrors>)> = scenarios
        .par_iter()
        .map(|scenario| {
            let scenario_dir = config.scenario_dir(&scenario.id);
            let outcome = evaluate_scenario(
                config.hypothesis_file(&scenario.id),
                scenario_dir.join("p.beats"),
                scenario_dir.join("o.beats"),
                scenario_dir.join("scenario.info"),
                config,
            );
            (scenario.id.clone(), outcome)
        })
        .collect();

    let mut report = EvalBatchReport::default();
    let mut errors = BTreeMap::new();
    for (id, outcome) in results {
        match outcome {
            Ok(scenario_errors) => {
                errors.insert(id.clone(), scenario_errors);
                report.passed.push(id);
            }
            Err(e) => {
                warn!("scenario {} failed: {}", id, e);
                report.failed.push((id, e.to_string()));
            }
        }
    }

    std::fs::create_dir_all(&config.dirs.output)?;
    let outfile = config.dirs.output.join("errs.json");
    let json = serde_json::to_string_pretty(&errors)
        .map_err(|e| AlignSyncError::config(format!("failed to serialize errors: {}", e)))?;
    std::fs::write(&outfile, json)?;

    info!(
        "evaluation complete: {} passed, {} failed, results in {}",
        report.passed.len(),
        report.failed.len(),
        outfile.display()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use ndarray_npy::WriteNpyExt;
    use std::fs;
    use std::fs::File;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_scenario(root: &Path, id: &str, with_hypothesis: bool) {
        let scenario_dir = root.join("scenarios").join(id);
        fs::create_dir_all(&scenario_dir).unwrap();

        fs::write(
            scenario_dir.join("scenario.info"),
            format!(
                "{} audio/rach2_mov1_P1.wav audio/rach2_mov1_O1.wav audio/rach2_mov1_PO1.wav 1 4 0.0 4.0 0.0 4.0\n",
                id
            ),
        )
        .unwrap();
        fs::write(
            scenario_dir.join("p.beats"),
            "start,measure\n0.0,1\n1.0,2\n2.0,3\n3.0,4\n",
        )
        .unwrap();
        fs::write(
            scenario_dir.join("o.beats"),
            "start,measure\n0.0,1\n1.0,2\n2.0,3\n3.0,4\n",
        )
        .unwrap();

        if with_hypothesis {
            let exp_dir = root.join("experiments").join(id);
            fs::create_dir_all(&exp_dir).unwrap();
            let path = array![[0.0, 1.0, 2.0, 3.0], [0.0, 1.0, 2.0, 3.0]];
            path.write_npy(File::create(exp_dir.join("hyp.npy")).unwrap())
                .unwrap();
        }
    }

    fn test_config(root: &Path) -> Config {
        let mut config = Config::default();
        config.dirs.scenarios = root.join("scenarios");
        config.dirs.experiment = root.join("experiments");
        config.dirs.output = root.join("output");
        config.reference.eval_measures = root.join("eval.measures");
        fs::write(&config.reference.eval_measures, "rach2_mov1,1-4\n").unwrap();
        config
    }

    #[test]
    fn test_failing_scenario_does_not_abort_batch() {
        let root = TempDir::new().unwrap();
        write_scenario(root.path(), "s1", true);
        write_scenario(root.path(), "s2", false); // no hyp.npy
        fs::write(
            root.path().join("scenarios").join("scenarios.summary"),
            "s1 audio/rach2_mov1_P1.wav audio/rach2_mov1_O1.wav audio/rach2_mov1_PO1.wav 1 4 0.0 4.0 0.0 4.0\n\
             s2 audio/rach2_mov1_P1.wav audio/rach2_mov1_O1.wav audio/rach2_mov1_PO1.wav 1 4 0.0 4.0 0.0 4.0\n",
        )
        .unwrap();

        let config = test_config(root.path());
        let report = evaluate_batch(&config).unwrap();

        assert_eq!(report.passed, vec!["s1".to_string()]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "s2");

        let json = fs::read_to_string(config.dirs.output.join("errs.json")).unwrap();
        let errors: BTreeMap<String, ScenarioErrors> = serde_json::from_str(&json).unwrap();
        assert_eq!(errors.len(), 1);
        let s1 = &errors["s1"];
        assert_eq!(s1.measures, vec![1, 2, 3, 4]);
        for err in &s1.errors {
            assert!(err.abs() < 1e-9);
        }
    }
}
