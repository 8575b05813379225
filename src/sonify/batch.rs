//! Batch sonification across scenarios
//!
//! Each scenario renders to its own output file, so the batch is
//! embarrassingly parallel. A fixed pool of workers consumes scenario ids
//! from task channels; every outcome, including failures, flows back through
//! a result channel so one bad scenario never takes down the run. Outputs
//! that already exist are skipped, which makes interrupted runs resumable.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread::{self, JoinHandle};

use log::{debug, info, warn};

use crate::annot::parse_summary_file;
use crate::config::Config;
use crate::error::Result;
use crate::sonify::synchronizer::TimeScaleSynchronizer;

/// Outcome of one scenario's sonification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Rendered,
    Skipped,
}

/// Per-scenario outcomes of a batch run.
#[derive(Debug, Default)]
pub struct SonifyBatchReport {
    pub rendered: Vec<String>,
    pub skipped: Vec<String>,
    pub failed: Vec<(String, String)>,
}

struct Task {
    scenario_id: String,
}

struct Outcome {
    scenario_id: String,
    result: std::result::Result<TaskStatus, String>,
}

struct Worker {
    tx: Sender<Option<Task>>,
    rx: Receiver<Outcome>,
    handle: Option<JoinHandle<()>>,
}

impl Worker {
    fn new(config: Config) -> Self {
        let (task_tx, task_rx) = channel::<Option<Task>>();
        let (out_tx, out_rx) = channel::<Outcome>();

        let handle = thread::spawn(move || {
            let synchronizer = TimeScaleSynchronizer::new(config.clone());

            while let Ok(Some(task)) = task_rx.recv() {
                let result = sonify_scenario(&synchronizer, &config, &task.scenario_id)
                    .map_err(|e| e.to_string());
                let _ = out_tx.send(Outcome {
                    scenario_id: task.scenario_id,
                    result,
                });
            }
        });

        Self {
            tx: task_tx,
            rx: out_rx,
            handle: Some(handle),
        }
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        let _ = self.tx.send(None);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Sonifies one scenario, skipping it when the output file already exists.
pub fn sonify_scenario(
    synchronizer: &TimeScaleSynchronizer,
    config: &Config,
    scenario_id: &str,
) -> Result<TaskStatus> {
    let out_file = config.dirs.output.join(format!("{}.wav", scenario_id));
    if out_file.exists() {
        debug!("skipping {} -- output already exists", scenario_id);
        return Ok(TaskStatus::Skipped);
    }

    let scenario_dir = config.scenario_dir(scenario_id);
    synchronizer.synchronize_files(
        &scenario_dir.join("p.wav"),
        &scenario_dir.join("o.wav"),
        &config.hypothesis_file(scenario_id),
        Some(&out_file),
    )?;

    Ok(TaskStatus::Rendered)
}

/// Sonifies every scenario listed in `scenarios.summary` using a pool of
/// worker threads.
pub fn sonify_batch(config: &Config) -> Result<SonifyBatchReport> {
    let scenarios = parse_summary_file(config.summary_file())?;
    std::fs::create_dir_all(&config.dirs.output)?;

    let num_workers = config.workers().max(1).min(scenarios.len().max(1));
    info!(
        "sonifying {} scenarios with {} workers",
        scenarios.len(),
        num_workers
    );

    let workers: Vec<Worker> = (0..num_workers).map(|_| Worker::new(config.clone())).collect();

    let mut tasks_per_worker = vec![0usize; workers.len()];
    for (i, scenario) in scenarios.iter().enumerate() {
        let worker_idx = i % workers.len();
        if workers[worker_idx]
            .tx
            .send(Some(Task {
                scenario_id: scenario.id.clone(),
            }))
            .is_ok()
        {
            tasks_per_worker[worker_idx] += 1;
        }
    }

    let mut report = SonifyBatchReport::default();
    for (worker_idx, &count) in tasks_per_worker.iter().enumerate() {
        for _ in 0..count {
            let outcome = match workers[worker_idx].rx.recv() {
                Ok(outcome) => outcome,
                Err(_) => break,
            };
            match outcome.result {
                Ok(TaskStatus::Rendered) => report.rendered.push(outcome.scenario_id),
                Ok(TaskStatus::Skipped) => report.skipped.push(outcome.scenario_id),
                Err(message) => {
                    warn!("scenario {} failed: {}", outcome.scenario_id, message);
                    report.failed.push((outcome.scenario_id, message));
                }
            }
        }
    }
    drop(workers);

    info!(
        "sonification complete: {} rendered, {} skipped, {} failed",
        report.rendered.len(),
        report.skipped.len(),
        report.failed.len()
    );
    Ok(report)
}
