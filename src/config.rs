//! Configuration management

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::error::{AlignSyncError, Result};
use crate::sonify::LengthPolicy;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub dirs: DirsConfig,
    pub reference: ReferenceConfig,
    pub path: PathProcessingConfig,
    pub sonify: SonifyConfig,
}

/// Directory layout for a batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirsConfig {
    /// Directory containing per-scenario inputs and `scenarios.summary`.
    pub scenarios: PathBuf,
    /// Directory containing per-scenario hypothesis alignments (`hyp.npy`).
    pub experiment: PathBuf,
    /// Directory receiving evaluation and sonification outputs.
    pub output: PathBuf,
}

/// Shared reference data files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceConfig {
    pub eval_measures: PathBuf,
    pub audio_summary: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathProcessingConfig {
    /// Keep every k-th interior path point; 1 disables downsampling.
    pub downsample: usize,
    /// Seconds per frame when hypothesis paths are stored as frame indices.
    /// Absent means the paths are already in seconds.
    pub frame_period: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SonifyConfig {
    pub length_policy: LengthPolicy,
    pub workers: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dirs: DirsConfig::default(),
            reference: ReferenceConfig::default(),
            path: PathProcessingConfig::default(),
            sonify: SonifyConfig::default(),
        }
    }
}

impl Default for DirsConfig {
    fn default() -> Self {
        Self {
            scenarios: PathBuf::from("scenarios"),
            experiment: PathBuf::from("experiments"),
            output: PathBuf::from("output"),
        }
    }
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            eval_measures: PathBuf::from("annot/eval.measures"),
            audio_summary: PathBuf::from("cfg_files/AudioDataSummary.csv"),
        }
    }
}

impl Default for PathProcessingConfig {
    fn default() -> Self {
        Self {
            downsample: 1,
            frame_period: None,
        }
    }
}

impl Default for SonifyConfig {
    fn default() -> Self {
        Self {
            length_policy: LengthPolicy::Truncate,
            workers: num_cpus::get(),
        }
    }
}

impl Config {
    pub fn downsample(&self) -> usize {
        self.path.downsample
    }

    pub fn frame_period(&self) -> Option<f64> {
        self.path.frame_period
    }

    pub fn length_policy(&self) -> LengthPolicy {
        self.sonify.length_policy
    }

    pub fn workers(&self) -> usize {
        self.sonify.workers
    }

    pub fn summary_file(&self) -> PathBuf {
        self.dirs.scenarios.join("scenarios.summary")
    }

    pub fn scenario_dir(&self, scenario_id: &str) -> PathBuf {
        self.dirs.scenarios.join(scenario_id)
    }

    pub fn hypothesis_file(&self, scenario_id: &str) -> PathBuf {
        self.dirs.experiment.join(scenario_id).join("hyp.npy")
    }

    /// Create config from command line arguments layered over a TOML file.
    pub fn from_args_and_config(args: &Args) -> Result<Self> {
        let mut config = if let Some(config_path) = &args.config_file {
            Self::from_file(config_path)?
        } else {
            Self::default()
        };

        if let Some(dir) = &args.scenarios_dir {
            config.dirs.scenarios = dir.clone();
        }
        if let Some(dir) = &args.experiment_dir {
            config.dirs.experiment = dir.clone();
        }
        if let Some(dir) = &args.out_dir {
            config.dirs.output = dir.clone();
        }
        if let Some(file) = &args.eval_measures {
            config.reference.eval_measures = file.clone();
        }
        if let Some(file) = &args.audio_summary {
            config.reference.audio_summary = file.clone();
        }
        if let Some(downsample) = args.downsample {
            config.path.downsample = downsample;
        }
        if let Some(frame_period) = args.frame_period {
            config.path.frame_period = Some(frame_period);
        }
        if args.pad {
            config.sonify.length_policy = LengthPolicy::Pad;
        }
        if let Some(workers) = args.workers {
            config.sonify.workers = workers;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load config from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AlignSyncError::config(format!("failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| AlignSyncError::config(format!("failed to parse config file: {}", e)))
    }

    /// Save config to a TOML file.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| AlignSyncError::config(format!("failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| AlignSyncError::config(format!("failed to write config file: {}", e)))
    }

    /// Validate configuration parameter validity.
    pub fn validate(&self) -> Result<()> {
        if self.path.downsample == 0 {
            return Err(AlignSyncError::config("downsample factor must be >= 1"));
        }

        if let Some(period) = self.path.frame_period {
            if !(period > 0.0) {
                return Err(AlignSyncError::config("frame period must be positive"));
            }
        }

        if self.sonify.workers == 0 {
            return Err(AlignSyncError::config("worker count must be >= 1"));
        }
        if self.sonify.workers > num_cpus::get() * 2 {
            return Err(AlignSyncError::config(
                "worker count cannot exceed 2x logical CPU cores",
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Parser)]
#[command(name = "alignsync", about = "Alignment evaluation and sonification", version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    #[arg(long = "scenarios-dir", global = true, help = "Directory containing scenario inputs")]
    pub scenarios_dir: Option<PathBuf>,

    #[arg(long = "experiment-dir", global = true, help = "Directory containing hypothesis alignments")]
    pub experiment_dir: Option<PathBuf>,

    #[arg(short = 'o', long = "out-dir", global = true, help = "Output directory")]
    pub out_dir: Option<PathBuf>,

    #[arg(long = "eval-measures", global = true, help = "Evaluation measures file")]
    pub eval_measures: Option<PathBuf>,

    #[arg(long = "audio-summary", global = true, help = "Audio data summary file")]
    pub audio_summary: Option<PathBuf>,

    #[arg(short = 'd', long = "downsample", global = true, help = "Warping path downsample factor (>= 1)")]
    pub downsample: Option<usize>,

    #[arg(long = "frame-period", global = true, help = "Seconds per frame for frame-indexed warping paths")]
    pub frame_period: Option<f64>,

    #[arg(long = "pad", global = true, help = "Zero-pad the shorter channel instead of truncating the longer")]
    pub pad: bool,

    #[arg(short = 'w', long = "workers", global = true, help = "Sonification worker count")]
    pub workers: Option<usize>,

    #[arg(short = 'c', long = "config", global = true, help = "Config file path (TOML format)")]
    pub config_file: Option<PathBuf>,

    #[arg(short = 'v', long = "verbose", global = true, help = "Enable verbose output mode")]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Evaluate alignment errors for all scenarios in an experiment
    Eval,
    /// Render time-synchronized stereo mixes for all scenarios
    Sonify,
    /// Inspect a single scenario directory
    Info {
        /// Scenario directory containing scenario.info and recordings
        scenario_dir: PathBuf,
    },
}
