//! AlignSync - Alignment Evaluation and Sonification Library
//!
//! Evaluates computed warping paths between two recordings of the same
//! performance against measure-level ground truth annotations, and renders
//! time-synchronized stereo mixes via time-scale modification.

pub mod annot;
pub mod audio;
pub mod config;
pub mod error;
pub mod eval;
pub mod path;
pub mod sonify;

pub use config::{Args, Config};
pub use error::{AlignSyncError, Result};
pub use path::WarpingPath;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

pub fn init_logging(verbose: bool) {
    env_logger::Builder::from_env("RUST_LOG")
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .try_init()
        .ok();
}
