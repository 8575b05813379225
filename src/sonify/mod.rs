//! TSM-based sonification
//!
//! Renders a stereo mix of two recordings where one channel has been
//! time-scale modified onto the other's timeline via a warping path.

pub mod batch;
pub mod mix;
pub mod synchronizer;
pub mod tsm;

pub use batch::{sonify_batch, sonify_scenario, SonifyBatchReport, TaskStatus};
pub use mix::{merge_channels, reweight_channel_volume, LengthPolicy};
pub use synchronizer::{StereoMix, TimeScaleSynchronizer};
pub use tsm::{OlaTimeScale, TimeScale};
