//! Warping path processing
//!
//! A warping path is an ordered correspondence between two recordings'
//! timelines. Raw paths come from alignment systems as 2×N `.npy` matrices and
//! must be filtered and downsampled before they can drive interpolation or
//! time-scale modification.

pub mod preprocess;
pub mod warping;

pub use preprocess::{downsample_interior, filter_degenerate_steps, preprocess};
pub use warping::{PathPoint, WarpingPath};
