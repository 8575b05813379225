//! Time-scale synchronization of two recordings

use std::path::Path;

use log::{debug, warn};
use ndarray::Array2;

use crate::audio::{load_mono, resample_linear, write_stereo_pcm16};
use crate::config::Config;
use crate::error::Result;
use crate::path::{preprocess, WarpingPath};
use crate::sonify::mix::{merge_channels, reweight_channel_volume};
use crate::sonify::tsm::{OlaTimeScale, TimeScale};

/// A rendered stereo mix.
#[derive(Debug, Clone)]
pub struct StereoMix {
    pub samples: Array2<f32>,
    pub sample_rate: u32,
}

/// Renders loudness-balanced stereo mixes where the reference recording
/// occupies the left channel and a time-scaled version of the target occupies
/// the right, resynchronized via a hypothesis warping path.
pub struct TimeScaleSynchronizer {
    config: Config,
    tsm: Box<dyn TimeScale>,
}

impl TimeScaleSynchronizer {
    pub fn new(config: Config) -> Self {
        Self::with_time_scale(config, Box::new(OlaTimeScale::default()))
    }

    /// Use a caller-supplied time-scale operator instead of the bundled one.
    pub fn with_time_scale(config: Config, tsm: Box<dyn TimeScale>) -> Self {
        Self { config, tsm }
    }

    /// Synchronizes two recordings from their files.
    ///
    /// `align_file` holds the reference-to-target warping path as a 2×N npy
    /// matrix (row 0 = reference time). The path is filtered, downsampled per
    /// the configured factor, and handed to the time-scale operator with its
    /// coordinate roles swapped, since the operator consumes a target-time to
    /// reference-time mapping.
    pub fn synchronize_files(
        &self,
        reference_file: &Path,
        target_file: &Path,
        align_file: &Path,
        outfile: Option<&Path>,
    ) -> Result<StereoMix> {
        let reference = load_mono(reference_file)?;
        let mut target = load_mono(target_file)?;

        if target.sample_rate != reference.sample_rate {
            debug!(
                "resampling target from {} Hz to {} Hz",
                target.sample_rate, reference.sample_rate
            );
            target.samples =
                resample_linear(&target.samples, target.sample_rate, reference.sample_rate)?;
            target.sample_rate = reference.sample_rate;
        }

        if reference.len() > target.len() {
            warn!(
                "reference is longer than target; a subsequence alignment expects \
                 the shorter query as the reference recording"
            );
        }

        let raw = WarpingPath::from_npy_file(align_file, self.config.frame_period())?;
        let path = preprocess(&raw, self.config.downsample())?;

        let scaled =
            self.tsm
                .time_scale(&target.samples, &path.swapped(), reference.sample_rate)?;

        let mut stereo = merge_channels(
            &reference.samples,
            &scaled,
            self.config.length_policy(),
        );
        reweight_channel_volume(&mut stereo);

        if let Some(out) = outfile {
            write_stereo_pcm16(out, &stereo, reference.sample_rate)?;
        }

        Ok(StereoMix {
            samples: stereo,
            sample_rate: reference.sample_rate,
        })
    }
}
