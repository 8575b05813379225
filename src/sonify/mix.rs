//! Stereo channel merging and loudness balancing

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// How to resolve a length mismatch between the two channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthPolicy {
    /// Truncate the longer channel to the shorter's length (default).
    Truncate,
    /// Zero-pad the shorter channel to the longer's length.
    Pad,
}

impl Default for LengthPolicy {
    fn default() -> Self {
        Self::Truncate
    }
}

/// Merges two mono waveforms into an N×2 stereo buffer.
pub fn merge_channels(
    left: &Array1<f32>,
    right: &Array1<f32>,
    policy: LengthPolicy,
) -> Array2<f32> {
    let n = match policy {
        LengthPolicy::Truncate => left.len().min(right.len()),
        LengthPolicy::Pad => left.len().max(right.len()),
    };

    let mut stereo = Array2::zeros((n, 2));
    for (i, &sample) in left.iter().take(n).enumerate() {
        stereo[[i, 0]] = sample;
    }
    for (i, &sample) in right.iter().take(n).enumerate() {
        stereo[[i, 1]] = sample;
    }
    stereo
}

/// Scales the second channel so both channels have equal mean squared
/// amplitude. A silent second channel is left untouched.
pub fn reweight_channel_volume(stereo: &mut Array2<f32>) {
    if stereo.nrows() == 0 {
        return;
    }

    let mse_left = mean_square(stereo.column(0).iter());
    let mse_right = mean_square(stereo.column(1).iter());
    if mse_right <= 0.0 {
        return;
    }

    let gain = (mse_left / mse_right).sqrt() as f32;
    for sample in stereo.column_mut(1).iter_mut() {
        *sample *= gain;
    }
}

fn mean_square<'a, I: ExactSizeIterator<Item = &'a f32>>(samples: I) -> f64 {
    let n = samples.len();
    samples.map(|&s| (s as f64) * (s as f64)).sum::<f64>() / n as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_uses_min_length() {
        let left = Array1::from(vec![0.1; 10]);
        let right = Array1::from(vec![0.2; 6]);
        let stereo = merge_channels(&left, &right, LengthPolicy::Truncate);
        assert_eq!(stereo.nrows(), 6);
    }

    #[test]
    fn test_pad_uses_max_length_with_zero_tail() {
        let left = Array1::from(vec![0.1; 10]);
        let right = Array1::from(vec![0.2; 6]);
        let stereo = merge_channels(&left, &right, LengthPolicy::Pad);
        assert_eq!(stereo.nrows(), 10);
        for i in 6..10 {
            assert_eq!(stereo[[i, 1]], 0.0);
        }
        for i in 0..10 {
            assert_eq!(stereo[[i, 0]], 0.1);
        }
    }

    #[test]
    fn test_reweighting_equalizes_mean_square() {
        let left = Array1::from(vec![0.5; 100]);
        let right = Array1::from(vec![0.1; 100]);
        let mut stereo = merge_channels(&left, &right, LengthPolicy::Truncate);
        reweight_channel_volume(&mut stereo);

        let mse_left = mean_square(stereo.column(0).iter());
        let mse_right = mean_square(stereo.column(1).iter());
        assert!((mse_left - mse_right).abs() < 1e-9);
    }

    #[test]
    fn test_reweighting_leaves_silent_channel() {
        let left = Array1::from(vec![0.5; 8]);
        let right = Array1::from(vec![0.0; 8]);
        let mut stereo = merge_channels(&left, &right, LengthPolicy::Truncate);
        reweight_channel_volume(&mut stereo);
        for i in 0..8 {
            assert_eq!(stereo[[i, 1]], 0.0);
        }
    }
}
