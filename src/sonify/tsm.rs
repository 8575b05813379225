//! Time-scale modification boundary
//!
//! The synchronizer depends only on the [`TimeScale`] trait: given a signal
//! and a (source-time, output-time) warping path, produce a signal whose
//! content at source time t1 lands at output time t2. The operator is assumed
//! deterministic; its internal DSP quality is not part of the contract.
//! [`OlaTimeScale`] is the bundled windowed overlap-add implementation.

use ndarray::Array1;

use crate::error::{AlignSyncError, Result};
use crate::path::WarpingPath;

pub trait TimeScale: Send + Sync {
    /// Time-scales `signal` onto the output timeline described by `path`.
    ///
    /// `path.t1` is time in `signal`, `path.t2` is time in the output; both
    /// must be strictly increasing.
    fn time_scale(
        &self,
        signal: &Array1<f32>,
        path: &WarpingPath,
        sample_rate: u32,
    ) -> Result<Array1<f32>>;
}

/// Hann-windowed overlap-add time scaling with a per-frame rate taken from
/// the warping path.
#[derive(Debug, Clone)]
pub struct OlaTimeScale {
    frame_len: usize,
}

impl OlaTimeScale {
    pub fn new(frame_len: usize) -> Self {
        Self {
            frame_len: frame_len.max(4),
        }
    }
}

impl Default for OlaTimeScale {
    fn default() -> Self {
        Self::new(2048)
    }
}

impl TimeScale for OlaTimeScale {
    fn time_scale(
        &self,
        signal: &Array1<f32>,
        path: &WarpingPath,
        sample_rate: u32,
    ) -> Result<Array1<f32>> {
        for pair in path.points().windows(2) {
            if pair[0].t1 >= pair[1].t1 || pair[0].t2 >= pair[1].t2 {
                return Err(AlignSyncError::degenerate(
                    "time scaling requires a strictly increasing path in both coordinates",
                ));
            }
        }

        let sr = sample_rate as f64;
        let n_out = (path.last().t2 * sr).ceil() as usize;
        if n_out == 0 || signal.is_empty() {
            return Err(AlignSyncError::audio("nothing to time-scale"));
        }

        let frame = self.frame_len;
        let hop = frame / 2;
        let half = (frame / 2) as i64;

        // periodic Hann, unity overlap-add at 50% hop
        let window: Vec<f32> = (0..frame)
            .map(|k| {
                let phase = 2.0 * std::f64::consts::PI * k as f64 / frame as f64;
                (0.5 * (1.0 - phase.cos())) as f32
            })
            .collect();

        // maps output time to source time
        let inverse = path.swapped();

        let mut out = vec![0.0f32; n_out];
        let mut norm = vec![0.0f32; n_out];

        let mut start = 0usize;
        while start < n_out {
            let center_out = (start as i64 + half) as f64 / sr;
            let center_src = inverse.predict_t2(center_out) * sr;
            let src_start = center_src.round() as i64 - half;

            for k in 0..frame {
                let out_idx = start + k;
                if out_idx >= n_out {
                    break;
                }
                let src_idx = src_start + k as i64;
                if src_idx < 0 || src_idx >= signal.len() as i64 {
                    continue;
                }
                out[out_idx] += signal[src_idx as usize] * window[k];
                norm[out_idx] += window[k];
            }

            start += hop;
        }

        for (sample, weight) in out.iter_mut().zip(norm.iter()) {
            if *weight > 1e-6 {
                *sample /= weight;
            }
        }

        Ok(Array1::from(out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_path_preserves_signal() {
        let signal = Array1::from(vec![0.5f32; 8000]);
        let path = WarpingPath::from_pairs(&[(0.0, 0.0), (1.0, 1.0)]).unwrap();

        let tsm = OlaTimeScale::new(1024);
        let out = tsm.time_scale(&signal, &path, 8000).unwrap();
        assert_eq!(out.len(), 8000);
        // ignore window edge effects at the extremes
        for &s in out.iter().skip(512).take(7000) {
            assert!((s - 0.5).abs() < 1e-3, "sample {} deviates", s);
        }
    }

    #[test]
    fn test_double_stretch_doubles_length() {
        let signal = Array1::from(vec![0.3f32; 4000]);
        let path = WarpingPath::from_pairs(&[(0.0, 0.0), (0.5, 1.0)]).unwrap();

        let tsm = OlaTimeScale::new(512);
        let out = tsm.time_scale(&signal, &path, 8000).unwrap();
        assert_eq!(out.len(), 8000);
    }

    #[test]
    fn test_non_monotonic_path_rejected() {
        let signal = Array1::from(vec![0.1f32; 100]);
        let path = WarpingPath::from_pairs(&[(0.0, 0.0), (1.0, 1.0), (1.0, 2.0)]).unwrap();

        let tsm = OlaTimeScale::default();
        let err = tsm.time_scale(&signal, &path, 22050).unwrap_err();
        assert!(matches!(err, AlignSyncError::DegenerateWarpingPath { .. }));
    }

    #[test]
    fn test_empty_signal_rejected() {
        let signal = Array1::from(vec![]);
        let path = WarpingPath::from_pairs(&[(0.0, 0.0), (1.0, 1.0)]).unwrap();
        assert!(OlaTimeScale::default()
            .time_scale(&signal, &path, 22050)
            .is_err());
    }
}
