//! Sample-rate conversion by linear interpolation
//!
//! Used to bring the two input recordings to a common rate before mixing.

use ndarray::Array1;

use crate::error::{AlignSyncError, Result};

/// Resamples a mono waveform from `from_rate` to `to_rate`.
pub fn resample_linear(data: &Array1<f32>, from_rate: u32, to_rate: u32) -> Result<Array1<f32>> {
    if data.is_empty() {
        return Err(AlignSyncError::audio("cannot resample empty signal"));
    }
    if from_rate == to_rate {
        return Ok(data.clone());
    }

    let ratio = to_rate as f64 / from_rate as f64;
    let new_length = (data.len() as f64 * ratio).round() as usize;
    let old_length = data.len();

    let mut out = Array1::zeros(new_length);
    for i in 0..new_length {
        let pos = i as f64 / ratio;
        let index = pos.floor() as usize;
        let fraction = (pos - index as f64) as f32;

        out[i] = if index >= old_length - 1 {
            data[old_length - 1]
        } else {
            data[index] + (data[index + 1] - data[index]) * fraction
        };
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_rate_is_identity() {
        let data = Array1::from(vec![0.1, 0.2, 0.3]);
        let out = resample_linear(&data, 22050, 22050).unwrap();
        assert_eq!(out, data);
    }

    #[test]
    fn test_upsample_doubles_length() {
        let data = Array1::from(vec![0.0, 1.0]);
        let out = resample_linear(&data, 8000, 16000).unwrap();
        assert_eq!(out.len(), 4);
        assert_eq!(out[0], 0.0);
        assert!((out[1] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_empty_signal_rejected() {
        let data = Array1::from(vec![]);
        assert!(resample_linear(&data, 8000, 16000).is_err());
    }
}
