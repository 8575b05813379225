//! WAV audio file I/O

use std::fs::File;
use std::path::Path;

use hound::{SampleFormat, WavReader, WavWriter};
use ndarray::{Array1, Array2};

use crate::error::{AlignSyncError, Result};

/// A mono waveform with its sample rate.
#[derive(Debug, Clone)]
pub struct MonoAudio {
    pub samples: Array1<f32>,
    pub sample_rate: u32,
}

impl MonoAudio {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Loads a WAV file as a mono waveform.
///
/// Stereo input is downmixed by averaging the two channels. Supports 16-bit
/// integer and 32-bit float samples.
pub fn load_mono<P: AsRef<Path>>(path: P) -> Result<MonoAudio> {
    let path = path.as_ref();

    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => AlignSyncError::MissingInput(path.to_path_buf()),
        _ => AlignSyncError::from(e),
    })?;

    let mut reader = WavReader::new(file)
        .map_err(|e| AlignSyncError::audio(format!("cannot read {}: {}", path.display(), e)))?;

    let spec = reader.spec();
    if spec.sample_rate == 0 {
        return Err(AlignSyncError::audio("invalid sample rate"));
    }
    if spec.channels == 0 || spec.channels > 2 {
        return Err(AlignSyncError::audio(format!(
            "only mono or stereo audio supported, got {} channels",
            spec.channels
        )));
    }

    let samples: Vec<f32> = match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Int, 16) => {
            let read: std::result::Result<Vec<i16>, _> = reader.samples::<i16>().collect();
            read.map_err(|e| AlignSyncError::audio(format!("failed to read sample: {}", e)))?
                .into_iter()
                .map(|s| s as f32 / 32767.0)
                .collect()
        }
        (SampleFormat::Float, 32) => {
            let read: std::result::Result<Vec<f32>, _> = reader.samples::<f32>().collect();
            read.map_err(|e| AlignSyncError::audio(format!("failed to read sample: {}", e)))?
        }
        (format, bits) => {
            return Err(AlignSyncError::audio(format!(
                "unsupported sample format: {:?} {}-bit",
                format, bits
            )))
        }
    };

    let mono = if spec.channels == 1 {
        Array1::from(samples)
    } else {
        Array1::from_iter(
            samples
                .chunks_exact(2)
                .map(|frame| (frame[0] + frame[1]) * 0.5),
        )
    };

    if mono.is_empty() {
        return Err(AlignSyncError::audio(format!(
            "no audio samples in {}",
            path.display()
        )));
    }

    Ok(MonoAudio {
        samples: mono,
        sample_rate: spec.sample_rate,
    })
}

/// Writes an N×2 stereo buffer as a 16-bit PCM WAV file.
pub fn write_stereo_pcm16<P: AsRef<Path>>(
    path: P,
    samples: &Array2<f32>,
    sample_rate: u32,
) -> Result<()> {
    let path = path.as_ref();

    if samples.ncols() != 2 {
        return Err(AlignSyncError::audio(format!(
            "stereo buffer must have 2 columns, got {}",
            samples.ncols()
        )));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let spec = hound::WavSpec {
        channels: 2,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let file = File::create(path)
        .map_err(|e| AlignSyncError::audio(format!("cannot create {}: {}", path.display(), e)))?;
    let mut writer = WavWriter::new(file, spec)
        .map_err(|e| AlignSyncError::audio(format!("cannot create WAV writer: {}", e)))?;

    for row in samples.rows() {
        for &sample in row.iter() {
            let quantized = (sample.clamp(-1.0, 1.0) * 32767.0) as i16;
            writer
                .write_sample(quantized)
                .map_err(|e| AlignSyncError::audio(format!("failed to write sample: {}", e)))?;
        }
    }

    writer
        .finalize()
        .map_err(|e| AlignSyncError::audio(format!("failed to finalize WAV: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_stereo_roundtrip_downmix() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.wav");

        let mut stereo = Array2::zeros((4, 2));
        stereo.column_mut(0).fill(0.5);
        stereo.column_mut(1).fill(-0.5);
        write_stereo_pcm16(&path, &stereo, 22050).unwrap();

        let audio = load_mono(&path).unwrap();
        assert_eq!(audio.sample_rate, 22050);
        assert_eq!(audio.len(), 4);
        // opposite-phase channels cancel in the downmix
        for &s in audio.samples.iter() {
            assert!(s.abs() < 1e-3);
        }
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_mono("no/such/file.wav").unwrap_err();
        assert!(matches!(err, AlignSyncError::MissingInput(_)));
    }

    #[test]
    fn test_write_rejects_non_stereo() {
        let dir = TempDir::new().unwrap();
        let buf = Array2::<f32>::zeros((8, 3));
        let err = write_stereo_pcm16(dir.path().join("bad.wav"), &buf, 22050).unwrap_err();
        assert!(matches!(err, AlignSyncError::Audio { .. }));
    }
}
