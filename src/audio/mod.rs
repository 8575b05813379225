//! Audio I/O
//!
//! WAV reading and writing plus sample-rate conversion. Input recordings are
//! loaded as mono float waveforms; sonification output is 16-bit PCM stereo.

pub mod resample;
pub mod wav;

pub use resample::resample_linear;
pub use wav::{load_mono, write_stereo_pcm16, MonoAudio};
