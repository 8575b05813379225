//! Audio data summary
//!
//! Shared reference file with one row per recording: `id,timestamps`, where
//! `timestamps` is a `start-end` range in seconds. The range is only declared
//! for full-ensemble (orchestra) recordings; other rows leave it empty.

use std::collections::BTreeMap;
use std::path::Path;

use crate::annot::beats::read_input;
use crate::annot::scenario::ScenarioInfo;
use crate::error::{AlignSyncError, Result};

/// Recording id → optional global (start, end) timestamps.
pub type AudioSummary = BTreeMap<String, Option<(f64, f64)>>;

/// Parses the audio data summary file.
pub fn parse_audio_summary<P: AsRef<Path>>(path: P) -> Result<AudioSummary> {
    let path = path.as_ref();
    let content = read_input(path)?;

    let mut lines = content.lines().filter(|l| !l.trim().is_empty());
    let header = lines
        .next()
        .ok_or_else(|| AlignSyncError::malformed(format!("{}: empty file", path.display())))?;
    if !header.split(',').any(|c| c.trim() == "id") {
        return Err(AlignSyncError::malformed(format!(
            "{}: missing column \"id\"",
            path.display()
        )));
    }

    let mut summary = AudioSummary::new();
    for line in lines {
        let mut fields = line.split(',').map(str::trim);
        let id = fields
            .next()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                AlignSyncError::malformed(format!("{}: row without id", path.display()))
            })?;

        let timestamps = match fields.next() {
            None | Some("") => None,
            Some(range) => Some(parse_timestamp_range(range).ok_or_else(|| {
                AlignSyncError::malformed(format!(
                    "{}: bad timestamp range {:?} for {}",
                    path.display(),
                    range,
                    id
                ))
            })?),
        };

        summary.insert(id.to_string(), timestamps);
    }

    Ok(summary)
}

/// Returns the global start/end timestamps of the scenario's orchestra
/// recording, as declared in the audio summary.
///
/// A recording without a declared range cannot anchor operations that need
/// absolute orchestra time, so its absence is an explicit error.
pub fn orchestra_start_end<P: AsRef<Path>>(
    info: &ScenarioInfo,
    summary_file: P,
) -> Result<(f64, f64)> {
    let summary = parse_audio_summary(summary_file)?;

    let stem = info
        .orchestra
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    let key = format!("{}.wav", stem);

    match summary.get(&key) {
        Some(Some(range)) => Ok(*range),
        _ => Err(AlignSyncError::MissingGlobalTimestamps(key)),
    }
}

fn parse_timestamp_range(range: &str) -> Option<(f64, f64)> {
    let (start, end) = range.split_once('-')?;
    Some((start.trim().parse().ok()?, end.trim().parse().ok()?))
}
