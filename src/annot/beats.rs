//! Beat annotation files
//!
//! Comma-delimited text with a `start,measure` header, one row per annotated
//! measure boundary.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{AlignSyncError, Result};

/// Measure number to timestamp (seconds), one instance per recording.
pub type AnnotationTimeline = BTreeMap<i64, f64>;

/// Parses a beat annotation file into a measure → timestamp mapping.
pub fn parse_annotation_file<P: AsRef<Path>>(path: P) -> Result<AnnotationTimeline> {
    let path = path.as_ref();
    let content = read_input(path)?;

    let mut lines = content.lines().filter(|l| !l.trim().is_empty());
    let header = lines
        .next()
        .ok_or_else(|| AlignSyncError::malformed(format!("{}: empty file", path.display())))?;

    let columns: Vec<&str> = header.split(',').map(str::trim).collect();
    let start_col = column_index(&columns, "start", path)?;
    let measure_col = column_index(&columns, "measure", path)?;

    let mut timeline = AnnotationTimeline::new();
    for (lineno, line) in lines.enumerate() {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() <= start_col.max(measure_col) {
            return Err(AlignSyncError::malformed(format!(
                "{}: row {} has {} fields",
                path.display(),
                lineno + 2,
                fields.len()
            )));
        }

        let start: f64 = fields[start_col].parse().map_err(|_| {
            AlignSyncError::malformed(format!(
                "{}: bad timestamp {:?}",
                path.display(),
                fields[start_col]
            ))
        })?;
        let measure: i64 = fields[measure_col].parse().map_err(|_| {
            AlignSyncError::malformed(format!(
                "{}: bad measure number {:?}",
                path.display(),
                fields[measure_col]
            ))
        })?;

        timeline.insert(measure, start);
    }

    Ok(timeline)
}

fn column_index(columns: &[&str], name: &str, path: &Path) -> Result<usize> {
    columns.iter().position(|&c| c == name).ok_or_else(|| {
        AlignSyncError::malformed(format!("{}: missing column {:?}", path.display(), name))
    })
}

pub(crate) fn read_input(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => AlignSyncError::MissingInput(path.to_path_buf()),
        _ => AlignSyncError::from(e),
    })
}
