//! Evaluation measure sets
//!
//! One movement per line: the movement id followed by comma-separated
//! inclusive measure ranges, e.g. `rach2_mov1,12-45,50-60`.

use std::collections::BTreeSet;
use std::path::Path;

use crate::annot::beats::read_input;
use crate::error::{AlignSyncError, Result};

/// Returns the set of measure numbers sanctioned for evaluation of
/// `movement_id`. A movement absent from the file yields an empty set.
pub fn parse_eval_measures<P: AsRef<Path>>(path: P, movement_id: &str) -> Result<BTreeSet<i64>> {
    let path = path.as_ref();
    let content = read_input(path)?;

    let mut measures = BTreeSet::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut parts = line.split(',');
        if parts.next() != Some(movement_id) {
            continue;
        }
        for range in parts {
            let (start, end) = parse_range(range).ok_or_else(|| {
                AlignSyncError::malformed(format!(
                    "{}: bad measure range {:?}",
                    path.display(),
                    range
                ))
            })?;
            measures.extend(start..=end);
        }
    }

    Ok(measures)
}

fn parse_range(range: &str) -> Option<(i64, i64)> {
    let (start, end) = range.trim().split_once('-')?;
    let start: i64 = start.parse().ok()?;
    let end: i64 = end.parse().ok()?;
    (start <= end).then_some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_union_of_ranges() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "rach2_mov1,1-3,10-12").unwrap();
        writeln!(f, "rach2_mov2,5-6").unwrap();

        let set = parse_eval_measures(f.path(), "rach2_mov1").unwrap();
        assert_eq!(set.into_iter().collect::<Vec<_>>(), vec![1, 2, 3, 10, 11, 12]);
    }

    #[test]
    fn test_unknown_movement_is_empty() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "rach2_mov1,1-3").unwrap();
        assert!(parse_eval_measures(f.path(), "beeth5_mov1").unwrap().is_empty());
    }

    #[test]
    fn test_bad_range_is_malformed() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "rach2_mov1,3-1").unwrap();
        assert!(parse_eval_measures(f.path(), "rach2_mov1").is_err());
    }
}
