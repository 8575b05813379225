//! Scenario info and summary files
//!
//! Whitespace-delimited, one scenario per line: id, piano filepath, orchestra
//! filepath, mixed filepath, measure start/end, piano query start/end,
//! orchestra query start/end. A `scenario.info` file holds one line; a
//! `scenarios.summary` file holds one line per scenario.

use std::path::{Path, PathBuf};

use crate::annot::beats::read_input;
use crate::error::{AlignSyncError, Result};

/// One evaluation/sonification scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioInfo {
    pub id: String,
    pub piano: PathBuf,
    pub orchestra: PathBuf,
    pub mixed: PathBuf,
    pub measure_start: i64,
    pub measure_end: i64,
    pub piano_query: (f64, f64),
    pub orchestra_query: (f64, f64),
}

impl ScenarioInfo {
    /// The movement id, derived from the orchestra file basename: the first
    /// two `_`-separated components (`rach2_mov1_O1.wav` → `rach2_mov1`).
    pub fn movement_id(&self) -> String {
        let stem = self
            .orchestra
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        let parts: Vec<&str> = stem.split('_').collect();
        parts[..parts.len().min(2)].join("_")
    }
}

/// Parses a `scenarios.summary` file, one scenario per line.
pub fn parse_summary_file<P: AsRef<Path>>(path: P) -> Result<Vec<ScenarioInfo>> {
    let path = path.as_ref();
    let content = read_input(path)?;

    content
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|line| parse_line(line, path))
        .collect()
}

/// Parses a `scenario.info` file, which must describe exactly one scenario.
pub fn parse_info_file<P: AsRef<Path>>(path: P) -> Result<ScenarioInfo> {
    let path = path.as_ref();
    let mut scenarios = parse_summary_file(path)?;
    if scenarios.len() != 1 {
        return Err(AlignSyncError::malformed(format!(
            "{}: expected exactly 1 scenario, found {}",
            path.display(),
            scenarios.len()
        )));
    }
    Ok(scenarios.remove(0))
}

/// Checks that a scenario directory carries the three required recordings.
pub fn verify_scenario_dir<P: AsRef<Path>>(dir: P) -> Result<()> {
    let dir = dir.as_ref();
    for name in ["p.wav", "o.wav", "po.wav"] {
        let file = dir.join(name);
        if !file.exists() {
            return Err(AlignSyncError::MissingInput(file));
        }
    }
    Ok(())
}

fn parse_line(line: &str, path: &Path) -> Result<ScenarioInfo> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 10 {
        return Err(AlignSyncError::malformed(format!(
            "{}: expected 10 fields per scenario line, got {}",
            path.display(),
            fields.len()
        )));
    }

    let int = |s: &str| -> Result<i64> {
        s.parse()
            .map_err(|_| AlignSyncError::malformed(format!("{}: bad integer {:?}", path.display(), s)))
    };
    let float = |s: &str| -> Result<f64> {
        s.parse()
            .map_err(|_| AlignSyncError::malformed(format!("{}: bad timestamp {:?}", path.display(), s)))
    };

    Ok(ScenarioInfo {
        id: fields[0].to_string(),
        piano: PathBuf::from(fields[1]),
        orchestra: PathBuf::from(fields[2]),
        mixed: PathBuf::from(fields[3]),
        measure_start: int(fields[4])?,
        measure_end: int(fields[5])?,
        piano_query: (float(fields[6])?, float(fields[7])?),
        orchestra_query: (float(fields[8])?, float(fields[9])?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const LINE: &str =
        "s1 audio/rach2_mov1_P1.wav audio/rach2_mov1_O1.wav audio/rach2_mov1_PO1.wav 1 48 0.0 120.5 30.2 151.0";

    #[test]
    fn test_parse_info_file() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "{}", LINE).unwrap();

        let info = parse_info_file(f.path()).unwrap();
        assert_eq!(info.id, "s1");
        assert_eq!(info.measure_start, 1);
        assert_eq!(info.measure_end, 48);
        assert_eq!(info.piano_query, (0.0, 120.5));
        assert_eq!(info.orchestra_query, (30.2, 151.0));
        assert_eq!(info.movement_id(), "rach2_mov1");
    }

    #[test]
    fn test_parse_summary_file() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "{}", LINE).unwrap();
        writeln!(f, "{}", LINE.replace("s1", "s2")).unwrap();

        let scenarios = parse_summary_file(f.path()).unwrap();
        assert_eq!(scenarios.len(), 2);
        assert_eq!(scenarios[0].id, "s1");
        assert_eq!(scenarios[1].id, "s2");
    }

    #[test]
    fn test_info_file_with_two_lines_rejected() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "{}", LINE).unwrap();
        writeln!(f, "{}", LINE.replace("s1", "s2")).unwrap();
        assert!(parse_info_file(f.path()).is_err());
    }

    #[test]
    fn test_short_line_is_malformed() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "s1 p.wav o.wav").unwrap();
        let err = parse_summary_file(f.path()).unwrap_err();
        assert!(matches!(err, AlignSyncError::MalformedInput { .. }));
    }

    #[test]
    fn test_verify_scenario_dir_reports_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = verify_scenario_dir(dir.path()).unwrap_err();
        assert!(matches!(err, AlignSyncError::MissingInput(_)));
    }
}
