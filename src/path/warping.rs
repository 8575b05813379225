//! Warping path type and loading

use std::fs::File;
use std::path::Path;

use ndarray::Array2;
use ndarray_npy::ReadNpyExt;

use crate::error::{AlignSyncError, Result};

/// One correspondence point: `t1` on the first timeline, `t2` on the second,
/// both in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathPoint {
    pub t1: f64,
    pub t2: f64,
}

impl PathPoint {
    pub fn new(t1: f64, t2: f64) -> Self {
        Self { t1, t2 }
    }
}

/// An ordered sequence of correspondence points between two timelines.
#[derive(Debug, Clone, PartialEq)]
pub struct WarpingPath {
    points: Vec<PathPoint>,
}

impl WarpingPath {
    /// Builds a path from points. A usable path needs at least 2 points.
    pub fn new(points: Vec<PathPoint>) -> Result<Self> {
        if points.len() < 2 {
            return Err(AlignSyncError::degenerate(format!(
                "need at least 2 points, got {}",
                points.len()
            )));
        }
        Ok(Self { points })
    }

    /// Convenience constructor from `(t1, t2)` pairs.
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Result<Self> {
        Self::new(
            pairs
                .iter()
                .map(|&(t1, t2)| PathPoint::new(t1, t2))
                .collect(),
        )
    }

    /// Loads a path from a `.npy` file holding a 2×N float matrix, row 0
    /// carrying the first timeline and row 1 the second.
    ///
    /// If `frame_period` is given the stored values are frame indices and
    /// every coordinate is multiplied by it to convert to seconds; otherwise
    /// the values are assumed to be seconds already.
    pub fn from_npy_file<P: AsRef<Path>>(path: P, frame_period: Option<f64>) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => AlignSyncError::MissingInput(path.to_path_buf()),
            _ => AlignSyncError::from(e),
        })?;

        let matrix = Array2::<f64>::read_npy(file)?;
        if matrix.nrows() != 2 {
            return Err(AlignSyncError::malformed(format!(
                "warping path must be a 2xN matrix, got {}x{}",
                matrix.nrows(),
                matrix.ncols()
            )));
        }

        let scale = frame_period.unwrap_or(1.0);
        let points = (0..matrix.ncols())
            .map(|i| PathPoint::new(matrix[[0, i]] * scale, matrix[[1, i]] * scale))
            .collect();

        Self::new(points)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[PathPoint] {
        &self.points
    }

    pub fn first(&self) -> PathPoint {
        self.points[0]
    }

    pub fn last(&self) -> PathPoint {
        self.points[self.points.len() - 1]
    }

    /// Returns the path with the two coordinate roles exchanged.
    ///
    /// Time-scale modification consumes a (source-time, output-time) mapping,
    /// the opposite orientation from the evaluation direction.
    pub fn swapped(&self) -> Self {
        Self {
            points: self
                .points
                .iter()
                .map(|p| PathPoint::new(p.t2, p.t1))
                .collect(),
        }
    }

    /// Predicts a `t2` value at `t1` by piecewise-linear interpolation.
    ///
    /// Anchors outside the path's `t1` domain clamp to the nearest boundary's
    /// `t2` (flat extrapolation, a deliberate policy). Requires strictly
    /// increasing `t1`, which [`preprocess`](crate::path::preprocess)
    /// guarantees.
    pub fn predict_t2(&self, t1: f64) -> f64 {
        let pts = &self.points;
        if t1 <= pts[0].t1 {
            return pts[0].t2;
        }
        let last = pts[pts.len() - 1];
        if t1 >= last.t1 {
            return last.t2;
        }

        // first index with pts[idx].t1 >= t1; 1 <= idx <= len-1 here
        let idx = pts.partition_point(|p| p.t1 < t1);
        let (a, b) = (pts[idx - 1], pts[idx]);
        a.t2 + (b.t2 - a.t2) * (t1 - a.t1) / (b.t1 - a.t1)
    }
}
