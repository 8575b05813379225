//! Degenerate-segment filtering and downsampling
//!
//! Interpolation and time-scale modification both require a strictly
//! increasing first coordinate. Raw alignment paths routinely contain purely
//! horizontal or purely vertical steps (one timeline stalls); these are
//! removed here before the path reaches either consumer.

use log::debug;

use crate::error::{AlignSyncError, Result};
use crate::path::warping::WarpingPath;

/// Removes points that start a degenerate (purely horizontal or vertical)
/// step.
///
/// Point `i` is kept iff point `i+1` differs from it in BOTH coordinates; the
/// final point is always retained. After this pass, trailing points that do
/// not strictly precede the final point in both coordinates are dropped so
/// the output is strictly increasing end to end.
pub fn filter_degenerate_steps(path: &WarpingPath) -> Result<WarpingPath> {
    let pts = path.points();

    let mut kept = Vec::with_capacity(pts.len());
    for pair in pts.windows(2) {
        if pair[0].t1 != pair[1].t1 && pair[0].t2 != pair[1].t2 {
            kept.push(pair[0]);
        }
    }
    kept.push(pts[pts.len() - 1]);

    // A degenerate trailing step can survive because the final point is kept
    // unconditionally; enforce strict monotonicity as a hard invariant.
    while kept.len() >= 2 {
        let last = kept[kept.len() - 1];
        let prev = kept[kept.len() - 2];
        if prev.t1 >= last.t1 || prev.t2 >= last.t2 {
            kept.remove(kept.len() - 2);
        } else {
            break;
        }
    }

    if kept.len() < 2 {
        return Err(AlignSyncError::degenerate(
            "path collapsed below 2 points after filtering",
        ));
    }

    debug!("filtered path: {} -> {} points", pts.len(), kept.len());
    WarpingPath::new(kept)
}

/// Keeps every `factor`-th interior point, preserving both endpoints exactly.
///
/// Smooths the effective time-scaling rate at the cost of temporal precision.
/// `factor` of 1 is a no-op.
pub fn downsample_interior(path: &WarpingPath, factor: usize) -> Result<WarpingPath> {
    if factor == 0 {
        return Err(AlignSyncError::config("downsample factor must be >= 1"));
    }

    let pts = path.points();
    let last = pts[pts.len() - 1];
    let interior = &pts[1..pts.len() - 1];

    let mut kept = Vec::with_capacity(interior.len() / factor + 2);
    kept.push(pts[0]);
    kept.extend(interior.iter().step_by(factor));
    kept.push(last);

    WarpingPath::new(kept)
}

/// The full preprocessing pipeline: filter degenerate steps, then downsample.
pub fn preprocess(path: &WarpingPath, downsample: usize) -> Result<WarpingPath> {
    let filtered = filter_degenerate_steps(path)?;
    downsample_interior(&filtered, downsample)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::warping::PathPoint;

    fn path(pairs: &[(f64, f64)]) -> WarpingPath {
        WarpingPath::from_pairs(pairs).unwrap()
    }

    #[test]
    fn test_filter_drops_horizontal_and_vertical_steps() {
        // (1,1)->(1,2) is vertical, (2,3)->(3,3) is horizontal
        let raw = path(&[
            (0.0, 0.0),
            (1.0, 1.0),
            (1.0, 2.0),
            (2.0, 3.0),
            (3.0, 3.0),
            (4.0, 4.0),
        ]);
        let filtered = filter_degenerate_steps(&raw).unwrap();
        let expected = [(0.0, 0.0), (1.0, 2.0), (3.0, 3.0), (4.0, 4.0)];
        assert_eq!(
            filtered.points(),
            expected
                .iter()
                .map(|&(a, b)| PathPoint::new(a, b))
                .collect::<Vec<_>>()
                .as_slice()
        );
    }

    #[test]
    fn test_filter_preserves_last_point() {
        let raw = path(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]);
        let filtered = filter_degenerate_steps(&raw).unwrap();
        assert_eq!(filtered.last(), raw.last());
    }

    #[test]
    fn test_filter_never_emits_duplicate_neighbors() {
        let raw = path(&[
            (0.0, 0.0),
            (0.0, 1.0),
            (1.0, 1.0),
            (1.0, 2.0),
            (2.0, 3.0),
        ]);
        let filtered = filter_degenerate_steps(&raw).unwrap();
        for pair in filtered.points().windows(2) {
            assert!(pair[0].t1 != pair[1].t1 || pair[0].t2 != pair[1].t2);
        }
    }

    #[test]
    fn test_filter_output_strictly_increasing() {
        // trailing step (2,2)->(2,3) is vertical; the unconditional final
        // point would otherwise leave a stalled t1 at the end
        let raw = path(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (2.0, 3.0)]);
        let filtered = filter_degenerate_steps(&raw).unwrap();
        for pair in filtered.points().windows(2) {
            assert!(pair[0].t1 < pair[1].t1);
            assert!(pair[0].t2 < pair[1].t2);
        }
        assert_eq!(filtered.last(), PathPoint::new(2.0, 3.0));
    }

    #[test]
    fn test_filter_merges_degenerate_trailing_pair() {
        // kept predecessors do not strictly precede the final point in t2;
        // they are merged away rather than left to stall interpolation
        let raw = path(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (3.0, 1.0)]);
        let filtered = filter_degenerate_steps(&raw).unwrap();
        assert_eq!(
            filtered.points(),
            &[PathPoint::new(0.0, 0.0), PathPoint::new(3.0, 1.0)]
        );
    }

    #[test]
    fn test_filter_fully_degenerate_path_errors() {
        let raw = path(&[(1.0, 0.0), (1.0, 1.0)]);
        assert!(filter_degenerate_steps(&raw).is_err());
    }

    #[test]
    fn test_downsample_preserves_endpoints() {
        let raw = path(&[
            (0.0, 0.0),
            (1.0, 1.0),
            (2.0, 2.0),
            (3.0, 3.0),
            (4.0, 4.0),
            (5.0, 5.0),
        ]);
        for factor in 1..=6 {
            let down = downsample_interior(&raw, factor).unwrap();
            assert_eq!(down.first(), raw.first());
            assert_eq!(down.last(), raw.last());
        }
    }

    #[test]
    fn test_downsample_factor_one_is_noop() {
        let raw = path(&[(0.0, 0.0), (1.0, 1.5), (2.0, 2.5), (3.0, 4.0)]);
        let down = downsample_interior(&raw, 1).unwrap();
        assert_eq!(down.points(), raw.points());
    }

    #[test]
    fn test_downsample_strides_interior() {
        let raw = path(&[
            (0.0, 0.0),
            (1.0, 1.0),
            (2.0, 2.0),
            (3.0, 3.0),
            (4.0, 4.0),
            (5.0, 5.0),
        ]);
        let down = downsample_interior(&raw, 2).unwrap();
        // endpoints + interior points at indices 1 and 3
        let expected = [(0.0, 0.0), (1.0, 1.0), (3.0, 3.0), (5.0, 5.0)];
        assert_eq!(
            down.points(),
            expected
                .iter()
                .map(|&(a, b)| PathPoint::new(a, b))
                .collect::<Vec<_>>()
                .as_slice()
        );
    }

    #[test]
    fn test_downsample_factor_zero_rejected() {
        let raw = path(&[(0.0, 0.0), (1.0, 1.0)]);
        assert!(downsample_interior(&raw, 0).is_err());
    }
}
