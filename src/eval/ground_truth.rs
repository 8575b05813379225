//! Ground truth matching

use std::collections::BTreeSet;

use crate::annot::beats::AnnotationTimeline;

/// Ordered ground-truth correspondences. `measures` and `points` are
/// index-aligned: `points[i]` holds the two timelines' timestamps at measure
/// `measures[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct GroundTruth {
    pub measures: Vec<i64>,
    pub points: Vec<(f64, f64)>,
}

impl GroundTruth {
    pub fn len(&self) -> usize {
        self.measures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.measures.is_empty()
    }
}

/// Intersects two annotation timelines with the sanctioned evaluation measure
/// set, producing ground-truth pairs sorted by measure number ascending.
pub fn match_ground_truth(
    timeline1: &AnnotationTimeline,
    timeline2: &AnnotationTimeline,
    eval_measures: &BTreeSet<i64>,
) -> GroundTruth {
    let mut measures = Vec::new();
    let mut points = Vec::new();

    // BTreeMap iteration is already ascending by measure number
    for (&measure, &t1) in timeline1 {
        if let Some(&t2) = timeline2.get(&measure) {
            if eval_measures.contains(&measure) {
                measures.push(measure);
                points.push((t1, t2));
            }
        }
    }

    GroundTruth { measures, points }
}
