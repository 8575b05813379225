//! Annotation and scenario metadata parsing
//!
//! Ground-truth beat annotations, sanctioned evaluation measure ranges,
//! scenario descriptions, and the shared audio data summary.

pub mod beats;
pub mod measures;
pub mod scenario;
pub mod summary;

pub use beats::{parse_annotation_file, AnnotationTimeline};
pub use measures::parse_eval_measures;
pub use scenario::{parse_info_file, parse_summary_file, verify_scenario_dir, ScenarioInfo};
pub use summary::{orchestra_start_end, parse_audio_summary};
