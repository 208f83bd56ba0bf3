//! 🍇欢迎光临🍓
//!
//! 涵盖了本 crate 一系列常用的功能.

pub use crate::analyze::{analyze, analyze_batch, analyze_side, AnalyzeError};

pub use crate::index::{IndexKey, IndexKind, KneeIndices, Outcome, SideIndices};
pub use crate::marker::{Landmark, MarkerSet, Side};

#[cfg(feature = "serde")]
pub use crate::marker::record::{RecordError, StudyRecord};

pub use crate::consts::{INDICES_PER_SIDE, INDICES_TOTAL, SCALE_FACTOR};

pub use crate::dataset::{self, home_dataset_dir_with, latest_artifact};

#[cfg(feature = "serde")]
pub use crate::dataset::study_loader;

pub use crate::report::{Provenance, Report};
