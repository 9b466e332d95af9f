//! Stitching algorithms: edge merging, mesh assembly, orphan compaction
//! and the model-level driver.

pub mod assembly;
pub mod compact;
pub mod edge_merge;
pub mod stitch;

pub use compact::{CompactionStats, compact};
pub use stitch::{StitchReport, StitchedModel, gather, stitch_batch, stitch_gathered, stitch_model};
#[cfg(feature = "rayon")]
pub use stitch::{stitch_gathered_parallel, stitch_model_parallel};
