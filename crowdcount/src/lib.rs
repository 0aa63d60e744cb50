//! Crowd Counting Library
//!
//! Counts distinct people (or any other detected objects) across the frames
//! of a feed. An external detector supplies rectangles per frame; the
//! centroid tracker from `centrack` keeps identities and the running total.
//! Video decoding and the detector models themselves live outside this crate.

pub mod config;
pub mod counter;
pub mod detector;
pub mod error;
pub mod operator;

pub use centrack::{Centroid, CentroidTracker, ObjectId, Rect, TrackerConfig, TrackerSnapshot};
pub use config::CounterConfig;
pub use counter::{CountSummary, CrowdCounter, FrameReport};
pub use detector::{Detector, ReplayDetector};
pub use error::{CounterError, Result};
pub use operator::{TrackingCommand, TrackingOperator};

/// Get library version information
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
