//! Pure Rust centroid-based multi-object tracking library
//!
//! Given one list of detection rectangles per frame, the tracker keeps a
//! persistent identity for each object, tolerates missed detections and
//! counts how many distinct objects it has ever seen.
//!
//! # Unified Interface
//!
//! Trackers implement the `ObjectTracker` trait:
//!
//! ```rust
//! use centrack::{CentroidTracker, ObjectTracker, Rect, TrackerConfig};
//!
//! let mut tracker: Box<dyn ObjectTracker> = Box::new(CentroidTracker::new(TrackerConfig {
//!     max_disappeared: 40,
//!     max_distance: 50.0,
//! }));
//!
//! let snapshot = tracker.update(&[Rect::new(10.0, 10.0, 50.0, 50.0)]);
//! assert_eq!(snapshot.ids().collect::<Vec<_>>(), vec![0]);
//! assert_eq!(snapshot.total_registered, 1);
//! ```

pub mod assignment; // greedy row-priority matching
pub mod centroid;
pub mod object;
pub mod trackers;

pub use assignment::{AssignmentResult, GreedyAssignment};
pub use centroid::{distance_matrix, Centroid, Rect};
pub use object::{ObjectId, TrackedObject};
pub use trackers::{CentroidTracker, ObjectTracker, TrackerConfig, TrackerSnapshot};
