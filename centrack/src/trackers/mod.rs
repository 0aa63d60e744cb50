//! Multi-object tracking implementations
//!
//! - CentroidTracker: nearest-centroid association with greedy row-priority matching

use crate::centroid::{Centroid, Rect};
use crate::object::{ObjectId, TrackedObject};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

mod centroid;

pub use centroid::{CentroidTracker, TrackerConfig};

/// State of a tracker after a frame: live identities and the lifetime count
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerSnapshot {
    /// Live objects keyed by identity, ascending
    pub objects: BTreeMap<ObjectId, Centroid>,
    /// Number of objects ever registered, including deregistered ones
    pub total_registered: u64,
}

impl TrackerSnapshot {
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn get(&self, id: ObjectId) -> Option<Centroid> {
        self.objects.get(&id).copied()
    }

    pub fn ids(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.objects.keys().copied()
    }
}

/// Common interface for multi-object trackers
///
/// Callers feed one frame of detection rectangles per `update`, in frame order.
/// Implementations are not internally synchronized; share one behind a single
/// owner (see the crowdcount operator) rather than calling `update` concurrently.
pub trait ObjectTracker: Send {
    /// Apply one frame of detections and return the resulting state
    ///
    /// # Arguments
    /// * `rects` - detection rectangles for this frame, possibly empty
    fn update(&mut self, rects: &[Rect<f32>]) -> TrackerSnapshot;

    /// Current state without advancing a frame
    fn snapshot(&self) -> TrackerSnapshot;

    /// Drop all live objects; identities are still never reused
    fn clear(&mut self);

    /// Deregister a specific object by ID
    fn remove_object(&mut self, id: ObjectId) -> Option<TrackedObject>;

    /// Get number of live objects
    fn num_objects(&self) -> usize;

    /// Get number of objects ever registered
    fn total_registered(&self) -> u64;

    /// Get number of frames applied so far
    fn step_count(&self) -> u64;
}

impl ObjectTracker for CentroidTracker {
    fn update(&mut self, rects: &[Rect<f32>]) -> TrackerSnapshot {
        self.update(rects)
    }

    fn snapshot(&self) -> TrackerSnapshot {
        self.snapshot()
    }

    fn clear(&mut self) {
        self.clear()
    }

    fn remove_object(&mut self, id: ObjectId) -> Option<TrackedObject> {
        self.remove_object(id)
    }

    fn num_objects(&self) -> usize {
        self.num_objects()
    }

    fn total_registered(&self) -> u64 {
        self.total_registered()
    }

    fn step_count(&self) -> u64 {
        self.step_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trait_object_usage() {
        let mut tracker: Box<dyn ObjectTracker> =
            Box::new(CentroidTracker::new(TrackerConfig::default()));

        let snap = tracker.update(&[Rect::new(0.0, 0.0, 10.0, 10.0)]);
        assert_eq!(snap.len(), 1);
        assert_eq!(tracker.num_objects(), 1);
        assert_eq!(tracker.total_registered(), 1);
        assert_eq!(tracker.step_count(), 1);

        let removed = tracker.remove_object(0).map(|o| o.id);
        assert_eq!(removed, Some(0));
        assert_eq!(tracker.num_objects(), 0);
        assert_eq!(tracker.total_registered(), 1);
        assert!(tracker.snapshot().is_empty());
    }

    #[test]
    fn test_snapshot_accessors() {
        let mut snap = TrackerSnapshot::default();
        assert!(snap.is_empty());
        snap.objects.insert(4, Centroid::new(1, 2));
        snap.objects.insert(2, Centroid::new(3, 4));
        assert_eq!(snap.ids().collect::<Vec<_>>(), vec![2, 4]);
        assert_eq!(snap.get(4), Some(Centroid::new(1, 2)));
        assert_eq!(snap.get(9), None);
    }
}
