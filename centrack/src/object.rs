//! Per-object tracking state

use crate::centroid::Centroid;
use serde::{Deserialize, Serialize};

/// Identity handed out to tracked objects, never reused
pub type ObjectId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedObject {
    /// object id
    pub id: ObjectId,
    /// last matched centroid
    pub centroid: Centroid,
    /// number of consecutive frames without a matching detection
    pub disappeared: u32,
    /// number of frames the object has been through since registration
    pub age: u32,
    /// number of frames with a matching detection, registration included
    pub hits: u32,
}

impl TrackedObject {
    /// Register a new object at the given centroid
    pub fn new(id: ObjectId, centroid: Centroid) -> Self {
        TrackedObject {
            id,
            centroid,
            disappeared: 0,
            age: 0,
            hits: 1,
        }
    }

    /// Move to a matched detection and reset the disappearance counter
    pub fn mark_matched(&mut self, centroid: Centroid) {
        self.centroid = centroid;
        self.disappeared = 0;
        self.age = self.age.saturating_add(1);
        self.hits = self.hits.saturating_add(1);
    }

    /// Count one more frame without a match
    pub fn mark_missed(&mut self) {
        self.disappeared = self.disappeared.saturating_add(1);
        self.age = self.age.saturating_add(1);
    }

    /// True once the object has been missing for more than `max_disappeared` frames
    pub fn is_stale(&self, max_disappeared: u32) -> bool {
        self.disappeared > max_disappeared
    }
}
