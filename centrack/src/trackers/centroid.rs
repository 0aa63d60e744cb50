//! Centroid tracker
//!
//! Associates each frame's detections with existing objects by the distance
//! between centroids. Objects that go unmatched for more than
//! `max_disappeared` consecutive frames are dropped; unmatched detections
//! become new objects.

use crate::assignment::GreedyAssignment;
use crate::centroid::{distance_matrix, Centroid, Rect};
use crate::object::{ObjectId, TrackedObject};
use crate::trackers::TrackerSnapshot;
use num::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configuration for the centroid tracker
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Maximum consecutive frames an object may go unmatched before it is dropped
    pub max_disappeared: u32,
    /// Maximum centroid distance for a detection to continue an existing object
    pub max_distance: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            max_disappeared: 40,
            max_distance: 50.0,
        }
    }
}

/// Centroid-based multi-object tracker
#[derive(Debug, Clone)]
pub struct CentroidTracker {
    config: TrackerConfig,
    /// id of next object registered
    next_object_id: ObjectId,
    /// live objects, iterated in ascending id (= registration) order
    objects: BTreeMap<ObjectId, TrackedObject>,
    /// objects ever registered
    total_registered: u64,
    /// number of frames the tracker has run for
    n_steps: u64,
}

impl Default for CentroidTracker {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}

impl CentroidTracker {
    pub fn new(config: TrackerConfig) -> Self {
        log::debug!(
            "Creating CentroidTracker: max_disappeared={}, max_distance={:.1}",
            config.max_disappeared,
            config.max_distance
        );
        CentroidTracker {
            config,
            next_object_id: 0,
            objects: BTreeMap::new(),
            total_registered: 0,
            n_steps: 0,
        }
    }

    /// Like `new`, but rejects a `max_distance` under which nothing could ever match
    pub fn try_new(config: TrackerConfig) -> anyhow::Result<Self> {
        anyhow::ensure!(
            config.max_distance >= 0.0,
            "max_distance must be a non-negative number, got {}",
            config.max_distance
        );
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Identity the next registration will receive
    pub fn next_object_id(&self) -> ObjectId {
        self.next_object_id
    }

    pub fn object(&self, id: ObjectId) -> Option<&TrackedObject> {
        self.objects.get(&id)
    }

    /// Live objects in ascending id order
    pub fn objects(&self) -> impl Iterator<Item = &TrackedObject> + '_ {
        self.objects.values()
    }

    pub fn num_objects(&self) -> usize {
        self.objects.len()
    }

    pub fn total_registered(&self) -> u64 {
        self.total_registered
    }

    pub fn step_count(&self) -> u64 {
        self.n_steps
    }

    pub fn snapshot(&self) -> TrackerSnapshot {
        TrackerSnapshot {
            objects: self
                .objects
                .iter()
                .map(|(&id, obj)| (id, obj.centroid))
                .collect(),
            total_registered: self.total_registered,
        }
    }

    /// Drop all live objects. The id counter and lifetime count are kept,
    /// so identities handed out before the clear are never seen again.
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Deregister a specific object
    pub fn remove_object(&mut self, id: ObjectId) -> Option<TrackedObject> {
        self.deregister(id)
    }

    fn register(&mut self, centroid: Centroid) -> ObjectId {
        let id = self.next_object_id;
        self.objects.insert(id, TrackedObject::new(id, centroid));
        self.next_object_id += 1;
        self.total_registered += 1;
        log::trace!("Registered object {} at {}", id, centroid);
        id
    }

    fn deregister(&mut self, id: ObjectId) -> Option<TrackedObject> {
        let removed = self.objects.remove(&id);
        if removed.is_some() {
            log::trace!("Deregistered object {}", id);
        }
        removed
    }

    /// Count a missed frame for each object and drop those that went stale
    fn mark_missed(&mut self, ids: &[ObjectId]) {
        let max_disappeared = self.config.max_disappeared;
        let mut stale = Vec::new();
        for id in ids {
            if let Some(obj) = self.objects.get_mut(id) {
                obj.mark_missed();
                if obj.is_stale(max_disappeared) {
                    stale.push(*id);
                }
            }
        }
        for id in stale {
            self.deregister(id);
        }
    }

    /// Match detections to existing objects and register the leftovers
    fn associate(&mut self, input_centroids: &[Centroid]) {
        let (object_ids, object_centroids): (Vec<ObjectId>, Vec<Centroid>) = self
            .objects
            .iter()
            .map(|(&id, obj)| (id, obj.centroid))
            .unzip();

        let distances = distance_matrix(&object_centroids, input_centroids);
        let result = GreedyAssignment::solve(distances.view(), self.config.max_distance);

        for &(row, col) in &result.assignments {
            if let Some(obj) = self.objects.get_mut(&object_ids[row]) {
                obj.mark_matched(input_centroids[col]);
            }
        }

        for &col in &result.unassigned_cols {
            self.register(input_centroids[col]);
        }

        let missed: Vec<ObjectId> = result
            .unassigned_rows
            .iter()
            .map(|&row| object_ids[row])
            .collect();
        self.mark_missed(&missed);
    }

    /// Main update function - apply one frame of detection rectangles
    pub fn update<T: ToPrimitive + Copy>(&mut self, rects: &[Rect<T>]) -> TrackerSnapshot {
        let before = self.objects.len();

        if rects.is_empty() {
            // Step 1: nothing detected, every live object missed this frame
            let ids: Vec<ObjectId> = self.objects.keys().copied().collect();
            self.mark_missed(&ids);
        } else {
            let input_centroids: Vec<Centroid> = rects.iter().map(Rect::centroid).collect();

            if self.objects.is_empty() {
                // Step 2: nothing to match against, register everything in input order
                for &centroid in &input_centroids {
                    self.register(centroid);
                }
            } else {
                // Step 3: greedy association against live objects
                self.associate(&input_centroids);
            }
        }

        self.n_steps += 1;
        log::debug!(
            "CentroidTracker step {}: {} detections, {} -> {} objects, {} registered in total",
            self.n_steps,
            rects.len(),
            before,
            self.objects.len(),
            self.total_registered
        );

        self.snapshot()
    }
}
