//! Per-frame crowd counting: detector output in, identities and totals out

use crate::config::CounterConfig;
use crate::detector::Detector;
use centrack::{Centroid, CentroidTracker, ObjectId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What the presentation layer gets after each frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameReport {
    /// Zero-based index of the frame within this counter's run
    pub frame_index: u64,
    /// Rectangles the detector returned for this frame
    pub detections: usize,
    /// Objects currently tracked
    pub live_objects: usize,
    /// Distinct objects seen so far
    pub total_unique: u64,
    /// True if the detector failed and the frame counted as empty
    pub detector_failed: bool,
    /// Live identities and their centroids
    pub objects: BTreeMap<ObjectId, Centroid>,
}

/// Totals after a run over a sequence of frames
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountSummary {
    pub frames_processed: u64,
    pub detector_failures: u64,
    pub total_unique: u64,
    /// Largest number of objects tracked at once
    pub peak_live_objects: usize,
}

/// Drives a detector and a centroid tracker once per frame
pub struct CrowdCounter<D: Detector> {
    detector: D,
    tracker: CentroidTracker,
    config: CounterConfig,
    frames_processed: u64,
    detector_failures: u64,
    peak_live_objects: usize,
}

impl<D: Detector> CrowdCounter<D> {
    pub fn new(detector: D, config: CounterConfig) -> Self {
        log::info!(
            "Creating CrowdCounter with detector '{}': max_disappeared={}, max_distance={:.1}",
            detector.name(),
            config.tracker.max_disappeared,
            config.tracker.max_distance
        );
        Self {
            detector,
            tracker: CentroidTracker::new(config.tracker),
            config,
            frames_processed: 0,
            detector_failures: 0,
            peak_live_objects: 0,
        }
    }

    pub fn tracker(&self) -> &CentroidTracker {
        &self.tracker
    }

    pub fn detector(&self) -> &D {
        &self.detector
    }

    pub fn total_unique(&self) -> u64 {
        self.tracker.total_registered()
    }

    /// Detect and track one frame
    ///
    /// A detector error does not skip the tracker: the frame is applied as
    /// one without detections, so missing objects still age out on time.
    pub fn process_frame(&mut self, frame: &D::Frame) -> FrameReport {
        let frame_index = self.frames_processed;

        let (rects, detector_failed) = match self.detector.detect(frame) {
            Ok(rects) => (rects, false),
            Err(e) => {
                log::warn!(
                    "Detector '{}' failed on frame {}, counting it as empty: {}",
                    self.detector.name(),
                    frame_index,
                    e
                );
                self.detector_failures += 1;
                (Vec::new(), true)
            }
        };

        let snapshot = self.tracker.update(&rects);
        self.frames_processed += 1;
        self.peak_live_objects = self.peak_live_objects.max(snapshot.len());

        let interval = self.config.report_interval;
        if interval > 0 && self.frames_processed % interval == 0 {
            log::info!(
                "Processed {} frames: {} live objects, {} unique, {} detector failures",
                self.frames_processed,
                snapshot.len(),
                snapshot.total_registered,
                self.detector_failures
            );
        }

        FrameReport {
            frame_index,
            detections: rects.len(),
            live_objects: snapshot.len(),
            total_unique: snapshot.total_registered,
            detector_failed,
            objects: snapshot.objects,
        }
    }

    /// Process every frame in order and return the totals
    pub fn run<I>(&mut self, frames: I) -> CountSummary
    where
        I: IntoIterator<Item = D::Frame>,
    {
        for frame in frames {
            self.process_frame(&frame);
        }
        let summary = self.summary();
        log::info!(
            "Counting finished: {} frames, {} unique objects",
            summary.frames_processed,
            summary.total_unique
        );
        summary
    }

    pub fn summary(&self) -> CountSummary {
        CountSummary {
            frames_processed: self.frames_processed,
            detector_failures: self.detector_failures,
            total_unique: self.tracker.total_registered(),
            peak_live_objects: self.peak_live_objects,
        }
    }
}
