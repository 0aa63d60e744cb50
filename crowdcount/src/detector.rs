/// Detector boundary for the crowd counter
///
/// Anything that turns a frame into a list of rectangles can drive the
/// tracker (HOG, Haar cascade, a neural detector, recorded output). The
/// rectangles must be in the same coordinate space from frame to frame.
use crate::error::{CounterError, Result};
use centrack::Rect;
use std::path::Path;

/// Common interface for object detectors
pub trait Detector: Send {
    /// Whatever the detector consumes per frame
    type Frame;

    /// Detect objects in a single frame
    fn detect(&mut self, frame: &Self::Frame) -> Result<Vec<Rect<f32>>>;

    /// Get the detector name (for logging/debugging)
    fn name(&self) -> &str;
}

/// Replays per-frame detections recorded earlier
///
/// Frames are addressed by index. A recorded `None` stands for a frame on
/// which the recorded detector failed, and is replayed as an error.
#[derive(Debug, Clone, Default)]
pub struct ReplayDetector {
    frames: Vec<Option<Vec<Rect<f32>>>>,
}

impl ReplayDetector {
    pub fn new(frames: Vec<Option<Vec<Rect<f32>>>>) -> Self {
        Self { frames }
    }

    /// Parse a recording of the form `[[[x1, y1, x2, y2], ...], null, ...]`
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: Vec<Option<Vec<[f32; 4]>>> = serde_json::from_str(json)?;
        let frames = raw
            .into_iter()
            .map(|frame| frame.map(|rects| rects.into_iter().map(Rect::from).collect()))
            .collect();
        Ok(Self { frames })
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let detector = Self::from_json_str(&json)?;
        log::info!(
            "Loaded {} recorded frames from {}",
            detector.len(),
            path.display()
        );
        Ok(detector)
    }

    /// Number of recorded frames
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frame indices covering the whole recording
    pub fn frame_indices(&self) -> std::ops::Range<usize> {
        0..self.frames.len()
    }
}

impl Detector for ReplayDetector {
    type Frame = usize;

    fn detect(&mut self, frame: &usize) -> Result<Vec<Rect<f32>>> {
        match self.frames.get(*frame) {
            Some(Some(rects)) => Ok(rects.clone()),
            Some(None) => Err(CounterError::detection(format!(
                "recorded detector failure at frame {}",
                frame
            ))),
            None => Err(CounterError::detection(format!(
                "frame {} is beyond the recording ({} frames)",
                frame,
                self.frames.len()
            ))),
        }
    }

    fn name(&self) -> &str {
        "replay"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replay_from_json() {
        let json = r#"[
            [[0, 0, 10, 10], [20, 20, 30, 30]],
            [],
            null
        ]"#;
        let mut detector = ReplayDetector::from_json_str(json).unwrap();
        assert_eq!(detector.len(), 3);
        assert_eq!(detector.name(), "replay");

        let rects = detector.detect(&0).unwrap();
        assert_eq!(rects, vec![
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(20.0, 20.0, 30.0, 30.0)
        ]);
        assert!(detector.detect(&1).unwrap().is_empty());
        assert!(matches!(detector.detect(&2), Err(CounterError::Detection(_))));
        assert!(matches!(detector.detect(&3), Err(CounterError::Detection(_))));
    }

    #[test]
    fn test_replay_rejects_bad_rect() {
        let err = ReplayDetector::from_json_str("[[[0, 0, 10]]]").unwrap_err();
        assert!(matches!(err, CounterError::Serialization(_)));
    }

    #[test]
    fn test_frame_indices() {
        let detector = ReplayDetector::new(vec![None, Some(vec![]), None]);
        assert_eq!(detector.frame_indices().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert!(!detector.is_empty());
    }
}
