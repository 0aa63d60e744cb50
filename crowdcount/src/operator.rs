/// Tracking Operator - tracker on its own thread behind a command queue
///
/// Provides an operator instance with:
/// - Command queue for updates from any number of producer threads
/// - Single worker thread applying frames strictly in arrival order
/// - Query interface for the latest published snapshot
///
/// Each video feed gets its own operator; operators share nothing.
use crate::error::{CounterError, Result};
use centrack::{CentroidTracker, Rect, TrackerConfig, TrackerSnapshot};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;

/// Commands understood by the operator's worker thread
#[derive(Debug)]
pub enum TrackingCommand {
    /// Apply one frame of detections
    Update {
        rects: Vec<Rect<f32>>,
        /// Where to send the resulting snapshot, if the caller waits for it
        response_tx: Option<Sender<TrackerSnapshot>>,
    },
    /// Stop the worker thread
    Shutdown,
}

pub struct TrackingOperator {
    command_tx: Sender<TrackingCommand>,
    latest: Arc<Mutex<TrackerSnapshot>>,
    worker_handle: Option<thread::JoinHandle<()>>,
}

impl TrackingOperator {
    /// Start the worker thread with a fresh tracker
    pub fn spawn(config: TrackerConfig) -> Result<Self> {
        let tracker =
            CentroidTracker::try_new(config).map_err(|e| CounterError::config(e.to_string()))?;
        let latest = Arc::new(Mutex::new(TrackerSnapshot::default()));
        let (command_tx, command_rx) = channel::<TrackingCommand>();

        let latest_clone = Arc::clone(&latest);
        let worker_handle = thread::Builder::new()
            .name("centroid-tracker".to_string())
            .spawn(move || {
                Self::command_processor(tracker, latest_clone, command_rx);
            })?;

        Ok(Self {
            command_tx,
            latest,
            worker_handle: Some(worker_handle),
        })
    }

    /// Send update command (non-blocking)
    pub fn send_update(&self, rects: Vec<Rect<f32>>) -> Result<()> {
        self.command_tx
            .send(TrackingCommand::Update {
                rects,
                response_tx: None,
            })
            .map_err(|_| CounterError::OperatorDisconnected)
    }

    /// Report a frame without detections, e.g. after a detector failure
    pub fn send_missed_frame(&self) -> Result<()> {
        self.send_update(Vec::new())
    }

    /// Send update command and wait for the resulting snapshot
    ///
    /// Frames queued earlier with `send_update` are applied first.
    pub fn update(&self, rects: Vec<Rect<f32>>) -> Result<TrackerSnapshot> {
        let (response_tx, response_rx) = channel();
        self.command_tx
            .send(TrackingCommand::Update {
                rects,
                response_tx: Some(response_tx),
            })
            .map_err(|_| CounterError::OperatorDisconnected)?;
        response_rx
            .recv()
            .map_err(|_| CounterError::OperatorDisconnected)
    }

    /// Snapshot published after the most recently applied frame (synchronous query, fast)
    pub fn latest(&self) -> TrackerSnapshot {
        self.latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Shutdown the worker thread; queued frames are still applied first
    pub fn shutdown(&self) {
        let _ = self.command_tx.send(TrackingCommand::Shutdown);
    }

    /// Command processor thread - owns the tracker and applies commands in order
    fn command_processor(
        mut tracker: CentroidTracker,
        latest: Arc<Mutex<TrackerSnapshot>>,
        command_rx: Receiver<TrackingCommand>,
    ) {
        log::info!("Centroid tracker command processor started");
        let mut commands_processed = 0_u64;

        loop {
            match command_rx.recv() {
                Ok(TrackingCommand::Update { rects, response_tx }) => {
                    let snapshot = tracker.update(&rects);
                    *latest.lock().unwrap_or_else(PoisonError::into_inner) = snapshot.clone();

                    if let Some(tx) = response_tx {
                        // the caller may have given up waiting
                        let _ = tx.send(snapshot);
                    }

                    commands_processed += 1;
                    if commands_processed % 100 == 0 {
                        log::debug!(
                            "Centroid tracker processed {} updates, {} live objects, {} unique",
                            commands_processed,
                            tracker.num_objects(),
                            tracker.total_registered()
                        );
                    }
                }
                Ok(TrackingCommand::Shutdown) => {
                    log::info!(
                        "Centroid tracker shutting down after {} commands",
                        commands_processed
                    );
                    break;
                }
                Err(_) => {
                    log::warn!("Centroid tracker command channel disconnected");
                    break;
                }
            }
        }

        log::info!("Centroid tracker command processor stopped");
    }
}

impl Drop for TrackingOperator {
    fn drop(&mut self) {
        self.shutdown();

        // Wait for command processor thread
        if let Some(handle) = self.worker_handle.take() {
            let _ = handle.join();
        }
    }
}
