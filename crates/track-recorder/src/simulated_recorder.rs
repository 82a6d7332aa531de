//! In-memory stand-in for the GPS track recording engine.
//!
//! Samples are counted, not stored. A sampler task calls
//! [`SimulatedRecorder::record_sample`] on a fixed interval.

use track_recorder_core::{CoreResult, RecorderBackend, RecorderError};

use std::{cell::Cell, panic::Location, rc::Rc, time::Duration};

use error_location::ErrorLocation;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, instrument, trace};

#[derive(Debug, Default)]
struct RecorderInner {
    active: Cell<bool>,
    samples: Cell<usize>,
    saved_tracks: Cell<usize>,
}

/// Simulated recorder shared between the manager and the sampler task.
#[derive(Debug, Clone, Default)]
pub struct SimulatedRecorder {
    inner: Rc<RecorderInner>,
}

impl SimulatedRecorder {
    /// Create an idle recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one sample if recording. Returns whether a sample was taken.
    pub fn record_sample(&self) -> bool {
        if !self.inner.active.get() {
            return false;
        }
        let samples = self.inner.samples.get() + 1;
        self.inner.samples.set(samples);
        trace!(samples, "Location sample recorded");
        true
    }

    /// Samples in the current recording.
    pub fn sample_count(&self) -> usize {
        self.inner.samples.get()
    }

    /// Tracks saved since startup.
    pub fn saved_tracks(&self) -> usize {
        self.inner.saved_tracks.get()
    }

    fn reset(&self) {
        self.inner.active.set(false);
        self.inner.samples.set(0);
    }
}

impl RecorderBackend for SimulatedRecorder {
    #[track_caller]
    fn start(&self) -> CoreResult<()> {
        if self.inner.active.get() {
            return Err(RecorderError::AlreadyRecording {
                location: ErrorLocation::from(Location::caller()),
            });
        }
        self.inner.samples.set(0);
        self.inner.active.set(true);
        debug!("Simulated recorder started");
        Ok(())
    }

    fn stop_without_saving(&self) -> CoreResult<()> {
        let discarded = self.inner.samples.get();
        self.reset();
        debug!(discarded, "Simulated recorder stopped without saving");
        Ok(())
    }

    #[track_caller]
    fn stop_and_save(&self, name: Option<&str>) -> CoreResult<()> {
        if !self.inner.active.get() {
            return Err(RecorderError::NotRecording {
                location: ErrorLocation::from(Location::caller()),
            });
        }
        let samples = self.inner.samples.get();
        self.inner.saved_tracks.set(self.inner.saved_tracks.get() + 1);
        self.reset();
        info!(samples, name = name.unwrap_or("<unnamed>"), "Track saved");
        Ok(())
    }

    fn is_active(&self) -> bool {
        self.inner.active.get()
    }

    fn is_empty(&self) -> bool {
        self.inner.samples.get() == 0
    }
}

/// Feed `recorder` one sample per `interval`, forever.
///
/// Must be spawned on a `LocalSet`; the recorder is `!Send`.
#[instrument(skip(recorder))]
pub async fn run_sampler(recorder: SimulatedRecorder, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;
        recorder.record_sample();
    }
}
