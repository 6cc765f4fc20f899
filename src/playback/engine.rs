use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use super::backend::{AudioBackend, AudioOutput};
use super::clock::{Clock, SystemClock};
use super::types::{PlaybackSnapshot, RepeatMode, TransportPhase};
use crate::error::PlaybackError;
use crate::library::estimate_duration;

pub const DEFAULT_VOLUME: f32 = 0.8;

struct EngineState {
    phase: TransportPhase,
    song: Option<PathBuf>,
    output: Option<Box<dyn AudioOutput>>,
    duration: Duration,
    volume: f32,
    repeat_mode: RepeatMode,
    // Position is `base + (now - anchor)` while playing and `base` otherwise.
    // Both are reset on every phase change and seek.
    anchor: Option<Instant>,
    base: Duration,
}

impl EngineState {
    fn position(&self, now: Instant) -> Duration {
        let elapsed = match (self.phase, self.anchor) {
            (TransportPhase::Playing, Some(anchor)) => {
                self.base + now.saturating_duration_since(anchor)
            }
            (TransportPhase::Stopped, _) => Duration::ZERO,
            _ => self.base,
        };
        elapsed.min(self.duration)
    }

    fn rebase(&mut self, position: Duration, now: Instant) {
        self.base = position.min(self.duration);
        self.anchor = Some(now);
    }

    fn teardown(&mut self) {
        if let Some(mut output) = self.output.take() {
            output.close();
        }
        self.phase = TransportPhase::Stopped;
        self.song = None;
        self.duration = Duration::ZERO;
        self.anchor = None;
        self.base = Duration::ZERO;
    }
}

/// Transport state machine with wall-clock-derived position.
///
/// All state lives behind one lock so the input loop and the ticker can
/// both call in. Only `play` does I/O while holding it.
pub struct PlaybackEngine {
    backend: Box<dyn AudioBackend>,
    clock: Arc<dyn Clock>,
    state: Mutex<EngineState>,
}

impl PlaybackEngine {
    pub fn new(backend: Box<dyn AudioBackend>) -> Self {
        Self::with_clock(backend, Arc::new(SystemClock))
    }

    pub fn with_clock(backend: Box<dyn AudioBackend>, clock: Arc<dyn Clock>) -> Self {
        Self {
            backend,
            clock,
            state: Mutex::new(EngineState {
                phase: TransportPhase::Stopped,
                song: None,
                output: None,
                duration: Duration::ZERO,
                volume: DEFAULT_VOLUME,
                repeat_mode: RepeatMode::default(),
                anchor: None,
                base: Duration::ZERO,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, EngineState> {
        // The state record stays consistent even if a holder panicked.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Stop whatever is loaded, then open and start `path`. On failure the
    /// engine is left `Stopped` with no song.
    pub fn play(&self, path: &Path) -> Result<(), PlaybackError> {
        let mut st = self.lock();
        st.teardown();

        let opened = match self.backend.open(path) {
            Ok(opened) => opened,
            Err(e) => {
                tracing::warn!("cannot play {}: {e}", path.display());
                return Err(e);
            }
        };

        let duration = opened.info.duration().unwrap_or_else(|| {
            let size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
            estimate_duration(size)
        });

        let mut output = opened.output;
        output.set_volume(st.volume);
        output.play();

        let now = self.clock.now();
        st.output = Some(output);
        st.song = Some(path.to_path_buf());
        st.duration = duration;
        st.phase = TransportPhase::Playing;
        st.rebase(Duration::ZERO, now);

        tracing::info!("playing {} ({:?})", path.display(), duration);
        Ok(())
    }

    /// Freeze the position. Only effective while playing.
    pub fn pause(&self) {
        let mut st = self.lock();
        if st.phase != TransportPhase::Playing {
            return;
        }
        let now = self.clock.now();
        let position = st.position(now);
        if let Some(output) = st.output.as_mut() {
            output.pause();
        }
        st.phase = TransportPhase::Paused;
        st.rebase(position, now);
    }

    /// Continue from the frozen position. Only effective while paused.
    pub fn resume(&self) {
        let mut st = self.lock();
        if st.phase != TransportPhase::Paused {
            return;
        }
        let now = self.clock.now();
        let position = st.base;
        if let Some(output) = st.output.as_mut() {
            output.play();
        }
        st.phase = TransportPhase::Playing;
        st.rebase(position, now);
    }

    pub fn toggle_play_pause(&self) {
        let phase = self.lock().phase;
        match phase {
            TransportPhase::Playing => self.pause(),
            TransportPhase::Paused => self.resume(),
            TransportPhase::Stopped => {}
        }
    }

    pub fn stop(&self) {
        let mut st = self.lock();
        if st.phase != TransportPhase::Stopped {
            tracing::debug!("stop");
        }
        st.teardown();
    }

    /// Jump to `target`, clamped to the song's duration. The derived clock
    /// is rebased even when the output cannot seek.
    pub fn seek(&self, target: Duration) -> Result<Duration, PlaybackError> {
        let mut st = self.lock();
        if st.phase == TransportPhase::Stopped || st.song.is_none() {
            return Err(PlaybackError::NothingLoaded);
        }

        let target = target.min(st.duration);
        if let Some(output) = st.output.as_mut() {
            if let Err(e) = output.seek(target) {
                tracing::warn!("{e}");
            }
        }
        let now = self.clock.now();
        st.rebase(target, now);
        Ok(target)
    }

    /// Seek relative to the current position, saturating at both ends.
    pub fn seek_by(&self, delta_secs: i64) -> Result<Duration, PlaybackError> {
        let current = self.state().position;
        let step = Duration::from_secs(delta_secs.unsigned_abs());
        let target = if delta_secs < 0 {
            current.saturating_sub(step)
        } else {
            current + step
        };
        self.seek(target)
    }

    pub fn set_volume(&self, volume: f32) -> f32 {
        let mut st = self.lock();
        let volume = if volume.is_nan() {
            st.volume
        } else {
            volume.clamp(0.0, 1.0)
        };
        st.volume = volume;
        if let Some(output) = st.output.as_mut() {
            output.set_volume(volume);
        }
        volume
    }

    pub fn volume(&self) -> f32 {
        self.lock().volume
    }

    pub fn cycle_repeat_mode(&self) -> RepeatMode {
        let mut st = self.lock();
        st.repeat_mode = st.repeat_mode.next();
        st.repeat_mode
    }

    pub fn set_repeat_mode(&self, mode: RepeatMode) {
        self.lock().repeat_mode = mode;
    }

    pub fn repeat_mode(&self) -> RepeatMode {
        self.lock().repeat_mode
    }

    /// The only way to read the position; it is derived right now.
    pub fn state(&self) -> PlaybackSnapshot {
        let st = self.lock();
        PlaybackSnapshot {
            phase: st.phase,
            song: st.song.clone(),
            position: st.position(self.clock.now()),
            duration: st.duration,
            volume: st.volume,
            repeat_mode: st.repeat_mode,
        }
    }

    /// `true` when nothing is audible any more: nothing loaded, or the
    /// output drained while playing. A paused song is never finished.
    pub fn is_finished(&self) -> bool {
        let st = self.lock();
        match st.phase {
            TransportPhase::Stopped => true,
            TransportPhase::Paused => false,
            TransportPhase::Playing => st.output.as_ref().is_none_or(|o| !o.is_playing()),
        }
    }

    pub fn should_repeat_single(&self) -> bool {
        self.repeat_mode() == RepeatMode::Single
    }

    pub fn should_repeat_all(&self) -> bool {
        self.repeat_mode() == RepeatMode::All
    }
}

impl Drop for PlaybackEngine {
    fn drop(&mut self) {
        self.lock().teardown();
    }
}
