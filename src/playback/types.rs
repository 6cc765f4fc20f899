//! Small playback types shared between the engine and its callers.

use std::path::PathBuf;
use std::time::Duration;

/// Transport phase of the engine.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum TransportPhase {
    #[default]
    Stopped,
    Playing,
    Paused,
}

impl TransportPhase {
    pub fn label(self) -> &'static str {
        match self {
            TransportPhase::Stopped => "Stopped",
            TransportPhase::Playing => "Playing",
            TransportPhase::Paused => "Paused",
        }
    }
}

/// What happens when the current song ends.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum RepeatMode {
    /// Advance through the queue and stop after the last song.
    #[default]
    None,
    /// Replay the current song.
    Single,
    /// Advance through the queue and wrap to the start.
    All,
}

impl RepeatMode {
    /// `None -> Single -> All -> None`.
    pub fn next(self) -> Self {
        match self {
            RepeatMode::None => RepeatMode::Single,
            RepeatMode::Single => RepeatMode::All,
            RepeatMode::All => RepeatMode::None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RepeatMode::None => "Off",
            RepeatMode::Single => "Single",
            RepeatMode::All => "All",
        }
    }
}

/// Point-in-time view of the engine. Position is derived when the snapshot
/// is taken and always lies within `[0, duration]`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaybackSnapshot {
    pub phase: TransportPhase,
    pub song: Option<PathBuf>,
    pub position: Duration,
    pub duration: Duration,
    pub volume: f32,
    pub repeat_mode: RepeatMode,
}

impl PlaybackSnapshot {
    /// Fraction of the song already played, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 0.0;
        }
        (self.position.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }
}
