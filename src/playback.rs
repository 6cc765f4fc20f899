//! Playback transport: engine, audio backend seam and play queue.

mod backend;
mod clock;
mod engine;
mod queue;
mod sink;
mod types;

pub use backend::{AudioBackend, AudioOutput, OpenedTrack, StreamInfo};
#[cfg(test)]
pub(crate) use clock::ManualClock;
pub use clock::{Clock, SystemClock};
pub use engine::{DEFAULT_VOLUME, PlaybackEngine};
pub use queue::{FinishedOutcome, PlayQueue, handle_finished};
pub use sink::RodioBackend;
pub use types::{PlaybackSnapshot, RepeatMode, TransportPhase};

#[cfg(test)]
pub(crate) mod fake;
