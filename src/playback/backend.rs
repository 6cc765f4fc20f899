//! Decoder and output seam used by the engine.

use std::path::Path;
use std::time::Duration;

use crate::error::PlaybackError;

/// Stream parameters reported by the decoder when a file is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamInfo {
    pub sample_rate: u32,
    pub channels: u16,
    /// Interleaved sample count, when the decoder can tell.
    pub total_samples: Option<u64>,
}

impl StreamInfo {
    /// Length derived from the sample count, `None` when unknown or empty.
    pub fn duration(&self) -> Option<Duration> {
        let samples = self.total_samples?;
        let per_second = u64::from(self.sample_rate) * u64::from(self.channels.max(1));
        if per_second == 0 || samples == 0 {
            return None;
        }
        let millis = u128::from(samples) * 1000 / u128::from(per_second);
        Some(Duration::from_millis(u64::try_from(millis).unwrap_or(u64::MAX)))
    }
}

/// A live output for one opened track.
pub trait AudioOutput: Send {
    fn play(&mut self);
    fn pause(&mut self);
    fn set_volume(&mut self, volume: f32);
    /// `true` while there are samples left and output is not paused.
    fn is_playing(&self) -> bool;
    fn seek(&mut self, position: Duration) -> Result<(), PlaybackError>;
    fn close(&mut self);
}

pub struct OpenedTrack {
    pub info: StreamInfo,
    pub output: Box<dyn AudioOutput>,
}

/// Opens files into paused outputs.
pub trait AudioBackend: Send + Sync {
    fn open(&self, path: &Path) -> Result<OpenedTrack, PlaybackError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_from_interleaved_samples() {
        let info = StreamInfo {
            sample_rate: 44_100,
            channels: 2,
            total_samples: Some(44_100 * 2 * 30),
        };
        assert_eq!(info.duration(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn unknown_or_empty_length_has_no_duration() {
        let mut info = StreamInfo {
            sample_rate: 44_100,
            channels: 2,
            total_samples: None,
        };
        assert_eq!(info.duration(), None);
        info.total_samples = Some(0);
        assert_eq!(info.duration(), None);
        info.total_samples = Some(10);
        info.sample_rate = 0;
        assert_eq!(info.duration(), None);
    }
}
