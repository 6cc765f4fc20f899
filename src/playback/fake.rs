//! In-memory backend for tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::backend::{AudioBackend, AudioOutput, OpenedTrack, StreamInfo};
use crate::error::PlaybackError;

const RATE: u32 = 1000;

#[derive(Debug, Default)]
pub(crate) struct OutputLog {
    pub playing: bool,
    pub drained: bool,
    pub closed: bool,
    pub volume: f32,
    pub seeks: Vec<Duration>,
}

/// Backend that knows a fixed set of tracks by path. Tests share it with
/// the engine through `Arc` and poke the outputs it handed out.
#[derive(Default)]
pub(crate) struct FakeBackend {
    tracks: Mutex<HashMap<PathBuf, Option<Duration>>>,
    outputs: Mutex<Vec<(PathBuf, Arc<Mutex<OutputLog>>)>>,
    refuse_seek: bool,
}

impl FakeBackend {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn without_seek() -> Arc<Self> {
        Arc::new(Self {
            refuse_seek: true,
            ..Self::default()
        })
    }

    /// Register `path` with a known length, or `None` for a decoder that
    /// cannot report one.
    pub(crate) fn add(&self, path: impl Into<PathBuf>, length: Option<Duration>) {
        self.tracks.lock().unwrap().insert(path.into(), length);
    }

    /// Latest output opened for `path`.
    pub(crate) fn output(&self, path: &Path) -> Option<Arc<Mutex<OutputLog>>> {
        self.outputs
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(p, _)| p == path)
            .map(|(_, log)| log.clone())
    }

    pub(crate) fn opened(&self) -> Vec<PathBuf> {
        self.outputs
            .lock()
            .unwrap()
            .iter()
            .map(|(p, _)| p.clone())
            .collect()
    }

    /// Mark the latest output for `path` as having played to the end.
    pub(crate) fn drain(&self, path: &Path) {
        if let Some(log) = self.output(path) {
            log.lock().unwrap().drained = true;
        }
    }
}

impl AudioBackend for Arc<FakeBackend> {
    fn open(&self, path: &Path) -> Result<OpenedTrack, PlaybackError> {
        let length = self
            .tracks
            .lock()
            .unwrap()
            .get(path)
            .copied()
            .ok_or_else(|| PlaybackError::Decode {
                path: path.to_path_buf(),
                reason: "not a registered track".into(),
            })?;

        let log = Arc::new(Mutex::new(OutputLog::default()));
        self.outputs
            .lock()
            .unwrap()
            .push((path.to_path_buf(), log.clone()));

        Ok(OpenedTrack {
            info: StreamInfo {
                sample_rate: RATE,
                channels: 1,
                total_samples: length.map(|d| d.as_millis() as u64 * u64::from(RATE) / 1000),
            },
            output: Box::new(FakeOutput {
                log,
                refuse_seek: self.refuse_seek,
            }),
        })
    }
}

struct FakeOutput {
    log: Arc<Mutex<OutputLog>>,
    refuse_seek: bool,
}

impl AudioOutput for FakeOutput {
    fn play(&mut self) {
        self.log.lock().unwrap().playing = true;
    }

    fn pause(&mut self) {
        self.log.lock().unwrap().playing = false;
    }

    fn set_volume(&mut self, volume: f32) {
        self.log.lock().unwrap().volume = volume;
    }

    fn is_playing(&self) -> bool {
        let log = self.log.lock().unwrap();
        log.playing && !log.drained
    }

    fn seek(&mut self, position: Duration) -> Result<(), PlaybackError> {
        if self.refuse_seek {
            return Err(PlaybackError::Output("seek unsupported".into()));
        }
        self.log.lock().unwrap().seeks.push(position);
        Ok(())
    }

    fn close(&mut self) {
        let mut log = self.log.lock().unwrap();
        log.closed = true;
        log.playing = false;
    }
}
