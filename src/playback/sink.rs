//! `rodio` implementation of the audio backend.
//!
//! `OutputStream` cannot leave the thread that opened it, so a keeper
//! thread owns it for the lifetime of the backend and hands out its mixer.
//! Every opened track gets its own `Sink` on that mixer.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use rodio::mixer::Mixer;
use rodio::{Decoder, OutputStreamBuilder, Sink, Source};

use super::backend::{AudioBackend, AudioOutput, OpenedTrack, StreamInfo};
use crate::error::PlaybackError;

pub struct RodioBackend {
    mixer: Mixer,
    /// Read buffer handed to each decoder.
    buffer_size: usize,
    shutdown: Option<Sender<()>>,
    keeper: Option<JoinHandle<()>>,
}

impl RodioBackend {
    /// Open the default output device. Files are read through a buffer of
    /// `buffer_size` bytes.
    pub fn open_default(buffer_size: usize) -> Result<Self, PlaybackError> {
        let (ready_tx, ready_rx) = mpsc::channel::<Result<Mixer, String>>();
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

        let keeper = thread::Builder::new()
            .name("audio-output".into())
            .spawn(move || match OutputStreamBuilder::open_default_stream() {
                Ok(mut stream) => {
                    // rodio logs to stderr when OutputStream is dropped, which
                    // would scribble over the TUI.
                    stream.log_on_drop(false);
                    if ready_tx.send(Ok(stream.mixer().clone())).is_err() {
                        return;
                    }
                    // Returns once the backend drops its sender.
                    let _ = shutdown_rx.recv();
                }
                Err(e) => {
                    let _ = ready_tx.send(Err(e.to_string()));
                }
            })
            .map_err(|e| PlaybackError::Output(e.to_string()))?;

        let mixer = ready_rx
            .recv()
            .map_err(|e| PlaybackError::Output(e.to_string()))?
            .map_err(PlaybackError::Output)?;

        tracing::info!("audio output opened");
        Ok(Self {
            mixer,
            buffer_size: buffer_size.max(1),
            shutdown: Some(shutdown_tx),
            keeper: Some(keeper),
        })
    }
}

impl Drop for RodioBackend {
    fn drop(&mut self) {
        self.shutdown.take();
        if let Some(h) = self.keeper.take() {
            let _ = h.join();
        }
    }
}

impl AudioBackend for RodioBackend {
    fn open(&self, path: &Path) -> Result<OpenedTrack, PlaybackError> {
        let file = File::open(path).map_err(|source| PlaybackError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let reader = BufReader::with_capacity(self.buffer_size, file);
        let decoder = Decoder::new(reader).map_err(|e| PlaybackError::Decode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let sample_rate = decoder.sample_rate();
        let channels = decoder.channels();
        let total_samples = decoder.total_duration().map(|d| {
            (d.as_secs_f64() * f64::from(sample_rate) * f64::from(channels)).round() as u64
        });

        let sink = Sink::connect_new(&self.mixer);
        sink.pause();
        sink.append(decoder);

        Ok(OpenedTrack {
            info: StreamInfo {
                sample_rate,
                channels,
                total_samples,
            },
            output: Box::new(RodioOutput { sink }),
        })
    }
}

struct RodioOutput {
    sink: Sink,
}

impl AudioOutput for RodioOutput {
    fn play(&mut self) {
        self.sink.play();
    }

    fn pause(&mut self) {
        self.sink.pause();
    }

    fn set_volume(&mut self, volume: f32) {
        self.sink.set_volume(volume);
    }

    fn is_playing(&self) -> bool {
        !self.sink.empty() && !self.sink.is_paused()
    }

    fn seek(&mut self, position: Duration) -> Result<(), PlaybackError> {
        // Seeking a drained sink would wait on a source that no longer exists.
        if self.sink.empty() {
            return Ok(());
        }
        self.sink
            .try_seek(position)
            .map_err(|e| PlaybackError::Output(format!("seek failed: {e}")))
    }

    fn close(&mut self) {
        self.sink.stop();
    }
}
