use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Send a tick every `interval` until the receiver goes away.
pub fn spawn_ticker(interval: Duration, tx: Sender<()>) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new().name("ticker".into()).spawn(move || {
        loop {
            thread::sleep(interval);
            if tx.send(()).is_err() {
                break;
            }
        }
    })
}
