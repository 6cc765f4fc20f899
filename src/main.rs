mod app;
mod cli;
mod config;
mod error;
mod library;
mod logging;
mod mpris;
mod playback;
mod playlist;
mod progress;
mod runtime;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
