//! monobass - terminal bass player
//!
//! Run with: cargo run --release
//!
//! Plays a looping 16-step acid line through the bass engine. Set `RUST_LOG`
//! (e.g. `RUST_LOG=monobass=debug`) to see engine logs on stderr.

mod app;
mod sequencer;
mod ui;

use app::Player;
use sequencer::{Step, STEPS};
use tracing_subscriber::EnvFilter;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    Player::new().bpm(126.0).pattern(acid_line()).run()
}

/// A1-rooted line: accents on the off-beats, slides into the upper octave.
fn acid_line() -> [Step; STEPS] {
    use Step as S;
    [
        S::note(33).accent(),
        S::note(33),
        S::note(45).slide(),
        S::note(43),
        S::rest(),
        S::note(36).accent(),
        S::note(33).slide(),
        S::note(33),
        S::note(40).accent(),
        S::rest(),
        S::note(38).slide(),
        S::note(40),
        S::note(33),
        S::note(45).accent().slide(),
        S::note(43).slide(),
        S::note(36),
    ]
}
