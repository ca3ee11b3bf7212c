//! keybed - experimental terminal music keyboard
//!
//! Run with: cargo run
//!
//! Careful with headphones: experimental audio can be loud and harsh.

mod app;
mod midi;
mod ui;

use env_logger::Env;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    // Quiet by default; RUST_LOG=info shows MIDI port discovery.
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    app::run()
}
