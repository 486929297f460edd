//! Windowed bitmap viewer.
//!
//! Shows one image stretched across the window, or tiles a backdrop
//! behind a centered overlay, for a fixed number of frames before
//! closing on its own.

mod cli;
mod run;
mod settings;

fn main() -> anyhow::Result<()> {
    let args = cli::parse();
    run::initialise_tracing();
    run::run(args)
}
