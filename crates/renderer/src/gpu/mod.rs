//! GPU-facing half of the crate: session acquisition, the sprite
//! pipeline, texture uploads, and the per-frame render state.

mod context;
mod pipeline;
mod sprite;
mod state;

pub(crate) use state::GpuState;
