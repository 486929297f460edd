//! Renderer crate for bmpshow.
//!
//! The module glues a `winit` window, a `wgpu` sprite pipeline, and a
//! fixed-count frame pacer together. The overall flow is:
//!
//! ```text
//!   CLI / bmpshow
//!          │ ViewerConfig
//!          ▼
//!   Viewer::run ──▶ event loop ──▶ window ──▶ GpuState ──▶ render()
//!                        │                                    │
//!                        └──◀── FramePacer (WaitUntil) ◀──────┘
//! ```
//!
//! `GpuState` owns every GPU resource (surface, device, pipeline,
//! textures) and its field order encodes the teardown sequence, so all
//! handles release in reverse order of acquisition on every exit path,
//! including acquisition failures that return early out of `run`.

mod error;
mod gpu;
pub mod layout;
mod pacing;
mod types;

use std::sync::Arc;
use std::time::Instant;

use winit::dpi::PhysicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

pub use error::ViewerError;
pub use pacing::FramePacer;
pub use types::{Scene, ViewerConfig};

use gpu::GpuState;

/// High-level entry point that owns the chosen configuration.
///
/// The heavy lifting lives inside [`gpu`]; `Viewer` validates the
/// config, acquires the session in order, and drives the event loop.
pub struct Viewer {
    config: ViewerConfig,
}

impl Viewer {
    /// Builds a viewer for the supplied configuration.
    pub fn new(config: ViewerConfig) -> Self {
        Self { config }
    }

    /// Opens the window, presents the configured number of frames at
    /// the configured interval, then tears everything down.
    ///
    /// Any acquisition or loading failure propagates immediately;
    /// handles acquired before the failure drop in reverse order on
    /// the way out.
    pub fn run(&self) -> Result<(), ViewerError> {
        self.config.validate()?;

        let event_loop =
            EventLoop::new().map_err(|err| ViewerError::Init(err.to_string()))?;
        let window_size =
            PhysicalSize::new(self.config.surface_size.0, self.config.surface_size.1);
        let window = WindowBuilder::new()
            .with_title(&self.config.title)
            .with_inner_size(window_size)
            .build(&event_loop)?;
        let window = Arc::new(window);

        let mut state = GpuState::new(window.as_ref(), window.inner_size(), &self.config.scene)?;
        let mut pacer = FramePacer::new(self.config.frame_count, self.config.frame_interval);

        tracing::info!(
            width = window_size.width,
            height = window_size.height,
            frames = self.config.frame_count,
            interval_ms = self.config.frame_interval.as_millis() as u64,
            "opening viewer window"
        );

        if pacer.ready_for_frame(Instant::now()) {
            window.request_redraw();
        }

        event_loop
            .run(move |event, elwt| match event {
                Event::WindowEvent { window_id, event } if window_id == window.id() => {
                    match event {
                        WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                            elwt.exit();
                        }
                        WindowEvent::Resized(new_size) => {
                            state.resize(new_size);
                        }
                        WindowEvent::ScaleFactorChanged {
                            mut inner_size_writer,
                            ..
                        } => {
                            // Keep the current physical size when the scale factor changes.
                            let _ = inner_size_writer.request_inner_size(state.size());
                        }
                        WindowEvent::RedrawRequested => {
                            // Compositor-driven redraws outside a pacing slot are
                            // ignored so the run presents exactly the configured
                            // number of frames.
                            if !pacer.ready_for_frame(Instant::now()) {
                                return;
                            }
                            match state.render() {
                                Ok(()) => {
                                    pacer.mark_rendered(Instant::now());
                                    tracing::debug!(
                                        frame = pacer.frames_rendered(),
                                        "presented frame"
                                    );
                                }
                                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                                    state.resize(state.size());
                                    window.request_redraw();
                                }
                                Err(wgpu::SurfaceError::OutOfMemory) => {
                                    tracing::error!("surface out of memory; aborting run");
                                    elwt.exit();
                                }
                                Err(wgpu::SurfaceError::Timeout) => {
                                    tracing::warn!("surface timeout; retrying next frame");
                                }
                                Err(other) => {
                                    tracing::warn!(error = ?other, "surface error; retrying next frame");
                                }
                            }
                        }
                        _ => {}
                    }
                }
                Event::AboutToWait => {
                    let now = Instant::now();
                    if pacer.finished(now) {
                        tracing::info!(
                            frames = pacer.frames_rendered(),
                            "frame loop complete; closing window"
                        );
                        elwt.exit();
                    } else if pacer.ready_for_frame(now) {
                        window.request_redraw();
                        elwt.set_control_flow(ControlFlow::Wait);
                    } else if let Some(deadline) = pacer.next_deadline() {
                        elwt.set_control_flow(ControlFlow::WaitUntil(deadline));
                    } else {
                        elwt.set_control_flow(ControlFlow::Wait);
                    }
                }
                _ => {}
            })
            .map_err(|err| ViewerError::EventLoop(err.to_string()))
    }
}
