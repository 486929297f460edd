use winit::dpi::PhysicalSize;

use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use wgpu::util::DeviceExt;

use crate::error::ViewerError;
use crate::layout::scene_placements;
use crate::types::Scene;

use super::context::GpuContext;
use super::pipeline::{quad_vertices, SpritePipeline, Vertex};
use super::sprite::Sprite;

/// Pre-built vertex buffer holding every quad one sprite occupies.
struct SpriteBatch {
    sprite: usize,
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
}

/// Aggregates every GPU resource needed to composite the scene.
///
/// The layout mirrors the lifetime relationship between objects:
///
/// ```text
///   Window ─▶ Surface ─▶ Device ─▶ Queue
///                           │
///                           ├─▶ SpritePipeline
///                           ├─▶ Sprites (textures + bind groups)
///                           └─▶ Vertex buffers (batches)
/// ```
///
/// Fields are declared in teardown order: scene resources release
/// first, then the pipeline, then the context that created them all.
pub(crate) struct GpuState {
    batches: Vec<SpriteBatch>,
    sprites: Vec<Sprite>,
    pipeline: SpritePipeline,
    context: GpuContext,
    frames_presented: u64,
}

impl GpuState {
    /// Acquires the GPU session, builds the pipeline, loads every
    /// scene image, and lays the quads out for the initial size.
    pub(crate) fn new<T>(
        target: &T,
        size: PhysicalSize<u32>,
        scene: &Scene,
    ) -> Result<Self, ViewerError>
    where
        T: HasDisplayHandle + HasWindowHandle,
    {
        let context = GpuContext::new(target, size)?;
        let pipeline = SpritePipeline::new(&context.device, context.surface_format);

        let sprites = match scene {
            Scene::Single { image } => vec![Sprite::load(
                &context.device,
                &context.queue,
                &pipeline.sprite_layout,
                image,
                "scene image",
            )?],
            Scene::Layered { backdrop, overlay } => vec![
                Sprite::load(
                    &context.device,
                    &context.queue,
                    &pipeline.sprite_layout,
                    backdrop,
                    "backdrop image",
                )?,
                Sprite::load(
                    &context.device,
                    &context.queue,
                    &pipeline.sprite_layout,
                    overlay,
                    "overlay image",
                )?,
            ],
        };

        let batches = build_batches(&context.device, context.size, &sprites);

        Ok(Self {
            batches,
            sprites,
            pipeline,
            context,
            frames_presented: 0,
        })
    }

    pub(crate) fn size(&self) -> PhysicalSize<u32> {
        self.context.size
    }

    /// Reconfigures the surface and re-lays the quads; placements
    /// depend on the surface size.
    pub(crate) fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.context.resize(new_size);
        self.batches = build_batches(&self.context.device, self.context.size, &self.sprites);
    }

    /// Clears the surface, draws every placement, and presents.
    pub(crate) fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let frame = self.context.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder =
            self.context
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("scene encoder"),
                });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            render_pass.set_pipeline(&self.pipeline.pipeline);
            for batch in &self.batches {
                render_pass.set_bind_group(0, &self.sprites[batch.sprite].bind_group, &[]);
                render_pass.set_vertex_buffer(0, batch.vertex_buffer.slice(..));
                render_pass.draw(0..batch.vertex_count, 0..1);
            }
        }

        self.context.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        self.frames_presented += 1;
        tracing::trace!(
            frame = self.frames_presented,
            width = self.context.size.width,
            height = self.context.size.height,
            "presented frame"
        );
        Ok(())
    }
}

impl Drop for GpuState {
    fn drop(&mut self) {
        tracing::debug!(
            frames = self.frames_presented,
            sprites = self.sprites.len(),
            "releasing GPU state"
        );
    }
}

/// Builds one vertex buffer per sprite, preserving the scene's draw
/// order (backdrop tiles before the overlay).
fn build_batches(
    device: &wgpu::Device,
    size: PhysicalSize<u32>,
    sprites: &[Sprite],
) -> Vec<SpriteBatch> {
    let surface = (size.width, size.height);
    let sizes: Vec<(u32, u32)> = sprites.iter().map(|sprite| sprite.size).collect();
    let placements = scene_placements(surface, &sizes);

    let mut batches = Vec::with_capacity(sprites.len());
    for index in 0..sprites.len() {
        let vertices: Vec<Vertex> = placements
            .iter()
            .filter(|placement| placement.sprite == index)
            .flat_map(|placement| quad_vertices(placement.rect, surface))
            .collect();
        if vertices.is_empty() {
            continue;
        }
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("sprite vertices"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        batches.push(SpriteBatch {
            sprite: index,
            vertex_buffer,
            vertex_count: vertices.len() as u32,
        });
    }
    batches
}
