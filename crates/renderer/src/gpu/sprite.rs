use std::path::Path;

use image::RgbaImage;
use wgpu::util::{DeviceExt, TextureDataOrder};

use crate::error::ViewerError;

/// Decodes an image file into a transient CPU-side RGBA buffer.
///
/// The buffer only lives long enough to be uploaded; `Sprite::upload`
/// consumes it.
pub(crate) fn decode_image(path: &Path) -> Result<RgbaImage, ViewerError> {
    let decoded = image::open(path).map_err(|source| ViewerError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(decoded.to_rgba8())
}

/// GPU-resident image ready for compositing.
///
/// The bind group references the view and sampler, so the whole set is
/// owned together and released together.
pub(crate) struct Sprite {
    pub bind_group: wgpu::BindGroup,
    pub size: (u32, u32),
    _texture: wgpu::Texture,
    _view: wgpu::TextureView,
    _sampler: wgpu::Sampler,
}

impl Sprite {
    /// Uploads a decoded buffer as a texture, consuming the buffer
    /// whether or not the upload succeeds.
    pub(crate) fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        image: RgbaImage,
        label: &str,
    ) -> Result<Self, ViewerError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(ViewerError::Upload(format!(
                "image '{label}' has zero extent ({width}x{height})"
            )));
        }

        let texture = device.create_texture_with_data(
            queue,
            &wgpu::TextureDescriptor {
                label: Some(label),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            TextureDataOrder::LayerMajor,
            image.as_raw(),
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        Ok(Self {
            bind_group,
            size: (width, height),
            _texture: texture,
            _view: view,
            _sampler: sampler,
        })
    }

    /// Decodes then uploads; a decode failure returns before any GPU
    /// call happens.
    pub(crate) fn load(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        path: &Path,
        label: &str,
    ) -> Result<Self, ViewerError> {
        let image = decode_image(path)?;
        tracing::info!(
            path = %path.display(),
            width = image.width(),
            height = image.height(),
            label,
            "decoded image"
        );
        Self::upload(device, queue, layout, image, label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decoding_a_missing_file_reports_the_path() {
        let path = Path::new("/nonexistent/swirl_effect.bmp");
        let err = decode_image(path).unwrap_err();
        match err {
            ViewerError::Decode { path: reported, .. } => {
                assert_eq!(reported, path);
            }
            other => panic!("expected decode error, got {other}"),
        }
    }

    #[test]
    fn decoding_a_bmp_round_trips_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("checker.bmp");

        let mut pixels = RgbaImage::new(4, 2);
        for (x, y, pixel) in pixels.enumerate_pixels_mut() {
            let shade = if (x + y) % 2 == 0 { 255 } else { 0 };
            *pixel = image::Rgba([shade, shade, shade, 255]);
        }
        pixels.save(&path).unwrap();

        let decoded = decode_image(&path).unwrap();
        assert_eq!(decoded.dimensions(), (4, 2));
    }

    #[test]
    fn decoding_garbage_bytes_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not-an-image.bmp");
        std::fs::write(&path, b"BMnope").unwrap();
        assert!(matches!(
            decode_image(&path),
            Err(ViewerError::Decode { .. })
        ));
    }
}
