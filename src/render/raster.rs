use std::{path::Path, sync::Arc};

use anyhow::Context as _;

use crate::foundation::error::{RootplayError, RootplayResult};

#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

/// SVG rasterizer with a font database loaded once and shared between threads.
#[derive(Clone, Debug)]
pub struct Rasterizer {
    fontdb: Arc<usvg::fontdb::Database>,
}

impl Rasterizer {
    /// Rasterizer using the fonts installed on this machine.
    pub fn with_system_fonts() -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.len(), "system fonts loaded");
        Self {
            fontdb: Arc::new(db),
        }
    }

    /// Rasterizer without any fonts; text nodes render as nothing.
    pub fn without_fonts() -> Self {
        Self {
            fontdb: Arc::new(usvg::fontdb::Database::new()),
        }
    }

    /// Render an SVG document into a premultiplied RGBA8 frame of `width x height`.
    #[tracing::instrument(level = "debug", skip(self, svg), fields(len = svg.len()))]
    pub fn rasterize(&self, svg: &str, width: u32, height: u32) -> RootplayResult<FrameRGBA> {
        let opts = usvg::Options {
            fontdb: self.fontdb.clone(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(svg, &opts).context("parse chart svg")?;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height).ok_or_else(|| {
            RootplayError::validation(format!("cannot allocate a {width}x{height} pixmap"))
        })?;
        let sx = (width as f32) / tree.size().width();
        let sy = (height as f32) / tree.size().height();
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::from_scale(sx, sy),
            &mut pixmap.as_mut(),
        );

        Ok(FrameRGBA {
            width,
            height,
            data: pixmap.take(),
            premultiplied: true,
        })
    }
}

/// One-off rasterization with system fonts.
pub fn rasterize_svg(svg: &str, width: u32, height: u32) -> RootplayResult<FrameRGBA> {
    Rasterizer::with_system_fonts().rasterize(svg, width, height)
}

/// Write a frame as a straight-alpha PNG.
pub fn write_png(frame: &FrameRGBA, path: &Path) -> RootplayResult<()> {
    let mut rgba = frame.data.clone();
    if frame.premultiplied {
        unpremultiply_rgba8_in_place(&mut rgba);
    }
    image::save_buffer_with_format(
        path,
        &rgba,
        frame.width,
        frame.height,
        image::ExtendedColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((*c as u16 * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
