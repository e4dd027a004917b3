use std::io::Cursor;

use anyhow::{Context, Result};
use image::{ImageFormat, Rgb, RgbImage};

use crate::pipeline::harmony::Palette;

use super::ExportBackend;

/// Side length of each square swatch, in pixels.
pub const SWATCH_SIZE: u32 = 120;

/// A strip of square swatches, one per palette color, left to right.
pub struct PngBackend;

impl PngBackend {
    pub fn swatch_image(palette: &Palette) -> RgbImage {
        RgbImage::from_fn(SWATCH_SIZE * palette.colors.len() as u32, SWATCH_SIZE, |x, _| {
            let c = palette.colors[(x / SWATCH_SIZE) as usize];
            Rgb([c.r, c.g, c.b])
        })
    }
}

impl ExportBackend for PngBackend {
    fn name(&self) -> &str {
        "PNG swatch"
    }

    fn extension(&self) -> &str {
        "png"
    }

    fn render(&self, palette: &Palette) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        Self::swatch_image(palette)
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .context("failed to encode swatch PNG")?;
        Ok(buf)
    }
}
