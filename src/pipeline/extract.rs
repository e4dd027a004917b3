use std::path::Path;

use anyhow::{Context, Result};
use image::imageops::FilterType;
use image::{DynamicImage, RgbaImage};
use indexmap::IndexMap;
use kmeans_colors::get_kmeans_hamerly;
use palette::Lab;
use serde::Serialize;

use crate::color::Color;

/// A color found in the image together with how many pixels it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractedColor {
    pub color: Color,
    pub count: u32,
}

impl ExtractedColor {
    pub fn hex(&self) -> String {
        self.color.to_hex()
    }

    pub fn rgb_string(&self) -> String {
        self.color.to_rgb_string()
    }
}

impl Serialize for ExtractedColor {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Record {
            hex: String,
            rgb: String,
            count: u32,
        }
        Record {
            hex: self.hex(),
            rgb: self.rgb_string(),
            count: self.count,
        }
        .serialize(serializer)
    }
}

/// How dominant colors are found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ExtractMethod {
    /// Round channels to a 32-step grid and count bucket hits.
    #[default]
    Buckets,
    /// Cluster opaque pixels in CIELAB with K-means.
    Kmeans,
}

/// Longer image side after downscaling.
pub const MAX_DIM: u32 = 200;
/// Number of colors returned when the caller does not ask for a count.
pub const DEFAULT_TOP: usize = 8;
/// Pixels with lower alpha are treated as transparent.
pub const MIN_ALPHA: u8 = 128;
const BUCKET: u16 = 32;
const MAX_ITER: usize = 20;
const CONVERGE: f32 = 5.0;
const KMEANS_SEED: u64 = 42;
/// `kmeans_colors` stores centroid indices as `u8`.
pub const MAX_CLUSTERS: usize = u8::MAX as usize + 1;

/// Decode an image from disk into RGBA.
pub fn load_image(path: &Path) -> Result<RgbaImage> {
    let img = image::open(path).with_context(|| {
        if !path.exists() {
            format!("file not found: {}", path.display())
        } else {
            format!(
                "unsupported or corrupt image: {}. Supported formats: PNG, JPEG, WebP, BMP, TIFF, GIF",
                path.display()
            )
        }
    })?;
    tracing::info!(
        path = %path.display(),
        width = img.width(),
        height = img.height(),
        "loaded image"
    );
    Ok(img.to_rgba8())
}

/// Resize so the longer side is at most `max_dim`, preserving aspect ratio.
pub fn downscale(img: &RgbaImage, max_dim: u32) -> RgbaImage {
    if img.width() <= max_dim && img.height() <= max_dim {
        return img.clone();
    }
    let resized = DynamicImage::ImageRgba8(img.clone())
        .resize(max_dim, max_dim, FilterType::Lanczos3)
        .to_rgba8();
    tracing::debug!(
        from = ?img.dimensions(),
        to = ?resized.dimensions(),
        "downscaled image"
    );
    resized
}

/// Round a channel to the nearest multiple of 32, half up, capped at 255.
///
/// `round(255 / 32) * 32` is 256, which does not fit a channel; the top
/// bucket is clamped to 255 so that white stays white.
pub fn quantize_channel(c: u8) -> u8 {
    let rounded = (u16::from(c) + BUCKET / 2) / BUCKET * BUCKET;
    rounded.min(255) as u8
}

pub fn quantize(color: Color) -> Color {
    Color::new(
        quantize_channel(color.r),
        quantize_channel(color.g),
        quantize_channel(color.b),
    )
}

fn opaque_pixels(img: &RgbaImage) -> impl Iterator<Item = Color> + '_ {
    img.pixels()
        .filter(|p| p[3] >= MIN_ALPHA)
        .map(|p| Color::new(p[0], p[1], p[2]))
}

/// Sort by count descending; ties keep their incoming order.
fn rank(mut colors: Vec<ExtractedColor>, top: usize) -> Vec<ExtractedColor> {
    colors.sort_by(|a, b| b.count.cmp(&a.count));
    colors.truncate(top);
    colors
}

/// Dominant colors by quantized bucket frequency.
///
/// Ties between buckets with equal counts are broken by the order in which
/// each bucket was first seen, scanning rows top to bottom.
pub fn extract_buckets(img: &RgbaImage, top: usize) -> Vec<ExtractedColor> {
    let img = downscale(img, MAX_DIM);

    let mut counts: IndexMap<Color, u32> = IndexMap::new();
    for pixel in opaque_pixels(&img) {
        *counts.entry(quantize(pixel)).or_insert(0) += 1;
    }

    let colors = counts
        .into_iter()
        .map(|(color, count)| ExtractedColor { color, count })
        .collect();
    rank(colors, top)
}

/// Dominant colors by K-means clustering in CIELAB.
///
/// Uses Hamerly's algorithm with a fixed seed so results are reproducible.
/// At most [`MAX_CLUSTERS`] clusters are formed, however large `k` is.
pub fn extract_kmeans(img: &RgbaImage, k: usize) -> Vec<ExtractedColor> {
    let img = downscale(img, MAX_DIM);
    let pixels: Vec<Lab> = opaque_pixels(&img).map(Color::to_lab).collect();
    if pixels.is_empty() || k == 0 {
        return Vec::new();
    }

    if k > MAX_CLUSTERS {
        tracing::warn!(requested = k, max = MAX_CLUSTERS, "capping k-means cluster count");
    }
    let k = k.min(MAX_CLUSTERS).min(pixels.len());
    let result = get_kmeans_hamerly(k, MAX_ITER, CONVERGE, false, &pixels, KMEANS_SEED);

    let mut counts = vec![0u32; result.centroids.len()];
    for &idx in &result.indices {
        counts[idx as usize] += 1;
    }

    let colors = result
        .centroids
        .iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|(lab, count)| ExtractedColor {
            color: Color::from_lab(*lab),
            count,
        })
        .collect();
    rank(colors, k)
}

/// Run the selected extraction method.
pub fn extract(img: &RgbaImage, method: ExtractMethod, top: usize) -> Vec<ExtractedColor> {
    let colors = match method {
        ExtractMethod::Buckets => extract_buckets(img, top),
        ExtractMethod::Kmeans => extract_kmeans(img, top),
    };
    tracing::debug!(?method, found = colors.len(), "extracted colors");
    colors
}
