use anyhow::Result;

use crate::pipeline::harmony::Palette;

use super::ExportBackend;

/// Plain listing: a header line, then one hex value per line.
pub struct TextBackend;

impl ExportBackend for TextBackend {
    fn name(&self) -> &str {
        "text"
    }

    fn extension(&self) -> &str {
        "txt"
    }

    fn render(&self, palette: &Palette) -> Result<Vec<u8>> {
        let mut out = format!("{} [{}]\n", palette.name, palette.harmony);
        for color in &palette.colors {
            out.push_str(&format!("{}  {}\n", color.to_hex(), color.to_rgb_string()));
        }
        Ok(out.into_bytes())
    }
}
