use anyhow::{Context, Result};
use serde::Serialize;

use crate::pipeline::harmony::{Harmony, Origin, Palette};

use super::ExportBackend;

/// Pretty-printed JSON document.
pub struct JsonBackend;

/// Serializable view of a palette with colors as hex strings.
#[derive(Debug, Serialize)]
pub struct PaletteRecord<'a> {
    pub name: &'a str,
    pub harmony: Harmony,
    pub origin: Origin,
    pub colors: Vec<String>,
}

impl<'a> From<&'a Palette> for PaletteRecord<'a> {
    fn from(palette: &'a Palette) -> Self {
        Self {
            name: &palette.name,
            harmony: palette.harmony,
            origin: palette.origin,
            colors: palette.hexes(),
        }
    }
}

impl ExportBackend for JsonBackend {
    fn name(&self) -> &str {
        "JSON"
    }

    fn extension(&self) -> &str {
        "json"
    }

    fn render(&self, palette: &Palette) -> Result<Vec<u8>> {
        let record = PaletteRecord::from(palette);
        let mut bytes =
            serde_json::to_vec_pretty(&record).context("failed to encode palette as JSON")?;
        bytes.push(b'\n');
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::test_support::test_palette;

    #[test]
    fn document_has_all_fields() {
        let palette = test_palette();
        let bytes = JsonBackend.render(&palette).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(value["name"], "Ocean Triad");
        assert_eq!(value["harmony"], "triad");
        assert_eq!(value["origin"], "seeded");
        let colors: Vec<&str> = value["colors"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c.as_str().unwrap())
            .collect();
        assert_eq!(colors, palette.hexes());
    }

    #[test]
    fn split_complementary_is_kebab_case() {
        let mut palette = test_palette();
        palette.harmony = Harmony::SplitComplementary;
        palette.origin = Origin::Extracted;
        let text = String::from_utf8(JsonBackend.render(&palette).unwrap()).unwrap();
        assert!(text.contains("\"split-complementary\""));
        assert!(text.contains("\"extracted\""));
    }
}
