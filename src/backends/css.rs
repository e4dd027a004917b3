use anyhow::Result;

use crate::pipeline::harmony::Palette;

use super::ExportBackend;

/// CSS custom properties on `:root`.
pub struct CssBackend;

impl ExportBackend for CssBackend {
    fn name(&self) -> &str {
        "CSS"
    }

    fn extension(&self) -> &str {
        "css"
    }

    fn render(&self, palette: &Palette) -> Result<Vec<u8>> {
        let mut out = String::new();
        out.push_str(&format!("/* {} ({}) */\n", palette.name, palette.harmony));
        out.push_str(":root {\n");
        for (i, color) in palette.colors.iter().enumerate() {
            out.push_str(&format!("  --color-{}: {};\n", i + 1, color.to_hex()));
        }
        out.push_str("}\n");
        Ok(out.into_bytes())
    }
}
