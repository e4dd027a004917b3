//! Exporters that turn a palette into something a designer can drop into a project.

pub mod css;
pub mod json;
pub mod png;
pub mod text;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::pipeline::harmony::Palette;

/// A palette output format.
pub trait ExportBackend {
    /// Human-readable format name.
    fn name(&self) -> &str;

    /// File extension without the dot.
    fn extension(&self) -> &str;

    /// Encode the palette.
    fn render(&self, palette: &Palette) -> Result<Vec<u8>>;

    /// `path`, with this backend's extension added when it has none.
    fn output_path(&self, path: &Path) -> PathBuf {
        if path.extension().is_some() {
            path.to_path_buf()
        } else {
            path.with_extension(self.extension())
        }
    }

    /// Encode the palette and write it to `path`, returning where it landed.
    fn write_to(&self, palette: &Palette, path: &Path) -> Result<PathBuf> {
        let path = self.output_path(path);
        let bytes = self.render(palette)?;
        std::fs::write(&path, bytes)
            .with_context(|| format!("failed to write {} to {}", self.name(), path.display()))?;
        tracing::info!(path = %path.display(), format = self.name(), "wrote palette");
        Ok(path)
    }
}

/// Textual output formats selectable on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    #[default]
    Text,
    Json,
    Css,
}

/// Pick the backend for a textual format.
pub fn backend_for(format: ExportFormat) -> Box<dyn ExportBackend> {
    match format {
        ExportFormat::Text => Box::new(text::TextBackend),
        ExportFormat::Json => Box::new(json::JsonBackend),
        ExportFormat::Css => Box::new(css::CssBackend),
    }
}
