//! Command dispatch: turns parsed arguments into palettes and writes them out.

use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};
use crossterm::style::{self, Stylize};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::backends::json::PaletteRecord;
use crate::backends::png::PngBackend;
use crate::backends::{backend_for, ExportBackend, ExportFormat};
use crate::cli::{Args, Command, PaletteOpts};
use crate::color::{Color, Hsl};
use crate::config::AppConfig;
use crate::pipeline::extract::{extract, load_image, ExtractMethod, ExtractedColor};
use crate::pipeline::harmony::{
    generate_palette, palette_name, random_base, Harmony, Origin, Palette,
};
use crate::tui::{self, TuiApp};

/// Execute one command.
pub fn run(args: Args) -> Result<()> {
    let config = AppConfig::load(args.config.as_deref());
    let mut stdout = std::io::stdout().lock();

    match args.command {
        Command::Prompt { words, palette } => {
            let prompt = words.join(" ");
            let built = palette_from_prompt(&config, &prompt, palette.harmony)?;
            emit(&built, &palette, &mut stdout)
        }
        Command::Seed {
            hex,
            hue,
            saturation,
            lightness,
            palette,
        } => {
            let built = palette_from_seed(
                &config,
                hex.as_deref(),
                hue.unwrap_or_default(),
                saturation,
                lightness,
                palette.harmony,
            )?;
            emit(&built, &palette, &mut stdout)
        }
        Command::Random { seed, palette } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            let harmony = palette.harmony.unwrap_or(config.default_harmony);
            let base = random_base(&mut rng);
            let built = generate_palette(palette_name("random", harmony), base, harmony, Origin::Random);
            emit(&built, &palette, &mut stdout)
        }
        Command::Extract {
            image,
            colors,
            method,
            harmony,
            format,
        } => {
            let top = colors.unwrap_or(config.extract_count);
            let report = extract_report(&image, method, top, harmony)?;
            let text = render_report(&report, format)?;
            stdout.write_all(text.as_bytes())?;
            Ok(())
        }
        Command::Keywords => {
            let db = config.database();
            for keyword in db.keywords() {
                if let Some(entry) = db.get(keyword) {
                    writeln!(stdout, "{:<12} {}", keyword, entry.color.to_hex())?;
                }
            }
            Ok(())
        }
        Command::Tui { hex, harmony } => {
            let (base, origin) = match hex {
                Some(hex) => (Color::from_hex(&hex)?.to_hsl(), Origin::Seeded),
                None => (random_base(&mut rand::rng()), Origin::Random),
            };
            drop(stdout);
            tui::run(TuiApp::new(
                base,
                harmony.unwrap_or(config.default_harmony),
                origin,
            ))
        }
    }
}

/// Resolve a free-text prompt to a keyword and build its palette.
///
/// Prompts without a known color word are rejected before generation.
pub fn palette_from_prompt(
    config: &AppConfig,
    prompt: &str,
    harmony: Option<Harmony>,
) -> Result<Palette> {
    let db = config.database();
    let entry = db.lookup(prompt)?;
    let harmony = harmony.unwrap_or(config.default_harmony);
    tracing::info!(keyword = %entry.keyword, hex = %entry.color, "matched prompt");
    Ok(generate_palette(
        palette_name(&entry.keyword, harmony),
        entry.hsl,
        harmony,
        Origin::Seeded,
    ))
}

/// Build a palette from an explicit hex color or HSL triple.
pub fn palette_from_seed(
    config: &AppConfig,
    hex: Option<&str>,
    hue: f64,
    saturation: f64,
    lightness: f64,
    harmony: Option<Harmony>,
) -> Result<Palette> {
    let harmony = harmony.unwrap_or(config.default_harmony);
    let (label, base) = match hex {
        Some(hex) => {
            let color = Color::from_hex(hex)?;
            (color.to_hex(), color.to_hsl())
        }
        None => {
            let base = Hsl::new(hue, saturation, lightness).normalized();
            (
                format!("hsl({:.0}, {:.0}%, {:.0}%)", base.h, base.s, base.l),
                base,
            )
        }
    };
    Ok(generate_palette(
        format!("{label} {}", harmony.label()),
        base,
        harmony,
        Origin::Seeded,
    ))
}

/// Ranked image colors, plus an optional palette seeded from the top one.
#[derive(Debug)]
pub struct ExtractReport {
    pub colors: Vec<ExtractedColor>,
    pub palette: Option<Palette>,
}

impl ExtractReport {
    fn palette_record(&self) -> Option<PaletteRecord<'_>> {
        self.palette.as_ref().map(PaletteRecord::from)
    }
}

pub fn extract_report(
    path: &Path,
    method: ExtractMethod,
    top: usize,
    harmony: Option<Harmony>,
) -> Result<ExtractReport> {
    let img = load_image(path)?;
    let colors = extract(&img, method, top);
    if colors.is_empty() {
        tracing::warn!(path = %path.display(), "image has no opaque pixels");
    }

    let palette = match harmony {
        None => None,
        Some(harmony) => {
            let Some(dominant) = colors.first() else {
                bail!(
                    "cannot build a palette from {}: the image has no opaque pixels",
                    path.display()
                );
            };
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "image".to_string());
            Some(generate_palette(
                palette_name(&stem, harmony),
                dominant.color.to_hsl(),
                harmony,
                Origin::Extracted,
            ))
        }
    };
    Ok(ExtractReport { colors, palette })
}

/// Format an extraction report for stdout.
pub fn render_report(report: &ExtractReport, format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Json => {
            #[derive(Serialize)]
            struct Document<'a> {
                colors: &'a [ExtractedColor],
                #[serde(skip_serializing_if = "Option::is_none")]
                palette: Option<PaletteRecord<'a>>,
            }
            let doc = Document {
                colors: &report.colors,
                palette: report.palette_record(),
            };
            let mut text =
                serde_json::to_string_pretty(&doc).context("failed to encode colors as JSON")?;
            text.push('\n');
            Ok(text)
        }
        ExportFormat::Css => {
            let mut out = String::from(":root {\n");
            for (i, c) in report.colors.iter().enumerate() {
                out.push_str(&format!("  --extracted-{}: {};\n", i + 1, c.hex()));
            }
            out.push_str("}\n");
            if let Some(palette) = &report.palette {
                out.push_str(&render_palette(palette, format)?);
            }
            Ok(out)
        }
        ExportFormat::Text => {
            let mut out = String::new();
            for c in &report.colors {
                out.push_str(&format!("{}  {:<18} {}\n", c.hex(), c.rgb_string(), c.count));
            }
            if let Some(palette) = &report.palette {
                out.push('\n');
                out.push_str(&render_palette(palette, format)?);
            }
            Ok(out)
        }
    }
}

fn render_palette(palette: &Palette, format: ExportFormat) -> Result<String> {
    let bytes = backend_for(format).render(palette)?;
    String::from_utf8(bytes).context("palette output is not UTF-8")
}

/// Write a palette to stdout or `--output`, plus any swatch or preview.
fn emit(palette: &Palette, opts: &PaletteOpts, stdout: &mut impl Write) -> Result<()> {
    let backend = backend_for(opts.format);
    match &opts.output {
        Some(path) => {
            backend.write_to(palette, path)?;
        }
        None => stdout.write_all(&backend.render(palette)?)?,
    }
    if let Some(path) = &opts.swatch {
        PngBackend.write_to(palette, path)?;
    }
    if opts.preview {
        print_preview(palette)?;
    }
    Ok(())
}

/// Colored swatches on stderr, so stdout stays machine-readable.
fn print_preview(palette: &Palette) -> Result<()> {
    let mut stderr = std::io::stderr().lock();
    for c in &palette.colors {
        let text = c.readable_text();
        let swatch = style::style(format!(" {} ", c.to_hex()))
            .on(style::Color::Rgb {
                r: c.r,
                g: c.g,
                b: c.b,
            })
            .with(style::Color::Rgb {
                r: text.r,
                g: text.g,
                b: text.b,
            });
        write!(stderr, "{swatch}")?;
    }
    writeln!(stderr)?;
    Ok(())
}
