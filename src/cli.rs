use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

use crate::backends::ExportFormat;
use crate::pipeline::extract::ExtractMethod;
use crate::pipeline::harmony::Harmony;

/// Generate color palettes from words, seed colors, or images.
#[derive(Parser, Debug)]
#[command(name = "tintly", version, about)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Read settings from this JSON file instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build a palette from a phrase containing a color word ("ocean breeze")
    Prompt {
        /// Free-text description; the first known color word seeds the palette
        #[arg(required = true, num_args = 1..)]
        words: Vec<String>,

        #[command(flatten)]
        palette: PaletteOpts,
    },

    /// Build a palette from an explicit base color
    Seed {
        /// Base color as #RRGGBB
        #[arg(long, conflicts_with_all = ["hue", "saturation", "lightness"])]
        hex: Option<String>,

        /// Base hue in degrees
        #[arg(long, allow_negative_numbers = true, required_unless_present = "hex")]
        hue: Option<f64>,

        /// Base saturation in percent
        #[arg(long, default_value_t = 70.0)]
        saturation: f64,

        /// Base lightness in percent
        #[arg(long, default_value_t = 50.0)]
        lightness: f64,

        #[command(flatten)]
        palette: PaletteOpts,
    },

    /// Build a palette from a random base color
    Random {
        /// Seed the random generator for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        #[command(flatten)]
        palette: PaletteOpts,
    },

    /// List the dominant colors of an image
    Extract {
        /// Path to the input image
        image: PathBuf,

        /// Number of colors to return (defaults to the config value, 8)
        #[arg(short = 'n', long = "colors")]
        colors: Option<usize>,

        /// Extraction algorithm
        #[arg(long, value_enum, default_value_t = ExtractMethod::Buckets)]
        method: ExtractMethod,

        /// Also build a palette of this harmony from the dominant color
        #[arg(short = 'H', long, value_enum)]
        harmony: Option<Harmony>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Text)]
        format: ExportFormat,
    },

    /// List every color word the prompt command understands
    Keywords,

    /// Browse palettes interactively in the terminal
    Tui {
        /// Starting base color as #RRGGBB (random if omitted)
        #[arg(long)]
        hex: Option<String>,

        /// Starting harmony
        #[arg(short = 'H', long, value_enum)]
        harmony: Option<Harmony>,
    },
}

/// Options shared by every palette-producing command.
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct PaletteOpts {
    /// Harmony rule (defaults to the config value, analogous)
    #[arg(short = 'H', long, value_enum)]
    pub harmony: Option<Harmony>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = ExportFormat::Text)]
    pub format: ExportFormat,

    /// Write the palette to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also write a PNG swatch strip to this path
    #[arg(long)]
    pub swatch: Option<PathBuf>,

    /// Print colored swatches to the terminal
    #[arg(long)]
    pub preview: bool,
}
