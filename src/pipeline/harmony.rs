use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::color::{normalize_hue, Color, Hsl};

/// Number of colors in every generated palette.
pub const PALETTE_LEN: usize = 5;

/// Rule governing how a palette's hues relate to the base hue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Harmony {
    Monochrome,
    Complementary,
    Triad,
    Shades,
    SplitComplementary,
    Analogous,
}

impl Harmony {
    pub const ALL: [Harmony; 6] = [
        Harmony::Monochrome,
        Harmony::Complementary,
        Harmony::Triad,
        Harmony::Shades,
        Harmony::SplitComplementary,
        Harmony::Analogous,
    ];

    /// Human-readable label used in palette names.
    pub fn label(self) -> &'static str {
        match self {
            Harmony::Monochrome => "Monochrome",
            Harmony::Complementary => "Complementary",
            Harmony::Triad => "Triad",
            Harmony::Shades => "Shades",
            Harmony::SplitComplementary => "Split Complementary",
            Harmony::Analogous => "Analogous",
        }
    }

    /// The kebab-case identifier accepted on the command line.
    pub fn id(self) -> &'static str {
        match self {
            Harmony::Monochrome => "monochrome",
            Harmony::Complementary => "complementary",
            Harmony::Triad => "triad",
            Harmony::Shades => "shades",
            Harmony::SplitComplementary => "split-complementary",
            Harmony::Analogous => "analogous",
        }
    }

    pub fn next(self) -> Harmony {
        let i = Self::ALL.iter().position(|h| *h == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Harmony {
        let i = Self::ALL.iter().position(|h| *h == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl std::fmt::Display for Harmony {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Where a palette's base color came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Origin {
    /// Chosen by the user (keyword, hex or explicit HSL).
    Seeded,
    Random,
    /// Dominant color of an image.
    Extracted,
}

/// An ordered, fixed-length set of colors produced by one harmony rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub name: String,
    pub harmony: Harmony,
    pub origin: Origin,
    pub colors: [Color; PALETTE_LEN],
}

impl Palette {
    pub fn hexes(&self) -> Vec<String> {
        self.colors.iter().map(|c| c.to_hex()).collect()
    }
}

/// Clamp `v + delta` into `[lo, hi]`.
fn adjust(v: f64, delta: f64, lo: f64, hi: f64) -> f64 {
    (v + delta).clamp(lo, hi)
}

fn hsl(h: f64, s: f64, l: f64) -> Color {
    Hsl::new(normalize_hue(h), s.clamp(0.0, 100.0), l.clamp(0.0, 100.0)).to_color()
}

/// Lighter, softer version of a hue.
fn tint(h: f64, s: f64, l: f64) -> Color {
    hsl(h, adjust(s, -20.0, 10.0, 100.0), adjust(l, 20.0, 0.0, 95.0))
}

fn accent(h: f64, s: f64, l: f64) -> Color {
    hsl(h, adjust(s, -30.0, 10.0, 100.0), adjust(l, 10.0, 0.0, 90.0))
}

/// Produce the five colors of `harmony` around `base`.
///
/// The base is normalized first (hue mod 360, s/l clamped to [0, 100]), so
/// any numeric input is accepted.
///
/// Monochrome keeps the base unchanged in the middle slot while the other
/// slots are clamped, so lightness only stays ordered for base lightness in
/// [10, 90]. Outside that band the clamped neighbours can pass the base.
pub fn generate(base: Hsl, harmony: Harmony) -> [Color; PALETTE_LEN] {
    let Hsl { h, s, l } = base.normalized();
    match harmony {
        Harmony::Monochrome => [
            hsl(h, adjust(s, 10.0, 20.0, 100.0), adjust(l, -30.0, 10.0, 85.0)),
            hsl(h, s, adjust(l, -15.0, 10.0, 90.0)),
            hsl(h, s, l),
            hsl(h, adjust(s, -10.0, 10.0, 100.0), adjust(l, 15.0, 15.0, 90.0)),
            hsl(h, adjust(s, -20.0, 10.0, 100.0), adjust(l, 30.0, 20.0, 95.0)),
        ],
        Harmony::Complementary => [
            hsl(h, s, l),
            hsl(h + 180.0, s, l),
            tint(h, s, l),
            tint(h + 180.0, s, l),
            accent(h + 90.0, s, l),
        ],
        Harmony::Triad => [
            hsl(h, s, l),
            hsl(h + 120.0, s, l),
            hsl(h + 240.0, s, l),
            tint(h, s, l),
            tint(h + 180.0, s, l),
        ],
        Harmony::Shades => std::array::from_fn(|i| {
            let step = i as f64;
            let lightness = (15.0 + step * 18.0).clamp(10.0, 90.0);
            let saturation = (s - step * 5.0).max(40.0);
            hsl(h, saturation, lightness)
        }),
        Harmony::SplitComplementary => [
            hsl(h, s, l),
            hsl(h + 150.0, s, l),
            hsl(h + 210.0, s, l),
            tint(h, s, l),
            tint(h + 180.0, s, l),
        ],
        Harmony::Analogous => [-30.0, -15.0, 0.0, 15.0, 30.0].map(|offset| hsl(h + offset, s, l)),
    }
}

/// Generate a named palette.
pub fn generate_palette(name: impl Into<String>, base: Hsl, harmony: Harmony, origin: Origin) -> Palette {
    let palette = Palette {
        name: name.into(),
        harmony,
        origin,
        colors: generate(base, harmony),
    };
    tracing::debug!(
        name = %palette.name,
        harmony = %harmony,
        origin = ?origin,
        colors = ?palette.hexes(),
        "generated palette"
    );
    palette
}

/// Display name such as `Ocean Triad`.
pub fn palette_name(label: &str, harmony: Harmony) -> String {
    let mut chars = label.trim().chars();
    let title = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => return harmony.label().to_string(),
    };
    format!("{title} {}", harmony.label())
}

/// Pick a random base color with saturation in [45, 90] and lightness in [35, 65].
pub fn random_base<R: Rng>(rng: &mut R) -> Hsl {
    Hsl::new(
        rng.random_range(0.0..360.0),
        rng.random_range(45.0..=90.0),
        rng.random_range(35.0..=65.0),
    )
}
