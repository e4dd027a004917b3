use palette::{FromColor, Hsl as PaletteHsl, IntoColor, Lab, Srgb};
use thiserror::Error;

/// Errors raised while parsing color notations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// The input is not `#RRGGBB` with exactly six hex digits.
    #[error("invalid hex color '{input}': expected 6 hex digits after '#'")]
    InvalidHex { input: String },
}

/// Core color type used throughout the crate.
/// Wraps sRGB u8 components and provides conversions to HSL and CIELAB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Hue in degrees, saturation and lightness as percentages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    /// Wrap the hue into [0, 360) and clamp s/l into [0, 100].
    pub fn normalized(self) -> Self {
        Self {
            h: normalize_hue(self.h),
            s: clamp_percent(self.s),
            l: clamp_percent(self.l),
        }
    }

    pub fn to_color(self) -> Color {
        hsl_to_rgb(self.h, self.s, self.l)
    }
}

/// Wrap any hue, including negative ones, into [0, 360).
pub fn normalize_hue(h: f64) -> f64 {
    if !h.is_finite() {
        return 0.0;
    }
    let wrapped = h.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

fn clamp_percent(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 100.0)
    }
}

/// Convert HSL to an sRGB triple.
///
/// Uses the chroma formulation `f(n) = l - a * clamp(min(k-3, 9-k, 1), -1, 1)`
/// with `k = (n + h/30) mod 12`. Out-of-range inputs are wrapped or clamped
/// first, so the result is always a valid 8-bit color.
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Color {
    let Hsl { h, s, l } = Hsl::new(h, s, l).normalized();
    let l = l / 100.0;
    let a = s * l.min(1.0 - l) / 100.0;
    let channel = |n: f64| -> u8 {
        let k = (n + h / 30.0).rem_euclid(12.0);
        let v = l - a * (k - 3.0).min(9.0 - k).min(1.0).clamp(-1.0, 1.0);
        (255.0 * v).round().clamp(0.0, 255.0) as u8
    };
    Color::new(channel(0.0), channel(8.0), channel(4.0))
}

/// Convert HSL to an uppercase `#RRGGBB` string.
pub fn hsl_to_hex(h: f64, s: f64, l: f64) -> String {
    hsl_to_rgb(h, s, l).to_hex()
}

/// Parse `#RRGGBB` into its channels.
///
/// Lenient on input: surrounding whitespace is trimmed, the `#` is optional
/// and digits may be either case. Exactly six hex digits must remain.
pub fn hex_to_rgb(hex: &str) -> Result<Color, ColorError> {
    Color::from_hex(hex)
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex color string like `#ff8800` or `#FF8800`.
    ///
    /// The leading `#` is optional. Anything other than exactly six hex
    /// digits is rejected.
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let invalid = || ColorError::InvalidHex {
            input: hex.to_string(),
        };
        let digits = hex.trim().strip_prefix('#').unwrap_or(hex.trim());
        // from_str_radix tolerates a leading '+', so check digits up front
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    /// Serialize to uppercase hex `#RRGGBB`.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// CSS functional notation, e.g. `rgb(0, 119, 182)`.
    pub fn to_rgb_string(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    /// Convert to `palette::Srgb<u8>`.
    pub fn to_srgb_u8(self) -> Srgb<u8> {
        Srgb::new(self.r, self.g, self.b)
    }

    /// Decompose into hue [0, 360), saturation and lightness [0, 100].
    pub fn to_hsl(self) -> Hsl {
        let srgb: Srgb<f32> = self.to_srgb_u8().into_format();
        let hsl: PaletteHsl = srgb.into_color();
        Hsl {
            h: normalize_hue(f64::from(hsl.hue.into_positive_degrees())),
            s: clamp_percent(f64::from(hsl.saturation) * 100.0),
            l: clamp_percent(f64::from(hsl.lightness) * 100.0),
        }
    }

    /// Convert to CIELAB (for K-means clustering).
    pub fn to_lab(self) -> Lab {
        let srgb_f32: Srgb<f32> = self.to_srgb_u8().into_format();
        srgb_f32.into_color()
    }

    /// Create from CIELAB.
    pub fn from_lab(lab: Lab) -> Self {
        let srgb: Srgb<f32> = Srgb::from_color(lab);
        let r = (srgb.red.clamp(0.0, 1.0) * 255.0).round() as u8;
        let g = (srgb.green.clamp(0.0, 1.0) * 255.0).round() as u8;
        let b = (srgb.blue.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self { r, g, b }
    }

    /// WCAG 2.0 relative luminance.
    pub fn relative_luminance(self) -> f32 {
        fn linearize(c: u8) -> f32 {
            let c = c as f32 / 255.0;
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * linearize(self.r) + 0.7152 * linearize(self.g) + 0.0722 * linearize(self.b)
    }

    /// WCAG 2.0 contrast ratio between two colors, in [1, 21].
    pub fn contrast_ratio(c1: &Color, c2: &Color) -> f32 {
        let l1 = c1.relative_luminance();
        let l2 = c2.relative_luminance();
        let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };
        (lighter + 0.05) / (darker + 0.05)
    }

    /// Black or white, whichever reads better on top of this color.
    pub fn readable_text(self) -> Color {
        const BLACK: Color = Color::new(0, 0, 0);
        const WHITE: Color = Color::new(255, 255, 255);
        if Color::contrast_ratio(&self, &BLACK) >= Color::contrast_ratio(&self, &WHITE) {
            BLACK
        } else {
            WHITE
        }
    }
}

impl std::str::FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::from_hex(s)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}
