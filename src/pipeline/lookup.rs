use std::collections::HashMap;

use thiserror::Error;

use crate::color::{Color, Hsl};

/// Why a free-text prompt could not seed a palette.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("prompt is empty; describe the palette with a color word such as 'ocean' or 'ruby'")]
    EmptyPrompt,
    #[error("no known color word in '{prompt}'; try `tintly keywords` for the full list")]
    NoMatch { prompt: String },
}

/// A keyword and the base color it stands for.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorEntry {
    pub keyword: String,
    pub color: Color,
    pub hsl: Hsl,
}

/// keyword, hex, hue, saturation, lightness
const BUILTIN: &[(&str, &str, f64, f64, f64)] = &[
    ("ocean", "#0077B6", 201.0, 100.0, 36.0),
    ("ruby", "#9B111E", 354.0, 80.0, 34.0),
    ("sunset", "#FA5F55", 4.0, 94.0, 66.0),
    ("forest", "#228B22", 120.0, 61.0, 34.0),
    ("sky", "#87CEEB", 197.0, 71.0, 73.0),
    ("lavender", "#B57EDC", 275.0, 57.0, 68.0),
    ("rose", "#E11D48", 347.0, 77.0, 50.0),
    ("coral", "#FF7F50", 16.0, 100.0, 66.0),
    ("mint", "#3EB489", 158.0, 49.0, 47.0),
    ("emerald", "#50C878", 140.0, 52.0, 55.0),
    ("sapphire", "#0F52BA", 216.0, 85.0, 39.0),
    ("gold", "#FFD700", 51.0, 100.0, 50.0),
    ("amber", "#FFBF00", 45.0, 100.0, 50.0),
    ("lemon", "#FFF44F", 56.0, 100.0, 65.0),
    ("peach", "#FFB07C", 24.0, 100.0, 74.0),
    ("olive", "#808000", 60.0, 100.0, 25.0),
    ("teal", "#008080", 180.0, 100.0, 25.0),
    ("navy", "#000080", 240.0, 100.0, 25.0),
    ("plum", "#8E4585", 307.0, 35.0, 41.0),
    ("cherry", "#D2042D", 348.0, 96.0, 42.0),
    ("crimson", "#DC143C", 348.0, 83.0, 47.0),
    ("wine", "#722F37", 353.0, 42.0, 32.0),
    ("sand", "#C2B280", 45.0, 35.0, 63.0),
    ("desert", "#EDC9AF", 25.0, 63.0, 81.0),
    ("earth", "#8B5A2B", 29.0, 53.0, 36.0),
    ("chocolate", "#7B3F00", 31.0, 100.0, 24.0),
    ("coffee", "#6F4E37", 25.0, 34.0, 33.0),
    ("slate", "#708090", 210.0, 13.0, 50.0),
    ("charcoal", "#36454F", 204.0, 19.0, 26.0),
    ("ivory", "#FFFFF0", 60.0, 100.0, 97.0),
    ("cream", "#FFFDD0", 57.0, 100.0, 91.0),
    ("blush", "#DE5D83", 342.0, 66.0, 62.0),
    ("lilac", "#C8A2C8", 300.0, 26.0, 71.0),
    ("violet", "#8F00FF", 274.0, 100.0, 50.0),
    ("indigo", "#4B0082", 275.0, 100.0, 25.0),
    ("turquoise", "#40E0D0", 174.0, 72.0, 56.0),
    ("aqua", "#00FFFF", 180.0, 100.0, 50.0),
    ("jade", "#00A86B", 158.0, 100.0, 33.0),
    ("sage", "#9CAF88", 89.0, 20.0, 61.0),
    ("moss", "#8A9A5B", 75.0, 26.0, 48.0),
    ("rust", "#B7410E", 18.0, 86.0, 39.0),
    ("copper", "#B87333", 29.0, 57.0, 46.0),
    ("bronze", "#CD7F32", 30.0, 61.0, 50.0),
    ("honey", "#EB9605", 38.0, 96.0, 47.0),
    ("tangerine", "#F28500", 33.0, 100.0, 47.0),
    ("autumn", "#C1440E", 18.0, 86.0, 41.0),
    ("spring", "#00FF7F", 150.0, 100.0, 50.0),
    ("winter", "#A0C4E3", 208.0, 54.0, 76.0),
    ("midnight", "#191970", 240.0, 64.0, 27.0),
    ("fire", "#E25822", 17.0, 77.0, 51.0),
    ("ice", "#D6ECEF", 187.0, 44.0, 89.0),
    ("grape", "#6F2DA8", 272.0, 58.0, 42.0),
    ("berry", "#990F4B", 334.0, 82.0, 33.0),
    ("red", "#E53935", 1.0, 77.0, 55.0),
    ("orange", "#FB8C00", 33.0, 100.0, 49.0),
    ("yellow", "#FDD835", 49.0, 98.0, 60.0),
    ("green", "#43A047", 123.0, 41.0, 45.0),
    ("blue", "#1E88E5", 208.0, 79.0, 51.0),
    ("purple", "#8E24AA", 287.0, 65.0, 40.0),
    ("pink", "#EC407A", 340.0, 82.0, 59.0),
    ("brown", "#6D4C41", 15.0, 25.0, 34.0),
    ("gray", "#757575", 0.0, 0.0, 46.0),
    ("grey", "#757575", 0.0, 0.0, 46.0),
    ("black", "#212121", 0.0, 0.0, 13.0),
    ("white", "#FAFAFA", 0.0, 0.0, 98.0),
];

/// Case-insensitive keyword table used to seed palettes from free text.
#[derive(Debug, Clone)]
pub struct ColorDatabase {
    entries: HashMap<String, ColorEntry>,
}

impl ColorDatabase {
    /// The built-in keyword table.
    pub fn builtin() -> Self {
        let entries = BUILTIN
            .iter()
            .filter_map(|&(keyword, hex, h, s, l)| {
                // rows are checked by every_builtin_row_parses
                let color = Color::from_hex(hex).ok()?;
                Some((
                    keyword.to_string(),
                    ColorEntry {
                        keyword: keyword.to_string(),
                        color,
                        hsl: Hsl::new(h, s, l),
                    },
                ))
            })
            .collect();
        Self { entries }
    }

    /// Built-in table plus `extra`; extra entries replace built-ins of the same keyword.
    pub fn with_entries(extra: impl IntoIterator<Item = ColorEntry>) -> Self {
        let mut db = Self::builtin();
        for mut entry in extra {
            entry.keyword = entry.keyword.to_lowercase();
            db.entries.insert(entry.keyword.clone(), entry);
        }
        db
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact keyword lookup, ignoring case.
    pub fn get(&self, keyword: &str) -> Option<&ColorEntry> {
        self.entries.get(&keyword.to_lowercase())
    }

    /// Return the entry for the first recognized word in `prompt`.
    ///
    /// Words are split on whitespace and stripped of surrounding punctuation,
    /// scanning left to right.
    pub fn lookup(&self, prompt: &str) -> Result<&ColorEntry, LookupError> {
        if prompt.trim().is_empty() {
            return Err(LookupError::EmptyPrompt);
        }
        prompt
            .split_whitespace()
            .map(|word| word.trim_matches(|c: char| c.is_ascii_punctuation()))
            .filter(|word| !word.is_empty())
            .find_map(|word| self.get(word))
            .ok_or_else(|| LookupError::NoMatch {
                prompt: prompt.trim().to_string(),
            })
    }

    /// Accept a prompt only if at least one of its words is a known keyword.
    pub fn validate_prompt(&self, prompt: &str) -> Result<(), LookupError> {
        self.lookup(prompt).map(|_| ())
    }

    /// All keywords, sorted.
    pub fn keywords(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

impl Default for ColorDatabase {
    fn default() -> Self {
        Self::builtin()
    }
}
