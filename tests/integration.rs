use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tintly::color::{hex_to_rgb, hsl_to_hex, hsl_to_rgb, Color, Hsl};
use tintly::pipeline::extract::{extract_buckets, load_image, ExtractMethod, DEFAULT_TOP};
use tintly::pipeline::harmony::{generate, Harmony, Origin};
use tintly::pipeline::lookup::ColorDatabase;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn create_colorful(path: &Path) {
    // four horizontal bands with 4:3:2:1 area
    let img = image::RgbaImage::from_fn(40, 40, |_, y| match y {
        0..=15 => image::Rgba([220, 40, 40, 255]),
        16..=27 => image::Rgba([40, 40, 220, 255]),
        28..=35 => image::Rgba([40, 200, 40, 255]),
        _ => image::Rgba([250, 250, 250, 255]),
    });
    img.save(path).unwrap();
}

fn create_two_by_two(path: &Path) {
    let pixels = [[255, 0, 0, 255], [253, 2, 1, 255], [0, 255, 0, 255], [0, 0, 0, 0]];
    let img = image::RgbaImage::from_fn(2, 2, |x, y| image::Rgba(pixels[(y * 2 + x) as usize]));
    img.save(path).unwrap();
}

fn create_transparent(path: &Path) {
    let img = image::RgbaImage::from_pixel(16, 16, image::Rgba([90, 120, 200, 10]));
    img.save(path).unwrap();
}

fn create_large(path: &Path) {
    let img = image::RgbaImage::from_fn(800, 400, |x, _| {
        if x < 600 {
            image::Rgba([30, 60, 90, 255])
        } else {
            image::Rgba([240, 200, 160, 255])
        }
    });
    img.save(path).unwrap();
}

fn ensure_fixtures() {
    let dir = fixture_dir();
    std::fs::create_dir_all(&dir).unwrap();

    let fixtures: [(&str, fn(&Path)); 4] = [
        ("colorful.png", create_colorful),
        ("two-by-two.png", create_two_by_two),
        ("transparent.png", create_transparent),
        ("large.png", create_large),
    ];
    for (name, create) in fixtures {
        let path = dir.join(name);
        if !path.exists() {
            create(&path);
        }
    }
    let text = dir.join("not_an_image.txt");
    if !text.exists() {
        std::fs::write(text, "this is not an image").unwrap();
    }
}

fn is_hex(s: &str) -> bool {
    regex::Regex::new(r"^#[0-9A-F]{6}$").unwrap().is_match(s)
}

fn hue_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).abs() % 360.0;
    d.min(360.0 - d)
}

// ---------------------------------------------------------------------------
// Pipeline tests
// ---------------------------------------------------------------------------

#[test]
fn two_by_two_png_extracts_red_then_green() {
    ensure_fixtures();
    let img = load_image(&fixture_dir().join("two-by-two.png")).unwrap();
    let colors = extract_buckets(&img, DEFAULT_TOP);

    let summary: Vec<(String, u32)> = colors.iter().map(|c| (c.hex(), c.count)).collect();
    assert_eq!(
        summary,
        vec![("#FF0000".to_string(), 2), ("#00FF00".to_string(), 1)]
    );
}

#[test]
fn colorful_bands_rank_by_area() {
    ensure_fixtures();
    let img = load_image(&fixture_dir().join("colorful.png")).unwrap();
    let colors = extract_buckets(&img, DEFAULT_TOP);

    let counts: Vec<u32> = colors.iter().map(|c| c.count).collect();
    assert_eq!(counts, [640, 480, 320, 160]);
    assert_eq!(colors[0].color, Color::new(224, 32, 32));
    assert_eq!(colors[3].color, Color::new(255, 255, 255));
}

#[test]
fn transparent_png_extracts_nothing() {
    ensure_fixtures();
    let img = load_image(&fixture_dir().join("transparent.png")).unwrap();
    assert!(extract_buckets(&img, DEFAULT_TOP).is_empty());
}

#[test]
fn large_image_counts_fit_in_200_pixels() {
    ensure_fixtures();
    let img = load_image(&fixture_dir().join("large.png")).unwrap();
    let colors = extract_buckets(&img, DEFAULT_TOP);

    let total: u32 = colors.iter().map(|c| c.count).sum();
    assert!(total <= 200 * 100, "counted {total} pixels");
    assert_eq!(colors[0].color, Color::new(32, 64, 96));
}

#[test]
fn extracted_palette_is_seeded_from_dominant_color() {
    ensure_fixtures();
    let report = tintly::app::extract_report(
        &fixture_dir().join("colorful.png"),
        ExtractMethod::Buckets,
        DEFAULT_TOP,
        Some(Harmony::Complementary),
    )
    .unwrap();

    let palette = report.palette.unwrap();
    assert_eq!(palette.origin, Origin::Extracted);
    assert_eq!(palette.name, "Colorful Complementary");
    assert_eq!(palette.colors[0], Color::new(224, 32, 32));
}

#[test]
fn transparent_image_cannot_seed_palette() {
    ensure_fixtures();
    let result = tintly::app::extract_report(
        &fixture_dir().join("transparent.png"),
        ExtractMethod::Buckets,
        DEFAULT_TOP,
        Some(Harmony::Triad),
    );
    assert!(result.is_err());
}

#[test]
fn prompt_to_palette_end_to_end() {
    let db = ColorDatabase::builtin();
    let entry = db.lookup("ocean blue palette please").unwrap();
    assert_eq!(entry.color.to_hex(), "#0077B6");

    for harmony in Harmony::ALL {
        let colors = generate(entry.hsl, harmony);
        assert!(colors.iter().all(|c| is_hex(&c.to_hex())));
    }
}

// ---------------------------------------------------------------------------
// Property tests
// ---------------------------------------------------------------------------

mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_harmony() -> impl Strategy<Value = Harmony> {
        proptest::sample::select(Harmony::ALL.to_vec())
    }

    fn arb_image() -> impl Strategy<Value = image::RgbaImage> {
        (1u32..=12u32, 1u32..=12u32).prop_flat_map(|(w, h)| {
            proptest::collection::vec(proptest::array::uniform4(0u8..=255u8), (w * h) as usize)
                .prop_map(move |pixels| {
                    image::RgbaImage::from_fn(w, h, |x, y| {
                        image::Rgba(pixels[(y * w + x) as usize])
                    })
                })
        })
    }

    /// Per-channel reference: `f(n) = l - a * max(-1, min(k - 3, 9 - k, 1))`.
    fn formula_rgb(h: f64, s: f64, l: f64) -> (u8, u8, u8) {
        let l = l / 100.0;
        let a = s * l.min(1.0 - l) / 100.0;
        let f = |n: f64| {
            let k = (n + h / 30.0) % 12.0;
            let v = l - a * f64::max(-1.0, (k - 3.0).min(9.0 - k).min(1.0));
            (v * 255.0).round() as u8
        };
        (f(0.0), f(8.0), f(4.0))
    }

    #[test]
    fn formula_grid_matches_conversion() {
        for hi in 0..52 {
            for si in 0..12 {
                for li in 0..10 {
                    let (h, s, l) = (hi as f64 * 7.0, si as f64 * 9.0, li as f64 * 11.0);
                    let c = hsl_to_rgb(h, s, l);
                    assert_eq!((c.r, c.g, c.b), formula_rgb(h, s, l), "hsl({h}, {s}, {l})");
                }
            }
        }
    }

    proptest! {
        #[test]
        fn hex_round_trip_matches_formula(h in 0.0f64..360.0, s in 0.0f64..=100.0, l in 0.0f64..=100.0) {
            let hex = hsl_to_hex(h, s, l);
            prop_assert!(is_hex(&hex), "malformed {}", hex);
            let parsed = hex_to_rgb(&hex).unwrap();
            let expected = formula_rgb(h, s, l);
            prop_assert_eq!((parsed.r, parsed.g, parsed.b), expected, "{} for hsl({}, {}, {})", hex, h, s, l);
        }

        #[test]
        fn every_color_decomposes_in_range(h in -720.0f64..720.0, s in -50.0f64..150.0, l in -50.0f64..150.0) {
            let hsl = hsl_to_rgb(h, s, l).to_hsl();
            prop_assert!((0.0..360.0).contains(&hsl.h));
            prop_assert!((0.0..=100.0).contains(&hsl.s));
            prop_assert!((0.0..=100.0).contains(&hsl.l));
        }

        #[test]
        fn every_harmony_yields_five_hex_strings(
            h in -720.0f64..720.0,
            s in -50.0f64..150.0,
            l in -50.0f64..150.0,
            harmony in arb_harmony(),
        ) {
            let colors = generate(Hsl::new(h, s, l), harmony);
            prop_assert_eq!(colors.len(), 5);
            for c in colors {
                prop_assert!(is_hex(&c.to_hex()));
            }
        }

        #[test]
        fn analogous_hues_follow_offsets(h in 0.0f64..360.0, s in 40.0f64..=100.0, l in 25.0f64..=75.0) {
            let colors = generate(Hsl::new(h, s, l), Harmony::Analogous);
            for (c, offset) in colors.iter().zip([-30.0, -15.0, 0.0, 15.0, 30.0]) {
                let got = c.to_hsl().h;
                prop_assert!(
                    hue_distance(got, h + offset) < 2.5,
                    "offset {} expected ~{}, got {}", offset, h + offset, got
                );
            }
        }

        #[test]
        fn complementary_second_hue_is_opposite(h in 0.0f64..360.0, s in 40.0f64..=100.0, l in 25.0f64..=75.0) {
            let colors = generate(Hsl::new(h, s, l), Harmony::Complementary);
            let got = colors[1].to_hsl().h;
            prop_assert!(hue_distance(got, h + 180.0) < 2.5, "got {}", got);
        }

        #[test]
        fn shades_lightness_strictly_increases(h in -360.0f64..720.0, s in -50.0f64..150.0, l in -50.0f64..150.0) {
            let colors = generate(Hsl::new(h, s, l), Harmony::Shades);
            let lightness: Vec<f64> = colors.iter().map(|c| c.to_hsl().l).collect();
            for pair in lightness.windows(2) {
                prop_assert!(pair[0] < pair[1], "not increasing: {:?}", lightness);
            }
        }

        #[test]
        fn extraction_is_ranked_and_quantized(img in arb_image(), top in 1usize..10) {
            let colors = extract_buckets(&img, top);
            let opaque = img.pixels().filter(|p| p[3] >= 128).count() as u32;

            prop_assert!(colors.len() <= top);
            prop_assert!(colors.iter().map(|c| c.count).sum::<u32>() <= opaque);
            for window in colors.windows(2) {
                prop_assert!(window[0].count >= window[1].count);
            }
            for c in &colors {
                for channel in [c.color.r, c.color.g, c.color.b] {
                    prop_assert!(channel % 32 == 0 || channel == 255, "channel {}", channel);
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// CLI integration tests (run the actual binary)
// ---------------------------------------------------------------------------

fn tintly(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tintly"))
        .args(args)
        .env("TINTLY_CONFIG", "/nonexistent/tintly-test-config.json")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run binary")
}

fn hex_lines(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .filter(|word| is_hex(word))
        .map(str::to_string)
        .collect()
}

#[test]
fn cli_prompt_prints_palette() {
    let output = tintly(&["prompt", "ocean", "blue", "palette", "please", "-H", "triad"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Ocean Triad [triad]"));
    assert_eq!(hex_lines(&stdout).len(), 5);
}

#[test]
fn cli_prompt_without_color_word_fails() {
    let output = tintly(&["prompt", "xyzzy", "nonsense"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty(), "nothing should be generated");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no known color word"), "got: {stderr}");
}

#[test]
fn cli_seed_json_output() {
    let output = tintly(&["seed", "--hex", "#0077B6", "-H", "analogous", "--format", "json"]);
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["harmony"], "analogous");
    assert_eq!(value["origin"], "seeded");
    assert_eq!(value["colors"][2], "#0077B6");
}

#[test]
fn cli_seed_rejects_bad_hex() {
    let output = tintly(&["seed", "--hex", "#12345"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid hex color"), "got: {stderr}");
}

#[test]
fn cli_random_with_seed_is_reproducible() {
    let first = tintly(&["random", "--seed", "11", "-H", "shades"]);
    let second = tintly(&["random", "--seed", "11", "-H", "shades"]);
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn cli_output_and_swatch_write_files() {
    let tmp = std::env::temp_dir().join("tintly-test-cli-output");
    std::fs::create_dir_all(&tmp).unwrap();
    let css = tmp.join("palette.css");
    let png = tmp.join("palette.png");

    let output = tintly(&[
        "prompt",
        "forest",
        "--format",
        "css",
        "--output",
        css.to_str().unwrap(),
        "--swatch",
        png.to_str().unwrap(),
    ]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    let content = std::fs::read_to_string(&css).unwrap();
    assert!(content.contains("--color-5: #"));
    let swatch = image::open(&png).unwrap();
    assert_eq!((swatch.width(), swatch.height()), (600, 120));

    std::fs::remove_dir_all(&tmp).unwrap();
}

#[test]
fn cli_extract_json() {
    ensure_fixtures();
    let path = fixture_dir().join("two-by-two.png");
    let output = tintly(&["extract", path.to_str().unwrap(), "--format", "json"]);
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["colors"][0]["hex"], "#FF0000");
    assert_eq!(value["colors"][0]["rgb"], "rgb(255, 0, 0)");
    assert_eq!(value["colors"][0]["count"], 2);
    assert_eq!(value["colors"][1]["count"], 1);
}

#[test]
fn cli_extract_with_harmony_appends_palette() {
    ensure_fixtures();
    let path = fixture_dir().join("colorful.png");
    let output = tintly(&["extract", path.to_str().unwrap(), "-H", "triad"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Colorful Triad [triad]"));
    assert_eq!(hex_lines(&stdout).len(), 4 + 5);
}

#[test]
fn cli_keywords_lists_ocean() {
    let output = tintly(&["keywords"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.lines().any(|l| l.starts_with("ocean") && l.ends_with("#0077B6")));
}

#[test]
fn cli_help_output() {
    let output = tintly(&["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in ["prompt", "seed", "random", "extract", "keywords", "tui"] {
        assert!(stdout.contains(command), "help should mention {command}");
    }
}

#[test]
fn cli_file_not_found_error() {
    let output = tintly(&["extract", "/nonexistent/image.png"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("file not found"), "got: {stderr}");
}

#[test]
fn cli_unsupported_format_error() {
    ensure_fixtures();
    let path = fixture_dir().join("not_an_image.txt");
    let output = tintly(&["extract", path.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unsupported"), "got: {stderr}");
}
