use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Once;

use pictheme::backends::script::UpdateScriptBackend;
use pictheme::backends::xresources::XresourcesBackend;
use pictheme::backends::ThemeBackend;
use pictheme::{
    collect, derive_scheme, load_grid, match_palette, select_background, Color, NoProgress,
    PixelGrid, SchemeConfig, CONTRAST_TABLE, DEFAULT_PALETTE, SLOT_COUNT,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn create_dark_photo(path: &Path) {
    let img = image::RgbImage::from_fn(64, 64, |x, y| {
        let r = ((x * 40) / 64) as u8;
        let g = ((y * 30) / 64) as u8 + 5;
        let b = 20 + ((x + y) % 15) as u8;
        image::Rgb([r, g, b])
    });
    img.save(path).unwrap();
}

fn create_light_photo(path: &Path) {
    let img = image::RgbImage::from_fn(64, 64, |x, y| {
        let r = 200 + ((x * 55) / 64) as u8;
        let g = 190 + ((y * 55) / 64) as u8;
        let b = 180 + (((x + y) * 30) / 128).min(75) as u8;
        image::Rgb([r, g, b])
    });
    img.save(path).unwrap();
}

fn create_colorful(path: &Path) {
    let img = image::RgbImage::from_fn(64, 64, |x, y| {
        let region = (x / 16) + (y / 16) * 4;
        match region % 8 {
            0 => image::Rgb([220, 50, 50]),   // red
            1 => image::Rgb([50, 200, 50]),   // green
            2 => image::Rgb([50, 50, 220]),   // blue
            3 => image::Rgb([220, 220, 50]),  // yellow
            4 => image::Rgb([200, 50, 200]),  // magenta
            5 => image::Rgb([50, 200, 200]),  // cyan
            6 => image::Rgb([20, 20, 20]),    // black
            _ => image::Rgb([240, 240, 240]), // white
        }
    });
    img.save(path).unwrap();
}

fn create_red_black(path: &Path) {
    let img = image::RgbImage::from_fn(2, 2, |_, y| {
        if y == 0 {
            image::Rgb([255, 0, 0])
        } else {
            image::Rgb([0, 0, 0])
        }
    });
    img.save(path).unwrap();
}

static FIXTURES: Once = Once::new();

fn ensure_fixtures() {
    FIXTURES.call_once(create_fixtures);
}

fn create_fixtures() {
    let dir = fixture_dir();
    std::fs::create_dir_all(&dir).unwrap();

    let fixtures: [(&str, fn(&Path)); 4] = [
        ("dark-photo.png", create_dark_photo),
        ("light-photo.png", create_light_photo),
        ("colorful.png", create_colorful),
        ("red-black.png", create_red_black),
    ];
    for (name, create) in fixtures {
        let path = dir.join(name);
        if !path.exists() {
            create(&path);
        }
    }
}

fn scheme_for(fixture: &str, config: &SchemeConfig) -> pictheme::ColorScheme {
    ensure_fixtures();
    let grid = load_grid(&fixture_dir().join(fixture)).unwrap();
    derive_scheme(&grid, config, &NoProgress).unwrap()
}

/// Validate the structure of an Xresources file.
fn validate_xresources(output: &str) {
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 19, "expected 19 lines, got {}", lines.len());
    assert!(lines[0].starts_with("*.foreground: #"));
    assert!(lines[1].starts_with("*.background: #"));
    assert!(lines[2].starts_with("*.cursorColor: #"));
    for i in 0..SLOT_COUNT {
        let prefix = format!("*.color{i}: #");
        assert!(
            lines[3 + i].starts_with(&prefix),
            "line {} should start with '{prefix}', got '{}'",
            3 + i,
            lines[3 + i]
        );
    }

    let hex_re = regex::Regex::new(r"^\*\.\w+: #[0-9a-f]{6}$").unwrap();
    for line in &lines {
        assert!(hex_re.is_match(line), "malformed line: '{line}'");
    }
}

// ---------------------------------------------------------------------------
// Pipeline tests
// ---------------------------------------------------------------------------

#[test]
fn red_black_end_to_end() {
    let scheme = scheme_for("red-black.png", &SchemeConfig::default());
    assert_eq!(scheme.distinct_colors, 2);
    assert_eq!(scheme.prominence[0], 1);
    assert_eq!(scheme.prominence[1], 0);
    assert_eq!(scheme.palette[1], DEFAULT_PALETTE[1]);
    assert_eq!(scheme.choice.background_slot, 0);
    assert_eq!(scheme.choice.foreground_slot, 15);

    let output = XresourcesBackend.serialize(&scheme);
    validate_xresources(&output);
    assert!(output.starts_with("*.foreground: #ffffff\n*.background: #000000\n"));
}

#[test]
fn dark_photo_gets_dark_background() {
    let scheme = scheme_for("dark-photo.png", &SchemeConfig::default());
    let bg = scheme.choice.background.unpack();
    assert!(
        bg.relative_luminance() < 0.1,
        "dark photo background should be dark, got {bg}"
    );
}

#[test]
fn light_photo_gets_light_background() {
    let scheme = scheme_for("light-photo.png", &SchemeConfig::default());
    // Near-white pixels outnumber the mid grays.
    assert_eq!(scheme.choice.background_slot, 15);
    assert_eq!(scheme.choice.foreground_slot, 0);
    assert!(scheme.choice.background.unpack().relative_luminance() > 0.7);
}

#[test]
fn override_beats_prominence() {
    let config = SchemeConfig::default().with_background(Some(4));
    let scheme = scheme_for("colorful.png", &config);
    assert_eq!(scheme.choice.background_slot, 4);
    assert_eq!(scheme.choice.foreground_slot, CONTRAST_TABLE[4]);
    assert_eq!(scheme.choice.background, scheme.palette[4]);
}

#[test]
fn colorful_image_moves_slots_toward_image_colors() {
    let scheme = scheme_for("colorful.png", &SchemeConfig::default());
    assert_eq!(scheme.distinct_colors, 8);
    // 0x141414 is the closest image color to black.
    assert_eq!(scheme.palette[0].value(), 0x141414);
    assert_eq!(scheme.palette[15].value(), 0xf0f0f0);
    validate_xresources(&XresourcesBackend.serialize(&scheme));
}

#[test]
fn stages_compose_like_derive_scheme() {
    ensure_fixtures();
    let grid = load_grid(&fixture_dir().join("colorful.png")).unwrap();
    let config = SchemeConfig::default();

    let colors = collect(&grid, &NoProgress);
    let matched = match_palette(&colors, &DEFAULT_PALETTE, config.max_diff, &NoProgress);
    let choice = select_background(&matched.palette, &matched.prominence, None);

    let scheme = derive_scheme(&grid, &config, &NoProgress).unwrap();
    assert_eq!(scheme.palette, matched.palette);
    assert_eq!(scheme.prominence, matched.prominence);
    assert_eq!(scheme.choice, choice);
}

#[test]
fn update_script_mentions_wallpaper() {
    let scheme = scheme_for("red-black.png", &SchemeConfig::default());
    let image = fixture_dir().join("red-black.png");
    let script = UpdateScriptBackend::new(&image, ".Xresources").serialize(&scheme);
    assert!(script.starts_with("#!/bin/bash\n"));
    assert!(script.contains("red-black.png"));
    assert!(script.contains("background-color 'rgb(0,0,0)'"));
}

// ---------------------------------------------------------------------------
// Property tests
// ---------------------------------------------------------------------------

mod property_tests {
    use super::*;
    use pictheme::{distance, format_hex, PackedColor};
    use proptest::prelude::*;

    fn arb_color() -> impl Strategy<Value = Color> {
        proptest::array::uniform3(0u8..=255u8).prop_map(|[r, g, b]| Color::new(r, g, b))
    }

    fn arb_grid() -> impl Strategy<Value = PixelGrid> {
        (1usize..=12, 1usize..=12).prop_flat_map(|(w, h)| {
            proptest::collection::vec(arb_color(), w * h)
                .prop_map(move |pixels| PixelGrid::new(w, h, pixels).unwrap())
        })
    }

    proptest! {
        #[test]
        fn distance_is_a_symmetric_premetric(a in arb_color(), b in arb_color()) {
            prop_assert_eq!(distance(a, a), 0.0);
            prop_assert_eq!(distance(a, b), distance(b, a));
            prop_assert_eq!(distance(a, b) == 0.0, a == b);
            prop_assert!(distance(a, b) <= 441.68);
        }

        #[test]
        fn pack_unpack_round_trip(c in arb_color(), v in 0u32..=0xff_ffff) {
            prop_assert_eq!(c.pack().unpack(), c);
            let packed = PackedColor::new(v).unwrap();
            prop_assert_eq!(packed.unpack().pack(), packed);
        }

        #[test]
        fn hex_is_seven_lowercase_chars(v in 0u32..=0xff_ffff) {
            let hex = format_hex(PackedColor::new(v).unwrap());
            prop_assert_eq!(hex.len(), 7);
            prop_assert!(hex.starts_with('#'));
            prop_assert_eq!(hex.to_lowercase(), hex.clone());
            prop_assert_eq!(Color::from_hex(&hex).unwrap().pack().value(), v);
        }

        #[test]
        fn xresources_always_well_formed(grid in arb_grid(), bg in -2i64..20) {
            let config = SchemeConfig::default().with_background(Some(bg));
            let scheme = derive_scheme(&grid, &config, &NoProgress).unwrap();
            validate_xresources(&XresourcesBackend.serialize(&scheme));
        }

        #[test]
        fn matched_slots_come_from_the_image(grid in arb_grid(), max_diff in 0.0f64..450.0) {
            let colors = collect(&grid, &NoProgress);
            let matched = match_palette(&colors, &DEFAULT_PALETTE, max_diff, &NoProgress);
            for slot in 0..SLOT_COUNT {
                if matched.prominence[slot] == 0 {
                    prop_assert_eq!(matched.palette[slot], DEFAULT_PALETTE[slot]);
                } else {
                    prop_assert!(colors.contains(matched.palette[slot]));
                    let d = distance(DEFAULT_PALETTE[slot].unpack(), matched.palette[slot].unpack());
                    prop_assert!(d < max_diff);
                    prop_assert!(matched.prominence[slot] as usize <= colors.len());
                }
            }
        }

        #[test]
        fn winner_is_the_closest_color(grid in arb_grid()) {
            let colors = collect(&grid, &NoProgress);
            let matched = match_palette(&colors, &DEFAULT_PALETTE, 100.0, &NoProgress);
            for slot in 0..SLOT_COUNT {
                let reference = DEFAULT_PALETTE[slot].unpack();
                let best = colors
                    .iter()
                    .filter(|c| distance(reference, c.unpack()) < 100.0)
                    .min_by(|a, b| {
                        distance(reference, a.unpack())
                            .total_cmp(&distance(reference, b.unpack()))
                            .then(a.cmp(b))
                    });
                if let Some(best) = best {
                    prop_assert_eq!(matched.palette[slot], best);
                }
            }
        }

        #[test]
        fn background_is_first_argmax(grid in arb_grid()) {
            let scheme = derive_scheme(&grid, &SchemeConfig::default(), &NoProgress).unwrap();
            let counts = scheme.prominence.counts();
            let max = *counts.iter().max().unwrap();
            let first = counts.iter().position(|&c| c == max).unwrap();
            prop_assert_eq!(scheme.choice.background_slot, first);
            prop_assert_eq!(scheme.choice.foreground_slot, CONTRAST_TABLE[first]);
        }
    }
}

// ---------------------------------------------------------------------------
// CLI integration tests (run the actual binary)
// ---------------------------------------------------------------------------

fn cargo_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_pictheme"))
}

#[test]
fn cli_stdout_produces_valid_xresources() {
    ensure_fixtures();
    let output = Command::new(cargo_bin())
        .arg(fixture_dir().join("red-black.png"))
        .arg("--stdout")
        .output()
        .expect("failed to run binary");

    assert!(output.status.success(), "binary exited with error");
    let stdout = String::from_utf8_lossy(&output.stdout);
    validate_xresources(&stdout);
    assert!(stdout.contains("*.background: #000000"));
}

#[test]
fn cli_background_flag_works() {
    ensure_fixtures();
    let output = Command::new(cargo_bin())
        .args([
            fixture_dir().join("red-black.png").to_str().unwrap(),
            "--stdout",
            "--background",
            "15",
        ])
        .output()
        .expect("failed to run binary");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("*.background: #ffffff"));
    assert!(stdout.contains("*.foreground: #000000"));
}

#[test]
fn cli_out_of_range_bg_falls_back_with_warning() {
    ensure_fixtures();
    let output = Command::new(cargo_bin())
        .args([
            fixture_dir().join("red-black.png").to_str().unwrap(),
            "--stdout",
            "--bg",
            "42",
        ])
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run binary");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("*.background: #000000"));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("outside 0-15"), "got: {stderr}");
}

#[test]
fn cli_writes_both_artifacts() {
    ensure_fixtures();
    let tmp = std::env::temp_dir().join("pictheme-test-cli-output");
    std::fs::create_dir_all(&tmp).unwrap();

    let output = Command::new(cargo_bin())
        .args([
            fixture_dir().join("colorful.png").to_str().unwrap(),
            "--output-dir",
            tmp.to_str().unwrap(),
            "--update-script-name",
            "apply.sh",
        ])
        .output()
        .expect("failed to run binary");

    assert!(output.status.success());
    let xresources = std::fs::read_to_string(tmp.join(".Xresources")).unwrap();
    validate_xresources(&xresources);
    let script = std::fs::read_to_string(tmp.join("apply.sh")).unwrap();
    assert!(script.starts_with("#!/bin/bash"));
    assert!(script.contains("xrdb ~/.Xresources"));

    std::fs::remove_dir_all(&tmp).unwrap();
}

#[test]
fn cli_help_output() {
    let output = Command::new(cargo_bin())
        .arg("--help")
        .output()
        .expect("failed to run binary");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("pictheme"));
    assert!(stdout.contains("--max-diff"));
    assert!(stdout.contains("--background"));
    assert!(stdout.contains("--update-script-name"));
}

#[test]
fn cli_file_not_found_error() {
    let tmp = std::env::temp_dir().join("pictheme-test-cli-missing");
    let output = Command::new(cargo_bin())
        .args(["/nonexistent/image.png", "--output-dir", tmp.to_str().unwrap()])
        .output()
        .expect("failed to run binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("file not found"),
        "expected file-not-found error, got: {stderr}"
    );
    assert!(!tmp.exists(), "no output should be written on failure");
}

#[test]
fn cli_invalid_max_diff_error() {
    ensure_fixtures();
    let image = fixture_dir().join("red-black.png");
    for value in ["-5", "nan"] {
        let output = Command::new(cargo_bin())
            .args([image.to_str().unwrap(), "--stdout", "--max-diff", value])
            .output()
            .expect("failed to run binary");

        assert_eq!(output.status.code(), Some(1), "--max-diff {value}");
        assert!(output.stdout.is_empty());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(
            stderr.contains("invalid parameter: max_diff"),
            "expected validation error for {value}, got: {stderr}"
        );
    }
}
