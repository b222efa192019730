//! Collect -> Match -> Select.
//!
//! Each stage takes its inputs by reference and returns a new value; nothing
//! is shared between stages except what is passed explicitly.

pub mod collect;
pub mod load;
pub mod matcher;
pub mod select;

use tracing::info;

use crate::ansi::{AnsiPalette, Prominence, DEFAULT_PALETTE};
use crate::config::SchemeConfig;
use crate::error::Result;
use crate::progress::ProgressObserver;

use self::collect::{collect, PixelGrid};
use self::matcher::match_palette;
use self::select::{select_background, BackgroundChoice};

/// Everything the output backends need from one image.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScheme {
    pub palette: AnsiPalette,
    pub prominence: Prominence,
    pub choice: BackgroundChoice,
    /// Number of distinct colors found in the image.
    pub distinct_colors: usize,
}

/// Run the whole pipeline against the default reference palette.
pub fn derive_scheme(
    grid: &PixelGrid,
    config: &SchemeConfig,
    progress: &dyn ProgressObserver,
) -> Result<ColorScheme> {
    derive_scheme_with_base(grid, &DEFAULT_PALETTE, config, progress)
}

/// Run the whole pipeline against an arbitrary 16-color base palette.
pub fn derive_scheme_with_base(
    grid: &PixelGrid,
    base: &AnsiPalette,
    config: &SchemeConfig,
    progress: &dyn ProgressObserver,
) -> Result<ColorScheme> {
    config.validate()?;

    let colors = collect(grid, progress);
    let matched = match_palette(&colors, base, config.max_diff, progress);
    let choice = select_background(
        &matched.palette,
        &matched.prominence,
        config.background_override,
    );

    info!(
        background = %choice.background,
        foreground = %choice.foreground,
        distinct = colors.len(),
        "derived color scheme"
    );

    Ok(ColorScheme {
        palette: matched.palette,
        prominence: matched.prominence,
        choice,
        distinct_colors: colors.len(),
    })
}
