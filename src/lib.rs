//! Derive a 16-color terminal palette and a background/foreground pair from
//! an image.
//!
//! The distinct colors of the image are matched against a fixed reference
//! palette by Euclidean RGB distance. Each slot takes its closest image color
//! within a threshold, and the slot that attracted the most colors becomes the
//! background unless the caller overrides it.
//!
//! ```no_run
//! use pictheme::{derive_scheme, load_grid, NoProgress, SchemeConfig};
//! use std::path::Path;
//!
//! let grid = load_grid(Path::new("wallpaper.png"))?;
//! let scheme = derive_scheme(&grid, &SchemeConfig::default(), &NoProgress)?;
//! println!("background {}", scheme.choice.background);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod ansi;
pub mod backends;
pub mod cli;
pub mod color;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod preview;
pub mod progress;

pub use ansi::{AnsiPalette, Prominence, CONTRAST_TABLE, DEFAULT_PALETTE, SLOT_COUNT};
pub use color::{distance, format_hex, pack, unpack, Color, PackedColor};
pub use config::SchemeConfig;
pub use error::{Result, ThemeError};
pub use pipeline::collect::{collect, ColorSet, PixelGrid};
pub use pipeline::load::load_grid;
pub use pipeline::matcher::{match_palette, MatchResult};
pub use pipeline::select::{select_background, BackgroundChoice};
pub use pipeline::{derive_scheme, derive_scheme_with_base, ColorScheme};
pub use progress::{NoProgress, ProgressObserver};
