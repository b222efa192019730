use std::collections::HashSet;

use rayon::prelude::*;
use tracing::debug;

use crate::color::{Color, PackedColor};
use crate::error::{Result, ThemeError};
use crate::progress::{ProgressObserver, Stage};

/// A rectangular, non-empty grid of pixels stored row by row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl PixelGrid {
    /// Wrap a row-major pixel buffer.
    pub fn new(width: usize, height: usize, pixels: Vec<Color>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ThemeError::invalid_image(format!(
                "grid is {width}x{height}, both dimensions must be non-zero"
            )));
        }
        if width.checked_mul(height) != Some(pixels.len()) {
            return Err(ThemeError::invalid_image(format!(
                "{} pixels do not fill a {width}x{height} grid",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build from rows, which must all have the same non-zero length.
    pub fn from_rows<R: AsRef<[Color]>>(rows: &[R]) -> Result<Self> {
        let first = rows
            .first()
            .ok_or_else(|| ThemeError::invalid_image("grid has zero rows"))?;
        let width = first.as_ref().len();
        if width == 0 {
            return Err(ThemeError::invalid_image("grid has zero columns"));
        }

        let mut pixels = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(ThemeError::invalid_image(format!(
                    "row {y} has {} pixels, expected {width}",
                    row.len()
                )));
            }
            pixels.extend_from_slice(row);
        }
        Self::new(width, rows.len(), pixels)
    }

    pub fn from_rgb_image(img: &image::RgbImage) -> Result<Self> {
        let pixels = img.pixels().map(|p| Color::from(p.0)).collect();
        Self::new(img.width() as usize, img.height() as usize, pixels)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }
}

/// The distinct colors of an image. Iteration order is unspecified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorSet(HashSet<PackedColor>);

impl ColorSet {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, color: PackedColor) -> bool {
        self.0.contains(&color)
    }

    pub fn iter(&self) -> impl Iterator<Item = PackedColor> + '_ {
        self.0.iter().copied()
    }

    pub(crate) fn inner(&self) -> &HashSet<PackedColor> {
        &self.0
    }
}

impl FromIterator<PackedColor> for ColorSet {
    fn from_iter<I: IntoIterator<Item = PackedColor>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Scan every pixel once and gather the distinct colors.
///
/// Rows are scanned in parallel and the per-row sets are merged by union.
/// `progress` is told about each finished row.
pub fn collect(grid: &PixelGrid, progress: &dyn ProgressObserver) -> ColorSet {
    progress.start(Stage::Collect, grid.height());

    let colors = grid
        .pixels()
        .par_chunks(grid.width())
        .map(|row| {
            let set: HashSet<PackedColor> = row.iter().map(|c| c.pack()).collect();
            progress.advance(Stage::Collect, 1);
            set
        })
        .reduce(HashSet::new, |mut a, mut b| {
            if a.len() < b.len() {
                std::mem::swap(&mut a, &mut b);
            }
            a.extend(b);
            a
        });

    progress.finish(Stage::Collect);
    debug!(
        width = grid.width(),
        height = grid.height(),
        distinct = colors.len(),
        "collected image colors"
    );
    ColorSet(colors)
}
