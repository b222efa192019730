//! The 16-slot ANSI palette, its default reference colors and the contrast
//! lookup table.

use std::ops::Index;

use crate::color::PackedColor;

/// Number of slots in a terminal palette.
pub const SLOT_COUNT: usize = 16;

/// Reference colors every image color is matched against. Slot positions are
/// semantic: slot 0 is the black family, slot 7 the gray family, and so on.
pub const DEFAULT_PALETTE: AnsiPalette = AnsiPalette::from_u24([
    0x000000, // black
    0x770000, // red
    0x007700, // green
    0x777700, // yellow
    0x000077, // blue
    0x770077, // magenta
    0x007777, // cyan
    0xaaaaaa, // gray
    0x555555, // dark gray
    0xcc0000, // bright red
    0x00cc00, // bright green
    0xcccc00, // bright yellow
    0x0000cc, // bright blue
    0xcc00cc, // bright magenta
    0x00cccc, // bright cyan
    0xffffff, // white
]);

/// Maps a slot to the slot used as its readable foreground.
pub const CONTRAST_TABLE: [usize; SLOT_COUNT] =
    [15, 14, 13, 12, 11, 10, 9, 0, 15, 6, 5, 4, 3, 2, 1, 0];

pub const SLOT_NAMES: [&str; SLOT_COUNT] = [
    "black",
    "red",
    "green",
    "yellow",
    "blue",
    "magenta",
    "cyan",
    "gray",
    "dark gray",
    "bright red",
    "bright green",
    "bright yellow",
    "bright blue",
    "bright magenta",
    "bright cyan",
    "white",
];

/// Contrast counterpart of `slot`.
///
/// # Panics
///
/// Panics if `slot >= SLOT_COUNT`.
pub fn contrast_of(slot: usize) -> usize {
    CONTRAST_TABLE[slot]
}

/// An immutable 16-color palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnsiPalette {
    slots: [PackedColor; SLOT_COUNT],
}

impl AnsiPalette {
    pub const fn new(slots: [PackedColor; SLOT_COUNT]) -> Self {
        Self { slots }
    }

    const fn from_u24(values: [u32; SLOT_COUNT]) -> Self {
        let mut slots = [PackedColor::from_u24(0); SLOT_COUNT];
        let mut i = 0;
        while i < SLOT_COUNT {
            slots[i] = PackedColor::from_u24(values[i]);
            i += 1;
        }
        Self { slots }
    }

    pub fn slots(&self) -> &[PackedColor; SLOT_COUNT] {
        &self.slots
    }

    pub fn iter(&self) -> impl Iterator<Item = PackedColor> + '_ {
        self.slots.iter().copied()
    }

    /// Return a copy with `slot` replaced by `color`.
    pub fn with_slot(mut self, slot: usize, color: PackedColor) -> Self {
        self.slots[slot] = color;
        self
    }
}

impl Default for AnsiPalette {
    fn default() -> Self {
        DEFAULT_PALETTE
    }
}

impl Index<usize> for AnsiPalette {
    type Output = PackedColor;

    fn index(&self, slot: usize) -> &PackedColor {
        &self.slots[slot]
    }
}

/// Per-slot count of distinct image colors that matched within the threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Prominence([u32; SLOT_COUNT]);

impl Prominence {
    pub const fn new(counts: [u32; SLOT_COUNT]) -> Self {
        Self(counts)
    }

    pub fn counts(&self) -> &[u32; SLOT_COUNT] {
        &self.0
    }

    /// First slot holding the maximum count, scanning in ascending order.
    pub fn most_prominent(&self) -> usize {
        let mut best = 0;
        for (slot, &count) in self.0.iter().enumerate().skip(1) {
            if count > self.0[best] {
                best = slot;
            }
        }
        best
    }

    pub fn total(&self) -> u64 {
        self.0.iter().map(|&c| u64::from(c)).sum()
    }

    /// Slots ordered by descending count, ties by ascending slot.
    pub fn ranking(&self) -> Vec<usize> {
        let mut slots: Vec<usize> = (0..SLOT_COUNT).collect();
        slots.sort_by(|&a, &b| self.0[b].cmp(&self.0[a]).then(a.cmp(&b)));
        slots
    }
}

impl Index<usize> for Prominence {
    type Output = u32;

    fn index(&self, slot: usize) -> &u32 {
        &self.0[slot]
    }
}
