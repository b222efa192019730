use rayon::prelude::*;
use tracing::{debug, trace};

use crate::ansi::{AnsiPalette, Prominence, SLOT_COUNT, SLOT_NAMES};
use crate::color::{Color, PackedColor};
use crate::pipeline::collect::ColorSet;
use crate::progress::{ProgressObserver, Stage};

/// Palette and prominence produced by [`match_palette`].
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub palette: AnsiPalette,
    pub prominence: Prominence,
    /// Distance of each slot's winning color to its reference, `None` when
    /// nothing matched and the slot kept its base color.
    pub best_distance: [Option<f64>; SLOT_COUNT],
}

/// Best candidate seen for one slot.
#[derive(Debug, Clone, Copy, Default)]
struct SlotMatch {
    count: u32,
    best: Option<(f64, PackedColor)>,
}

impl SlotMatch {
    fn observe(&mut self, distance: f64, color: PackedColor) {
        self.count += 1;
        if beats(distance, color, self.best) {
            self.best = Some((distance, color));
        }
    }

    fn merge(self, other: SlotMatch) -> SlotMatch {
        let best = match other.best {
            Some((d, c)) if beats(d, c, self.best) => other.best,
            _ => self.best,
        };
        SlotMatch {
            count: self.count + other.count,
            best,
        }
    }
}

/// Strictly closer wins; an exact tie goes to the smaller packed value so the
/// outcome never depends on set iteration order or how work was split.
fn beats(distance: f64, color: PackedColor, current: Option<(f64, PackedColor)>) -> bool {
    match current {
        None => true,
        Some((best, incumbent)) => distance < best || (distance == best && color < incumbent),
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Accumulator([SlotMatch; SLOT_COUNT]);

impl Accumulator {
    fn merge(mut self, other: Accumulator) -> Accumulator {
        for (mine, theirs) in self.0.iter_mut().zip(other.0) {
            *mine = mine.merge(theirs);
        }
        self
    }
}

/// Match every distinct color against every slot of `base`.
///
/// A color within `max_diff` of a slot bumps that slot's prominence, and the
/// closest such color becomes the slot's representative. Slots with no match
/// keep their base color. Each (color, slot) distance is computed once.
pub fn match_palette(
    colors: &ColorSet,
    base: &AnsiPalette,
    max_diff: f64,
    progress: &dyn ProgressObserver,
) -> MatchResult {
    progress.start(Stage::Match, colors.len());
    let references: [Color; SLOT_COUNT] = (*base.slots()).map(PackedColor::unpack);

    let acc = colors
        .inner()
        .par_iter()
        .fold(Accumulator::default, |mut acc, &color| {
            let rgb = color.unpack();
            for (slot, reference) in references.iter().enumerate() {
                let distance = reference.distance(rgb);
                if distance < max_diff {
                    acc.0[slot].observe(distance, color);
                }
            }
            progress.advance(Stage::Match, 1);
            acc
        })
        .reduce(Accumulator::default, Accumulator::merge);

    progress.finish(Stage::Match);

    let mut palette = *base;
    let mut counts = [0u32; SLOT_COUNT];
    let mut best_distance = [None; SLOT_COUNT];
    for (slot, found) in acc.0.iter().enumerate() {
        counts[slot] = found.count;
        if let Some((distance, color)) = found.best {
            trace!(
                slot,
                name = SLOT_NAMES[slot],
                from = %base[slot],
                to = %color,
                distance,
                "slot matched"
            );
            palette = palette.with_slot(slot, color);
            best_distance[slot] = Some(distance);
        }
    }

    let prominence = Prominence::new(counts);
    let matched = best_distance.iter().filter(|d| d.is_some()).count();
    debug!(
        colors = colors.len(),
        matched,
        hits = prominence.total(),
        max_diff,
        "matched palette slots"
    );

    MatchResult {
        palette,
        prominence,
        best_distance,
    }
}
