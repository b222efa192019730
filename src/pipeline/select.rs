use tracing::{debug, info};

use crate::ansi::{contrast_of, AnsiPalette, Prominence, SLOT_COUNT, SLOT_NAMES};
use crate::color::PackedColor;

/// Background and foreground slots with their resolved colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackgroundChoice {
    pub background_slot: usize,
    pub foreground_slot: usize,
    pub background: PackedColor,
    pub foreground: PackedColor,
    /// Whether the background came from an explicit override.
    pub overridden: bool,
}

/// Interpret a caller-supplied override. Anything outside `0..16` is "absent".
pub fn resolve_override(background_override: Option<i64>) -> Option<usize> {
    background_override
        .and_then(|slot| usize::try_from(slot).ok())
        .filter(|&slot| slot < SLOT_COUNT)
}

/// Pick the background slot, either the override or the most prominent slot,
/// and pair it with its contrast counterpart as foreground.
pub fn select_background(
    palette: &AnsiPalette,
    prominence: &Prominence,
    background_override: Option<i64>,
) -> BackgroundChoice {
    let (background_slot, overridden) = match resolve_override(background_override) {
        Some(slot) => {
            info!(slot, color = %palette[slot], "background override enabled");
            (slot, true)
        }
        None => {
            if let Some(ignored) = background_override {
                debug!(ignored, "background override outside 0..16, using prominence");
            }
            let slot = prominence.most_prominent();
            info!(
                slot,
                name = SLOT_NAMES[slot],
                color = %palette[slot],
                count = prominence[slot],
                "most prevalent slot becomes the background"
            );
            (slot, false)
        }
    };

    let foreground_slot = contrast_of(background_slot);
    BackgroundChoice {
        background_slot,
        foreground_slot,
        background: palette[background_slot],
        foreground: palette[foreground_slot],
        overridden,
    }
}
