//! Colored terminal preview of a derived scheme.

use crossterm::style::{Color as TermColor, Stylize};

use crate::ansi::{SLOT_COUNT, SLOT_NAMES};
use crate::color::PackedColor;
use crate::pipeline::ColorScheme;

fn to_term(color: PackedColor) -> TermColor {
    let c = color.unpack();
    TermColor::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

/// Black or white text, whichever reads better on `color`.
fn label_color(color: PackedColor) -> TermColor {
    if color.unpack().relative_luminance() > 0.4 {
        TermColor::Black
    } else {
        TermColor::White
    }
}

fn swatch(color: PackedColor, label: &str) -> String {
    label
        .with(label_color(color))
        .on(to_term(color))
        .to_string()
}

fn swatch_row(scheme: &ColorScheme, start: usize) -> String {
    let mut row = String::from("  ");
    for slot in start..start + 8 {
        row.push_str(&swatch(scheme.palette[slot], &format!("{slot:^6}")));
        row.push(' ');
    }
    row
}

/// Render the palette as two rows of swatches, the chosen background and
/// foreground, and the slots ranked by prominence.
pub fn render_preview(scheme: &ColorScheme) -> String {
    let choice = &scheme.choice;
    let mut out = String::new();

    out.push_str("  Normal\n");
    out.push_str(&format!("{}\n", swatch_row(scheme, 0)));
    out.push_str("  Bright\n");
    out.push_str(&format!("{}\n\n", swatch_row(scheme, SLOT_COUNT / 2)));

    let sample = format!(" {}/{} ", choice.foreground, choice.background);
    out.push_str(&format!(
        "  {}  background slot {} ({}), foreground slot {} ({}){}\n\n",
        sample
            .with(to_term(choice.foreground))
            .on(to_term(choice.background)),
        choice.background_slot,
        SLOT_NAMES[choice.background_slot],
        choice.foreground_slot,
        SLOT_NAMES[choice.foreground_slot],
        if choice.overridden { ", overridden" } else { "" },
    ));

    out.push_str(&format!(
        "  Color rankings ({} distinct colors, {} slot matches):\n",
        scheme.distinct_colors,
        scheme.prominence.total()
    ));
    for slot in scheme.prominence.ranking() {
        let color = scheme.palette[slot];
        out.push_str(&format!(
            "    {} {} {:<14} {}\n",
            swatch(color, "    "),
            color,
            SLOT_NAMES[slot],
            scheme.prominence[slot]
        ));
    }
    out
}
