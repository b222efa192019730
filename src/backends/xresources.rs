use crate::pipeline::ColorScheme;

use super::ThemeBackend;

/// Default file name, relative to the output directory.
pub const XRESOURCES_FILE: &str = ".Xresources";

/// X resource database backend (`*.colorN: #rrggbb`).
pub struct XresourcesBackend;

impl ThemeBackend for XresourcesBackend {
    fn name(&self) -> &str {
        "Xresources"
    }

    fn serialize(&self, scheme: &ColorScheme) -> String {
        let choice = &scheme.choice;
        let mut out = String::new();
        out.push_str(&format!("*.foreground: {}\n", choice.foreground.to_hex()));
        out.push_str(&format!("*.background: {}\n", choice.background.to_hex()));
        out.push_str(&format!("*.cursorColor: {}\n", choice.foreground.to_hex()));
        for (i, color) in scheme.palette.iter().enumerate() {
            out.push_str(&format!("*.color{i}: {}\n", color.to_hex()));
        }
        out
    }
}
