use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::color::PackedColor;
use crate::pipeline::ColorScheme;

use super::{write_file, ThemeBackend};

pub const DEFAULT_SCRIPT_NAME: &str = "update_theme.sh";

/// GNOME Terminal profile the palette is pushed to unless told otherwise.
pub const DEFAULT_GNOME_PROFILE: &str = "ad573cac-cd69-44d4-9713-7526db576454";

/// Bash script that installs the Xresources file, reloads xrdb and i3, sets
/// the wallpaper and applies the palette to a GNOME Terminal profile.
pub struct UpdateScriptBackend {
    /// Wallpaper passed to feh.
    pub image: PathBuf,
    /// Generated Xresources file to move into `$HOME`.
    pub xresources: PathBuf,
    pub profile: String,
}

impl UpdateScriptBackend {
    pub fn new(image: impl Into<PathBuf>, xresources: impl Into<PathBuf>) -> Self {
        Self {
            image: image.into(),
            xresources: xresources.into(),
            profile: DEFAULT_GNOME_PROFILE.to_string(),
        }
    }

    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    /// `gsettings set` with the profile schema path, quoted as one word.
    fn gsettings_prefix(&self) -> String {
        let schema = format!(
            "org.gnome.Terminal.Legacy.Profile:/org/gnome/terminal/legacy/profiles:/:{}/",
            self.profile
        );
        format!("gsettings set {}", quote(&schema))
    }
}

impl ThemeBackend for UpdateScriptBackend {
    fn name(&self) -> &str {
        "update script"
    }

    fn serialize(&self, scheme: &ColorScheme) -> String {
        let fg = rgb_call(scheme.choice.foreground);
        let bg = rgb_call(scheme.choice.background);
        let palette = scheme
            .palette
            .iter()
            .map(|c| format!("'{}'", rgb_call(c)))
            .collect::<Vec<_>>()
            .join(",");
        let gsettings = self.gsettings_prefix();

        let mut out = String::new();
        out.push_str("#!/bin/bash\n");
        out.push_str(&format!("# Generated by pictheme from {:?}\n", self.image));
        out.push_str(&format!("mv {} ~/.Xresources\n", shell_quote(&self.xresources)));
        out.push_str("xrdb ~/.Xresources\n");
        out.push_str("i3-msg reload\n");
        out.push_str(&format!(
            "feh --bg-center --no-xinerama {}\n",
            shell_quote(&self.image)
        ));
        out.push_str(&format!("{gsettings} palette \"[{palette}]\"\n"));
        for (key, value) in [
            ("foreground-color", &fg),
            ("background-color", &bg),
            ("cursor-foreground-color", &fg),
            ("cursor-background-color", &fg),
            ("highlight-background-color", &fg),
            ("highlight-foreground-color", &bg),
        ] {
            out.push_str(&format!("{gsettings} {key} '{value}'\n"));
        }
        out
    }

    fn write_to(&self, scheme: &ColorScheme, path: &Path) -> Result<()> {
        write_file(path, &self.serialize(scheme))?;
        make_executable(path)
    }
}

/// `rgb(r,g,b)` as understood by gsettings.
fn rgb_call(color: PackedColor) -> String {
    let c = color.unpack();
    format!("rgb({},{},{})", c.r, c.g, c.b)
}

/// Single-quote a word for bash.
fn quote(word: &str) -> String {
    format!("'{}'", word.replace('\'', r"'\''"))
}

fn shell_quote(path: &Path) -> String {
    quote(&path.display().to_string())
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use anyhow::Context;
    use std::os::unix::fs::PermissionsExt;

    let mut perms = std::fs::metadata(path)
        .with_context(|| format!("failed to stat {}", path.display()))?
        .permissions();
    perms.set_mode(perms.mode() | 0o755);
    std::fs::set_permissions(path, perms)
        .with_context(|| format!("failed to make {} executable", path.display()))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}
