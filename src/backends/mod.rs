pub mod script;
pub mod xresources;

use std::path::Path;

use anyhow::{Context, Result};

use crate::pipeline::ColorScheme;

/// A consumer that turns a finished [`ColorScheme`] into a config artifact.
pub trait ThemeBackend {
    /// Human-readable backend name.
    fn name(&self) -> &str;

    /// Render the artifact in memory.
    fn serialize(&self, scheme: &ColorScheme) -> String;

    /// Write the rendered artifact to `path`.
    fn write_to(&self, scheme: &ColorScheme, path: &Path) -> Result<()> {
        write_file(path, &self.serialize(scheme))
    }
}

/// Write `content` to `path`, naming the path on failure.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content)
        .with_context(|| format!("failed to write {}", path.display()))
}
