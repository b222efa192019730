use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::backends::script::{DEFAULT_GNOME_PROFILE, DEFAULT_SCRIPT_NAME};
use crate::config::{SchemeConfig, DEFAULT_MAX_DIFF};

/// Generate an Xresources color scheme and theme update script from an image.
#[derive(Parser, Debug)]
#[command(name = "pictheme", version, about)]
pub struct Args {
    /// Path to the input image
    pub image: PathBuf,

    /// Maximum RGB distance for an image color to count as a palette slot match
    #[arg(short = 'd', long, default_value_t = DEFAULT_MAX_DIFF, allow_negative_numbers = true)]
    pub max_diff: f64,

    /// Force the background to this palette slot (0-15); other values use the most prevalent slot
    #[arg(short, long, visible_alias = "bg", allow_negative_numbers = true)]
    pub background: Option<i64>,

    /// File name of the generated update script
    #[arg(short, long, default_value = DEFAULT_SCRIPT_NAME)]
    pub update_script_name: String,

    /// Directory the Xresources file and update script are written to
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// GNOME Terminal profile id the update script applies the palette to
    #[arg(long, default_value = DEFAULT_GNOME_PROFILE)]
    pub profile: String,

    /// Print the Xresources content to stdout instead of writing files
    #[arg(long)]
    pub stdout: bool,

    /// Print a colored terminal preview of the palette
    #[arg(long)]
    pub preview: bool,

    /// Do not draw the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace and preview)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Matcher and selector parameters taken from the command line.
    pub fn scheme_config(&self) -> SchemeConfig {
        SchemeConfig::default()
            .with_max_diff(self.max_diff)
            .with_background(self.background)
    }
}
