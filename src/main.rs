use std::io::IsTerminal;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use pictheme::backends::script::UpdateScriptBackend;
use pictheme::backends::xresources::{XresourcesBackend, XRESOURCES_FILE};
use pictheme::backends::ThemeBackend;
use pictheme::cli::Args;
use pictheme::preview::render_preview;
use pictheme::progress::{NoProgress, ProgressBar, ProgressObserver};
use pictheme::{derive_scheme, load_grid};

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pictheme={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = args.scheme_config();
    if let (Some(slot), None) = (config.background_override, config.override_slot()) {
        warn!(slot, "background slot is outside 0-15, using the most prominent slot");
    }
    let grid = load_grid(&args.image)?;

    let bar = ProgressBar::new();
    let progress: &dyn ProgressObserver =
        if args.no_progress || args.stdout || !std::io::stderr().is_terminal() {
            &NoProgress
        } else {
            &bar
        };
    let scheme = derive_scheme(&grid, &config, progress)
        .with_context(|| format!("failed to derive a scheme from {}", args.image.display()))?;

    if args.preview || args.verbose >= 3 {
        eprint!("{}", render_preview(&scheme));
    }

    if args.stdout {
        print!("{}", XresourcesBackend.serialize(&scheme));
        return Ok(());
    }

    std::fs::create_dir_all(&args.output_dir).with_context(|| {
        format!(
            "failed to create output directory: {}",
            args.output_dir.display()
        )
    })?;
    let output_dir = args
        .output_dir
        .canonicalize()
        .with_context(|| format!("failed to resolve {}", args.output_dir.display()))?;
    let image = args
        .image
        .canonicalize()
        .with_context(|| format!("failed to resolve {}", args.image.display()))?;

    let xresources_path = output_dir.join(XRESOURCES_FILE);
    let script_path = output_dir.join(&args.update_script_name);
    let script = UpdateScriptBackend::new(image, &xresources_path).with_profile(&args.profile);

    XresourcesBackend.write_to(&scheme, &xresources_path)?;
    script.write_to(&scheme, &script_path)?;

    eprintln!(
        "{} written to {}. Update the theme by executing {}",
        XresourcesBackend.name(),
        xresources_path.display(),
        script_path.display()
    );
    Ok(())
}
