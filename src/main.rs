// src/main.rs
use std::path::PathBuf;

use anyhow::Context as _;
use glyphline::constants::DEFAULT_FONT_DESCRIPTOR;
use glyphline::demo::{write_sheet, LABELS};
use glyphline::{CairoBackend, TextColor, TextConfig, TextContext, TextError};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_OUTPUT: &str = "glyphline-demo.png";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run() {
        error!("{:#}", e);
        // No font means no text, which this program can't do without
        let code = e.downcast_ref::<TextError>().map_or(1, TextError::exit_code);
        std::process::exit(code);
    }
}

fn run() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let output = PathBuf::from(args.next().unwrap_or_else(|| DEFAULT_OUTPUT.to_string()));
    let descriptor = args.next().unwrap_or_else(|| DEFAULT_FONT_DESCRIPTOR.to_string());

    let ctx = TextContext::new(CairoBackend::new())?;
    let config = TextConfig::new()
        .with_font(&descriptor)
        .with_color(TextColor::rgb(0xee, 0xee, 0xec));
    let font = config.open_font(&ctx)?;
    if font.is_fallback() {
        info!("Using fallback font {:?} instead of {:?}", font.descriptor(), descriptor);
    }

    write_sheet(&ctx, &font, &config, LABELS, &output)
        .with_context(|| format!("rendering {}", output.display()))?;
    ctx.close_font(font);

    info!("Wrote {}", output.display());
    Ok(())
}
