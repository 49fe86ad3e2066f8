// src/demo.rs
use cairo::{Context, Format, ImageSurface};
use thiserror::Error;

use crate::{CairoBackend, CairoFont, FontHandle, Justify, Rect, TextConfig, TextContext};

pub const SHEET_WIDTH: i32 = 360;
const MARGIN: i32 = 10;
const ROW_GAP: i32 = 6;

#[derive(Error, Debug)]
pub enum DemoError {
    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("PNG output failed: {0}")]
    Png(#[from] cairo::IoError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One row of the demo sheet
#[derive(Debug, Clone, Copy)]
pub struct DemoLabel {
    pub text: &'static str,
    pub width: i32,
    pub justify: Justify,
    /// Shadow tint, `None` for no shadow
    pub tint: Option<i32>,
}

pub const LABELS: &[DemoLabel] = &[
    DemoLabel { text: "Short title", width: 340, justify: Justify::Left, tint: None },
    DemoLabel { text: "Short title", width: 340, justify: Justify::Center, tint: Some(50) },
    DemoLabel { text: "Short title", width: 340, justify: Justify::Right, tint: Some(-60) },
    DemoLabel {
        text: "A window title that is far too long for the space it has been given",
        width: 200,
        justify: Justify::Left,
        tint: Some(40),
    },
    DemoLabel {
        text: "Ünïcödé wíndow tîtle with accents everywhere",
        width: 150,
        justify: Justify::Center,
        tint: None,
    },
    DemoLabel { text: "Narrow", width: 12, justify: Justify::Left, tint: None },
];

/// Render every label in `labels` under each other, with its target
/// rectangle outlined
pub fn render_sheet(
    ctx: &TextContext<CairoBackend>,
    font: &FontHandle<CairoFont>,
    config: &TextConfig,
    labels: &[DemoLabel],
) -> Result<ImageSurface, DemoError> {
    // Every row leaves room for a shadow so rows line up
    let row_height = font.line_height(true, config.shadow_offset);
    let height = MARGIN * 2 + labels.len() as i32 * (row_height + ROW_GAP);
    let surface = ImageSurface::create(Format::ARgb32, SHEET_WIDTH, height.max(1))?;
    let mut cr = Context::new(&surface)?;

    cr.set_source_rgb(0.18, 0.2, 0.25);
    cr.paint()?;

    for (i, label) in labels.iter().enumerate() {
        let rect = Rect::new(MARGIN, MARGIN + i as i32 * (row_height + ROW_GAP), label.width, row_height);

        cr.set_source_rgba(1.0, 1.0, 1.0, 0.25);
        cr.set_line_width(1.0);
        cr.rectangle(rect.x as f64 - 0.5, rect.y as f64 - 0.5, rect.width as f64 + 1.0, rect.height as f64 + 1.0);
        cr.stroke()?;

        let style = match label.tint {
            Some(tint) => config.clone().with_shadow(config.shadow_offset, tint),
            None => config.clone().without_shadow(),
        }
        .with_justify(label.justify);

        ctx.draw(&mut cr, &style.request(font, label.text, rect));
    }

    drop(cr);
    surface.flush();
    Ok(surface)
}

/// Render `labels` and write the sheet as PNG to `path`
pub fn write_sheet(
    ctx: &TextContext<CairoBackend>,
    font: &FontHandle<CairoFont>,
    config: &TextConfig,
    labels: &[DemoLabel],
    path: &std::path::Path,
) -> Result<(), DemoError> {
    let surface = render_sheet(ctx, font, config, labels)?;
    let mut file = std::fs::File::create(path)?;
    surface.write_to_png(&mut file)?;
    Ok(())
}
