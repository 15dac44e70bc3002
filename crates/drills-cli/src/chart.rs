//! SVG rendering of a bubble layout with `plotters`.

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use drills_logic::bubble::BubbleLayout;
use drills_logic::config::ChartSettings;
use plotters::prelude::*;
use tracing::info;

const FONT: &str = "sans-serif";

/// Draw `layout` to an SVG file at `path`, creating parent directories.
pub fn render(layout: &BubbleLayout, settings: &ChartSettings, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    draw(layout, settings, path)
        .map_err(|e| anyhow!("Failed to draw chart {}: {e}", path.display()))?;
    info!(path = %path.display(), markers = layout.markers.len(), "wrote bubble chart");
    Ok(())
}

fn draw(
    layout: &BubbleLayout,
    settings: &ChartSettings,
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = SVGBackend::new(path, (settings.width, settings.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let (x0, x1) = layout.x_range;
    let (y0, y1) = layout.y_range;
    let mut chart = ChartBuilder::on(&root)
        .caption(&layout.title, (FONT, 24))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x0..x1, y0..y1)?;
    chart.configure_mesh().draw()?;

    let fill = BLUE.mix(0.45).filled();
    chart.draw_series(layout.markers.iter().map(|m| {
        // keep the smallest bubbles visible
        let r = m.radius.round().max(1.0) as i32;
        EmptyElement::at((m.x, m.y))
            + Circle::new((0, 0), r, fill)
            + Text::new(m.label.clone(), (r + 3, -6), (FONT, 13).into_font())
    }))?;

    root.present()?;
    Ok(())
}
