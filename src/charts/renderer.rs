//! Static Chart Renderer
//! Draws a computed bar layout to SVG or PNG with plotters.
//!
//! Layout:
//! 1. Title centered at the top
//! 2. Legend: colored box + series name per series
//! 3. Bars at their absolute pixel heights above a shared baseline,
//!    value labels above each bar, category labels below each group

use crate::charts::{format_value, ChartLayout};
use crate::config::{ChartConfig, MAX_EXPORT_DIM};
use image::{ImageFormat, RgbImage};
use log::info;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;

const MARGIN_LEFT: u32 = 40;
const MARGIN_RIGHT: u32 = 40;
const TITLE_H: u32 = 32;
const LEGEND_H: u32 = 26;
const VALUE_LABEL_H: u32 = 18;
const MARGIN_BOTTOM: u32 = 32;
const MIN_WIDTH: u32 = 320;

const LEGEND_BOX: i32 = 12;
const LEGEND_SPACING: i32 = 110;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Drawing failed: {0}")]
    Draw(String),
    #[error("Failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),
    #[error("Failed to write file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),
}

/// Renders chart layouts to static images.
pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Canvas size for a layout, honoring any configured override.
    pub fn canvas_size(layout: &ChartLayout, config: &ChartConfig) -> (u32, u32) {
        let natural_w = (MARGIN_LEFT + MARGIN_RIGHT + layout.plot_width().ceil() as u32).max(MIN_WIDTH);
        let natural_h =
            TITLE_H + LEGEND_H + VALUE_LABEL_H + layout.plot_height().ceil() as u32 + MARGIN_BOTTOM;
        (
            config.export_width.unwrap_or(natural_w),
            config.export_height.unwrap_or(natural_h),
        )
    }

    /// Render to an SVG document.
    pub fn render_svg(layout: &ChartLayout, config: &ChartConfig) -> Result<String, RenderError> {
        let size = Self::canvas_size(layout, config);
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
            Self::draw_layout(&root, layout, config).map_err(|e| RenderError::Draw(e.to_string()))?;
        }
        Ok(svg)
    }

    /// Render to PNG bytes in memory.
    pub fn render_png_bytes(
        layout: &ChartLayout,
        config: &ChartConfig,
    ) -> Result<Vec<u8>, RenderError> {
        let (w, h) = Self::canvas_size(layout, config);
        if w == 0 || h == 0 || w > MAX_EXPORT_DIM || h > MAX_EXPORT_DIM {
            return Err(RenderError::Draw(format!("invalid canvas size {}x{}", w, h)));
        }
        let len = (w as usize)
            .checked_mul(h as usize)
            .and_then(|n| n.checked_mul(3))
            .ok_or_else(|| RenderError::Draw(format!("canvas {}x{} too large", w, h)))?;
        let mut buffer = vec![0u8; len];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (w, h)).into_drawing_area();
            Self::draw_layout(&root, layout, config).map_err(|e| RenderError::Draw(e.to_string()))?;
        }

        let img = RgbImage::from_raw(w, h, buffer)
            .ok_or_else(|| RenderError::Draw("pixel buffer size mismatch".to_string()))?;
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    /// Write the chart to `path`; the extension selects SVG or PNG.
    pub fn save(layout: &ChartLayout, config: &ChartConfig, path: &Path) -> Result<(), RenderError> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "svg" => std::fs::write(path, Self::render_svg(layout, config)?)?,
            "png" => std::fs::write(path, Self::render_png_bytes(layout, config)?)?,
            other => return Err(RenderError::UnsupportedFormat(other.to_string())),
        }

        info!("Exported chart to {}", path.display());
        Ok(())
    }

    fn draw_layout<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        layout: &ChartLayout,
        config: &ChartConfig,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        let (width, _) = root.dim_in_pixel();
        root.fill(&WHITE)?;

        // Title
        let title_style = ("sans-serif", 18)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Top));
        root.draw(&Text::new(config.title.clone(), (width as i32 / 2, 6), title_style))?;

        // Legend
        let legend_style = ("sans-serif", 12)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Left, VPos::Center));
        let legend_y = TITLE_H as i32 + LEGEND_BOX / 2;
        let mut x = (width as i32 - layout.legend.len() as i32 * LEGEND_SPACING) / 2;
        for entry in &layout.legend {
            let [r, g, b] = entry.color;
            root.draw(&Rectangle::new(
                [(x, legend_y - LEGEND_BOX / 2), (x + LEGEND_BOX, legend_y + LEGEND_BOX / 2)],
                RGBColor(r, g, b).filled(),
            ))?;
            root.draw(&Text::new(
                entry.name.clone(),
                (x + LEGEND_BOX + 6, legend_y),
                legend_style.clone(),
            ))?;
            x += LEGEND_SPACING;
        }

        if layout.is_empty() {
            let empty_style = ("sans-serif", 16)
                .into_font()
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, VPos::Center));
            let y = (TITLE_H + LEGEND_H + VALUE_LABEL_H) as i32 + layout.plot_height() as i32 / 2;
            root.draw(&Text::new("No Data", (width as i32 / 2, y), empty_style))?;
            return Ok(());
        }

        // Bars grow up from the baseline
        let origin_x = MARGIN_LEFT as i32;
        let baseline = (TITLE_H + LEGEND_H + VALUE_LABEL_H) as i32 + layout.plot_height().round() as i32;

        root.draw(&PathElement::new(
            vec![
                (origin_x, baseline),
                (origin_x + layout.plot_width().round() as i32, baseline),
            ],
            BLACK,
        ))?;

        let value_style = ("sans-serif", 11)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Bottom));
        let label_style = ("sans-serif", 12)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Top));

        for group in &layout.groups {
            for bar in &group.bars {
                let [r, g, b] = config.series[bar.series.index()].color;
                let x0 = origin_x + bar.x.round() as i32;
                let x1 = origin_x + (bar.x + bar.width).round() as i32;
                let top = baseline - bar.pixel_height.round() as i32;

                if top < baseline {
                    root.draw(&Rectangle::new(
                        [(x0, top), (x1, baseline)],
                        RGBColor(r, g, b).filled(),
                    ))?;
                }

                if config.show_values {
                    root.draw(&Text::new(
                        format_value(bar.display_value),
                        ((x0 + x1) / 2, top - 2),
                        value_style.clone(),
                    ))?;
                }
            }

            root.draw(&Text::new(
                group.label.clone(),
                (origin_x + group.center_x().round() as i32, baseline + 6),
                label_style.clone(),
            ))?;
        }

        root.present()?;
        Ok(())
    }
}
