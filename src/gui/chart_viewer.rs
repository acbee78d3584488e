//! Chart Viewer Widget
//! Central panel that paints the bar layout at absolute pixel heights, or
//! hands it to the interactive plot.

use crate::charts::{format_value, ChartLayout, ChartPlotter};
use egui::{Align2, Color32, FontId, RichText, ScrollArea, Sense, Stroke};

const PADDING_X: f32 = 30.0;
const VALUE_LABEL_H: f32 = 18.0;
const CATEGORY_LABEL_H: f32 = 24.0;
const INTERACTIVE_HEIGHT: f32 = 420.0;

/// How the layout is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Bars painted at their layout pixel heights.
    #[default]
    Fixed,
    /// Zoomable egui_plot bar chart.
    Interactive,
}

/// Displays the current chart layout.
#[derive(Default)]
pub struct ChartViewer {
    pub layout: Option<ChartLayout>,
    pub title: String,
    pub mode: ViewMode,
    pub show_values: bool,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self {
            show_values: true,
            ..Self::default()
        }
    }

    pub fn set_layout(&mut self, layout: ChartLayout) {
        self.layout = Some(layout);
    }

    /// Draw the viewer
    pub fn show(&mut self, ui: &mut egui::Ui) {
        let Some(layout) = &self.layout else {
            Self::show_no_data(ui);
            return;
        };

        ui.vertical_centered(|ui| {
            ui.label(RichText::new(&self.title).size(20.0).strong());
        });
        ui.add_space(8.0);
        Self::draw_legend(ui, layout);
        ui.add_space(12.0);

        if layout.is_empty() {
            Self::show_no_data(ui);
            return;
        }

        match self.mode {
            ViewMode::Fixed => {
                ScrollArea::horizontal()
                    .auto_shrink([false, true])
                    .show(ui, |ui| Self::paint_bars(ui, layout, self.show_values));
            }
            ViewMode::Interactive => {
                ChartPlotter::draw_bar_chart(ui, layout, INTERACTIVE_HEIGHT);
            }
        }
    }

    fn show_no_data(ui: &mut egui::Ui) {
        ui.centered_and_justified(|ui| {
            ui.label(RichText::new("No Data").size(20.0));
        });
    }

    fn draw_legend(ui: &mut egui::Ui, layout: &ChartLayout) {
        ui.horizontal(|ui| {
            for entry in &layout.legend {
                let (rect, _) = ui.allocate_exact_size(egui::vec2(16.0, 16.0), Sense::hover());
                ui.painter()
                    .rect_filled(rect, 3.0, ChartPlotter::color32(entry.color));
                ui.label(RichText::new(&entry.name).size(13.0));
                ui.add_space(12.0);
            }
        });
    }

    /// Paint bars upward from a shared baseline; one layout pixel is one point.
    fn paint_bars(ui: &mut egui::Ui, layout: &ChartLayout, show_values: bool) {
        let plot_w = layout.plot_width() as f32;
        let plot_h = layout.plot_height() as f32;
        let size = egui::vec2(
            plot_w + 2.0 * PADDING_X,
            VALUE_LABEL_H + plot_h + CATEGORY_LABEL_H,
        );
        let (response, painter) = ui.allocate_painter(size, Sense::hover());

        let text_color = ui.visuals().text_color();
        let origin_x = response.rect.left() + PADDING_X;
        let baseline = response.rect.top() + VALUE_LABEL_H + plot_h;

        painter.line_segment(
            [
                egui::pos2(origin_x, baseline),
                egui::pos2(origin_x + plot_w, baseline),
            ],
            Stroke::new(1.0, text_color),
        );

        for group in &layout.groups {
            for bar in &group.bars {
                let color = layout
                    .legend
                    .get(bar.series.index())
                    .map(|e| ChartPlotter::color32(e.color))
                    .unwrap_or(Color32::GRAY);
                let left = origin_x + bar.x as f32;
                let top = baseline - bar.pixel_height as f32;
                let rect = egui::Rect::from_min_max(
                    egui::pos2(left, top),
                    egui::pos2(left + bar.width as f32, baseline),
                );
                painter.rect_filled(rect, 0.0, color);

                if show_values {
                    painter.text(
                        egui::pos2(rect.center().x, top - 2.0),
                        Align2::CENTER_BOTTOM,
                        format_value(bar.display_value),
                        FontId::proportional(11.0),
                        text_color,
                    );
                }
            }

            painter.text(
                egui::pos2(origin_x + group.center_x() as f32, baseline + 4.0),
                Align2::CENTER_TOP,
                &group.label,
                FontId::proportional(12.0),
                text_color,
            );
        }

        response.on_hover_ui_at_pointer(|ui| {
            ui.label(format!("Max: {}", format_value(layout.max)));
        });
    }
}
