//! Chart Plotter Module
//! Interactive entries/exits view using egui_plot.

use crate::charts::ChartLayout;
use crate::data::Series;
use egui::Color32;
use egui_plot::{Bar, BarChart, Legend, Plot};

/// Half the distance between the two bars of a category, in category units.
const BAR_OFFSET: f64 = 0.2;
const BAR_WIDTH: f64 = 0.38;

/// Creates interactive bar charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn color32(rgb: [u8; 3]) -> Color32 {
        Color32::from_rgb(rgb[0], rgb[1], rgb[2])
    }

    /// Horizontal plot position of a series bar for category `index`.
    pub fn bar_position(index: usize, series: Series) -> f64 {
        match series {
            Series::Entries => index as f64 - BAR_OFFSET,
            Series::Exits => index as f64 + BAR_OFFSET,
        }
    }

    /// Draw the grouped bar chart. Values are plotted unscaled so the
    /// y axis reads in data units.
    pub fn draw_bar_chart(ui: &mut egui::Ui, layout: &ChartLayout, height: f32) {
        let x_labels: Vec<String> = layout.groups.iter().map(|g| g.label.clone()).collect();

        Plot::new("entries_exits_plot")
            .height(height)
            .legend(Legend::default())
            .allow_scroll(false)
            .include_y(0.0)
            .y_axis_label("Value")
            .x_axis_formatter(move |mark, _range| {
                let v = mark.value;
                if v.fract() != 0.0 || v < 0.0 {
                    return String::new();
                }
                x_labels.get(v as usize).cloned().unwrap_or_default()
            })
            .show(ui, |plot_ui| {
                for entry in &layout.legend {
                    let color = Self::color32(entry.color);
                    let bars: Vec<Bar> = layout
                        .groups
                        .iter()
                        .enumerate()
                        .map(|(i, group)| {
                            let bar = &group.bars[entry.series.index()];
                            Bar::new(Self::bar_position(i, entry.series), bar.display_value)
                                .width(BAR_WIDTH)
                                .name(&group.label)
                        })
                        .collect();

                    plot_ui.bar_chart(BarChart::new(bars).color(color).name(&entry.name));
                }
            });
    }
}
