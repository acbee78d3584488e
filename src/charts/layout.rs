//! Bar Layout Module
//! Maps every entries/exits value to an absolute pixel height against the
//! shared maximum and places the bars side by side.
//!
//! Heights follow `(value / max) * scale`. When the maximum is zero (empty
//! input or all-zero values) every bar is zero height.

use crate::config::ChartConfig;
use crate::data::{DataPoint, Series};
use log::debug;

/// One drawable bar.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub series: Series,
    pub pixel_height: f64,
    /// Value shown in the label overlay.
    pub display_value: f64,
    /// Left edge, measured from the plot origin.
    pub x: f64,
    pub width: f64,
}

/// Both bars of one category, entries first.
#[derive(Debug, Clone, PartialEq)]
pub struct BarGroup {
    pub label: String,
    pub bars: [Bar; 2],
}

impl BarGroup {
    /// Horizontal center of the group, for the category label.
    pub fn center_x(&self) -> f64 {
        let left = self.bars[0].x;
        let right = self.bars[1].x + self.bars[1].width;
        (left + right) / 2.0
    }
}

/// Legend row mapping a series to its display name and color.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub series: Series,
    pub name: String,
    pub color: [u8; 3],
}

/// Everything a drawing surface needs to paint the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub groups: Vec<BarGroup>,
    pub max: f64,
    pub scale: f64,
    pub legend: Vec<LegendEntry>,
    group_gap: f64,
}

impl ChartLayout {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn bars(&self) -> impl Iterator<Item = &Bar> {
        self.groups.iter().flat_map(|g| g.bars.iter())
    }

    /// Width of the bar area including the outer gaps.
    pub fn plot_width(&self) -> f64 {
        self.groups
            .last()
            .map(|g| g.bars[1].x + g.bars[1].width + self.group_gap)
            .unwrap_or(0.0)
    }

    /// Height of the bar area; equal to the scale constant.
    pub fn plot_height(&self) -> f64 {
        self.scale
    }
}

/// Computes bar layouts from data points.
pub struct ChartRenderer;

impl ChartRenderer {
    /// Largest value across both series, or 0 for an empty sequence.
    pub fn max_value(points: &[DataPoint]) -> f64 {
        points
            .iter()
            .flat_map(|p| Series::ALL.map(|s| s.value(p)))
            .filter(|v| v.is_finite())
            .fold(0.0, f64::max)
    }

    /// Pixel height for `value`, clamped to `[0, scale]`.
    pub fn pixel_height(value: f64, max: f64, scale: f64) -> f64 {
        if !max.is_finite() || max <= 0.0 || !value.is_finite() || value <= 0.0 {
            return 0.0;
        }
        ((value / max) * scale).min(scale)
    }

    /// Build the layout for `points` in input order.
    pub fn compute_layout(points: &[DataPoint], config: &ChartConfig) -> ChartLayout {
        let max = Self::max_value(points);
        let scale = config.scale_height;
        let group_width = 2.0 * config.bar_width + config.bar_gap;

        let groups: Vec<BarGroup> = points
            .iter()
            .enumerate()
            .map(|(i, point)| {
                let group_x = config.group_gap + i as f64 * (group_width + config.group_gap);
                let bars = Series::ALL.map(|series| {
                    let value = series.value(point);
                    Bar {
                        series,
                        pixel_height: Self::pixel_height(value, max, scale),
                        display_value: value,
                        x: group_x + series.index() as f64 * (config.bar_width + config.bar_gap),
                        width: config.bar_width,
                    }
                });
                BarGroup {
                    label: point.label.clone(),
                    bars,
                }
            })
            .collect();

        let legend = Series::ALL
            .iter()
            .map(|&series| {
                let style = &config.series[series.index()];
                LegendEntry {
                    series,
                    name: style.name.clone(),
                    color: style.color,
                }
            })
            .collect();

        debug!(
            "Computed layout: {} groups, max={}, scale={}",
            groups.len(),
            max,
            scale
        );

        ChartLayout {
            groups,
            max,
            scale,
            legend,
            group_gap: config.group_gap,
        }
    }
}

/// Format a value for the label overlay, dropping a zero fraction.
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn layout(points: &[DataPoint]) -> ChartLayout {
        ChartRenderer::compute_layout(points, &ChartConfig::default())
    }

    #[test]
    fn two_month_scenario() {
        let points = vec![
            DataPoint::new("Jan", 450.0, 380.0),
            DataPoint::new("Feb", 520.0, 420.0),
        ];
        let layout = layout(&points);

        assert_eq!(layout.max, 520.0);
        let jan = &layout.groups[0].bars[0];
        assert!((jan.pixel_height - 450.0 / 520.0 * 200.0).abs() < EPS);
        assert!((jan.pixel_height - 173.08).abs() < 0.01);
        assert_eq!(layout.groups[1].bars[0].pixel_height, 200.0);
    }

    #[test]
    fn heights_follow_formula() {
        let points = crate::data::sample_data();
        let layout = layout(&points);
        let max = ChartRenderer::max_value(&points);

        for (group, point) in layout.groups.iter().zip(&points) {
            for bar in &group.bars {
                let expected = bar.series.value(point) / max * 200.0;
                assert!((bar.pixel_height - expected).abs() < EPS);
                assert_eq!(bar.display_value, bar.series.value(point));
            }
        }
    }

    #[test]
    fn max_bar_is_full_scale_and_others_below() {
        let points = vec![
            DataPoint::new("A", 10.0, 70.0),
            DataPoint::new("B", 35.0, 5.0),
        ];
        let layout = layout(&points);

        let tallest = layout
            .bars()
            .filter(|b| b.display_value == layout.max)
            .count();
        assert_eq!(tallest, 1);
        assert_eq!(layout.groups[0].bars[1].pixel_height, 200.0);
        assert!(layout.bars().all(|b| b.pixel_height <= 200.0));
    }

    #[test]
    fn preserves_input_order_entries_first() {
        let points = vec![
            DataPoint::new("Mar", 1.0, 2.0),
            DataPoint::new("Jan", 3.0, 4.0),
            DataPoint::new("Feb", 5.0, 6.0),
        ];
        let layout = layout(&points);

        let labels: Vec<&str> = layout.groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["Mar", "Jan", "Feb"]);
        for group in &layout.groups {
            assert_eq!(group.bars[0].series, Series::Entries);
            assert_eq!(group.bars[1].series, Series::Exits);
            assert!(group.bars[0].x < group.bars[1].x);
        }
    }

    #[test]
    fn empty_input_gives_empty_layout() {
        let layout = layout(&[]);
        assert!(layout.is_empty());
        assert_eq!(layout.max, 0.0);
        assert_eq!(layout.plot_width(), 0.0);
        assert_eq!(layout.legend.len(), 2);
    }

    #[test]
    fn all_zero_values_give_zero_heights() {
        let layout = layout(&[DataPoint::new("Jan", 0.0, 0.0)]);
        assert_eq!(layout.max, 0.0);
        for bar in layout.bars() {
            assert_eq!(bar.pixel_height, 0.0);
            assert!(!bar.pixel_height.is_nan());
        }
    }

    #[test]
    fn bad_values_draw_as_zero() {
        let layout = layout(&[
            DataPoint::new("Jan", f64::NAN, -4.0),
            DataPoint::new("Feb", 10.0, 5.0),
        ]);
        assert_eq!(layout.max, 10.0);
        assert_eq!(layout.groups[0].bars[0].pixel_height, 0.0);
        assert_eq!(layout.groups[0].bars[1].pixel_height, 0.0);
        assert_eq!(layout.groups[1].bars[1].pixel_height, 100.0);
    }

    #[test]
    fn custom_scale_is_respected() {
        let config = ChartConfig {
            scale_height: 300.0,
            ..ChartConfig::default()
        };
        let layout = ChartRenderer::compute_layout(&[DataPoint::new("Jan", 50.0, 100.0)], &config);
        assert_eq!(layout.plot_height(), 300.0);
        assert_eq!(layout.groups[0].bars[0].pixel_height, 150.0);
        assert_eq!(layout.groups[0].bars[1].pixel_height, 300.0);
    }

    #[test]
    fn bars_are_placed_with_gaps() {
        let config = ChartConfig::default();
        let layout = ChartRenderer::compute_layout(&crate::data::sample_data()[..2], &config);

        let first = &layout.groups[0];
        let second = &layout.groups[1];
        assert_eq!(first.bars[0].x, config.group_gap);
        assert_eq!(first.bars[1].x, config.group_gap + config.bar_width + config.bar_gap);
        assert_eq!(
            second.bars[0].x,
            first.bars[1].x + config.bar_width + config.group_gap
        );
        assert_eq!(
            layout.plot_width(),
            second.bars[1].x + config.bar_width + config.group_gap
        );
        assert!(first.center_x() > first.bars[0].x && first.center_x() < first.bars[1].x + config.bar_width);
    }

    #[test]
    fn legend_uses_series_styles() {
        let layout = layout(&[]);
        assert_eq!(layout.legend[0].series, Series::Entries);
        assert_eq!(layout.legend[0].name, "Entries");
        assert_eq!(layout.legend[1].name, "Exits");
        assert_eq!(layout.legend[1].color, [231, 76, 60]);
    }

    #[test]
    fn formats_display_values() {
        assert_eq!(format_value(450.0), "450");
        assert_eq!(format_value(12.5), "12.5");
        assert_eq!(format_value(12.345), "12.345");
    }
}
