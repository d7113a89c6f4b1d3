//! Bar chart of total importance per bucket, with a marker at the weighted mean.
//!
//! [`ChartData`] is what the page and `/api/chart` consume; [`render_svg`] draws it
//! as an inline SVG document.

use crate::aggregate::Aggregation;
use crate::scale::{self, BUCKET_COUNT};
use serde::Serialize;

pub const MEAN_COLOR: &str = "#e63946";
pub const X_AXIS_TITLE: &str = "Scale (Consumption to Investment)";
pub const Y_AXIS_TITLE: &str = "Total Importance";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBar {
    pub label: String,
    pub color: &'static str,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub bars: Vec<ChartBar>,
    pub mean: f64,
    pub mean_label: String,
    /// Fraction of the bucket axis (0 at 🍰, 1 at 🚀) where the mean sits.
    pub marker_position: f64,
    pub has_data: bool,
}

impl ChartData {
    pub fn from_aggregation(aggregation: &Aggregation) -> Self {
        let bars = scale::buckets()
            .iter()
            .zip(aggregation.bucket_sums)
            .map(|(bucket, total)| ChartBar {
                label: scale::axis_label(bucket),
                color: bucket.color,
                total,
            })
            .collect();

        let mean = aggregation.weighted_mean;
        Self {
            bars,
            mean,
            mean_label: mean_label(mean),
            marker_position: marker_position(mean),
            has_data: aggregation.has_data(),
        }
    }
}

pub fn mean_label(mean: f64) -> String {
    format!("Weighted Mean: {mean:.2}")
}

/// Maps a mean in [1, 7] onto [0, 1]. The no-data sentinel 0 clamps to the left edge.
pub fn marker_position(mean: f64) -> f64 {
    if mean.is_nan() {
        return 0.0;
    }
    ((mean - 1.0) / (BUCKET_COUNT as f64 - 1.0)).clamp(0.0, 1.0)
}

const WIDTH: f64 = 720.0;
const HEIGHT: f64 = 320.0;
const LEFT: f64 = 64.0;
const RIGHT: f64 = 20.0;
const TOP: f64 = 36.0;
const BOTTOM: f64 = 64.0;
const TICKS: usize = 4;

pub fn render_svg(chart: &ChartData) -> String {
    let plot_width = WIDTH - LEFT - RIGHT;
    let plot_height = HEIGHT - TOP - BOTTOM;
    let baseline = TOP + plot_height;
    let slot = plot_width / chart.bars.len().max(1) as f64;
    let max = axis_max(chart.bars.iter().map(|bar| bar.total));
    let y = |value: f64| baseline - (value.max(0.0) / max) * plot_height;

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {WIDTH} {HEIGHT}" role="img" aria-label="{Y_AXIS_TITLE} per scale bucket">"#
    ));

    for step in 0..=TICKS {
        let value = max * step as f64 / TICKS as f64;
        let y_pos = y(value);
        svg.push_str(&format!(
            r##"<line class="chart-grid" x1="{LEFT}" y1="{y_pos:.2}" x2="{:.2}" y2="{y_pos:.2}" stroke="#eee" />"##,
            WIDTH - RIGHT
        ));
        svg.push_str(&format!(
            r##"<text class="chart-label" x="{:.2}" y="{:.2}" text-anchor="end" fill="#222">{}</text>"##,
            LEFT - 8.0,
            y_pos + 4.0,
            format_tick(value)
        ));
    }

    for (position, bar) in chart.bars.iter().enumerate() {
        let x = LEFT + slot * position as f64;
        let top = y(bar.total);
        svg.push_str(&format!(
            r#"<rect class="chart-bar" x="{:.2}" y="{top:.2}" width="{:.2}" height="{:.2}" fill="{}" rx="3"><title>{}: {}</title></rect>"#,
            x + slot * 0.15,
            slot * 0.7,
            baseline - top,
            bar.color,
            escape(&bar.label),
            format_tick(bar.total)
        ));
        svg.push_str(&format!(
            r##"<text class="chart-label" x="{:.2}" y="{:.2}" text-anchor="middle" fill="#222">{}</text>"##,
            x + slot / 2.0,
            baseline + 20.0,
            escape(&bar.label)
        ));
    }

    svg.push_str(&format!(
        r##"<line class="chart-axis" x1="{LEFT}" y1="{baseline:.2}" x2="{:.2}" y2="{baseline:.2}" stroke="#222" />"##,
        WIDTH - RIGHT
    ));
    svg.push_str(&format!(
        r##"<text class="chart-title" x="{:.2}" y="{:.2}" text-anchor="middle" fill="#222">{}</text>"##,
        LEFT + plot_width / 2.0,
        HEIGHT - 14.0,
        escape(X_AXIS_TITLE)
    ));
    svg.push_str(&format!(
        r##"<text class="chart-title" x="16" y="{:.2}" text-anchor="middle" fill="#222" transform="rotate(-90 16 {:.2})">{}</text>"##,
        TOP + plot_height / 2.0,
        TOP + plot_height / 2.0,
        escape(Y_AXIS_TITLE)
    ));

    if chart.has_data {
        // Bars are centred in their slots, so the first and last centres bound the marker.
        let x = LEFT + slot / 2.0 + chart.marker_position * (plot_width - slot);
        svg.push_str(&format!(
            r#"<line class="chart-mean" x1="{x:.2}" y1="{TOP}" x2="{x:.2}" y2="{baseline:.2}" stroke="{MEAN_COLOR}" stroke-width="3" />"#
        ));
        svg.push_str(&format!(
            r#"<text class="chart-mean-label" x="{x:.2}" y="{:.2}" text-anchor="middle" fill="{MEAN_COLOR}" font-weight="bold">{}</text>"#,
            TOP - 12.0,
            escape(&chart.mean_label)
        ));
    } else {
        svg.push_str(&format!(
            r##"<text class="chart-empty" x="{:.2}" y="{:.2}" text-anchor="middle" fill="#aaa">No data yet</text>"##,
            LEFT + plot_width / 2.0,
            TOP + plot_height / 2.0
        ));
    }

    svg.push_str("</svg>");
    svg
}

fn axis_max(totals: impl Iterator<Item = f64>) -> f64 {
    let max = totals.filter(|value| value.is_finite()).fold(0.0, f64::max);
    if max <= 0.0 { 1.0 } else { max }
}

fn format_tick(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded:.1}")
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::models::ActivityRecord;

    #[test]
    fn marker_maps_mean_range_onto_unit_interval() {
        assert_eq!(marker_position(1.0), 0.0);
        assert_eq!(marker_position(4.0), 0.5);
        assert_eq!(marker_position(7.0), 1.0);
        assert_eq!(marker_position(0.0), 0.0);
        assert_eq!(marker_position(9.0), 1.0);
        assert_eq!(marker_position(f64::NAN), 0.0);
    }

    #[test]
    fn chart_data_carries_labels_colors_and_mean() {
        let list = vec![ActivityRecord::new("Run", Some(3), 70.0)];
        let chart = ChartData::from_aggregation(&aggregate(&list));
        assert_eq!(chart.bars.len(), 7);
        assert_eq!(chart.bars[0].label, "🍰 (1)");
        assert_eq!(chart.bars[6].color, "#457b9d");
        assert_eq!(chart.bars[3].total, 70.0);
        assert_eq!(chart.mean_label, "Weighted Mean: 4.00");
        assert_eq!(chart.marker_position, 0.5);
        assert!(chart.has_data);
    }

    #[test]
    fn svg_has_one_bar_per_bucket_and_a_mean_marker() {
        let list = vec![
            ActivityRecord::new("Cake", Some(0), 10.0),
            ActivityRecord::new("Rocket", Some(6), 30.0),
        ];
        let svg = render_svg(&ChartData::from_aggregation(&aggregate(&list)));
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(svg.matches("class=\"chart-bar\"").count(), 7);
        assert_eq!(svg.matches("class=\"chart-mean\"").count(), 1);
        assert!(svg.contains("Weighted Mean: 5.50"));
        assert!(svg.contains(X_AXIS_TITLE));
    }

    #[test]
    fn empty_chart_has_no_marker() {
        let svg = render_svg(&ChartData::from_aggregation(&aggregate(&[])));
        assert!(!svg.contains("class=\"chart-mean\""));
        assert!(svg.contains("No data yet"));
    }

    #[test]
    fn ticks_drop_needless_decimals() {
        assert_eq!(format_tick(25.0), "25");
        assert_eq!(format_tick(12.5), "12.5");
        assert_eq!(format_tick(0.04), "0");
    }
}
