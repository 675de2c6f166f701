use std::f64::consts::TAU;

use eframe::egui::{Color32, Stroke, Ui};
use egui_plot::{Legend, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::color::{generate_palette, to_color32, CategoryColors};
use crate::data::aggregate::{CorrelationChart, ProportionChart};

const CHART_HEIGHT: f32 = 320.0;

// ---------------------------------------------------------------------------
// Success pie
// ---------------------------------------------------------------------------

/// Render the proportion chart as filled wedges around the origin.
pub fn proportion_chart(ui: &mut Ui, chart: &ProportionChart) {
    ui.strong(&chart.title);

    let total = chart.total();
    if total == 0 {
        ui.weak("No successful launches for the current selection.");
        return;
    }

    let palette = generate_palette(chart.slices.len());
    let mut start = 0.0;

    Plot::new("success-pie-chart")
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            for (slice, fallback) in chart.slices.iter().zip(palette.iter()) {
                if slice.value == 0 {
                    continue;
                }
                let fraction = slice.value as f64 / total as f64;
                let end = start + fraction;
                let color = slice.color.map(to_color32).unwrap_or(*fallback);

                plot_ui.polygon(
                    Polygon::new(PlotPoints::new(wedge(start, end)))
                        .name(&slice.label)
                        .fill_color(color)
                        .stroke(Stroke::new(1.0, Color32::WHITE)),
                );

                let [x, y] = on_circle((start + end) / 2.0, 0.65);
                plot_ui.text(
                    Text::new(PlotPoint::new(x, y), format!("{:.1}%", fraction * 100.0))
                        .color(Color32::WHITE),
                );

                start = end;
            }
        });
}

/// Point on a circle of `radius`, where `turn` 0 is twelve o'clock and
/// angles grow clockwise.
fn on_circle(turn: f64, radius: f64) -> [f64; 2] {
    let angle = TAU * turn;
    [radius * angle.sin(), radius * angle.cos()]
}

/// Closed outline of the unit-circle wedge spanning `[start, end]` turns.
fn wedge(start: f64, end: f64) -> Vec<[f64; 2]> {
    let segments = (((end - start) * 120.0).ceil() as usize).max(2);
    let mut points = Vec::with_capacity(segments + 2);
    points.push([0.0, 0.0]);
    points.extend((0..=segments).map(|i| {
        let turn = start + (end - start) * i as f64 / segments as f64;
        on_circle(turn, 1.0)
    }));
    points
}

// ---------------------------------------------------------------------------
// Payload / success scatter
// ---------------------------------------------------------------------------

/// Render the correlation chart with one point series per booster category.
pub fn correlation_chart(ui: &mut Ui, chart: &CorrelationChart, colors: &CategoryColors) {
    ui.strong(&chart.title);

    if chart.points.is_empty() {
        ui.weak("No launches in the selected payload range.");
    }

    Plot::new("success-payload-scatter-chart")
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("class")
        .include_y(-0.1)
        .include_y(1.1)
        .allow_boxed_zoom(true)
        .show(ui, |plot_ui| {
            for category in chart.categories() {
                let points: Vec<[f64; 2]> = chart
                    .points
                    .iter()
                    .filter(|p| p.booster_category == category)
                    .map(|p| [p.payload_mass_kg, f64::from(p.class)])
                    .collect();

                plot_ui.points(
                    Points::new(PlotPoints::new(points))
                        .name(category)
                        .color(colors.color_for(category))
                        .radius(4.0),
                );
            }
        });
}
