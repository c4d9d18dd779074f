//! Chart Viewer Widget
//! Scrollable stack of egui_plot subplots driven by the figure's shared time axis.

use crate::charts::{AxisRange, Figure, SharedXAxis, Subplot};
use egui::{RichText, ScrollArea};
use egui_plot::{Line, Plot, PlotBounds, PlotPoints};

const SUBPLOT_SPACING: f32 = 6.0;
/// Height taken by a subplot title row.
const TITLE_HEIGHT: f32 = 20.0;

/// Stacked subplot display.
pub struct ChartViewer {
    figure: Figure,
}

impl ChartViewer {
    pub fn new(figure: Figure) -> Self {
        Self { figure }
    }

    pub fn figure(&self) -> &Figure {
        &self.figure
    }

    /// Draw every subplot, sharing the available height evenly.
    ///
    /// Returns the x range each subplot was drawn with, top to bottom.
    pub fn show(&self, ui: &mut egui::Ui) -> Vec<AxisRange> {
        if self.figure.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return Vec::new();
        }

        let plot_height = subplot_height(
            ui.available_height(),
            self.figure.len(),
            self.figure.style.min_subplot_height,
        );
        let font_size = self.figure.style.font_size;
        let line_width = self.figure.style.line_width;

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let mut drawn = Vec::with_capacity(self.figure.len());
                for subplot in self.figure.subplots() {
                    let view = subplot.x_limits();
                    let (seen, double_clicked) =
                        Self::draw_subplot(ui, subplot, view, plot_height, font_size, line_width);
                    drawn.push(view);

                    if sync_shared_axis(subplot.x_axis(), view, seen, double_clicked) {
                        // subplots above this one were drawn with the old view
                        ui.ctx().request_repaint();
                    }
                    ui.add_space(SUBPLOT_SPACING);
                }
                drawn
            })
            .inner
    }

    /// Draw one subplot over `view`. Returns the x range the plot ended the
    /// frame with and whether it was double-clicked.
    fn draw_subplot(
        ui: &mut egui::Ui,
        subplot: &Subplot,
        view: AxisRange,
        height: f32,
        font_size: f32,
        line_width: f32,
    ) -> (AxisRange, bool) {
        let y = subplot.y_range;
        let color = subplot.color.to_color32();

        ui.vertical_centered(|ui| {
            ui.label(RichText::new(&subplot.title).size(font_size + 2.0).strong());
        });

        let mut plot = Plot::new(("subplot", subplot.column_index))
            .height(height)
            .y_axis_label(subplot.y_label.clone())
            .allow_zoom([true, false])
            .allow_drag([true, false])
            .allow_scroll(false)
            .allow_double_click_reset(false);
        if let Some(label) = &subplot.x_label {
            plot = plot.x_axis_label(label.clone());
        }

        let response = plot.show(ui, |plot_ui| {
            plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                [view.min, y.min],
                [view.max, y.max],
            ));
            for segment in subplot.segments() {
                plot_ui.line(
                    Line::new(PlotPoints::from_iter(segment))
                        .color(color)
                        .width(line_width)
                        .name(&subplot.title),
                );
            }
        });

        let bounds = response.transform.bounds();
        let seen = AxisRange::new(bounds.min()[0], bounds.max()[0]);
        (seen, response.response.double_clicked())
    }
}

/// Push a plot's end-of-frame x range into the shared axis.
///
/// `drawn` is the view the plot started the frame with and `seen` the one it
/// ended with after drag or zoom. Returns true if the shared view changed.
pub fn sync_shared_axis(
    axis: &SharedXAxis,
    drawn: AxisRange,
    seen: AxisRange,
    double_clicked: bool,
) -> bool {
    if double_clicked {
        axis.reset();
        return true;
    }
    if seen.approx_eq(&drawn) {
        return false;
    }
    axis.set_view(seen);
    true
}

/// Even share of `available` per subplot after titles and spacing, never below `min`.
pub fn subplot_height(available: f32, count: usize, min: f32) -> f32 {
    if count == 0 {
        return available.max(min);
    }
    let chrome = (TITLE_HEIGHT + SUBPLOT_SPACING) * count as f32;
    ((available - chrome) / count as f32).max(min)
}
