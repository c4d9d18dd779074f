//! Figure Window
//! Native window hosting the chart viewer. Blocks until the user closes it.

use crate::charts::Figure;
use crate::gui::ChartViewer;
use eframe::egui;
use thiserror::Error;
use tracing::{info, warn};

/// Tallest initial window, the viewer scrolls beyond this.
const MAX_WINDOW_HEIGHT: f32 = 900.0;
const MIN_WINDOW_SIZE: [f32; 2] = [480.0, 320.0];

#[derive(Error, Debug)]
pub enum DisplayError {
    #[error("Failed to start plot viewer: {0}")]
    Viewer(String),
}

/// Main application window.
pub struct FigureApp {
    chart_viewer: ChartViewer,
}

impl FigureApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, figure: Figure) -> Self {
        Self {
            chart_viewer: ChartViewer::new(figure),
        }
    }
}

impl eframe::App for FigureApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}

/// Show the figure and block until the window is closed.
///
/// Without a display server there is nothing to show; the call logs a
/// warning and returns immediately.
pub fn show_figure(figure: Figure, title: &str) -> Result<(), DisplayError> {
    if !display_available() {
        warn!("no display available, figure cannot be shown");
        return Ok(());
    }

    let options = native_options(&figure, title);
    info!(subplots = figure.len(), "opening plot window");

    eframe::run_native(
        title,
        options,
        Box::new(move |cc| Ok(Box::new(FigureApp::new(cc, figure)))),
    )
    .map_err(|e| DisplayError::Viewer(e.to_string()))
}

/// Window sized to the figure, capped in height.
pub fn native_options(figure: &Figure, title: &str) -> eframe::NativeOptions {
    let (width, height) = figure.size();
    let inner = [width as f32, (height as f32).min(MAX_WINDOW_HEIGHT)];

    eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(inner)
            .with_min_inner_size(MIN_WINDOW_SIZE)
            .with_title(title),
        ..Default::default()
    }
}

#[cfg(all(unix, not(target_os = "macos")))]
fn display_available() -> bool {
    ["DISPLAY", "WAYLAND_DISPLAY"]
        .iter()
        .any(|var| std::env::var_os(var).is_some_and(|v| !v.is_empty()))
}

#[cfg(not(all(unix, not(target_os = "macos"))))]
fn display_available() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::FigureBuilder;
    use crate::data::DataLoader;

    fn figure(value_columns: usize) -> Figure {
        let headers: Vec<String> = (0..=value_columns).map(|i| format!("c{i}")).collect();
        let row: Vec<String> = (0..=value_columns).map(|i| i.to_string()).collect();
        let text = format!("{}\n{}\n", headers.join(" "), row.join(" "));
        FigureBuilder::default()
            .build(&DataLoader::parse_table(&text).unwrap())
            .unwrap()
    }

    #[test]
    fn window_matches_small_figure() {
        let options = native_options(&figure(2), "run.dat");
        assert_eq!(
            options.viewport.inner_size,
            Some(egui::vec2(1000.0, 440.0))
        );
        assert_eq!(options.viewport.title.as_deref(), Some("run.dat"));
    }

    #[test]
    fn window_height_is_capped() {
        let options = native_options(&figure(8), "run.dat");
        assert_eq!(
            options.viewport.inner_size,
            Some(egui::vec2(1000.0, MAX_WINDOW_HEIGHT))
        );
    }
}
