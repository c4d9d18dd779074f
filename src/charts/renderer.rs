//! Static Chart Renderer
//! Writes a figure to SVG or PNG with plotters.
//!
//! Layout:
//! 1. Figure height split evenly into one row per subplot
//! 2. Each row: caption with the column header, y label, mesh, trace
//! 3. Bottom row only: time label under the x-axis

use crate::charts::figure::{Figure, FigureStyle, RenderError, Subplot};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;
use tracing::info;

const FONT_FAMILY: &str = "sans-serif";
const Y_LABEL_AREA: u32 = 70;
const X_LABEL_AREA: u32 = 45;
const X_TICK_AREA: u32 = 25;
const MARGIN: u32 = 8;

/// Output formats chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Svg,
    Png,
}

impl ExportFormat {
    pub fn from_path(path: &Path) -> Result<Self, RenderError> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            _ => Err(RenderError::UnsupportedFormat(ext)),
        }
    }
}

/// Which parts of a subplot get drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Annotations {
    /// Captions, axis labels and ticks along with the traces.
    Full,
    /// Traces only; no text is laid out.
    TracesOnly,
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render the figure into an in-memory SVG document.
    pub fn render_svg(figure: &Figure) -> Result<String, RenderError> {
        let mut buf = String::new();
        {
            let root = SVGBackend::with_string(&mut buf, figure.size()).into_drawing_area();
            Self::draw_figure(&root, figure, Annotations::Full)?;
        }
        Ok(buf)
    }

    /// Save the figure, picking the format from the extension.
    pub fn save(figure: &Figure, path: impl AsRef<Path>) -> Result<(), RenderError> {
        let path = path.as_ref();
        let format = ExportFormat::from_path(path)?;

        match format {
            ExportFormat::Svg => {
                let root = SVGBackend::new(path, figure.size()).into_drawing_area();
                Self::draw_figure(&root, figure, Annotations::Full)?;
            }
            ExportFormat::Png => {
                let root = BitMapBackend::new(path, figure.size()).into_drawing_area();
                Self::draw_figure(&root, figure, Annotations::Full)?;
            }
        }

        info!(path = %path.display(), ?format, subplots = figure.len(), "figure saved");
        Ok(())
    }

    fn draw_figure<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        figure: &Figure,
        annotations: Annotations,
    ) -> Result<(), RenderError> {
        root.fill(&WHITE).map_err(backend_error)?;

        let rows = figure.len();
        if rows > 0 {
            let areas = root.split_evenly((rows, 1));
            for (area, subplot) in areas.iter().zip(figure.subplots()) {
                Self::draw_subplot(area, subplot, &figure.style, annotations)?;
            }
        }

        root.present().map_err(backend_error)
    }

    fn draw_subplot<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        subplot: &Subplot,
        style: &FigureStyle,
        annotations: Annotations,
    ) -> Result<(), RenderError> {
        let x = subplot.x_limits();
        let y = subplot.y_range;
        let color = subplot.color.to_rgb_color();
        let font = style.font_size as f64;
        let stroke = (style.line_width.round() as u32).max(1);

        let mut builder = ChartBuilder::on(area);
        builder
            .margin(MARGIN)
            .x_label_area_size(x_label_area(subplot))
            .y_label_area_size(Y_LABEL_AREA);
        if annotations == Annotations::Full {
            builder.caption(&subplot.title, (FONT_FAMILY, font * 1.2));
        }
        let mut chart = builder
            .build_cartesian_2d(x.min..x.max, y.min..y.max)
            .map_err(backend_error)?;

        if annotations == Annotations::Full {
            // plotters draws axis descriptions on a single line
            let y_desc = subplot.y_label.replace('\n', " ");
            let mut mesh = chart.configure_mesh();
            mesh.disable_mesh()
                .label_style((FONT_FAMILY, font))
                .y_desc(y_desc.as_str());
            if let Some(label) = &subplot.x_label {
                mesh.x_desc(label.as_str());
            }
            mesh.draw().map_err(backend_error)?;
        }

        for segment in subplot.segments() {
            chart
                .draw_series(LineSeries::new(
                    segment.into_iter().map(|[px, py]| (px, py)),
                    color.stroke_width(stroke),
                ))
                .map_err(backend_error)?;
        }

        Ok(())
    }
}

/// Room under the plot: the bottom subplot also holds the time label.
fn x_label_area(subplot: &Subplot) -> u32 {
    if subplot.x_label.is_some() {
        X_LABEL_AREA
    } else {
        X_TICK_AREA
    }
}

fn backend_error<E>(err: DrawingAreaErrorKind<E>) -> RenderError
where
    E: std::error::Error + Send + Sync,
{
    RenderError::Backend(err.to_string())
}
