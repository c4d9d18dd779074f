//! GUI module - interactive figure display

mod app;
mod chart_viewer;

pub use app::{native_options, show_figure, DisplayError, FigureApp};
pub use chart_viewer::{subplot_height, sync_shared_axis, ChartViewer};
