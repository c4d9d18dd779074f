//! Charts module - figure building and static rendering

mod figure;
mod palette;
mod renderer;

pub use figure::{
    AxisRange, Figure, FigureBuilder, FigureStyle, RenderError, SharedXAxis, Subplot, TIME_LABEL,
    VOLTAGE_LABEL,
};
pub use palette::{color_at, NamedColor, PALETTE};
pub use renderer::{ExportFormat, StaticChartRenderer};
