//! Figure Module
//! Builds the stacked voltage traces as an owned figure, independent of how it is shown.
//!
//! Layout:
//! 1. One subplot per column after the time column, top to bottom in header order
//! 2. Every subplot shares a single x-axis view
//! 3. Only the bottom subplot carries the time label

use crate::charts::palette::{color_at, NamedColor};
use crate::data::{TableError, TimeSeriesTable};
use std::cell::Cell;
use std::rc::Rc;
use thiserror::Error;
use tracing::debug;

pub const VOLTAGE_LABEL: &str = "Voltage\n(mV)";
pub const TIME_LABEL: &str = "Time (ms)";

/// Fraction of the data span added on each side of an axis.
const AXIS_MARGIN: f64 = 0.05;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Table(#[from] TableError),
    /// Every entry of a value column is text. Such columns are rejected rather
    /// than drawn on a categorical axis as general-purpose plotting tools do.
    #[error("Column '{0}' has no numeric values to plot")]
    NonNumericColumn(String),
    #[error("Drawing failed: {0}")]
    Backend(String),
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),
}

/// Sizes and fonts. Fixed width, height grows with the number of subplots.
#[derive(Debug, Clone, PartialEq)]
pub struct FigureStyle {
    pub width: u32,
    pub subplot_height: u32,
    /// Smallest subplot height the interactive viewer will squeeze to.
    pub min_subplot_height: f32,
    pub font_size: f32,
    pub line_width: f32,
}

impl Default for FigureStyle {
    fn default() -> Self {
        Self {
            width: 1000,
            subplot_height: 220,
            min_subplot_height: 120.0,
            font_size: 11.0,
            line_width: 1.5,
        }
    }
}

/// Closed interval on one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Range covering `values` with a margin on both ends.
    pub fn padded<I: IntoIterator<Item = f64>>(values: I) -> Self {
        let (min, max) = values
            .into_iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });

        if min.is_infinite() || max.is_infinite() {
            return Self::new(0.0, 1.0);
        }
        if min == max {
            return Self::new(min - 0.5, max + 0.5);
        }

        let pad = (max - min) * AXIS_MARGIN;
        Self::new(min - pad, max + pad)
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn approx_eq(&self, other: &AxisRange) -> bool {
        let tolerance = self.span().abs().max(1.0) * 1e-9;
        (self.min - other.min).abs() <= tolerance && (self.max - other.max).abs() <= tolerance
    }
}

/// The time axis shared by every subplot of a figure.
///
/// Clones refer to the same view, so a pan or zoom applied through one
/// subplot is seen by all of them.
#[derive(Debug, Clone)]
pub struct SharedXAxis {
    home: AxisRange,
    view: Rc<Cell<AxisRange>>,
}

impl SharedXAxis {
    pub fn new(home: AxisRange) -> Self {
        Self {
            home,
            view: Rc::new(Cell::new(home)),
        }
    }

    pub fn home(&self) -> AxisRange {
        self.home
    }

    pub fn view(&self) -> AxisRange {
        self.view.get()
    }

    pub fn set_view(&self, range: AxisRange) {
        self.view.set(range);
    }

    pub fn reset(&self) {
        self.view.set(self.home);
    }

    /// Whether two handles belong to the same figure.
    pub fn is_shared_with(&self, other: &SharedXAxis) -> bool {
        Rc::ptr_eq(&self.view, &other.view)
    }
}

/// One stacked trace.
#[derive(Debug, Clone)]
pub struct Subplot {
    /// Index of the source column in the table.
    pub column_index: usize,
    pub title: String,
    pub y_label: String,
    pub x_label: Option<String>,
    pub color: NamedColor,
    pub values: Vec<Option<f64>>,
    pub y_range: AxisRange,
    x_axis: SharedXAxis,
}

impl Subplot {
    pub fn x_axis(&self) -> &SharedXAxis {
        &self.x_axis
    }

    /// Current x view, identical across the figure.
    pub fn x_limits(&self) -> AxisRange {
        self.x_axis.view()
    }

    /// Contiguous runs of `[row, value]` points; missing values split runs.
    pub fn segments(&self) -> Vec<Vec<[f64; 2]>> {
        let mut segments = Vec::new();
        let mut current = Vec::new();

        for (row, value) in self.values.iter().enumerate() {
            match value {
                Some(v) => current.push([row as f64, *v]),
                None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
                None => {}
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }

        segments
    }
}

/// Stacked subplots ready to be shown or exported.
#[derive(Debug, Clone)]
pub struct Figure {
    pub style: FigureStyle,
    subplots: Vec<Subplot>,
    x_axis: SharedXAxis,
}

impl Figure {
    pub fn subplots(&self) -> &[Subplot] {
        &self.subplots
    }

    pub fn len(&self) -> usize {
        self.subplots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subplots.is_empty()
    }

    pub fn x_axis(&self) -> &SharedXAxis {
        &self.x_axis
    }

    /// Pixel size of the whole figure.
    pub fn size(&self) -> (u32, u32) {
        let rows = self.subplots.len().max(1) as u32;
        (self.style.width, self.style.subplot_height * rows)
    }
}

/// Turns a loaded table into a [`Figure`].
pub struct FigureBuilder {
    style: FigureStyle,
}

impl Default for FigureBuilder {
    fn default() -> Self {
        Self::new(FigureStyle::default())
    }
}

impl FigureBuilder {
    pub fn new(style: FigureStyle) -> Self {
        Self { style }
    }

    pub fn build(&self, table: &TimeSeriesTable) -> Result<Figure, RenderError> {
        let rows = table.row_count();
        let x_axis = SharedXAxis::new(AxisRange::padded((0..rows).map(|r| r as f64)));

        let columns = table.value_columns();
        let last = columns.len();
        let mut subplots = Vec::with_capacity(last);

        for (position, (index, header)) in columns.into_iter().enumerate() {
            let values = table.values(index)?;
            if rows > 0 && values.iter().all(Option::is_none) {
                return Err(RenderError::NonNumericColumn(header));
            }

            let y_range = AxisRange::padded(values.iter().flatten().copied());
            let x_label = (position + 1 == last).then(|| TIME_LABEL.to_string());

            debug!(column = index, title = %header, "adding subplot");

            subplots.push(Subplot {
                column_index: index,
                title: header,
                y_label: VOLTAGE_LABEL.to_string(),
                x_label,
                color: color_at(index - 1),
                values,
                y_range,
                x_axis: x_axis.clone(),
            });
        }

        Ok(Figure {
            style: self.style.clone(),
            subplots,
            x_axis,
        })
    }
}
