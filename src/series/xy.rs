//! Line and scatter series.

use std::io::{self, Write};

use ndarray::Array1;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};

use super::{Series, data_block_name, write_data_block, write_title_clause, xy_columns};
use crate::error::FigureResult;
use crate::text::quote;

/// How the points of an [`XyPlot`] are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum XyStyle {
    #[default]
    Lines,
    Points,
    LinesPoints,
}

impl XyStyle {
    pub const fn command(self) -> &'static str {
        match self {
            Self::Lines => "lines",
            Self::Points => "points",
            Self::LinesPoints => "linespoints",
        }
    }
}

/// A series of (x, y) points drawn as lines and/or markers.
#[derive(Debug, Clone, PartialEq)]
pub struct XyPlot {
    uid: usize,
    x: Array1<f64>,
    y: Array1<f64>,
    style: XyStyle,
    label: Option<String>,
    line_width: Option<f64>,
    color: Option<String>,
}

/// Line plot of `y` over `x`.
pub fn lines<X: ToPrimitive, Y: ToPrimitive>(x: &[X], y: &[Y]) -> FigureResult<XyPlot> {
    XyPlot::new(x, y, XyStyle::Lines)
}

/// Scatter plot of `y` over `x`.
pub fn points<X: ToPrimitive, Y: ToPrimitive>(x: &[X], y: &[Y]) -> FigureResult<XyPlot> {
    XyPlot::new(x, y, XyStyle::Points)
}

impl XyPlot {
    pub fn new<X: ToPrimitive, Y: ToPrimitive>(
        x: &[X],
        y: &[Y],
        style: XyStyle,
    ) -> FigureResult<Self> {
        let (x, y) = xy_columns(x, y)?;
        Ok(Self {
            uid: 0,
            x,
            y,
            style,
            label: None,
            line_width: None,
            color: None,
        })
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn style(mut self, style: XyStyle) -> Self {
        self.style = style;
        self
    }

    pub fn line_width(mut self, width: f64) -> Self {
        self.line_width = Some(width);
        self
    }

    /// Gnuplot colour spec, e.g. `"dark-red"` or `"#ff7f0e"`.
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

impl Series for XyPlot {
    fn set_uid(&mut self, uid: usize) {
        self.uid = uid;
    }

    fn print_settings(&self, _out: &mut dyn Write) -> io::Result<()> {
        Ok(())
    }

    fn print_data(&self, out: &mut dyn Write) -> io::Result<()> {
        let rows = self.x.iter().copied().zip(self.y.iter().copied());
        write_data_block(out, &data_block_name("xy", self.uid), rows)
    }

    fn print_plot(&self, out: &mut dyn Write) -> io::Result<()> {
        write!(
            out,
            "{} using 1:2 with {} ",
            data_block_name("xy", self.uid),
            self.style.command()
        )?;
        if let Some(width) = self.line_width {
            write!(out, "lw {width} ")?;
        }
        if let Some(color) = &self.color {
            write!(out, "lc rgb {} ", quote(color))?;
        }
        write_title_clause(out, self.label.as_deref())
    }
}
