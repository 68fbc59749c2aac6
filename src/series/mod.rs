//! Plottable series and the contract a figure relies on to render them.
//!
//! A series contributes three kinds of script text: settings, named inline data
//! blocks, and one clause of the figure's single `plot` command. The figure
//! drives the calls in a fixed order (all settings, then all data, then the
//! plot clauses), so individual series only write their own fragment.
//!
//! # Implementing a series
//!
//! ```
//! use std::io::{self, Write};
//! use gnuplot_figure::series::{Series, data_block_name, write_data_block};
//!
//! struct Origin {
//!     uid: usize,
//! }
//!
//! impl Series for Origin {
//!     fn set_uid(&mut self, uid: usize) {
//!         self.uid = uid;
//!     }
//!
//!     fn print_settings(&self, _out: &mut dyn Write) -> io::Result<()> {
//!         Ok(())
//!     }
//!
//!     fn print_data(&self, out: &mut dyn Write) -> io::Result<()> {
//!         write_data_block(out, &data_block_name("origin", self.uid), [(0.0, 0.0)])
//!     }
//!
//!     fn print_plot(&self, out: &mut dyn Write) -> io::Result<()> {
//!         write!(out, "{} with points notitle", data_block_name("origin", self.uid))
//!     }
//! }
//! ```

pub mod boxes;
pub mod xy;

use std::io::{self, Write};
use std::sync::Arc;

use ndarray::Array1;
use num_traits::ToPrimitive;
use parking_lot::Mutex;

use crate::error::{FigureError, FigureResult};
use crate::text::quote;

pub use boxes::{Boxes, boxes, boxes_y};
pub use xy::{XyPlot, XyStyle, lines, points};

/// Core trait for everything a figure can plot.
pub trait Series: Send {
    /// Assign the identity used to name this series' data blocks.
    ///
    /// Called once per render with the series' position in the figure.
    fn set_uid(&mut self, uid: usize);

    /// Write series-specific `set ...` lines. Must not write data or plot text.
    fn print_settings(&self, out: &mut dyn Write) -> io::Result<()>;

    /// Write the series' data as one or more named inline data blocks.
    fn print_data(&self, out: &mut dyn Write) -> io::Result<()>;

    /// Write this series' clause of the `plot` command, without separator or newline.
    fn print_plot(&self, out: &mut dyn Write) -> io::Result<()>;
}

/// Shared handle to a series. The same series may be added to several figures.
pub type SeriesHandle = Arc<Mutex<dyn Series>>;

/// Wrap a series in a [`SeriesHandle`].
pub fn shared<S: Series + 'static>(series: S) -> SeriesHandle {
    Arc::new(Mutex::new(series))
}

/// Name of the data block `prefix` + `uid`, including the leading `$`.
pub fn data_block_name(prefix: &str, uid: usize) -> String {
    format!("${prefix}{uid}")
}

/// Write `rows` as an inline data block called `name`.
pub fn write_data_block<I>(out: &mut dyn Write, name: &str, rows: I) -> io::Result<()>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    writeln!(out, "{name} << EOD")?;
    for (x, y) in rows {
        writeln!(out, "{x} {y}")?;
    }
    writeln!(out, "EOD")
}

/// Write the legend part of a plot clause.
pub fn write_title_clause(out: &mut dyn Write, label: Option<&str>) -> io::Result<()> {
    match label {
        Some(label) if !label.is_empty() => write!(out, "title {}", quote(label)),
        _ => write!(out, "notitle"),
    }
}

/// Convert a slice of numbers into a column of plot coordinates.
pub(crate) fn to_column<T: ToPrimitive>(values: &[T]) -> FigureResult<Array1<f64>> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            value
                .to_f64()
                .ok_or_else(|| FigureError::invalid_data(index, "value is not representable as f64"))
        })
        .collect::<FigureResult<Vec<f64>>>()
        .map(Array1::from_vec)
}

/// Build the x/y columns of a series, checking their lengths match.
pub(crate) fn xy_columns<X, Y>(x: &[X], y: &[Y]) -> FigureResult<(Array1<f64>, Array1<f64>)>
where
    X: ToPrimitive,
    Y: ToPrimitive,
{
    if x.len() != y.len() {
        return Err(FigureError::DataLengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    }
    Ok((to_column(x)?, to_column(y)?))
}

/// X column `0, 1, 2, ...` matching `y`.
pub(crate) fn index_column(len: usize) -> Array1<f64> {
    Array1::from_iter((0..len).map(|i| i as f64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_block_format() {
        let mut out = Vec::new();
        write_data_block(&mut out, &data_block_name("boxes", 3), [(0.0, 5.0), (1.0, 6.5)])
            .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "$boxes3 << EOD\n0 5\n1 6.5\nEOD\n"
        );
    }

    #[test]
    fn test_title_clause() {
        let mut out = Vec::new();
        write_title_clause(&mut out, Some("boxes1")).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), r#"title "boxes1""#);

        for label in [None, Some("")] {
            let mut out = Vec::new();
            write_title_clause(&mut out, label).unwrap();
            assert_eq!(String::from_utf8(out).unwrap(), "notitle");
        }
    }

    #[test]
    fn test_xy_columns_accepts_mixed_numeric_types() {
        let (x, y) = xy_columns(&[0i32, 1, 2], &[5.0f32, 6.5, 7.75]).unwrap();
        assert_eq!(x.to_vec(), vec![0.0, 1.0, 2.0]);
        assert_eq!(y.to_vec(), vec![5.0, 6.5, 7.75]);
    }

    #[test]
    fn test_xy_columns_rejects_length_mismatch() {
        let err = xy_columns(&[0u8, 1, 2, 3, 4, 5, 6], &[5.0f64, 6.5]).unwrap_err();
        assert!(matches!(err, FigureError::DataLengthMismatch { x: 7, y: 2 }));
    }

    #[test]
    fn test_index_column() {
        assert_eq!(index_column(3).to_vec(), vec![0.0, 1.0, 2.0]);
        assert!(index_column(0).is_empty());
    }
}
