//! Box (bar) chart series.

use std::io::{self, Write};

use ndarray::Array1;
use num_traits::ToPrimitive;

use super::{Series, data_block_name, index_column, to_column, write_data_block, write_title_clause, xy_columns};
use crate::error::FigureResult;

/// Bars centred on each x value with height y.
#[derive(Debug, Clone, PartialEq)]
pub struct Boxes {
    uid: usize,
    x: Array1<f64>,
    y: Array1<f64>,
    label: Option<String>,
    box_width: f64,
    relative_box_width: bool,
    fill_opacity: f64,
}

/// Box chart of `y` over `x`.
pub fn boxes<X: ToPrimitive, Y: ToPrimitive>(x: &[X], y: &[Y]) -> FigureResult<Boxes> {
    let (x, y) = xy_columns(x, y)?;
    Ok(Boxes::from_columns(x, y))
}

/// Box chart of `y` over the positions `0, 1, 2, ...`.
///
/// Pairs naturally with [`Figure::xtics`](crate::Figure::xtics) to name each box.
pub fn boxes_y<Y: ToPrimitive>(y: &[Y]) -> FigureResult<Boxes> {
    let y = to_column(y)?;
    Ok(Boxes::from_columns(index_column(y.len()), y))
}

impl Boxes {
    pub fn from_columns(x: Array1<f64>, y: Array1<f64>) -> Self {
        Self {
            uid: 0,
            x,
            y,
            label: None,
            box_width: 0.75,
            relative_box_width: true,
            fill_opacity: 0.5,
        }
    }

    /// Legend entry for this series.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn box_width(mut self, width: f64) -> Self {
        self.box_width = width;
        self
    }

    /// Interpret the box width as a fraction of the x spacing (`true`) or in x units (`false`).
    pub fn relative_box_width(mut self, relative: bool) -> Self {
        self.relative_box_width = relative;
        self
    }

    pub fn fill_opacity(mut self, opacity: f64) -> Self {
        self.fill_opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    fn block_name(&self) -> String {
        data_block_name("boxes", self.uid)
    }
}

impl Series for Boxes {
    fn set_uid(&mut self, uid: usize) {
        self.uid = uid;
    }

    /// Only a relative width is a setting. Gnuplot keeps a single `boxwidth`,
    /// so relative widths are shared by every box series in the figure and the
    /// last one rendered applies.
    fn print_settings(&self, out: &mut dyn Write) -> io::Result<()> {
        if self.relative_box_width {
            writeln!(out, "set boxwidth {} relative", self.box_width)?;
        }
        Ok(())
    }

    fn print_data(&self, out: &mut dyn Write) -> io::Result<()> {
        let rows = self.x.iter().copied().zip(self.y.iter().copied());
        write_data_block(out, &self.block_name(), rows)
    }

    fn print_plot(&self, out: &mut dyn Write) -> io::Result<()> {
        write!(out, "{} using 1:2", self.block_name())?;
        if !self.relative_box_width {
            write!(out, ":({})", self.box_width)?;
        }
        write!(out, " with boxes fs solid {} ", self.fill_opacity)?;
        write_title_clause(out, self.label.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render<F: Fn(&Boxes, &mut dyn Write) -> io::Result<()>>(series: &Boxes, f: F) -> String {
        let mut out = Vec::new();
        f(series, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_settings() {
        let b = boxes(&[0, 1], &[1.0, 2.0]).unwrap();
        assert_eq!(
            render(&b, |s, o| s.print_settings(o)),
            "set boxwidth 0.75 relative\n"
        );

        let b = b.relative_box_width(false).box_width(0.4).fill_opacity(2.0);
        assert_eq!(render(&b, |s, o| s.print_settings(o)), "");
        assert_eq!(
            render(&b, |s, o| s.print_plot(o)),
            "$boxes0 using 1:2:(0.4) with boxes fs solid 1 notitle"
        );
    }

    #[test]
    fn test_widths_and_fills_stay_per_series() {
        let wide = boxes_y(&[1.0]).unwrap().relative_box_width(false).box_width(0.9);
        let mut narrow = boxes_y(&[2.0])
            .unwrap()
            .relative_box_width(false)
            .box_width(0.2)
            .fill_opacity(0.8);
        narrow.set_uid(1);

        assert_eq!(render(&wide, |s, o| s.print_settings(o)), "");
        assert_eq!(render(&narrow, |s, o| s.print_settings(o)), "");
        assert_eq!(
            render(&wide, |s, o| s.print_plot(o)),
            "$boxes0 using 1:2:(0.9) with boxes fs solid 0.5 notitle"
        );
        assert_eq!(
            render(&narrow, |s, o| s.print_plot(o)),
            "$boxes1 using 1:2:(0.2) with boxes fs solid 0.8 notitle"
        );
    }

    #[test]
    fn test_data_uses_uid() {
        let mut b = boxes(&[3, 4], &[3.0, 6.5]).unwrap();
        b.set_uid(1);
        assert_eq!(
            render(&b, |s, o| s.print_data(o)),
            "$boxes1 << EOD\n3 3\n4 6.5\nEOD\n"
        );
    }

    #[test]
    fn test_plot_clause() {
        let mut b = boxes_y(&[5.0, 6.5]).unwrap().label("boxes with names");
        b.set_uid(2);
        assert_eq!(
            render(&b, |s, o| s.print_plot(o)),
            r#"$boxes2 using 1:2 with boxes fs solid 0.5 title "boxes with names""#
        );
    }

    #[test]
    fn test_boxes_y_indexes_from_zero() {
        let b = boxes_y(&[5u32, 6, 7]).unwrap();
        assert_eq!(b.len(), 3);
        assert_eq!(
            render(&b, |s, o| s.print_data(o)),
            "$boxes0 << EOD\n0 5\n1 6\n2 7\nEOD\n"
        );
        assert_eq!(render(&b, |s, o| s.print_plot(o)), "$boxes0 using 1:2 with boxes fs solid 0.5 notitle");
    }
}
