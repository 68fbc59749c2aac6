//! Two box series shown in a gnuplot window and saved as a script, then a
//! second figure with named tics.
//!
//! Run with `cargo run --example boxes` (requires gnuplot on the PATH).

use gnuplot_figure::{Figure, FigureResult, series::{boxes, boxes_y}};

fn main() -> FigureResult<()> {
    let xdata = [0, 1, 2, 3, 4];
    let ydata = [5.0f32, 6.5, 7.8, 6.0, 7.0];

    let x2data = [3, 4, 5, 7, 8];
    let y2data = [3.0f32, 6.5, 9.8, 10.0, 2.0];

    let mut fig = Figure::new("Boxes");
    fig.add(boxes(&xdata, &ydata)?.label("boxes1"));
    fig.add(boxes(&x2data, &y2data)?.label("boxes2").relative_box_width(false));
    fig.show()?;
    fig.save("script.gp")?;

    let mut fig2 = Figure::new("Boxes with text");
    fig2.xtics(["house", "bottel", "basket", "number", "apple"]);
    fig2.add(boxes_y(&ydata)?.label("boxes with names"));
    fig2.show()?;

    fig.close()?;
    fig2.close()?;
    Ok(())
}
