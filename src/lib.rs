// Correctness and logic
#![warn(clippy::unit_cmp)] // Detects comparing unit types
#![warn(clippy::match_same_arms)]
// Duplicate match arms

// Performance-focused
#![warn(clippy::inefficient_to_string)] // `format!("{}", x)` vs `x.to_string()`
#![warn(clippy::map_clone)] // Cloning inside `map()` unnecessarily
#![warn(clippy::unnecessary_to_owned)] // Detects redundant `.to_owned()` or `.clone()`

// Style and idiomatic Rust
#![warn(clippy::redundant_clone)] // Detects unnecessary `.clone()`
#![warn(clippy::needless_return)] // Avoids `return` at the end of functions
#![warn(clippy::manual_map)] // Use `.map()` instead of manual `match`
#![warn(clippy::unwrap_used)] // Avoids using `unwrap()`

// Maintainability
#![warn(clippy::missing_panics_doc)] // Docs for functions that might panic
#![allow(clippy::new_without_default)]

//! # gnuplot_figure
//!
//! Describe a chart in Rust and let [gnuplot](http://www.gnuplot.info/) draw it.
//!
//! A [`Figure`] holds the chart configuration (title, axis labels, ranges,
//! autoscaling, reversed and logarithmic axes, named tics) and an ordered list of
//! [`series`]. Rendering turns it into a gnuplot script which is either
//!
//! - written to a `.gp` file ([`Figure::save`] with a script filename),
//! - piped into a one-shot gnuplot process that writes an image
//!   ([`Figure::save`] with an image filename), or
//! - piped into a gnuplot process owned by the figure, which stays open so
//!   repeated [`Figure::show`] calls update the same window.
//!
//! ## Quick Start
//!
//! ```no_run
//! use gnuplot_figure::{Figure, FigureResult, series::{boxes, boxes_y}};
//!
//! # fn example() -> FigureResult<()> {
//! let mut fig = Figure::new("Boxes");
//! fig.add(boxes(&[0, 1, 2, 3, 4], &[5.0, 6.5, 7.8, 6.0, 7.0])?.label("boxes1"));
//! fig.add(boxes(&[3, 4, 5, 7, 8], &[3.0, 6.5, 9.8, 10.0, 2.0])?.label("boxes2"));
//! fig.show()?;
//! fig.save("script.gp")?;
//!
//! let mut named = Figure::new("Boxes with text");
//! named
//!     .xtics(["house", "bottel", "basket", "number", "apple"])
//!     .add(boxes_y(&[5.0, 6.5, 7.8, 6.0, 7.0])?.label("boxes with names"));
//! println!("{}", named.to_script()?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`FigureResult`]. Backend problems are
//! reported as [`FigureError::Spawn`] or [`FigureError::BackendExit`]:
//!
//! ```no_run
//! use gnuplot_figure::{Figure, FigureError};
//!
//! let mut fig = Figure::new("Empty");
//! match fig.save("empty.png") {
//!     Ok(_) => {}
//!     Err(err) if err.is_backend_error() => eprintln!("gnuplot failed: {err}"),
//!     Err(other) => eprintln!("Other error: {other}"),
//! }
//! # let _ = FigureError::backend_exit("gnuplot", Some(1));
//! ```
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events (backend spawn and exit, saved files,
//! render summaries). Install any subscriber to see them.

pub mod backend;
pub mod error;
pub mod figure;
pub mod output;
pub mod series;
pub mod text;

#[cfg(test)]
mod testing;

pub use backend::{Backend, BackendConfig, Gnuplot, GnuplotSession};
pub use error::{FigureError, FigureResult};
pub use figure::{EMPTY_FIGURE_SCRIPT, Figure};
pub use output::{OutputFileType, SaveTarget, TerminalType, resolve_save_target};
pub use series::{Series, SeriesHandle, shared};
pub use text::Text;
