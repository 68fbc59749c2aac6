//! The figure: plot configuration, series, and delivery of the rendered script.
//!
//! A [`Figure`] accumulates configuration and [`Series`](crate::series::Series)
//! and renders them into a gnuplot script with [`Figure::plot`]. The script can
//! be saved as a plain file, handed to a one-shot backend session that writes an
//! image, or streamed to a persistent backend session that stays open across
//! [`Figure::show`] calls until [`Figure::close`] or drop.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::sync::Arc;

use parking_lot::MutexGuard;
use tracing::{debug, error, info};

use crate::backend::{Backend, Gnuplot};
use crate::error::{FigureError, FigureResult};
use crate::output::{OutputFileType, TerminalType, resolve_save_target};
use crate::series::{Series, SeriesHandle, shared};
use crate::text::{Text, quote};

/// Font height of a title built from a plain string.
pub const DEFAULT_TITLE_HEIGHT: f64 = 20.0;

/// Script rendered for a figure without series: a single unlabeled point at the origin.
pub const EMPTY_FIGURE_SCRIPT: &str = "set xrange [-1 : +1]\n\
set yrange [-1 : +1]\n\
$empty << EOD\n\
0 0\n\
EOD\n\
\n\
plot $empty with points notitle\n\
\n";

/// A chart description that renders to gnuplot.
///
/// Setters only replace the field they name; whether ranges or autoscaling
/// apply is decided when rendering.
///
/// # Example
///
/// ```no_run
/// use gnuplot_figure::{Figure, series::boxes};
///
/// # fn example() -> gnuplot_figure::FigureResult<()> {
/// let mut fig = Figure::new("Boxes");
/// fig.add(boxes(&[0, 1, 2], &[5.0, 6.5, 7.8])?.label("boxes1"))
///     .x_autoscale(false)
///     .x_min(-1.0)
///     .x_max(3.0);
/// fig.show()?;
/// fig.save("script.gp")?;
/// # Ok(())
/// # }
/// ```
pub struct Figure<B: Backend = Gnuplot> {
    title: Text,
    x_label: Text,
    y_label: Text,

    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,

    x_autoscale: bool,
    y_autoscale: bool,
    x_reverse: bool,
    y_reverse: bool,
    x_log: bool,
    y_log: bool,
    x_log_base: f64,
    y_log_base: f64,

    show_legend: bool,

    xtics_labels: Vec<String>,
    xtics_values: Vec<f64>,

    series: Vec<SeriesHandle>,

    backend: B,
    session: Option<B::Session>,
}

impl Figure<Gnuplot> {
    /// Create a figure titled `title` (bold, height 20) rendered by gnuplot.
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_backend(title, Gnuplot::default())
    }

    /// Create a figure with explicit title and axis labels rendered by gnuplot.
    pub fn with_labels(title: Text, x_label: Text, y_label: Text) -> Self {
        Self::with_labels_and_backend(title, x_label, y_label, Gnuplot::default())
    }
}

impl<B: Backend> Figure<B> {
    /// Create a figure titled `title` (bold, height 20) rendered by `backend`.
    pub fn with_backend(title: impl Into<String>, backend: B) -> Self {
        let title = Text::new(title)
            .with_height(DEFAULT_TITLE_HEIGHT)
            .with_bold(true);
        Self::with_labels_and_backend(title, Text::default(), Text::default(), backend)
    }

    pub fn with_labels_and_backend(title: Text, x_label: Text, y_label: Text, backend: B) -> Self {
        Self {
            title,
            x_label,
            y_label,
            x_min: -10.0,
            x_max: 10.0,
            y_min: -10.0,
            y_max: 10.0,
            x_autoscale: true,
            y_autoscale: true,
            x_reverse: false,
            y_reverse: false,
            x_log: false,
            y_log: false,
            x_log_base: 10.0,
            y_log_base: 10.0,
            show_legend: true,
            xtics_labels: Vec::new(),
            xtics_values: Vec::new(),
            series: Vec::new(),
            backend,
            session: None,
        }
    }

    pub fn title(&mut self, title: impl Into<Text>) -> &mut Self {
        self.title = title.into();
        self
    }

    pub fn x_label(&mut self, label: impl Into<Text>) -> &mut Self {
        self.x_label = label.into();
        self
    }

    pub fn y_label(&mut self, label: impl Into<Text>) -> &mut Self {
        self.y_label = label.into();
        self
    }

    pub fn x_min(&mut self, v: f64) -> &mut Self {
        self.x_min = v;
        self
    }

    pub fn x_max(&mut self, v: f64) -> &mut Self {
        self.x_max = v;
        self
    }

    pub fn y_min(&mut self, v: f64) -> &mut Self {
        self.y_min = v;
        self
    }

    pub fn y_max(&mut self, v: f64) -> &mut Self {
        self.y_max = v;
        self
    }

    /// Set both x bounds and switch x autoscaling off.
    pub fn x_range(&mut self, min: f64, max: f64) -> &mut Self {
        self.x_min = min;
        self.x_max = max;
        self.x_autoscale = false;
        self
    }

    /// Set both y bounds and switch y autoscaling off.
    pub fn y_range(&mut self, min: f64, max: f64) -> &mut Self {
        self.y_min = min;
        self.y_max = max;
        self.y_autoscale = false;
        self
    }

    pub fn x_log_base(&mut self, base: f64) -> &mut Self {
        self.x_log_base = base;
        self
    }

    pub fn y_log_base(&mut self, base: f64) -> &mut Self {
        self.y_log_base = base;
        self
    }

    pub fn x_reverse(&mut self, b: bool) -> &mut Self {
        self.x_reverse = b;
        self
    }

    pub fn y_reverse(&mut self, b: bool) -> &mut Self {
        self.y_reverse = b;
        self
    }

    /// Let the backend choose the x range. Explicit x bounds are ignored while set.
    pub fn x_autoscale(&mut self, b: bool) -> &mut Self {
        self.x_autoscale = b;
        self
    }

    /// Let the backend choose the y range. Explicit y bounds are ignored while set.
    pub fn y_autoscale(&mut self, b: bool) -> &mut Self {
        self.y_autoscale = b;
        self
    }

    pub fn x_log(&mut self, b: bool) -> &mut Self {
        self.x_log = b;
        self
    }

    pub fn y_log(&mut self, b: bool) -> &mut Self {
        self.y_log = b;
        self
    }

    pub fn show_legend(&mut self, b: bool) -> &mut Self {
        self.show_legend = b;
        self
    }

    /// Append a series. Its identity is assigned when the figure is rendered.
    pub fn add<S: Series + 'static>(&mut self, series: S) -> &mut Self {
        self.add_shared(shared(series))
    }

    /// Append a series that may also be plotted by other figures.
    pub fn add_shared(&mut self, series: SeriesHandle) -> &mut Self {
        self.series.push(series);
        self
    }

    /// Name the x tics; tic `i` is placed at `x = i`.
    pub fn xtics<I, S>(&mut self, labels: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.xtics_labels = labels.into_iter().map(Into::into).collect();
        self.xtics_values = (0..self.xtics_labels.len()).map(|i| i as f64).collect();
        self
    }

    /// Name the x tics and place each at the matching value.
    ///
    /// # Errors
    ///
    /// [`FigureError::TicsLengthMismatch`] if `labels` and `values` differ in
    /// length; the current tics are left untouched.
    pub fn xtics_with_values<I, S, V>(&mut self, labels: I, values: V) -> FigureResult<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        V: IntoIterator<Item = f64>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        let values: Vec<f64> = values.into_iter().collect();
        if labels.len() != values.len() {
            return Err(FigureError::TicsLengthMismatch {
                labels: labels.len(),
                values: values.len(),
            });
        }
        self.xtics_labels = labels;
        self.xtics_values = values;
        Ok(self)
    }

    pub fn clear_xtics(&mut self) -> &mut Self {
        self.xtics_labels.clear();
        self.xtics_values.clear();
        self
    }

    pub fn title_text(&self) -> &Text {
        &self.title
    }

    pub fn xtics_labels(&self) -> &[String] {
        &self.xtics_labels
    }

    pub fn xtics_values(&self) -> &[f64] {
        &self.xtics_values
    }

    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    /// Render the complete script into `out`.
    ///
    /// With `terminal`, the script starts by selecting it. With `save_as`, the
    /// backend output is redirected to that file for the duration of the script.
    /// Series identities are reassigned from their current positions, so
    /// rendering an unchanged figure twice produces the same script.
    ///
    /// Every series stays locked for the whole render, so a series shared with
    /// another figure cannot be renumbered halfway through.
    pub fn plot(
        &self,
        out: &mut dyn Write,
        terminal: Option<TerminalType>,
        save_as: Option<&str>,
    ) -> FigureResult<&Self> {
        let (mut guards, slots) = self.lock_series();
        for (uid, &slot) in slots.iter().enumerate() {
            guards[slot].set_uid(uid);
        }

        let save_as = save_as.filter(|path| !path.is_empty());
        debug!(
            series = self.series.len(),
            terminal = terminal.map(TerminalType::command),
            save_as,
            "rendering figure"
        );

        if let Some(terminal) = terminal {
            writeln!(out, "set terminal {}", terminal.command())?;
        }
        if let Some(path) = save_as {
            writeln!(out, "set output '{}'", path.replace('\'', "''"))?;
        }

        if slots.is_empty() {
            out.write_all(EMPTY_FIGURE_SCRIPT.as_bytes())?;
            out.flush()?;
            return Ok(self);
        }

        self.write_axes(out)?;

        for &slot in &slots {
            guards[slot].print_settings(out)?;
        }
        for &slot in &slots {
            guards[slot].print_data(out)?;
        }

        write!(out, "plot ")?;
        let last = slots.len() - 1;
        for (i, &slot) in slots.iter().enumerate() {
            if i > 0 {
                write!(out, "     ")?;
            }
            guards[slot].print_plot(out)?;
            if i < last {
                write!(out, ", \\")?;
            }
            writeln!(out)?;
        }
        writeln!(out)?;

        if save_as.is_some() {
            writeln!(out, "set output")?;
        }
        out.flush()?;
        Ok(self)
    }

    /// Lock each distinct series once, in address order.
    ///
    /// Returns the guards and, for every position in the figure, the index of
    /// its guard. A handle added twice maps to a single guard. Locking by
    /// address keeps figures that share series from deadlocking each other.
    fn lock_series(&self) -> (Vec<MutexGuard<'_, dyn Series>>, Vec<usize>) {
        let mut distinct: Vec<&SeriesHandle> = Vec::new();
        let slots: Vec<usize> = self
            .series
            .iter()
            .map(|handle| {
                distinct
                    .iter()
                    .position(|seen| Arc::ptr_eq(seen, handle))
                    .unwrap_or_else(|| {
                        distinct.push(handle);
                        distinct.len() - 1
                    })
            })
            .collect();

        let mut by_address: Vec<usize> = (0..distinct.len()).collect();
        by_address.sort_by_key(|&i| Arc::as_ptr(distinct[i]).cast::<()>() as usize);

        let mut guards: Vec<Option<MutexGuard<'_, dyn Series>>> =
            distinct.iter().map(|_| None).collect();
        for i in by_address {
            guards[i] = Some(distinct[i].lock());
        }
        (guards.into_iter().flatten().collect(), slots)
    }

    /// Render the script without terminal or output directives.
    pub fn to_script(&self) -> FigureResult<String> {
        let mut out = Vec::new();
        self.plot(&mut out, None, None)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    // labels, ranges, scales and tics
    fn write_axes(&self, out: &mut dyn Write) -> io::Result<()> {
        if !self.title.is_empty() {
            writeln!(out, "set title {}", self.title)?;
        }
        if !self.x_label.is_empty() {
            writeln!(out, "set xlabel {}", self.x_label)?;
        }
        if !self.y_label.is_empty() {
            writeln!(out, "set ylabel {}", self.y_label)?;
        }

        match (self.x_autoscale, self.y_autoscale) {
            (true, true) => writeln!(out, "set autoscale")?,
            (true, false) => {
                writeln!(out, "set autoscale x")?;
                writeln!(out, "set yrange [{}:{}]", self.y_min, self.y_max)?;
            }
            (false, true) => {
                writeln!(out, "set xrange [{}:{}]", self.x_min, self.x_max)?;
                writeln!(out, "set autoscale y")?;
            }
            (false, false) => {
                writeln!(out, "set xrange [{}:{}]", self.x_min, self.x_max)?;
                writeln!(out, "set yrange [{}:{}]", self.y_min, self.y_max)?;
            }
        }

        if self.x_reverse {
            writeln!(out, "set xrange reverse")?;
        }
        if self.y_reverse {
            writeln!(out, "set yrange reverse")?;
        }

        if self.x_log {
            writeln!(out, "set logscale x {}", self.x_log_base)?;
        }
        if self.y_log {
            writeln!(out, "set logscale y {}", self.y_log_base)?;
        }

        if !self.show_legend {
            writeln!(out, "unset key")?;
        }

        if !self.xtics_labels.is_empty() {
            let tics: Vec<String> = self
                .xtics_labels
                .iter()
                .zip(&self.xtics_values)
                .map(|(label, value)| format!("{} {}", quote(label), value))
                .collect();
            writeln!(out, "set xtics({})", tics.join(", "))?;
        }
        Ok(())
    }

    /// Save with the file type inferred from `filename` (PNG when it has no known extension).
    ///
    /// An empty `filename` saves under the title.
    pub fn save(&mut self, filename: &str) -> FigureResult<&mut Self> {
        self.save_with(filename, None, None)
    }

    /// Save as `file_type` using `terminal`, inferring whichever is `None`.
    ///
    /// Scripts are written directly. Every other file type is produced by a
    /// one-shot backend session which writes the file itself; the call fails if
    /// that session cannot be started or finishes unsuccessfully.
    pub fn save_with(
        &mut self,
        filename: &str,
        file_type: Option<OutputFileType>,
        terminal: Option<TerminalType>,
    ) -> FigureResult<&mut Self> {
        let target = resolve_save_target(filename, &self.title.content, file_type, terminal);

        if target.file_type == OutputFileType::Gp {
            let mut file = BufWriter::new(File::create(&target.filename)?);
            self.plot(&mut file, target.terminal, None)?;
            info!(path = %target.filename, "saved figure script");
            return Ok(self);
        }

        let mut session = self.backend.spawn()?;
        let rendered = self
            .plot(&mut session, target.terminal, Some(&target.filename))
            .map(|_| ());
        let finished = self.backend.finish(session);
        rendered?;
        finished?;
        info!(path = %target.filename, file_type = ?target.file_type, "saved figure");
        Ok(self)
    }

    /// Draw in the persistent backend session using its default terminal.
    pub fn show(&mut self) -> FigureResult<&mut Self> {
        self.show_terminal(None)
    }

    /// Show as `file_type`. Scripts are printed to stdout instead of being sent to the backend.
    pub fn show_file_type(&mut self, file_type: OutputFileType) -> FigureResult<&mut Self> {
        match file_type {
            OutputFileType::Gp => {
                let stdout = io::stdout();
                let mut lock = stdout.lock();
                self.plot(&mut lock, None, None)?;
                Ok(self)
            }
            other => self.show_terminal(other.terminal()),
        }
    }

    /// Draw in the persistent backend session, starting it on first use.
    ///
    /// The session stays open so later calls update the same backend.
    pub fn show_terminal(&mut self, terminal: Option<TerminalType>) -> FigureResult<&mut Self> {
        let mut session = match self.session.take() {
            Some(session) => session,
            None => self.backend.spawn()?,
        };
        let rendered = self.plot(&mut session, terminal, None).map(|_| ());
        self.session = Some(session);
        rendered?;
        Ok(self)
    }

    /// Whether a persistent backend session is open.
    pub fn is_connected(&self) -> bool {
        self.session.is_some()
    }

    /// Close the persistent backend session, if any. Closing twice is a no-op.
    pub fn close(&mut self) -> FigureResult<&mut Self> {
        if let Some(session) = self.session.take() {
            self.backend.finish(session)?;
        }
        Ok(self)
    }
}

impl<B: Backend> Drop for Figure<B> {
    fn drop(&mut self) {
        if let Some(session) = self.session.take()
            && let Err(err) = self.backend.finish(session)
        {
            error!(error = %err, "failed to close plotting backend");
        }
    }
}
