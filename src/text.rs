//! Styled text fragments used for titles and axis labels.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Font height used for labels built from plain strings.
pub const DEFAULT_TEXT_HEIGHT: f64 = 12.0;

/// A styled piece of text, rendered as a gnuplot string literal plus font options.
///
/// A label is empty iff its content is empty; empty labels are never emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    /// The text itself.
    pub content: String,
    /// Font height in points. A non-positive height leaves the backend default.
    pub height: f64,
    /// Render in bold.
    pub bold: bool,
    /// Optional gnuplot colour spec, e.g. `"red"` or `"#1f77b4"`.
    pub color: Option<String>,
    /// Interpret enhanced-text markup (`_`, `^`, `{}`, `@`) in `content`.
    /// Off by default, so content prints literally.
    #[serde(default)]
    pub enhanced: bool,
}

impl Default for Text {
    fn default() -> Self {
        Self {
            content: String::new(),
            height: DEFAULT_TEXT_HEIGHT,
            bold: false,
            color: None,
            enhanced: false,
        }
    }
}

impl Text {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn with_height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }

    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_enhanced(mut self, enhanced: bool) -> Self {
        self.enhanced = enhanced;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Render as the argument of a `set title` / `set xlabel` directive.
    ///
    /// Bold goes through the font spec, which every terminal honours.
    ///
    /// ```
    /// use gnuplot_figure::Text;
    ///
    /// let title = Text::new("Boxes").with_height(20.0).with_bold(true);
    /// assert_eq!(title.render(), r#""Boxes" font ":Bold,20" noenhanced"#);
    /// ```
    pub fn render(&self) -> String {
        let mut out = quote(&self.content);
        match (self.bold, self.height > 0.0) {
            (true, true) => out.push_str(&format!(" font \":Bold,{}\"", self.height)),
            (true, false) => out.push_str(" font \":Bold\""),
            (false, true) => out.push_str(&format!(" font \",{}\"", self.height)),
            (false, false) => {}
        }
        if let Some(color) = &self.color {
            out.push_str(&format!(" textcolor rgb {}", quote(color)));
        }
        if !self.enhanced {
            out.push_str(" noenhanced");
        }
        out
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<&str> for Text {
    fn from(content: &str) -> Self {
        Self::new(content)
    }
}

impl From<String> for Text {
    fn from(content: String) -> Self {
        Self::new(content)
    }
}

/// Wrap `s` in a double-quoted gnuplot string literal.
pub(crate) fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}
