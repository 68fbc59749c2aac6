//! Output targets: file kinds, gnuplot terminals and the lookups between them.
//!
//! All lookups are exhaustive matches over closed enums. "Not specified" is
//! expressed as `Option::None` and resolved by [`resolve_save_target`].

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Kind of file a figure can be saved as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputFileType {
    /// Plain gnuplot script text.
    Gp,
    Png,
    Jpeg,
    Gif,
    Svg,
    Pdf,
    Eps,
    /// HTML5 canvas document.
    Html,
    /// ASCII art from the `dumb` terminal.
    Txt,
}

/// Gnuplot terminal a script can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerminalType {
    Qt,
    Wxt,
    X11,
    Windows,
    Aqua,
    Png,
    Jpeg,
    Gif,
    Svg,
    PdfCairo,
    EpsCairo,
    Canvas,
    Dumb,
}

impl OutputFileType {
    /// Every file type, in lookup order.
    pub const ALL: [OutputFileType; 9] = [
        Self::Gp,
        Self::Png,
        Self::Jpeg,
        Self::Gif,
        Self::Svg,
        Self::Pdf,
        Self::Eps,
        Self::Html,
        Self::Txt,
    ];

    /// File ending including the leading dot.
    pub const fn file_ending(self) -> &'static str {
        match self {
            Self::Gp => ".gp",
            Self::Png => ".png",
            Self::Jpeg => ".jpg",
            Self::Gif => ".gif",
            Self::Svg => ".svg",
            Self::Pdf => ".pdf",
            Self::Eps => ".eps",
            Self::Html => ".html",
            Self::Txt => ".txt",
        }
    }

    /// Terminal that produces this kind of file.
    ///
    /// Scripts select no terminal so that running them uses the backend default.
    pub const fn terminal(self) -> Option<TerminalType> {
        match self {
            Self::Gp => None,
            Self::Png => Some(TerminalType::Png),
            Self::Jpeg => Some(TerminalType::Jpeg),
            Self::Gif => Some(TerminalType::Gif),
            Self::Svg => Some(TerminalType::Svg),
            Self::Pdf => Some(TerminalType::PdfCairo),
            Self::Eps => Some(TerminalType::EpsCairo),
            Self::Html => Some(TerminalType::Canvas),
            Self::Txt => Some(TerminalType::Dumb),
        }
    }

    /// Infer the file type from the extension of `filename`, case-insensitively.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let ext = Path::new(filename).extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "jpeg" => Some(Self::Jpeg),
            ext => Self::ALL
                .into_iter()
                .find(|kind| &kind.file_ending()[1..] == ext),
        }
    }
}

impl TerminalType {
    /// Terminal name as written after `set terminal`.
    pub const fn command(self) -> &'static str {
        match self {
            Self::Qt => "qt",
            Self::Wxt => "wxt",
            Self::X11 => "x11",
            Self::Windows => "windows",
            Self::Aqua => "aqua",
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Gif => "gif",
            Self::Svg => "svg",
            Self::PdfCairo => "pdfcairo",
            Self::EpsCairo => "epscairo",
            Self::Canvas => "canvas",
            Self::Dumb => "dumb",
        }
    }

    /// Whether this terminal draws into a window rather than a file.
    pub const fn is_interactive(self) -> bool {
        matches!(
            self,
            Self::Qt | Self::Wxt | Self::X11 | Self::Windows | Self::Aqua
        )
    }
}

/// File type used when neither the caller nor the filename names one.
pub const DEFAULT_FILE_TYPE: OutputFileType = OutputFileType::Png;

/// Fully resolved destination of a save call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveTarget {
    pub filename: String,
    pub file_type: OutputFileType,
    pub terminal: Option<TerminalType>,
}

/// Resolve the filename, file type and terminal of a save request.
///
/// * an empty `filename` is replaced by `fallback_name` (the figure title)
/// * without a file type, it is inferred from the extension; failing that
///   [`DEFAULT_FILE_TYPE`] is used and its ending appended
/// * with a file type, its ending is appended unless already present
/// * without a terminal, the file type's terminal is used
pub fn resolve_save_target(
    filename: &str,
    fallback_name: &str,
    file_type: Option<OutputFileType>,
    terminal: Option<TerminalType>,
) -> SaveTarget {
    let mut filename = if filename.is_empty() {
        fallback_name.to_string()
    } else {
        filename.to_string()
    };

    let file_type = match file_type {
        Some(kind) => {
            if OutputFileType::from_filename(&filename) != Some(kind) {
                filename.push_str(kind.file_ending());
            }
            kind
        }
        None => OutputFileType::from_filename(&filename).unwrap_or_else(|| {
            filename.push_str(DEFAULT_FILE_TYPE.file_ending());
            DEFAULT_FILE_TYPE
        }),
    };

    SaveTarget {
        filename,
        file_type,
        terminal: terminal.or_else(|| file_type.terminal()),
    }
}
