//! Backend processes that consume rendered scripts.
//!
//! A [`Backend`] opens sessions: writable streams that accept script text and
//! are finished exactly once, at which point the backend reports success or
//! failure. [`Gnuplot`] runs the external `gnuplot` executable and feeds the
//! script through its standard input.

use std::io::{self, BufWriter, Write};
use std::process::{Child, ChildStdin, Command, Stdio};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{FigureError, FigureResult};

/// Something that can receive plot scripts.
pub trait Backend {
    /// An open session; script text is written into it.
    type Session: Write;

    /// Start a new session.
    fn spawn(&self) -> FigureResult<Self::Session>;

    /// Close `session` and wait for the backend to finish with it.
    ///
    /// This is the only place a session is waited on.
    fn finish(&self, session: Self::Session) -> FigureResult<()>;
}

/// How to invoke the plotting executable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Executable name or path
    pub program: String,
    /// Arguments passed on every invocation
    pub args: Vec<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            program: "gnuplot".to_string(),
            args: vec!["-persist".to_string()],
        }
    }
}

impl BackendConfig {
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }
}

/// The external gnuplot executable.
#[derive(Debug, Clone, Default)]
pub struct Gnuplot {
    config: BackendConfig,
}

impl Gnuplot {
    pub fn new(config: BackendConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }
}

/// A running gnuplot process whose stdin receives the script.
///
/// Writes are buffered; [`Figure::plot`](crate::Figure::plot) flushes once the
/// script is complete.
#[derive(Debug)]
pub struct GnuplotSession {
    child: Child,
    stdin: Option<BufWriter<ChildStdin>>,
}

impl GnuplotSession {
    fn stdin(&mut self) -> io::Result<&mut BufWriter<ChildStdin>> {
        self.stdin
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::BrokenPipe, "backend stdin is closed"))
    }
}

impl Write for GnuplotSession {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.stdin()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stdin()?.flush()
    }
}

impl Backend for Gnuplot {
    type Session = GnuplotSession;

    fn spawn(&self) -> FigureResult<GnuplotSession> {
        let mut child = Command::new(&self.config.program)
            .args(&self.config.args)
            .stdin(Stdio::piped())
            .spawn()
            .map_err(|e| FigureError::spawn(&self.config.program, e))?;
        info!(program = %self.config.program, pid = child.id(), "spawned plotting backend");

        let stdin = child.stdin.take().map(BufWriter::new);
        Ok(GnuplotSession { child, stdin })
    }

    fn finish(&self, mut session: GnuplotSession) -> FigureResult<()> {
        // Dropping stdin sends EOF, which ends a non-interactive gnuplot.
        let flushed = match session.stdin.take() {
            Some(mut stdin) => stdin.flush(),
            None => Ok(()),
        };
        let status = session.child.wait()?;
        debug!(program = %self.config.program, %status, "plotting backend finished");

        if !status.success() {
            warn!(program = %self.config.program, %status, "plotting backend reported failure");
            return Err(FigureError::backend_exit(&self.config.program, status.code()));
        }
        flushed?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_runs_persistent_gnuplot() {
        let config = BackendConfig::default();
        assert_eq!(config.program, "gnuplot");
        assert_eq!(config.args, vec!["-persist".to_string()]);
    }

    #[test]
    fn test_config_builders() {
        let config = BackendConfig::default()
            .with_program("/usr/local/bin/gnuplot")
            .with_args(["-p", "-e", "set term dumb"]);
        assert_eq!(config.program, "/usr/local/bin/gnuplot");
        assert_eq!(config.args.len(), 3);
        assert_eq!(Gnuplot::new(config.clone()).config(), &config);
    }

    #[cfg(unix)]
    fn shell(script: &str) -> Gnuplot {
        Gnuplot::new(BackendConfig::default().with_program("sh").with_args(["-c", script]))
    }

    #[cfg(unix)]
    #[test]
    fn test_buffered_script_reaches_backend_on_finish() {
        let backend = shell(r#"test "$(cat)" = hello"#);
        let mut session = backend.spawn().unwrap();
        session.write_all(b"hel").unwrap();
        session.write_all(b"lo\n").unwrap();
        backend.finish(session).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_finish_reports_exit_code() {
        let backend = shell("cat >/dev/null; exit 3");
        let mut session = backend.spawn().unwrap();
        writeln!(session, "plot x").unwrap();
        match backend.finish(session) {
            Err(FigureError::BackendExit { code, .. }) => assert_eq!(code, Some(3)),
            other => panic!("expected exit failure, got {other:?}"),
        }
    }

    #[test]
    fn test_spawn_missing_program_is_backend_error() {
        let backend = Gnuplot::new(
            BackendConfig::default().with_program("definitely-not-a-plotting-backend-7f3a"),
        );
        match backend.spawn() {
            Err(err @ FigureError::Spawn { .. }) => assert!(err.is_backend_error()),
            other => panic!("expected spawn error, got {other:?}"),
        }
    }
}
