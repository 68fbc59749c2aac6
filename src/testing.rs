//! In-memory backend for exercising the figure lifecycle without gnuplot.

use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::backend::Backend;
use crate::error::{FigureError, FigureResult};

#[derive(Debug, Default)]
struct Recording {
    spawned: usize,
    finished: usize,
    scripts: Vec<Vec<u8>>,
}

/// Records every session it opens. Clones share the same recording.
#[derive(Debug, Clone, Default)]
pub(crate) struct RecordingBackend {
    recording: Arc<Mutex<Recording>>,
    exit_code: Option<i32>,
    refuse_spawn: bool,
}

#[derive(Debug)]
pub(crate) struct RecordingSession {
    recording: Arc<Mutex<Recording>>,
    index: usize,
}

impl Write for RecordingSession {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.recording.lock().scripts[self.index].extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl RecordingBackend {
    /// Sessions finish with `code` instead of success.
    pub(crate) fn failing(code: i32) -> Self {
        Self {
            exit_code: Some(code),
            ..Self::default()
        }
    }

    /// Every spawn attempt fails.
    pub(crate) fn unavailable() -> Self {
        Self {
            refuse_spawn: true,
            ..Self::default()
        }
    }

    pub(crate) fn spawned(&self) -> usize {
        self.recording.lock().spawned
    }

    pub(crate) fn finished(&self) -> usize {
        self.recording.lock().finished
    }

    /// Everything written to session `index`.
    pub(crate) fn script(&self, index: usize) -> String {
        String::from_utf8_lossy(&self.recording.lock().scripts[index]).into_owned()
    }
}

impl Backend for RecordingBackend {
    type Session = RecordingSession;

    fn spawn(&self) -> FigureResult<RecordingSession> {
        if self.refuse_spawn {
            return Err(FigureError::spawn(
                "recording",
                io::Error::new(io::ErrorKind::NotFound, "backend unavailable"),
            ));
        }
        let mut recording = self.recording.lock();
        recording.spawned += 1;
        recording.scripts.push(Vec::new());
        Ok(RecordingSession {
            recording: Arc::clone(&self.recording),
            index: recording.scripts.len() - 1,
        })
    }

    fn finish(&self, session: RecordingSession) -> FigureResult<()> {
        drop(session);
        self.recording.lock().finished += 1;
        match self.exit_code {
            Some(code) => Err(FigureError::backend_exit("recording", Some(code))),
            None => Ok(()),
        }
    }
}
