//! Shared terminal output resource.
//!
//! The cursor is a single shared mutable resource: two interleaved escape
//! sequences corrupt visible output. One mutex therefore guards the writer
//! *and* the registry of every reserved line (depth bookkeeping), and is
//! held for the full duration of each atomic write sequence — a row
//! reservation or a line redraw.

use std::io::{self, Write};
use std::sync::{Arc, OnceLock, Weak};

use parking_lot::{Mutex, MutexGuard};

use crate::line::LineState;

/// Handle to a locked output stream plus the lines reserved on it.
///
/// Cloning is cheap; all clones share the same lock. [`Terminal::stdout`]
/// returns a process-global instance so every [`Block`](crate::Block) on
/// stdout shares one cursor.
#[derive(Clone)]
pub struct Terminal {
    inner: Arc<Mutex<TermState>>,
}

pub(crate) struct TermState {
    out: Box<dyn Write + Send>,
    lines: Vec<Weak<Mutex<LineState>>>,
}

static STDOUT: OnceLock<Terminal> = OnceLock::new();

impl Terminal {
    /// The process-global stdout terminal.
    pub fn stdout() -> Terminal {
        STDOUT
            .get_or_init(|| Terminal::new(Box::new(io::stdout())))
            .clone()
    }

    /// A terminal over an arbitrary writer.
    pub fn new(out: Box<dyn Write + Send>) -> Terminal {
        Terminal {
            inner: Arc::new(Mutex::new(TermState {
                out,
                lines: Vec::new(),
            })),
        }
    }

    /// A terminal writing into an inspectable in-memory buffer.
    ///
    /// Intended for tests: the returned [`Capture`] can be read back at any
    /// point to assert on the exact byte sequence emitted.
    pub fn capture() -> (Terminal, Capture) {
        let capture = Capture::default();
        let writer = CaptureWriter(capture.buf.clone());
        (Terminal::new(Box::new(writer)), capture)
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, TermState> {
        self.inner.lock()
    }

    /// Reserve one row: deepen every live line on this terminal, emit a
    /// newline (unless suppressed by a hidden block), and register state for
    /// the new row — all under one lock acquisition, so a concurrent redraw
    /// can never observe a half-updated depth picture.
    pub(crate) fn reserve_row(&self, emit_newline: bool) -> Arc<Mutex<LineState>> {
        let mut term = self.inner.lock();
        term.lines.retain(|weak| match weak.upgrade() {
            Some(line) => {
                line.lock().deepen();
                true
            }
            None => false,
        });
        if emit_newline {
            term.write_str("\n");
            term.flush();
        }
        let state = Arc::new(Mutex::new(LineState::new()));
        term.lines.push(Arc::downgrade(&state));
        state
    }
}

impl TermState {
    pub(crate) fn write_str(&mut self, s: &str) {
        if let Err(err) = self.out.write_all(s.as_bytes()) {
            die("write", &err);
        }
    }

    pub(crate) fn flush(&mut self) {
        if let Err(err) = self.out.flush() {
            die("flush", &err);
        }
    }
}

// A broken output device leaves no sane way to keep rendering; there is no
// fallback renderer.
fn die(op: &str, err: &io::Error) -> ! {
    log::error!("terminal {op} failed: {err}");
    std::process::exit(1);
}

// ---------------------------------------------------------------------------
// Capture buffer for tests
// ---------------------------------------------------------------------------

/// Read side of [`Terminal::capture`].
#[derive(Clone, Default)]
pub struct Capture {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl Capture {
    /// Everything written so far.
    pub fn bytes(&self) -> Vec<u8> {
        self.buf.lock().clone()
    }

    /// Everything written so far, lossily decoded as UTF-8.
    pub fn string(&self) -> String {
        String::from_utf8_lossy(&self.bytes()).into_owned()
    }
}

struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

impl Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
