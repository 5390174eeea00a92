//! One addressable, independently redrawable terminal row.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::part::Part;
use crate::terminal::Terminal;

pub(crate) struct LineState {
    hidden: bool,
    depth: usize,
    parts: Vec<Box<dyn Part>>,
}

impl LineState {
    /// Depth 1: the just-reserved row sits one row above the cursor, which
    /// the reserving newline left at the start of the row below.
    pub(crate) fn new() -> LineState {
        LineState {
            hidden: false,
            depth: 1,
            parts: Vec::new(),
        }
    }

    /// Another row was reserved below this line; its distance from the live
    /// cursor grew by one. Monotonically non-decreasing for the life of the
    /// line. No redraw: on-screen content is unaffected, only future
    /// addressing.
    pub(crate) fn deepen(&mut self) {
        self.depth += 1;
    }
}

/// Handle to one reserved row. Cloning is cheap and clones address the same
/// row; a line is freely shared with the task that owns it and with the
/// parts that notify it.
#[derive(Clone)]
pub struct Line {
    state: Arc<Mutex<LineState>>,
    term: Terminal,
}

impl Line {
    pub(crate) fn from_state(state: Arc<Mutex<LineState>>, term: Terminal) -> Line {
        Line { state, term }
    }

    /// Replace this line's entire part sequence, attach each new part so its
    /// future mutations redraw this line, then redraw immediately.
    pub fn display(&self, parts: Vec<Box<dyn Part>>) {
        {
            let mut state = self.state.lock();
            state.parts = parts;
            for part in &state.parts {
                part.attach(self);
            }
        }
        self.redraw();
    }

    /// Display a single plain text part, returning its handle for later
    /// mutation.
    pub fn display_text(&self, text: impl Into<String>) -> crate::part::TextPart {
        let part = crate::part::TextPart::new(text);
        self.display(vec![Box::new(part.clone())]);
        part
    }

    /// Repaint this row in place.
    ///
    /// Holds the terminal lock for the whole escape sequence: move up
    /// `depth` rows, clear the row, write every part's render output left to
    /// right with no separators, move left by the total rendered width, move
    /// back down `depth` rows, flush.
    pub fn redraw(&self) {
        let mut term = self.term.lock();
        let state = self.state.lock();
        if state.hidden {
            return;
        }
        let depth = state.depth;
        let mut width = 0;
        let mut rendered = Vec::with_capacity(state.parts.len());
        for part in &state.parts {
            let r = part.render();
            width += r.width;
            rendered.push(r.text);
        }
        drop(state);

        term.write_str(&format!("\x1b[{depth}A"));
        term.write_str("\x1b[K");
        for text in &rendered {
            term.write_str(text);
        }
        term.write_str(&format!("\x1b[{width}D"));
        term.write_str(&format!("\x1b[{depth}B"));
        term.flush();
    }

    /// Suppress future redraws. Attached parts keep notifying this line;
    /// the notifications become no-ops.
    pub fn hide(&self) {
        self.state.lock().hidden = true;
    }

    /// Current distance, in rows, from the live cursor position.
    pub fn depth(&self) -> usize {
        self.state.lock().depth
    }

    /// The concatenated render output of the current parts, without touching
    /// the terminal.
    pub fn content(&self) -> String {
        let state = self.state.lock();
        state.parts.iter().map(|part| part.render().text).collect()
    }

    pub(crate) fn downgrade(&self) -> WeakLine {
        WeakLine {
            state: Arc::downgrade(&self.state),
            term: self.term.clone(),
        }
    }
}

/// Weak back-reference from a part to a line it is displayed on. Parts do
/// not own their lines; they only need to notify them.
#[derive(Clone)]
pub(crate) struct WeakLine {
    state: Weak<Mutex<LineState>>,
    term: Terminal,
}

impl WeakLine {
    pub(crate) fn upgrade(&self) -> Option<Line> {
        self.state.upgrade().map(|state| Line {
            state,
            term: self.term.clone(),
        })
    }

    /// Identity comparison, used to deduplicate listener registration.
    pub(crate) fn is(&self, line: &Line) -> bool {
        std::ptr::eq(self.state.as_ptr(), Arc::as_ptr(&line.state))
    }
}
