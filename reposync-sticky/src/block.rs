//! A reserved, fixed-height contiguous region of lines.

use crate::line::Line;
use crate::terminal::Terminal;

/// A block of rows reserved at the bottom of the scroll region, each
/// addressable as a [`Line`].
///
/// Reserving a row emits one newline, pushing the cursor down and thereby
/// deepening every previously reserved line on the same terminal — including
/// lines belonging to other blocks.
pub struct Block {
    term: Terminal,
    hidden: bool,
    lines: Vec<Line>,
}

impl Block {
    /// Reserve `height` rows on stdout.
    pub fn new(height: usize) -> Block {
        Block::with_terminal(Terminal::stdout(), height)
    }

    /// Reserve `height` rows on an explicit terminal.
    pub fn with_terminal(term: Terminal, height: usize) -> Block {
        let mut block = Block {
            term,
            hidden: false,
            lines: Vec::with_capacity(height),
        };
        block.add_lines(height);
        block
    }

    /// Reserve `count` additional rows below the existing ones.
    ///
    /// When the block is hidden no newline is emitted, but sibling depth
    /// bookkeeping still happens so that depth counts stay consistent
    /// process-wide.
    pub fn add_lines(&mut self, count: usize) {
        for _ in 0..count {
            let state = self.term.reserve_row(!self.hidden);
            let line = Line::from_state(state, self.term.clone());
            if self.hidden {
                line.hide();
            }
            self.lines.push(line);
        }
    }

    pub fn height(&self) -> usize {
        self.lines.len()
    }

    /// Look up a row. Non-negative indices count from the first row
    /// reserved; negative indices count from the end (`-1` is the last row).
    ///
    /// # Panics
    ///
    /// Panics on an out-of-range index — that is a programming error, not a
    /// runtime condition to recover from.
    pub fn line(&self, idx: isize) -> Line {
        let len = self.lines.len() as isize;
        let resolved = if idx < 0 { idx + len } else { idx };
        if resolved < 0 || resolved >= len {
            panic!("line index {idx} out of range for block of height {len}");
        }
        self.lines[resolved as usize].clone()
    }

    /// Hide the block and every line in it. Hidden lines ignore redraws;
    /// newly added rows stop emitting newlines.
    pub fn hide(&mut self) {
        self.hidden = true;
        for line in &self.lines {
            line.hide();
        }
    }
}
