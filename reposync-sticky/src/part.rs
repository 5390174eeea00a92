//! Renderable, observable fragments of a line.
//!
//! A part is a cheap-clone handle over shared state. Mutating a part
//! notifies every line currently displaying it, each of which redraws
//! itself. Listener registration is deduplicated by line identity, so a
//! part redisplayed on the same line does not accumulate duplicate redraws.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use colored::{Color, Colorize};
use parking_lot::Mutex;

use crate::line::{Line, WeakLine};

/// The render output of one part: styled text plus its visible character
/// width (escape bytes excluded), which cursor movement is computed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    pub width: usize,
}

/// A composable fragment of a line's rendered content.
pub trait Part: Send + Sync {
    /// Register `line` as a listener: future mutations of this part redraw
    /// it. Attaching never transfers ownership of the part.
    fn attach(&self, line: &Line);

    /// Produce the current render output. Must be free of side effects:
    /// rendering twice without an intervening mutation yields identical
    /// output.
    fn render(&self) -> Rendered;
}

fn attach_listener(listeners: &mut Vec<WeakLine>, line: &Line) {
    listeners.retain(|listener| listener.upgrade().is_some());
    if !listeners.iter().any(|listener| listener.is(line)) {
        listeners.push(line.downgrade());
    }
}

fn notify(listeners: &[WeakLine]) {
    for listener in listeners {
        if let Some(line) = listener.upgrade() {
            line.redraw();
        }
    }
}

// ---------------------------------------------------------------------------
// Style
// ---------------------------------------------------------------------------

/// Color and weight applied to a part's text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartStyle {
    color: Option<Color>,
    bold: bool,
}

impl PartStyle {
    pub const fn plain() -> PartStyle {
        PartStyle {
            color: None,
            bold: false,
        }
    }

    pub const fn warning() -> PartStyle {
        PartStyle {
            color: Some(Color::Yellow),
            bold: false,
        }
    }

    pub const fn success() -> PartStyle {
        PartStyle {
            color: Some(Color::Green),
            bold: false,
        }
    }

    pub const fn error() -> PartStyle {
        PartStyle {
            color: Some(Color::Red),
            bold: false,
        }
    }

    pub const fn bold(self) -> PartStyle {
        PartStyle {
            color: self.color,
            bold: true,
        }
    }

    fn apply(&self, text: &str) -> String {
        let styled = match self.color {
            Some(color) => text.color(color),
            None => text.normal(),
        };
        let styled = if self.bold { styled.bold() } else { styled };
        styled.to_string()
    }
}

// ---------------------------------------------------------------------------
// TextPart
// ---------------------------------------------------------------------------

struct TextState {
    text: String,
    style: PartStyle,
    width: usize,
    listeners: Vec<WeakLine>,
}

/// A plain styled text fragment, optionally padded or truncated to a fixed
/// width. Width 0 means the part grows and shrinks with its text.
#[derive(Clone)]
pub struct TextPart {
    inner: Arc<Mutex<TextState>>,
}

impl TextPart {
    pub fn new(text: impl Into<String>) -> TextPart {
        TextPart {
            inner: Arc::new(Mutex::new(TextState {
                text: text.into(),
                style: PartStyle::plain(),
                width: 0,
                listeners: Vec::new(),
            })),
        }
    }

    pub fn with_style(self, style: PartStyle) -> TextPart {
        self.set_style(style);
        self
    }

    pub fn with_width(self, width: usize) -> TextPart {
        self.set_width(width);
        self
    }

    pub fn set_text(&self, text: impl Into<String>) {
        let listeners = {
            let mut state = self.inner.lock();
            state.text = text.into();
            state.listeners.clone()
        };
        notify(&listeners);
    }

    pub fn set_style(&self, style: PartStyle) {
        let listeners = {
            let mut state = self.inner.lock();
            state.style = style;
            state.listeners.clone()
        };
        notify(&listeners);
    }

    pub fn set_width(&self, width: usize) {
        let listeners = {
            let mut state = self.inner.lock();
            state.width = width;
            state.listeners.clone()
        };
        notify(&listeners);
    }
}

impl Part for TextPart {
    fn attach(&self, line: &Line) {
        attach_listener(&mut self.inner.lock().listeners, line);
    }

    fn render(&self) -> Rendered {
        let state = self.inner.lock();
        let display = if state.width == 0 {
            state.text.clone()
        } else {
            let chars = state.text.chars().count();
            if chars < state.width {
                let mut padded = state.text.clone();
                padded.extend(std::iter::repeat(' ').take(state.width - chars));
                padded
            } else {
                state.text.chars().take(state.width).collect()
            }
        };
        let width = display.chars().count();
        Rendered {
            text: state.style.apply(&display),
            width,
        }
    }
}

// ---------------------------------------------------------------------------
// StatusPart
// ---------------------------------------------------------------------------

/// Spinner animation period while a status is active.
const SPIN_INTERVAL: Duration = Duration::from_millis(300);

const PENDING_GLYPH: char = '?';
const SUCCESS_GLYPH: char = '✓';
const FAIL_GLYPH: char = '✘';

const SPINNER_CYCLES: &[&str] = &[
    "←↖↑↗→↘↓↙",
    "▁▃▄▅▆▇█▇▆▅▄▃▁",
    "▖▘▝▗",
    "┤┘┴└├┌┬┐",
    "◢◣◤◥",
    "◰◳◲◱",
    "◴◷◶◵",
    "◐◓◑◒",
    ".oO@*",
    "|/-\\",
    "◡◠⊙⊚⊛⊝⊜◠",
    "⣾⣽⣻⢿⡿⣟⣯⣷",
    "⠁⠂⠄⡀⢀⠠⠐⠈",
    "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏",
    "▉▊▋▌▍▎▏▎▍▌▋▊▉",
    "■□▪▫",
    "←↑→↓",
    "╫╪",
    "⇐⇖⇑⇗⇒⇘⇓⇙",
    "⠁⠁⠉⠙⠚⠒⠂⠂⠒⠲⠴⠤⠄⠄⠤⠠⠠⠤⠦⠖⠒⠐⠐⠒⠓⠋⠉⠈⠈",
    "⠈⠉⠋⠓⠒⠐⠐⠒⠖⠦⠤⠠⠠⠤⠦⠖⠒⠐⠐⠒⠓⠋⠉⠈",
    "⠁⠉⠙⠚⠒⠂⠂⠒⠲⠴⠤⠄⠄⠤⠴⠲⠒⠂⠂⠒⠚⠙⠉⠁",
    "⠋⠙⠚⠒⠂⠂⠒⠲⠴⠦⠖⠒⠐⠐⠒⠓⠋",
    "ｦｧｨｩｪｫｬｭｮｯｱｲｳｴｵｶｷｸｹｺｻｼｽｾｿﾀﾁﾂﾃﾄﾅﾆﾇﾈﾉﾊﾋﾌﾍﾎﾏﾐﾑﾒﾓﾔﾕﾖﾗﾘﾙﾚﾛﾜﾝ",
    "▁▂▃▄▅▆▇█▉▊▋▌▍▎▏▏▎▍▌▋▊▉█▇▆▅▄▃▂▁",
    ".oO°Oo.",
    "-+x*",
    "v<^>",
];

static NEXT_CYCLE: AtomicUsize = AtomicUsize::new(0);

/// Status of the work a line is reporting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Pending,
    Active,
    Success,
    Fail,
}

struct StatusState {
    status: Status,
    cycle: Vec<char>,
    frame: usize,
    /// Bumped on every transition; a ticker thread whose epoch no longer
    /// matches exits without touching the frame.
    epoch: u64,
    /// Dropping the sender wakes and stops the ticker thread.
    ticker: Option<mpsc::Sender<()>>,
    listeners: Vec<WeakLine>,
}

/// An animated status glyph: `Pending → Active → Success | Fail`, with
/// `Pending` re-enterable via [`StatusPart::reset`]. While active, a 300 ms
/// ticker advances the spinner frame and notifies listeners.
#[derive(Clone)]
pub struct StatusPart {
    inner: Arc<Mutex<StatusState>>,
}

impl StatusPart {
    /// A pending status with the next glyph cycle from the catalog.
    pub fn new() -> StatusPart {
        Self::with_cycle(NEXT_CYCLE.fetch_add(1, Ordering::Relaxed))
    }

    /// A pending status pinned to catalog entry `index % catalog size`.
    pub fn with_cycle(index: usize) -> StatusPart {
        let cycle = SPINNER_CYCLES[index % SPINNER_CYCLES.len()]
            .chars()
            .collect();
        StatusPart {
            inner: Arc::new(Mutex::new(StatusState {
                status: Status::Pending,
                cycle,
                frame: 0,
                epoch: 0,
                ticker: None,
                listeners: Vec::new(),
            })),
        }
    }

    pub fn status(&self) -> Status {
        self.inner.lock().status
    }

    pub fn frame(&self) -> usize {
        self.inner.lock().frame
    }

    /// Enter `Active`: reset the frame, start the spin ticker, notify once.
    /// Idempotent while already active — the frame counter and running
    /// ticker are left untouched.
    pub fn activate(&self) {
        let listeners = {
            let mut state = self.inner.lock();
            if state.status == Status::Active {
                return;
            }
            state.status = Status::Active;
            state.frame = 0;
            state.epoch += 1;
            let (stop_tx, stop_rx) = mpsc::channel();
            state.ticker = Some(stop_tx);
            let weak = Arc::downgrade(&self.inner);
            let epoch = state.epoch;
            thread::spawn(move || tick_loop(weak, stop_rx, epoch));
            state.listeners.clone()
        };
        notify(&listeners);
    }

    /// Back to `Pending`, stopping any running ticker.
    pub fn reset(&self) {
        self.settle(Status::Pending);
    }

    pub fn succeed(&self) {
        self.settle(Status::Success);
    }

    pub fn fail(&self) {
        self.settle(Status::Fail);
    }

    fn settle(&self, status: Status) {
        let listeners = {
            let mut state = self.inner.lock();
            state.ticker = None;
            state.epoch += 1;
            state.status = status;
            state.listeners.clone()
        };
        notify(&listeners);
    }
}

impl Default for StatusPart {
    fn default() -> StatusPart {
        StatusPart::new()
    }
}

impl Part for StatusPart {
    fn attach(&self, line: &Line) {
        attach_listener(&mut self.inner.lock().listeners, line);
    }

    fn render(&self) -> Rendered {
        let state = self.inner.lock();
        let (glyph, style) = match state.status {
            Status::Pending => (PENDING_GLYPH, PartStyle::warning()),
            Status::Active => (state.cycle[state.frame % state.cycle.len()], PartStyle::plain()),
            Status::Success => (SUCCESS_GLYPH, PartStyle::success()),
            Status::Fail => (FAIL_GLYPH, PartStyle::error()),
        };
        Rendered {
            text: style.apply(&glyph.to_string()),
            width: 1,
        }
    }
}

fn tick_loop(part: std::sync::Weak<Mutex<StatusState>>, stop: mpsc::Receiver<()>, epoch: u64) {
    while let Err(mpsc::RecvTimeoutError::Timeout) = stop.recv_timeout(SPIN_INTERVAL) {
        let Some(inner) = part.upgrade() else { return };
        let listeners = {
            let mut state = inner.lock();
            if state.epoch != epoch || state.status != Status::Active {
                return;
            }
            state.frame += 1;
            state.listeners.clone()
        };
        notify(&listeners);
    }
}
