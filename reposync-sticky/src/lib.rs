//! # reposync-sticky
//!
//! Sticky multi-line terminal status rendering.
//!
//! Reserve a fixed-height [`Block`] of rows at the bottom of the scroll
//! region, hand out addressable [`Line`] handles, and let concurrent tasks
//! repaint their own row in place with cursor-relative escape sequences.
//! Lines render [`Part`]s — plain styled text ([`TextPart`]) or an animated
//! status glyph ([`StatusPart`]) — and any part mutation redraws every line
//! that currently displays it.
//!
//! All output is serialized through a single [`Terminal`] lock; terminals
//! have no addressable rows, so each line tracks its own depth (distance in
//! rows from the live cursor) and addresses itself with `ESC[<depth>A`.

pub mod block;
pub mod line;
pub mod part;
pub mod terminal;

pub use block::Block;
pub use line::Line;
pub use part::{Part, PartStyle, Rendered, Status, StatusPart, TextPart};
pub use terminal::{Capture, Terminal};
