//! The canonical two-task scenario: two lines, each showing a status glyph
//! and a label, settling into one success and one failure.

use reposync_sticky::{Block, Part, PartStyle, StatusPart, Terminal, TextPart};

#[test]
fn two_lines_settle_into_success_and_failure() {
    let (term, _capture) = Terminal::capture();
    let block = Block::with_terminal(term, 2);

    let status_a = StatusPart::with_cycle(0);
    let label_a = TextPart::new(" clone a");
    block.line(0).display(vec![
        Box::new(status_a.clone()) as Box<dyn Part>,
        Box::new(label_a.clone()),
    ]);

    let status_b = StatusPart::with_cycle(1);
    let label_b = TextPart::new(" clone b");
    block.line(1).display(vec![
        Box::new(status_b.clone()) as Box<dyn Part>,
        Box::new(label_b.clone()),
    ]);

    status_a.succeed();
    status_b.fail();
    label_b.set_text(" clone b: timeout");
    label_b.set_style(PartStyle::error().bold());

    let top = block.line(0).content();
    assert!(top.contains('✓'), "got: {top:?}");
    assert!(top.contains("clone a"), "got: {top:?}");

    let bottom = block.line(1).content();
    assert!(bottom.contains('✘'), "got: {bottom:?}");
    assert!(bottom.contains("clone b: timeout"), "got: {bottom:?}");
}

#[test]
fn part_mutations_redraw_every_line_displaying_the_part() {
    let (term, capture) = Terminal::capture();
    let block = Block::with_terminal(term, 2);

    let shared = TextPart::new("shared");
    block
        .line(0)
        .display(vec![Box::new(shared.clone()) as Box<dyn Part>]);
    block
        .line(1)
        .display(vec![Box::new(shared.clone()) as Box<dyn Part>]);

    let before = capture.bytes().len();
    shared.set_text("changed");
    let emitted = capture.string()[before..].to_string();

    // Both depths repainted from one mutation.
    assert!(emitted.contains("\x1b[2A"), "got: {emitted:?}");
    assert!(emitted.contains("\x1b[1A"), "got: {emitted:?}");
    assert_eq!(emitted.matches("changed").count(), 2);
}

#[test]
fn redisplaying_a_part_does_not_duplicate_redraws() {
    let (term, capture) = Terminal::capture();
    let block = Block::with_terminal(term, 1);
    let line = block.line(0);

    let text = TextPart::new("once");
    for _ in 0..5 {
        line.display(vec![Box::new(text.clone()) as Box<dyn Part>]);
    }

    let before = capture.bytes().len();
    text.set_text("mutated");
    let emitted = capture.string()[before..].to_string();
    assert_eq!(
        emitted.matches("mutated").count(),
        1,
        "duplicate listener registrations: {emitted:?}"
    );
}
