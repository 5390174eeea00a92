//! Task-with-reporter: run a fallible unit of work while a sticky line
//! shows its live status.

use std::fmt;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use reposync_sticky::{Line, Part, PartStyle, StatusPart, TextPart};

/// How often the reporting loop refreshes the line while the work runs.
pub const REPORT_INTERVAL: Duration = Duration::from_secs(1);

/// Run `work` on its own thread while `line` reports on it.
///
/// Once per second until completion, the line is redrawn with an active
/// spinner and the description in bold yellow. On completion exactly one
/// terminal transition happens: `Success` with the description in bold
/// green, or `Fail` with the error appended in bold red. The work's own
/// result is returned either way — the visual state never swallows it.
///
/// The reporting loop is the 1-second ticker, so it stops on every exit
/// path, including a panicking worker (the panic is resumed here).
pub fn with_status_line<T, E, F>(line: &Line, description: &str, work: F) -> Result<T, E>
where
    F: FnOnce() -> Result<T, E> + Send,
    T: Send,
    E: fmt::Display + Send,
{
    thread::scope(|scope| {
        let (done_tx, done_rx) = mpsc::channel();
        let worker = scope.spawn(move || {
            let _ = done_tx.send(work());
        });

        let status = StatusPart::new();
        let label = format!(" {description}");
        loop {
            match done_rx.recv_timeout(REPORT_INTERVAL) {
                Err(mpsc::RecvTimeoutError::Timeout) => {
                    status.activate();
                    line.display(vec![
                        Box::new(status.clone()) as Box<dyn Part>,
                        Box::new(TextPart::new(&label).with_style(PartStyle::warning().bold())),
                    ]);
                }
                Ok(result) => {
                    match &result {
                        Ok(_) => {
                            status.succeed();
                            line.display(vec![
                                Box::new(status.clone()) as Box<dyn Part>,
                                Box::new(
                                    TextPart::new(&label)
                                        .with_style(PartStyle::success().bold()),
                                ),
                            ]);
                        }
                        Err(err) => {
                            status.fail();
                            line.display(vec![
                                Box::new(status.clone()) as Box<dyn Part>,
                                Box::new(
                                    TextPart::new(format!("{label}: {err}"))
                                        .with_style(PartStyle::error().bold()),
                                ),
                            ]);
                        }
                    }
                    return result;
                }
                Err(mpsc::RecvTimeoutError::Disconnected) => {
                    // The worker panicked without sending a result.
                    match worker.join() {
                        Err(panic) => std::panic::resume_unwind(panic),
                        Ok(()) => unreachable!("worker exited without a result"),
                    }
                }
            }
        }
    })
}
