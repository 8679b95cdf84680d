//! Countdown rendering

use std::io::{self, Write};

use crate::state::RemainingTime;
use super::controller::Status;

/// Where the countdown is shown
pub trait Screen {
    fn show_time(&mut self, time: RemainingTime);
    fn show_status(&mut self, status: Status);
}

/// Redraws a single terminal line: `HH:MM:SS  message  [start label]`
pub struct TerminalScreen<W: Write = io::Stdout> {
    out: W,
    time: RemainingTime,
    status: Status,
}

impl TerminalScreen {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalScreen<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            time: RemainingTime::zero(),
            status: Status::Ready,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// End the redrawn line
    pub fn finish(&mut self) {
        let _ = writeln!(self.out);
        let _ = self.out.flush();
    }

    fn redraw(&mut self) {
        // Write errors are ignored
        let _ = write!(
            self.out,
            "\r{}  {}  [{}]",
            self.time,
            self.status.message(),
            self.status.start_label()
        );
        let _ = self.out.flush();
    }
}

impl<W: Write> Screen for TerminalScreen<W> {
    fn show_time(&mut self, time: RemainingTime) {
        self.time = time;
        self.redraw();
    }

    fn show_status(&mut self, status: Status) {
        self.status = status;
        self.redraw();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redraws_line() {
        let mut screen = TerminalScreen::new(Vec::new());
        screen.show_status(Status::Cooldown);
        screen.show_time(RemainingTime::from_millis(3_725_000));

        let output = String::from_utf8(screen.into_inner()).unwrap();
        let last = output.rsplit('\r').next().unwrap();
        assert_eq!(last, "01:02:05  Cooldown Active  [On Cooldown]");
    }
}
