//! Test support: a small VT100 interpreter covering exactly the
//! sequences the editor emits, and a scripted [`Handler`].

use std::string::String;
use std::vec::Vec;

use crate::editor::{Control, Handler};

/// Input byte sequences for the keys the editor understands.
pub(crate) mod keys {
    pub const UP: &[u8] = b"\x1b[A";
    pub const DOWN: &[u8] = b"\x1b[B";
    pub const RIGHT: &[u8] = b"\x1b[C";
    pub const LEFT: &[u8] = b"\x1b[D";
    pub const HOME: &[u8] = b"\x1b[1~";
    pub const DELETE: &[u8] = b"\x1b[3~";
    pub const END: &[u8] = b"\x1b[4~";
}

/// Screen model driven by the editor's output bytes.
///
/// Understands CR, LF, destructive backspace (0x7f) and the CSI
/// sequences `K`, `2K`, `C`, `D` with optional count.
pub(crate) struct TerminalState {
    lines: Vec<Vec<u8>>,
    row: usize,
    col: usize,
    escape: Option<Vec<u8>>,
}

impl TerminalState {
    pub(crate) fn new() -> Self {
        Self {
            lines: Vec::new(),
            row: 0,
            col: 0,
            escape: None,
        }
    }

    pub(crate) fn advance(&mut self, byte: u8) {
        if let Some(escape) = self.escape.as_mut() {
            escape.push(byte);

            if byte.is_ascii_alphabetic() || byte == b'~' {
                let escape = self.escape.take().unwrap();
                self.apply_escape(&escape);
            }
            return;
        }

        match byte {
            0x1b => self.escape = Some(Vec::new()),
            b'\r' => self.col = 0,
            b'\n' => self.row += 1,
            0x7f => {
                if self.col > 0 {
                    self.col -= 1;
                    let col = self.col;
                    let line = self.line_mut();
                    if col + 1 == line.len() {
                        line.truncate(col);
                    } else if col < line.len() {
                        line[col] = b' ';
                    }
                }
            }
            byte => {
                let col = self.col;
                let line = self.line_mut();

                while line.len() < col {
                    line.push(b' ');
                }
                if col < line.len() {
                    line[col] = byte;
                } else {
                    line.push(byte);
                }

                self.col += 1;
            }
        }
    }

    fn apply_escape(&mut self, sequence: &[u8]) {
        assert_eq!(sequence.first(), Some(&b'['), "unexpected escape");

        let digits = &sequence[1..sequence.len() - 1];
        let argument = core::str::from_utf8(digits)
            .ok()
            .and_then(|s| s.parse::<usize>().ok());

        match sequence.last() {
            Some(b'K') => match argument.unwrap_or(0) {
                0 => {
                    let col = self.col;
                    self.line_mut().truncate(col);
                }
                2 => self.line_mut().clear(),
                n => panic!("unsupported erase mode {}", n),
            },
            Some(b'C') => self.col += argument.unwrap_or(1),
            Some(b'D') => self.col = self.col.saturating_sub(argument.unwrap_or(1)),
            _ => panic!("unsupported sequence {:?}", sequence),
        }
    }

    fn line_mut(&mut self) -> &mut Vec<u8> {
        while self.lines.len() <= self.row {
            self.lines.push(Vec::new());
        }

        &mut self.lines[self.row]
    }

    /// Everything written on the row the cursor is on, spaces
    /// included. Prompts like `"> "` keep their trailing space.
    pub(crate) fn current_line(&self) -> String {
        let line = self
            .lines
            .get(self.row)
            .map(|line| line.as_slice())
            .unwrap_or(&[]);

        String::from_utf8(line.to_vec()).unwrap()
    }

    pub(crate) fn col(&self) -> usize {
        self.col
    }
}

/// Handler that records everything and can be primed with reactions.
pub(crate) struct TestHandler {
    pub(crate) term: TerminalState,
    /// Every byte the editor wrote, unfiltered.
    pub(crate) raw: Vec<u8>,
    /// Lines passed to `line_read`, in order.
    pub(crate) lines: Vec<Vec<u8>>,
    pub(crate) suggestion: Option<String>,
    pub(crate) clear_history_on_next_line: bool,
    pub(crate) prompt_on_next_line: Option<&'static str>,
    pub(crate) echo_on_next_line: Option<bool>,
    pub(crate) fail_writes: bool,
}

impl TestHandler {
    pub(crate) fn new() -> Self {
        Self {
            term: TerminalState::new(),
            raw: Vec::new(),
            lines: Vec::new(),
            suggestion: None,
            clear_history_on_next_line: false,
            prompt_on_next_line: None,
            echo_on_next_line: None,
            fail_writes: false,
        }
    }
}

impl embedded_io::ErrorType for TestHandler {
    type Error = embedded_io::ErrorKind;
}

impl embedded_io::Write for TestHandler {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        if self.fail_writes {
            return Err(embedded_io::ErrorKind::Other);
        }

        self.raw.extend_from_slice(buf);
        for &byte in buf {
            self.term.advance(byte);
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl Handler for TestHandler {
    fn line_read(&mut self, line: &[u8], control: &mut Control<'_, '_>) {
        self.lines.push(line.to_vec());

        if self.clear_history_on_next_line {
            control.clear_history();
            self.clear_history_on_next_line = false;
        }
        if let Some(prompt) = self.prompt_on_next_line.take() {
            control.set_prompt(prompt);
        }
        if let Some(suppressed) = self.echo_on_next_line.take() {
            control.set_echo_suppressed(suppressed);
        }
    }

    fn suggest(&mut self, _line: &[u8]) -> Option<&str> {
        self.suggestion.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_and_carriage_return() {
        let mut term = TerminalState::new();

        for &byte in b"hello\rH" {
            term.advance(byte);
        }

        assert_eq!(term.current_line(), "Hello");
        assert_eq!(term.col(), 1);
    }

    #[test]
    fn erase_sequences() {
        let mut term = TerminalState::new();

        for &byte in b"abcdef\x1b[3D\x1b[K" {
            term.advance(byte);
        }
        assert_eq!(term.current_line(), "abc");

        for &byte in b"\x1b[2K" {
            term.advance(byte);
        }
        assert_eq!(term.current_line(), "");
    }

    #[test]
    fn counted_cursor_moves() {
        let mut term = TerminalState::new();

        for &byte in b"abcdef\x1b[4Dx" {
            term.advance(byte);
        }

        assert_eq!(term.current_line(), "abxdef");
        assert_eq!(term.col(), 3);
    }

    #[test]
    fn trailing_prompt_space_is_kept() {
        let mut term = TerminalState::new();

        for &byte in b"> " {
            term.advance(byte);
        }

        assert_eq!(term.current_line(), "> ");
        assert_eq!(term.col(), 2);
    }

    #[test]
    fn destructive_backspace() {
        let mut term = TerminalState::new();

        for &byte in b"ab\x7f" {
            term.advance(byte);
        }
        assert_eq!(term.current_line(), "a");
        assert_eq!(term.col(), 1);

        // Mid-line it only blanks the cell under the cursor
        let mut term = TerminalState::new();
        for &byte in b"abc\x1b[2D\x7f" {
            term.advance(byte);
        }
        assert_eq!(term.current_line(), " bc");
        assert_eq!(term.col(), 0);
    }

    #[test]
    fn newline_moves_to_next_row() {
        let mut term = TerminalState::new();

        for &byte in b"one\r\ntwo" {
            term.advance(byte);
        }

        assert_eq!(term.current_line(), "two");
    }
}
