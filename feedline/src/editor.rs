//! The editor itself: a state machine fed one byte at a time.
//!
//! [`Editor::feed`] consumes a single input byte and emits zero or
//! more output byte slices through the [`Handler`], keeping the
//! visible line in sync with the edit buffer. The editor performs no
//! IO of its own and never blocks.

use embedded_io::Error as _;

use crate::error::Error;
use crate::history::{BrowseCursor, History};
use crate::input::{ControlCharacter, Decoder, EscapeKey, Input};
use crate::line_buffer::{Buffer, LineBuffer};
use crate::output::{
    CursorSteps, CURSOR_BACKWARD, CURSOR_FORWARD, ERASE_LINE, ERASE_TO_END, NEWLINE,
};

/// Collaborator supplied by the application.
///
/// The transport doubles as the output sink via [`embedded_io::Write`];
/// everything the editor wants displayed goes through it.
pub trait Handler: embedded_io::Write {
    /// Called once for every submitted line, after the history has
    /// been updated and before the prompt is redrawn. The handler may
    /// write its own output and may adjust the editor through
    /// `control`.
    fn line_read(&mut self, line: &[u8], control: &mut Control<'_, '_>);

    /// Completion request for Tab: return a full replacement line.
    /// The default implementation disables completion.
    fn suggest(&mut self, _line: &[u8]) -> Option<&str> {
        None
    }
}

/// Editor handle passed to [`Handler::line_read`].
///
/// History changes take effect immediately. Prompt and echo changes
/// are applied when the callback returns, just before the prompt
/// redraw, which is also the first moment they could become visible.
pub struct Control<'a, 'p> {
    history: &'a mut dyn History,
    browse: &'a mut BrowseCursor,
    prompt: Option<&'p str>,
    echo_suppressed: Option<bool>,
}

impl<'a, 'p> Control<'a, 'p> {
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Entry by recency number, `0` being the most recent.
    pub fn history_entry(&self, n: usize) -> Option<&[u8]> {
        self.history.entry(n)
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
        self.browse.reset();
    }

    pub fn set_prompt(&mut self, prompt: &'p str) {
        self.prompt = Some(prompt);
    }

    pub fn set_echo_suppressed(&mut self, suppressed: bool) {
        self.echo_suppressed = Some(suppressed);
    }
}

/// Line editor over caller-supplied storage.
///
/// One instance serves one session. All buffers are handed over at
/// construction; nothing is allocated while feeding bytes.
pub struct Editor<'p, B: Buffer, H: History> {
    buffer: LineBuffer<B>,
    cursor: usize,
    decoder: Decoder,
    history: H,
    browse: BrowseCursor,
    prompt: &'p str,
    echo_suppressed: bool,
}

impl<'p, B: Buffer, H: History> Editor<'p, B, H> {
    pub fn new(buffer: LineBuffer<B>, history: H) -> Self {
        Self {
            buffer,
            cursor: 0,
            decoder: Decoder::new(),
            history,
            browse: BrowseCursor::new(),
            prompt: "",
            echo_suppressed: false,
        }
    }

    /// Consume one input byte.
    ///
    /// A write failure aborts the current call only; the editor state
    /// stays consistent and later bytes are processed as usual.
    pub fn feed<T: Handler + ?Sized>(&mut self, byte: u8, handler: &mut T) -> Result<(), Error> {
        match self.decoder.advance(byte) {
            Input::Pending | Input::Ignored => Ok(()),
            Input::Key(key) => self.handle_key(key, handler),
            Input::Control(c) => self.handle_control(c, handler),
            Input::Literal(byte) => self.insert(byte, handler),
        }
    }

    /// Change the prompt and redraw the current line around it.
    pub fn set_prompt<T: Handler + ?Sized>(
        &mut self,
        prompt: &'p str,
        handler: &mut T,
    ) -> Result<(), Error> {
        self.prompt = prompt;

        self.emit(handler, ERASE_LINE)?;
        self.emit(handler, b"\r")?;
        self.emit(handler, self.prompt.as_bytes())?;

        if !self.buffer.is_empty() {
            self.emit(handler, self.buffer.as_slice())?;
        }
        if self.cursor < self.buffer.len() {
            let steps = CursorSteps::left(self.buffer.len() - self.cursor);
            self.emit(handler, steps.as_bytes())?;
        }

        Ok(())
    }

    /// When suppressed, the editor emits nothing: no keystroke echo,
    /// no redraws, no newline or prompt. Output written directly by
    /// the handler is not affected. Input is still processed.
    pub fn set_echo_suppressed(&mut self, suppressed: bool) {
        self.echo_suppressed = suppressed;
    }

    /// Line typed so far.
    pub fn line(&self) -> &[u8] {
        self.buffer.as_slice()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Entry by recency number, `0` being the most recent.
    pub fn history_entry(&self, n: usize) -> Option<&[u8]> {
        self.history.entry(n)
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
        self.browse.reset();
    }

    fn emit<T: Handler + ?Sized>(&self, handler: &mut T, bytes: &[u8]) -> Result<(), Error> {
        if self.echo_suppressed {
            return Ok(());
        }

        handler
            .write_all(bytes)
            .map_err(|e| Error::Write(e.kind()))
    }

    /// Erase the visible line and print prompt plus buffer. Callers
    /// must leave the cursor at the end of the buffer.
    fn redraw_line<T: Handler + ?Sized>(&self, handler: &mut T) -> Result<(), Error> {
        self.emit(handler, ERASE_LINE)?;
        self.emit(handler, b"\r")?;
        self.emit(handler, self.prompt.as_bytes())?;
        self.emit(handler, self.buffer.as_slice())
    }

    fn handle_control<T: Handler + ?Sized>(
        &mut self,
        c: ControlCharacter,
        handler: &mut T,
    ) -> Result<(), Error> {
        use ControlCharacter::*;

        match c {
            CarriageReturn => self.submit(handler),
            CtrlC => self.abort(handler),
            Tab => self.complete(handler),
            Backspace => self.backspace(handler),
            // Anything unrecognized lands in the line like a plain byte
            other => self.insert(other.into(), handler),
        }
    }

    fn handle_key<T: Handler + ?Sized>(
        &mut self,
        key: EscapeKey,
        handler: &mut T,
    ) -> Result<(), Error> {
        match key {
            EscapeKey::Up => self.history_up(handler),
            EscapeKey::Down => self.history_down(handler),
            EscapeKey::Forward => {
                if self.cursor < self.buffer.len() {
                    self.cursor += 1;
                    self.emit(handler, CURSOR_FORWARD)?;
                }
                Ok(())
            }
            EscapeKey::Backward => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    self.emit(handler, CURSOR_BACKWARD)?;
                }
                Ok(())
            }
            EscapeKey::Delete => self.delete_at_cursor(handler),
            EscapeKey::Home => {
                if self.cursor > 0 {
                    let steps = CursorSteps::left(self.cursor);
                    self.cursor = 0;
                    self.emit(handler, steps.as_bytes())?;
                }
                Ok(())
            }
            EscapeKey::End => {
                if self.cursor < self.buffer.len() {
                    let steps = CursorSteps::right(self.buffer.len() - self.cursor);
                    self.cursor = self.buffer.len();
                    self.emit(handler, steps.as_bytes())?;
                }
                Ok(())
            }
        }
    }

    fn insert<T: Handler + ?Sized>(&mut self, byte: u8, handler: &mut T) -> Result<(), Error> {
        if self.buffer.insert(self.cursor, byte).is_err() {
            // Line at capacity, byte is dropped
            return Ok(());
        }

        // Buffer and cursor move together before any emit, so a write
        // failure cannot leave them out of step
        self.cursor += 1;

        if self.cursor == self.buffer.len() {
            self.emit(handler, &[byte])
        } else {
            // Print the new byte and the shifted tail, then step back
            // over the tail
            let tail_len = self.buffer.len() - self.cursor;
            self.emit(handler, self.buffer.tail(self.cursor - 1))?;
            self.emit(handler, CursorSteps::left(tail_len).as_bytes())
        }
    }

    fn backspace<T: Handler + ?Sized>(&mut self, handler: &mut T) -> Result<(), Error> {
        if self.cursor == 0 {
            return Ok(());
        }

        self.emit(handler, &[ControlCharacter::Backspace.into()])?;

        let mid_line = self.cursor < self.buffer.len();
        self.buffer.remove(self.cursor - 1);
        self.cursor -= 1;

        if mid_line {
            let tail_len = self.buffer.len() - self.cursor;
            self.emit(handler, ERASE_TO_END)?;
            self.emit(handler, self.buffer.tail(self.cursor))?;
            self.emit(handler, CursorSteps::left(tail_len).as_bytes())?;
        }

        Ok(())
    }

    fn delete_at_cursor<T: Handler + ?Sized>(&mut self, handler: &mut T) -> Result<(), Error> {
        if self.cursor >= self.buffer.len() {
            return Ok(());
        }

        // Erase first so no stale tail byte stays visible
        self.emit(handler, ERASE_TO_END)?;
        self.buffer.remove(self.cursor);

        if self.cursor < self.buffer.len() {
            let tail_len = self.buffer.len() - self.cursor;
            self.emit(handler, self.buffer.tail(self.cursor))?;
            self.emit(handler, CursorSteps::left(tail_len).as_bytes())?;
        }

        Ok(())
    }

    fn history_up<T: Handler + ?Sized>(&mut self, handler: &mut T) -> Result<(), Error> {
        let Some(entry) = self.browse.older(&self.history) else {
            return Ok(());
        };

        self.buffer.set(entry);
        self.cursor = self.buffer.len();
        self.redraw_line(handler)
    }

    fn history_down<T: Handler + ?Sized>(&mut self, handler: &mut T) -> Result<(), Error> {
        match self.browse.newer(&self.history) {
            Some(entry) => self.buffer.set(entry),
            None => self.buffer.clear(),
        }

        self.cursor = self.buffer.len();
        self.redraw_line(handler)
    }

    fn complete<T: Handler + ?Sized>(&mut self, handler: &mut T) -> Result<(), Error> {
        let Some(suggestion) = handler.suggest(self.buffer.as_slice()) else {
            return Ok(());
        };

        self.buffer.set(suggestion.as_bytes());
        self.cursor = self.buffer.len();
        self.redraw_line(handler)
    }

    // The whole submission flow runs even when a write fails: the line
    // must reach the handler exactly once, and a retried Enter must not
    // record it into history twice. Write errors are reported at the
    // end.
    fn submit<T: Handler + ?Sized>(&mut self, handler: &mut T) -> Result<(), Error> {
        if !self.buffer.is_empty() {
            self.history.push(self.buffer.as_slice());
        }
        self.browse.reset();

        let newline_result = self.emit(handler, NEWLINE);

        let mut control = Control {
            history: &mut self.history,
            browse: &mut self.browse,
            prompt: None,
            echo_suppressed: None,
        };
        handler.line_read(self.buffer.as_slice(), &mut control);

        let Control {
            prompt,
            echo_suppressed,
            ..
        } = control;

        if let Some(prompt) = prompt {
            self.prompt = prompt;
        }
        if let Some(suppressed) = echo_suppressed {
            self.echo_suppressed = suppressed;
        }

        self.buffer.clear();
        self.cursor = 0;
        self.decoder.reset();

        newline_result.and(self.emit(handler, self.prompt.as_bytes()))
    }

    fn abort<T: Handler + ?Sized>(&mut self, handler: &mut T) -> Result<(), Error> {
        self.buffer.clear();
        self.cursor = 0;
        self.decoder.reset();
        self.browse.reset();

        self.emit(handler, NEWLINE)?;
        self.emit(handler, self.prompt.as_bytes())
    }
}
