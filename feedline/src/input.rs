use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Length bound for an accumulated escape sequence. Anything longer
/// is discarded.
pub(crate) const SEQUENCE_MAX_LEN: usize = 16;

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Eq, PartialEq, Copy, Clone, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum ControlCharacter {
    NUL = 0x0,
    CtrlA = 0x1,
    CtrlB = 0x2,
    CtrlC = 0x3,
    CtrlD = 0x4,
    CtrlE = 0x5,
    CtrlF = 0x6,
    CtrlG = 0x7,
    CtrlH = 0x8,
    Tab = 0x9,
    LineFeed = 0xA,
    CtrlK = 0xB,
    CtrlL = 0xC,
    CarriageReturn = 0xD,
    CtrlN = 0xE,
    CtrlO = 0xF,
    CtrlP = 0x10,
    CtrlQ = 0x11,
    CtrlR = 0x12,
    CtrlS = 0x13,
    CtrlT = 0x14,
    CtrlU = 0x15,
    CtrlV = 0x16,
    CtrlW = 0x17,
    CtrlX = 0x18,
    CtrlY = 0x19,
    CtrlZ = 0x1A,
    Escape = 0x1B,
    FS = 0x1C,
    GS = 0x1D,
    RS = 0x1E,
    US = 0x1F,
    Backspace = 0x7F,
}

/// Keys decoded from the recognized escape sequences.
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum EscapeKey {
    Up,
    Down,
    Forward,
    Backward,
    Delete,
    Home,
    End,
}

impl EscapeKey {
    fn from_sequence(seq: &[u8]) -> Option<Self> {
        Some(match seq {
            b"\x1b[A" => Self::Up,
            b"\x1b[B" => Self::Down,
            b"\x1b[C" => Self::Forward,
            b"\x1b[D" => Self::Backward,
            b"\x1b[3~" => Self::Delete,
            b"\x1b[1~" => Self::Home,
            b"\x1b[4~" => Self::End,
            _ => return None,
        })
    }
}

/// Classification of a single input byte.
#[cfg_attr(test, derive(Debug))]
#[derive(Eq, PartialEq, Copy, Clone)]
pub enum Input {
    /// Plain byte to be inserted into the line.
    Literal(u8),
    /// Control byte outside an escape sequence.
    Control(ControlCharacter),
    /// A complete, recognized escape sequence.
    Key(EscapeKey),
    /// Mid-sequence, nothing to do yet.
    Pending,
    /// Recognized but unhandled sequence (function keys etc.), or a
    /// discarded overlong one.
    Ignored,
}

/// Byte-at-a-time escape sequence decoder.
///
/// Escape starts a new sequence unconditionally. Carriage return and
/// Ctrl-C take priority even mid-sequence, so a truncated arrow key
/// can never swallow line submission.
pub(crate) struct Decoder {
    pending: [u8; SEQUENCE_MAX_LEN],
    len: usize,
}

impl Decoder {
    pub(crate) fn new() -> Self {
        Self {
            pending: [0; SEQUENCE_MAX_LEN],
            len: 0,
        }
    }

    pub(crate) fn reset(&mut self) {
        self.len = 0;
    }

    pub(crate) fn advance(&mut self, byte: u8) -> Input {
        use ControlCharacter::*;

        match ControlCharacter::try_from(byte) {
            Ok(Escape) => {
                self.len = 0;
                self.push(byte);
                Input::Pending
            }
            Ok(CarriageReturn) => {
                self.len = 0;
                Input::Control(CarriageReturn)
            }
            Ok(CtrlC) => {
                self.len = 0;
                Input::Control(CtrlC)
            }
            _ if self.len > 0 => self.accumulate(byte),
            Ok(c) => Input::Control(c),
            Err(_) => Input::Literal(byte),
        }
    }

    fn push(&mut self, byte: u8) {
        self.pending[self.len] = byte;
        self.len += 1;
    }

    fn accumulate(&mut self, byte: u8) -> Input {
        if self.len == SEQUENCE_MAX_LEN {
            self.len = 0;
            return Input::Ignored;
        }

        self.push(byte);

        if let Some(key) = EscapeKey::from_sequence(&self.pending[..self.len]) {
            self.len = 0;
            Input::Key(key)
        } else if byte == b'~' {
            // Function keys, insert and friends all end in `~`
            self.len = 0;
            Input::Ignored
        } else {
            Input::Pending
        }
    }
}
