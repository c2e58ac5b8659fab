//! The VT100 subset the editor emits.

pub(crate) const ERASE_LINE: &[u8] = b"\x1b[2K";
pub(crate) const ERASE_TO_END: &[u8] = b"\x1b[K";
pub(crate) const CURSOR_FORWARD: &[u8] = b"\x1b[C";
pub(crate) const CURSOR_BACKWARD: &[u8] = b"\x1b[D";
pub(crate) const NEWLINE: &[u8] = b"\r\n";

/// Fixed staging area for a relative cursor move, `ESC [ <n> C/D`
/// assembled without allocation.
pub(crate) struct CursorSteps {
    bytes: [u8; 8],
    len: usize,
}

impl CursorSteps {
    /// Move `n` columns left. `n` must be nonzero and below 10000.
    pub(crate) fn left(n: usize) -> Self {
        Self::new(n, b'D')
    }

    /// Move `n` columns right.
    pub(crate) fn right(n: usize) -> Self {
        Self::new(n, b'C')
    }

    fn new(n: usize, direction: u8) -> Self {
        debug_assert!(n > 0 && n < 10_000);

        let mut digits = [0; 4];
        let mut m = n;
        let mut count = 0;

        loop {
            digits[count] = b'0' + (m % 10) as u8;
            m /= 10;
            count += 1;

            if m == 0 {
                break;
            }
        }

        let mut bytes = [0; 8];
        bytes[0] = 0x1b;
        bytes[1] = b'[';

        let mut len = 2;
        for i in (0..count).rev() {
            bytes[len] = digits[i];
            len += 1;
        }

        bytes[len] = direction;
        len += 1;

        Self { bytes, len }
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_digit() {
        assert_eq!(CursorSteps::left(1).as_bytes(), b"\x1b[1D");
        assert_eq!(CursorSteps::right(9).as_bytes(), b"\x1b[9C");
    }

    #[test]
    fn multiple_digits() {
        assert_eq!(CursorSteps::left(10).as_bytes(), b"\x1b[10D");
        assert_eq!(CursorSteps::left(307).as_bytes(), b"\x1b[307D");
        assert_eq!(CursorSteps::right(9999).as_bytes(), b"\x1b[9999C");
    }
}
