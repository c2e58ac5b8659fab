//! Feedline is an IO-free `#[no_std]` line editor fed one byte at a
//! time. Input bytes go in as they arrive from a serial port, socket
//! or pty; display bytes and completed lines come back out through a
//! [`Handler`](editor::Handler). Nothing blocks and nothing allocates,
//! so the editor fits embedded targets and event loops as well as
//! plain blocking servers.
//!
//! Features:
//! - Inline editing with cursor movement (arrows, home, end, delete)
//! - Recall history browsed with up/down, over caller-supplied storage
//! - Optional tab completion
//! - Optional echo suppression for password style input
//! - VT100 escape decoding on input, VT100 redraw sequences on output
//!
//! Example:
//! ```no_run
//! use feedline::builder::EditorBuilder;
//! use feedline::editor::{Control, Handler};
//!
//! struct Console;
//! # impl embedded_io::ErrorType for Console {
//! #     type Error = core::convert::Infallible;
//! # }
//! # impl embedded_io::Write for Console {
//! #     fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
//! #         Ok(buf.len())
//! #     }
//! #     fn flush(&mut self) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//!
//! impl Handler for Console {
//!     fn line_read(&mut self, line: &[u8], _control: &mut Control<'_, '_>) {
//!         // act on the completed line
//!     }
//! }
//!
//! let mut line = [0; 64];
//! let mut entries = [0; 10 * 66];
//!
//! let mut editor = EditorBuilder::from_slice(&mut line)
//!     .with_slot_history(&mut entries, 64)
//!     .build();
//!
//! let mut console = Console;
//! # let input: &[u8] = b"";
//! for &byte in input {
//!     editor.feed(byte, &mut console).unwrap();
//! }
//! ```

#![no_std]

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod builder;
pub mod editor;
pub mod error;
pub mod history;
pub mod input;
pub mod line_buffer;
mod output;

#[cfg(test)]
mod testlib;
