//! Builder for configuring an [`Editor`] before use.

use crate::editor::Editor;
use crate::history::{History, NoHistory, SlotHistory};
use crate::line_buffer::{Buffer, LineBuffer, SliceBuffer};

#[cfg(any(test, feature = "std"))]
use crate::{history::AllocHistory, line_buffer::UnboundedBuffer};

/// Assembles an [`Editor`] from its storage pieces.
///
/// Start from [`EditorBuilder::from_slice`] (or
/// [`EditorBuilder::new_unbounded`] with the `std` feature), attach a
/// history store if wanted, then call [`build`](EditorBuilder::build).
///
/// ```no_run
/// use feedline::builder::EditorBuilder;
///
/// let mut line = [0; 64];
/// let mut entries = [0; 10 * 66];
///
/// let mut editor = EditorBuilder::from_slice(&mut line)
///     .with_slot_history(&mut entries, 64)
///     .build();
/// # let _ = editor.line();
/// ```
pub struct EditorBuilder<B: Buffer, H: History> {
    line_buffer: LineBuffer<B>,
    history: H,
}

impl<'a> EditorBuilder<SliceBuffer<'a>, NoHistory> {
    /// Editor over a caller-supplied line buffer, without history.
    pub fn from_slice(buffer: &'a mut [u8]) -> Self {
        Self {
            line_buffer: LineBuffer::with_buffer(SliceBuffer::new(buffer)),
            history: NoHistory::new(),
        }
    }
}

#[cfg(any(test, feature = "std"))]
impl EditorBuilder<UnboundedBuffer, NoHistory> {
    /// Editor with a heap-backed line buffer, without history.
    pub fn new_unbounded() -> Self {
        Self {
            line_buffer: LineBuffer::with_buffer(UnboundedBuffer::new()),
            history: NoHistory::new(),
        }
    }
}

impl<B: Buffer, H: History> EditorBuilder<B, H> {
    /// Attach a history ring over caller-supplied storage. `entry_len`
    /// is the longest line an entry can retain; see
    /// [`SlotHistory`](crate::history::SlotHistory) for the slot
    /// layout.
    pub fn with_slot_history<'h>(
        self,
        buffer: &'h mut [u8],
        entry_len: usize,
    ) -> EditorBuilder<B, SlotHistory<'h>> {
        EditorBuilder {
            line_buffer: self.line_buffer,
            history: SlotHistory::new(buffer, entry_len),
        }
    }

    /// Attach a heap-backed history keeping the last `max_entries`
    /// lines.
    #[cfg(any(test, feature = "std"))]
    pub fn with_alloc_history(self, max_entries: usize) -> EditorBuilder<B, AllocHistory> {
        EditorBuilder {
            line_buffer: self.line_buffer,
            history: AllocHistory::new(max_entries),
        }
    }

    /// Finish the build. The editor starts with an empty prompt; use
    /// [`Editor::set_prompt`] to draw one.
    pub fn build<'p>(self) -> Editor<'p, B, H> {
        Editor::new(self.line_buffer, self.history)
    }
}
