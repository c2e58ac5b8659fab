//! Bounded history of submitted lines.
//!
//! Entries are numbered by recency: entry `0` is the most recent,
//! entry `len() - 1` the oldest still retained.

/// Physical slot holding logical entry `n`, where `last` is the slot
/// of the most recent entry.
///
/// Kept as a free function so the ring arithmetic can be tested on
/// its own. Requires `n < capacity`.
fn slot_index(last: usize, n: usize, capacity: usize) -> usize {
    (last + capacity - n) % capacity
}

/// Store of previously submitted lines.
pub trait History {
    /// Record a line. Empty lines are ignored.
    fn push(&mut self, line: &[u8]);

    /// Entry by recency number, `0` being the most recent. Out of
    /// range yields `None`.
    fn entry(&self, n: usize) -> Option<&[u8]>;

    /// Number of retained entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget all entries.
    fn clear(&mut self);
}

/// Each slot carries a little-endian length prefix ahead of the
/// payload, so entries may contain any byte value.
const SLOT_PREFIX: usize = 2;

/// Ring of fixed-size slots over caller-supplied storage.
///
/// The buffer is carved into `buffer.len() / (entry_len + 2)` slots.
/// Once all slots are in use, a new entry overwrites the oldest.
/// Lines longer than `entry_len` are truncated on insertion.
pub struct SlotHistory<'a> {
    buffer: &'a mut [u8],
    entry_len: usize,
    capacity: usize,
    count: usize,
    last: usize,
}

impl<'a> SlotHistory<'a> {
    /// `entry_len` is capped at `u16::MAX`, the largest length the
    /// slot prefix can represent.
    pub fn new(buffer: &'a mut [u8], entry_len: usize) -> Self {
        let entry_len = entry_len.min(u16::MAX as usize);
        let capacity = buffer.len() / (entry_len + SLOT_PREFIX);

        Self {
            buffer,
            entry_len,
            capacity,
            count: 0,
            last: 0,
        }
    }

    fn stride(&self) -> usize {
        self.entry_len + SLOT_PREFIX
    }
}

impl History for SlotHistory<'_> {
    fn push(&mut self, line: &[u8]) {
        if line.is_empty() || self.capacity == 0 {
            return;
        }

        let slot = if self.count == 0 {
            0
        } else {
            (self.last + 1) % self.capacity
        };

        let len = line.len().min(self.entry_len);
        let start = slot * self.stride();

        self.buffer[start..start + SLOT_PREFIX].copy_from_slice(&(len as u16).to_le_bytes());
        self.buffer[start + SLOT_PREFIX..start + SLOT_PREFIX + len].copy_from_slice(&line[..len]);

        if self.count < self.capacity {
            self.count += 1;
        }
        self.last = slot;
    }

    fn entry(&self, n: usize) -> Option<&[u8]> {
        if n >= self.count {
            return None;
        }

        let start = slot_index(self.last, n, self.capacity) * self.stride();
        let len = u16::from_le_bytes([self.buffer[start], self.buffer[start + 1]]) as usize;

        Some(&self.buffer[start + SLOT_PREFIX..start + SLOT_PREFIX + len])
    }

    fn len(&self) -> usize {
        self.count
    }

    fn clear(&mut self) {
        // Stale slot contents become unreachable, no need to zero
        self.count = 0;
        self.last = 0;
    }
}

/// Inert store for editors without history.
#[derive(Default)]
pub struct NoHistory {}

impl NoHistory {
    pub fn new() -> Self {
        Self {}
    }
}

impl History for NoHistory {
    fn push(&mut self, _line: &[u8]) {}

    fn entry(&self, _n: usize) -> Option<&[u8]> {
        None
    }

    fn len(&self) -> usize {
        0
    }

    fn clear(&mut self) {}
}

/// Browse position used while recalling entries with up/down,
/// independent of the edit cursor. `None` means not browsing.
pub(crate) struct BrowseCursor {
    position: Option<usize>,
}

impl BrowseCursor {
    pub(crate) fn new() -> Self {
        Self { position: None }
    }

    /// Step towards older entries. Stays on the oldest entry once
    /// reached rather than failing.
    pub(crate) fn older<'a, H: History + ?Sized>(&mut self, history: &'a H) -> Option<&'a [u8]> {
        if history.is_empty() {
            return None;
        }

        let position = match self.position {
            None => 0,
            Some(position) => (position + 1).min(history.len() - 1),
        };

        self.position = Some(position);
        history.entry(position)
    }

    /// Step towards newer entries. Past the newest, returns `None`
    /// and leaves browsing, meaning the line should become empty.
    pub(crate) fn newer<'a, H: History + ?Sized>(&mut self, history: &'a H) -> Option<&'a [u8]> {
        match self.position {
            None => None,
            Some(0) => {
                self.position = None;
                None
            }
            Some(position) => {
                self.position = Some(position - 1);
                history.entry(position - 1)
            }
        }
    }

    pub(crate) fn reset(&mut self) {
        self.position = None;
    }
}

#[cfg(any(test, feature = "std"))]
mod feature_std {
    use super::*;
    use std::collections::VecDeque;
    use std::vec::Vec;

    /// Heap-backed history bounded by entry count.
    pub struct AllocHistory {
        entries: VecDeque<Vec<u8>>,
        max_entries: usize,
    }

    impl AllocHistory {
        pub fn new(max_entries: usize) -> Self {
            Self {
                entries: VecDeque::new(),
                max_entries,
            }
        }
    }

    impl History for AllocHistory {
        fn push(&mut self, line: &[u8]) {
            if line.is_empty() || self.max_entries == 0 {
                return;
            }

            self.entries.push_back(line.to_vec());

            if self.entries.len() > self.max_entries {
                self.entries.pop_front();
            }
        }

        fn entry(&self, n: usize) -> Option<&[u8]> {
            if n >= self.entries.len() {
                return None;
            }

            self.entries
                .get(self.entries.len() - 1 - n)
                .map(|entry| entry.as_slice())
        }

        fn len(&self) -> usize {
            self.entries.len()
        }

        fn clear(&mut self) {
            self.entries.clear();
        }
    }
}

#[cfg(any(test, feature = "std"))]
pub use feature_std::AllocHistory;
