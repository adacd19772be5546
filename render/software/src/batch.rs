//! Draw call coalescing.
//!
//! Neighbouring columns (walls) or scanlines (floors) that sample the same
//! part of the same texture are merged in to one blit. A `Batcher` keeps one
//! open `Span` and hands it to the emit callback whenever the key changes or
//! the next position is not contiguous. The last span is emitted by `finish`
//! or, failing that, on drop.

/// A run of `len` units from `start` in `lane`, all sharing `key`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span<K> {
    pub key: K,
    /// Position on the other axis, e.g the column of a floor run
    pub lane: i32,
    pub start: i32,
    pub len: i32,
}

impl<K> Span<K> {
    #[inline]
    pub fn end(&self) -> i32 {
        self.start + self.len
    }
}

pub struct Batcher<K: PartialEq + Copy, F: FnMut(&Span<K>)> {
    open: Option<Span<K>>,
    emit: F,
}

impl<K: PartialEq + Copy, F: FnMut(&Span<K>)> Batcher<K, F> {
    pub fn new(emit: F) -> Self {
        Self { open: None, emit }
    }

    /// Grow the open span if `key`, `lane` and `position` continue it,
    /// otherwise emit it and start a new one
    #[inline]
    pub fn extend(&mut self, key: K, lane: i32, position: i32, amount: i32) {
        if let Some(open) = self.open.as_mut() {
            if open.key == key && open.lane == lane && open.end() == position {
                open.len += amount;
                return;
            }
        }
        self.flush();
        self.open = Some(Span {
            key,
            lane,
            start: position,
            len: amount,
        });
    }

    /// Emit the open span, if any
    #[inline]
    pub fn flush(&mut self) {
        if let Some(span) = self.open.take() {
            if span.len > 0 {
                (self.emit)(&span);
            }
        }
    }

    /// Final flush at the end of a pass
    pub fn finish(mut self) {
        self.flush();
    }
}

impl<K: PartialEq + Copy, F: FnMut(&Span<K>)> Drop for Batcher<K, F> {
    fn drop(&mut self) {
        self.flush();
    }
}
