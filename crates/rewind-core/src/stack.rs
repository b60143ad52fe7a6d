#![forbid(unsafe_code)]

//! Fixed-capacity drop-out stack.
//!
//! [`DropOutStack`] is a circular buffer used as a stack. Once it holds
//! `capacity` items, every further push overwrites the oldest entry instead
//! of growing or rejecting the push.
//!
//! ```text
//! capacity = 3, push(a) push(b) push(c) push(d)
//!
//!   slots: [ d | b | c ]      top = 1 (next write)
//!            ^   ^
//!            |   oldest live item
//!            most recent (get(0) / peek)
//! ```
//!
//! # Invariants
//!
//! 1. `count() <= capacity()` after any operation.
//! 2. The storage never reallocates; `slots.len() == capacity()`.
//! 3. `peek()` and `get(0)` address the slot one before `top`, which is
//!    exactly what the next `pop()` returns.

use std::fmt;

/// Errors raised by the bounded history buffer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HistoryError {
    /// A buffer must hold at least one item.
    #[error("history capacity must be at least 1")]
    ZeroCapacity,
    /// Indexed access past the logical size.
    #[error("index {index} out of range (count {count})")]
    OutOfRange { index: usize, count: usize },
}

/// Circular stack that discards its oldest entry once full.
pub struct DropOutStack<T> {
    /// Backing storage, one slot per unit of capacity.
    slots: Vec<Option<T>>,
    /// Next write index.
    top: usize,
    /// Logical number of items (`0..=capacity`).
    count: usize,
}

impl<T> fmt::Debug for DropOutStack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DropOutStack")
            .field("capacity", &self.slots.len())
            .field("top", &self.top)
            .field("count", &self.count)
            .finish()
    }
}

impl<T> DropOutStack<T> {
    /// Create an empty stack holding at most `capacity` items.
    pub fn new(capacity: usize) -> Result<Self, HistoryError> {
        if capacity == 0 {
            return Err(HistoryError::ZeroCapacity);
        }
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Ok(Self {
            slots,
            top: 0,
            count: 0,
        })
    }

    /// Push an item, overwriting (and dropping) the oldest one when full.
    pub fn push(&mut self, item: T) {
        let capacity = self.slots.len();
        self.slots[self.top] = Some(item);
        self.top = (self.top + 1) % capacity;
        self.count = (self.count + 1).min(capacity);
    }

    /// Remove and return the most recently pushed item.
    ///
    /// Returns `None` on an empty stack without moving the cursor.
    pub fn pop(&mut self) -> Option<T> {
        if self.count == 0 {
            return None;
        }
        self.count -= 1;
        self.top = self.index_back(1);
        self.slots[self.top].take()
    }

    /// The most recently pushed item, without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        if self.count == 0 {
            return None;
        }
        self.slots[self.index_back(1)].as_ref()
    }

    /// Mutable access to the most recently pushed item.
    pub fn peek_mut(&mut self) -> Option<&mut T> {
        if self.count == 0 {
            return None;
        }
        let index = self.index_back(1);
        self.slots[index].as_mut()
    }

    /// The item `index` positions behind the most recent one (0 = most recent).
    pub fn get(&self, index: usize) -> Result<&T, HistoryError> {
        if index >= self.count {
            return Err(HistoryError::OutOfRange {
                index,
                count: self.count,
            });
        }
        self.slots[self.index_back(index + 1)]
            .as_ref()
            .ok_or(HistoryError::OutOfRange {
                index,
                count: self.count,
            })
    }

    /// Current logical size.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Maximum number of items retained.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.count == self.slots.len()
    }

    /// Logically empty the stack, dropping the items it held.
    ///
    /// The cursor is left where it is; the next push overwrites its slot.
    pub fn clear(&mut self) {
        for depth in 1..=self.count {
            let index = self.index_back(depth);
            self.slots[index] = None;
        }
        self.count = 0;
    }

    /// Iterate from the most recent item to the oldest.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        (0..self.count).filter_map(move |i| self.slots[self.index_back(i + 1)].as_ref())
    }

    /// Slot index `depth` positions before the cursor.
    fn index_back(&self, depth: usize) -> usize {
        let capacity = self.slots.len();
        (capacity + self.top - depth % capacity) % capacity
    }
}

// ============================================================================
// Tests
// ============================================================================
