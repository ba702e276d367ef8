//! Lazily computed, explicitly invalidated values.
//!
//! A [`Memo`] is either dirty (no value) or clean (holding the last computed or
//! externally supplied value). Reads on a dirty cell run the caller's
//! recompute function and cache its result; nothing is ever recomputed eagerly.

use std::cell::Cell;
use std::fmt;

/// A cached value with explicit dirty/clean state.
///
/// The cache lives behind a [`Cell`] so that a read through a shared reference
/// can populate it. This is what lets one neuron's read recursively read (and
/// cache) the values of its neighbours while the whole graph is only borrowed
/// immutably.
#[derive(Clone)]
pub struct Memo<T: Copy> {
    slot: Cell<Option<T>>,
}

impl<T: Copy> Memo<T> {
    /// Create a dirty cell.
    pub fn new() -> Self {
        Memo {
            slot: Cell::new(None),
        }
    }

    /// Return the cached value, or run `recompute`, cache its result and return it.
    ///
    /// If `recompute` fails the cell stays dirty and the error is returned as is.
    pub fn read<E, F>(&self, recompute: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        if let Some(value) = self.slot.get() {
            return Ok(value);
        }
        let value = recompute()?;
        self.slot.set(Some(value));
        Ok(value)
    }

    /// Install `value` as if it had just been computed.
    pub fn set(&self, value: T) {
        self.slot.set(Some(value));
    }

    /// Discard the cached value. Returns whether a value was present.
    pub fn invalidate(&self) -> bool {
        self.slot.take().is_some()
    }

    /// Whether a value is currently cached.
    pub fn is_cached(&self) -> bool {
        self.slot.get().is_some()
    }

    /// The cached value, without computing anything.
    pub fn peek(&self) -> Option<T> {
        self.slot.get()
    }
}

impl<T: Copy> Default for Memo<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + fmt::Debug> fmt::Debug for Memo<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.slot.get() {
            Some(value) => f.debug_tuple("Clean").field(&value).finish(),
            None => f.write_str("Dirty"),
        }
    }
}
