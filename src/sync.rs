//! Reader/writer-locked access to a trie.
//!
//! Inserts and removals hold the write lock for the whole operation; lookups
//! share the read lock.

use std::any::Any;

use parking_lot::{RwLock, RwLockReadGuard};

use crate::{Result, Trie};

/// A [`Trie`] behind a reader/writer lock, for sharing between threads.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::thread;
///
/// use any_trie::ConcurrentTrie;
///
/// let trie = Arc::new(ConcurrentTrie::new());
///
/// let writer = {
///     let trie = Arc::clone(&trie);
///     thread::spawn(move || trie.insert("shared", 1u64))
/// };
/// assert!(writer.join().unwrap());
///
/// assert_eq!(trie.get::<u64>("shared"), Some(1));
/// ```
#[derive(Debug, Default)]
pub struct ConcurrentTrie {
    inner: RwLock<Trie>,
}

impl ConcurrentTrie {
    /// Creates a new, empty trie.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `value` under `key` while holding the write lock.
    ///
    /// See [`Trie::insert`].
    pub fn insert<T: Any + Send + Sync>(&self, key: &str, value: T) -> bool {
        self.inner.write().insert(key, value)
    }

    /// Like [`insert`](Self::insert), but reports why the insertion was refused.
    pub fn try_insert<T: Any + Send + Sync>(&self, key: &str, value: T) -> Result<()> {
        self.inner.write().try_insert(key, value)
    }

    /// Removes the value under `key` while holding the write lock.
    ///
    /// See [`Trie::remove`].
    pub fn remove(&self, key: &str) -> bool {
        self.inner.write().remove(key)
    }

    /// Like [`remove`](Self::remove), but reports why nothing was removed.
    pub fn try_remove(&self, key: &str) -> Result<()> {
        self.inner.write().try_remove(key)
    }

    /// Retrieves a copy of the value under `key` while holding the read lock.
    ///
    /// See [`Trie::get`].
    pub fn get<T: Any + Clone>(&self, key: &str) -> Option<T> {
        self.inner.read().get(key)
    }

    /// Like [`get`](Self::get), but reports why the lookup failed.
    pub fn try_get<T: Any + Clone>(&self, key: &str) -> Result<T> {
        self.inner.read().try_get(key)
    }

    /// Calls `f` with a reference to the value under `key`, without cloning
    /// it, while holding the read lock.
    ///
    /// Returns `None` if there is no value of type `T` under `key`.
    pub fn with<T: Any, R, F>(&self, key: &str, f: F) -> Option<R>
    where
        F: FnOnce(&T) -> R,
    {
        self.inner.read().get_ref(key).map(f)
    }

    /// Returns `true` if a value of any type is stored under `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.read().contains_key(key)
    }

    /// Returns the number of values stored in the trie.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Returns `true` if the trie contains no values.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Removes every value while holding the write lock.
    pub fn clear(&self) {
        self.inner.write().clear()
    }

    /// Holds the read lock for as long as the returned guard lives.
    ///
    /// Useful for several lookups that must see the same state, or for
    /// walking the structure from [`Trie::root`].
    pub fn read(&self) -> RwLockReadGuard<'_, Trie> {
        self.inner.read()
    }

    /// Unwraps the trie.
    pub fn into_inner(self) -> Trie {
        self.inner.into_inner()
    }
}

impl From<Trie> for ConcurrentTrie {
    fn from(trie: Trie) -> Self {
        ConcurrentTrie {
            inner: RwLock::new(trie),
        }
    }
}
