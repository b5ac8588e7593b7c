//! The main trie implementation.
//!
//! This module contains the `Trie` type, which provides the primary API for
//! storing, looking up and removing values by string key.

use std::any::Any;
use std::fmt;

use tracing::{debug, trace};

use crate::node::{NodeState, TrieNode, ValueCell};
use crate::util::split_last_char;
use crate::{Error, Result, TRIE_LOG_TARGET};

/// A mutable trie mapping string keys to values of any type.
///
/// Keys are walked one `char` at a time from a sentinel root. The node for the
/// last character of a key is terminal and holds that key's value; every other
/// node on the path is internal. Values under different keys may have
/// different types.
///
/// Mutation takes `&mut self` and lookup takes `&self`, so the borrow checker
/// already keeps writers exclusive. Use [`ConcurrentTrie`](crate::ConcurrentTrie)
/// to share one trie between threads.
pub struct Trie {
    /// The root node of the trie. Never terminal, never removed.
    root: TrieNode,

    /// The number of values stored in the trie
    size: usize,
}

impl Trie {
    /// Creates a new, empty trie.
    ///
    /// # Examples
    ///
    /// ```
    /// use any_trie::Trie;
    ///
    /// let trie = Trie::new();
    /// assert!(trie.is_empty());
    /// assert!(!trie.root().has_children());
    /// ```
    pub fn new() -> Self {
        Trie {
            root: TrieNode::root(),
            size: 0,
        }
    }

    /// Returns the number of values stored in the trie.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the trie contains no values.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the root node, for inspecting the structure of the trie.
    pub fn root(&self) -> &TrieNode {
        &self.root
    }

    /// Returns the number of nodes in the trie, the root included.
    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    /// Removes every value, leaving only the root.
    pub fn clear(&mut self) {
        self.root = TrieNode::root();
        self.size = 0;
    }

    /// Inserts `value` under `key`.
    ///
    /// Returns `false` if the key is empty or already holds a value; the
    /// existing value is never overwritten.
    ///
    /// # Examples
    ///
    /// ```
    /// use any_trie::Trie;
    ///
    /// let mut trie = Trie::new();
    ///
    /// assert!(trie.insert("hello", 1));
    /// assert!(trie.insert("help", "two"));
    ///
    /// // Duplicate keys are rejected
    /// assert!(!trie.insert("hello", 3));
    /// assert_eq!(trie.get::<i32>("hello"), Some(1));
    /// ```
    pub fn insert<T: Any + Send + Sync>(&mut self, key: &str, value: T) -> bool {
        self.try_insert(key, value).is_ok()
    }

    /// Inserts `value` under `key`, reporting why the insertion was refused.
    ///
    /// Fails with [`Error::EmptyKey`] for an empty key and
    /// [`Error::DuplicateKey`] if the key already holds a value.
    pub fn try_insert<T: Any + Send + Sync>(&mut self, key: &str, value: T) -> Result<()> {
        let (path, last) = split_last_char(key).ok_or(Error::EmptyKey)?;

        // Create whatever part of the path is missing
        let mut parent = &mut self.root;
        for c in path.chars() {
            parent = parent.child_or_insert(c);
        }

        if parent.get_child(last).map_or(false, TrieNode::is_terminal) {
            debug!(target: TRIE_LOG_TARGET, key_len = key.len(), "Rejecting insert of existing key");
            return Err(Error::DuplicateKey);
        }

        // An internal node may already sit here as a prefix of longer keys;
        // it becomes terminal with its subtree intact.
        let node = parent
            .remove_child(last)
            .unwrap_or_else(|| TrieNode::new(last));
        parent.insert_child(last, node.convert(NodeState::terminal(value)))?;

        self.size += 1;
        trace!(target: TRIE_LOG_TARGET, key_len = key.len(), len = self.size, "Inserted key");
        Ok(())
    }

    /// Retrieves a copy of the value stored under `key` as a `T`.
    ///
    /// Returns `None` if the key is empty, not stored, or holds a value of a
    /// type other than `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use any_trie::Trie;
    ///
    /// let mut trie = Trie::new();
    /// trie.insert("half", 2.5f64);
    ///
    /// assert_eq!(trie.get::<f64>("half"), Some(2.5));
    /// assert_eq!(trie.get::<f32>("half"), None);
    /// assert_eq!(trie.get::<f64>("tau"), None);
    /// ```
    pub fn get<T: Any + Clone>(&self, key: &str) -> Option<T> {
        self.try_get(key).ok()
    }

    /// Retrieves a copy of the value stored under `key`, reporting why the
    /// lookup failed.
    pub fn try_get<T: Any + Clone>(&self, key: &str) -> Result<T> {
        self.try_get_ref::<T>(key).map(T::clone)
    }

    /// Borrows the value stored under `key` as a `T`.
    pub fn get_ref<T: Any>(&self, key: &str) -> Option<&T> {
        self.try_get_ref(key).ok()
    }

    /// Borrows the value stored under `key`, reporting why the lookup failed.
    ///
    /// Fails with [`Error::EmptyKey`], [`Error::KeyNotFound`] or
    /// [`Error::TypeMismatch`].
    pub fn try_get_ref<T: Any>(&self, key: &str) -> Result<&T> {
        let cell = self.find(key)?.value().ok_or(Error::KeyNotFound)?;

        cell.downcast_ref::<T>().map_err(|err| {
            debug!(target: TRIE_LOG_TARGET, stored = cell.type_name(), "Lookup with mismatched type");
            err
        })
    }

    /// Returns `true` if a value of any type is stored under `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.find(key).map_or(false, TrieNode::is_terminal)
    }

    /// Returns the type name of the value stored under `key`, if any.
    pub fn value_type_name(&self, key: &str) -> Option<&'static str> {
        self.find(key)
            .ok()
            .and_then(TrieNode::value)
            .map(ValueCell::type_name)
    }

    /// Removes the value stored under `key`, along with every node that no
    /// other key needs any more.
    ///
    /// Returns `false` if the key is empty or not stored.
    ///
    /// # Examples
    ///
    /// ```
    /// use any_trie::Trie;
    ///
    /// let mut trie = Trie::new();
    /// trie.insert("dog", 1u8);
    ///
    /// assert!(trie.remove("dog"));
    /// assert!(!trie.remove("dog"));
    ///
    /// // Nothing but the root is left
    /// assert_eq!(trie.node_count(), 1);
    /// ```
    pub fn remove(&mut self, key: &str) -> bool {
        self.try_remove(key).is_ok()
    }

    /// Removes the value stored under `key`, reporting why nothing was
    /// removed.
    ///
    /// Fails with [`Error::EmptyKey`] or [`Error::KeyNotFound`].
    pub fn try_remove(&mut self, key: &str) -> Result<()> {
        if key.is_empty() {
            return Err(Error::EmptyKey);
        }

        let (cut, cut_char, pruned) = {
            // Trail of (parent, char leading to child) pairs down to the key
            let mut trail: Vec<(&TrieNode, char)> = Vec::new();
            let mut node = &self.root;
            for c in key.chars() {
                trail.push((node, c));
                node = node.get_child(c).ok_or(Error::KeyNotFound)?;
            }

            if !node.is_terminal() {
                return Err(Error::KeyNotFound);
            }

            let mut cut = trail.len() - 1;
            let prune = !node.has_children();
            if prune {
                // Walk back up while the parent would be left childless and
                // non-terminal. The root (index 0) always stays.
                while cut > 0 {
                    let (parent, _) = trail[cut];
                    if parent.is_terminal() || parent.child_count() > 1 {
                        break;
                    }
                    cut -= 1;
                }
            }

            // Nodes below the cut point, all dropped when pruning
            let depth = trail.len() - cut;
            (cut, trail[cut].1, prune.then(|| depth))
        };

        let parent = self
            .descend_mut(key.chars().take(cut))
            .ok_or(Error::KeyNotFound)?;
        let detached = parent.remove_child(cut_char).ok_or(Error::KeyNotFound)?;

        let pruned = match pruned {
            Some(depth) => depth,
            None => {
                // Still on the path of longer keys: keep the subtree, drop the value
                parent.insert_child(cut_char, detached.convert(NodeState::Internal))?;
                0
            }
        };

        self.size -= 1;
        trace!(target: TRIE_LOG_TARGET, key_len = key.len(), pruned, len = self.size, "Removed key");
        Ok(())
    }

    /// Walks from the root to the node at the end of `key`.
    fn find(&self, key: &str) -> Result<&TrieNode> {
        if key.is_empty() {
            return Err(Error::EmptyKey);
        }

        let mut node = &self.root;
        for c in key.chars() {
            node = node.get_child(c).ok_or(Error::KeyNotFound)?;
        }
        Ok(node)
    }

    fn descend_mut<I>(&mut self, path: I) -> Option<&mut TrieNode>
    where
        I: IntoIterator<Item = char>,
    {
        let mut node = &mut self.root;
        for c in path {
            node = node.get_child_mut(c)?;
        }
        Some(node)
    }
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Trie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trie")
            .field("len", &self.size)
            .field("nodes", &self.node_count())
            .finish()
    }
}
