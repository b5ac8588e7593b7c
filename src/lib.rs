//! # Any Trie
//!
//! A mutable character trie mapping string keys to values of any type.
//!
//! Each key is walked one `char` at a time from a sentinel root. Nodes on the
//! path are created on demand, and the node for the last character carries the
//! value. Values are stored type-erased, so a single trie can hold an `i32`
//! under one key and a `String` under another; lookups name the type they
//! expect and fail cleanly when it does not match.
//!
//! ## Features
//!
//! - **Heterogeneous values**: any `'static + Send + Sync` type per key
//! - **Type-checked lookup**: a mismatched type is reported, never reinterpreted
//! - **No overwrites**: inserting an existing key is rejected
//! - **Pruning removal**: removing a key drops every node no other key needs
//! - **Shared access**: [`ConcurrentTrie`] wraps the trie in a reader/writer lock
//!   (`sync` feature, on by default)
//!
//! ## Example
//!
//! ```rust
//! use any_trie::Trie;
//!
//! let mut trie = Trie::new();
//!
//! assert!(trie.insert("answer", 42u32));
//! assert!(trie.insert("greeting", String::from("hello")));
//!
//! assert_eq!(trie.get::<u32>("answer"), Some(42));
//! assert_eq!(trie.get::<String>("greeting"), Some("hello".to_string()));
//!
//! // Wrong type: not found rather than garbage
//! assert_eq!(trie.get::<i64>("answer"), None);
//!
//! assert!(trie.remove("answer"));
//! assert!(!trie.contains_key("answer"));
//! ```

pub mod node;
#[cfg(feature = "sync")]
mod sync;
mod trie;
mod util;

// Re-export public types
pub use crate::node::{NodeState, TrieNode, ValueCell};
#[cfg(feature = "sync")]
pub use crate::sync::ConcurrentTrie;
pub use crate::trie::Trie;

/// Target used for every `tracing` event emitted by this crate.
pub const TRIE_LOG_TARGET: &str = "any_trie";

/// Outcomes of trie operations that did not succeed.
///
/// None of these are exceptional: an empty key, a missing key, a duplicate
/// insert and a lookup with the wrong type are all expected results that the
/// caller decides how to handle. The `bool`/`Option` methods on [`Trie`]
/// collapse them; the `try_*` methods report which one occurred.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The key was empty
    #[error("empty key")]
    EmptyKey,
    /// No value is stored under the key
    #[error("key not found")]
    KeyNotFound,
    /// A value is already stored under the key
    #[error("key already holds a value")]
    DuplicateKey,
    /// The stored value has a different type than the one requested
    #[error("type mismatch: requested `{expected}`, stored `{found}`")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    /// A node already has a child for this character
    #[error("child for {0:?} already exists")]
    DuplicateChild(char),
    /// A child was attached under a character other than its own
    #[error("child keyed {found:?} cannot be attached under {expected:?}")]
    KeyCharMismatch { expected: char, found: char },
}

/// Result alias for trie operations.
pub type Result<T> = std::result::Result<T, Error>;
