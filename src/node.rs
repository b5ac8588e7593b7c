//! Node implementation for the trie.
//!
//! This module contains the `TrieNode` structure that forms the backbone of
//! the trie. A node is either internal or terminal; only terminal nodes carry
//! a value, and the value lives in a type-erased `ValueCell`.

use std::any::{self, Any};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;

use crate::{Error, Result};

/// Key character of the root node. The root is never anyone's child, so this
/// is never compared against key input.
pub(crate) const ROOT_KEY_CHAR: char = '\0';

/// A type-erased value stored at a terminal node.
///
/// The cell remembers the name of the stored type so that a failed lookup can
/// say what was actually there.
pub struct ValueCell {
    value: Box<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl ValueCell {
    /// Boxes `value` into a new cell
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        ValueCell {
            value: Box::new(value),
            type_name: any::type_name::<T>(),
        }
    }

    /// Name of the stored type, as reported by `std::any::type_name`
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns `true` if the stored value is of type `T`
    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }

    /// Borrows the stored value as `T`.
    ///
    /// Fails with [`Error::TypeMismatch`] if the stored value has another type.
    pub fn downcast_ref<T: Any>(&self) -> Result<&T> {
        self.value
            .downcast_ref::<T>()
            .ok_or_else(|| Error::TypeMismatch {
                expected: any::type_name::<T>(),
                found: self.type_name,
            })
    }
}

impl fmt::Debug for ValueCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueCell")
            .field("type_name", &self.type_name)
            .finish()
    }
}

/// Whether a node ends a key, and if so, the value stored there.
///
/// Being terminal and carrying a value are the same fact, so they cannot
/// disagree.
#[derive(Debug)]
pub enum NodeState {
    /// Interior node on the path of one or more keys
    Internal,
    /// Last character of a stored key
    Terminal(ValueCell),
}

impl NodeState {
    /// Shorthand for `NodeState::Terminal(ValueCell::new(value))`
    pub fn terminal<T: Any + Send + Sync>(value: T) -> Self {
        NodeState::Terminal(ValueCell::new(value))
    }
}

impl From<Option<ValueCell>> for NodeState {
    fn from(value: Option<ValueCell>) -> Self {
        match value {
            Some(cell) => NodeState::Terminal(cell),
            None => NodeState::Internal,
        }
    }
}

/// A single position in the trie.
///
/// Each node knows the character that leads to it from its parent, owns its
/// children outright, and holds a value only when it is terminal.
pub struct TrieNode {
    /// The character this node represents on the path from its parent
    key_char: char,

    /// Internal, or terminal with a value
    state: NodeState,

    /// Child nodes indexed by their key character
    children: HashMap<char, TrieNode>,
}

impl TrieNode {
    /// Creates a new internal node with no children
    pub fn new(key_char: char) -> Self {
        TrieNode {
            key_char,
            state: NodeState::Internal,
            children: HashMap::new(),
        }
    }

    /// Creates a new terminal node holding `value`, with no children
    pub fn with_value<T: Any + Send + Sync>(key_char: char, value: T) -> Self {
        TrieNode {
            key_char,
            state: NodeState::terminal(value),
            children: HashMap::new(),
        }
    }

    pub(crate) fn root() -> Self {
        Self::new(ROOT_KEY_CHAR)
    }

    /// The character this node was created for. Never changes.
    pub fn key_char(&self) -> char {
        self.key_char
    }

    /// Returns whether this node ends a stored key
    pub fn is_terminal(&self) -> bool {
        matches!(self.state, NodeState::Terminal(_))
    }

    /// The value cell, present exactly when the node is terminal
    pub fn value(&self) -> Option<&ValueCell> {
        match &self.state {
            NodeState::Terminal(cell) => Some(cell),
            NodeState::Internal => None,
        }
    }

    /// The terminal state of this node
    pub fn state(&self) -> &NodeState {
        &self.state
    }

    /// Returns whether there is a child for `key_char`
    pub fn has_child(&self, key_char: char) -> bool {
        self.children.contains_key(&key_char)
    }

    /// Returns whether this node has any children at all
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Returns the number of direct children
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Iterates over `(key_char, child)` pairs in no particular order
    pub fn children(&self) -> impl Iterator<Item = (char, &TrieNode)> + '_ {
        self.children.iter().map(|(&c, child)| (c, child))
    }

    /// Attaches `child` under `key_char`, taking ownership of it.
    ///
    /// Fails if a child for `key_char` already exists, or if the child was
    /// created for a different character. On success returns a handle to the
    /// child now owned by this node.
    pub fn insert_child(&mut self, key_char: char, child: TrieNode) -> Result<&mut TrieNode> {
        if child.key_char != key_char {
            return Err(Error::KeyCharMismatch {
                expected: key_char,
                found: child.key_char,
            });
        }

        match self.children.entry(key_char) {
            Entry::Occupied(_) => Err(Error::DuplicateChild(key_char)),
            Entry::Vacant(slot) => Ok(slot.insert(child)),
        }
    }

    /// Gets the child for `key_char`, if any
    pub fn get_child(&self, key_char: char) -> Option<&TrieNode> {
        self.children.get(&key_char)
    }

    /// Gets the child for `key_char` mutably, if any
    pub fn get_child_mut(&mut self, key_char: char) -> Option<&mut TrieNode> {
        self.children.get_mut(&key_char)
    }

    /// Gets the child for `key_char`, attaching a new internal node first if
    /// there is none
    pub(crate) fn child_or_insert(&mut self, key_char: char) -> &mut TrieNode {
        self.children
            .entry(key_char)
            .or_insert_with(|| TrieNode::new(key_char))
    }

    /// Detaches the child for `key_char` and returns it.
    ///
    /// Dropping the returned node destroys its whole subtree. Returns `None`
    /// and does nothing if there is no such child.
    pub fn remove_child(&mut self, key_char: char) -> Option<TrieNode> {
        self.children.remove(&key_char)
    }

    /// Makes this node terminal with `value`, or internal if `None`.
    ///
    /// Returns the previous state.
    pub fn set_terminal(&mut self, value: Option<ValueCell>) -> NodeState {
        std::mem::replace(&mut self.state, NodeState::from(value))
    }

    /// Turns this node into one with the same key character and children but
    /// a new terminal state.
    ///
    /// The children map is moved, so the subtree below is carried over as is.
    pub fn convert(mut self, state: NodeState) -> TrieNode {
        TrieNode {
            key_char: self.key_char,
            state,
            children: std::mem::take(&mut self.children),
        }
    }

    /// Returns the number of nodes in this subtree, this one included
    pub fn node_count(&self) -> usize {
        self.subtree().count()
    }

    /// Returns the number of values stored in this subtree
    pub fn terminal_count(&self) -> usize {
        self.subtree().filter(|node| node.is_terminal()).count()
    }

    /// Visits this node and every descendant, depth first, without recursing.
    ///
    /// Keys can be arbitrarily long, so nothing that walks a subtree may use
    /// the call stack for depth.
    fn subtree(&self) -> impl Iterator<Item = &TrieNode> + '_ {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.values());
            Some(node)
        })
    }
}

impl Drop for TrieNode {
    // The default drop would recurse once per key character.
    fn drop(&mut self) {
        let mut stack: Vec<TrieNode> = self.children.drain().map(|(_, child)| child).collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.children.drain().map(|(_, child)| child));
        }
    }
}

impl fmt::Debug for TrieNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrieNode")
            .field("key_char", &self.key_char)
            .field("state", &self.state)
            .field("children", &self.children.len())
            .finish()
    }
}
