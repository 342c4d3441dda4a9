//! A sequence of strings written in safe Rust.
//!
//! Every node of a [`GhostSequence`] is shared by exactly two owners: the link
//! before it (the `next` link of its predecessor, or the head slot) and the link
//! after it (the `prev` link of its successor, or the tail slot). Each owner
//! holds one half of a [`StaticRc`], and the two halves are joined back into a
//! full box when the node is unlinked. Access to the nodes goes through a
//! [`GhostCell`], so every operation takes the [`GhostToken`] of the brand
//! `'id`.
//!
//! Releasing a node needs the token as well, which a destructor does not have.
//! A `GhostSequence` is therefore only lent out by [`GhostSequence::scope`],
//! which clears it with the token before returning.
//!
//! # Examples
//!
//! ```
//! use ghost_cell::GhostToken;
//! use linked_sequence::ghost::GhostSequence;
//!
//! let rendered = GhostToken::new(|mut token| {
//!     GhostSequence::scope(&mut token, |sequence, token| {
//!         sequence.push_back("Hello", token);
//!         sequence.push_back("world!", token);
//!         sequence.insert(1, "there", token).unwrap();
//!         sequence.render(token)
//!     })
//! });
//! assert_eq!(rendered, "<Hello, there, world!>");
//! ```

use ghost_cell::{GhostCell, GhostToken};
use static_rc::StaticRc;
use std::fmt;
use std::ops::Deref;

use crate::error::SequenceError;

/// A doubly-linked sequence of strings whose nodes are owned through
/// [`StaticRc`] halves and guarded by a [`GhostToken`].
///
/// A sequence is only reachable inside [`GhostSequence::scope`], which
/// releases whatever nodes are left when the closure returns or unwinds.
pub struct GhostSequence<'id> {
    links: [Option<NodePtr<'id>>; 2],
    len: usize,
}

struct Node<'id> {
    links: [Option<NodePtr<'id>>; 2],
    value: String,
}

type NodePtr<'id> = Half<GhostCell<'id, Node<'id>>>;

type Half<T> = StaticRc<T, 1, 2>;
type Full<T> = StaticRc<T, 2, 2>;

impl<'id> Node<'id> {
    const NEXT: usize = 0;

    fn next(&self) -> Option<&NodePtr<'id>> {
        self.links[Self::NEXT].as_ref()
    }
    fn new(value: String) -> Self {
        let links = [None, None];
        Self { links, value }
    }
}

/// Owns the sequence lent out by [`GhostSequence::scope`] and empties it on
/// the way out.
struct ScopeGuard<'a, 'id> {
    sequence: GhostSequence<'id>,
    token: &'a mut GhostToken<'id>,
}

impl Drop for ScopeGuard<'_, '_> {
    fn drop(&mut self) {
        self.sequence.clear(self.token);
    }
}

// private methods
impl<'id> GhostSequence<'id> {
    const HEAD: usize = 0;
    const TAIL: usize = 1;

    /// An empty sequence. Callers must empty it again before dropping it.
    fn new() -> Self {
        let links = [None, None];
        Self { links, len: 0 }
    }

    fn head(&self) -> Option<&NodePtr<'id>> {
        self.links[Self::HEAD].as_ref()
    }
    fn tail(&self) -> Option<&NodePtr<'id>> {
        self.links[Self::TAIL].as_ref()
    }

    /// Link a detached node at the head (`side == HEAD`) or the tail
    /// (`side == TAIL`) of the sequence.
    fn push_node_at(
        &mut self,
        side: usize,
        node: Full<GhostCell<'id, Node<'id>>>,
        token: &mut GhostToken<'id>,
    ) {
        debug_assert!(side < 2);
        let oppo = 1 - side;
        let (left, right) = Full::split(node);
        match self.links[side].take() {
            Some(this_side) => {
                this_side.deref().borrow_mut(token).links[oppo] = Some(left);
                right.deref().borrow_mut(token).links[side] = Some(this_side);
            }
            None => self.links[oppo] = Some(left),
        }
        self.links[side] = Some(right);
        self.len += 1;
    }

    /// Unlink the node at the head or the tail of the sequence, and return it
    /// with both halves joined again.
    fn pop_node_at(
        &mut self,
        side: usize,
        token: &mut GhostToken<'id>,
    ) -> Option<Full<GhostCell<'id, Node<'id>>>> {
        debug_assert!(side < 2);
        let oppo = 1 - side;
        let right = self.links[side].take()?;
        let left = match right.deref().borrow_mut(token).links[side].take() {
            Some(this_side) => {
                let left = this_side.deref().borrow_mut(token).links[oppo]
                    .take()
                    .expect("the neighbour of a linked node holds its other half");
                self.links[side] = Some(this_side);
                left
            }
            None => self.links[oppo]
                .take()
                .expect("the only node is held by both ends of the sequence"),
        };
        self.len -= 1;
        Some(Full::join(left, right))
    }

    fn push_at(&mut self, side: usize, value: String, token: &mut GhostToken<'id>) {
        let node = Full::new(GhostCell::new(Node::new(value)));
        self.push_node_at(side, node, token);
    }

    fn pop_at(&mut self, side: usize, token: &mut GhostToken<'id>) -> Result<String, SequenceError> {
        let node = self
            .pop_node_at(side, token)
            .ok_or(SequenceError::EmptyContainer)?;
        Ok(Full::into_box(node).into_inner().value)
    }

    /// Move `count` nodes from the head of `self` to the tail of `scratch`.
    fn stash_front(&mut self, scratch: &mut Self, count: usize, token: &mut GhostToken<'id>) {
        for _ in 0..count {
            match self.pop_node_at(Self::HEAD, token) {
                Some(node) => scratch.push_node_at(Self::TAIL, node, token),
                None => break,
            }
        }
    }

    /// Move every node of `scratch` back to the head of `self`, preserving
    /// their order.
    fn unstash_front(&mut self, scratch: &mut Self, token: &mut GhostToken<'id>) {
        while let Some(node) = scratch.pop_node_at(Self::TAIL, token) {
            self.push_node_at(Self::HEAD, node, token);
        }
    }

    fn out_of_range(&self, index: usize) -> SequenceError {
        SequenceError::OutOfRange {
            index,
            len: self.len,
        }
    }
}

impl<'id> GhostSequence<'id> {
    /// Lend an empty sequence and the token to `f`.
    ///
    /// Every node still linked when `f` returns (or panics) is released before
    /// `scope` returns, so a sequence can never outlive its nodes.
    ///
    /// # Examples
    ///
    /// ```
    /// use ghost_cell::GhostToken;
    /// use linked_sequence::ghost::GhostSequence;
    ///
    /// GhostToken::new(|mut token| {
    ///     let len = GhostSequence::scope(&mut token, |sequence, token| {
    ///         sequence.push_front("b", token);
    ///         sequence.push_front("a", token);
    ///         sequence.len()
    ///     });
    ///     assert_eq!(len, 2);
    /// });
    /// ```
    pub fn scope<R, F>(token: &mut GhostToken<'id>, f: F) -> R
    where
        F: FnOnce(&mut GhostSequence<'id>, &mut GhostToken<'id>) -> R,
    {
        let mut guard = ScopeGuard {
            sequence: GhostSequence::new(),
            token,
        };
        f(&mut guard.sequence, &mut *guard.token)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.head().is_none()
    }

    pub fn push_back(&mut self, value: impl Into<String>, token: &mut GhostToken<'id>) {
        self.push_at(Self::TAIL, value.into(), token);
    }

    pub fn pop_back(&mut self, token: &mut GhostToken<'id>) -> Result<String, SequenceError> {
        self.pop_at(Self::TAIL, token)
    }

    pub fn push_front(&mut self, value: impl Into<String>, token: &mut GhostToken<'id>) {
        self.push_at(Self::HEAD, value.into(), token);
    }

    pub fn pop_front(&mut self, token: &mut GhostToken<'id>) -> Result<String, SequenceError> {
        self.pop_at(Self::HEAD, token)
    }

    pub fn front<'a>(&'a self, token: &'a GhostToken<'id>) -> Result<&'a str, SequenceError> {
        let head = self.head().ok_or(SequenceError::EmptyContainer)?;
        Ok(head.deref().borrow(token).value.as_str())
    }

    pub fn back<'a>(&'a self, token: &'a GhostToken<'id>) -> Result<&'a str, SequenceError> {
        let tail = self.tail().ok_or(SequenceError::EmptyContainer)?;
        Ok(tail.deref().borrow(token).value.as_str())
    }

    /// Insert `value` so that it becomes the element at `position`.
    ///
    /// The nodes before `position` are rotated through a scratch sequence, so
    /// this operation computes in *O*(*n*) time but never reallocates a node.
    pub fn insert(
        &mut self,
        position: usize,
        value: impl Into<String>,
        token: &mut GhostToken<'id>,
    ) -> Result<(), SequenceError> {
        if position > self.len {
            return Err(self.out_of_range(position));
        }
        let mut scratch = GhostSequence::new();
        self.stash_front(&mut scratch, position, token);
        self.push_front(value, token);
        self.unstash_front(&mut scratch, token);
        Ok(())
    }

    /// Remove the element at `position` and return it.
    pub fn erase(
        &mut self,
        position: usize,
        token: &mut GhostToken<'id>,
    ) -> Result<String, SequenceError> {
        if position >= self.len {
            return Err(self.out_of_range(position));
        }
        let mut scratch = GhostSequence::new();
        self.stash_front(&mut scratch, position, token);
        let erased = self.pop_front(token);
        self.unstash_front(&mut scratch, token);
        erased
    }

    /// Remove the `count` contiguous elements starting at `position`.
    pub fn erase_range(
        &mut self,
        position: usize,
        count: usize,
        token: &mut GhostToken<'id>,
    ) -> Result<(), SequenceError> {
        if count == 0 {
            return Err(SequenceError::InvalidArgument);
        }
        if position >= self.len {
            return Err(self.out_of_range(position));
        }
        match position.checked_add(count) {
            Some(end) if end <= self.len => {}
            _ => return Err(self.out_of_range(position.saturating_add(count))),
        }
        let mut scratch = GhostSequence::new();
        self.stash_front(&mut scratch, position, token);
        for _ in 0..count {
            drop(self.pop_node_at(Self::HEAD, token));
        }
        self.unstash_front(&mut scratch, token);
        Ok(())
    }

    /// Release every node of the sequence.
    pub fn clear(&mut self, token: &mut GhostToken<'id>) {
        while self.pop_front(token).is_ok() {}
    }

    /// Render the sequence as `<e0, e1, ..., en-1>`.
    pub fn render(&self, token: &GhostToken<'id>) -> String {
        let mut rendered = String::from("<");
        let mut current = self.head();
        while let Some(ptr) = current {
            let node = ptr.deref().borrow(token);
            rendered.push_str(&node.value);
            current = node.next();
            if current.is_some() {
                rendered.push_str(", ");
            }
        }
        rendered.push('>');
        rendered
    }

    pub fn to_vec(&self, token: &GhostToken<'id>) -> Vec<String> {
        let mut values = Vec::with_capacity(self.len);
        let mut current = self.head();
        while let Some(ptr) = current {
            let node = ptr.deref().borrow(token);
            values.push(node.value.clone());
            current = node.next();
        }
        values
    }
}

impl fmt::Debug for GhostSequence<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GhostSequence")
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}
