use std::fmt::{Debug, Formatter};
use std::iter;
use std::marker::PhantomData;
use std::mem::ManuallyDrop;
use std::ops::{Index, IndexMut};
use std::ptr::NonNull;

use crate::error::SequenceError;
use crate::{Iter, IterMut};

pub mod iterator;

mod algorithms;

/// The `Sequence` is a doubly-linked list of strings with owned nodes.
/// Inserting or removing an element at either end takes constant time;
/// reaching any other position walks the list from its head, in *O*(*n*) time.
///
/// The `Sequence` contains:
/// - a pointer `head` to the first node, `None` if the sequence is empty;
/// - a pointer `tail` to the last node, `None` if the sequence is empty;
/// - the number of nodes `len`.
///
/// # Naming Conventions
///
/// - `front..=back`: a closed range of nodes, both inclusive;
/// - `prev`, `next`: a pair of adjacent links, where `None` stands for the
///   boundary before the head or after the tail.
pub struct Sequence {
    head: Link,
    tail: Link,
    /// the length of the sequence
    len: usize,
    _marker: PhantomData<Box<Node>>,
}

pub(crate) type Link = Option<NonNull<Node>>;

pub(crate) struct Node {
    pub(crate) next: Link,
    pub(crate) prev: Link,
    pub(crate) value: String,
}

/// Nodes fragment detached from a sequence.
///
/// When detached, reading of `front.prev` and `back.next` is invalid.
/// Dropping the fragment releases every node in it.
pub(crate) struct DetachedNodes {
    front: NonNull<Node>,
    back: NonNull<Node>,
    len: usize,
    _marker: PhantomData<Box<Node>>,
}

// private methods
impl Sequence {
    pub(crate) fn head_node(&self) -> Link {
        self.head
    }
    pub(crate) fn tail_node(&self) -> Link {
        self.tail
    }

    /// Walk from the head to the node at `position`.
    pub(crate) fn node_at(&self, position: usize) -> Result<NonNull<Node>, SequenceError> {
        let out_of_range = SequenceError::OutOfRange {
            index: position,
            len: self.len,
        };
        if position >= self.len {
            return Err(out_of_range);
        }
        let head = self.head.ok_or(out_of_range)?;
        // SAFETY: `head` is a node of this sequence and there are at least
        // `position` nodes after it.
        unsafe { seek_forward(head, position) }.ok_or(out_of_range)
    }

    /// Link `prev` and `next` together. A `None` on either side moves
    /// the head or the tail of the sequence instead.
    pub(crate) unsafe fn connect(&mut self, prev: Link, next: Link) {
        match prev {
            Some(mut node) => node.as_mut().next = next,
            None => self.head = next,
        }
        match next {
            Some(mut node) => node.as_mut().prev = prev,
            None => self.tail = prev,
        }
    }

    /// Detach a single node `node` from the sequence, and return it as a box.
    ///
    /// It is unsafe because it does not check whether `node` belongs to the sequence.
    ///
    /// If the `node` does not belong to the sequence, this function call will make
    /// the sequence ill-formed.
    pub(crate) unsafe fn detach_node(&mut self, node: NonNull<Node>) -> Box<Node> {
        self.len -= 1;
        let node = Box::from_raw(node.as_ptr());
        self.connect(node.prev, node.next);
        #[cfg(debug_assertions)]
        self.assert_adjacent(node.prev, node.next);
        node
    }

    /// Attach a single node `node` to the sequence, between `prev` and `next`.
    ///
    /// It is unsafe because it does not check whether `prev` and `next` belong
    /// to the sequence, or whether the `prev` and `next` are adjacent (only in
    /// `#[cfg(debug_assertions)]`).
    pub(crate) unsafe fn attach_node(&mut self, prev: Link, next: Link, node: NonNull<Node>) {
        #[cfg(debug_assertions)]
        self.assert_adjacent(prev, next);
        self.connect(prev, Some(node));
        self.connect(Some(node), next);
        self.len += 1;
        #[cfg(debug_assertions)]
        {
            self.assert_adjacent(prev, Some(node));
            self.assert_adjacent(Some(node), next);
        }
    }

    /// Detach a range of `len` nodes `front..=back` from the sequence, and return
    /// the detached nodes.
    ///
    /// It is unsafe because it does not check whether `front..=back` is a valid range
    /// of `len` nodes (i.e. `front` must **NOT** be at the right of `back`), or whether
    /// it belongs to the sequence.
    pub(crate) unsafe fn detach_nodes(
        &mut self,
        front: NonNull<Node>,
        back: NonNull<Node>,
        len: usize,
    ) -> DetachedNodes {
        self.len -= len;
        let (prev, next) = (front.as_ref().prev, back.as_ref().next);
        self.connect(prev, next);
        #[cfg(debug_assertions)]
        self.assert_adjacent(prev, next);
        DetachedNodes::new(front, back, len)
    }

    /// Attach a range of detached nodes to the sequence, between `prev` and `next`.
    ///
    /// It is unsafe because it does not check whether `prev` and `next` belong
    /// to the sequence, or whether they are adjacent (only in
    /// `#[cfg(debug_assertions)]`).
    pub(crate) unsafe fn attach_nodes(&mut self, prev: Link, next: Link, detached: DetachedNodes) {
        #[cfg(debug_assertions)]
        self.assert_adjacent(prev, next);
        let (front, back, len) = detached.into_parts();
        self.connect(prev, Some(front));
        self.connect(Some(back), next);
        self.len += len;
        #[cfg(debug_assertions)]
        {
            self.assert_adjacent(prev, Some(front));
            self.assert_adjacent(Some(back), next);
        }
    }

    /// Detach all nodes from the sequence, and return the detached nodes, or return
    /// `None` if the sequence is empty.
    ///
    /// It is safe because `head..=tail` is a valid range of `len` nodes.
    pub(crate) fn detach_all_nodes(&mut self) -> Option<DetachedNodes> {
        match (self.head, self.tail) {
            (Some(head), Some(tail)) => unsafe { Some(self.detach_nodes(head, tail, self.len)) },
            _ => None,
        }
    }

    /// Construct a sequence from detached nodes.
    pub(crate) fn from_detached(detached: DetachedNodes) -> Self {
        let mut sequence = Sequence::new();
        unsafe {
            sequence.attach_nodes(None, None, detached);
        }
        sequence
    }

    #[cfg(debug_assertions)]
    fn assert_adjacent(&self, prev: Link, next: Link) {
        unsafe {
            match prev {
                Some(node) => assert_eq!(node.as_ref().next, next),
                None => assert_eq!(self.head, next),
            }
            match next {
                Some(node) => assert_eq!(node.as_ref().prev, prev),
                None => assert_eq!(self.tail, prev),
            }
        }
    }
}

impl Sequence {
    /// Create an empty `Sequence`.
    ///
    /// # Examples
    /// ```
    /// use linked_sequence::Sequence;
    /// let sequence = Sequence::new();
    /// assert!(sequence.is_empty());
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self {
            head: None,
            tail: None,
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Create a `Sequence` of `len` empty strings, indexed by 0, 1, ...,
    /// `len` - 1.
    ///
    /// # Examples
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let mut sequence = Sequence::with_len(2);
    /// assert_eq!(sequence.render(), "<, >");
    ///
    /// sequence[0] = "Hello".to_string();
    /// sequence[1] = "world!".to_string();
    /// assert_eq!(sequence.render(), "<Hello, world!>");
    /// ```
    pub fn with_len(len: usize) -> Self {
        iter::repeat_with(String::new).take(len).collect()
    }

    /// Returns `true` if the `Sequence` is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    #[inline]
    #[doc(alias = "empty")]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Returns the length of the `Sequence`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let mut sequence = Sequence::new();
    /// sequence.push_back("a");
    /// sequence.push_back("b");
    /// assert_eq!(sequence.len(), 2);
    /// ```
    #[inline]
    #[doc(alias = "size")]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Removes all elements from the `Sequence`. The sequence stays usable.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    #[inline]
    pub fn clear(&mut self) {
        drop(self.detach_all_nodes());
    }

    /// Shortens the sequence, keeping the first `len` elements and dropping
    /// the rest. Does nothing if `len` is not less than the current length.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let mut sequence = Sequence::from(["a", "b", "c"]);
    /// sequence.truncate(1);
    /// assert_eq!(sequence.render(), "<a>");
    /// ```
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        if let (Ok(front), Some(back)) = (self.node_at(len), self.tail) {
            let count = self.len - len;
            // SAFETY: `front` is at position `len` and `back` is the tail,
            // so `front..=back` is a valid range of `count` nodes.
            drop(unsafe { self.detach_nodes(front, back, count) });
        }
    }

    /// Provides a reference to the element at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::OutOfRange`] if `position >= len`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    pub fn get(&self, position: usize) -> Result<&String, SequenceError> {
        let node = self.node_at(position)?;
        // SAFETY: `node` is a valid node of the sequence, borrowed as long as `self`.
        Ok(unsafe { &node.as_ref().value })
    }

    /// Provides a mutable reference to the element at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::OutOfRange`] if `position >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::{Sequence, SequenceError};
    ///
    /// let mut sequence = Sequence::with_len(1);
    /// sequence.get_mut(0)?.push_str("partner!");
    /// assert_eq!(sequence.front()?, "partner!");
    /// assert!(sequence.get_mut(1).is_err());
    /// # Ok::<(), SequenceError>(())
    /// ```
    pub fn get_mut(&mut self, position: usize) -> Result<&mut String, SequenceError> {
        let mut node = self.node_at(position)?;
        // SAFETY: `node` is a valid node of the sequence, borrowed as long as `self`.
        Ok(unsafe { &mut node.as_mut().value })
    }

    /// Provides a reference to the front element.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::EmptyContainer`] if the sequence is empty.
    pub fn front(&self) -> Result<&String, SequenceError> {
        let node = self.head.ok_or(SequenceError::EmptyContainer)?;
        Ok(unsafe { &node.as_ref().value })
    }

    /// Provides a mutable reference to the front element.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::EmptyContainer`] if the sequence is empty.
    pub fn front_mut(&mut self) -> Result<&mut String, SequenceError> {
        let mut node = self.head.ok_or(SequenceError::EmptyContainer)?;
        Ok(unsafe { &mut node.as_mut().value })
    }

    /// Provides a reference to the back element.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::EmptyContainer`] if the sequence is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::{Sequence, SequenceError};
    ///
    /// let mut sequence = Sequence::new();
    /// assert_eq!(sequence.back(), Err(SequenceError::EmptyContainer));
    ///
    /// sequence.push_back("world!");
    /// assert_eq!(sequence.back().map(String::as_str), Ok("world!"));
    /// ```
    pub fn back(&self) -> Result<&String, SequenceError> {
        let node = self.tail.ok_or(SequenceError::EmptyContainer)?;
        Ok(unsafe { &node.as_ref().value })
    }

    /// Provides a mutable reference to the back element.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::EmptyContainer`] if the sequence is empty.
    pub fn back_mut(&mut self) -> Result<&mut String, SequenceError> {
        let mut node = self.tail.ok_or(SequenceError::EmptyContainer)?;
        Ok(unsafe { &mut node.as_mut().value })
    }

    /// Adds an element first in the sequence.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    pub fn push_front(&mut self, value: impl Into<String>) {
        let node = Node::new_detached(value.into());
        // SAFETY: the boundary before the head and the head are adjacent.
        unsafe { self.attach_node(None, self.head, node) }
    }

    /// Removes the first element and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::EmptyContainer`] if the sequence is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    pub fn pop_front(&mut self) -> Result<String, SequenceError> {
        let head = self.head.ok_or(SequenceError::EmptyContainer)?;
        // SAFETY: `head` belongs to the sequence.
        Ok(unsafe { self.detach_node(head) }.into_value())
    }

    /// Appends an element to the back of the sequence.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let mut sequence = Sequence::new();
    /// sequence.push_back("Hello");
    /// sequence.push_back("world!");
    /// assert_eq!(sequence.render(), "<Hello, world!>");
    /// ```
    pub fn push_back(&mut self, value: impl Into<String>) {
        let node = Node::new_detached(value.into());
        // SAFETY: the tail and the boundary after it are adjacent.
        unsafe { self.attach_node(self.tail, None, node) }
    }

    /// Removes the last element and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::EmptyContainer`] if the sequence is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::{Sequence, SequenceError};
    ///
    /// let mut sequence = Sequence::from(["Hello", "there"]);
    /// assert_eq!(sequence.pop_back(), Ok("there".to_string()));
    /// assert_eq!(sequence.pop_back(), Ok("Hello".to_string()));
    /// assert_eq!(sequence.pop_back(), Err(SequenceError::EmptyContainer));
    /// ```
    pub fn pop_back(&mut self) -> Result<String, SequenceError> {
        let tail = self.tail.ok_or(SequenceError::EmptyContainer)?;
        // SAFETY: `tail` belongs to the sequence.
        Ok(unsafe { self.detach_node(tail) }.into_value())
    }

    /// Inserts an element so that it becomes the element at `position`,
    /// shifting all elements after it one slot later. `position == len`
    /// appends.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::OutOfRange`] if `position > len`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::{Sequence, SequenceError};
    ///
    /// let mut sequence = Sequence::from(["Hello", "world!"]);
    /// sequence.insert(1, "there")?;
    /// assert_eq!(sequence.render(), "<Hello, there, world!>");
    ///
    /// assert!(sequence.insert(4, "!").is_err());
    /// # Ok::<(), SequenceError>(())
    /// ```
    pub fn insert(&mut self, position: usize, value: impl Into<String>) -> Result<(), SequenceError> {
        if position > self.len {
            return Err(SequenceError::OutOfRange {
                index: position,
                len: self.len,
            });
        }
        let next = if position == self.len {
            None
        } else {
            Some(self.node_at(position)?)
        };
        let prev = match next {
            // SAFETY: `node` belongs to the sequence.
            Some(node) => unsafe { node.as_ref().prev },
            None => self.tail,
        };
        // SAFETY: `prev` and `next` are adjacent in the sequence.
        unsafe { self.attach_node(prev, next, Node::new_detached(value.into())) };
        Ok(())
    }

    /// Removes the element at `position` and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::OutOfRange`] if `position >= len`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::{Sequence, SequenceError};
    ///
    /// let mut sequence = Sequence::from(["Hello", "there", "partner!"]);
    /// assert_eq!(sequence.erase(1)?, "there");
    /// assert_eq!(sequence.render(), "<Hello, partner!>");
    /// # Ok::<(), SequenceError>(())
    /// ```
    pub fn erase(&mut self, position: usize) -> Result<String, SequenceError> {
        let node = self.node_at(position)?;
        // SAFETY: `node` belongs to the sequence.
        Ok(unsafe { self.detach_node(node) }.into_value())
    }

    /// Removes the `count` contiguous elements starting at `position`.
    ///
    /// # Errors
    ///
    /// - [`SequenceError::InvalidArgument`] if `count == 0`;
    /// - [`SequenceError::OutOfRange`] if `position >= len` or
    ///   `position + count > len`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::{Sequence, SequenceError};
    ///
    /// let mut sequence = Sequence::from(["Hello", "there", "partner!"]);
    /// sequence.erase_range(1, 2)?;
    /// assert_eq!(sequence.render(), "<Hello>");
    ///
    /// assert_eq!(sequence.erase_range(0, 0), Err(SequenceError::InvalidArgument));
    /// # Ok::<(), SequenceError>(())
    /// ```
    pub fn erase_range(&mut self, position: usize, count: usize) -> Result<(), SequenceError> {
        if count == 0 {
            return Err(SequenceError::InvalidArgument);
        }
        let front = self.node_at(position)?;
        let out_of_range = SequenceError::OutOfRange {
            index: position.saturating_add(count),
            len: self.len,
        };
        match position.checked_add(count) {
            Some(end) if end <= self.len => {}
            _ => return Err(out_of_range),
        }
        // SAFETY: `front` belongs to the sequence and is followed by at least
        // `count - 1` nodes.
        let back = unsafe { seek_forward(front, count - 1) }.ok_or(out_of_range)?;
        // SAFETY: `front..=back` is a valid range of `count` nodes.
        drop(unsafe { self.detach_nodes(front, back, count) });
        Ok(())
    }

    /// Moves all elements from `other` to the end of the sequence, leaving
    /// `other` empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let mut first = Sequence::from(["a"]);
    /// let mut second = Sequence::from(["b", "c"]);
    /// first.append(&mut second);
    /// assert_eq!(first.render(), "<a, b, c>");
    /// assert!(second.is_empty());
    /// ```
    pub fn append(&mut self, other: &mut Self) {
        if let Some(detached) = other.detach_all_nodes() {
            // SAFETY: the tail and the boundary after it are adjacent.
            unsafe { self.attach_nodes(self.tail, None, detached) }
        }
    }

    /// Splits the sequence into two at the given position. Returns everything
    /// from `at` (inclusive) to the end.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::OutOfRange`] if `at > len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::{Sequence, SequenceError};
    ///
    /// let mut sequence = Sequence::from(["a", "b", "c"]);
    /// let split = sequence.split_off(1)?;
    /// assert_eq!(sequence.render(), "<a>");
    /// assert_eq!(split.render(), "<b, c>");
    /// # Ok::<(), SequenceError>(())
    /// ```
    pub fn split_off(&mut self, at: usize) -> Result<Sequence, SequenceError> {
        if at > self.len {
            return Err(SequenceError::OutOfRange {
                index: at,
                len: self.len,
            });
        }
        if at == self.len {
            return Ok(Sequence::new());
        }
        let front = self.node_at(at)?;
        let back = self.tail.ok_or(SequenceError::EmptyContainer)?;
        let count = self.len - at;
        // SAFETY: `front` is at position `at` and `back` is the tail.
        let detached = unsafe { self.detach_nodes(front, back, count) };
        Ok(Sequence::from_detached(detached))
    }

    /// Provides a forward iterator.
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }

    /// Provides a forward iterator with mutable references.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let mut sequence = Sequence::from(["a", "b"]);
    /// for value in sequence.iter_mut() {
    ///     value.push('!');
    /// }
    /// assert_eq!(sequence.render(), "<a!, b!>");
    /// ```
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_> {
        IterMut::new(self)
    }
}

impl Index<usize> for Sequence {
    type Output = String;

    /// # Panics
    ///
    /// Panics if `position >= len`.
    fn index(&self, position: usize) -> &String {
        match self.get(position) {
            Ok(value) => value,
            Err(err) => panic!("{}", err),
        }
    }
}

impl IndexMut<usize> for Sequence {
    /// # Panics
    ///
    /// Panics if `position >= len`.
    fn index_mut(&mut self, position: usize) -> &mut String {
        match self.get_mut(position) {
            Ok(value) => value,
            Err(err) => panic!("{}", err),
        }
    }
}

impl Debug for Sequence {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl Default for Sequence {
    fn default() -> Self {
        Self::new()
    }
}

impl Node {
    /// Create a detached node with given value.
    pub(crate) fn new_detached(value: String) -> NonNull<Node> {
        NonNull::from(Box::leak(Box::new(Node {
            next: None,
            prev: None,
            value,
        })))
    }

    pub(crate) fn into_value(self: Box<Self>) -> String {
        self.value
    }
}

impl DetachedNodes {
    /// It is unsafe because it must be guaranteed that `front..=back` is
    /// a valid range and its length is equal to `len`.
    unsafe fn new(front: NonNull<Node>, back: NonNull<Node>, len: usize) -> Self {
        debug_assert!(len > 0, "Cannot detach nodes of length 0");
        Self {
            front,
            back,
            len,
            _marker: PhantomData,
        }
    }

    /// Hand the nodes over to a sequence without releasing them.
    fn into_parts(self) -> (NonNull<Node>, NonNull<Node>, usize) {
        let detached = ManuallyDrop::new(self);
        (detached.front, detached.back, detached.len)
    }
}

impl Drop for DetachedNodes {
    fn drop(&mut self) {
        let mut current = Some(self.front);
        for _ in 0..self.len {
            let node = match current {
                Some(node) => node,
                None => break,
            };
            // SAFETY: the detached nodes are owned by the fragment alone, and
            // each of them is released exactly once.
            let node = unsafe { Box::from_raw(node.as_ptr()) };
            current = node.next;
        }
    }
}

/// Follow `next` links `steps` times from `node`.
///
/// It is unsafe because `node` must be a valid node of a sequence.
unsafe fn seek_forward(node: NonNull<Node>, steps: usize) -> Link {
    (0..steps).try_fold(node, |node, _| node.as_ref().next)
}

impl Drop for Sequence {
    fn drop(&mut self) {
        self.clear();
    }
}

unsafe impl Send for Sequence {}

unsafe impl Sync for Sequence {}

#[cfg(test)]
impl Sequence {
    /// Walk the sequence in both directions and check every structural invariant.
    pub(crate) fn assert_well_formed(&self) {
        assert_eq!(self.head.is_none(), self.len == 0);
        assert_eq!(self.tail.is_none(), self.len == 0);
        if self.len == 1 {
            assert_eq!(self.head, self.tail);
        }
        unsafe {
            let (mut prev, mut current, mut forward) = (None, self.head, 0);
            while let Some(node) = current {
                assert_eq!(node.as_ref().prev, prev);
                prev = current;
                current = node.as_ref().next;
                forward += 1;
            }
            assert_eq!(prev, self.tail);
            assert_eq!(forward, self.len);

            let (mut next, mut current, mut backward) = (None, self.tail, 0);
            while let Some(node) = current {
                assert_eq!(node.as_ref().next, next);
                next = current;
                current = node.as_ref().prev;
                backward += 1;
            }
            assert_eq!(next, self.head);
            assert_eq!(backward, self.len);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::alloc_counter::live_allocations;
    use crate::{Sequence, SequenceError};
    use std::iter;

    #[test]
    fn sequence_create() {
        let mut sequence = Sequence::new();
        assert!(sequence.is_empty());
        sequence.push_back("a");
        assert!(!sequence.is_empty());
        assert_eq!(sequence.pop_back(), Ok("a".to_string()));
        assert!(sequence.is_empty());
        sequence.assert_well_formed();
    }

    #[test]
    fn sequence_with_len() {
        for len in 0..5 {
            let sequence = Sequence::with_len(len);
            sequence.assert_well_formed();
            assert_eq!(sequence.len(), len);
            assert!(sequence.iter().all(String::is_empty));
        }
        assert_eq!(Sequence::with_len(0).render(), "<>");
        assert_eq!(Sequence::with_len(1).render(), "<>");
        assert_eq!(Sequence::with_len(3).render(), "<, , >");
    }

    #[test]
    fn sequence_push_and_pop() {
        let mut sequence = Sequence::new();
        assert_eq!(sequence.len(), 0);

        assert_eq!(sequence.front(), Err(SequenceError::EmptyContainer));
        assert_eq!(sequence.back(), Err(SequenceError::EmptyContainer));
        assert_eq!(sequence.pop_front(), Err(SequenceError::EmptyContainer));
        assert_eq!(sequence.pop_back(), Err(SequenceError::EmptyContainer));

        sequence.push_back("1");
        assert_eq!(sequence.back().unwrap(), "1");
        assert_eq!(sequence.pop_front(), Ok("1".to_string()));
        assert_eq!(sequence.pop_back(), Err(SequenceError::EmptyContainer));
        assert!(sequence.is_empty());
        sequence.assert_well_formed();

        sequence.push_front("1");
        sequence.push_front("2");
        sequence.push_back("3");
        sequence.assert_well_formed();
        assert_eq!(sequence.front().unwrap(), "2");
        assert_eq!(sequence.back().unwrap(), "3");
        assert_eq!(sequence.pop_front(), Ok("2".to_string()));
        assert_eq!(sequence.pop_back(), Ok("3".to_string()));
        sequence.assert_well_formed();

        assert_eq!(sequence.front().unwrap(), "1");
        assert_eq!(sequence.back().unwrap(), "1");
        assert_eq!(sequence.pop_back(), Ok("1".to_string()));
        assert!(sequence.is_empty());
        sequence.assert_well_formed();
    }

    #[test]
    fn sequence_push_pop_restores() {
        let mut sequence = Sequence::from(["a", "b"]);
        let before = sequence.render();
        sequence.push_back("c");
        sequence.pop_back().unwrap();
        assert_eq!(sequence.render(), before);
        assert_eq!(sequence.len(), 2);
        sequence.assert_well_formed();
    }

    #[test]
    fn sequence_front_and_back_mut() {
        let mut sequence = Sequence::from(["a", "b"]);
        sequence.front_mut().unwrap().push('1');
        sequence.back_mut().unwrap().push('2');
        assert_eq!(sequence.render(), "<a1, b2>");
    }

    #[test]
    fn sequence_get() {
        let mut sequence = Sequence::from(["a", "b", "c"]);
        assert_eq!(sequence.get(0).unwrap(), "a");
        assert_eq!(sequence.get(2).unwrap(), "c");
        assert_eq!(
            sequence.get(3),
            Err(SequenceError::OutOfRange { index: 3, len: 3 })
        );
        *sequence.get_mut(1).unwrap() = "B".to_string();
        assert_eq!(sequence[1], "B");
        sequence[2].push('!');
        assert_eq!(sequence.render(), "<a, B, c!>");
        assert!(sequence.get_mut(3).is_err());
    }

    #[test]
    #[should_panic(expected = "position 2 is out of range for a sequence of length 2")]
    fn sequence_index_out_of_range() {
        let sequence = Sequence::with_len(2);
        let _ = &sequence[2];
    }

    #[test]
    fn sequence_insert() {
        let mut sequence = Sequence::new();
        // empty
        sequence.insert(0, "c").unwrap();
        sequence.assert_well_formed();
        // front
        sequence.insert(0, "a").unwrap();
        sequence.assert_well_formed();
        // end
        sequence.insert(2, "e").unwrap();
        sequence.assert_well_formed();
        // interior
        sequence.insert(1, "b").unwrap();
        sequence.insert(3, "d").unwrap();
        sequence.assert_well_formed();
        assert_eq!(sequence.render(), "<a, b, c, d, e>");
        assert_eq!(sequence.front().unwrap(), "a");
        assert_eq!(sequence.back().unwrap(), "e");

        assert_eq!(
            sequence.insert(6, "f"),
            Err(SequenceError::OutOfRange { index: 6, len: 5 })
        );
        assert_eq!(sequence.render(), "<a, b, c, d, e>");
    }

    #[test]
    fn sequence_erase() {
        let mut sequence = Sequence::from(["a", "b", "c", "d", "e"]);
        // interior
        assert_eq!(sequence.erase(2).unwrap(), "c");
        sequence.assert_well_formed();
        // head
        assert_eq!(sequence.erase(0).unwrap(), "a");
        sequence.assert_well_formed();
        // tail
        assert_eq!(sequence.erase(2).unwrap(), "e");
        sequence.assert_well_formed();
        assert_eq!(sequence.render(), "<b, d>");

        assert_eq!(
            sequence.erase(2),
            Err(SequenceError::OutOfRange { index: 2, len: 2 })
        );
        assert_eq!(sequence.erase(1).unwrap(), "d");
        assert_eq!(sequence.erase(0).unwrap(), "b");
        sequence.assert_well_formed();
        assert_eq!(
            sequence.erase(0),
            Err(SequenceError::OutOfRange { index: 0, len: 0 })
        );
    }

    #[test]
    fn sequence_insert_then_erase_restores() {
        let base = Sequence::from(["a", "b", "c"]);
        for position in 0..=base.len() {
            let mut sequence = base.clone();
            sequence.insert(position, "x").unwrap();
            assert_eq!(sequence.erase(position).unwrap(), "x");
            sequence.assert_well_formed();
            assert_eq!(sequence.render(), base.render());
            assert_eq!(sequence.len(), base.len());
        }
    }

    #[test]
    fn sequence_erase_range() {
        fn test_erase_range(len: usize, position: usize, count: usize) {
            let base: Sequence = (0..len).map(|i| i.to_string()).collect();

            let mut ranged = base.clone();
            ranged.erase_range(position, count).unwrap();
            ranged.assert_well_formed();

            let mut repeated = base.clone();
            for _ in 0..count {
                repeated.erase(position).unwrap();
            }
            assert_eq!(ranged.render(), repeated.render());
            assert_eq!(ranged.len(), len - count);
        }
        for len in 1..6 {
            for position in 0..len {
                for count in 1..=len - position {
                    test_erase_range(len, position, count);
                }
            }
        }

        let mut sequence = Sequence::from(["a", "b", "c"]);
        sequence.erase_range(0, 3).unwrap();
        assert!(sequence.is_empty());
        assert_eq!(sequence.render(), "<>");
        sequence.assert_well_formed();
        sequence.push_back("d");
        assert_eq!(sequence.render(), "<d>");
    }

    #[test]
    fn sequence_erase_range_errors() {
        let mut sequence = Sequence::from(["a", "b", "c"]);
        assert_eq!(sequence.erase_range(0, 0), Err(SequenceError::InvalidArgument));
        assert_eq!(
            sequence.erase_range(3, 1),
            Err(SequenceError::OutOfRange { index: 3, len: 3 })
        );
        assert_eq!(
            sequence.erase_range(1, 3),
            Err(SequenceError::OutOfRange { index: 4, len: 3 })
        );
        assert_eq!(
            sequence.erase_range(1, usize::MAX),
            Err(SequenceError::OutOfRange {
                index: usize::MAX,
                len: 3
            })
        );
        assert_eq!(sequence.render(), "<a, b, c>");
        assert_eq!(sequence.len(), 3);

        let mut empty = Sequence::new();
        assert_eq!(empty.erase_range(0, 0), Err(SequenceError::InvalidArgument));
        assert!(empty.erase_range(0, 1).is_err());
    }

    #[test]
    fn sequence_failures_do_not_mutate() {
        let mut sequence = Sequence::from(["a", "b"]);
        let len = sequence.len();
        assert!(sequence.get(len).is_err());
        assert!(sequence.insert(len + 1, "x").is_err());
        assert!(sequence.erase(len).is_err());
        assert!(sequence.erase_range(0, 0).is_err());
        assert!(sequence.split_off(len + 1).is_err());
        assert_eq!(sequence.render(), "<a, b>");
        assert_eq!(sequence.len(), len);
        sequence.assert_well_formed();

        let mut empty = Sequence::new();
        assert!(empty.front().is_err());
        assert!(empty.back().is_err());
        assert!(empty.pop_back().is_err());
        assert_eq!(empty.render(), "<>");
        assert_eq!(empty.len(), 0);
    }

    #[test]
    fn sequence_clear_and_truncate() {
        let mut sequence = Sequence::from(["a", "b", "c", "d"]);
        sequence.truncate(10);
        assert_eq!(sequence.len(), 4);
        sequence.truncate(2);
        sequence.assert_well_formed();
        assert_eq!(sequence.render(), "<a, b>");
        sequence.truncate(0);
        sequence.assert_well_formed();
        assert!(sequence.is_empty());

        let mut sequence = Sequence::from(["a", "b"]);
        sequence.clear();
        sequence.assert_well_formed();
        sequence.clear();
        assert!(sequence.is_empty());
        sequence.push_back("c");
        assert_eq!(sequence.render(), "<c>");
    }

    #[test]
    fn sequence_split_and_append() {
        fn test_split_and_append(values: &[&str], at: usize) {
            let mut sequence: Sequence = values.iter().copied().collect();
            let mut split = sequence.split_off(at).unwrap();
            sequence.assert_well_formed();
            split.assert_well_formed();
            assert_eq!(sequence.len(), at);
            assert_eq!(split.len(), values.len() - at);
            assert!(sequence.iter().eq(values[..at].iter().copied()));
            assert!(split.iter().eq(values[at..].iter().copied()));

            sequence.append(&mut split);
            sequence.assert_well_formed();
            split.assert_well_formed();
            assert!(split.is_empty());
            assert!(sequence.iter().eq(values.iter().copied()));
        }
        let values = ["a", "b", "c", "d"];
        for at in 0..=values.len() {
            test_split_and_append(&values, at);
        }
        test_split_and_append(&[], 0);
    }

    #[test]
    fn sequence_scenario() {
        let mut s1 = Sequence::with_len(2);
        s1[0] = "Hello".to_string();
        s1[1] = "world!".to_string();
        assert_eq!(s1.render(), "<Hello, world!>");

        s1.insert(1, "there").unwrap();
        assert_eq!(s1.render(), "<Hello, there, world!>");

        s1.pop_back().unwrap();
        assert_eq!(s1.render(), "<Hello, there>");

        s1.push_back("partner!");
        assert_eq!(s1.render(), "<Hello, there, partner!>");

        s1.erase(1).unwrap();
        assert_eq!(s1.render(), "<Hello, partner!>");

        s1.insert(1, "there").unwrap();
        assert_eq!(s1.render(), "<Hello, there, partner!>");

        s1.erase_range(1, 2).unwrap();
        assert_eq!(s1.render(), "<Hello>");
        s1.assert_well_formed();

        let mut s2 = Sequence::new();
        s2.push_back("Hello");
        s2.push_back("world!");
        assert_eq!(s2.render(), "<Hello, world!>");

        s1.assign(&s2);
        assert_eq!(s1.render(), "<Hello, world!>");
        assert_eq!(s1.len(), 2);
        s1.assert_well_formed();
    }

    #[test]
    fn sequence_releases_every_node() {
        // Each non-empty element owns two allocations: its node and its text.
        let baseline = live_allocations();
        let live = || live_allocations() - baseline;

        let mut sequence: Sequence = iter::repeat("x").take(8).collect();
        assert_eq!(live(), 16);

        sequence.erase(3).unwrap();
        assert_eq!(live(), 14);
        sequence.erase_range(1, 3).unwrap();
        assert_eq!(live(), 8);
        assert_eq!(sequence.erase_range(1, 4), Err(SequenceError::OutOfRange { index: 5, len: 4 }));
        assert_eq!(live(), 8);

        sequence.pop_front().unwrap();
        sequence.pop_back().unwrap();
        assert_eq!(live(), 4);

        sequence.extend(["y", "z"]);
        let split = sequence.split_off(1).unwrap();
        assert_eq!(live(), 8);
        drop(split);
        assert_eq!(live(), 2);

        sequence.push_back("w");
        sequence.truncate(1);
        assert_eq!(live(), 2);
        sequence.clear();
        assert_eq!(live(), 0);

        sequence.extend(["a", "b", "c"]);
        let mut copy = sequence.clone();
        assert_eq!(live(), 12);
        copy.assign(&Sequence::from(["d"]));
        assert_eq!(live(), 8);
        drop(copy);
        drop(sequence);
        assert_eq!(live(), 0);

        // Empty strings do not allocate, so only the nodes count.
        let sequence = Sequence::with_len(3);
        assert_eq!(live(), 3);
        drop(sequence);
        assert_eq!(live(), 0);
    }
}
