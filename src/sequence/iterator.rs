use crate::sequence::{Link, Sequence};
use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;

/// An iterator over the elements of a `Sequence`.
///
/// It uses a pair of links `head..=tail` with the count of remaining
/// elements to represent a closed subrange of the sequence.
///
/// Though the `Iter` does not hold a reference from the sequence,
/// it actually *borrows* (immutably) from it, so a phantom
/// marker of `&'a Sequence` is added to protect the sequence from being
/// written.
///
/// # Examples
///
/// ```compile_fail
/// use linked_sequence::Sequence;
///
/// let mut sequence = Sequence::from(["a", "b"]);
/// let mut iter = sequence.iter();
///
/// // Won't compile, because the sequence is already borrowed immutably.
/// sequence.push_back("c");
/// println!("{:?}", iter.next());
/// ```
#[derive(Clone)]
pub struct Iter<'a> {
    head: Link,
    tail: Link,
    len: usize,
    _marker: PhantomData<&'a Sequence>,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(sequence: &'a Sequence) -> Self {
        Self {
            head: sequence.head_node(),
            tail: sequence.tail_node(),
            len: sequence.len(),
            _marker: PhantomData,
        }
    }
}

impl fmt::Debug for Iter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.len).finish()
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a String;

    /// Return `*head` and shrink the iterating range to `(head.next)..=tail`,
    /// or return `None` if the range is already empty.
    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let node = self.head?;
        // SAFETY: `head..=tail` is always a valid range of a sequence,
        // and it is not empty here, so it is safe.
        let current = unsafe { &*node.as_ptr() };
        self.len -= 1;
        self.head = current.next;
        Some(&current.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<'a> DoubleEndedIterator for Iter<'a> {
    /// Return `*tail` and shrink the iterating range to `head..=(tail.prev)`,
    /// or return `None` if the range is already empty.
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let node = self.tail?;
        // SAFETY: same as `next`.
        let current = unsafe { &*node.as_ptr() };
        self.len -= 1;
        self.tail = current.prev;
        Some(&current.value)
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

/// An iterator over the elements of a `Sequence` with mutable references.
///
/// Only the values can be mutated, never the links between the nodes.
pub struct IterMut<'a> {
    head: Link,
    tail: Link,
    len: usize,
    _marker: PhantomData<&'a mut Sequence>,
}

impl<'a> IterMut<'a> {
    pub(crate) fn new(sequence: &'a mut Sequence) -> Self {
        Self {
            head: sequence.head_node(),
            tail: sequence.tail_node(),
            len: sequence.len(),
            _marker: PhantomData,
        }
    }
}

impl fmt::Debug for IterMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IterMut").field(&self.len).finish()
    }
}

impl<'a> Iterator for IterMut<'a> {
    type Item = &'a mut String;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let node = self.head?;
        // SAFETY: `head..=tail` is always a valid range of a sequence, and
        // each node in it is yielded at most once.
        let current = unsafe { &mut *node.as_ptr() };
        self.len -= 1;
        self.head = current.next;
        Some(&mut current.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<'a> DoubleEndedIterator for IterMut<'a> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let node = self.tail?;
        // SAFETY: same as `next`.
        let current = unsafe { &mut *node.as_ptr() };
        self.len -= 1;
        self.tail = current.prev;
        Some(&mut current.value)
    }
}

impl ExactSizeIterator for IterMut<'_> {}

impl FusedIterator for IterMut<'_> {}

/// An owning iterator over the elements of a `Sequence`.
pub struct IntoIter {
    sequence: Sequence,
}

impl fmt::Debug for IntoIter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter")
            .field("sequence", &self.sequence)
            .finish()
    }
}

impl Iterator for IntoIter {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.sequence.pop_front().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.sequence.len();
        (len, Some(len))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl DoubleEndedIterator for IntoIter {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.sequence.pop_back().ok()
    }
}

impl ExactSizeIterator for IntoIter {}

impl FusedIterator for IntoIter {}

impl IntoIterator for Sequence {
    type Item = String;
    type IntoIter = IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { sequence: self }
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a String;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &'a mut Sequence {
    type Item = &'a mut String;
    type IntoIter = IterMut<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<S: Into<String>> FromIterator<S> for Sequence {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut sequence = Sequence::new();
        sequence.extend(iter);
        sequence
    }
}

impl<S: Into<String>> Extend<S> for Sequence {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        iter.into_iter().for_each(|value| self.push_back(value));
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for Sequence {
    fn from(values: [S; N]) -> Self {
        Self::from_iter(values)
    }
}

unsafe impl Send for Iter<'_> {}

unsafe impl Sync for Iter<'_> {}

unsafe impl Send for IterMut<'_> {}

unsafe impl Sync for IterMut<'_> {}
