use crate::sequence::Sequence;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

impl PartialEq for Sequence {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other)
    }
}

impl Eq for Sequence {}

impl PartialOrd for Sequence {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Sequence {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other)
    }
}

impl Clone for Sequence {
    /// Deep copy: the clone shares no node with `self`.
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }

    fn clone_from(&mut self, other: &Self) {
        self.assign(other);
    }
}

impl Hash for Sequence {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut len = 0_usize;
        for value in self {
            value.hash(state);
            len += 1;
        }
        len.hash(state);
    }
}

/// Renders the sequence as `<e0, e1, ..., en-1>`, or `<>` if it is empty.
impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<")?;
        let mut iter = self.iter();
        if let Some(first) = iter.next() {
            f.write_str(first)?;
            for value in iter {
                f.write_str(", ")?;
                f.write_str(value)?;
            }
        }
        f.write_str(">")
    }
}

impl Sequence {
    /// Replaces the contents of the sequence with a deep copy of `other`.
    ///
    /// The nodes already owned by `self` are reused: their values are
    /// overwritten, the surplus nodes are released and the missing ones are
    /// appended.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n* + *m*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let mut target = Sequence::from(["Hello"]);
    /// let source = Sequence::from(["Hello", "world!"]);
    /// target.assign(&source);
    /// assert_eq!(target.render(), "<Hello, world!>");
    ///
    /// target.push_back("again");
    /// assert_eq!(source.render(), "<Hello, world!>");
    /// ```
    ///
    /// Assigning a sequence to itself is rejected by the borrow checker:
    ///
    /// ```compile_fail
    /// use linked_sequence::Sequence;
    ///
    /// let mut sequence = Sequence::from(["a"]);
    /// sequence.assign(&sequence);
    /// ```
    pub fn assign(&mut self, other: &Sequence) {
        let shared = self.len().min(other.len());
        self.truncate(other.len());
        for (value, source) in self.iter_mut().zip(other) {
            value.clone_from(source);
        }
        self.extend(other.iter().skip(shared).cloned());
    }

    /// Returns the canonical text form of the sequence: the elements in
    /// order, separated by `, ` and delimited by `<` and `>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// assert_eq!(Sequence::new().render(), "<>");
    /// assert_eq!(Sequence::from(["Hello"]).render(), "<Hello>");
    /// assert_eq!(Sequence::from(["Hello", "world!"]).render(), "<Hello, world!>");
    /// ```
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Returns `true` if the `Sequence` contains an element equal to the given value.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let sequence = Sequence::from(["a", "b"]);
    /// assert!(sequence.contains("b"));
    /// assert!(!sequence.contains("c"));
    /// ```
    pub fn contains(&self, value: &str) -> bool {
        self.iter().any(|e| e == value)
    }
}
