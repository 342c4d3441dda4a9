//! This crate provides an index-addressable, doubly-linked sequence of strings
//! with owned nodes.
//!
//! The [`Sequence`] allows inserting and removing elements at either end in
//! constant time. In compromise, accessing, inserting or removing elements at
//! any other position takes *O*(*n*) time, walking the nodes from the head.
//!
//! Here is a quick example showing how the sequence works.
//!
//! ```
//! use linked_sequence::{Sequence, SequenceError};
//!
//! let mut sequence = Sequence::with_len(2);
//! sequence[0] = "Hello".to_string();
//! sequence[1] = "world!".to_string();
//! assert_eq!(sequence.render(), "<Hello, world!>");
//!
//! sequence.insert(1, "there")?; // insert before position 1
//! assert_eq!(sequence.render(), "<Hello, there, world!>");
//!
//! sequence.pop_back()?;
//! sequence.push_back("partner!");
//! assert_eq!(sequence.render(), "<Hello, there, partner!>");
//!
//! sequence.erase_range(1, 2)?; // erase positions 1 and 2
//! assert_eq!(sequence.render(), "<Hello>");
//!
//! // Failing operations report an error and leave the sequence untouched.
//! assert_eq!(
//!     sequence.erase(1),
//!     Err(SequenceError::OutOfRange { index: 1, len: 1 })
//! );
//! # Ok::<(), SequenceError>(())
//! ```
//!
//! # Memory Layout
//!
//! The memory layout of the sequence is like the following graph:
//! ```text
//!              ╔═══════════╗           ╔═══════════╗                        ╔═══════════╗
//!     None ←── ║   prev    ║ ←──────── ║   prev    ║ ←──────── ┄┄ ←──────── ║   prev    ║
//!              ╟───────────╢           ╟───────────╢     Node 2, 3, ...     ╟───────────╢
//!              ║   next    ║ ────────→ ║   next    ║ ────────→ ┄┄ ────────→ ║   next    ║ ──→ None
//!              ╟───────────╢           ╟───────────╢                        ╟───────────╢
//!              ║  String   ║           ║  String   ║                        ║  String   ║
//!              ╚═══════════╝           ╚═══════════╝                        ╚═══════════╝
//!                 Node 0                  Node 1                              Node n - 1
//!                   ↑                                                             ↑
//!   ╔═══════════╗   │                                                             │
//!   ║   head    ║ ──┘                                                             │
//!   ╟───────────╢                                                                 │
//!   ║   tail    ║ ────────────────────────────────────────────────────────────────┘
//!   ╟───────────╢
//!   ║    len    ║
//!   ╚═══════════╝
//!     Sequence
//! ```
//! The `Sequence` contains:
//! - a pointer `head` to the first node, and a pointer `tail` to the last node,
//!   both of which are `None` in an empty sequence;
//! - a length field `len`.
//!
//! Each node of the sequence is allocated on heap, which contains:
//! - the `next` pointer that points to the next node (or `None` if it is the
//!   last node);
//! - the `prev` pointer that points to the previous node (or `None` if it is
//!   the first node);
//! - the `String` payload.
//!
//! In a sequence with length *n*, the nodes are indexed by 0, 1, ..., *n* - 1.
//! Positions accepted by [`insert`] range over 0, 1, ..., *n*, where *n* appends.
//!
//! # Rendering
//!
//! A sequence renders as its elements separated by `, ` and delimited by `<`
//! and `>`, e.g. `<4, 8, 15, 16, 23, 42>`, or `<>` if it is empty. See
//! [`render`]; the same text is produced by the `Display` implementation.
//!
//! # Copying
//!
//! [`Clone`] and [`assign`] always produce deep copies: a copy shares no node
//! with its source, and mutating one never affects the other.
//!
//! # Safe Variant
//!
//! With the `ghost` feature (enabled by default), the `ghost` module provides
//! `GhostSequence`, the same container written without `unsafe`, where the
//! nodes are owned through `static_rc` halves and guarded by a `ghost_cell`
//! token.
//!
//! [`Sequence`]: crate::Sequence
//! [`insert`]: crate::Sequence::insert
//! [`render`]: crate::Sequence::render
//! [`assign`]: crate::Sequence::assign

#[doc(inline)]
pub use error::SequenceError;
#[doc(inline)]
pub use sequence::iterator::{IntoIter, Iter, IterMut};
#[doc(inline)]
pub use sequence::Sequence;

pub mod sequence;

mod error;

#[cfg(feature = "ghost")]
pub mod ghost;

#[cfg(test)]
mod alloc_counter;
