//! Errors reported by the consistency checks.
//!
//! None of the list operations in this crate fail at runtime. A [`Violation`]
//! is only ever produced by [`List::check`] or [`PriorityList::check`], which
//! walk a list and re-derive its invariants, typically from a test harness.
//!
//! [`List::check`]: crate::List::check
//! [`PriorityList::check`]: crate::PriorityList::check

/// An invariant of an intrusive list that did not hold.
///
/// Indices count elements from the front of the ring being walked, starting
/// at zero.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Violation {
    /// A node reachable from a ring has no `next` or `prev` link.
    #[error("{ring} ring: node {index} is reachable but has detached links")]
    Detached {
        /// The ring that was being walked.
        ring: &'static str,
        /// Position of the offending node.
        index: usize,
    },

    /// A node's neighbor does not link back to it.
    #[error("{ring} ring: the neighbors of node {index} do not link back to it")]
    BrokenLink {
        /// The ring that was being walked.
        ring: &'static str,
        /// Position of the offending node.
        index: usize,
    },

    /// Walking the ring visited a different number of nodes than the ring
    /// claims to hold.
    ///
    /// This is also how a node linked into the ring twice shows up, since
    /// the walk then never returns to the front in `expected` steps.
    #[error("{ring} ring: expected {expected} nodes, but found {actual}")]
    LenMismatch {
        /// The ring that was being walked.
        ring: &'static str,
        /// The ring's recorded length.
        expected: usize,
        /// The number of nodes visited before giving up.
        actual: usize,
    },

    /// A node sorts strictly before its predecessor.
    #[error("node {index} sorts before the node preceding it")]
    OutOfOrder {
        /// Position of the offending node in the node ring.
        index: usize,
    },

    /// The first node of a priority band is not that band's representative.
    #[error("node {index} is the first of its priority band, but is not a representative")]
    MissingRepresentative {
        /// Position of the offending node in the node ring.
        index: usize,
    },

    /// A node that is not the first of its priority band is linked into the
    /// representative ring.
    #[error("node {index} is a representative, but is not the first of its priority band")]
    StrayRepresentative {
        /// Position of the offending node in the node ring.
        index: usize,
    },

    /// The representative ring does not visit the band heads of the node
    /// ring in order.
    #[error("representative {index} is not the head of priority band {index}")]
    RepresentativeMismatch {
        /// Position in the representative ring.
        index: usize,
    },
}
