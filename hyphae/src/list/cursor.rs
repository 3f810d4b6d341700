use super::{pin_node, Link, Links, List};
use crate::{util::FmtOption, Linked};
use core::{fmt, pin::Pin, ptr::NonNull};

/// A cursor over a [`List`] with editing operations.
///
/// A `CursorMut` is like an iterator, except that it can freely seek
/// back-and-forth, and can safely mutate the list during iteration. This is
/// because the lifetime of its yielded references is tied to its own
/// lifetime, instead of just the underlying list. This means cursors cannot
/// yield multiple elements at once.
///
/// Cursors always rest between two elements in the list, and index in a
/// logically circular way. To accommodate this, there is a "ghost" non-element
/// that yields `None` between the head and tail of the list.
pub struct CursorMut<'list, T: Linked<Links<T>>> {
    pub(super) list: &'list mut List<T>,
    pub(super) curr: Link<T>,
    pub(super) index: usize,
}

// === impl CursorMut ====

impl<'list, T: Linked<Links<T>>> Iterator for CursorMut<'list, T> {
    type Item = Pin<&'list mut T>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut node = self.curr?;
        self.move_next();
        unsafe {
            // safety: the cursor mutably borrows the `List`, so the list will
            // not be dropped while the iterator exists, and no one else can
            // access the node.
            Some(Pin::new_unchecked(node.as_mut()))
        }
    }

    /// A [`CursorMut`] can never return an accurate `size_hint` --- its lower
    /// bound is always 0 and its upper bound is always `None`.
    ///
    /// This is because the cursor may be moved around within the list through
    /// methods outside of its `Iterator` implementation, and elements may be
    /// added or removed using the cursor.
    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, None)
    }
}

impl<'list, T: Linked<Links<T>>> CursorMut<'list, T> {
    /// Returns the index of this cursor's position in the [`List`].
    ///
    /// This returns `None` if the cursor is currently pointing to the
    /// null element.
    pub fn index(&self) -> Option<usize> {
        self.curr?;
        Some(self.index)
    }

    /// Moves the cursor position to the next element in the [`List`].
    ///
    /// If the cursor is pointing at the null element, this moves it to the first
    /// element in the [`List`]. If it is pointing to the last element in the
    /// list, then this will move it to the null element.
    pub fn move_next(&mut self) {
        match self.curr.take() {
            Some(curr) => unsafe {
                self.curr = self.list.ring.next(curr);
                self.index += 1;
            },
            None => {
                self.curr = self.list.ring.front();
                self.index = 0;
            }
        }
    }

    /// Moves the cursor to the previous element in the [`List`].
    ///
    /// If the cursor is pointing at the null element, this moves it to the last
    /// element in the [`List`]. If it is pointing to the first element in the
    /// list, then this will move it to the null element.
    pub fn move_prev(&mut self) {
        match self.curr.take() {
            Some(curr) => unsafe {
                self.curr = self.list.ring.prev(curr);
                self.index = match self.curr {
                    Some(_) => self.index - 1,
                    None => self.list.len(),
                };
            },
            None => {
                self.curr = self.list.ring.back();
                self.index = self.list.len().saturating_sub(1);
            }
        }
    }

    /// Removes the current element from the [`List`] and returns the [`Handle`]
    /// owning that element.
    ///
    /// If the cursor is currently pointing to an element, that element is
    /// removed and returned, and the cursor is moved to point to the next
    /// element in the [`List`].
    ///
    /// If the cursor is currently pointing to the null element, then no element
    /// is removed and `None` is returned.
    ///
    /// [`Handle`]: crate::Linked::Handle
    pub fn remove_current(&mut self) -> Option<T::Handle> {
        let node = self.curr?;
        unsafe {
            // before modifying `node`'s links, set the current element to the
            // one after `node`.
            self.curr = self.list.ring.next(node);
            // safety: the cursor can only reach nodes from the list it
            // borrows.
            self.list.remove(node)
        }
    }

    /// Find and remove the first element matching the provided `predicate`.
    ///
    /// This traverses the list from the cursor's current position and calls
    /// `predicate` with each element in the list. If `predicate` returns
    /// `true` for a given element, that element is removed from the list and
    /// returned, and the traversal ends. If the traversal reaches the end of
    /// the list without finding a match, then no element is returned.
    ///
    /// Note that if the cursor is not at the beginning of the list, then any
    /// matching elements *before* the cursor's position will not be removed.
    pub fn remove_first(&mut self, mut predicate: impl FnMut(&T) -> bool) -> Option<T::Handle> {
        while !predicate(unsafe { self.curr?.as_ref() }) {
            self.move_next();
        }

        self.remove_current()
    }

    /// Inserts `item` before the cursor's current element.
    ///
    /// If the cursor is pointing at the null element, the item is pushed to
    /// the back of the [`List`]. The cursor keeps pointing at the same
    /// element.
    pub fn insert_before(&mut self, item: T::Handle) {
        match self.curr {
            Some(curr) => unsafe {
                // safety: `curr` is an element of the borrowed list.
                self.list.insert_before(curr, item);
                self.index += 1;
            },
            None => {
                self.list.push_back(item);
                self.index += 1;
            }
        }
    }

    /// Inserts `item` after the cursor's current element.
    ///
    /// If the cursor is pointing at the null element, the item is pushed to
    /// the front of the [`List`]. The cursor keeps pointing at the same
    /// element.
    pub fn insert_after(&mut self, item: T::Handle) {
        match self.curr {
            Some(curr) => unsafe {
                // safety: `curr` is an element of the borrowed list.
                self.list.insert_after(curr, item);
            },
            None => {
                self.list.push_front(item);
                self.index = self.list.len();
            }
        }
    }

    /// Borrows the element that the cursor is currently pointing at.
    ///
    /// This returns `None` if the cursor is currently pointing to the
    /// null element.
    pub fn current(&self) -> Option<Pin<&T>> {
        self.curr.map(|node| unsafe { pin_node(node) })
    }

    /// Mutably borrows the element that the cursor is currently pointing at.
    ///
    /// This returns `None` if the cursor is currently pointing to the
    /// null element.
    pub fn current_mut(&mut self) -> Option<Pin<&mut T>> {
        self.curr.map(|node| unsafe { pin_node_mut(node) })
    }

    /// Borrows the next element after the cursor's current position in the
    /// list.
    ///
    /// If the cursor is pointing to the null element, this returns the first
    /// element in the [`List`]. If the cursor is pointing to the last element
    /// in the [`List`], this returns `None`.
    pub fn peek_next(&self) -> Option<Pin<&T>> {
        self.next_link().map(|next| unsafe { pin_node(next) })
    }

    /// Borrows the previous element before the cursor's current position in the
    /// list.
    ///
    /// If the cursor is pointing to the null element, this returns the last
    /// element in the [`List`]. If the cursor is pointing to the first element
    /// in the [`List`], this returns `None`.
    pub fn peek_prev(&self) -> Option<Pin<&T>> {
        self.prev_link().map(|prev| unsafe { pin_node(prev) })
    }

    /// Returns the length of the [`List`] this cursor points to.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns `true` if the [`List`] this cursor points to is empty.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    fn next_link(&self) -> Link<T> {
        match self.curr {
            Some(curr) => unsafe { self.list.ring.next(curr) },
            None => self.list.ring.front(),
        }
    }

    fn prev_link(&self) -> Link<T> {
        match self.curr {
            Some(curr) => unsafe { self.list.ring.prev(curr) },
            None => self.list.ring.back(),
        }
    }
}

impl<T: Linked<Links<T>>> fmt::Debug for CursorMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { list, curr, index } = self;
        f.debug_struct("CursorMut")
            .field("curr", &FmtOption::new(curr))
            .field("list", list)
            .field("index", index)
            .finish()
    }
}

#[inline]
unsafe fn pin_node_mut<'a, T>(mut node: NonNull<T>) -> Pin<&'a mut T> {
    // safety: nodes linked into a list are pinned for as long as they are
    // linked, and the cursor has exclusive access to the list.
    Pin::new_unchecked(node.as_mut())
}
