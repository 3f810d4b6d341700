//! An intrusive, circular doubly-linked list.
//!
//! See the [`List`] type for details.
use crate::{error::Violation, util::FmtOption, Linked};
use core::{
    cell::UnsafeCell,
    fmt,
    iter::{FromIterator, FusedIterator},
    marker::PhantomPinned,
    mem,
    pin::Pin,
    ptr::NonNull,
};

mod cursor;
pub use self::cursor::CursorMut;


/// An [intrusive] doubly-linked list.
///
/// This data structure may be used as a first-in, first-out queue by using the
/// [`List::push_back`] and [`List::pop_front`] methods. It also supports
/// random-access removals using the [`List::remove`] method, and insertion
/// next to an element already in the list using [`List::insert_before`] and
/// [`List::insert_after`].
///
/// Internally, the list is *circular*: the last element links forward to the
/// first, and the first links back to the last. An element that is not in
/// any list has no links at all, so a list of one element (which links to
/// itself) can always be told apart from a detached element.
///
/// In order to be part of a `List`, a type `T` must implement [`Linked`] for
/// [`list::Links<T>`].
///
/// # Examples
///
/// ```
/// use hyphae::{
///     Linked,
///     list::{self, List},
/// };
/// use std::{pin::Pin, ptr::NonNull};
///
/// /// A simple queue entry that stores an `i32`.
/// // This type must be `repr(C)` in order for the cast in `Linked::links`
/// // to be sound.
/// #[repr(C)]
/// #[derive(Debug, Default)]
/// struct Entry {
///    links: list::Links<Entry>,
///    val: i32,
/// }
///
/// unsafe impl Linked<list::Links<Entry>> for Entry {
///     type Handle = Pin<Box<Self>>;
///
///     fn into_ptr(handle: Pin<Box<Entry>>) -> NonNull<Entry> {
///        unsafe { NonNull::from(Box::leak(Pin::into_inner_unchecked(handle))) }
///     }
///
///     unsafe fn from_ptr(ptr: NonNull<Entry>) -> Pin<Box<Entry>> {
///         Pin::new_unchecked(Box::from_raw(ptr.as_ptr()))
///     }
///
///     unsafe fn links(target: NonNull<Entry>) -> NonNull<list::Links<Entry>> {
///         // Safety: this cast is safe only because `Entry` `is repr(C)` and
///         // the links is the first field.
///         target.cast()
///     }
/// }
///
/// let mut list = List::<Entry>::new();
/// for val in 0..5 {
///     list.push_back(Box::pin(Entry { val, ..Entry::default() }));
/// }
///
/// for i in 0..5 {
///     let entry = list.pop_front()
///         .expect("the list should have 5 entries in it");
///     assert_eq!(entry.val, i, "entries are dequeued in FIFO order");
/// }
///
/// assert!(list.is_empty());
/// ```
///
/// [intrusive]: crate#intrusive-data-structures
/// [`list::Links<T>`]: crate::list::Links
pub struct List<T: Linked<Links<T>>> {
    ring: Ring<T>,
}

/// Links to other nodes in a [`List`].
///
/// In order to be part of a [`List`], a type must contain an instance of this
/// type, and must implement the [`Linked`] trait for `Links<Self>`.
pub struct Links<T> {
    inner: UnsafeCell<LinksInner<T>>,
}

/// Iterates over the items in a [`List`] by reference.
pub struct Iter<'list, T> {
    ring: &'list Ring<T>,
    curr: Link<T>,
    curr_back: Link<T>,
    len: usize,
}

/// An iterator returned by [`List::drain_filter`].
pub struct DrainFilter<'list, T, F>
where
    T: Linked<Links<T>>,
    F: FnMut(&T) -> bool,
{
    cursor: CursorMut<'list, T>,
    pred: F,
}

pub(crate) type Link<T> = Option<NonNull<T>>;

/// Returns the [`Links`] a given ring is threaded through.
pub(crate) type LinksFn<T> = unsafe fn(NonNull<T>) -> NonNull<Links<T>>;

/// The raw circular list underneath [`List`] and [`PriorityList`].
///
/// A `Ring` never converts to or from [`Linked::Handle`]s; it only rewires
/// the [`Links`] returned by its `links` function. Because that function is
/// a field rather than a trait bound, the same element type may be threaded
/// through more than one ring at once, as long as each ring uses a different
/// `Links` field.
///
/// [`PriorityList`]: crate::PriorityList
pub(crate) struct Ring<T> {
    head: Link<T>,
    len: usize,
    links: LinksFn<T>,
    name: &'static str,
}

#[repr(C)]
struct LinksInner<T> {
    next: Link<T>,
    prev: Link<T>,
    /// Linked list links must always be `!Unpin`, in order to ensure that they
    /// never recieve LLVM `noalias` annotations; see also
    /// <https://github.com/rust-lang/rust/issues/63818>.
    _unpin: PhantomPinned,
}

// ==== impl List ====

impl<T: Linked<Links<T>>> List<T> {
    /// Returns a new empty list.
    #[must_use]
    pub const fn new() -> List<T> {
        List {
            ring: Ring::new("list", T::links),
        }
    }

    /// Returns `true` if this list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Returns the number of elements in the list.
    #[inline]
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    /// Walks the list, checking that every node's neighbors link back to it
    /// and that the walk visits exactly [`len`](Self::len) nodes.
    ///
    /// This never modifies the list.
    pub fn check(&self) -> Result<(), Violation> {
        self.ring.check()
    }

    /// Asserts as many of the linked list's invariants as possible.
    ///
    /// # Panics
    ///
    /// If [`check`](Self::check) reports a [`Violation`].
    #[track_caller]
    pub fn assert_valid(&self) {
        if let Err(violation) = self.check() {
            panic!("invalid list: {violation}; list={self:#?}");
        }
    }

    /// Appends an item to the head of the list.
    pub fn push_front(&mut self, item: T::Handle) {
        let ptr = T::into_ptr(item);
        test_trace!(?ptr, "List::push_front");
        unsafe {
            // Safety: handles point to valid, pinned nodes, and a node being
            // pushed is not yet part of any list.
            self.ring.push_front(ptr);
        }
    }

    /// Appends an item to the tail of the list.
    pub fn push_back(&mut self, item: T::Handle) {
        let ptr = T::into_ptr(item);
        test_trace!(?ptr, "List::push_back");
        unsafe {
            // Safety: see `push_front`.
            self.ring.push_back(ptr);
        }
    }

    /// Removes an item from the head of the list.
    pub fn pop_front(&mut self) -> Option<T::Handle> {
        let head = self.ring.pop_front()?;
        test_trace!(?head, "List::pop_front");
        Some(unsafe { T::from_ptr(head) })
    }

    /// Removes an item from the tail of the list.
    pub fn pop_back(&mut self) -> Option<T::Handle> {
        let tail = self.ring.pop_back()?;
        test_trace!(?tail, "List::pop_back");
        Some(unsafe { T::from_ptr(tail) })
    }

    /// Borrows the item at the head of the list, if there is one.
    #[must_use]
    pub fn front(&self) -> Option<Pin<&T>> {
        self.ring.front().map(|node| unsafe { pin_node(node) })
    }

    /// Borrows the item at the tail of the list, if there is one.
    #[must_use]
    pub fn back(&self) -> Option<Pin<&T>> {
        self.ring.back().map(|node| unsafe { pin_node(node) })
    }

    /// Inserts `item` immediately before the node `at`.
    ///
    /// # Safety
    ///
    /// The caller *must* ensure that `at` is an element of this linked list,
    /// and not any other linked list.
    pub unsafe fn insert_before(&mut self, at: NonNull<T>, item: T::Handle) {
        let ptr = T::into_ptr(item);
        test_trace!(?at, ?ptr, "List::insert_before");
        self.ring.insert_before(at, ptr);
    }

    /// Inserts `item` immediately after the node `at`.
    ///
    /// # Safety
    ///
    /// The caller *must* ensure that `at` is an element of this linked list,
    /// and not any other linked list.
    pub unsafe fn insert_after(&mut self, at: NonNull<T>, item: T::Handle) {
        let ptr = T::into_ptr(item);
        test_trace!(?at, ?ptr, "List::insert_after");
        self.ring.insert_after(at, ptr);
    }

    /// Remove an arbitrary node from the list.
    ///
    /// The removed node's links are reset, so it may be pushed to this or any
    /// other list afterwards. If `item` is not linked into any list, this
    /// returns `None` and leaves the list untouched.
    ///
    /// # Safety
    ///
    /// The caller *must* ensure that the removed node is an element of this
    /// linked list, and not any other linked list.
    pub unsafe fn remove(&mut self, item: NonNull<T>) -> Option<T::Handle> {
        test_trace!(?item, "List::remove");
        if !self.ring.unlink(item) {
            return None;
        }
        Some(T::from_ptr(item))
    }

    /// Returns an iterator over the items in this list, by reference.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        self.ring.iter()
    }

    /// Returns a [`CursorMut`] starting at the first element.
    ///
    /// The [`CursorMut`] type can be used as a mutable [`Iterator`]. In
    /// addition, however, it also permits modifying the *structure* of the
    /// list by inserting or removing elements at the cursor's current
    /// position.
    #[must_use]
    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, T> {
        CursorMut {
            curr: self.ring.front(),
            index: 0,
            list: self,
        }
    }

    /// Returns a [`CursorMut`] starting at the last element.
    #[must_use]
    pub fn cursor_back_mut(&mut self) -> CursorMut<'_, T> {
        CursorMut {
            curr: self.ring.back(),
            index: self.len().saturating_sub(1),
            list: self,
        }
    }

    /// Returns an iterator which uses a closure to determine if an element
    /// should be removed from the list.
    ///
    /// If the closure returns `true`, the element is removed and yielded. If
    /// the closure returns `false`, the element remains in the list and will
    /// not be yielded by the iterator. Because the cursor is moved past an
    /// element before that element is unlinked, this is the safe way to
    /// remove elements while traversing the list.
    ///
    /// Elements that are not yielded because the iterator was dropped early
    /// are left in the list.
    pub fn drain_filter<F>(&mut self, pred: F) -> DrainFilter<'_, T, F>
    where
        F: FnMut(&T) -> bool,
    {
        DrainFilter {
            cursor: self.cursor_front_mut(),
            pred,
        }
    }
}

impl<T: Linked<Links<T>>> Drop for List<T> {
    fn drop(&mut self) {
        // Unlink every remaining node before dropping its handle, so that
        // borrowed entries outliving the list are left detached.
        while let Some(node) = self.pop_front() {
            drop(node);
        }
    }
}

impl<T: Linked<Links<T>>> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Linked<Links<T>>> Extend<T::Handle> for List<T> {
    fn extend<I: IntoIterator<Item = T::Handle>>(&mut self, iter: I) {
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<T: Linked<Links<T>>> FromIterator<T::Handle> for List<T> {
    fn from_iter<I: IntoIterator<Item = T::Handle>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<'list, T: Linked<Links<T>>> IntoIterator for &'list List<T> {
    type Item = Pin<&'list T>;
    type IntoIter = Iter<'list, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

unsafe impl<T: Linked<Links<T>>> Send for List<T> where T: Send {}
unsafe impl<T: Linked<Links<T>>> Sync for List<T> where T: Sync {}

impl<T: Linked<Links<T>>> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("List")
            .field("head", &FmtOption::new(&self.ring.front()))
            .field("tail", &FmtOption::new(&self.ring.back()))
            .field("len", &self.len())
            .finish()
    }
}

// ==== impl Ring ====

impl<T> Ring<T> {
    pub(crate) const fn new(name: &'static str, links: LinksFn<T>) -> Self {
        Self {
            head: None,
            len: 0,
            links,
            name,
        }
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        if self.head.is_none() {
            debug_assert_eq!(
                self.len, 0,
                "inconsistent state: the {} ring has no head but a non-zero length",
                self.name
            );
            return true;
        }

        false
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) fn front(&self) -> Link<T> {
        self.head
    }

    #[inline]
    pub(crate) fn back(&self) -> Link<T> {
        let head = self.head?;
        unsafe { self.links_of(head).prev() }
    }

    /// Returns `true` if `node` is linked into a ring through this ring's
    /// `Links` field.
    ///
    /// # Safety
    ///
    /// `node` must point to a valid `T`.
    #[inline]
    pub(crate) unsafe fn is_linked(&self, node: NonNull<T>) -> bool {
        self.links_of(node).is_linked()
    }

    /// Returns the node after `node`, or `None` if `node` is the back of the
    /// ring.
    ///
    /// # Safety
    ///
    /// `node` must be linked into this ring.
    #[inline]
    pub(crate) unsafe fn next(&self, node: NonNull<T>) -> Link<T> {
        let next = self.links_of(node).next()?;
        if self.head == Some(next) {
            return None;
        }
        Some(next)
    }

    /// Returns the node before `node`, or `None` if `node` is the front of
    /// the ring.
    ///
    /// # Safety
    ///
    /// `node` must be linked into this ring.
    #[inline]
    pub(crate) unsafe fn prev(&self, node: NonNull<T>) -> Link<T> {
        if self.head == Some(node) {
            return None;
        }
        self.links_of(node).prev()
    }

    /// # Safety
    ///
    /// `node` must point to a valid, pinned `T` that is not linked into any
    /// ring through this ring's `Links` field.
    pub(crate) unsafe fn push_back(&mut self, node: NonNull<T>) {
        match self.head {
            Some(head) => {
                let (tail, _) = self.neighbors(head);
                self.link_between(node, tail, head);
            }
            None => {
                debug_assert!(
                    !self.is_linked(node),
                    "node {node:p} is already linked into a {} ring",
                    self.name
                );
                let links = self.links_mut(node);
                links.set_next(Some(node));
                links.set_prev(Some(node));
                self.head = Some(node);
                self.len += 1;
            }
        }
    }

    /// # Safety
    ///
    /// See [`Ring::push_back`].
    pub(crate) unsafe fn push_front(&mut self, node: NonNull<T>) {
        // In a circular list, the slot before the head is the slot after the
        // tail, so pushing to the front is pushing to the back and rotating.
        self.push_back(node);
        self.head = Some(node);
    }

    /// # Safety
    ///
    /// `at` must be linked into this ring, and `node` must satisfy the
    /// requirements of [`Ring::push_back`].
    pub(crate) unsafe fn insert_before(&mut self, at: NonNull<T>, node: NonNull<T>) {
        let (prev, _) = self.neighbors(at);
        self.link_between(node, prev, at);
        if self.head == Some(at) {
            self.head = Some(node);
        }
    }

    /// # Safety
    ///
    /// `at` must be linked into this ring, and `node` must satisfy the
    /// requirements of [`Ring::push_back`].
    pub(crate) unsafe fn insert_after(&mut self, at: NonNull<T>, node: NonNull<T>) {
        let (_, next) = self.neighbors(at);
        self.link_between(node, at, next);
    }

    /// Unlinks `node` from the ring and resets its links.
    ///
    /// Returns `false` if `node` was not linked.
    ///
    /// # Safety
    ///
    /// `node` must point to a valid `T`. If it is linked, it must be linked
    /// into *this* ring.
    pub(crate) unsafe fn unlink(&mut self, node: NonNull<T>) -> bool {
        if !self.is_linked(node) {
            return false;
        }

        let (prev, next) = self.neighbors(node);
        if next == node {
            debug_assert_eq!(
                self.head,
                Some(node),
                "a node linked to itself must be the only node in the {} ring",
                self.name
            );
            self.head = None;
        } else {
            self.links_mut(prev).set_next(Some(next));
            self.links_mut(next).set_prev(Some(prev));
            if self.head == Some(node) {
                self.head = Some(next);
            }
        }

        self.links_mut(node).unlink();
        self.len -= 1;
        true
    }

    pub(crate) fn pop_front(&mut self) -> Link<T> {
        let head = self.head?;
        unsafe {
            // Safety: the head is linked into this ring.
            self.unlink(head);
        }
        Some(head)
    }

    pub(crate) fn pop_back(&mut self) -> Link<T> {
        let tail = self.back()?;
        unsafe {
            // Safety: the tail is linked into this ring.
            self.unlink(tail);
        }
        Some(tail)
    }

    pub(crate) fn iter(&self) -> Iter<'_, T> {
        Iter {
            ring: self,
            curr: self.front(),
            curr_back: self.back(),
            len: self.len,
        }
    }

    pub(crate) fn check(&self) -> Result<(), Violation> {
        let ring = self.name;
        let Some(head) = self.head else {
            if self.len != 0 {
                return Err(Violation::LenMismatch {
                    ring,
                    expected: self.len,
                    actual: 0,
                });
            }
            return Ok(());
        };

        let mut curr = head;
        let mut index = 0;
        loop {
            if index >= self.len {
                // Either the length is stale, or some node is linked in twice
                // and the walk will never get back to the head.
                return Err(Violation::LenMismatch {
                    ring,
                    expected: self.len,
                    actual: index + 1,
                });
            }

            let links = unsafe { self.links_of(curr) };
            let (Some(prev), Some(next)) = (links.prev(), links.next()) else {
                return Err(Violation::Detached { ring, index });
            };

            let (next_prev, prev_next) =
                unsafe { (self.links_of(next).prev(), self.links_of(prev).next()) };
            if next_prev != Some(curr) || prev_next != Some(curr) {
                return Err(Violation::BrokenLink { ring, index });
            }

            index += 1;
            if next == head {
                break;
            }
            curr = next;
        }

        if index != self.len {
            return Err(Violation::LenMismatch {
                ring,
                expected: self.len,
                actual: index,
            });
        }

        Ok(())
    }

    /// # Safety
    ///
    /// `node` must point to a valid `T`.
    #[inline]
    unsafe fn links_of<'node>(&self, node: NonNull<T>) -> &'node Links<T> {
        (self.links)(node).as_ref()
    }

    /// # Safety
    ///
    /// `node` must point to a valid `T`, and no other reference to its links
    /// may be live.
    #[inline]
    unsafe fn links_mut<'node>(&self, node: NonNull<T>) -> &'node mut Links<T> {
        (self.links)(node).as_mut()
    }

    /// Returns the `(prev, next)` neighbors of a node in this ring.
    ///
    /// # Safety
    ///
    /// `node` must be linked into this ring.
    unsafe fn neighbors(&self, node: NonNull<T>) -> (NonNull<T>, NonNull<T>) {
        let links = self.links_of(node);
        match (links.prev(), links.next()) {
            (Some(prev), Some(next)) => (prev, next),
            _ => unreachable!("node {node:p} is not linked into the {} ring", self.name),
        }
    }

    /// # Safety
    ///
    /// `prev` and `next` must be adjacent nodes of this ring (or the same
    /// node, if it is the only one), and `node` must satisfy the
    /// requirements of [`Ring::push_back`].
    unsafe fn link_between(&mut self, node: NonNull<T>, prev: NonNull<T>, next: NonNull<T>) {
        debug_assert!(
            !self.is_linked(node),
            "node {node:p} is already linked into a {} ring",
            self.name
        );
        {
            let links = self.links_mut(node);
            links.set_prev(Some(prev));
            links.set_next(Some(next));
        }
        self.links_mut(prev).set_next(Some(node));
        self.links_mut(next).set_prev(Some(node));
        self.len += 1;
    }
}

impl<T> fmt::Debug for Ring<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ring")
            .field("name", &self.name)
            .field("head", &FmtOption::new(&self.head))
            .field("len", &self.len)
            .finish()
    }
}

// ==== impl Links ====

impl<T> Links<T> {
    /// Returns new links for a [doubly-linked intrusive list](List).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: UnsafeCell::new(LinksInner {
                next: None,
                prev: None,
                _unpin: PhantomPinned,
            }),
        }
    }

    /// Returns `true` if this node is currently linked to a [`List`].
    pub fn is_linked(&self) -> bool {
        self.next().is_some() || self.prev().is_some()
    }

    fn unlink(&mut self) {
        self.inner.get_mut().next = None;
        self.inner.get_mut().prev = None;
    }

    #[inline]
    fn next(&self) -> Link<T> {
        unsafe { (*self.inner.get()).next }
    }

    #[inline]
    fn prev(&self) -> Link<T> {
        unsafe { (*self.inner.get()).prev }
    }

    #[inline]
    fn set_next(&mut self, next: Link<T>) -> Link<T> {
        mem::replace(&mut self.inner.get_mut().next, next)
    }

    #[inline]
    fn set_prev(&mut self, prev: Link<T>) -> Link<T> {
        mem::replace(&mut self.inner.get_mut().prev, prev)
    }
}

impl<T> Default for Links<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Links<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Links")
            .field("self", &format_args!("{:p}", self))
            .field("next", &FmtOption::new(&self.next()))
            .field("prev", &FmtOption::new(&self.prev()))
            .finish()
    }
}

/// # Safety
///
/// Types containing [`Links`] may be `Send`: the pointers within the `Links` may
/// mutably alias another value, but the links can only be _accessed_ by the
/// owner of the [`List`] itself, because the pointers are private. As long as
/// [`List`] upholds its own invariants, `Links` should not make a type `!Send`.
unsafe impl<T: Send> Send for Links<T> {}

/// # Safety
///
/// Types containing [`Links`] may be `Sync`: the pointers within the `Links` may
/// mutably alias another value, but the links can only be _accessed_ by the
/// owner of the [`List`] itself, because the pointers are private. As long as
/// [`List`] upholds its own invariants, `Links` should not make a type `!Sync`.
unsafe impl<T: Sync> Sync for Links<T> {}

// === impl Iter ====

impl<'list, T> Iterator for Iter<'list, T> {
    type Item = Pin<&'list T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }

        let curr = self.curr?;
        self.len -= 1;
        unsafe {
            self.curr = self.ring.next(curr);
            Some(pin_node(curr))
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }

        let curr = self.curr_back?;
        self.len -= 1;
        unsafe {
            self.curr_back = self.ring.prev(curr);
            Some(pin_node(curr))
        }
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    #[inline]
    fn len(&self) -> usize {
        self.len
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("curr", &FmtOption::new(&self.curr))
            .field("curr_back", &FmtOption::new(&self.curr_back))
            .field("len", &self.len)
            .finish()
    }
}

// === impl DrainFilter ====

impl<T, F> Iterator for DrainFilter<'_, T, F>
where
    T: Linked<Links<T>>,
    F: FnMut(&T) -> bool,
{
    type Item = T::Handle;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.remove_first(&mut self.pred)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.cursor.len()))
    }
}

impl<T, F> fmt::Debug for DrainFilter<'_, T, F>
where
    T: Linked<Links<T>>,
    F: FnMut(&T) -> bool,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { cursor, pred: _ } = self;
        f.debug_struct("DrainFilter")
            .field("cursor", cursor)
            .field("pred", &format_args!("..."))
            .finish()
    }
}

/// # Safety
///
/// `node` must point to a valid `T` that is pinned for at least `'a`.
#[inline]
pub(crate) unsafe fn pin_node<'a, T>(node: NonNull<T>) -> Pin<&'a T> {
    // Safety: nodes linked into a list are pinned for as long as they are
    // linked, per the `Linked` trait's contract.
    Pin::new_unchecked(node.as_ref())
}
