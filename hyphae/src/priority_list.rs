//! An [intrusive], priority-sorted, doubly-linked list.
//!
//! See the [`PriorityList`] type for details.
//!
//! [intrusive]: crate#intrusive-data-structures
use crate::{
    error::Violation,
    list::{self, pin_node, Link, Ring},
    Linked,
};
use core::{
    cmp::{Ord, Ordering},
    fmt,
    iter::FusedIterator,
    pin::Pin,
    ptr::{self, NonNull},
};

pub use crate::list::Iter;


/// An [intrusive] doubly-linked list, kept sorted by priority.
///
/// Elements are ordered by a comparison function chosen when the list is
/// constructed. The element that sorts first is the *highest* priority
/// element, and is found at the front of the list. Elements which compare
/// [`Equal`](Ordering::Equal) form a *priority band*, and are kept in the
/// order they were added in (first in, first out).
///
/// If your type `T` implements [`Ord`]:
///
/// * Consider using [`PriorityList::new_min()`] if you want **smallest** items
///   sorted first.
/// * Consider using [`PriorityList::new_max()`] if you want **largest** items
///   sorted first.
///
/// Otherwise, use [`PriorityList::new_with_cmp()`].
///
/// Internally, every element is threaded through two circular lists. The
/// *node* list holds every element in order. The *representative* list holds
/// only the first element of each priority band, and is used to skip over
/// whole bands when adding an element. This makes [`add`] _O_(_p_), where
/// _p_ is the number of distinct priorities in the list, rather than the
/// number of elements. [`remove`] is _O_(1), and [`requeue`] is linear in the
/// size of the element's band.
///
/// In order to be part of a `PriorityList`, a type `T` must implement
/// [`Linked`] for [`priority_list::Links<T>`](Links).
///
/// # Examples
///
/// ```
/// use hyphae::{
///     Linked,
///     priority_list::{self, PriorityList},
/// };
/// use std::{pin::Pin, ptr::{self, NonNull}};
///
/// #[derive(Debug)]
/// struct Waiter {
///     links: priority_list::Links<Waiter>,
///     prio: u8,
///     name: &'static str,
/// }
///
/// unsafe impl Linked<priority_list::Links<Waiter>> for Waiter {
///     type Handle = Pin<Box<Self>>;
///
///     fn into_ptr(handle: Pin<Box<Waiter>>) -> NonNull<Waiter> {
///        unsafe { NonNull::from(Box::leak(Pin::into_inner_unchecked(handle))) }
///     }
///
///     unsafe fn from_ptr(ptr: NonNull<Waiter>) -> Pin<Box<Waiter>> {
///         Pin::new_unchecked(Box::from_raw(ptr.as_ptr()))
///     }
///
///     unsafe fn links(target: NonNull<Waiter>) -> NonNull<priority_list::Links<Waiter>> {
///         let links = ptr::addr_of_mut!((*target.as_ptr()).links);
///         NonNull::new_unchecked(links)
///     }
/// }
///
/// fn waiter(prio: u8, name: &'static str) -> Pin<Box<Waiter>> {
///     Box::pin(Waiter { links: priority_list::Links::new(), prio, name })
/// }
///
/// // lower numbers are more urgent.
/// let mut list = PriorityList::<Waiter>::new_with_cmp(|a, b| a.prio.cmp(&b.prio));
/// list.add(waiter(5, "background"));
/// list.add(waiter(1, "interrupt"));
/// list.add(waiter(5, "logger"));
/// list.add(waiter(3, "network"));
///
/// let names = list.iter().map(|w| w.name).collect::<Vec<_>>();
/// assert_eq!(names, ["interrupt", "network", "background", "logger"]);
///
/// // one representative per distinct priority.
/// let prios = list.representatives().map(|w| w.prio).collect::<Vec<_>>();
/// assert_eq!(prios, [1, 3, 5]);
///
/// let next = list.pop_front().expect("the list is not empty");
/// assert_eq!(next.name, "interrupt");
/// ```
///
/// [intrusive]: crate#intrusive-data-structures
/// [`add`]: PriorityList::add
/// [`remove`]: PriorityList::remove
/// [`requeue`]: PriorityList::requeue
pub struct PriorityList<T: Linked<Links<T>>> {
    /// Every element, in priority order.
    nodes: Ring<T>,
    /// The first element of each priority band.
    prios: Ring<T>,
    /// Returns if LHS is less/same/greater than RHS.
    cmp: fn(&T, &T) -> Ordering,
}

/// Links to other nodes in a [`PriorityList`].
///
/// In order to be part of a [`PriorityList`], a type must contain an instance
/// of this type, and must implement the [`Linked`] trait for `Links<Self>`.
pub struct Links<T> {
    node: list::Links<T>,
    prio: list::Links<T>,
}

/// Iterates over the first element of each priority band in a
/// [`PriorityList`].
///
/// This is returned by [`PriorityList::representatives`].
pub struct Representatives<'list, T> {
    inner: Iter<'list, T>,
}

/// An iterator returned by [`PriorityList::drain_filter`].
pub struct DrainFilter<'list, T, F>
where
    T: Linked<Links<T>>,
    F: FnMut(&T) -> bool,
{
    list: &'list mut PriorityList<T>,
    curr: Link<T>,
    pred: F,
}

#[inline]
fn invert_sort<T: Ord>(a: &T, b: &T) -> Ordering {
    // Inverted sort order!
    T::cmp(b, a)
}

unsafe fn node_links<T: Linked<Links<T>>>(target: NonNull<T>) -> NonNull<list::Links<T>> {
    let links = T::links(target);
    NonNull::new_unchecked(ptr::addr_of_mut!((*links.as_ptr()).node))
}

unsafe fn prio_links<T: Linked<Links<T>>>(target: NonNull<T>) -> NonNull<list::Links<T>> {
    let links = T::links(target);
    NonNull::new_unchecked(ptr::addr_of_mut!((*links.as_ptr()).prio))
}

// ==== impl PriorityList ====

impl<T> PriorityList<T>
where
    T: Linked<Links<T>>,
    T: Ord,
{
    /// Returns a new empty list, sorted LEAST FIRST.
    ///
    /// The smallest element is the highest priority, and is returned by
    /// [`front`](Self::front) and [`pop_front`](Self::pop_front).
    #[must_use]
    pub const fn new_min() -> Self {
        Self::new_with_cmp(T::cmp)
    }

    /// Returns a new empty list, sorted GREATEST FIRST.
    #[must_use]
    pub const fn new_max() -> Self {
        Self::new_with_cmp(invert_sort::<T>)
    }
}

impl<T: Linked<Links<T>>> PriorityList<T> {
    /// Returns a new empty list with the given ordering function.
    ///
    /// Elements for which `cmp` returns [`Ordering::Less`] sort towards the
    /// front of the list. The function must be a total order, and must keep
    /// returning the same result for the same pair of elements for as long as
    /// both are in the list.
    ///
    /// If two items are considered of equal value, new values will be placed
    /// AFTER old values.
    #[must_use]
    pub const fn new_with_cmp(cmp: fn(&T, &T) -> Ordering) -> Self {
        Self {
            nodes: Ring::new("nodes", node_links::<T>),
            prios: Ring::new("prios", prio_links::<T>),
            cmp,
        }
    }

    /// Returns `true` if this list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the number of elements in the list.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Adds an element to the list, in its sorted position.
    ///
    /// If other elements in the list compare [`Equal`](Ordering::Equal) to
    /// `item`, it is placed after all of them.
    ///
    /// This is an _O_(_p_) operation, where _p_ is the number of distinct
    /// priorities in the list.
    pub fn add(&mut self, item: T::Handle) {
        let node = T::into_ptr(item);
        test_trace!(?node, len = self.len(), bands = self.prios.len(), "PriorityList::add");
        check_valid!(self);

        unsafe {
            // Safety: handles point to valid, pinned nodes, and a node being
            // added is not yet part of any list.
            self.link(node);
        }

        check_valid!(self);
    }

    /// Removes an arbitrary element from the list.
    ///
    /// If `item` was the first element of its priority band, the next element
    /// in that band (if there is one) takes its place as the band's
    /// representative. The removed element's links are reset, so it may be
    /// added to this or any other list afterwards.
    ///
    /// If `item` is not linked into any list, this returns `None` and leaves
    /// the list untouched.
    ///
    /// This is an _O_(1) operation.
    ///
    /// # Safety
    ///
    /// The caller *must* ensure that `item` points to a valid `T` and, if it
    /// is linked, that it is an element of this list and not any other list.
    pub unsafe fn remove(&mut self, item: NonNull<T>) -> Option<T::Handle> {
        test_trace!(?item, "PriorityList::remove");
        if !self.nodes.is_linked(item) {
            debug_assert!(
                !self.prios.is_linked(item),
                "node {item:p} is a representative, but is not in a list"
            );
            return None;
        }

        check_valid!(self);
        self.unlink(item);
        check_valid!(self);

        Some(T::from_ptr(item))
    }

    /// Moves `item` behind every other element of its priority band.
    ///
    /// This is used to round-robin between elements of the same priority. If
    /// `item` is the last element of its band already, nothing happens.
    ///
    /// This is linear in the number of elements sharing `item`'s priority.
    ///
    /// # Safety
    ///
    /// The caller *must* ensure that `item` is an element of this list, and
    /// not any other list.
    pub unsafe fn requeue(&mut self, item: NonNull<T>) {
        test_trace!(?item, "PriorityList::requeue");
        debug_assert!(
            self.nodes.is_linked(item),
            "node {item:p} cannot be requeued, as it is not in a list"
        );
        check_valid!(self);

        let Some(next) = self.nodes.next(item) else {
            // already the last element of the list.
            return;
        };
        if self.compare(item, next) != Ordering::Equal {
            // already the last element of its band.
            return;
        }

        self.unlink(item);

        // find the end of the band, starting at the element that followed
        // `item`.
        let mut curr = Some(next);
        while let Some(node) = curr {
            if self.compare(item, node) != Ordering::Equal {
                break;
            }
            curr = self.nodes.next(node);
        }

        match curr {
            Some(at) => self.nodes.insert_before(at, item),
            None => self.nodes.push_back(item),
        }
        test_trace!(?item, before = ?curr, "PriorityList::requeue -> requeued");

        check_valid!(self);
    }

    /// Removes the highest priority element from the list.
    ///
    /// Note that "highest priority" here refers to the sorted ordering. If
    /// this list was created with [`PriorityList::new_min`], the SMALLEST item
    /// will be popped. If this was created with [`PriorityList::new_max`], the
    /// LARGEST item will be popped.
    ///
    /// This is an _O_(1) operation.
    pub fn pop_front(&mut self) -> Option<T::Handle> {
        let head = self.nodes.front()?;
        test_trace!(?head, "PriorityList::pop_front");
        unsafe {
            // Safety: the head is an element of this list.
            self.remove(head)
        }
    }

    /// Removes the lowest priority element from the list.
    ///
    /// If several elements share the lowest priority, the one added (or
    /// requeued) last is returned.
    pub fn pop_back(&mut self) -> Option<T::Handle> {
        let tail = self.nodes.back()?;
        test_trace!(?tail, "PriorityList::pop_back");
        unsafe {
            // Safety: the tail is an element of this list.
            self.remove(tail)
        }
    }

    /// Borrows the highest priority element, if there is one.
    #[must_use]
    pub fn front(&self) -> Option<Pin<&T>> {
        self.nodes.front().map(|node| unsafe { pin_node(node) })
    }

    /// Borrows the lowest priority element, if there is one.
    #[must_use]
    pub fn back(&self) -> Option<Pin<&T>> {
        self.nodes.back().map(|node| unsafe { pin_node(node) })
    }

    /// Borrows the element after `item`, or `None` if `item` is the back of
    /// the list.
    ///
    /// # Safety
    ///
    /// The caller *must* ensure that `item` is an element of this list, and
    /// not any other list.
    pub unsafe fn next(&self, item: NonNull<T>) -> Option<Pin<&T>> {
        let next = self.nodes.next(item)?;
        Some(pin_node(next))
    }

    /// Borrows the element before `item`, or `None` if `item` is the front of
    /// the list.
    ///
    /// # Safety
    ///
    /// The caller *must* ensure that `item` is an element of this list, and
    /// not any other list.
    pub unsafe fn prev(&self, item: NonNull<T>) -> Option<Pin<&T>> {
        let prev = self.nodes.prev(item)?;
        Some(pin_node(prev))
    }

    /// Returns an iterator over every element in the list, from highest to
    /// lowest priority.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        self.nodes.iter()
    }

    /// Returns an iterator over the first element of each priority band, from
    /// highest to lowest priority.
    ///
    /// The iterator yields exactly one element per distinct priority in the
    /// list.
    #[must_use]
    pub fn representatives(&self) -> Representatives<'_, T> {
        Representatives {
            inner: self.prios.iter(),
        }
    }

    /// Returns an iterator which uses a closure to determine if an element
    /// should be removed from the list.
    ///
    /// If the closure returns `true`, the element is removed and yielded. If
    /// the closure returns `false`, the element remains in the list and will
    /// not be yielded by the iterator. Elements are visited from highest to
    /// lowest priority.
    ///
    /// Elements that are not yielded because the iterator was dropped early
    /// are left in the list.
    pub fn drain_filter<F>(&mut self, pred: F) -> DrainFilter<'_, T, F>
    where
        F: FnMut(&T) -> bool,
    {
        DrainFilter {
            curr: self.nodes.front(),
            list: self,
            pred,
        }
    }

    /// Walks both of the list's internal rings, checking that:
    ///
    /// - every node's neighbors link back to it, and each ring holds as many
    ///   nodes as it claims to,
    /// - the elements are sorted,
    /// - the first element of each priority band, and only that element, is
    ///   a representative,
    /// - the representatives are linked in the same order as their bands.
    ///
    /// This never modifies the list.
    pub fn check(&self) -> Result<(), Violation> {
        self.nodes.check()?;
        self.prios.check()?;

        let mut prev: Link<T> = None;
        let mut rep = self.prios.front();
        let mut band = 0;
        let mut index = 0;
        let mut curr = self.nodes.front();
        while let Some(node) = curr {
            let starts_band = match prev {
                None => true,
                Some(prev) => match unsafe { self.compare(prev, node) } {
                    Ordering::Less => true,
                    Ordering::Equal => false,
                    Ordering::Greater => return Err(Violation::OutOfOrder { index }),
                },
            };

            match (starts_band, unsafe { self.prios.is_linked(node) }) {
                (true, false) => return Err(Violation::MissingRepresentative { index }),
                (false, true) => return Err(Violation::StrayRepresentative { index }),
                (true, true) => {
                    if rep != Some(node) {
                        return Err(Violation::RepresentativeMismatch { index: band });
                    }
                    rep = unsafe { self.prios.next(node) };
                    band += 1;
                }
                (false, false) => {}
            }

            prev = Some(node);
            index += 1;
            curr = unsafe { self.nodes.next(node) };
        }

        if rep.is_some() {
            // there are more representatives than bands.
            return Err(Violation::RepresentativeMismatch { index: band });
        }

        Ok(())
    }

    /// Asserts as many of the list's invariants as possible.
    ///
    /// # Panics
    ///
    /// If [`check`](Self::check) reports a [`Violation`].
    #[track_caller]
    pub fn assert_valid(&self) {
        if let Err(violation) = self.check() {
            panic!("invalid priority list: {violation}; list={self:#?}");
        }
    }

    /// # Safety
    ///
    /// `node` must point to a valid, pinned `T` that is not linked into any
    /// list.
    unsafe fn link(&mut self, node: NonNull<T>) {
        debug_assert!(
            !self.nodes.is_linked(node) && !self.prios.is_linked(node),
            "node {node:p} is already linked into a list"
        );

        // find the first band that sorts strictly after `node`, remembering
        // the last one that didn't.
        let mut prev = None;
        let mut curr = self.prios.front();
        while let Some(rep) = curr {
            if self.compare(node, rep) == Ordering::Less {
                break;
            }
            prev = Some(rep);
            curr = self.prios.next(rep);
        }

        let joins_band = match prev {
            Some(prev) => self.compare(prev, node) == Ordering::Equal,
            None => false,
        };
        test_trace!(?node, before = ?curr, joins_band, "PriorityList::add -> linking");

        match curr {
            Some(at) => {
                if !joins_band {
                    self.prios.insert_before(at, node);
                }
                self.nodes.insert_before(at, node);
            }
            None => {
                if !joins_band {
                    self.prios.push_back(node);
                }
                self.nodes.push_back(node);
            }
        }
    }

    /// Unlinks `node` from both rings, handing its band over to the next
    /// element if `node` was the band's representative.
    ///
    /// # Safety
    ///
    /// `node` must be an element of this list.
    unsafe fn unlink(&mut self, node: NonNull<T>) {
        if self.prios.is_linked(node) {
            if let Some(next) = self.nodes.next(node) {
                if !self.prios.is_linked(next) {
                    test_trace!(?node, ?next, "PriorityList::unlink -> promoting");
                    self.prios.insert_after(node, next);
                }
            }
            self.prios.unlink(node);
        }
        self.nodes.unlink(node);
    }

    /// # Safety
    ///
    /// Both pointers must point to valid `T`s.
    #[inline]
    unsafe fn compare(&self, a: NonNull<T>, b: NonNull<T>) -> Ordering {
        (self.cmp)(a.as_ref(), b.as_ref())
    }
}

impl<T: Linked<Links<T>>> Drop for PriorityList<T> {
    fn drop(&mut self) {
        while let Some(node) = self.pop_front() {
            drop(node);
        }
    }
}

impl<T> Default for PriorityList<T>
where
    T: Linked<Links<T>>,
    T: Ord,
{
    fn default() -> Self {
        Self::new_min()
    }
}

impl<T: Linked<Links<T>>> Extend<T::Handle> for PriorityList<T> {
    fn extend<I: IntoIterator<Item = T::Handle>>(&mut self, iter: I) {
        for item in iter {
            self.add(item);
        }
    }
}

impl<'list, T: Linked<Links<T>>> IntoIterator for &'list PriorityList<T> {
    type Item = Pin<&'list T>;
    type IntoIter = Iter<'list, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

unsafe impl<T: Linked<Links<T>>> Send for PriorityList<T> where T: Send {}
unsafe impl<T: Linked<Links<T>>> Sync for PriorityList<T> where T: Sync {}

impl<T: Linked<Links<T>>> fmt::Debug for PriorityList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { nodes, prios, cmp } = self;
        f.debug_struct("PriorityList")
            .field("nodes", nodes)
            .field("prios", prios)
            .field("cmp", &format_args!("{:p}", *cmp as *const ()))
            .finish()
    }
}

// ==== impl Links ====

impl<T> Links<T> {
    /// Returns new links for a [priority list](PriorityList).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            node: list::Links::new(),
            prio: list::Links::new(),
        }
    }

    /// Returns `true` if this node is currently linked to a [`PriorityList`].
    pub fn is_linked(&self) -> bool {
        self.node.is_linked()
    }

    /// Returns `true` if this node is the first of its priority band in a
    /// [`PriorityList`].
    pub fn is_representative(&self) -> bool {
        self.prio.is_linked()
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
            .field("node", &self.node)
            .field("prio", &self.prio)
            .finish()
    }
}

// === impl Representatives ====

impl<'list, T> Iterator for Representatives<'list, T> {
    type Item = Pin<&'list T>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for Representatives<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for Representatives<'_, T> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> FusedIterator for Representatives<'_, T> {}

impl<T> fmt::Debug for Representatives<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Representatives").field(&self.inner).finish()
    }
}

// === impl DrainFilter ====

impl<T, F> Iterator for DrainFilter<'_, T, F>
where
    T: Linked<Links<T>>,
    F: FnMut(&T) -> bool,
{
    type Item = T::Handle;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.curr {
            unsafe {
                // Safety: `curr` is only ever set to elements of the borrowed
                // list, and is advanced before the element it points to is
                // removed.
                self.curr = self.list.nodes.next(node);
                if (self.pred)(node.as_ref()) {
                    return self.list.remove(node);
                }
            }
        }

        None
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.list.len()))
    }
}

impl<T, F> fmt::Debug for DrainFilter<'_, T, F>
where
    T: Linked<Links<T>>,
    F: FnMut(&T) -> bool,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { list, curr, pred: _ } = self;
        f.debug_struct("DrainFilter")
            .field("list", list)
            .field("curr", &crate::util::FmtOption::new(curr))
            .field("pred", &format_args!("..."))
            .finish()
    }
}
