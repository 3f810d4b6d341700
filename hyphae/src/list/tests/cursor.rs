use super::*;

#[test]
fn ghost_sits_between_tail_and_head() {
    let _trace = trace_init();

    let entries = [entry(1), entry(2), entry(3)];
    let mut list = list_from_iter(&entries);

    let mut cursor = list.cursor_front_mut();
    assert_eq!(val(cursor.peek_prev()), None);

    // walking off the tail lands on the ghost, not back on the head.
    cursor.move_next();
    cursor.move_next();
    assert_eq!(cursor.index(), Some(2));
    assert_eq!(val(cursor.peek_next()), None);
    cursor.move_next();
    assert_eq!(val(cursor.current()), None);
    assert_eq!(cursor.index(), None);
    assert_eq!(val(cursor.peek_next()), Some(1));
    assert_eq!(val(cursor.peek_prev()), Some(3));

    // and from the ghost, either way wraps.
    cursor.move_next();
    assert_eq!(val(cursor.current()), Some(1));
    assert_eq!(cursor.index(), Some(0));
    cursor.move_prev();
    cursor.move_prev();
    assert_eq!(val(cursor.current()), Some(3));
    assert_eq!(cursor.index(), Some(2));
}

#[test]
fn insert_at_element() {
    let _trace = trace_init();

    let entries = [entry(2), entry(4)];
    let one = entry(1);
    let three = entry(3);
    let five = entry(5);
    let mut list = list_from_iter(&entries);

    let mut cursor = list.cursor_front_mut();
    // before the head: the new node becomes the head, and the cursor's
    // element shifts right by one.
    cursor.insert_before(one.as_ref());
    assert_eq!(val(cursor.current()), Some(2));
    assert_eq!(cursor.index(), Some(1));
    assert_eq!(val(cursor.peek_prev()), Some(1));

    cursor.insert_after(three.as_ref());
    assert_eq!(val(cursor.current()), Some(2));
    assert_eq!(cursor.index(), Some(1));
    assert_eq!(val(cursor.peek_next()), Some(3));

    // after the tail: the new node becomes the tail, not the head.
    cursor.move_next();
    cursor.move_next();
    assert_eq!(val(cursor.current()), Some(4));
    assert_eq!(cursor.index(), Some(3));
    cursor.insert_after(five.as_ref());
    assert_eq!(val(cursor.peek_next()), Some(5));

    list.assert_valid();
    assert_eq!(collect_vals(&list), &[1, 2, 3, 4, 5]);
    assert_ptr_eq!(one, list.ring.front());
    assert_ptr_eq!(five, list.ring.back());
}

#[test]
fn insert_at_ghost() {
    let _trace = trace_init();

    let entries = [entry(2), entry(3)];
    let one = entry(1);
    let four = entry(4);
    let mut list = list_from_iter(&entries);

    let mut cursor = list.cursor_back_mut();
    cursor.move_next();
    assert_eq!(cursor.index(), None);

    // before the ghost is the back of the list.
    cursor.insert_before(four.as_ref());
    assert_eq!(cursor.index(), None);
    assert_eq!(val(cursor.peek_prev()), Some(4));
    cursor.move_prev();
    assert_eq!(val(cursor.current()), Some(4));
    assert_eq!(cursor.index(), Some(2));

    // after the ghost is the front of the list.
    cursor.move_next();
    cursor.insert_after(one.as_ref());
    assert_eq!(cursor.index(), None);
    assert_eq!(val(cursor.peek_next()), Some(1));
    cursor.move_next();
    assert_eq!(val(cursor.current()), Some(1));
    assert_eq!(cursor.index(), Some(0));

    list.assert_valid();
    assert_eq!(collect_vals(&list), &[1, 2, 3, 4]);
}

#[test]
fn insert_into_empty_list() {
    let _trace = trace_init();

    let a = entry(1);
    let b = entry(2);
    let mut list = List::<Entry<'_>>::new();

    let mut cursor = list.cursor_front_mut();
    assert_eq!(cursor.index(), None);
    cursor.insert_before(a.as_ref());
    cursor.insert_after(b.as_ref());
    assert_eq!(cursor.len(), 2);
    assert_eq!(val(cursor.peek_next()), Some(2));
    assert_eq!(val(cursor.peek_prev()), Some(1));

    list.assert_valid();
    assert_eq!(collect_vals(&list), &[2, 1]);
}

#[test]
fn remove_tail_moves_to_ghost() {
    let _trace = trace_init();

    let entries = [entry(1), entry(2), entry(3)];
    let mut list = list_from_iter(&entries);

    let mut cursor = list.cursor_back_mut();
    assert_eq!(val(cursor.remove_current()), Some(3));

    // the successor of the tail is the ghost, not the head.
    assert_eq!(val(cursor.current()), None);
    assert_eq!(cursor.index(), None);
    assert_eq!(val(cursor.peek_next()), Some(1));
    assert_eq!(val(cursor.peek_prev()), Some(2));

    cursor.move_prev();
    assert_eq!(val(cursor.current()), Some(2));
    assert_eq!(cursor.index(), Some(1));

    list.assert_valid();
    assert!(!entries[2].links.is_linked());
    assert_eq!(collect_vals(&list), &[1, 2]);
}

#[test]
fn remove_sole_element() {
    let _trace = trace_init();

    let a = entry(1);
    let mut list = List::<Entry<'_>>::new();
    list.push_back(a.as_ref());

    let mut cursor = list.cursor_front_mut();
    assert_eq!(val(cursor.remove_current()), Some(1));
    assert_eq!(val(cursor.current()), None);
    assert!(cursor.is_empty());
    assert_eq!(val(cursor.remove_current()), None);

    list.assert_valid();
    assert_clean!(a);
    assert!(list.ring.front().is_none());
}

#[test]
fn remove_while_walking_backwards() {
    let _trace = trace_init();

    let entries = [entry(1), entry(2), entry(3), entry(4)];
    let mut list = list_from_iter(&entries);

    let mut cursor = list.cursor_back_mut();
    while let Some(curr) = val(cursor.current()) {
        if curr % 2 == 1 {
            // removing moves the cursor to the removed node's successor, so
            // stepping back lands on its predecessor.
            assert_eq!(val(cursor.remove_current()), Some(curr));
        }
        cursor.move_prev();
    }

    list.assert_valid();
    assert_eq!(collect_vals(&list), &[2, 4]);
}

#[test]
fn remove_first() {
    let _trace = trace_init();

    let entries = [entry(1), entry(2), entry(3), entry(4)];
    let mut list = list_from_iter(&entries);

    let mut cursor = list.cursor_front_mut();
    assert_eq!(val(cursor.remove_first(|entry| entry.val > 2)), Some(3));
    assert_eq!(val(cursor.current()), Some(4));
    // the search stops at the ghost, rather than wrapping to the head.
    assert_eq!(val(cursor.remove_first(|entry| entry.val == 1)), None);

    list.assert_valid();
    assert_eq!(collect_vals(&list), &[1, 2, 4]);
}
