use super::*;
use std::{string::String, vec};

/// A task owned by the list it is queued in.
#[derive(Debug)]
#[pin_project::pin_project]
struct Task {
    #[pin]
    links: Links<Task>,
    prio: u8,
    name: &'static str,
    runs: usize,
}

unsafe impl Linked<Links<Self>> for Task {
    type Handle = Pin<Box<Task>>;

    fn into_ptr(handle: Pin<Box<Task>>) -> NonNull<Self> {
        unsafe { NonNull::from(Box::leak(Pin::into_inner_unchecked(handle))) }
    }

    unsafe fn from_ptr(ptr: NonNull<Self>) -> Self::Handle {
        // Safety: if this function is only called by the priority list
        // implementation (and it is not intended for external use), we can
        // expect that the `NonNull` was constructed from a reference which
        // was pinned.
        Pin::new_unchecked(Box::from_raw(ptr.as_ptr()))
    }

    unsafe fn links(target: NonNull<Self>) -> NonNull<Links<Self>> {
        let links = core::ptr::addr_of_mut!((*target.as_ptr()).links);
        NonNull::new_unchecked(links)
    }
}

fn task(prio: u8, name: &'static str) -> Pin<Box<Task>> {
    Box::pin(Task {
        links: Links::new(),
        prio,
        name,
        runs: 0,
    })
}

fn by_prio(a: &Task, b: &Task) -> Ordering {
    a.prio.cmp(&b.prio)
}

fn names(list: &PriorityList<Task>) -> Vec<&'static str> {
    list.iter().map(|task| task.name).collect()
}

#[test]
fn pop_front_returns_ownership() {
    let _trace = trace_init();
    let mut list = PriorityList::new_with_cmp(by_prio);
    list.add(task(2, "idle"));
    list.add(task(0, "irq"));
    list.add(task(1, "net"));
    list.assert_valid();

    let mut order = vec![];
    while let Some(task) = list.pop_front() {
        list.assert_valid();
        order.push(task.name);
    }
    assert_eq!(order, ["irq", "net", "idle"]);
}

#[test]
fn remove_returns_ownership() {
    let _trace = trace_init();
    let mut list = PriorityList::new_with_cmp(by_prio);
    list.add(task(1, "a"));
    list.add(task(1, "b"));
    list.add(task(3, "c"));

    let b = list
        .iter()
        .find(|task| task.name == "b")
        .map(|task| NonNull::from(task.get_ref()))
        .expect("b was added to the list");

    let mut b = unsafe { list.remove(b) }.expect("b is in the list");
    list.assert_valid();
    assert!(!b.links.is_linked());
    assert_eq!(names(&list), ["a", "c"]);

    // the removed task is ours to mutate again.
    *b.as_mut().project().prio = 0;
    list.add(b);
    list.assert_valid();
    assert_eq!(names(&list), ["b", "a", "c"]);
}

#[test]
fn round_robin_within_band() {
    let _trace = trace_init();
    let mut list = PriorityList::new_with_cmp(by_prio);
    list.add(task(1, "a"));
    list.add(task(1, "b"));
    list.add(task(1, "c"));
    list.add(task(4, "background"));

    let mut schedule = String::new();
    for _ in 0..6 {
        // run the highest priority task, then requeue it behind its peers.
        let front = list.front().expect("list is not empty");
        schedule.push_str(front.name);
        let front = NonNull::from(front.get_ref());
        unsafe {
            *Pin::new_unchecked(&mut *front.as_ptr()).project().runs += 1;
            list.requeue(front);
        }
        list.assert_valid();
    }

    assert_eq!(schedule, "abcabc");
    assert_eq!(names(&list), ["a", "b", "c", "background"]);
    for task in &list {
        let expected = if task.name == "background" { 0 } else { 2 };
        assert_eq!(task.runs, expected, "task {}", task.name);
    }
}

#[test]
fn drain_filter_takes_ownership() {
    let _trace = trace_init();
    let mut list = PriorityList::new_with_cmp(by_prio);
    list.add(task(1, "a"));
    list.add(task(2, "b"));
    list.add(task(1, "c"));
    list.add(task(2, "d"));

    let drained = list
        .drain_filter(|task| task.prio == 1)
        .map(|task| task.name)
        .collect::<Vec<_>>();
    list.assert_valid();

    assert_eq!(drained, ["a", "c"]);
    assert_eq!(names(&list), ["b", "d"]);
    assert_eq!(
        list.representatives().map(|t| t.name).collect::<Vec<_>>(),
        ["b"]
    );
}

#[test]
fn drop_frees_owned_entries() {
    let _trace = trace_init();

    // run under miri, a leaked box would be reported here
    let mut list = PriorityList::new_with_cmp(by_prio);
    for (prio, name) in [(3, "a"), (1, "b"), (3, "c"), (2, "d")] {
        list.add(task(prio, name));
    }
    drop(list);
}
