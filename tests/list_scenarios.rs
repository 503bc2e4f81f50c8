use todolist::{ChangeEvent, Todo, TodoList, TodoListError};

#[test]
fn groceries_renders_marked_items() {
    let mut list = TodoList::new("Groceries");
    list.add(Todo::new("milk"));
    list.add(Todo::new("eggs"));
    list.mark_done_at(0).unwrap();

    assert_eq!(list.to_string(), "--- Groceries ---\n[X] milk\n[ ] eggs");
}

#[test]
fn groceries_verbose_has_a_change_block_per_item() {
    let mut list = TodoList::new("Groceries");
    list.add(Todo::new("milk"));
    list.add(Todo::new("eggs"));
    list.mark_done("milk").unwrap();

    let verbose = list.to_verbose_string();
    let lines: Vec<&str> = verbose.lines().collect();
    assert_eq!(lines[0], "--- Groceries ---");
    assert_eq!(lines[1], "[X] milk");
    assert_eq!(lines[2], "Changes:");
    assert!(lines[3].ends_with(" created"));
    assert!(lines[4].ends_with(" marked done"));
    assert_eq!(lines[5], "[ ] eggs");
    assert_eq!(lines[6], "Changes:");
    assert!(lines[7].ends_with(" created"));
    assert_eq!(lines.len(), 8);
}

#[test]
fn out_of_range_access_keeps_size() {
    let mut list = TodoList::with_items("chores", [Todo::new("dishes"), Todo::new("laundry")]);

    let err = list.item_at(5).unwrap_err();
    assert!(matches!(err, TodoListError::IndexOutOfRange { index: 5, len: 2 }));
    assert!(list.mark_undone_at(5).is_err());
    assert_eq!(list.size(), 2);
}

#[test]
fn filtered_views_are_snapshots() {
    let mut list = TodoList::with_items("chores", [Todo::new("dishes"), Todo::new("laundry")]);
    list.mark_done_at(1).unwrap();

    let mut done = list.all_done();
    done.mark_all_undone();

    assert!(list.item_at(1).unwrap().is_done());
    assert_eq!(list.all_not_done().first().map(Todo::title), Some("dishes"));
}

#[test]
fn history_survives_removal() {
    let mut list = TodoList::new("chores");
    list.add(Todo::new("dishes"));
    list.mark_done_at(0).unwrap();
    list.mark_undone_at(0).unwrap();

    let removed = list.remove_at(0).unwrap();
    let events: Vec<ChangeEvent> = removed.history().iter().map(|c| c.event).collect();
    assert_eq!(
        events,
        vec![ChangeEvent::Created, ChangeEvent::MarkedDone, ChangeEvent::MarkedUndone]
    );
    assert!(list.is_empty());
}
