//! End-to-end board scenarios: store operations, drag gestures and persistence together.

use kanban_board::{
    Board, BoardConfig, BoardStore, Column, DragController, DragSubject, FileStore, Id,
    KeyValueStore, MemoryStore, Persistence, SequentialIds, SubjectKind, Task,
};

fn two_column_store() -> BoardStore {
    BoardStore::new(
        Board::new(
            vec![Column::new(1, "To Do"), Column::new(2, "Doing")],
            vec![
                Task::new(10, 1, "a"),
                Task::new(11, 2, "b"),
                Task::new(12, 1, "c"),
            ],
        ),
        SequentialIds::new(),
        BoardConfig::default(),
    )
}

fn task_ids_in(store: &BoardStore, column: &Id) -> Vec<Id> {
    store
        .tasks_in_column(column)
        .into_iter()
        .map(|t| t.id.clone())
        .collect()
}

#[test_log::test]
fn new_columns_and_dragging_a_task_to_an_empty_column() {
    let mut store = BoardStore::empty();
    let col1 = store.add_column();
    let col2 = store.add_column();
    assert_ne!(col1.id, col2.id);
    assert_eq!(col1.title, "Column 1");
    assert_eq!(col2.title, "Column 2");

    let task = store.add_task(&col1.id).unwrap();

    let mut drag = DragController::new();
    drag.on_gesture_start(&mut store, SubjectKind::Task, task.id.clone());
    drag.on_gesture_over(
        &mut store,
        DragSubject::task(task.id.clone()),
        Some(DragSubject::column(col2.id.clone())),
    );
    drag.on_gesture_end(
        &mut store,
        DragSubject::task(task.id.clone()),
        Some(DragSubject::column(col2.id.clone())),
    );

    assert_eq!(store.task_count(&col1.id), 0);
    assert_eq!(task_ids_in(&store, &col2.id), vec![task.id]);
    assert!(drag.state().is_idle());
}

#[test_log::test]
fn cascade_delete_touches_only_the_deleted_column() {
    let mut store = two_column_store();
    store.delete_column(&Id::from(1));
    assert_eq!(store.columns(), &[Column::new(2, "Doing")]);
    assert_eq!(store.tasks(), &[Task::new(11, 2, "b")]);
}

#[test]
fn non_adjacent_column_moves_do_not_round_trip() {
    let mut store = BoardStore::empty();
    for _ in 0..4 {
        store.add_column();
    }
    let order = |store: &BoardStore| -> Vec<String> {
        store.columns().iter().map(|c| c.id.to_string()).collect()
    };

    store.move_column(&Id::from(1), &Id::from(3));
    assert_eq!(order(&store), ["2", "3", "1", "4"]);
    store.move_column(&Id::from(3), &Id::from(1));
    assert_eq!(order(&store), ["2", "1", "3", "4"]);
}

#[test]
fn dropping_over_a_task_in_another_column_takes_its_index() {
    for target in [11, 13, 14] {
        let mut store = BoardStore::new(
            Board::new(
                vec![Column::new(1, "A"), Column::new(2, "B")],
                vec![
                    Task::new(11, 2, "b0"),
                    Task::new(10, 1, "a0"),
                    Task::new(13, 2, "b1"),
                    Task::new(14, 2, "b2"),
                ],
            ),
            SequentialIds::new(),
            BoardConfig::default(),
        );
        let column_b = Id::from(2);
        let target = Id::from(target);
        let target_index = task_ids_in(&store, &column_b)
            .iter()
            .position(|id| id == &target)
            .unwrap();

        let mut drag = DragController::new();
        drag.on_gesture_start(&mut store, SubjectKind::Task, 10);
        drag.on_gesture_over(
            &mut store,
            DragSubject::task(10),
            Some(DragSubject::task(target.clone())),
        );

        let dragged = store.task(&Id::from(10)).unwrap();
        assert_eq!(dragged.column_id, column_b);
        let landed = task_ids_in(&store, &column_b)
            .iter()
            .position(|id| id == &Id::from(10))
            .unwrap();
        assert_eq!(landed, target_index, "dropped over {}", target);
    }
}

#[test]
fn reorder_onto_self_is_noop_for_every_task() {
    let mut store = two_column_store();
    let before = store.snapshot();
    for task in before.tasks.clone() {
        assert!(!store.reorder_task_within_column(&task.id, &task.id));
    }
    assert_eq!(store.snapshot(), before);
}

#[test_log::test]
fn persisted_board_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = BoardConfig::default().with_storage_key("team-board");

    let saved = {
        let mut store = BoardStore::load(
            Persistence::new(FileStore::new(dir.path()), &config),
            SequentialIds::new(),
            config.clone(),
        );
        let column = store.add_column();
        let task = store.add_task(&column.id).unwrap();
        store.rename_task_content(&task.id, "ship it");
        store.move_column(&column.id, &Id::from("todo"));
        store.snapshot()
    };

    let store = BoardStore::load(
        Persistence::new(FileStore::new(dir.path()), &config),
        SequentialIds::new(),
        config,
    );
    assert_eq!(store.snapshot(), saved);
    assert_eq!(store.columns()[0].title, "Column 4");
}

#[test]
fn ids_are_not_reused_after_reload() {
    let backend = MemoryStore::new();
    let config = BoardConfig::default();
    let mut first = BoardStore::load(
        Persistence::new(backend.clone(), &config),
        SequentialIds::new(),
        config.clone(),
    );
    let issued = first.add_column().id;
    first.delete_column(&issued);
    let survivor = first.add_column().id;

    let mut second = BoardStore::load(
        Persistence::new(backend, &config),
        SequentialIds::new(),
        config,
    );
    let fresh = second.add_column().id;
    assert_ne!(fresh, survivor);
    assert!(second.column(&survivor).is_some());
}

#[test]
fn corrupt_snapshot_boots_the_default_board() {
    let backend = MemoryStore::new();
    backend.set("kanban-board", r#"{"columns": 5}"#).unwrap();
    let config = BoardConfig::default();
    let store = BoardStore::load(
        Persistence::new(backend, &config),
        SequentialIds::new(),
        config,
    );
    assert_eq!(store.snapshot(), Board::default_board());
}

#[test]
fn adding_after_loading_the_largest_numeric_id_never_fails() {
    let backend = MemoryStore::new();
    let config = BoardConfig::default();
    let max = Id::from(u64::MAX);
    Persistence::new(backend.clone(), &config)
        .save(&Board::new(vec![Column::new(max.clone(), "Last")], Vec::new()))
        .unwrap();

    let mut store = BoardStore::load(
        Persistence::new(backend, &config),
        SequentialIds::new(),
        config,
    );
    assert!(store.column(&max).is_some());

    let column = store.add_column();
    let task = store.add_task(&max).unwrap();
    assert_ne!(column.id, max);
    assert_ne!(column.id, Id::from(0));
    assert_ne!(task.id, column.id);
    assert_eq!(store.columns().len(), 2);
    store.board().validate().unwrap();
}
