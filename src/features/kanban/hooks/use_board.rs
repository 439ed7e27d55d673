use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::config::BoardConfig;
use crate::core::models::{Board, Id};
use crate::core::services::{LocalStorage, Persistence, UuidIds};
use crate::features::kanban::services::{BoardStore, DragController, DragSubject};

pub struct BoardHook {
    pub board: ReadSignal<Board>,
    /// Ghost shown under the pointer while dragging
    pub overlay: ReadSignal<Option<DragSubject>>,
    pub add_column: Box<dyn Fn() + 'static>,
    pub rename_column: Box<dyn Fn(Id, String) + 'static>,
    pub delete_column: Box<dyn Fn(Id) + 'static>,
    pub add_task: Box<dyn Fn(Id) + 'static>,
    pub update_task: Box<dyn Fn(Id, String) + 'static>,
    pub delete_task: Box<dyn Fn(Id) + 'static>,
    pub on_drag_start: Box<dyn Fn(DragSubject) + 'static>,
    pub on_drag_over: Box<dyn Fn(DragSubject, Option<DragSubject>) + 'static>,
    pub on_drag_end: Box<dyn Fn(DragSubject, Option<DragSubject>) + 'static>,
}

/// Board state for a component tree, loaded from and saved to `localStorage`.
pub fn use_board(config: BoardConfig) -> BoardHook {
    let persistence = match LocalStorage::open() {
        Ok(storage) => Some(Persistence::new(storage, &config)),
        Err(e) => {
            tracing::warn!(error = %e, "board changes will not be persisted");
            None
        }
    };

    let initial = match &persistence {
        Some(persistence) => persistence.load_or_default(),
        None if config.seed_default_board => Board::default_board(),
        None => Board::default(),
    };

    let board = RwSignal::new(initial.clone());
    let overlay = RwSignal::new(None::<DragSubject>);

    let mut store = BoardStore::new(initial, UuidIds, config);
    store.subscribe(move |snapshot| board.set(snapshot.clone()));
    if let Some(persistence) = persistence {
        // Write on the next tick so a drag never waits on storage
        store.subscribe(move |snapshot| {
            let snapshot = snapshot.clone();
            let persistence = persistence.clone();
            spawn_local(async move {
                TimeoutFuture::new(0).await;
                persistence.save_in_background(&snapshot);
            });
        });
    }

    let store = Rc::new(RefCell::new(store));
    let drag = Rc::new(RefCell::new(DragController::new()));

    let add_column = {
        let store = store.clone();
        Box::new(move || {
            store.borrow_mut().add_column();
        }) as Box<dyn Fn() + 'static>
    };

    let rename_column = {
        let store = store.clone();
        Box::new(move |id: Id, title: String| {
            store.borrow_mut().rename_column(&id, title);
        }) as Box<dyn Fn(Id, String) + 'static>
    };

    let delete_column = {
        let store = store.clone();
        Box::new(move |id: Id| {
            store.borrow_mut().delete_column(&id);
        }) as Box<dyn Fn(Id) + 'static>
    };

    let add_task = {
        let store = store.clone();
        Box::new(move |column_id: Id| {
            store.borrow_mut().add_task(&column_id);
        }) as Box<dyn Fn(Id) + 'static>
    };

    let update_task = {
        let store = store.clone();
        Box::new(move |id: Id, content: String| {
            store.borrow_mut().rename_task_content(&id, content);
        }) as Box<dyn Fn(Id, String) + 'static>
    };

    let delete_task = {
        let store = store.clone();
        Box::new(move |id: Id| {
            store.borrow_mut().delete_task(&id);
        }) as Box<dyn Fn(Id) + 'static>
    };

    let on_drag_start = {
        let store = store.clone();
        let drag = drag.clone();
        Box::new(move |subject: DragSubject| {
            let mut drag = drag.borrow_mut();
            drag.on_gesture_start(&mut store.borrow_mut(), subject.kind, subject.id);
            overlay.set(drag.overlay().cloned());
        }) as Box<dyn Fn(DragSubject) + 'static>
    };

    let on_drag_over = {
        let store = store.clone();
        let drag = drag.clone();
        Box::new(move |subject: DragSubject, target: Option<DragSubject>| {
            let mut drag = drag.borrow_mut();
            drag.on_gesture_over(&mut store.borrow_mut(), subject, target);
            overlay.set(drag.overlay().cloned());
        }) as Box<dyn Fn(DragSubject, Option<DragSubject>) + 'static>
    };

    let on_drag_end = {
        Box::new(move |subject: DragSubject, target: Option<DragSubject>| {
            let mut drag = drag.borrow_mut();
            drag.on_gesture_end(&mut store.borrow_mut(), subject, target);
            overlay.set(drag.overlay().cloned());
        }) as Box<dyn Fn(DragSubject, Option<DragSubject>) + 'static>
    };

    BoardHook {
        board: board.read_only(),
        overlay: overlay.read_only(),
        add_column,
        rename_column,
        delete_column,
        add_task,
        update_task,
        delete_task,
        on_drag_start,
        on_drag_over,
        on_drag_end,
    }
}
