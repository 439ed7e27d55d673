//! Drag Session Controller.
//!
//! Turns the gesture engine's start/over/end events into board mutations. The
//! transition itself is pure ([`DragState::transition`]); [`DragController`] holds the
//! current state and applies the resulting [`Effect`]s to a [`BoardStore`].
//!
//! Task drags mutate the board on every `over` event so the lists reshuffle live under
//! the pointer. Column drags only mutate once, on `end`.

use serde::{Deserialize, Serialize};

use super::board_store::BoardStore;
use crate::core::models::Id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubjectKind {
    Column,
    Task,
}

/// Something being dragged, or something under the pointer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DragSubject {
    pub kind: SubjectKind,
    pub id: Id,
}

impl DragSubject {
    pub fn column(id: impl Into<Id>) -> Self {
        Self {
            kind: SubjectKind::Column,
            id: id.into(),
        }
    }

    pub fn task(id: impl Into<Id>) -> Self {
        Self {
            kind: SubjectKind::Task,
            id: id.into(),
        }
    }
}

/// Events emitted by the pointer-tracking engine during one gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureEvent {
    Start {
        subject: DragSubject,
    },
    Over {
        subject: DragSubject,
        target: Option<DragSubject>,
    },
    End {
        subject: DragSubject,
        target: Option<DragSubject>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    DraggingColumn(Id),
    DraggingTask(Id),
}

/// Side effects requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Render the dragged-item ghost for this subject
    ShowOverlay(DragSubject),
    ClearOverlay,
    MoveColumn { from: Id, to: Id },
    ReorderTask { active: Id, over: Id },
    MoveTaskToColumn { task: Id, column: Id },
}

impl DragState {
    pub fn is_idle(&self) -> bool {
        matches!(self, DragState::Idle)
    }

    pub fn transition(&self, event: &GestureEvent) -> (DragState, Vec<Effect>) {
        match event {
            // A fresh start always wins, even over a session that never ended
            GestureEvent::Start { subject } => {
                let next = match subject.kind {
                    SubjectKind::Column => DragState::DraggingColumn(subject.id.clone()),
                    SubjectKind::Task => DragState::DraggingTask(subject.id.clone()),
                };
                (next, vec![Effect::ShowOverlay(subject.clone())])
            }

            GestureEvent::Over { subject, target } => {
                let mut effects = vec![Effect::ClearOverlay];
                // Only the task this session is dragging reacts to hovering
                let dragging = matches!(self, DragState::DraggingTask(id) if *id == subject.id);
                match target {
                    Some(target) if dragging && target != subject && subject.kind == SubjectKind::Task => {
                        effects.push(match target.kind {
                            SubjectKind::Task => Effect::ReorderTask {
                                active: subject.id.clone(),
                                over: target.id.clone(),
                            },
                            SubjectKind::Column => Effect::MoveTaskToColumn {
                                task: subject.id.clone(),
                                column: target.id.clone(),
                            },
                        });
                    }
                    _ => {}
                }
                (self.clone(), effects)
            }

            GestureEvent::End { subject, target } => {
                let mut effects = vec![Effect::ClearOverlay];
                if let (Some(target), DragState::DraggingColumn(column)) = (target, self) {
                    if target != subject && target.kind == SubjectKind::Column {
                        effects.push(Effect::MoveColumn {
                            from: column.clone(),
                            to: target.id.clone(),
                        });
                    }
                }
                (DragState::Idle, effects)
            }
        }
    }
}

/// Owns the session state and the overlay for one board.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
    overlay: Option<DragSubject>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// The subject whose ghost is currently rendered under the pointer
    pub fn overlay(&self) -> Option<&DragSubject> {
        self.overlay.as_ref()
    }

    pub fn on_gesture_start(&mut self, store: &mut BoardStore, kind: SubjectKind, id: impl Into<Id>) -> bool {
        self.handle(
            store,
            GestureEvent::Start {
                subject: DragSubject { kind, id: id.into() },
            },
        )
    }

    pub fn on_gesture_over(
        &mut self,
        store: &mut BoardStore,
        subject: DragSubject,
        target: Option<DragSubject>,
    ) -> bool {
        self.handle(store, GestureEvent::Over { subject, target })
    }

    pub fn on_gesture_end(
        &mut self,
        store: &mut BoardStore,
        subject: DragSubject,
        target: Option<DragSubject>,
    ) -> bool {
        self.handle(store, GestureEvent::End { subject, target })
    }

    /// Run one event through the state machine. Returns whether the board changed.
    pub fn handle(&mut self, store: &mut BoardStore, event: GestureEvent) -> bool {
        let (next, effects) = self.state.transition(&event);
        if next != self.state {
            tracing::debug!(from = ?self.state, to = ?next, "drag session transition");
        }
        self.state = next;

        let mut changed = false;
        for effect in effects {
            changed |= self.apply(store, effect);
        }
        changed
    }

    fn apply(&mut self, store: &mut BoardStore, effect: Effect) -> bool {
        match effect {
            Effect::ShowOverlay(subject) => {
                self.overlay = Some(subject);
                false
            }
            Effect::ClearOverlay => {
                self.overlay = None;
                false
            }
            Effect::MoveColumn { from, to } => store.move_column(&from, &to),
            Effect::ReorderTask { active, over } => store.reorder_task_within_column(&active, &over),
            Effect::MoveTaskToColumn { task, column } => store.move_task_to_column(&task, &column),
        }
    }
}
