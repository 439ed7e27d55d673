pub mod board_store;
pub mod drag_session;
pub mod reorder;

pub use board_store::*;
pub use drag_session::*;
