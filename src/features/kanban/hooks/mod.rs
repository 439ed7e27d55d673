#[cfg(feature = "web")]
pub mod use_board;

#[cfg(feature = "web")]
pub use use_board::*;
