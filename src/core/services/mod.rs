pub mod id_supplier;
#[cfg(feature = "web")]
pub mod local_storage;
pub mod storage;

pub use id_supplier::*;
#[cfg(feature = "web")]
pub use local_storage::*;
pub use storage::*;
