pub use dock_core::*;
pub use dock_db2::*;
