mod catalog;
mod driver;
mod sql_writer;
mod type_map;

pub use catalog::*;
pub use driver::*;
pub use sql_writer::*;
pub use type_map::*;
