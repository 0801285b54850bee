mod adapter;
mod attribute;
mod config;
mod driver;
mod error;
mod logical_type;
mod options;
mod query;
mod registry;
mod statement;
mod util;
mod value;
mod writer;

pub use ::anyhow::Context as ErrorContext;
pub use adapter::*;
pub use attribute::*;
pub use config::*;
pub use driver::*;
pub use error::*;
pub use logical_type::*;
pub use options::*;
pub use query::*;
pub use registry::*;
pub use statement::*;
pub use util::*;
pub use value::*;
pub use writer::*;
pub mod stream {
    pub use ::futures::stream::*;
}
pub use ::futures::future;
pub use ::indexmap::IndexMap;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
