use crate::{Config, Result, RowLabeled, SqlWriter, Value};
use futures::Stream;
use std::future::Future;

/// Database client plug point: knows the dialect and how to open connections.
pub trait Driver: Send + Sync {
    type Connection: Connection;
    type Pool: Pool<Connection = Self::Connection>;
    type SqlWriter: SqlWriter;

    const NAME: &'static str;

    fn sql_writer(&self) -> Self::SqlWriter;

    /// Connection string derived from the configuration.
    fn connection_string(&self, config: &Config) -> String;

    /// Open a dedicated connection.
    fn connect(&self, connection_string: &str)
    -> impl Future<Output = Result<Self::Connection>> + Send;

    /// Fresh pool, used when the configuration asks for pooling.
    fn pool(&self) -> Self::Pool;
}

pub trait Connection: Send {
    /// Execute the query and return the rows.
    fn fetch(&mut self, sql: String) -> impl Stream<Item = Result<RowLabeled>> + Send;

    /// Execute the query binding `params` to its placeholders, in order.
    fn fetch_bound(
        &mut self,
        sql: String,
        params: Vec<Value>,
    ) -> impl Stream<Item = Result<RowLabeled>> + Send;

    fn close(self) -> impl Future<Output = Result<()>> + Send;
}

/// Source of connections handed out per operation.
pub trait Pool: Send + Sync {
    type Connection: Connection;

    /// A connection for `connection_string`, returned to the pool when dropped.
    fn acquire(
        &self,
        connection_string: &str,
    ) -> impl Future<Output = Result<Self::Connection>> + Send;
}

/// Wire level client of a database engine, a driver delegates opening connections to it.
pub trait Client: Send + Sync {
    type Connection: Connection;
    type Pool: Pool<Connection = Self::Connection>;

    fn open(&self, connection_string: &str)
    -> impl Future<Output = Result<Self::Connection>> + Send;

    fn pool(&self) -> Self::Pool;
}
