use crate::Db2SqlWriter;
use dock_core::{Client, Config, Driver, Result};
use std::{borrow::Cow, future::Future};

/// DB2 driver, the wire protocol is delegated to `C`.
#[derive(Default, Debug, Clone)]
pub struct Db2Driver<C: Client> {
    client: C,
}

impl<C: Client> Db2Driver<C> {
    pub const fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }
}

impl<C: Client> Driver for Db2Driver<C> {
    type Connection = C::Connection;
    type Pool = C::Pool;
    type SqlWriter = Db2SqlWriter;

    const NAME: &'static str = "db2";

    fn sql_writer(&self) -> Db2SqlWriter {
        Db2SqlWriter {}
    }

    fn connection_string(&self, config: &Config) -> String {
        connection_string(config)
    }

    fn connect(
        &self,
        connection_string: &str,
    ) -> impl Future<Output = Result<Self::Connection>> + Send {
        self.client.open(connection_string)
    }

    fn pool(&self) -> Self::Pool {
        self.client.pool()
    }
}

/// DB2 CLI connection string, `KEY=value` pairs joined by `;` in a fixed order.
pub fn connection_string(config: &Config) -> String {
    let mut result = format!(
        "DRIVER={{DB2}};DATABASE={};HOSTNAME={};UID={};PWD={};PORT={};PROTOCOL=TCPIP",
        connection_value(&config.database),
        connection_value(&config.host),
        connection_value(&config.user),
        connection_value(&config.password),
        config.port
    );
    if config.ssl {
        result.push_str(";SECURITY=SSL");
    }
    result
}

/// Value of a connection string pair. Values holding `;`, `{` or `}` are enclosed in braces,
/// with `}` doubled.
pub fn connection_value(value: &str) -> Cow<'_, str> {
    if value.contains([';', '{', '}']) {
        Cow::Owned(format!("{{{}}}", value.replace('}', "}}")))
    } else {
        Cow::Borrowed(value)
    }
}
