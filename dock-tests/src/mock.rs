use dock_core::{
    Client, Connection, DriverError, Pool, Result, RowLabeled, RowNames, Value,
    future::{self, Future},
    stream::{self, Stream},
};
use std::{
    collections::VecDeque,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

/// Row with the given column labels.
pub fn row(labels: &[&str], values: impl IntoIterator<Item = Value>) -> RowLabeled {
    let labels: RowNames = labels.iter().map(|v| v.to_string()).collect();
    RowLabeled::new(labels, values.into_iter().collect())
}

/// Shared by a [`MockClient`] and every connection it hands out.
#[derive(Default, Debug)]
pub struct MockState {
    executed: Mutex<Vec<(String, Vec<Value>)>>,
    responses: Mutex<VecDeque<std::result::Result<Vec<RowLabeled>, DriverError>>>,
    connect_error: Mutex<Option<DriverError>>,
    opened: AtomicUsize,
    acquired: AtomicUsize,
    closed: AtomicUsize,
}

/// In-memory stand-in for a database server.
///
/// Every query is recorded together with its parameters and answered with the next
/// scripted response, queries without a scripted response return no rows.
#[derive(Default, Debug, Clone)]
pub struct MockClient {
    pub state: Arc<MockState>,
}

impl MockClient {
    pub fn new() -> Self {
        Default::default()
    }

    /// Answer the next query with `rows`.
    pub fn respond(&self, rows: impl IntoIterator<Item = RowLabeled>) -> &Self {
        self.push_response(Ok(rows.into_iter().collect()));
        self
    }

    /// Fail the next query with `error`.
    pub fn fail(&self, error: DriverError) -> &Self {
        self.push_response(Err(error));
        self
    }

    /// Fail every following open or pool acquisition with `error`.
    pub fn fail_connect(&self, error: DriverError) -> &Self {
        *lock(&self.state.connect_error) = Some(error);
        self
    }

    fn push_response(&self, response: std::result::Result<Vec<RowLabeled>, DriverError>) {
        lock(&self.state.responses).push_back(response);
    }

    /// Executed queries with their parameters, oldest first.
    pub fn executed(&self) -> Vec<(String, Vec<Value>)> {
        lock(&self.state.executed).clone()
    }

    pub fn sql(&self) -> Vec<String> {
        lock(&self.state.executed)
            .iter()
            .map(|(sql, _)| sql.clone())
            .collect()
    }

    pub fn last(&self) -> Option<(String, Vec<Value>)> {
        lock(&self.state.executed).last().cloned()
    }

    /// Connections opened directly.
    pub fn opened(&self) -> usize {
        self.state.opened.load(Ordering::SeqCst)
    }

    /// Connections acquired from a pool.
    pub fn acquired(&self) -> usize {
        self.state.acquired.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.state.closed.load(Ordering::SeqCst)
    }

    fn connection(&self, counter: &AtomicUsize) -> Result<MockConnection> {
        if let Some(error) = lock(&self.state.connect_error).clone() {
            return Err(error.into());
        }
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(MockConnection {
            state: self.state.clone(),
        })
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

impl Client for MockClient {
    type Connection = MockConnection;
    type Pool = MockPool;

    fn open(&self, _connection_string: &str) -> impl Future<Output = Result<MockConnection>> + Send {
        future::ready(self.connection(&self.state.opened))
    }

    fn pool(&self) -> MockPool {
        MockPool {
            client: self.clone(),
        }
    }
}

#[derive(Debug)]
pub struct MockConnection {
    state: Arc<MockState>,
}

impl Connection for MockConnection {
    fn fetch(&mut self, sql: String) -> impl Stream<Item = Result<RowLabeled>> + Send {
        self.fetch_bound(sql, Vec::new())
    }

    fn fetch_bound(
        &mut self,
        sql: String,
        params: Vec<Value>,
    ) -> impl Stream<Item = Result<RowLabeled>> + Send {
        lock(&self.state.executed).push((sql, params));
        let response = lock(&self.state.responses)
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()));
        let items: Vec<Result<RowLabeled>> = match response {
            Ok(rows) => rows.into_iter().map(Ok).collect(),
            Err(e) => vec![Err(e.into())],
        };
        stream::iter(items)
    }

    fn close(self) -> impl Future<Output = Result<()>> + Send {
        self.state.closed.fetch_add(1, Ordering::SeqCst);
        future::ready(Ok(()))
    }
}

#[derive(Debug)]
pub struct MockPool {
    client: MockClient,
}

impl Pool for MockPool {
    type Connection = MockConnection;

    fn acquire(
        &self,
        _connection_string: &str,
    ) -> impl Future<Output = Result<MockConnection>> + Send {
        future::ready(self.client.connection(&self.client.state.acquired))
    }
}
