use crate::{
    AdapterError, Config, Connection, Driver, ErrorContext, Pool, Query, Result, RowLabeled,
    Schema, driver_error,
};
use futures::TryStreamExt;
use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};
use tokio::sync::{Mutex, RwLock};

/// Everything known about one configuration identity.
///
/// Without a pool the entry keeps a single live connection, opened on first use and reused
/// afterwards. With a pool a connection is acquired for every operation and the pool owns
/// its recycling.
pub struct Entry<D: Driver> {
    pub config: Config,
    pub connection_string: String,
    schemas: RwLock<HashMap<String, Schema>>,
    pool: Option<D::Pool>,
    connection: Mutex<Option<D::Connection>>,
    removed: AtomicBool,
}

impl<D: Driver> Entry<D> {
    fn new(driver: &D, config: Config, schemas: HashMap<String, Schema>) -> Self {
        Self {
            connection_string: driver.connection_string(&config),
            pool: if config.pool { Some(driver.pool()) } else { None },
            config,
            schemas: RwLock::new(schemas),
            connection: Mutex::new(None),
            removed: AtomicBool::new(false),
        }
    }

    pub fn identity(&self) -> &str {
        &self.config.identity
    }

    pub fn is_pooled(&self) -> bool {
        self.pool.is_some()
    }

    /// The entry was torn down, it no longer runs queries.
    pub fn is_removed(&self) -> bool {
        self.removed.load(Ordering::Acquire)
    }

    fn ensure_live(&self) -> Result<()> {
        if self.is_removed() {
            return Err(AdapterError::UnknownIdentity(self.config.identity.clone()).into());
        }
        Ok(())
    }

    /// A dedicated connection is currently open.
    pub async fn is_open(&self) -> bool {
        self.connection.lock().await.is_some()
    }

    pub async fn schema(&self, collection: &str) -> Result<Schema> {
        self.schemas
            .read()
            .await
            .get(collection)
            .cloned()
            .ok_or_else(|| {
                AdapterError::UnknownSchema {
                    identity: self.config.identity.clone(),
                    collection: collection.into(),
                }
                .into()
            })
    }

    pub async fn try_schema(&self, collection: &str) -> Option<Schema> {
        self.schemas.read().await.get(collection).cloned()
    }

    /// Table behind `collection`, the collection name itself when it has no schema.
    pub async fn table_name(&self, collection: &str) -> String {
        self.try_schema(collection)
            .await
            .map(|v| v.table_name)
            .unwrap_or_else(|| collection.into())
    }

    pub async fn set_schema(&self, collection: impl Into<String>, schema: Schema) {
        self.schemas.write().await.insert(collection.into(), schema);
    }

    pub async fn collections(&self) -> Vec<String> {
        let mut result: Vec<_> = self.schemas.read().await.keys().cloned().collect();
        result.sort();
        result
    }

    /// Run `query` and collect its rows.
    ///
    /// A driver failure in the warning class completes with no rows, any other failure is
    /// returned unchanged.
    pub async fn fetch_all(&self, driver: &D, query: Query) -> Result<Vec<RowLabeled>> {
        let context = format!("While executing the query:\n{}", query);
        let result = match &self.pool {
            Some(pool) => {
                self.ensure_live()?;
                let mut connection = pool
                    .acquire(&self.connection_string)
                    .await
                    .with_context(|| format!("While acquiring a `{}` connection", D::NAME))?;
                collect(&mut connection, query).await
            }
            None => {
                let mut slot = self.connection.lock().await;
                // Checked under the lock, `close` marks the entry before taking it
                self.ensure_live()?;
                let connection = match slot.take() {
                    Some(v) => v,
                    None => driver
                        .connect(&self.connection_string)
                        .await
                        .with_context(|| format!("While opening a `{}` connection", D::NAME))?,
                };
                collect(slot.insert(connection), query).await
            }
        };
        match result {
            Ok(rows) => Ok(rows),
            Err(e) if driver_error(&e).is_some_and(|v| v.is_warning()) => {
                log::warn!("{:#}", e.context(context));
                Ok(Vec::new())
            }
            Err(e) => {
                let e = e.context(context);
                log::error!("{:#}", e);
                Err(e)
            }
        }
    }

    /// Mark the entry removed and close the dedicated connection, if any.
    pub async fn close(&self) {
        self.removed.store(true, Ordering::Release);
        let Some(connection) = self.connection.lock().await.take() else {
            return;
        };
        if let Err(e) = connection.close().await {
            log::warn!(
                "{:#}",
                e.context(format!("While closing the connection `{}`", self.identity()))
            );
        }
    }
}

async fn collect<C: Connection>(connection: &mut C, query: Query) -> Result<Vec<RowLabeled>> {
    let Query { sql, params } = query;
    if params.is_empty() {
        connection.fetch(sql).try_collect().await
    } else {
        connection.fetch_bound(sql, params).try_collect().await
    }
}

/// Entries keyed by configuration identity.
pub struct Registry<D: Driver> {
    entries: RwLock<HashMap<String, Arc<Entry<D>>>>,
}

impl<D: Driver> Default for Registry<D> {
    fn default() -> Self {
        Self {
            entries: Default::default(),
        }
    }
}

impl<D: Driver> Registry<D> {
    pub fn new() -> Self {
        Default::default()
    }

    pub async fn register(
        &self,
        driver: &D,
        config: Config,
        schemas: impl IntoIterator<Item = (String, Schema)>,
    ) -> Result<Arc<Entry<D>>> {
        if config.identity.is_empty() {
            return Err(AdapterError::MissingIdentity.into());
        }
        let mut entries = self.entries.write().await;
        if entries.contains_key(&config.identity) {
            return Err(AdapterError::DuplicateIdentity(config.identity).into());
        }
        let entry = Arc::new(Entry::new(driver, config, schemas.into_iter().collect()));
        entries.insert(entry.config.identity.clone(), entry.clone());
        log::debug!("Registered the connection `{}`", entry.identity());
        Ok(entry)
    }

    pub async fn resolve(&self, identity: &str) -> Result<Arc<Entry<D>>> {
        self.entries
            .read()
            .await
            .get(identity)
            .cloned()
            .ok_or_else(|| AdapterError::UnknownIdentity(identity.into()).into())
    }

    /// Remove one entry, or every entry when `identity` is `None`, closing live connections.
    ///
    /// Unknown identities are ignored.
    pub async fn teardown(&self, identity: Option<&str>) {
        let removed: Vec<_> = {
            let mut entries = self.entries.write().await;
            match identity {
                Some(identity) => entries.remove(identity).into_iter().collect(),
                None => entries.drain().map(|(_, v)| v).collect(),
            }
        };
        for entry in removed {
            entry.close().await;
            log::debug!("Removed the connection `{}`", entry.identity());
        }
    }

    pub async fn contains(&self, identity: &str) -> bool {
        self.entries.read().await.contains_key(identity)
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
