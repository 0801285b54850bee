use crate::{
    AdapterOptions, Config, Context, CreateTable, Delete, Describe, Driver, DropTable, Entry,
    Error, Fragment, Insert, Options, Query, Record, Registry, Result, RowLabeled, Schema, Select,
    SqlWriter, Statement, SyncMode, Truncate, Update, driver_error, truncate_long,
};
use std::sync::Arc;

/// Operation surface of the data store.
///
/// Every operation names the configuration identity it runs against and, except for raw
/// queries, the collection whose schema drives the generated SQL. Options are validated
/// before any connection is used.
pub struct Adapter<D: Driver> {
    driver: D,
    writer: D::SqlWriter,
    options: AdapterOptions,
    registry: Arc<Registry<D>>,
}

impl<D: Driver> Adapter<D> {
    pub fn new(driver: D, options: AdapterOptions) -> Self {
        Self::with_registry(driver, options, Default::default())
    }

    /// Adapter working on a registry that may be shared with other adapters.
    pub fn with_registry(driver: D, options: AdapterOptions, registry: Arc<Registry<D>>) -> Self {
        Self {
            writer: driver.sql_writer(),
            driver,
            options,
            registry,
        }
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn sql_writer(&self) -> &D::SqlWriter {
        &self.writer
    }

    pub fn options(&self) -> &AdapterOptions {
        &self.options
    }

    pub fn registry(&self) -> &Arc<Registry<D>> {
        &self.registry
    }

    fn context(&self) -> Context {
        Context::new(Fragment::None, self.options.quote_table_names)
    }

    /// Render `statement` with the adapter settings.
    pub fn build(&self, statement: &dyn Statement) -> Query {
        self.writer.build(self.context(), statement)
    }

    pub async fn register_connection(
        &self,
        config: Config,
        schemas: impl IntoIterator<Item = (String, Schema)>,
    ) -> Result<()> {
        self.registry.register(&self.driver, config, schemas).await?;
        Ok(())
    }

    /// Register a configuration given as a connection url, see [`Config::from_url`].
    pub async fn register_url(
        &self,
        identity: impl Into<String>,
        url: &str,
        schemas: impl IntoIterator<Item = (String, Schema)>,
    ) -> Result<()> {
        let config = Config::from_url(D::NAME, identity, url)?;
        self.register_connection(config, schemas).await
    }

    pub async fn teardown(&self, identity: Option<&str>) {
        self.registry.teardown(identity).await
    }

    /// Create the table of `schema` and record it as the schema of `collection`.
    pub async fn define(&self, identity: &str, collection: &str, schema: Schema) -> Result<()> {
        let entry = self.registry.resolve(identity).await?;
        let query = self.build(&CreateTable::new(
            &schema,
            &self.options.default_primary_key_type,
        ));
        self.execute_on(&entry, query).await?;
        entry.set_schema(collection, schema).await;
        Ok(())
    }

    /// Schema of the table behind `collection` as found in the catalog, `None` when the
    /// table does not exist.
    pub async fn describe(&self, identity: &str, collection: &str) -> Result<Option<Schema>> {
        let entry = self.registry.resolve(identity).await?;
        let table = entry.table_name(collection).await;
        let query = self.build(&Describe { table: &table });
        let rows = self.execute_on(&entry, query).await?;
        self.writer.read_schema(&table, &rows)
    }

    /// Drop `relations`, in order, then the table behind `collection`.
    ///
    /// A relation that does not exist is skipped, the first other failure stops the drop.
    pub async fn drop_table(
        &self,
        identity: &str,
        collection: &str,
        relations: &[&str],
    ) -> Result<()> {
        let entry = self.registry.resolve(identity).await?;
        for relation in relations {
            let query = self.build(&DropTable { table: relation });
            match self.execute_on(&entry, query).await {
                Ok(..) => {}
                Err(e) if is_not_found(&e) => {
                    log::debug!("Relation `{}` does not exist, skipping it", relation);
                }
                Err(e) => return Err(e),
            }
        }
        let table = entry.table_name(collection).await;
        let query = self.build(&DropTable { table: &table });
        self.execute_on(&entry, query).await?;
        Ok(())
    }

    /// Raw passthrough, `query` is executed as given.
    pub async fn query(&self, identity: &str, query: impl Into<Query>) -> Result<Vec<RowLabeled>> {
        self.execute(identity, query.into()).await
    }

    pub async fn find(
        &self,
        identity: &str,
        collection: &str,
        options: &Options,
    ) -> Result<Vec<RowLabeled>> {
        options.validate()?;
        let entry = self.registry.resolve(identity).await?;
        let schema = entry.schema(collection).await?;
        let query = self.build(&Select::new(&schema, options)?);
        self.execute_on(&entry, query).await
    }

    pub async fn find_one(
        &self,
        identity: &str,
        collection: &str,
        options: &Options,
    ) -> Result<Option<RowLabeled>> {
        let options = Options {
            limit: Some(1),
            ..options.clone()
        };
        Ok(self
            .find(identity, collection, &options)
            .await?
            .into_iter()
            .next())
    }

    pub async fn count(&self, identity: &str, collection: &str, options: &Options) -> Result<u64> {
        options.validate()?;
        let entry = self.registry.resolve(identity).await?;
        let schema = entry.schema(collection).await?;
        let query = self.build(&Select::count(&schema, options)?);
        let rows = self.execute_on(&entry, query).await?;
        let Some(value) = rows.first().and_then(|v| v.values.first()) else {
            return Ok(0);
        };
        value
            .as_i64()
            .and_then(|v| u64::try_from(v).ok())
            .ok_or_else(|| Error::msg(format!("Unexpected count result {:?}", value)))
    }

    /// Insert `record` and return the row as stored, generated values included.
    pub async fn create(
        &self,
        identity: &str,
        collection: &str,
        record: &Record,
    ) -> Result<Option<RowLabeled>> {
        let entry = self.registry.resolve(identity).await?;
        let schema = entry.schema(collection).await?;
        let query = self.build(&Insert::new(&schema, record)?);
        Ok(self.execute_on(&entry, query).await?.into_iter().next())
    }

    /// Update the rows matching `options` and return them as stored.
    pub async fn update(
        &self,
        identity: &str,
        collection: &str,
        options: &Options,
        record: &Record,
    ) -> Result<Vec<RowLabeled>> {
        options.validate()?;
        let entry = self.registry.resolve(identity).await?;
        let schema = entry.schema(collection).await?;
        let query = self.build(&Update::new(&schema, options, record)?);
        self.execute_on(&entry, query).await
    }

    pub async fn destroy(&self, identity: &str, collection: &str, options: &Options) -> Result<()> {
        options.validate()?;
        let entry = self.registry.resolve(identity).await?;
        let schema = entry.schema(collection).await?;
        let query = self.build(&Delete::new(&schema, options)?);
        self.execute_on(&entry, query).await?;
        Ok(())
    }

    pub async fn truncate(&self, identity: &str, collection: &str) -> Result<()> {
        let entry = self.registry.resolve(identity).await?;
        let table = entry.table_name(collection).await;
        let query = self.build(&Truncate { table: &table });
        self.execute_on(&entry, query).await?;
        Ok(())
    }

    /// Bring the table of `collection` in line with its registered schema, as far as the
    /// configured [`SyncMode`] allows.
    pub async fn sync(&self, identity: &str, collection: &str) -> Result<()> {
        let entry = self.registry.resolve(identity).await?;
        let schema = entry.schema(collection).await?;
        match entry.config.migrate {
            SyncMode::Safe => {
                log::debug!("Leaving `{}` untouched", schema.table_name);
            }
            SyncMode::Alter => {
                if self.describe(identity, collection).await?.is_none() {
                    self.define(identity, collection, schema).await?;
                }
            }
            SyncMode::Drop => {
                match self.drop_table(identity, collection, &[]).await {
                    Ok(..) => {}
                    Err(e) if is_not_found(&e) => {}
                    Err(e) => return Err(e),
                }
                self.define(identity, collection, schema).await?;
            }
        }
        Ok(())
    }

    /// Execute `query` on the connection registered as `identity`.
    pub async fn execute(&self, identity: &str, query: Query) -> Result<Vec<RowLabeled>> {
        let entry = self.registry.resolve(identity).await?;
        self.execute_on(&entry, query).await
    }

    async fn execute_on(&self, entry: &Entry<D>, query: Query) -> Result<Vec<RowLabeled>> {
        log::debug!(
            "[{}] {}{}",
            entry.identity(),
            truncate_long!(query.sql),
            if query.is_parameterized() {
                format!(" {:?}", query.params)
            } else {
                String::new()
            }
        );
        if let Some(logger) = &self.options.logger {
            logger(&query.sql);
        }
        entry.fetch_all(&self.driver, query).await
    }
}

fn is_not_found(error: &Error) -> bool {
    driver_error(error).is_some_and(|v| v.is_not_found())
}
