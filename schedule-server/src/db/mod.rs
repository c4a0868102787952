//! Database Module
//!
//! Owns the connection to the document store (SurrealDB) and exposes keyed
//! document primitives used by the repositories.

pub mod backoff;
pub mod document;
pub mod error;
pub mod repository;

pub use backoff::Backoff;
pub use document::{Document, RULES_KEY, TABLES};
pub use error::{StoreError, StoreResult};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::models::Rules;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use surrealdb::engine::any::{self, Any};
use surrealdb::opt::auth::Root;
use surrealdb::{RecordId, Surreal};
use tokio::sync::RwLock;

/// Attempts `merge` makes before giving up on concurrent writers
const MERGE_ATTEMPTS: u32 = 5;

/// Connection settings for [`StoreClient`]
#[derive(Debug, Clone)]
pub struct StoreSettings {
    /// `rocksdb://path`, `mem://` or `ws://host:port`
    pub url: String,
    pub namespace: String,
    pub database: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub backoff: Backoff,
}

impl StoreSettings {
    /// In-memory store, single attempt (tests)
    pub fn in_memory() -> Self {
        Self {
            url: "mem://".to_string(),
            namespace: "scheduling".to_string(),
            database: "scheduling".to_string(),
            username: None,
            password: None,
            backoff: Backoff {
                max_attempts: 1,
                ..Backoff::default()
            },
        }
    }
}

/// Store connectivity snapshot
#[derive(Debug, Clone, Serialize)]
pub struct StoreHealth {
    pub connected: bool,
    pub queryable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Explicit store session shared by every repository
///
/// Created unconnected; `connect()` establishes the session and
/// `reconnect()` replaces it. Operations on an unconnected client fail with
/// [`StoreError::Transient`] instead of connecting implicitly.
#[derive(Clone)]
pub struct StoreClient {
    settings: Arc<StoreSettings>,
    db: Arc<RwLock<Option<Surreal<Any>>>>,
    queryable: Arc<AtomicBool>,
}

impl StoreClient {
    pub fn new(settings: StoreSettings) -> Self {
        Self {
            settings: Arc::new(settings),
            db: Arc::new(RwLock::new(None)),
            queryable: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Connect to an in-memory store and create the collections (tests)
    pub async fn in_memory() -> StoreResult<Self> {
        let client = Self::new(StoreSettings::in_memory());
        if !client.connect().await {
            return Err(StoreError::not_connected());
        }
        client.ensure_initialized().await?;
        Ok(client)
    }

    pub fn settings(&self) -> &StoreSettings {
        &self.settings
    }

    /// Connect with backoff.
    ///
    /// Returns `false` when every attempt failed; the client then stays
    /// unconnected and the caller decides when to `reconnect()`.
    pub async fn connect(&self) -> bool {
        let backoff = self.settings.backoff;
        match backoff.retry("Store connect", |_| self.open()).await {
            Ok(db) => {
                *self.db.write().await = Some(db);
                self.queryable.store(false, Ordering::Release);
                tracing::info!(
                    url = %self.settings.url,
                    namespace = %self.settings.namespace,
                    database = %self.settings.database,
                    "Store connection established"
                );
                true
            }
            Err(e) => {
                tracing::error!(
                    url = %self.settings.url,
                    attempts = backoff.max_attempts,
                    "Giving up connecting to store: {e}"
                );
                false
            }
        }
    }

    /// Drop the current session, connect again and re-run initialization
    pub async fn reconnect(&self) -> bool {
        self.db.write().await.take();
        self.queryable.store(false, Ordering::Release);

        if !self.connect().await {
            return false;
        }
        match self.ensure_initialized().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Store reconnected but initialization failed: {e}");
                true
            }
        }
    }

    async fn open(&self) -> StoreResult<Surreal<Any>> {
        let db = any::connect(self.settings.url.as_str()).await?;

        if let (Some(username), Some(password)) =
            (&self.settings.username, &self.settings.password)
        {
            db.signin(Root {
                username: username.as_str(),
                password: password.as_str(),
            })
            .await?;
        }

        db.use_ns(self.settings.namespace.as_str())
            .use_db(self.settings.database.as_str())
            .await?;
        Ok(db)
    }

    pub async fn is_connected(&self) -> bool {
        self.db.read().await.is_some()
    }

    pub fn is_queryable(&self) -> bool {
        self.queryable.load(Ordering::Acquire)
    }

    /// Live session handle
    pub async fn session(&self) -> StoreResult<Surreal<Any>> {
        self.db
            .read()
            .await
            .clone()
            .ok_or_else(StoreError::not_connected)
    }

    /// Create the four collections and seed the rules singleton.
    ///
    /// Idempotent. Table definition failures other than "already exists"
    /// are logged and skipped.
    pub async fn ensure_initialized(&self) -> StoreResult<()> {
        let db = self.session().await?;

        for table in TABLES {
            let result = db
                .query(format!("DEFINE TABLE IF NOT EXISTS {table} SCHEMALESS"))
                .await
                .and_then(|response| response.check());
            match result {
                Ok(_) => tracing::debug!(table, "Collection ready"),
                Err(e) if e.to_string().contains("already exists") => {
                    tracing::debug!(table, "Collection already exists")
                }
                Err(e) => tracing::warn!(table, "Failed to define collection: {e}"),
            }
        }

        match self.insert(Rules::default()).await {
            Ok(rules) => tracing::info!(
                max_days_per_week = rules.max_days_per_week,
                preferred_balance = rules.preferred_balance,
                "Seeded default rules"
            ),
            Err(StoreError::Conflict(_)) => tracing::debug!("Rules already present"),
            Err(e) => return Err(e),
        }

        Ok(())
    }

    /// Probe the query engine until it answers; cached once it does
    pub async fn wait_until_queryable(&self) -> StoreResult<()> {
        if self.is_queryable() {
            return Ok(());
        }

        let db = self.session().await?;
        self.settings
            .backoff
            .retry("Store query probe", |_| probe(&db))
            .await?;

        if !self.queryable.swap(true, Ordering::AcqRel) {
            tracing::info!("Store query engine ready");
        }
        Ok(())
    }

    /// Single probe, no retry
    pub async fn health(&self) -> StoreHealth {
        let db = match self.session().await {
            Ok(db) => db,
            Err(e) => {
                return StoreHealth {
                    connected: false,
                    queryable: false,
                    latency_ms: None,
                    error: Some(e.to_string()),
                };
            }
        };

        let started = Instant::now();
        match probe(&db).await {
            Ok(()) => StoreHealth {
                connected: true,
                queryable: true,
                latency_ms: Some(started.elapsed().as_millis() as u64),
                error: None,
            },
            Err(e) => StoreHealth {
                connected: true,
                queryable: false,
                latency_ms: None,
                error: Some(e.to_string()),
            },
        }
    }

    // ========== Document primitives ==========

    /// Keyed lookup; absence is `Ok(None)`
    pub async fn get<D: Document>(&self, key: &str) -> StoreResult<Option<D>> {
        let db = self.session().await?;
        let doc: Option<D> = db.select((D::TABLE, key)).await?;
        Ok(doc)
    }

    /// Create a document that must not exist yet (revision 1)
    pub async fn insert<D: Document>(&self, mut doc: D) -> StoreResult<D> {
        let db = self.session().await?;
        let key = doc.key().to_string();
        doc.set_revision(1);

        let created: Result<Option<D>, surrealdb::Error> =
            db.create((D::TABLE, key.as_str())).content(doc).await;
        match created {
            Ok(Some(doc)) => Ok(doc),
            Ok(None) => Err(StoreError::Permanent(format!(
                "create of {}:{key} returned nothing",
                D::TABLE
            ))),
            Err(e) if e.to_string().contains("already exists") => {
                Err(StoreError::Conflict(format!("{}:{key} already exists", D::TABLE)))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Create or overwrite a document, bumping its revision
    pub async fn upsert<D: Document>(&self, mut doc: D) -> StoreResult<D> {
        let db = self.session().await?;
        let key = doc.key().to_string();

        let current: Option<D> = db.select((D::TABLE, key.as_str())).await?;
        doc.set_revision(current.map_or(0, |c| c.revision()) + 1);

        let stored: Option<D> = db.upsert((D::TABLE, key.as_str())).content(doc).await?;
        stored.ok_or_else(|| {
            StoreError::Permanent(format!("upsert of {}:{key} returned nothing", D::TABLE))
        })
    }

    /// Merge `patch` into the document only if its revision still equals
    /// `expected`.
    ///
    /// Fails with `Conflict` when another writer got there first and with
    /// `NotFound` when the document does not exist.
    pub async fn compare_and_swap<D: Document>(
        &self,
        key: &str,
        expected: u64,
        patch: Value,
    ) -> StoreResult<D> {
        let Value::Object(mut fields) = patch else {
            return Err(StoreError::Validation(
                "patch must be a JSON object".to_string(),
            ));
        };
        fields.insert("revision".to_string(), Value::from(expected + 1));

        let db = self.session().await?;
        let thing = RecordId::from_table_key(D::TABLE, key.to_string());
        let mut response = db
            .query("UPDATE $thing MERGE $patch WHERE revision = $expected RETURN AFTER")
            .bind(("thing", thing))
            .bind(("patch", Value::Object(fields)))
            .bind(("expected", expected))
            .await?;
        let updated: Vec<D> = response.take(0)?;

        if let Some(doc) = updated.into_iter().next() {
            return Ok(doc);
        }

        match self.get::<D>(key).await? {
            Some(current) => Err(StoreError::Conflict(format!(
                "{}:{key} expected revision {expected}, found {}",
                D::TABLE,
                current.revision()
            ))),
            None => Err(StoreError::NotFound(format!("{}:{key}", D::TABLE))),
        }
    }

    /// Partial update: re-reads and retries on revision conflicts so no
    /// concurrent write is silently lost
    pub async fn merge<D: Document>(&self, key: &str, patch: Value) -> StoreResult<D> {
        let mut attempt = 1;
        loop {
            let current = self
                .get::<D>(key)
                .await?
                .ok_or_else(|| StoreError::NotFound(format!("{}:{key}", D::TABLE)))?;

            match self
                .compare_and_swap::<D>(key, current.revision(), patch.clone())
                .await
            {
                Err(StoreError::Conflict(msg)) if attempt < MERGE_ATTEMPTS => {
                    tracing::debug!(table = D::TABLE, key, attempt, "Merge lost a race: {msg}");
                    attempt += 1;
                }
                other => return other,
            }
        }
    }

    /// Delete a document, returning what was removed
    pub async fn remove<D: Document>(&self, key: &str) -> StoreResult<D> {
        let db = self.session().await?;
        let removed: Option<D> = db.delete((D::TABLE, key)).await?;
        removed.ok_or_else(|| StoreError::NotFound(format!("{}:{key}", D::TABLE)))
    }

    /// All documents of a collection in `ORDER_BY` order
    pub async fn list<D: Document>(&self) -> StoreResult<Vec<D>> {
        self.wait_until_queryable().await?;
        let db = self.session().await?;
        let mut response = db
            .query(format!(
                "SELECT * FROM {} ORDER BY {} ASC",
                D::TABLE,
                D::ORDER_BY
            ))
            .await?;
        Ok(response.take(0)?)
    }

    /// Run a query with bound parameters and return the first statement's rows
    pub async fn query<T, B>(&self, sql: &str, bindings: B) -> StoreResult<Vec<T>>
    where
        T: DeserializeOwned,
        B: Serialize + 'static,
    {
        self.wait_until_queryable().await?;
        let db = self.session().await?;
        let mut response = db.query(sql).bind(bindings).await?;
        Ok(response.take(0)?)
    }

    /// Run statements whose results are not needed; any statement error fails
    pub async fn execute<B>(&self, sql: &str, bindings: B) -> StoreResult<()>
    where
        B: Serialize + 'static,
    {
        self.wait_until_queryable().await?;
        let db = self.session().await?;
        db.query(sql).bind(bindings).await?.check()?;
        Ok(())
    }
}

async fn probe(db: &Surreal<Any>) -> StoreResult<()> {
    let mut response = db.query("RETURN 1").await?;
    let _: Option<i64> = response.take(0)?;
    Ok(())
}
