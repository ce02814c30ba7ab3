//! Document store gateway.
//!
//! Documents are schemaless JSON bodies grouped into named collections and
//! kept in a single `documents` table. The gateway never hands out database
//! identifiers: every id leaves this module as a display string.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use idsboard_common::{IdsConfig, StorageError};
use idsboard_db_entities::Document;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectOptions, ConnectionTrait, Database, DatabaseConnection,
    DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Schema,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::*;
use uuid::Uuid;

/// Converts a store identifier into the string form exposed to callers.
pub fn display_id(id: &Uuid) -> String {
    id.hyphenated().to_string()
}

/// Equality constraints on top-level document fields. Empty matches all.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DocumentFilter {
    fields: BTreeMap<String, JsonValue>,
}

impl DocumentFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: &str, value: impl Into<JsonValue>) -> Self {
        self.fields.insert(field.to_owned(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn matches(&self, body: &JsonValue) -> bool {
        self.fields
            .iter()
            .all(|(field, expected)| body.get(field) == Some(expected))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StoredDocument<R> {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub record: R,
}

/// Point-in-time view of the store, as reported by the health endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreHealth {
    pub available: bool,
    pub database_url_set: bool,
    pub database_name: Option<String>,
    pub degraded_reason: Option<String>,
    pub collections: Vec<String>,
    pub collections_error: Option<String>,
}

#[derive(Clone)]
enum Backend {
    Connected(Arc<DatabaseConnection>),
    Degraded(String),
}

/// Shared handle to the document store.
///
/// Cloning is cheap; all clones share one connection pool. Concurrent use
/// relies on the pool and the database for isolation.
#[derive(Clone)]
pub struct DocumentStore {
    backend: Backend,
    database_url_set: bool,
    database_name: Option<String>,
}

impl DocumentStore {
    /// Connects using `DATABASE_URL` from the config. Never fails: when the
    /// URL is missing or the database cannot be reached, the returned store is
    /// degraded and every operation fails with [`StorageError::Unavailable`].
    pub async fn connect(config: &IdsConfig) -> Self {
        let Some(url) = &config.database_url else {
            warn!("DATABASE_URL is not set, running without a document store");
            return Self::degraded("DATABASE_URL is not set");
        };

        let mut store = match Self::open(url.expose_secret()).await {
            Ok(store) => {
                info!("Connected to the document store");
                store
            }
            Err(error) => {
                error!(%error, "Could not connect to the document store, running degraded");
                Self::degraded(error.to_string())
            }
        };
        store.database_url_set = true;
        store.database_name = config.database_name();
        store
    }

    /// Connects to `url` and makes sure the documents table exists.
    pub async fn open(url: &str) -> Result<Self, StorageError> {
        let in_memory = url.contains(":memory:") || url.contains("mode=memory");
        let url = if url.starts_with("sqlite:") && !in_memory {
            prepare_sqlite_file(url)?
        } else {
            url.to_owned()
        };

        let mut opt = ConnectOptions::new(url);
        if in_memory {
            // Every pooled connection would otherwise get its own empty database
            opt.max_connections(1).min_connections(1);
        } else {
            opt.max_connections(100)
                .min_connections(5)
                .connect_timeout(Duration::from_secs(8));
        }
        opt.sqlx_logging(true);

        let connection = Database::connect(opt).await?;
        ensure_schema(&connection).await?;

        Ok(Self {
            backend: Backend::Connected(Arc::new(connection)),
            database_url_set: true,
            database_name: None,
        })
    }

    pub fn degraded(reason: impl Into<String>) -> Self {
        Self {
            backend: Backend::Degraded(reason.into()),
            database_url_set: false,
            database_name: None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self.backend, Backend::Connected(_))
    }

    fn connection(&self) -> Result<&DatabaseConnection, StorageError> {
        match &self.backend {
            Backend::Connected(db) => Ok(db.as_ref()),
            Backend::Degraded(reason) => Err(StorageError::Unavailable(reason.clone())),
        }
    }

    /// Stores `record` in `collection` and returns its new id.
    pub async fn insert<R: Serialize>(
        &self,
        collection: &str,
        record: &R,
    ) -> Result<String, StorageError> {
        use sea_orm::ActiveValue::Set;

        let db = self.connection()?;
        let body = serde_json::to_value(record).map_err(StorageError::Encode)?;
        let now = Utc::now();
        let id = Uuid::now_v7();

        Document::ActiveModel {
            id: Set(id),
            collection: Set(collection.to_owned()),
            body: Set(body),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(db)
        .await?;

        debug!(%collection, id = %id, "Inserted document");
        Ok(display_id(&id))
    }

    /// Returns up to `limit` documents of `collection` matching `filter`, in
    /// insertion order.
    pub async fn query<R: DeserializeOwned>(
        &self,
        collection: &str,
        filter: &DocumentFilter,
        limit: u64,
    ) -> Result<Vec<StoredDocument<R>>, StorageError> {
        let db = self.connection()?;
        let mut select = Document::Entity::find()
            .filter(Document::Column::Collection.eq(collection))
            .order_by_asc(Document::Column::Id);
        if filter.is_empty() {
            select = select.limit(limit);
        }

        let documents = select.all(db).await?;
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);

        documents
            .into_iter()
            .filter(|document| filter.matches(&document.body))
            .take(limit)
            .map(decode_document)
            .collect()
    }

    /// Names of non-empty collections, alphabetically.
    pub async fn collection_names(&self, limit: u64) -> Result<Vec<String>, StorageError> {
        let db = self.connection()?;
        let names = Document::Entity::find()
            .select_only()
            .column(Document::Column::Collection)
            .distinct()
            .order_by_asc(Document::Column::Collection)
            .limit(limit)
            .into_tuple::<String>()
            .all(db)
            .await?;
        Ok(names)
    }

    pub async fn health(&self) -> StoreHealth {
        let mut health = StoreHealth {
            available: self.is_available(),
            database_url_set: self.database_url_set,
            database_name: self.database_name.clone(),
            degraded_reason: None,
            collections: vec![],
            collections_error: None,
        };

        if let Backend::Degraded(reason) = &self.backend {
            health.degraded_reason = Some(reason.clone());
            return health;
        }

        match self.collection_names(10).await {
            Ok(collections) => health.collections = collections,
            Err(error) => {
                warn!(%error, "Failed to list collections");
                health.collections_error = Some(error.to_string());
            }
        }
        health
    }
}

fn decode_document<R: DeserializeOwned>(
    document: Document::Model,
) -> Result<StoredDocument<R>, StorageError> {
    let id = display_id(&document.id);
    match serde_json::from_value(document.body) {
        Ok(record) => Ok(StoredDocument {
            id,
            created_at: document.created_at,
            record,
        }),
        Err(source) => Err(StorageError::Decode { id, source }),
    }
}

/// Creates the parent directory of a SQLite file and asks SQLite to create
/// the file itself if missing.
fn prepare_sqlite_file(url: &str) -> Result<String, StorageError> {
    let path = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
        .unwrap_or(url);
    let (path, query) = match path.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (path, None),
    };

    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    Ok(match query {
        Some(query) if query.contains("mode=") => url.to_owned(),
        Some(_) => format!("{url}&mode=rwc"),
        None => format!("{url}?mode=rwc"),
    })
}

async fn ensure_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut table = schema.create_table_from_entity(Document::Entity);
    table.if_not_exists();
    db.execute(backend.build(&table)).await?;

    for mut index in schema.create_index_from_entity(Document::Entity) {
        index.if_not_exists();
        db.execute(backend.build(&index)).await?;
    }
    Ok(())
}
