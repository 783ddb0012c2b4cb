//! Document store adapter over redb.
//!
//! One collection = one redb table. Documents are JSON blobs keyed by
//! their UUID bytes. The adapter knows nothing about tasks — it moves
//! serde values in and out of the collection.

use redb::{Database, ReadableTable, TableDefinition};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Thin handle to the database file. Cloneable (Arc inside), safe to share
/// across in-flight requests — redb manages its own transaction isolation.
#[derive(Clone)]
pub struct DocumentStore {
    db: Arc<Database>,
    collection: String,
}

impl DocumentStore {
    /// Open (or create) the database at the given path and ensure the
    /// collection's table exists.
    pub fn open(path: &str, collection: &str) -> Result<Self, StoreError> {
        let db = Database::create(path)?;
        let store = DocumentStore {
            db: Arc::new(db),
            collection: collection.to_string(),
        };

        let txn = store.db.begin_write()?;
        {
            let _ = txn.open_table(store.table())?;
        }
        txn.commit()?;

        Ok(store)
    }

    fn table(&self) -> TableDefinition<'_, &'static [u8], &'static [u8]> {
        TableDefinition::new(&self.collection)
    }

    /// Insert or replace the document under the given id.
    pub fn insert<T: Serialize>(&self, id: Uuid, doc: &T) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(doc).map_err(|e| StoreError::Encode(e.to_string()))?;
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(self.table())?;
            table.insert(id.as_bytes().as_slice(), bytes.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    pub fn get<T: DeserializeOwned>(&self, id: Uuid) -> Result<Option<T>, StoreError> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(self.table())?;
        match table.get(id.as_bytes().as_slice())? {
            Some(data) => {
                let doc = serde_json::from_slice(data.value())
                    .map_err(|e| StoreError::Decode(e.to_string()))?;
                Ok(Some(doc))
            }
            None => Ok(None),
        }
    }

    /// Scan the collection in key order, keeping documents the predicate
    /// accepts, skipping the first `skip` matches and returning at most
    /// `limit`. redb has no query language, so filters are evaluated here,
    /// inside the single pass over the table.
    pub fn find<T, F>(&self, pred: F, skip: usize, limit: usize) -> Result<Vec<T>, StoreError>
    where
        T: DeserializeOwned,
        F: Fn(&T) -> bool,
    {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(self.table())?;

        let mut docs = Vec::new();
        let mut matched = 0usize;
        for entry in table.iter()? {
            if docs.len() == limit {
                break;
            }
            let (_, value) = entry?;
            let doc: T = serde_json::from_slice(value.value())
                .map_err(|e| StoreError::Decode(e.to_string()))?;
            if !pred(&doc) {
                continue;
            }
            matched += 1;
            if matched <= skip {
                continue;
            }
            docs.push(doc);
        }
        Ok(docs)
    }

    /// Remove the document under the given id. Returns whether one existed.
    pub fn remove(&self, id: Uuid) -> Result<bool, StoreError> {
        let txn = self.db.begin_write()?;
        let removed;
        {
            let mut table = txn.open_table(self.table())?;
            removed = table.remove(id.as_bytes().as_slice())?.is_some();
        }
        txn.commit()?;
        Ok(removed)
    }
}

// ── Errors ─────────────────────────────────────────────────────

#[derive(Debug)]
pub enum StoreError {
    Redb(String),
    Decode(String),
    Encode(String),
}

// redb 2.x has many error types. Blanket them all into StoreError::Redb.
macro_rules! from_redb {
    ($($t:ty),*) => {
        $(impl From<$t> for StoreError {
            fn from(e: $t) -> Self { StoreError::Redb(e.to_string()) }
        })*
    };
}

from_redb!(
    redb::Error,
    redb::DatabaseError,
    redb::TableError,
    redb::TransactionError,
    redb::StorageError,
    redb::CommitError
);

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Redb(e) => write!(f, "redb: {e}"),
            StoreError::Decode(e) => write!(f, "decode: {e}"),
            StoreError::Encode(e) => write!(f, "encode: {e}"),
        }
    }
}

impl std::error::Error for StoreError {}

// ── Tests ──────────────────────────────────────────────────────
