use std::collections::HashMap;
use std::sync::Arc;

use sea_orm::DatabaseConnection;
use uuid::Uuid;

mod access;
mod charities;
mod matching;
mod notifications;
mod resources;
mod transits;

/// Run a block inside a DB transaction, committing on success and rolling back
/// on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result: $crate::ResultEngine<_> = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

/// Per-resource mutual exclusion for ledger writers.
///
/// Callers serialize by resource id: a mutating operation acquires the
/// resource's lock before opening its database transaction and re-reads
/// current state inside it, so a losing racer observes the winner's write and
/// fails its own precondition instead of corrupting the counters.
#[derive(Debug, Default)]
struct ResourceLocks {
    inner: std::sync::Mutex<HashMap<Uuid, Arc<tokio::sync::Mutex<()>>>>,
}

impl ResourceLocks {
    async fn acquire(&self, resource_id: Uuid) -> tokio::sync::OwnedMutexGuard<()> {
        let handle = {
            let mut map = self.inner.lock().unwrap_or_else(|e| e.into_inner());
            map.entry(resource_id)
                .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
                .clone()
        };
        handle.lock_owned().await
    }
}

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
    resource_locks: ResourceLocks,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    async fn lock_resource(&self, resource_id: Uuid) -> tokio::sync::OwnedMutexGuard<()> {
        self.resource_locks.acquire(resource_id).await
    }

    /// Lock two resource lines for one operation. Acquisition is in id order,
    /// so overlapping pair locks never deadlock.
    async fn lock_resource_pair(
        &self,
        first: Uuid,
        second: Option<Uuid>,
    ) -> Vec<tokio::sync::OwnedMutexGuard<()>> {
        let mut keys = vec![first];
        if let Some(second) = second {
            if second != first {
                keys.push(second);
            }
        }
        keys.sort();

        let mut guards = Vec::with_capacity(keys.len());
        for key in keys {
            guards.push(self.resource_locks.acquire(key).await);
        }
        guards
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub fn build(self) -> Engine {
        Engine {
            database: self.database,
            resource_locks: ResourceLocks::default(),
        }
    }
}
