// libs/shared/store/src/table.rs
use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

/// One entity table. All mutations serialize through the write lock, which is
/// what makes `update` a compare-and-adjust primitive: the closure's checks
/// and its mutation commit as a single unit with respect to other callers.
pub struct Table<T> {
    rows: RwLock<HashMap<Uuid, T>>,
}

impl<T: Clone> Table<T> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
        }
    }

    pub async fn insert(&self, id: Uuid, row: T) {
        self.rows.write().await.insert(id, row);
    }

    pub async fn get(&self, id: Uuid) -> Option<T> {
        self.rows.read().await.get(&id).cloned()
    }

    pub async fn all(&self) -> Vec<T> {
        self.rows.read().await.values().cloned().collect()
    }

    pub async fn filter<P>(&self, predicate: P) -> Vec<T>
    where
        P: Fn(&T) -> bool,
    {
        self.rows
            .read()
            .await
            .values()
            .filter(|row| predicate(row))
            .cloned()
            .collect()
    }

    /// Atomic check-and-mutate on a single row. The closure runs against a
    /// working copy under the write lock; the copy replaces the stored row
    /// only when the closure returns `Ok`, so a failed check leaves the row
    /// untouched. Returns `Ok(None)` when the id is unknown.
    pub async fn update<E, F>(&self, id: Uuid, f: F) -> Result<Option<T>, E>
    where
        F: FnOnce(&mut T) -> Result<(), E>,
    {
        let mut rows = self.rows.write().await;
        match rows.get_mut(&id) {
            None => Ok(None),
            Some(row) => {
                let mut candidate = row.clone();
                f(&mut candidate)?;
                *row = candidate.clone();
                Ok(Some(candidate))
            }
        }
    }

    /// Compound mutation over the whole table, e.g. upsert keyed by a
    /// secondary identity. Holds the write lock for the duration of `f`.
    pub async fn with_write<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut HashMap<Uuid, T>) -> R,
    {
        let mut rows = self.rows.write().await;
        f(&mut rows)
    }
}

impl<T: Clone> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn update_commits_only_on_ok() {
        let table: Table<i64> = Table::new();
        let id = Uuid::new_v4();
        table.insert(id, 5).await;

        let ok: Result<Option<i64>, &str> = table
            .update(id, |n| {
                *n -= 1;
                Ok(())
            })
            .await;
        assert_eq!(ok.unwrap(), Some(4));

        let err: Result<Option<i64>, &str> = table
            .update(id, |n| {
                *n -= 100;
                Err("out of range")
            })
            .await;
        assert!(err.is_err());
        assert_eq!(table.get(id).await, Some(4));
    }

    #[tokio::test]
    async fn update_unknown_id_is_none() {
        let table: Table<i64> = Table::new();
        let ok: Result<Option<i64>, &str> = table.update(Uuid::new_v4(), |_| Ok(())).await;
        assert_eq!(ok.unwrap(), None);
    }
}
