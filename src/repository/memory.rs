//! Insertion-ordered in-memory tables backing the stores

use indexmap::IndexMap;
use tokio::sync::RwLock;

use crate::error::{AppError, AppResult};

/// A row addressable by its opaque id
pub trait Record: Clone + Send + Sync {
    const KIND: &'static str;

    fn key(&self) -> &str;
}

/// One collection, ordered by insertion
pub struct MemoryTable<T> {
    rows: RwLock<IndexMap<String, T>>,
}

impl<T: Record> Default for MemoryTable<T> {
    fn default() -> Self {
        Self {
            rows: RwLock::new(IndexMap::new()),
        }
    }
}

impl<T: Record> MemoryTable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn all(&self) -> Vec<T> {
        self.rows.read().await.values().cloned().collect()
    }

    pub async fn get(&self, key: &str) -> Option<T> {
        self.rows.read().await.get(key).cloned()
    }

    pub async fn find<F>(&self, predicate: F) -> Option<T>
    where
        F: Fn(&T) -> bool,
    {
        self.rows.read().await.values().find(|row| predicate(row)).cloned()
    }

    pub async fn filter<F>(&self, predicate: F) -> Vec<T>
    where
        F: Fn(&T) -> bool,
    {
        self.rows
            .read()
            .await
            .values()
            .filter(|row| predicate(row))
            .cloned()
            .collect()
    }

    pub async fn insert(&self, row: T) -> AppResult<T> {
        self.insert_unique(row, |_, _| None).await
    }

    /// Insert unless the id, or whatever `clash` reports between the new row
    /// and an existing one, is already taken. Checked under the write lock.
    pub async fn insert_unique<F>(&self, row: T, clash: F) -> AppResult<T>
    where
        F: Fn(&T, &T) -> Option<String>,
    {
        let mut rows = self.rows.write().await;
        if let Some(taken) = rows.values().find_map(|existing| clash(&row, existing)) {
            return Err(AppError::Conflict(format!(
                "{} {} already exists",
                T::KIND,
                taken
            )));
        }
        if rows.contains_key(row.key()) {
            return Err(AppError::Conflict(format!(
                "{} with id {} already exists",
                T::KIND,
                row.key()
            )));
        }
        rows.insert(row.key().to_string(), row.clone());
        Ok(row)
    }

    /// Overwrite an existing row, keeping its position
    pub async fn replace(&self, row: T) -> AppResult<T> {
        let mut rows = self.rows.write().await;
        match rows.get_mut(row.key()) {
            Some(slot) => {
                *slot = row.clone();
                Ok(row)
            }
            None => Err(AppError::NotFound(format!(
                "{} with id {} not found",
                T::KIND,
                row.key()
            ))),
        }
    }
}
