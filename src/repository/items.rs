//! Catalog items store

use async_trait::async_trait;

use super::memory::{MemoryTable, Record};
use crate::{
    error::AppResult,
    models::item::{CatalogItem, ItemKind},
};

impl Record for CatalogItem {
    const KIND: &'static str = "Item";

    fn key(&self) -> &str {
        &self.id
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemStore: Send + Sync {
    async fn list(&self) -> AppResult<Vec<CatalogItem>>;

    async fn list_by_kind(&self, kind: ItemKind) -> AppResult<Vec<CatalogItem>>;

    async fn get(&self, id: &str) -> AppResult<Option<CatalogItem>>;

    async fn get_by_serial(&self, serial_no: &str) -> AppResult<Option<CatalogItem>>;

    async fn get_by_name(&self, name: &str) -> AppResult<Option<CatalogItem>>;

    async fn insert(&self, item: CatalogItem) -> AppResult<CatalogItem>;

    async fn update(&self, item: CatalogItem) -> AppResult<CatalogItem>;
}

#[derive(Default)]
pub struct InMemoryItemStore {
    table: MemoryTable<CatalogItem>,
}

#[async_trait]
impl ItemStore for InMemoryItemStore {
    async fn list(&self) -> AppResult<Vec<CatalogItem>> {
        Ok(self.table.all().await)
    }

    async fn list_by_kind(&self, kind: ItemKind) -> AppResult<Vec<CatalogItem>> {
        Ok(self.table.filter(|item| item.kind == kind).await)
    }

    async fn get(&self, id: &str) -> AppResult<Option<CatalogItem>> {
        Ok(self.table.get(id).await)
    }

    async fn get_by_serial(&self, serial_no: &str) -> AppResult<Option<CatalogItem>> {
        Ok(self
            .table
            .find(|item| item.serial_no.eq_ignore_ascii_case(serial_no))
            .await)
    }

    async fn get_by_name(&self, name: &str) -> AppResult<Option<CatalogItem>> {
        Ok(self.table.find(|item| item.name == name).await)
    }

    async fn insert(&self, item: CatalogItem) -> AppResult<CatalogItem> {
        self.table
            .insert_unique(item, |new, old| {
                new.serial_no.eq_ignore_ascii_case(&old.serial_no)
                    .then(|| format!("serial {}", new.serial_no))
            })
            .await
    }

    async fn update(&self, item: CatalogItem) -> AppResult<CatalogItem> {
        self.table.replace(item).await
    }
}
