//! Catalog management service and availability lookup

use chrono::NaiveDate;
use uuid::Uuid;

use super::next_code;
use crate::{
    error::{AppError, AppResult, FormErrors},
    models::item::{AvailabilityQuery, CatalogItem, CreateItem, ItemKind, ItemStatus, UpdateItem},
    repository::Repository,
};

fn non_blank(query: Option<&str>) -> Option<String> {
    query
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_lowercase)
}

/// Items with copies on the shelf whose name and author contain the given queries.
///
/// Matching is case-insensitive substring containment; every non-empty query
/// must match, and an item without an author never matches an author query.
/// Input order is kept. Fails when both queries are empty.
pub fn search_available(
    items: &[CatalogItem],
    name_query: Option<&str>,
    author_query: Option<&str>,
) -> AppResult<Vec<CatalogItem>> {
    let name = non_blank(name_query);
    let author = non_blank(author_query);

    if name.is_none() && author.is_none() {
        return Err(AppError::Validation(
            "Please enter either Book Name or Author Name to search".to_string(),
        ));
    }

    let matches = items
        .iter()
        .filter(|item| item.has_copies())
        .filter(|item| {
            name.as_ref()
                .map_or(true, |q| item.name.to_lowercase().contains(q.as_str()))
        })
        .filter(|item| {
            author.as_ref().map_or(true, |q| {
                item.author
                    .as_ref()
                    .is_some_and(|a| a.to_lowercase().contains(q.as_str()))
            })
        })
        .cloned()
        .collect();

    Ok(matches)
}

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list_by_kind(&self, kind: ItemKind) -> AppResult<Vec<CatalogItem>> {
        self.repository.items.list_by_kind(kind).await
    }

    pub async fn get_by_serial(&self, serial_no: &str) -> AppResult<CatalogItem> {
        self.repository
            .items
            .get_by_serial(serial_no)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Item {} not found", serial_no)))
    }

    /// Check availability across the whole catalog
    pub async fn check_availability(&self, query: &AvailabilityQuery) -> AppResult<Vec<CatalogItem>> {
        let items = self.repository.items.list().await?;
        let found = search_available(&items, query.name.as_deref(), query.author.as_deref())?;
        tracing::debug!(
            name = ?query.name,
            author = ?query.author,
            found = found.len(),
            "Availability search"
        );
        Ok(found)
    }

    /// Add a book or movie; all copies start on the shelf
    pub async fn create_item(&self, request: CreateItem, today: NaiveDate) -> AppResult<CatalogItem> {
        let mut errors = FormErrors::new();
        errors.require(
            "name",
            &request.name,
            &format!("{} name is required", request.kind.label()),
        );
        if request.quantity < 1 {
            errors.add("quantity", "Quantity must be at least 1");
        }
        errors.into_result()?;

        let _desk = self.repository.desk_lock().await;
        let existing = self.repository.items.list_by_kind(request.kind).await?;
        let serial_no = next_code(
            request.kind.serial_prefix(),
            existing.iter().map(|item| item.serial_no.as_str()),
        );

        let author = match request.kind {
            ItemKind::Book => request
                .author
                .map(|a| a.trim().to_string())
                .filter(|a| !a.is_empty()),
            ItemKind::Movie => None,
        };

        let item = CatalogItem {
            id: Uuid::new_v4().to_string(),
            serial_no,
            kind: request.kind,
            name: request.name.trim().to_string(),
            author,
            category: request.category,
            procurement_date: request.procurement_date.unwrap_or(today),
            quantity: request.quantity,
            available: request.quantity,
            status: ItemStatus::Available,
            cost: request.cost,
        };

        let created = self.repository.items.insert(item).await?;
        tracing::info!(serial = %created.serial_no, kind = %created.kind, "Item added");
        Ok(created)
    }

    /// Update name and status of an item identified by serial number
    pub async fn update_item(&self, serial_no: &str, request: UpdateItem) -> AppResult<CatalogItem> {
        let mut errors = FormErrors::new();
        errors.require("name", &request.name, "Name is required");
        errors.require("serial_no", serial_no, "Serial number is required");
        errors.into_result()?;

        let _desk = self.repository.desk_lock().await;
        let mut item = self.get_by_serial(serial_no).await?;
        item.name = request.name.trim().to_string();
        if let Some(status) = request.status {
            item.status = status;
        }

        let updated = self.repository.items.update(item).await?;
        tracing::info!(
            serial = %updated.serial_no,
            status = ?updated.status,
            updated_on = ?request.updated_on,
            "Item updated"
        );
        Ok(updated)
    }
}
