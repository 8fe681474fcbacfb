//! Catalog item (book or movie) model and related types

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Book,
    Movie,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Book => "book",
            ItemKind::Movie => "movie",
        }
    }

    /// Prefix of generated serial numbers (BK001, MV001)
    pub fn serial_prefix(&self) -> &'static str {
        match self {
            ItemKind::Book => "BK",
            ItemKind::Movie => "MV",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::Book => "Book",
            ItemKind::Movie => "Movie",
        }
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Shelf status; informational only, availability is tracked by `available`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Available,
    Issued,
    Lost,
}

/// Book or movie in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CatalogItem {
    pub id: String,
    pub serial_no: String,
    pub kind: ItemKind,
    pub name: String,
    pub author: Option<String>,
    pub category: Option<String>,
    pub procurement_date: NaiveDate,
    pub quantity: u32,
    pub available: u32,
    pub status: ItemStatus,
    #[schema(value_type = Option<String>)]
    pub cost: Option<Decimal>,
}

impl CatalogItem {
    pub fn has_copies(&self) -> bool {
        self.available > 0
    }

    /// Take one copy off the shelf
    pub fn check_out(&mut self) {
        self.available = self.available.saturating_sub(1);
        if self.available == 0 {
            self.status = ItemStatus::Issued;
        }
    }

    /// Put one copy back on the shelf
    pub fn check_in(&mut self) {
        self.available = (self.available + 1).min(self.quantity);
        if self.status == ItemStatus::Issued {
            self.status = ItemStatus::Available;
        }
    }
}

/// Add item request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateItem {
    pub kind: ItemKind,
    pub name: String,
    /// Books only; ignored for movies
    pub author: Option<String>,
    pub category: Option<String>,
    pub procurement_date: Option<NaiveDate>,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: u32,
    #[schema(value_type = Option<String>)]
    pub cost: Option<Decimal>,
}

/// Update item request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateItem {
    pub name: String,
    pub status: Option<ItemStatus>,
    pub updated_on: Option<NaiveDate>,
}

/// Availability search query
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
pub struct AvailabilityQuery {
    /// Substring of the title
    pub name: Option<String>,
    /// Substring of the author
    pub author: Option<String>,
}
