use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use pushkind_common::pagination::Pagination;
use serde::{Deserialize, Serialize};

/// Lifecycle states a catalog product can be in.
///
/// `Deleted` is a soft state: the row stays in the store but is hidden from
/// default listings.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProductStatus {
    #[default]
    Draft,
    Active,
    Published,
    Archived,
    Deleted,
}

impl ProductStatus {
    /// Every accepted status value.
    pub const ALL: [ProductStatus; 5] = [
        ProductStatus::Deleted,
        ProductStatus::Active,
        ProductStatus::Published,
        ProductStatus::Archived,
        ProductStatus::Draft,
    ];

    /// Name used both in storage and on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Draft => "Draft",
            ProductStatus::Active => "Active",
            ProductStatus::Published => "Published",
            ProductStatus::Archived => "Archived",
            ProductStatus::Deleted => "Deleted",
        }
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a [`ProductStatus`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown product status `{}`", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for ProductStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ProductStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| UnknownStatus(value.to_string()))
    }
}

/// Domain representation of a catalog product.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Product {
    pub id: i32,
    pub title: String,
    /// Unique URL-safe identifier.
    pub slug: String,
    pub description: String,
    /// Price in the smallest currency unit.
    pub price_cents: i64,
    pub status: ProductStatus,
    /// Stored path of the product image, if any.
    pub image: Option<String>,
    pub location_id: Option<i32>,
    /// Identifiers of the categories the product belongs to.
    pub categories: Vec<i32>,
    /// Listing date; drives "latest" and "related" ordering.
    pub date: NaiveDateTime,
}

/// Columns a product listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSortField {
    Id,
    Title,
    Slug,
    Price,
    Status,
    Date,
}

/// Requested ordering of a product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductOrder {
    pub field: ProductSortField,
    pub descending: bool,
}

impl FromStr for ProductOrder {
    type Err = String;

    /// Parses `field` or `-field`; `price` also accepts the stored column name.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        let (descending, name) = match value.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, value),
        };

        let field = match name {
            "id" => ProductSortField::Id,
            "title" => ProductSortField::Title,
            "slug" => ProductSortField::Slug,
            "price" | "price_cents" => ProductSortField::Price,
            "status" => ProductSortField::Status,
            "date" => ProductSortField::Date,
            _ => return Err(value.to_string()),
        };

        Ok(Self { field, descending })
    }
}

/// How the `status` predicate is applied to a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// No explicit status: everything except soft-deleted products.
    #[default]
    ExcludeDeleted,
    /// Exact match on one status.
    Only(ProductStatus),
    /// An explicit status that no product can have.
    Unmatched,
}

/// Filter specification for product listings.
///
/// Every predicate is optional; the repository applies them in a fixed order
/// and combines them with AND.
#[derive(Debug, Clone, Default)]
pub struct ProductListQuery {
    pub order: Option<ProductOrder>,
    /// Keep products belonging to at least one of these categories.
    pub categories: Vec<i32>,
    /// Keep products located in one of these (known) locations.
    pub locations: Vec<i32>,
    /// Inclusive lower price bound in cents.
    pub min_price_cents: Option<i64>,
    /// Inclusive upper price bound in cents.
    pub max_price_cents: Option<i64>,
    pub status: StatusFilter,
    /// Case-insensitive substring matched against title OR description.
    pub search: Option<String>,
    /// Upper bound on the number of records considered before pagination.
    pub cap: Option<usize>,
    pub pagination: Option<Pagination>,
}

impl ProductListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn order(mut self, order: ProductOrder) -> Self {
        self.order = Some(order);
        self
    }

    pub fn categories(mut self, ids: Vec<i32>) -> Self {
        self.categories = ids;
        self
    }

    pub fn locations(mut self, ids: Vec<i32>) -> Self {
        self.locations = ids;
        self
    }

    pub fn min_price_cents(mut self, cents: i64) -> Self {
        self.min_price_cents = Some(cents);
        self
    }

    pub fn max_price_cents(mut self, cents: i64) -> Self {
        self.max_price_cents = Some(cents);
        self
    }

    pub fn status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Only consider the first `cap` records of the ordered result.
    pub fn cap(mut self, cap: usize) -> Self {
        self.cap = Some(cap);
        self
    }

    /// Apply pagination to the query with the given page number and page size.
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
