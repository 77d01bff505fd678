use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::auth::Principal;
use crate::domain::product::{
    Product, ProductListQuery, ProductOrder, ProductStatus, StatusFilter,
};
use crate::forms::products::ChangeStatusForm;
use crate::repository::{ProductReader, ProductWriter, RepositoryError};
use crate::services::pagination::{DEFAULT_PAGE_SIZE, Page, PageParams};
use crate::services::{ServiceError, ServiceResult};

/// Number of records `latest` returns when `count` is missing or unusable.
pub const DEFAULT_LATEST_COUNT: usize = 5;
/// Maximum number of related products returned for one product.
pub const RELATED_PRODUCTS_LIMIT: usize = 4;

/// Raw query parameters accepted by the product listings.
///
/// Every value stays a string here; malformed values are dropped when the
/// filter specification is built instead of failing the request.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ProductParams {
    #[serde(rename = "orderBy")]
    pub order_by: Option<String>,
    pub categories: Option<String>,
    pub locations: Option<String>,
    #[serde(rename = "minPrice")]
    pub min_price: Option<String>,
    #[serde(rename = "maxPrice")]
    pub max_price: Option<String>,
    pub status: Option<String>,
    pub query: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
    /// Only read by the latest-products listing.
    pub count: Option<String>,
}

impl ProductParams {
    /// Builds the filter specification, without pagination.
    pub fn into_list_query(&self) -> ProductListQuery {
        let mut query = ProductListQuery::new()
            .categories(parse_id_list(self.categories.as_deref()))
            .locations(parse_id_list(self.locations.as_deref()))
            .status(parse_status_filter(self.status.as_deref()));

        if let Some(order) = self
            .order_by
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .and_then(|value| value.parse::<ProductOrder>().ok())
        {
            query = query.order(order);
        }

        if let Some(cents) = parse_price(self.min_price.as_deref()).map(lower_bound_cents) {
            query = query.min_price_cents(cents);
        }

        if let Some(cents) = parse_price(self.max_price.as_deref()).map(upper_bound_cents) {
            query = query.max_price_cents(cents);
        }

        if let Some(term) = self
            .query
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
        {
            query = query.search(term);
        }

        query
    }

    /// `count` for the latest listing; anything but a non-negative integer
    /// falls back to the default.
    pub fn latest_count(&self) -> usize {
        self.count
            .as_deref()
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .unwrap_or(DEFAULT_LATEST_COUNT)
    }

    fn page_params(&self) -> PageParams {
        PageParams {
            page: self.page.clone(),
            page_size: self.page_size.clone(),
        }
    }
}

/// Comma separated identifiers; entries that are not integers are skipped.
fn parse_id_list(raw: Option<&str>) -> Vec<i32> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    let mut ids: Vec<i32> = raw
        .split(',')
        .filter_map(|part| part.trim().parse::<i32>().ok())
        .collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

fn parse_status_filter(raw: Option<&str>) -> StatusFilter {
    match raw.map(str::trim) {
        None | Some("") => StatusFilter::ExcludeDeleted,
        Some(value) => match value.parse::<ProductStatus>() {
            Ok(status) => StatusFilter::Only(status),
            Err(_) => StatusFilter::Unmatched,
        },
    }
}

fn parse_price(raw: Option<&str>) -> Option<f64> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .and_then(|value| value.parse::<f64>().ok())
        .filter(|value| value.is_finite())
}

/// Smallest cent amount that is `>= price`.
fn lower_bound_cents(price: f64) -> i64 {
    (price * 100.0 - 1e-6).ceil() as i64
}

/// Largest cent amount that is `<= price`.
fn upper_bound_cents(price: f64) -> i64 {
    (price * 100.0 + 1e-6).floor() as i64
}

/// Renders a cent amount as a decimal string such as `"10.00"`.
pub fn format_price(cents: i64) -> String {
    format!("{:.2}", cents as f64 / 100.0)
}

/// Wire representation of a product.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProductView {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub price: String,
    pub status: ProductStatus,
    pub image: Option<String>,
    pub location: Option<i32>,
    pub categories: Vec<i32>,
    pub date: NaiveDateTime,
}

impl From<Product> for ProductView {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            title: product.title,
            slug: product.slug,
            description: product.description,
            price: format_price(product.price_cents),
            status: product.status,
            image: product.image,
            location: product.location_id,
            categories: product.categories,
            date: product.date,
        }
    }
}

/// Filtered, ordered and paginated catalog listing.
pub fn list_products<R>(repo: &R, params: &ProductParams) -> ServiceResult<Page<ProductView>>
where
    R: ProductReader + ?Sized,
{
    let pagination = params.page_params().pagination(DEFAULT_PAGE_SIZE)?;
    let query = params
        .into_list_query()
        .paginate(pagination.page, pagination.per_page);

    let (total, items) = repo.list_products(query).map_err(ServiceError::from)?;
    Ok(Page::new(total, &pagination, items)?.map(ProductView::from))
}

/// The `count` most recent matching products, newest first, then paginated.
pub fn latest_products<R>(repo: &R, params: &ProductParams) -> ServiceResult<Page<ProductView>>
where
    R: ProductReader + ?Sized,
{
    let pagination = params.page_params().pagination(DEFAULT_PAGE_SIZE)?;
    let mut query = params
        .into_list_query()
        .cap(params.latest_count())
        .paginate(pagination.page, pagination.per_page);
    // Recency always wins over a requested ordering here.
    query.order = None;

    let (total, items) = repo.list_products(query).map_err(ServiceError::from)?;
    Ok(Page::new(total, &pagination, items)?.map(ProductView::from))
}

fn find_by_slug<R>(repo: &R, slug: &str) -> ServiceResult<Product>
where
    R: ProductReader + ?Sized,
{
    repo.get_product_by_slug(slug)
        .map_err(ServiceError::from)?
        .ok_or_else(|| {
            ServiceError::NotFound(format!(
                "No Product matches the given query for slug: {slug}"
            ))
        })
}

pub fn get_product_by_slug<R>(repo: &R, slug: &str) -> ServiceResult<ProductView>
where
    R: ProductReader + ?Sized,
{
    find_by_slug(repo, slug).map(ProductView::from)
}

pub fn get_product_by_id<R>(repo: &R, product_id: i32) -> ServiceResult<ProductView>
where
    R: ProductReader + ?Sized,
{
    repo.get_product_by_id(product_id)
        .map_err(ServiceError::from)?
        .map(ProductView::from)
        .ok_or_else(|| {
            ServiceError::NotFound(format!(
                "No Product matches the given query for id: {product_id}"
            ))
        })
}

/// Up to four other non-deleted products sharing a category, newest first.
pub fn related_products<R>(repo: &R, slug: &str) -> ServiceResult<Vec<ProductView>>
where
    R: ProductReader + ?Sized,
{
    let product = find_by_slug(repo, slug)?;

    let related = repo
        .list_related_products(product.id, RELATED_PRODUCTS_LIMIT)
        .map_err(ServiceError::from)?;

    Ok(related.into_iter().map(ProductView::from).collect())
}

/// Moves a product to the submitted status.
///
/// The record is resolved first, then the value is checked; nothing is
/// written unless both succeed.
pub fn change_product_status<R>(
    repo: &R,
    principal: &Principal,
    slug: &str,
    form: ChangeStatusForm,
) -> ServiceResult<ProductView>
where
    R: ProductReader + ProductWriter + ?Sized,
{
    let product = find_by_slug(repo, slug)?;
    let status = form.into_status()?;

    let updated = match repo.update_product_status(product.id, status) {
        Ok(updated) => updated,
        Err(RepositoryError::NotFound) => {
            return Err(ServiceError::NotFound(format!(
                "No Product matches the given query for slug: {slug}"
            )));
        }
        Err(err) => {
            log::error!("Failed to set product {slug} to {status}: {err}");
            return Err(ServiceError::Internal(err.to_string()));
        }
    };

    log::info!(
        "User {} moved product {} to {}",
        principal.user_id,
        updated.slug,
        updated.status
    );

    Ok(ProductView::from(updated))
}

/// Soft delete: the product stays stored with the `Deleted` status.
pub fn delete_product<R>(repo: &R, principal: &Principal, slug: &str) -> ServiceResult<()>
where
    R: ProductReader + ProductWriter + ?Sized,
{
    let form = ChangeStatusForm {
        status: Some(ProductStatus::Deleted.as_str().to_string()),
    };
    change_product_status(repo, principal, slug, form).map(|_| ())
}
