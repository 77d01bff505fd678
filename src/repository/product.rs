use std::collections::HashMap;

use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};
use pushkind_common::pagination::Pagination;

use crate::{
    domain::product::{
        Product as DomainProduct, ProductListQuery, ProductOrder, ProductSortField, ProductStatus,
        StatusFilter,
    },
    models::product::{Product as DbProduct, UpdateProductStatus},
    repository::{DieselRepository, ProductReader, ProductWriter, RepositoryResult},
    schema::{locations, product_categories, products},
};

type BoxedProducts<'a> = products::BoxedQuery<'a, Sqlite>;

impl ProductReader for DieselRepository {
    fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<DomainProduct>> {
        let mut conn = self.conn()?;
        let product = products::table
            .filter(products::id.eq(id))
            .first::<DbProduct>(&mut conn)
            .optional()?;

        product
            .map(|product| with_categories(&mut conn, product))
            .transpose()
    }

    fn get_product_by_slug(&self, slug: &str) -> RepositoryResult<Option<DomainProduct>> {
        let mut conn = self.conn()?;
        let product = products::table
            .filter(products::slug.eq(slug))
            .first::<DbProduct>(&mut conn)
            .optional()?;

        product
            .map(|product| with_categories(&mut conn, product))
            .transpose()
    }

    fn get_products_by_ids(&self, ids: &[i32]) -> RepositoryResult<HashMap<i32, DomainProduct>> {
        let mut conn = self.conn()?;
        load_products_by_ids(&mut conn, ids)
    }

    fn list_products(
        &self,
        query: ProductListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainProduct>)> {
        let mut conn = self.conn()?;

        // Unknown location ids drop out here, before the product filter sees them.
        let location_ids = if query.locations.is_empty() {
            None
        } else {
            let known = locations::table
                .filter(locations::id.eq_any(&query.locations))
                .select(locations::id)
                .load::<i32>(&mut conn)?;
            Some(known)
        };

        let matching = filtered_products(&query, location_ids.as_deref())
            .count()
            .get_result::<i64>(&mut conn)? as usize;
        let total = match query.cap {
            Some(cap) => matching.min(cap),
            None => matching,
        };

        let mut items = ordered(
            filtered_products(&query, location_ids.as_deref()),
            query.order,
        );

        if let Some((offset, limit)) = page_window(query.pagination.as_ref(), query.cap) {
            if limit == 0 {
                return Ok((total, Vec::new()));
            }
            items = items
                .offset(i64::try_from(offset).unwrap_or(i64::MAX))
                .limit(i64::try_from(limit).unwrap_or(i64::MAX));
        }

        let db_products = items.load::<DbProduct>(&mut conn)?;
        let products = attach_categories(&mut conn, db_products)?;

        Ok((total, products))
    }

    fn list_related_products(
        &self,
        product_id: i32,
        limit: usize,
    ) -> RepositoryResult<Vec<DomainProduct>> {
        let mut conn = self.conn()?;

        let category_ids = product_categories::table
            .filter(product_categories::product_id.eq(product_id))
            .select(product_categories::category_id)
            .load::<i32>(&mut conn)?;

        if category_ids.is_empty() {
            return Ok(Vec::new());
        }

        let peers = product_categories::table
            .filter(product_categories::category_id.eq_any(category_ids))
            .select(product_categories::product_id);

        let db_products = products::table
            .filter(products::id.eq_any(peers))
            .filter(products::id.ne(product_id))
            .filter(products::status.ne(ProductStatus::Deleted.as_str()))
            .order((products::date.desc(), products::id.desc()))
            .limit(limit as i64)
            .load::<DbProduct>(&mut conn)?;

        attach_categories(&mut conn, db_products)
    }
}

impl ProductWriter for DieselRepository {
    fn update_product_status(
        &self,
        product_id: i32,
        status: ProductStatus,
    ) -> RepositoryResult<DomainProduct> {
        let mut conn = self.conn()?;

        let target = products::table.filter(products::id.eq(product_id));
        let updated = diesel::update(target)
            .set(&UpdateProductStatus::from(&status))
            .get_result::<DbProduct>(&mut conn)?;

        with_categories(&mut conn, updated)
    }
}

/// Applies the listing predicates in their fixed order: status, categories,
/// locations, minimum price, maximum price, search.
fn filtered_products<'a>(
    query: &ProductListQuery,
    location_ids: Option<&[i32]>,
) -> BoxedProducts<'a> {
    let mut items = products::table.into_boxed::<Sqlite>();

    items = match query.status {
        StatusFilter::ExcludeDeleted => {
            items.filter(products::status.ne(ProductStatus::Deleted.as_str()))
        }
        StatusFilter::Only(status) => items.filter(products::status.eq(status.as_str())),
        StatusFilter::Unmatched => items.filter(products::id.is_null()),
    };

    if !query.categories.is_empty() {
        // A sub-select keeps products in several matching categories unique.
        let in_categories = product_categories::table
            .filter(product_categories::category_id.eq_any(query.categories.clone()))
            .select(product_categories::product_id);
        items = items.filter(products::id.eq_any(in_categories));
    }

    if let Some(ids) = location_ids {
        items = items.filter(products::location_id.eq_any(ids.to_vec()));
    }

    if let Some(min) = query.min_price_cents {
        items = items.filter(products::price_cents.ge(min));
    }

    if let Some(max) = query.max_price_cents {
        items = items.filter(products::price_cents.le(max));
    }

    if let Some(term) = query.search.as_ref() {
        let pattern = contains_pattern(term);
        items = items.filter(
            products::title
                .like(pattern.clone())
                .escape('\\')
                .or(products::description.like(pattern).escape('\\')),
        );
    }

    items
}

/// `LIKE` pattern matching `term` literally anywhere in the column.
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn ordered(items: BoxedProducts<'_>, order: Option<ProductOrder>) -> BoxedProducts<'_> {
    let Some(ProductOrder { field, descending }) = order else {
        return items.order_by((products::date.desc(), products::id.desc()));
    };

    let items = match field {
        ProductSortField::Id if descending => items.order_by(products::id.desc()),
        ProductSortField::Id => items.order_by(products::id.asc()),
        ProductSortField::Title if descending => items.order_by(products::title.desc()),
        ProductSortField::Title => items.order_by(products::title.asc()),
        ProductSortField::Slug if descending => items.order_by(products::slug.desc()),
        ProductSortField::Slug => items.order_by(products::slug.asc()),
        ProductSortField::Price if descending => items.order_by(products::price_cents.desc()),
        ProductSortField::Price => items.order_by(products::price_cents.asc()),
        ProductSortField::Status if descending => items.order_by(products::status.desc()),
        ProductSortField::Status => items.order_by(products::status.asc()),
        ProductSortField::Date if descending => items.order_by(products::date.desc()),
        ProductSortField::Date => items.order_by(products::date.asc()),
    };

    // Stable pages when the sort key has ties.
    items.then_order_by(products::id.asc())
}

/// Offset and limit for the requested page, clipped to the cap.
///
/// `None` means the whole (capped) result is returned.
fn page_window(pagination: Option<&Pagination>, cap: Option<usize>) -> Option<(usize, usize)> {
    match (pagination, cap) {
        (None, None) => None,
        (None, Some(cap)) => Some((0, cap)),
        (Some(pagination), cap) => {
            let offset = (pagination.page.max(1) - 1).saturating_mul(pagination.per_page);
            let limit = match cap {
                Some(cap) => pagination.per_page.min(cap.saturating_sub(offset)),
                None => pagination.per_page,
            };
            Some((offset, limit))
        }
    }
}

fn with_categories(
    conn: &mut SqliteConnection,
    product: DbProduct,
) -> RepositoryResult<DomainProduct> {
    let mut categories = load_categories_for_products(conn, &[product.id])?;
    let ids = categories.remove(&product.id).unwrap_or_default();
    Ok(product.into_domain(ids))
}

fn attach_categories(
    conn: &mut SqliteConnection,
    db_products: Vec<DbProduct>,
) -> RepositoryResult<Vec<DomainProduct>> {
    if db_products.is_empty() {
        return Ok(Vec::new());
    }

    let product_ids: Vec<i32> = db_products.iter().map(|product| product.id).collect();
    let mut category_map = load_categories_for_products(conn, &product_ids)?;

    Ok(db_products
        .into_iter()
        .map(|product| {
            let ids = category_map.remove(&product.id).unwrap_or_default();
            product.into_domain(ids)
        })
        .collect())
}

/// Loads products by id, keyed by id. Missing ids are absent from the map.
pub(crate) fn load_products_by_ids(
    conn: &mut SqliteConnection,
    product_ids: &[i32],
) -> RepositoryResult<HashMap<i32, DomainProduct>> {
    if product_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let db_products = products::table
        .filter(products::id.eq_any(product_ids))
        .load::<DbProduct>(conn)?;

    Ok(attach_categories(conn, db_products)?
        .into_iter()
        .map(|product| (product.id, product))
        .collect())
}

fn load_categories_for_products(
    conn: &mut SqliteConnection,
    product_ids: &[i32],
) -> RepositoryResult<HashMap<i32, Vec<i32>>> {
    let rows = product_categories::table
        .filter(product_categories::product_id.eq_any(product_ids))
        .order(product_categories::category_id.asc())
        .select((
            product_categories::product_id,
            product_categories::category_id,
        ))
        .load::<(i32, i32)>(conn)?;

    let mut map: HashMap<i32, Vec<i32>> = HashMap::new();
    for (product_id, category_id) in rows {
        map.entry(product_id).or_default().push(category_id);
    }

    Ok(map)
}
